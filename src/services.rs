pub mod auth;
pub mod settings_service;
pub mod employee_service;
pub mod attendance_service;
pub mod leave_service;
pub mod payroll_service;
pub mod document_service;
pub mod skills_service;
pub mod performance_service;
pub mod report_service;
pub mod dashboard_service;
pub mod export_service;
