pub mod attendance;
pub mod auth;
pub mod dashboard;
pub mod employee;
pub mod export;
pub mod leave;
pub mod payroll;
pub mod performance;
pub mod report;
pub mod settings;
pub mod skills;
