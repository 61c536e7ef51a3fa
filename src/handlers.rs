pub mod auth;
pub mod employees;
pub mod attendance;
pub mod leaves;
pub mod payroll;
pub mod skills;
pub mod performance;
pub mod settings;
pub mod reports;
pub mod dashboard;
pub mod export;
