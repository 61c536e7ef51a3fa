pub mod kv_store;
pub use kv_store::{JsonStore, KeyValueStore};
pub mod file_store;
pub use file_store::FileStore;
pub mod memory_store;
pub use memory_store::MemoryStore;
pub mod collection;

pub mod employee_repo;
pub use employee_repo::EmployeeRepository;
pub mod attendance_repo;
pub use attendance_repo::AttendanceRepository;
pub mod leave_repo;
pub use leave_repo::LeaveRepository;
pub mod salary_repo;
pub use salary_repo::SalaryRepository;
pub mod skills_repo;
pub use skills_repo::SkillsRepository;
pub mod performance_repo;
pub use performance_repo::PerformanceRepository;
pub mod settings_repo;
pub use settings_repo::SettingsRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
