// src/config.rs

use std::{env, path::PathBuf, sync::Arc};

use anyhow::Context;

use crate::{
    db::{
        AttendanceRepository, EmployeeRepository, FileStore, JsonStore, KeyValueStore,
        LeaveRepository, MemoryStore, PerformanceRepository, SalaryRepository,
        SettingsRepository, SkillsRepository, UserRepository,
    },
    services::{
        attendance_service::AttendanceService, auth::AuthService,
        dashboard_service::DashboardService, document_service::DocumentService,
        employee_service::EmployeeService, export_service::ExportService,
        leave_service::LeaveService, payroll_service::PayrollService,
        performance_service::PerformanceService, report_service::ReportService,
        settings_service::SettingsProvider, skills_service::SkillsService,
    },
};

// Valor especial de DATA_DIR: tudo em memória, nada gravado em disco
pub const IN_MEMORY_DATA_DIR: &str = ":memory:";

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: String,
    pub bind_addr: String,
    pub jwt_secret: String,
    pub fonts_dir: PathBuf,
    pub font_family: String,
    pub admin_username: String,
    pub admin_password: String,
    pub bcrypt_cost: u32,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;
        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("BCRYPT_COST inválido: '{}'", raw))?,
            Err(_) => bcrypt::DEFAULT_COST,
        };

        Ok(Self {
            data_dir: var_or("DATA_DIR", "./data"),
            bind_addr: var_or("BIND_ADDR", "127.0.0.1:3000"),
            jwt_secret,
            fonts_dir: PathBuf::from(var_or("FONTS_DIR", "./fonts")),
            font_family: var_or("FONT_FAMILY", "Roboto"),
            admin_username: var_or("ADMIN_USERNAME", "admin"),
            admin_password: var_or("ADMIN_PASSWORD", "admin123"),
            bcrypt_cost,
        })
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub settings: Arc<SettingsProvider>,
    pub auth_service: AuthService,
    pub employee_service: EmployeeService,
    pub attendance_service: AttendanceService,
    pub leave_service: LeaveService,
    pub payroll_service: PayrollService,
    pub document_service: DocumentService,
    pub skills_service: SkillsService,
    pub performance_service: PerformanceService,
    pub report_service: ReportService,
    pub dashboard_service: DashboardService,
    pub export_service: ExportService,
}

impl AppState {
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        let backend: Arc<dyn KeyValueStore> = if config.data_dir == IN_MEMORY_DATA_DIR {
            tracing::warn!("⚠️ DATA_DIR=:memory: os dados não serão gravados em disco");
            Arc::new(MemoryStore::new())
        } else {
            let store = FileStore::open(&config.data_dir)
                .with_context(|| format!("Falha ao abrir o diretório de dados '{}'", config.data_dir))?;
            Arc::new(store)
        };

        let store = JsonStore::new(backend);
        tracing::debug!(keys = ?store.keys(), "🗂️ Chaves encontradas no armazenamento");
        let state = Self::with_store(store, config);

        let seeded = state
            .auth_service
            .ensure_default_admin(&state.config.admin_username, &state.config.admin_password)
            .await?;
        if !seeded {
            tracing::debug!("Lista de usuários já existente, admin padrão não criado");
        }

        Ok(state)
    }

    /// Monta o gráfico de dependências sobre um armazenamento já aberto.
    pub fn with_store(store: JsonStore, config: AppConfig) -> Self {
        let employee_repo = EmployeeRepository::new(store.clone());
        let attendance_repo = AttendanceRepository::new(store.clone());
        let leave_repo = LeaveRepository::new(store.clone());
        let salary_repo = SalaryRepository::new(store.clone());

        let settings = Arc::new(SettingsProvider::new(SettingsRepository::new(store.clone())));
        settings.subscribe(|s| {
            tracing::debug!(
                company = %s.company.name,
                allowance_rate = %s.payroll.allowance_rate,
                deduction_rate = %s.payroll.deduction_rate,
                "🔔 Novas configurações propagadas"
            );
        });
        let employee_service = EmployeeService::new(employee_repo.clone());

        Self {
            auth_service: AuthService::new(
                UserRepository::new(store.clone()),
                config.jwt_secret.clone(),
                config.bcrypt_cost,
            ),
            attendance_service: AttendanceService::new(
                attendance_repo.clone(),
                employee_service.clone(),
                Arc::clone(&settings),
            ),
            leave_service: LeaveService::new(leave_repo.clone(), employee_service.clone()),
            payroll_service: PayrollService::new(
                salary_repo.clone(),
                employee_service.clone(),
                Arc::clone(&settings),
            ),
            document_service: DocumentService::new(
                salary_repo.clone(),
                employee_service.clone(),
                Arc::clone(&settings),
                config.fonts_dir.clone(),
                config.font_family.clone(),
            ),
            skills_service: SkillsService::new(
                SkillsRepository::new(store.clone()),
                employee_service.clone(),
            ),
            performance_service: PerformanceService::new(
                PerformanceRepository::new(store),
                employee_service.clone(),
            ),
            report_service: ReportService::new(
                attendance_repo.clone(),
                leave_repo.clone(),
                employee_service.clone(),
            ),
            dashboard_service: DashboardService::new(
                employee_repo.clone(),
                attendance_repo.clone(),
                leave_repo,
                salary_repo.clone(),
            ),
            export_service: ExportService::new(employee_repo, attendance_repo, salary_repo),
            employee_service,
            settings,
            config: Arc::new(config),
        }
    }
}
