// src/services/export_service.rs

use chrono::{DateTime, Utc};

use crate::{
    common::error::AppError,
    db::{AttendanceRepository, EmployeeRepository, SalaryRepository},
    models::export::DataExport,
};

#[derive(Clone)]
pub struct ExportService {
    employees: EmployeeRepository,
    attendance: AttendanceRepository,
    salaries: SalaryRepository,
}

impl ExportService {
    pub fn new(
        employees: EmployeeRepository,
        attendance: AttendanceRepository,
        salaries: SalaryRepository,
    ) -> Self {
        Self {
            employees,
            attendance,
            salaries,
        }
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> DataExport {
        DataExport {
            employees: self.employees.list(),
            attendance: self.attendance.list(),
            salaries: self.salaries.list(),
            export_date: now,
        }
    }

    /// Nome sugerido para o download: `hr-data-export-YYYY-MM-DD.json`.
    pub fn file_name(now: DateTime<Utc>) -> String {
        format!("hr-data-export-{}.json", now.format("%Y-%m-%d"))
    }

    /// Documento JSON identado, pronto para download.
    pub fn export_json(&self, now: DateTime<Utc>) -> Result<Vec<u8>, AppError> {
        let export = self.snapshot(now);
        let bytes = serde_json::to_vec_pretty(&export)?;
        tracing::info!(
            employees = export.employees.len(),
            attendance = export.attendance.len(),
            salaries = export.salaries.len(),
            "📦 Exportação gerada"
        );
        Ok(bytes)
    }
}
