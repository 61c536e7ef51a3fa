// src/models/export.rs

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{attendance::Attendance, employee::Employee, payroll::Salary};

/// Documento de backup oferecido como download. Não existe caminho de importação.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataExport {
    pub employees: Vec<Employee>,
    pub attendance: Vec<Attendance>,
    pub salaries: Vec<Salary>,
    pub export_date: DateTime<Utc>,
}
