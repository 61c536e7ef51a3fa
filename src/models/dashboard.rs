// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;

// Os cards do topo da tela inicial
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_employees: usize,
    pub active_employees: usize,
    pub present_today: usize,     // Pontos abertos ou fechados hoje
    pub on_leave_today: usize,    // Férias/licenças aprovadas que cobrem hoje
    pub pending_leaves: usize,
    pub pending_permissions: usize,
    pub payroll_this_month: Decimal, // Soma dos líquidos da competência atual
}

/// Contagem de funcionários por departamento.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentHeadcount {
    pub department: String,
    pub employees: usize,
}
