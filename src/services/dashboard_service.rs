// src/services/dashboard_service.rs

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    db::{AttendanceRepository, EmployeeRepository, LeaveRepository, SalaryRepository},
    models::{
        dashboard::{DashboardSummary, DepartmentHeadcount},
        employee::EmployeeStatus,
        leave::RequestStatus,
        payroll::PayPeriod,
    },
};

#[derive(Clone)]
pub struct DashboardService {
    employees: EmployeeRepository,
    attendance: AttendanceRepository,
    leaves: LeaveRepository,
    salaries: SalaryRepository,
}

impl DashboardService {
    pub fn new(
        employees: EmployeeRepository,
        attendance: AttendanceRepository,
        leaves: LeaveRepository,
        salaries: SalaryRepository,
    ) -> Self {
        Self {
            employees,
            attendance,
            leaves,
            salaries,
        }
    }

    pub fn get_summary(&self, today: NaiveDate) -> DashboardSummary {
        let employees = self.employees.list();

        let mut present: Vec<String> = self
            .attendance
            .list_by_date(today)
            .into_iter()
            .map(|a| a.employee_id)
            .collect();
        present.sort();
        present.dedup();

        let leaves = self.leaves.list_leaves();
        let on_leave_today = leaves
            .iter()
            .filter(|l| {
                l.status == RequestStatus::Approved && l.start_date <= today && today <= l.end_date
            })
            .count();
        let pending_leaves = leaves
            .iter()
            .filter(|l| l.status == RequestStatus::Pending)
            .count();

        let month = PayPeriod::containing(today).label();
        let payroll_this_month: Decimal = self
            .salaries
            .list_by_month(&month)
            .iter()
            .map(|s| s.net_salary)
            .sum();

        DashboardSummary {
            total_employees: employees.len(),
            active_employees: employees.iter().filter(|e| e.is_active()).count(),
            present_today: present.len(),
            on_leave_today,
            pending_leaves,
            pending_permissions: self.leaves.list_permissions_by_status(RequestStatus::Pending).len(),
            payroll_this_month,
        }
    }

    /// Funcionários ativos por departamento, em ordem alfabética.
    pub fn headcount_by_department(&self) -> Vec<DepartmentHeadcount> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for employee in self.employees.list_by_status(EmployeeStatus::Active) {
            *counts.entry(employee.department).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(department, employees)| DepartmentHeadcount {
                department,
                employees,
            })
            .collect()
    }
}
