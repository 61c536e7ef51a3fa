// src/services/payroll_service.rs

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use crate::{
    common::{
        db_utils::{new_record_id, round2},
        error::AppError,
    },
    db::SalaryRepository,
    models::{
        employee::Employee,
        payroll::{PayPeriod, Salary},
        settings::PayrollSettings,
    },
    services::{employee_service::EmployeeService, settings_service::SettingsProvider},
};

/// Valores calculados de um holerite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryBreakdown {
    pub basic_salary: Decimal,
    pub allowances: Decimal,
    pub deductions: Decimal,
    pub net_salary: Decimal,
}

fn salary_out_of_range() -> AppError {
    AppError::field_error(
        "salary",
        "range",
        "O salário é grande demais para calcular o holerite.",
    )
}

impl SalaryBreakdown {
    /// Falha (em vez de estourar) quando os valores saem da faixa do `Decimal`.
    pub fn compute(basic_salary: Decimal, policy: &PayrollSettings) -> Result<Self, AppError> {
        let basic_salary = round2(basic_salary);
        let allowances = basic_salary
            .checked_mul(policy.allowance_rate)
            .map(round2)
            .ok_or_else(salary_out_of_range)?;
        let deductions = basic_salary
            .checked_mul(policy.deduction_rate)
            .map(round2)
            .ok_or_else(salary_out_of_range)?;
        let net_salary = basic_salary
            .checked_add(allowances)
            .and_then(|gross| gross.checked_sub(deductions))
            .ok_or_else(salary_out_of_range)?;
        Ok(Self {
            basic_salary,
            allowances,
            deductions,
            net_salary,
        })
    }
}

#[derive(Clone)]
pub struct PayrollService {
    repo: SalaryRepository,
    employees: EmployeeService,
    settings: Arc<SettingsProvider>,
}

impl PayrollService {
    pub fn new(
        repo: SalaryRepository,
        employees: EmployeeService,
        settings: Arc<SettingsProvider>,
    ) -> Self {
        Self {
            repo,
            employees,
            settings,
        }
    }

    pub fn list(&self) -> Vec<Salary> {
        self.repo.list()
    }

    pub fn list_by_month(&self, month: &str) -> Result<Vec<Salary>, AppError> {
        let period = PayPeriod::parse(month)?;
        Ok(self.repo.list_by_month(&period.label()))
    }

    pub fn list_by_employee(&self, employee_id: &str) -> Vec<Salary> {
        self.repo.list_by_employee(employee_id)
    }

    pub fn get(&self, id: &str) -> Result<Salary, AppError> {
        self.repo.find_by_id(id).ok_or_else(|| AppError::RecordNotFound {
            collection: "salaries",
            id: id.to_string(),
        })
    }

    fn build(&self, employee: &Employee, period: PayPeriod) -> Result<Salary, AppError> {
        let policy = self.settings.get().payroll;
        let breakdown = SalaryBreakdown::compute(employee.salary, &policy)?;
        Ok(Salary {
            id: new_record_id(),
            employee_id: employee.id.clone(),
            month: period.label(),
            basic_salary: breakdown.basic_salary,
            allowances: breakdown.allowances,
            deductions: breakdown.deductions,
            net_salary: breakdown.net_salary,
            generated_at: Utc::now(),
        })
    }

    /// Gera o holerite de um funcionário. Falha se já existir um para a competência.
    pub fn generate(&self, employee_id: &str, month: &str) -> Result<Salary, AppError> {
        let period = PayPeriod::parse(month)?;
        let employee = self.employees.get(employee_id)?;

        let salary = self.repo.add_unique(self.build(&employee, period)?)?;
        tracing::info!(employee_id, month = %salary.month, net = %salary.net_salary, "💰 Holerite gerado");
        Ok(salary)
    }

    /// Gera para todos os ativos, pulando quem já tem holerite na competência.
    pub fn generate_for_active(&self, month: &str) -> Result<Vec<Salary>, AppError> {
        let period = PayPeriod::parse(month)?;
        let mut generated = Vec::new();

        for employee in self.employees.list().iter().filter(|e| e.is_active()) {
            match self.repo.add_unique(self.build(employee, period)?) {
                Ok(salary) => generated.push(salary),
                Err(AppError::SalaryAlreadyGenerated { .. }) => {
                    tracing::debug!(employee_id = %employee.id, month = %period.label(), "Holerite já existente, pulando");
                }
                Err(e) => return Err(e),
            }
        }

        tracing::info!(month = %period.label(), count = generated.len(), "💰 Folha gerada em lote");
        Ok(generated)
    }

    pub fn delete(&self, id: &str) -> Result<(), AppError> {
        self.repo.remove(id)?;
        Ok(())
    }
}
