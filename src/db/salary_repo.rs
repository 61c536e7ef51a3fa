// src/db/salary_repo.rs

use crate::{
    common::error::AppError,
    db::{collection::Collection, kv_store::JsonStore},
    models::payroll::Salary,
};

#[derive(Clone)]
pub struct SalaryRepository {
    salaries: Collection<Salary>,
}

impl SalaryRepository {
    pub fn new(store: JsonStore) -> Self {
        Self {
            salaries: Collection::new(store),
        }
    }

    pub fn list(&self) -> Vec<Salary> {
        self.salaries.list()
    }

    pub fn find_by_id(&self, id: &str) -> Option<Salary> {
        self.salaries.find(id)
    }

    pub fn list_by_month(&self, month: &str) -> Vec<Salary> {
        self.salaries.filter(|s| s.month == month)
    }

    pub fn list_by_employee(&self, employee_id: &str) -> Vec<Salary> {
        self.salaries.filter(|s| s.employee_id == employee_id)
    }

    /// Insere checando a unicidade (funcionário, competência) dentro do mesmo ciclo de escrita.
    pub fn add_unique(&self, salary: Salary) -> Result<Salary, AppError> {
        self.salaries.mutate(|records| {
            if records
                .iter()
                .any(|s| s.employee_id == salary.employee_id && s.month == salary.month)
            {
                return Err(AppError::SalaryAlreadyGenerated {
                    employee_id: salary.employee_id.clone(),
                    month: salary.month.clone(),
                });
            }
            records.push(salary.clone());
            Ok(salary)
        })
    }

    pub fn remove(&self, id: &str) -> Result<Salary, AppError> {
        self.salaries.remove(id)
    }
}
