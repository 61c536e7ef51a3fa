// src/db/employee_repo.rs

use crate::{
    common::error::AppError,
    db::{collection::Collection, kv_store::JsonStore},
    models::employee::{Employee, EmployeeStatus},
};

// O repositório de funcionários, responsável pela chave 'employees'
#[derive(Clone)]
pub struct EmployeeRepository {
    employees: Collection<Employee>,
}

impl EmployeeRepository {
    pub fn new(store: JsonStore) -> Self {
        Self {
            employees: Collection::new(store),
        }
    }

    pub fn list(&self) -> Vec<Employee> {
        self.employees.list()
    }

    pub fn find_by_id(&self, id: &str) -> Option<Employee> {
        self.employees.find(id)
    }

    pub fn exists(&self, id: &str) -> bool {
        self.find_by_id(id).is_some()
    }

    pub fn list_by_status(&self, status: EmployeeStatus) -> Vec<Employee> {
        self.employees.filter(|e| e.status == status)
    }

    pub fn list_by_department(&self, department: &str) -> Vec<Employee> {
        self.employees
            .filter(|e| e.department.eq_ignore_ascii_case(department))
    }

    pub fn add(&self, employee: Employee) -> Result<Employee, AppError> {
        self.employees.add(employee)
    }

    pub fn update(&self, employee: Employee) -> Result<Employee, AppError> {
        self.employees.update(employee)
    }

    pub fn remove(&self, id: &str) -> Result<Employee, AppError> {
        self.employees.remove(id)
    }
}
