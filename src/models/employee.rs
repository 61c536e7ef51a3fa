// src/models/employee.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::db::collection::{CollectionSlot, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub position: String,
    pub department: String,
    // Salário base mensal
    pub salary: Decimal,
    pub join_date: NaiveDate,
    #[serde(default)]
    pub status: EmployeeStatus,
}

impl Record for Employee {
    const SLOT: CollectionSlot = CollectionSlot::Key("employees");

    fn id(&self) -> &str {
        &self.id
    }
}

impl Employee {
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}

pub(crate) fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

/// Formulário de cadastro/edição de funcionário.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    pub phone: Option<String>,

    #[validate(length(min = 1, message = "O cargo é obrigatório."))]
    pub position: String,

    #[validate(length(min = 1, message = "O departamento é obrigatório."))]
    pub department: String,

    #[validate(custom(function = "validate_not_negative"))]
    pub salary: Decimal,

    pub join_date: NaiveDate,

    #[serde(default)]
    pub status: EmployeeStatus,
}

impl EmployeeDraft {
    pub fn into_employee(self, id: String) -> Employee {
        Employee {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.filter(|p| !p.trim().is_empty()),
            position: self.position,
            department: self.department,
            salary: self.salary,
            join_date: self.join_date,
            status: self.status,
        }
    }
}
