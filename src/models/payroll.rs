// src/models/payroll.rs

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    common::error::AppError,
    db::collection::{CollectionSlot, Record},
};

/// Holerite de um funcionário em uma competência. Calculado uma vez e nunca recalculado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Salary {
    pub id: String,
    pub employee_id: String,
    // "YYYY-MM"
    pub month: String,
    pub basic_salary: Decimal,
    pub allowances: Decimal,
    pub deductions: Decimal,
    pub net_salary: Decimal,
    pub generated_at: DateTime<Utc>,
}

impl Record for Salary {
    const SLOT: CollectionSlot = CollectionSlot::Key("salaries");

    fn id(&self) -> &str {
        &self.id
    }
}

/// Competência "YYYY-MM" normalizada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PayPeriod {
    first_day: NaiveDate,
}

impl PayPeriod {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let trimmed = raw.trim();
        let first_day = NaiveDate::parse_from_str(&format!("{}-01", trimmed), "%Y-%m-%d")
            .map_err(|_| AppError::InvalidPayPeriod(raw.to_string()))?;
        Ok(Self { first_day })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn label(&self) -> String {
        self.first_day.format("%Y-%m").to_string()
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSalaryPayload {
    #[validate(length(min = 1, message = "O funcionário é obrigatório."))]
    pub employee_id: String,
    #[validate(length(equal = 7, message = "A competência deve estar no formato YYYY-MM."))]
    pub month: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBatchPayload {
    #[validate(length(equal = 7, message = "A competência deve estar no formato YYYY-MM."))]
    pub month: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_year_month() {
        let period = PayPeriod::parse("2024-02").unwrap();
        assert_eq!(period.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(period.label(), "2024-02");
        assert_eq!(
            PayPeriod::containing(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()),
            period
        );
    }

    #[test]
    fn rejects_malformed_months() {
        for raw in ["2024-13", "2024", "feb-2024", ""] {
            assert!(matches!(PayPeriod::parse(raw), Err(AppError::InvalidPayPeriod(_))));
        }
    }
}
