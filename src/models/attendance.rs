// src/models/attendance.rs

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    common::db_utils::{hhmm, round2},
    db::collection::{CollectionSlot, Record},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum AttendanceStatus {
    #[default]
    Present,
    Late,
    Absent,
    HalfDay,
}

/// Um dia de ponto de um funcionário.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: String,
    pub employee_id: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub check_in: NaiveTime,
    #[serde(default, with = "hhmm::option")]
    pub check_out: Option<NaiveTime>,
    #[serde(default)]
    pub hours_worked: Option<Decimal>,
    #[serde(default)]
    pub status: AttendanceStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Record for Attendance {
    const SLOT: CollectionSlot = CollectionSlot::Key("attendance");

    fn id(&self) -> &str {
        &self.id
    }
}

impl Attendance {
    pub fn is_open(&self) -> bool {
        self.check_out.is_none()
    }
}

/// Horas entre entrada e saída, com 2 casas. `None` se a saída for anterior à entrada.
pub fn hours_between(check_in: NaiveTime, check_out: NaiveTime) -> Option<Decimal> {
    let minutes = (check_out - check_in).num_minutes();
    if minutes < 0 {
        return None;
    }
    Some(round2(Decimal::from(minutes) / Decimal::from(60)))
}

/// Lançamento manual de ponto (formulário).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceDraft {
    #[validate(length(min = 1, message = "O funcionário é obrigatório."))]
    pub employee_id: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub check_in: NaiveTime,
    #[serde(default, with = "hhmm::option")]
    pub check_out: Option<NaiveTime>,
    #[serde(default)]
    pub status: AttendanceStatus,
    pub notes: Option<String>,
}

/// Entrada/saída pelo relógio de ponto. Data e hora ausentes = agora.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClockPayload {
    #[validate(length(min = 1, message = "O funcionário é obrigatório."))]
    pub employee_id: String,
    pub date: Option<NaiveDate>,
    #[serde(default, with = "hhmm::option")]
    pub time: Option<NaiveTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_are_rounded_to_two_places() {
        let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        assert_eq!(hours_between(t(8, 0), t(17, 0)), Some(Decimal::from(9)));
        assert_eq!(hours_between(t(9, 0), t(9, 20)), Some(Decimal::new(33, 2)));
        assert_eq!(hours_between(t(17, 0), t(8, 0)), None);
    }

    #[test]
    fn reads_legacy_rows_without_optional_fields() {
        let row: Attendance = serde_json::from_str(
            r#"{"id":"1","employeeId":"e1","date":"2024-03-01","checkIn":"09:05"}"#,
        )
        .unwrap();
        assert!(row.is_open());
        assert_eq!(row.status, AttendanceStatus::Present);
        assert_eq!(row.hours_worked, None);
    }
}
