// src/models/report.rs

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    common::{db_utils::hhmm, error::AppError},
    models::{
        attendance::AttendanceStatus,
        leave::{LeaveType, PermissionType, RequestStatus},
    },
};

/// Intervalo fechado de datas `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AppError> {
        if start > end {
            return Err(AppError::InvalidDateRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Interseção com outro intervalo fechado, se houver.
    pub fn overlap(&self, start: NaiveDate, end: NaiveDate) -> Option<DateRange> {
        let from = self.start.max(start);
        let to = self.end.min(end);
        (from <= to).then_some(DateRange { start: from, end: to })
    }

    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

/// Parte específica de cada origem.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RecordDetail {
    Attendance {
        #[serde(with = "hhmm")]
        check_in: NaiveTime,
        #[serde(with = "hhmm::option")]
        check_out: Option<NaiveTime>,
        hours_worked: Option<Decimal>,
        status: AttendanceStatus,
    },
    Leave {
        leave_type: LeaveType,
        status: RequestStatus,
        approver: Option<String>,
    },
    Permission {
        #[serde(with = "hhmm")]
        start_time: NaiveTime,
        #[serde(with = "hhmm")]
        end_time: NaiveTime,
        permission_type: PermissionType,
        status: RequestStatus,
    },
}

/// Linha unificada de ponto/férias/permissão para relatórios.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedRecord {
    pub date: NaiveDate,
    pub employee_id: String,
    // ID do registro de origem
    pub source_id: String,
    #[serde(flatten)]
    pub detail: RecordDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub employee_name: String,
    #[serde(flatten)]
    pub record: DerivedRecord,
}

/// Totais por funcionário no intervalo.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    pub employee_id: String,
    pub employee_name: String,
    pub present_days: u32,
    pub late_days: u32,
    pub absent_days: u32,
    pub total_hours: Decimal,
    pub approved_leave_days: u32,
    pub permissions: u32,
}

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn rejects_inverted_ranges() {
        assert!(matches!(
            DateRange::new(d(5), d(4)),
            Err(AppError::InvalidDateRange { .. })
        ));
        assert!(DateRange::new(d(5), d(5)).is_ok());
    }

    #[test]
    fn overlap_is_clamped_and_inclusive() {
        let range = DateRange::new(d(1), d(10)).unwrap();
        let o = range.overlap(d(8), d(20)).unwrap();
        assert_eq!((o.start(), o.end()), (d(8), d(10)));
        assert_eq!(o.days().count(), 3);
        assert!(range.overlap(d(11), d(12)).is_none());
        assert!(range.contains(d(10)));
        assert!(!range.contains(d(11)));
    }

    #[test]
    fn detail_is_tagged_by_kind() {
        let record = DerivedRecord {
            date: d(3),
            employee_id: "e1".into(),
            source_id: "l1".into(),
            detail: RecordDetail::Leave {
                leave_type: LeaveType::Annual,
                status: RequestStatus::Approved,
                approver: Some("Carol".into()),
            },
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "leave");
        assert_eq!(json["leaveType"], "annual");
        assert_eq!(json["employeeId"], "e1");
        assert_eq!(json["date"], "2024-01-03");
    }
}
