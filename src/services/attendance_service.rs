// src/services/attendance_service.rs

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use validator::Validate;

use crate::{
    common::{
        db_utils::{hhmm, new_record_id},
        error::AppError,
    },
    db::AttendanceRepository,
    models::attendance::{hours_between, Attendance, AttendanceDraft, AttendanceStatus},
    services::{employee_service::EmployeeService, settings_service::SettingsProvider},
};

#[derive(Clone)]
pub struct AttendanceService {
    repo: AttendanceRepository,
    employees: EmployeeService,
    settings: Arc<SettingsProvider>,
}

impl AttendanceService {
    pub fn new(
        repo: AttendanceRepository,
        employees: EmployeeService,
        settings: Arc<SettingsProvider>,
    ) -> Self {
        Self {
            repo,
            employees,
            settings,
        }
    }

    pub fn list(&self) -> Vec<Attendance> {
        self.repo.list()
    }

    pub fn list_by_employee(&self, employee_id: &str) -> Vec<Attendance> {
        self.repo.list_by_employee(employee_id)
    }

    pub fn list_by_date(&self, date: NaiveDate) -> Vec<Attendance> {
        self.repo.list_by_date(date)
    }

    /// Abre o ponto do dia. Status `late` se passar do horário + tolerância.
    pub fn check_in(
        &self,
        employee_id: &str,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<Attendance, AppError> {
        self.employees.ensure_exists(employee_id)?;
        let time = hhmm::truncate(time);

        let status = if self.settings.get().working_hours.is_late(time) {
            AttendanceStatus::Late
        } else {
            AttendanceStatus::Present
        };

        let record = Attendance {
            id: new_record_id(),
            employee_id: employee_id.to_string(),
            date,
            check_in: time,
            check_out: None,
            hours_worked: None,
            status,
            notes: None,
        };

        let record = self.repo.add_open_entry(record)?;
        tracing::info!(employee_id, %date, check_in = %time, ?status, "🕘 Entrada registrada");
        Ok(record)
    }

    /// Fecha o ponto aberto do dia e calcula as horas. O status não muda.
    pub fn check_out(
        &self,
        employee_id: &str,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<Attendance, AppError> {
        let time = hhmm::truncate(time);
        let mut record =
            self.repo
                .find_open(employee_id, date)
                .ok_or_else(|| AppError::NoOpenAttendance {
                    employee_id: employee_id.to_string(),
                    date: date.to_string(),
                })?;

        let hours = hours_between(record.check_in, time).ok_or(AppError::InvalidTimeRange)?;
        record.check_out = Some(time);
        record.hours_worked = Some(hours);

        let record = self.repo.update(record)?;
        tracing::info!(employee_id, %date, check_out = %time, %hours, "🕔 Saída registrada");
        Ok(record)
    }

    fn build(&self, id: String, draft: AttendanceDraft) -> Result<Attendance, AppError> {
        draft.validate()?;
        self.employees.ensure_exists(&draft.employee_id)?;

        let check_in = hhmm::truncate(draft.check_in);
        let check_out = draft.check_out.map(hhmm::truncate);
        let hours_worked = match check_out {
            Some(out) => Some(hours_between(check_in, out).ok_or(AppError::InvalidTimeRange)?),
            None => None,
        };

        Ok(Attendance {
            id,
            employee_id: draft.employee_id,
            date: draft.date,
            check_in,
            check_out,
            hours_worked,
            status: draft.status,
            notes: draft.notes,
        })
    }

    /// Lançamento manual (correções do RH). Não checa ponto aberto duplicado.
    pub fn create(&self, draft: AttendanceDraft) -> Result<Attendance, AppError> {
        let record = self.build(new_record_id(), draft)?;
        self.repo.add(record)
    }

    pub fn update(&self, id: &str, draft: AttendanceDraft) -> Result<Attendance, AppError> {
        let record = self.build(id.to_string(), draft)?;
        self.repo.update(record)
    }

    pub fn delete(&self, id: &str) -> Result<(), AppError> {
        self.repo.remove(id)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{EmployeeRepository, JsonStore, MemoryStore, SettingsRepository};
    use crate::models::employee::{Employee, EmployeeStatus};
    use rust_decimal::Decimal;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    fn setup() -> AttendanceService {
        let store = JsonStore::new(Arc::new(MemoryStore::new()));
        let employee_repo = EmployeeRepository::new(store.clone());
        employee_repo
            .add(Employee {
                id: "e1".into(),
                name: "Alice".into(),
                email: "alice@example.com".into(),
                phone: None,
                position: "Engineer".into(),
                department: "Engineering".into(),
                salary: Decimal::from(5000),
                join_date: NaiveDate::from_ymd_opt(2022, 1, 10).unwrap(),
                status: EmployeeStatus::Active,
            })
            .unwrap();
        let settings = Arc::new(SettingsProvider::new(SettingsRepository::new(store.clone())));
        AttendanceService::new(
            AttendanceRepository::new(store),
            EmployeeService::new(employee_repo),
            settings,
        )
    }

    #[test]
    fn check_in_then_out_records_nine_hours() {
        let service = setup();
        let opened = service.check_in("e1", day(), t(8, 0)).unwrap();
        assert_eq!(opened.status, AttendanceStatus::Present);

        let closed = service.check_out("e1", day(), t(17, 0)).unwrap();

        let rows = service.list();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], closed);
        assert_eq!(closed.id, opened.id);
        assert_eq!(closed.hours_worked, Some(Decimal::from(9)));
        assert_eq!(closed.check_out, Some(t(17, 0)));
        assert_eq!(closed.status, opened.status);
    }

    #[test]
    fn late_check_in_is_flagged() {
        let service = setup();
        let row = service.check_in("e1", day(), t(9, 40)).unwrap();
        assert_eq!(row.status, AttendanceStatus::Late);
    }

    #[test]
    fn second_open_entry_is_rejected() {
        let service = setup();
        service.check_in("e1", day(), t(8, 0)).unwrap();
        assert!(matches!(
            service.check_in("e1", day(), t(8, 5)),
            Err(AppError::AttendanceAlreadyOpen { .. })
        ));

        // Depois de fechar, um novo turno no mesmo dia é aceito
        service.check_out("e1", day(), t(12, 0)).unwrap();
        service.check_in("e1", day(), t(13, 0)).unwrap();
        assert_eq!(service.list_by_date(day()).len(), 2);
    }

    #[test]
    fn check_out_errors() {
        let service = setup();
        assert!(matches!(
            service.check_out("e1", day(), t(17, 0)),
            Err(AppError::NoOpenAttendance { .. })
        ));

        service.check_in("e1", day(), t(10, 0)).unwrap();
        assert!(matches!(
            service.check_out("e1", day(), t(9, 0)),
            Err(AppError::InvalidTimeRange)
        ));
        // O ponto continua aberto
        assert!(service.list()[0].is_open());
    }

    #[test]
    fn unknown_employee_cannot_check_in() {
        let service = setup();
        assert!(matches!(
            service.check_in("ghost", day(), t(8, 0)),
            Err(AppError::EmployeeNotFound(_))
        ));
        assert!(service.list().is_empty());
    }

    #[test]
    fn manual_entry_computes_hours() {
        let service = setup();
        let row = service
            .create(AttendanceDraft {
                employee_id: "e1".into(),
                date: day(),
                check_in: t(9, 0),
                check_out: Some(t(13, 30)),
                status: AttendanceStatus::HalfDay,
                notes: Some("consulta médica".into()),
            })
            .unwrap();
        assert_eq!(row.hours_worked, Some(Decimal::new(45, 1)));
        assert_eq!(service.list_by_employee("e1"), vec![row.clone()]);

        service.delete(&row.id).unwrap();
        assert!(service.list().is_empty());
    }

    #[test]
    fn seconds_are_dropped_before_saving() {
        let service = setup();
        let draft: AttendanceDraft = serde_json::from_value(serde_json::json!({
            "employeeId": "e1",
            "date": "2024-03-04",
            "checkIn": "08:00:30",
            "checkOut": "17:00:00",
            "status": "present"
        }))
        .unwrap();
        let created = service.create(draft).unwrap();
        assert_eq!(created.check_in, t(8, 0));
        assert_eq!(created.hours_worked, Some(Decimal::from(9)));
        assert_eq!(service.list(), vec![created.clone()]);

        let in_code = AttendanceDraft {
            employee_id: "e1".into(),
            date: day(),
            check_in: NaiveTime::from_hms_opt(9, 0, 45).unwrap(),
            check_out: Some(NaiveTime::from_hms_opt(10, 0, 10).unwrap()),
            status: AttendanceStatus::Present,
            notes: None,
        };
        let updated = service.update(&created.id, in_code).unwrap();
        assert_eq!(updated.check_in, t(9, 0));
        assert_eq!(updated.hours_worked, Some(Decimal::from(1)));
        assert_eq!(service.list(), vec![updated]);

        let opened = service
            .check_in("e1", NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(), NaiveTime::from_hms_opt(8, 0, 59).unwrap())
            .unwrap();
        assert_eq!(opened.check_in, t(8, 0));
        assert!(service.list().contains(&opened));
    }
}
