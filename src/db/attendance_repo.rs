// src/db/attendance_repo.rs

use chrono::NaiveDate;

use crate::{
    common::error::AppError,
    db::{collection::Collection, kv_store::JsonStore},
    models::attendance::Attendance,
};

#[derive(Clone)]
pub struct AttendanceRepository {
    attendance: Collection<Attendance>,
}

impl AttendanceRepository {
    pub fn new(store: JsonStore) -> Self {
        Self {
            attendance: Collection::new(store),
        }
    }

    pub fn list(&self) -> Vec<Attendance> {
        self.attendance.list()
    }

    pub fn find_by_id(&self, id: &str) -> Option<Attendance> {
        self.attendance.find(id)
    }

    /// Entrada sem saída do funcionário naquele dia (no máximo uma é esperada).
    pub fn find_open(&self, employee_id: &str, date: NaiveDate) -> Option<Attendance> {
        self.attendance
            .list()
            .into_iter()
            .find(|a| a.employee_id == employee_id && a.date == date && a.is_open())
    }

    pub fn list_by_employee(&self, employee_id: &str) -> Vec<Attendance> {
        self.attendance.filter(|a| a.employee_id == employee_id)
    }

    pub fn list_by_date(&self, date: NaiveDate) -> Vec<Attendance> {
        self.attendance.filter(|a| a.date == date)
    }

    pub fn add(&self, record: Attendance) -> Result<Attendance, AppError> {
        self.attendance.add(record)
    }

    /// Insere uma entrada recusando uma segunda entrada aberta no mesmo dia.
    pub fn add_open_entry(&self, record: Attendance) -> Result<Attendance, AppError> {
        self.attendance.mutate(|records| {
            let already_open = records.iter().any(|a| {
                a.employee_id == record.employee_id && a.date == record.date && a.is_open()
            });
            if already_open {
                return Err(AppError::AttendanceAlreadyOpen {
                    employee_id: record.employee_id.clone(),
                    date: record.date.to_string(),
                });
            }
            records.push(record.clone());
            Ok(record)
        })
    }

    pub fn update(&self, record: Attendance) -> Result<Attendance, AppError> {
        self.attendance.update(record)
    }

    pub fn remove(&self, id: &str) -> Result<Attendance, AppError> {
        self.attendance.remove(id)
    }
}
