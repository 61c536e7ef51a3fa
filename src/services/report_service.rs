// src/services/report_service.rs

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::{
    common::error::AppError,
    db::{AttendanceRepository, LeaveRepository},
    models::{
        attendance::{Attendance, AttendanceStatus},
        leave::{LeaveRequest, PermissionRequest, RequestStatus},
        report::{DateRange, DerivedRecord, EmployeeSummary, RecordDetail, ReportRow},
    },
    services::employee_service::{EmployeeService, UNKNOWN_EMPLOYEE},
};

/// Junta ponto, férias/licenças e permissões num único relatório ordenado.
///
/// Função pura: não faz I/O. Ponto e permissões entram se a data cair no
/// intervalo; cada férias/licença vira um registro por dia de interseção.
/// Ordem: data crescente, depois `employee_id` lexicográfico. Empates mantêm a
/// ordem de entrada (ponto, férias, permissões), então o resultado é
/// determinístico para as mesmas entradas.
pub fn aggregate_records(
    attendance: &[Attendance],
    leaves: &[LeaveRequest],
    permissions: &[PermissionRequest],
    range: DateRange,
) -> Vec<DerivedRecord> {
    let mut records = Vec::new();

    for a in attendance.iter().filter(|a| range.contains(a.date)) {
        records.push(DerivedRecord {
            date: a.date,
            employee_id: a.employee_id.clone(),
            source_id: a.id.clone(),
            detail: RecordDetail::Attendance {
                check_in: a.check_in,
                check_out: a.check_out,
                hours_worked: a.hours_worked,
                status: a.status,
            },
        });
    }

    for leave in leaves {
        // Registros invertidos (fim antes do início) não geram dias
        let Some(window) = range.overlap(leave.start_date, leave.end_date) else {
            continue;
        };
        let approver = leave.approvals.approver().map(str::to_string);
        for date in window.days() {
            records.push(DerivedRecord {
                date,
                employee_id: leave.employee_id.clone(),
                source_id: leave.id.clone(),
                detail: RecordDetail::Leave {
                    leave_type: leave.leave_type,
                    status: leave.status,
                    approver: approver.clone(),
                },
            });
        }
    }

    for p in permissions.iter().filter(|p| range.contains(p.date)) {
        records.push(DerivedRecord {
            date: p.date,
            employee_id: p.employee_id.clone(),
            source_id: p.id.clone(),
            detail: RecordDetail::Permission {
                start_time: p.start_time,
                end_time: p.end_time,
                permission_type: p.permission_type,
                status: p.status,
            },
        });
    }

    // sort_by é estável
    records.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.employee_id.cmp(&b.employee_id))
    });
    records
}

/// Totais por funcionário a partir dos registros derivados.
pub fn summarize<F>(records: &[DerivedRecord], name_of: F) -> Vec<EmployeeSummary>
where
    F: Fn(&str) -> String,
{
    let mut by_employee: BTreeMap<&str, EmployeeSummary> = BTreeMap::new();

    for record in records {
        let summary = by_employee
            .entry(record.employee_id.as_str())
            .or_insert_with(|| EmployeeSummary {
                employee_id: record.employee_id.clone(),
                employee_name: name_of(&record.employee_id),
                ..Default::default()
            });

        match &record.detail {
            RecordDetail::Attendance {
                hours_worked,
                status,
                ..
            } => {
                match status {
                    AttendanceStatus::Present | AttendanceStatus::HalfDay => {
                        summary.present_days += 1
                    }
                    AttendanceStatus::Late => summary.late_days += 1,
                    AttendanceStatus::Absent => summary.absent_days += 1,
                }
                if let Some(hours) = hours_worked {
                    summary.total_hours += *hours;
                }
            }
            RecordDetail::Leave { status, .. } => {
                if *status == RequestStatus::Approved {
                    summary.approved_leave_days += 1;
                }
            }
            RecordDetail::Permission { .. } => summary.permissions += 1,
        }
    }

    by_employee.into_values().collect()
}

#[derive(Clone)]
pub struct ReportService {
    attendance: AttendanceRepository,
    leaves: LeaveRepository,
    employees: EmployeeService,
}

impl ReportService {
    pub fn new(
        attendance: AttendanceRepository,
        leaves: LeaveRepository,
        employees: EmployeeService,
    ) -> Self {
        Self {
            attendance,
            leaves,
            employees,
        }
    }

    pub fn records_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<ReportRow>, AppError> {
        let range = DateRange::new(start, end)?;
        let records = aggregate_records(
            &self.attendance.list(),
            &self.leaves.list_leaves(),
            &self.leaves.list_permissions(),
            range,
        );

        let names = self.name_lookup();
        Ok(records
            .into_iter()
            .map(|record| ReportRow {
                employee_name: names(&record.employee_id),
                record,
            })
            .collect())
    }

    pub fn summary_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<EmployeeSummary>, AppError> {
        let range = DateRange::new(start, end)?;
        let records = aggregate_records(
            &self.attendance.list(),
            &self.leaves.list_leaves(),
            &self.leaves.list_permissions(),
            range,
        );
        Ok(summarize(&records, self.name_lookup()))
    }

    // Uma leitura da coleção de funcionários por relatório
    fn name_lookup(&self) -> impl Fn(&str) -> String + use<> {
        let names: BTreeMap<String, String> = self
            .employees
            .list()
            .into_iter()
            .map(|e| (e.id, e.name))
            .collect();
        move |id: &str| {
            names
                .get(id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_EMPLOYEE.to_string())
        }
    }
}
