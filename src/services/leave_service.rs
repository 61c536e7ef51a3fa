// src/services/leave_service.rs

use chrono::Utc;
use validator::Validate;

use crate::{
    common::{db_utils::new_record_id, error::AppError},
    db::LeaveRepository,
    models::leave::{
        Approval, ApprovalTrail, LeaveDraft, LeaveRequest, PermissionDraft, PermissionRequest,
        RequestStatus, ReviewPayload,
    },
    services::employee_service::EmployeeService,
};

#[derive(Clone)]
pub struct LeaveService {
    repo: LeaveRepository,
    employees: EmployeeService,
}

fn check_leave_dates(draft: &LeaveDraft) -> Result<(), AppError> {
    if draft.end_date < draft.start_date {
        return Err(AppError::field_error(
            "endDate",
            "range",
            "A data final não pode ser anterior à inicial.",
        ));
    }
    Ok(())
}

fn check_permission_window(draft: &PermissionDraft) -> Result<(), AppError> {
    if draft.end_time <= draft.start_time {
        return Err(AppError::InvalidTimeRange);
    }
    Ok(())
}

fn approval_from(review: ReviewPayload) -> (crate::models::leave::ApprovalTier, Approval) {
    (
        review.tier,
        Approval {
            approver: review.approver,
            decision: review.decision,
            comment: review.comment,
            decided_at: Utc::now(),
        },
    )
}

impl LeaveService {
    pub fn new(repo: LeaveRepository, employees: EmployeeService) -> Self {
        Self { repo, employees }
    }

    // =========================================================================
    //  FÉRIAS / LICENÇAS
    // =========================================================================

    pub fn list_leaves(&self, status: Option<RequestStatus>) -> Vec<LeaveRequest> {
        match status {
            Some(s) => self.repo.list_leaves_by_status(s),
            None => self.repo.list_leaves(),
        }
    }

    pub fn list_leaves_by_employee(&self, employee_id: &str) -> Vec<LeaveRequest> {
        self.repo.list_leaves_by_employee(employee_id)
    }

    pub fn get_leave(&self, id: &str) -> Result<LeaveRequest, AppError> {
        self.repo.find_leave(id).ok_or_else(|| AppError::RecordNotFound {
            collection: "leaves",
            id: id.to_string(),
        })
    }

    pub fn request_leave(&self, draft: LeaveDraft) -> Result<LeaveRequest, AppError> {
        draft.validate()?;
        check_leave_dates(&draft)?;
        self.employees.ensure_exists(&draft.employee_id)?;

        let leave = LeaveRequest {
            id: new_record_id(),
            employee_id: draft.employee_id,
            leave_type: draft.leave_type,
            start_date: draft.start_date,
            end_date: draft.end_date,
            reason: draft.reason,
            status: RequestStatus::Pending,
            approvals: ApprovalTrail::default(),
            created_at: Utc::now(),
        };
        let leave = self.repo.add_leave(leave)?;
        tracing::info!(id = %leave.id, employee_id = %leave.employee_id, days = leave.days(), "📅 Solicitação de férias/licença criada");
        Ok(leave)
    }

    /// Edita os dados da solicitação mantendo status e aprovações.
    pub fn update_leave(&self, id: &str, draft: LeaveDraft) -> Result<LeaveRequest, AppError> {
        draft.validate()?;
        check_leave_dates(&draft)?;
        self.employees.ensure_exists(&draft.employee_id)?;

        let mut leave = self.get_leave(id)?;
        leave.employee_id = draft.employee_id;
        leave.leave_type = draft.leave_type;
        leave.start_date = draft.start_date;
        leave.end_date = draft.end_date;
        leave.reason = draft.reason;
        self.repo.update_leave(leave)
    }

    /// Troca direta de status, sem tabela de transições.
    pub fn set_leave_status(&self, id: &str, status: RequestStatus) -> Result<LeaveRequest, AppError> {
        let mut leave = self.get_leave(id)?;
        leave.status = status;
        self.repo.update_leave(leave)
    }

    /// Registra a decisão de um nível (gestor ou RH) e recalcula o status.
    pub fn review_leave(&self, id: &str, review: ReviewPayload) -> Result<LeaveRequest, AppError> {
        review.validate()?;
        let mut leave = self.get_leave(id)?;
        let (tier, approval) = approval_from(review);
        leave.approvals.record(tier, approval);
        leave.status = leave.approvals.resolved_status();

        let leave = self.repo.update_leave(leave)?;
        tracing::info!(id, ?tier, status = ?leave.status, "✅ Férias/licença revisada");
        Ok(leave)
    }

    pub fn delete_leave(&self, id: &str) -> Result<(), AppError> {
        self.repo.remove_leave(id)?;
        Ok(())
    }

    // =========================================================================
    //  PERMISSÕES
    // =========================================================================

    pub fn list_permissions(&self, status: Option<RequestStatus>) -> Vec<PermissionRequest> {
        match status {
            Some(s) => self.repo.list_permissions_by_status(s),
            None => self.repo.list_permissions(),
        }
    }

    pub fn get_permission(&self, id: &str) -> Result<PermissionRequest, AppError> {
        self.repo
            .find_permission(id)
            .ok_or_else(|| AppError::RecordNotFound {
                collection: "permissions",
                id: id.to_string(),
            })
    }

    pub fn request_permission(&self, draft: PermissionDraft) -> Result<PermissionRequest, AppError> {
        draft.validate()?;
        check_permission_window(&draft)?;
        self.employees.ensure_exists(&draft.employee_id)?;

        let permission = PermissionRequest {
            id: new_record_id(),
            employee_id: draft.employee_id,
            date: draft.date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            permission_type: draft.permission_type,
            reason: draft.reason,
            status: RequestStatus::Pending,
            approvals: ApprovalTrail::default(),
            created_at: Utc::now(),
        };
        self.repo.add_permission(permission)
    }

    pub fn update_permission(
        &self,
        id: &str,
        draft: PermissionDraft,
    ) -> Result<PermissionRequest, AppError> {
        draft.validate()?;
        check_permission_window(&draft)?;
        self.employees.ensure_exists(&draft.employee_id)?;

        let mut permission = self.get_permission(id)?;
        permission.employee_id = draft.employee_id;
        permission.date = draft.date;
        permission.start_time = draft.start_time;
        permission.end_time = draft.end_time;
        permission.permission_type = draft.permission_type;
        permission.reason = draft.reason;
        self.repo.update_permission(permission)
    }

    pub fn set_permission_status(
        &self,
        id: &str,
        status: RequestStatus,
    ) -> Result<PermissionRequest, AppError> {
        let mut permission = self.get_permission(id)?;
        permission.status = status;
        self.repo.update_permission(permission)
    }

    pub fn review_permission(
        &self,
        id: &str,
        review: ReviewPayload,
    ) -> Result<PermissionRequest, AppError> {
        review.validate()?;
        let mut permission = self.get_permission(id)?;
        let (tier, approval) = approval_from(review);
        permission.approvals.record(tier, approval);
        permission.status = permission.approvals.resolved_status();
        self.repo.update_permission(permission)
    }

    pub fn delete_permission(&self, id: &str) -> Result<(), AppError> {
        self.repo.remove_permission(id)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{EmployeeRepository, JsonStore, MemoryStore};
    use crate::models::leave::{ApprovalDecision, ApprovalTier, LeaveType, PermissionType};
    use crate::services::employee_service::tests::draft as employee_draft;
    use chrono::{NaiveDate, NaiveTime};
    use std::sync::Arc;

    fn setup() -> (LeaveService, String) {
        let store = JsonStore::new(Arc::new(MemoryStore::new()));
        let employees = EmployeeService::new(EmployeeRepository::new(store.clone()));
        let alice = employees.create(employee_draft("Alice", "Engineering", 5000)).unwrap();
        (LeaveService::new(LeaveRepository::new(store), employees), alice.id)
    }

    fn leave_draft(employee_id: &str, start: u32, end: u32) -> LeaveDraft {
        LeaveDraft {
            employee_id: employee_id.to_string(),
            leave_type: LeaveType::Annual,
            start_date: NaiveDate::from_ymd_opt(2024, 1, start).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, end).unwrap(),
            reason: "viagem".into(),
        }
    }

    fn review(tier: ApprovalTier, decision: ApprovalDecision) -> ReviewPayload {
        ReviewPayload {
            tier,
            decision,
            approver: "Carol".into(),
            comment: None,
        }
    }

    #[test]
    fn new_requests_start_pending() {
        let (service, alice) = setup();
        let leave = service.request_leave(leave_draft(&alice, 10, 12)).unwrap();
        assert_eq!(leave.status, RequestStatus::Pending);
        assert_eq!(service.list_leaves(Some(RequestStatus::Pending)).len(), 1);
        assert!(service.list_leaves(Some(RequestStatus::Approved)).is_empty());
    }

    #[test]
    fn end_before_start_is_a_validation_error() {
        let (service, alice) = setup();
        assert!(matches!(
            service.request_leave(leave_draft(&alice, 12, 10)),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn two_tier_review_flow() {
        let (service, alice) = setup();
        let leave = service.request_leave(leave_draft(&alice, 10, 12)).unwrap();

        let after_manager = service
            .review_leave(&leave.id, review(ApprovalTier::Manager, ApprovalDecision::Approved))
            .unwrap();
        assert_eq!(after_manager.status, RequestStatus::Pending);
        assert!(after_manager.approvals.manager_approval.is_some());

        let after_hr = service
            .review_leave(&leave.id, review(ApprovalTier::Hr, ApprovalDecision::Approved))
            .unwrap();
        assert_eq!(after_hr.status, RequestStatus::Approved);
        assert_eq!(service.get_leave(&leave.id).unwrap(), after_hr);
    }

    #[test]
    fn status_can_be_set_to_anything() {
        let (service, alice) = setup();
        let leave = service.request_leave(leave_draft(&alice, 10, 12)).unwrap();
        service.set_leave_status(&leave.id, RequestStatus::Rejected).unwrap();
        let back = service.set_leave_status(&leave.id, RequestStatus::Pending).unwrap();
        assert_eq!(back.status, RequestStatus::Pending);
    }

    #[test]
    fn permission_window_must_be_positive() {
        let (service, alice) = setup();
        let t = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
        let mut draft = PermissionDraft {
            employee_id: alice.clone(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            start_time: t(14),
            end_time: t(12),
            permission_type: PermissionType::Medical,
            reason: "dentista".into(),
        };
        assert!(matches!(
            service.request_permission(draft.clone()),
            Err(AppError::InvalidTimeRange)
        ));

        draft.end_time = t(16);
        let permission = service.request_permission(draft).unwrap();
        let rejected = service
            .review_permission(&permission.id, review(ApprovalTier::Manager, ApprovalDecision::Rejected))
            .unwrap();
        assert_eq!(rejected.status, RequestStatus::Rejected);

        service.delete_permission(&permission.id).unwrap();
        assert!(service.list_permissions(None).is_empty());
    }

    #[test]
    fn unknown_employee_is_rejected() {
        let (service, _) = setup();
        assert!(matches!(
            service.request_leave(leave_draft("ghost", 10, 12)),
            Err(AppError::EmployeeNotFound(_))
        ));
    }

    #[test]
    fn updates_cannot_move_a_request_to_an_unknown_employee() {
        let (service, alice) = setup();
        let leave = service.request_leave(leave_draft(&alice, 10, 12)).unwrap();
        assert!(matches!(
            service.update_leave(&leave.id, leave_draft("ghost", 10, 12)),
            Err(AppError::EmployeeNotFound(_))
        ));
        assert_eq!(service.get_leave(&leave.id).unwrap(), leave);

        let t = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
        let mut draft = PermissionDraft {
            employee_id: alice.clone(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            start_time: t(9),
            end_time: t(11),
            permission_type: PermissionType::Personal,
            reason: "banco".into(),
        };
        let permission = service.request_permission(draft.clone()).unwrap();
        draft.employee_id = "ghost".into();
        assert!(matches!(
            service.update_permission(&permission.id, draft),
            Err(AppError::EmployeeNotFound(_))
        ));
        assert_eq!(service.get_permission(&permission.id).unwrap(), permission);
    }
}
