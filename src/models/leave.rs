// src/models/leave.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    common::db_utils::hhmm,
    db::collection::{CollectionSlot, Record},
};

// --- ENUMS ---

/// Status de uma solicitação. Tag simples: a interface pode trocar livremente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveType {
    Annual,
    Sick,
    Casual,
    Maternity,
    Paternity,
    Unpaid,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionType {
    LateArrival,
    EarlyDeparture,
    Personal,
    Medical,
    Other,
}

/// Nível da aprovação em dois estágios: gestor, depois RH.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalTier {
    Manager,
    Hr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalDecision {
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Approval {
    pub approver: String,
    pub decision: ApprovalDecision,
    #[serde(default)]
    pub comment: Option<String>,
    pub decided_at: DateTime<Utc>,
}

/// Metadados de aprovação compartilhados por férias/licenças e permissões.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalTrail {
    #[serde(default)]
    pub manager_approval: Option<Approval>,
    #[serde(default)]
    pub hr_approval: Option<Approval>,
}

impl ApprovalTrail {
    pub fn record(&mut self, tier: ApprovalTier, approval: Approval) {
        match tier {
            ApprovalTier::Manager => self.manager_approval = Some(approval),
            ApprovalTier::Hr => self.hr_approval = Some(approval),
        }
    }

    /// Status resultante: qualquer rejeição rejeita; só a aprovação do RH aprova.
    pub fn resolved_status(&self) -> RequestStatus {
        if [self.manager_approval.as_ref(), self.hr_approval.as_ref()]
            .into_iter()
            .flatten()
            .any(|a| a.decision == ApprovalDecision::Rejected)
        {
            return RequestStatus::Rejected;
        }
        match &self.hr_approval {
            Some(a) if a.decision == ApprovalDecision::Approved => RequestStatus::Approved,
            _ => RequestStatus::Pending,
        }
    }

    /// Quem decidiu por último (RH tem precedência sobre o gestor).
    pub fn approver(&self) -> Option<&str> {
        self.hr_approval
            .as_ref()
            .or(self.manager_approval.as_ref())
            .map(|a| a.approver.as_str())
    }
}

// --- FÉRIAS / LICENÇAS ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: String,
    pub employee_id: String,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub status: RequestStatus,
    #[serde(flatten)]
    pub approvals: ApprovalTrail,
    pub created_at: DateTime<Utc>,
}

impl Record for LeaveRequest {
    const SLOT: CollectionSlot = CollectionSlot::Key("leaves");

    fn id(&self) -> &str {
        &self.id
    }
}

impl LeaveRequest {
    /// Dias corridos, inclusivo nas duas pontas.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LeaveDraft {
    #[validate(length(min = 1, message = "O funcionário é obrigatório."))]
    pub employee_id: String,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(length(min = 1, message = "O motivo é obrigatório."))]
    pub reason: String,
}

// --- PERMISSÕES (saídas curtas dentro do dia) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionRequest {
    pub id: String,
    pub employee_id: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub permission_type: PermissionType,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub status: RequestStatus,
    #[serde(flatten)]
    pub approvals: ApprovalTrail,
    pub created_at: DateTime<Utc>,
}

impl Record for PermissionRequest {
    const SLOT: CollectionSlot = CollectionSlot::Key("permissions");

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PermissionDraft {
    #[validate(length(min = 1, message = "O funcionário é obrigatório."))]
    pub employee_id: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub permission_type: PermissionType,
    #[validate(length(min = 1, message = "O motivo é obrigatório."))]
    pub reason: String,
}

/// Decisão de um aprovador (gestor ou RH).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPayload {
    pub tier: ApprovalTier,
    pub decision: ApprovalDecision,
    #[validate(length(min = 1, message = "O aprovador é obrigatório."))]
    pub approver: String,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusPayload {
    pub status: RequestStatus,
}
