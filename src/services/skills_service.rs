// src/services/skills_service.rs

use chrono::{Days, NaiveDate};
use validator::Validate;

use crate::{
    common::{db_utils::new_record_id, error::AppError},
    db::SkillsRepository,
    models::skills::{
        Certification, CertificationDraft, Skill, SkillDraft, SkillGap, SkillGapDraft, Training,
        TrainingDraft, TrainingStatus,
    },
    services::employee_service::EmployeeService,
};

#[derive(Clone)]
pub struct SkillsService {
    repo: SkillsRepository,
    employees: EmployeeService,
}

impl SkillsService {
    pub fn new(repo: SkillsRepository, employees: EmployeeService) -> Self {
        Self { repo, employees }
    }

    // --- Competências ---

    pub fn list_skills(&self, employee_id: Option<&str>) -> Vec<Skill> {
        self.repo
            .skills()
            .filter(|s| employee_id.is_none_or(|id| s.employee_id == id))
    }

    pub fn create_skill(&self, draft: SkillDraft) -> Result<Skill, AppError> {
        draft.validate()?;
        self.employees.ensure_exists(&draft.employee_id)?;
        self.repo.skills().add(draft.into_skill(new_record_id()))
    }

    pub fn update_skill(&self, id: &str, draft: SkillDraft) -> Result<Skill, AppError> {
        draft.validate()?;
        self.repo.skills().update(draft.into_skill(id.to_string()))
    }

    pub fn delete_skill(&self, id: &str) -> Result<(), AppError> {
        self.repo.skills().remove(id)?;
        Ok(())
    }

    // --- Treinamentos ---

    pub fn list_trainings(&self, employee_id: Option<&str>) -> Vec<Training> {
        self.repo
            .trainings()
            .filter(|t| employee_id.is_none_or(|id| t.employee_id == id))
    }

    pub fn create_training(&self, draft: TrainingDraft) -> Result<Training, AppError> {
        draft.validate()?;
        self.employees.ensure_exists(&draft.employee_id)?;
        self.repo.trainings().add(draft.into_training(new_record_id()))
    }

    pub fn update_training(&self, id: &str, draft: TrainingDraft) -> Result<Training, AppError> {
        draft.validate()?;
        self.repo.trainings().update(draft.into_training(id.to_string()))
    }

    pub fn set_training_status(
        &self,
        id: &str,
        status: TrainingStatus,
    ) -> Result<Training, AppError> {
        let mut training = self
            .repo
            .trainings()
            .find(id)
            .ok_or_else(|| AppError::RecordNotFound {
                collection: "trainings",
                id: id.to_string(),
            })?;
        training.status = status;
        self.repo.trainings().update(training)
    }

    pub fn delete_training(&self, id: &str) -> Result<(), AppError> {
        self.repo.trainings().remove(id)?;
        Ok(())
    }

    // --- Certificações ---

    pub fn list_certifications(&self, employee_id: Option<&str>) -> Vec<Certification> {
        self.repo
            .certifications()
            .filter(|c| employee_id.is_none_or(|id| c.employee_id == id))
    }

    /// Certificações válidas que vencem em até `within_days` dias a partir de `today`.
    pub fn expiring_certifications(&self, today: NaiveDate, within_days: u32) -> Vec<Certification> {
        // Janela além do calendário suportado: vale até o último dia representável
        let limit = today
            .checked_add_days(Days::new(u64::from(within_days)))
            .unwrap_or(NaiveDate::MAX);
        let mut expiring = self.repo.certifications().filter(|c| {
            !c.is_expired(today) && c.expiry_date.is_some_and(|expiry| expiry <= limit)
        });
        expiring.sort_by_key(|c| c.expiry_date);
        expiring
    }

    pub fn create_certification(&self, draft: CertificationDraft) -> Result<Certification, AppError> {
        draft.validate()?;
        self.employees.ensure_exists(&draft.employee_id)?;
        self.repo
            .certifications()
            .add(draft.into_certification(new_record_id()))
    }

    pub fn update_certification(
        &self,
        id: &str,
        draft: CertificationDraft,
    ) -> Result<Certification, AppError> {
        draft.validate()?;
        self.repo
            .certifications()
            .update(draft.into_certification(id.to_string()))
    }

    pub fn delete_certification(&self, id: &str) -> Result<(), AppError> {
        self.repo.certifications().remove(id)?;
        Ok(())
    }

    // --- Lacunas ---

    pub fn list_gaps(&self, employee_id: Option<&str>, open_only: bool) -> Vec<SkillGap> {
        self.repo.gaps().filter(|g| {
            employee_id.is_none_or(|id| g.employee_id == id) && !(open_only && g.is_closed())
        })
    }

    pub fn create_gap(&self, draft: SkillGapDraft) -> Result<SkillGap, AppError> {
        draft.validate()?;
        self.employees.ensure_exists(&draft.employee_id)?;
        self.repo.gaps().add(draft.into_gap(new_record_id()))
    }

    pub fn update_gap(&self, id: &str, draft: SkillGapDraft) -> Result<SkillGap, AppError> {
        draft.validate()?;
        self.repo.gaps().update(draft.into_gap(id.to_string()))
    }

    pub fn delete_gap(&self, id: &str) -> Result<(), AppError> {
        self.repo.gaps().remove(id)?;
        Ok(())
    }
}
