// src/services/performance_service.rs

use rust_decimal::Decimal;
use validator::Validate;

use crate::{
    common::{
        db_utils::{new_record_id, round2},
        error::AppError,
    },
    db::PerformanceRepository,
    models::performance::{
        GoalDraft, GoalStatus, PerformanceReview, ReviewDraft, SmartGoal,
    },
    services::employee_service::EmployeeService,
};

#[derive(Clone)]
pub struct PerformanceService {
    repo: PerformanceRepository,
    employees: EmployeeService,
}

impl PerformanceService {
    pub fn new(repo: PerformanceRepository, employees: EmployeeService) -> Self {
        Self { repo, employees }
    }

    // --- Avaliações ---

    pub fn list_reviews(&self, employee_id: Option<&str>) -> Vec<PerformanceReview> {
        self.repo
            .reviews()
            .filter(|r| employee_id.is_none_or(|id| r.employee_id == id))
    }

    pub fn create_review(&self, draft: ReviewDraft) -> Result<PerformanceReview, AppError> {
        draft.validate()?;
        self.employees.ensure_exists(&draft.employee_id)?;
        self.repo.reviews().add(draft.into_review(new_record_id()))
    }

    pub fn update_review(&self, id: &str, draft: ReviewDraft) -> Result<PerformanceReview, AppError> {
        draft.validate()?;
        self.repo.reviews().update(draft.into_review(id.to_string()))
    }

    pub fn delete_review(&self, id: &str) -> Result<(), AppError> {
        self.repo.reviews().remove(id)?;
        Ok(())
    }

    /// Média das notas do funcionário com 2 casas; `None` se não houver avaliações.
    pub fn average_rating(&self, employee_id: &str) -> Option<Decimal> {
        let ratings: Vec<u8> = self
            .list_reviews(Some(employee_id))
            .into_iter()
            .map(|r| r.rating)
            .collect();
        if ratings.is_empty() {
            return None;
        }
        let total: u32 = ratings.iter().map(|r| u32::from(*r)).sum();
        Some(round2(Decimal::from(total) / Decimal::from(ratings.len())))
    }

    // --- Metas ---

    pub fn list_goals(&self, employee_id: Option<&str>) -> Vec<SmartGoal> {
        self.repo
            .goals()
            .filter(|g| employee_id.is_none_or(|id| g.employee_id == id))
    }

    pub fn create_goal(&self, draft: GoalDraft) -> Result<SmartGoal, AppError> {
        draft.validate()?;
        self.employees.ensure_exists(&draft.employee_id)?;
        self.repo.goals().add(draft.into_goal(new_record_id()))
    }

    pub fn update_goal(&self, id: &str, draft: GoalDraft) -> Result<SmartGoal, AppError> {
        draft.validate()?;
        self.repo.goals().update(draft.into_goal(id.to_string()))
    }

    /// Atualiza o progresso (limitado a 100). Chegar a 100 conclui a meta.
    pub fn update_goal_progress(&self, id: &str, progress: u16) -> Result<SmartGoal, AppError> {
        let mut goal = self
            .repo
            .goals()
            .find(id)
            .ok_or_else(|| AppError::RecordNotFound {
                collection: "goals",
                id: id.to_string(),
            })?;

        goal.progress = u8::try_from(progress.min(100)).unwrap_or(100);
        if goal.progress == 100 {
            goal.status = GoalStatus::Completed;
        } else if goal.progress > 0 && goal.status == GoalStatus::NotStarted {
            goal.status = GoalStatus::InProgress;
        }
        self.repo.goals().update(goal)
    }

    pub fn delete_goal(&self, id: &str) -> Result<(), AppError> {
        self.repo.goals().remove(id)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{EmployeeRepository, JsonStore, MemoryStore};
    use crate::models::performance::ReviewStatus;
    use crate::services::employee_service::tests::draft;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn setup() -> (PerformanceService, String) {
        let store = JsonStore::new(Arc::new(MemoryStore::new()));
        let employees = EmployeeService::new(EmployeeRepository::new(store.clone()));
        let alice = employees.create(draft("Alice", "Engineering", 5000)).unwrap();
        (
            PerformanceService::new(PerformanceRepository::new(store), employees),
            alice.id,
        )
    }

    fn review(employee_id: &str, rating: u8) -> ReviewDraft {
        ReviewDraft {
            employee_id: employee_id.into(),
            reviewer: "Carol".into(),
            period: "2024-Q1".into(),
            review_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            rating,
            strengths: None,
            improvements: None,
            comments: None,
            status: ReviewStatus::Submitted,
        }
    }

    fn goal(employee_id: &str) -> GoalDraft {
        GoalDraft {
            employee_id: employee_id.into(),
            title: "Reduzir tempo de deploy".into(),
            specific: "Pipeline único".into(),
            measurable: "< 10 min".into(),
            achievable: "Cache de build".into(),
            relevant: "Entrega contínua".into(),
            time_bound: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            progress: 0,
            status: GoalStatus::NotStarted,
        }
    }

    #[test]
    fn rating_must_be_between_one_and_five() {
        let (service, alice) = setup();
        assert!(matches!(
            service.create_review(review(&alice, 6)),
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            service.create_review(review(&alice, 0)),
            Err(AppError::ValidationError(_))
        ));
        assert!(service.list_reviews(None).is_empty());
    }

    #[test]
    fn average_rating_is_rounded() {
        let (service, alice) = setup();
        assert_eq!(service.average_rating(&alice), None);
        for rating in [4, 5, 4] {
            service.create_review(review(&alice, rating)).unwrap();
        }
        // 13 / 3 = 4.333...
        assert_eq!(service.average_rating(&alice), Some(Decimal::new(433, 2)));
    }

    #[test]
    fn progress_is_clamped_and_drives_status() {
        let (service, alice) = setup();
        let g = service.create_goal(goal(&alice)).unwrap();

        let halfway = service.update_goal_progress(&g.id, 50).unwrap();
        assert_eq!(halfway.progress, 50);
        assert_eq!(halfway.status, GoalStatus::InProgress);

        let done = service.update_goal_progress(&g.id, 250).unwrap();
        assert_eq!(done.progress, 100);
        assert_eq!(done.status, GoalStatus::Completed);
        assert_eq!(service.list_goals(Some(&alice)), vec![done]);
    }

    #[test]
    fn delete_removes_only_the_target() {
        let (service, alice) = setup();
        let first = service.create_goal(goal(&alice)).unwrap();
        let second = service.create_goal(goal(&alice)).unwrap();
        service.delete_goal(&first.id).unwrap();
        assert_eq!(service.list_goals(None), vec![second]);
    }
}
