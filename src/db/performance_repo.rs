// src/db/performance_repo.rs

use crate::db::{collection::Collection, kv_store::JsonStore};
use crate::models::performance::{PerformanceReview, SmartGoal};

// Avaliações e metas no agregado 'performanceData'
#[derive(Clone)]
pub struct PerformanceRepository {
    reviews: Collection<PerformanceReview>,
    goals: Collection<SmartGoal>,
}

impl PerformanceRepository {
    pub fn new(store: JsonStore) -> Self {
        Self {
            reviews: Collection::new(store.clone()),
            goals: Collection::new(store),
        }
    }

    pub fn reviews(&self) -> &Collection<PerformanceReview> {
        &self.reviews
    }

    pub fn goals(&self) -> &Collection<SmartGoal> {
        &self.goals
    }
}
