// src/models/performance.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::collection::{CollectionSlot, Record};

const PERFORMANCE_KEY: &str = "performanceData";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Draft,
    Submitted,
    Acknowledged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum GoalStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReview {
    pub id: String,
    pub employee_id: String,
    pub reviewer: String,
    // Ex.: "2024-Q1", "2024-H2"
    pub period: String,
    pub review_date: NaiveDate,
    // 1..=5
    pub rating: u8,
    #[serde(default)]
    pub strengths: Option<String>,
    #[serde(default)]
    pub improvements: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub status: ReviewStatus,
}

impl Record for PerformanceReview {
    const SLOT: CollectionSlot = CollectionSlot::Nested {
        key: PERFORMANCE_KEY,
        field: "reviews",
    };

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    #[validate(length(min = 1, message = "O funcionário é obrigatório."))]
    pub employee_id: String,
    #[validate(length(min = 1, message = "O avaliador é obrigatório."))]
    pub reviewer: String,
    #[validate(length(min = 1, message = "O período é obrigatório."))]
    pub period: String,
    pub review_date: NaiveDate,
    #[validate(range(min = 1, max = 5, message = "A nota deve estar entre 1 e 5."))]
    pub rating: u8,
    pub strengths: Option<String>,
    pub improvements: Option<String>,
    pub comments: Option<String>,
    #[serde(default)]
    pub status: ReviewStatus,
}

impl ReviewDraft {
    pub fn into_review(self, id: String) -> PerformanceReview {
        PerformanceReview {
            id,
            employee_id: self.employee_id,
            reviewer: self.reviewer,
            period: self.period,
            review_date: self.review_date,
            rating: self.rating,
            strengths: self.strengths,
            improvements: self.improvements,
            comments: self.comments,
            status: self.status,
        }
    }
}

/// Meta SMART (Specific, Measurable, Achievable, Relevant, Time-bound).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartGoal {
    pub id: String,
    pub employee_id: String,
    pub title: String,
    pub specific: String,
    pub measurable: String,
    pub achievable: String,
    pub relevant: String,
    pub time_bound: NaiveDate,
    // 0..=100
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub status: GoalStatus,
}

impl Record for SmartGoal {
    const SLOT: CollectionSlot = CollectionSlot::Nested {
        key: PERFORMANCE_KEY,
        field: "goals",
    };

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GoalDraft {
    #[validate(length(min = 1, message = "O funcionário é obrigatório."))]
    pub employee_id: String,
    #[validate(length(min = 1, message = "O título é obrigatório."))]
    pub title: String,
    #[serde(default)]
    pub specific: String,
    #[serde(default)]
    pub measurable: String,
    #[serde(default)]
    pub achievable: String,
    #[serde(default)]
    pub relevant: String,
    pub time_bound: NaiveDate,
    #[serde(default)]
    #[validate(range(max = 100, message = "O progresso vai de 0 a 100."))]
    pub progress: u8,
    #[serde(default)]
    pub status: GoalStatus,
}

impl GoalDraft {
    pub fn into_goal(self, id: String) -> SmartGoal {
        SmartGoal {
            id,
            employee_id: self.employee_id,
            title: self.title,
            specific: self.specific,
            measurable: self.measurable,
            achievable: self.achievable,
            relevant: self.relevant,
            time_bound: self.time_bound,
            progress: self.progress,
            status: self.status,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProgressPayload {
    pub progress: u16,
}
