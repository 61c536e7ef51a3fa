// src/models/skills.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::collection::{CollectionSlot, Record};

// Tudo de competências mora no agregado `skillsData`
const SKILLS_KEY: &str = "skillsData";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProficiencyLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TrainingStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

// --- Competência ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: String,
    pub employee_id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub level: ProficiencyLevel,
    #[serde(default)]
    pub years_of_experience: Option<Decimal>,
    #[serde(default)]
    pub last_assessed: Option<NaiveDate>,
}

impl Record for Skill {
    const SLOT: CollectionSlot = CollectionSlot::Nested {
        key: SKILLS_KEY,
        field: "skills",
    };

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SkillDraft {
    #[validate(length(min = 1, message = "O funcionário é obrigatório."))]
    pub employee_id: String,
    #[validate(length(min = 1, message = "O nome da competência é obrigatório."))]
    pub name: String,
    pub category: Option<String>,
    pub level: ProficiencyLevel,
    pub years_of_experience: Option<Decimal>,
    pub last_assessed: Option<NaiveDate>,
}

impl SkillDraft {
    pub fn into_skill(self, id: String) -> Skill {
        Skill {
            id,
            employee_id: self.employee_id,
            name: self.name,
            category: self.category,
            level: self.level,
            years_of_experience: self.years_of_experience,
            last_assessed: self.last_assessed,
        }
    }
}

// --- Treinamento ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Training {
    pub id: String,
    pub employee_id: String,
    pub title: String,
    #[serde(default)]
    pub provider: Option<String>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: TrainingStatus,
    #[serde(default)]
    pub score: Option<Decimal>,
}

impl Record for Training {
    const SLOT: CollectionSlot = CollectionSlot::Nested {
        key: SKILLS_KEY,
        field: "trainings",
    };

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TrainingDraft {
    #[validate(length(min = 1, message = "O funcionário é obrigatório."))]
    pub employee_id: String,
    #[validate(length(min = 1, message = "O título é obrigatório."))]
    pub title: String,
    pub provider: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: TrainingStatus,
    pub score: Option<Decimal>,
}

impl TrainingDraft {
    pub fn into_training(self, id: String) -> Training {
        Training {
            id,
            employee_id: self.employee_id,
            title: self.title,
            provider: self.provider,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status,
            score: self.score,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrainingStatusPayload {
    pub status: TrainingStatus,
}

// --- Certificação ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub id: String,
    pub employee_id: String,
    pub name: String,
    pub issuer: String,
    pub issue_date: NaiveDate,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub credential_id: Option<String>,
}

impl Record for Certification {
    const SLOT: CollectionSlot = CollectionSlot::Nested {
        key: SKILLS_KEY,
        field: "certifications",
    };

    fn id(&self) -> &str {
        &self.id
    }
}

impl Certification {
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date.is_some_and(|d| d < today)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CertificationDraft {
    #[validate(length(min = 1, message = "O funcionário é obrigatório."))]
    pub employee_id: String,
    #[validate(length(min = 1, message = "O nome da certificação é obrigatório."))]
    pub name: String,
    #[validate(length(min = 1, message = "O emissor é obrigatório."))]
    pub issuer: String,
    pub issue_date: NaiveDate,
    pub expiry_date: Option<NaiveDate>,
    pub credential_id: Option<String>,
}

impl CertificationDraft {
    pub fn into_certification(self, id: String) -> Certification {
        Certification {
            id,
            employee_id: self.employee_id,
            name: self.name,
            issuer: self.issuer,
            issue_date: self.issue_date,
            expiry_date: self.expiry_date,
            credential_id: self.credential_id,
        }
    }
}

// --- Lacuna de competência ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGap {
    pub id: String,
    pub employee_id: String,
    pub skill_name: String,
    pub current_level: ProficiencyLevel,
    pub required_level: ProficiencyLevel,
    #[serde(default)]
    pub action_plan: Option<String>,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
}

impl Record for SkillGap {
    const SLOT: CollectionSlot = CollectionSlot::Nested {
        key: SKILLS_KEY,
        field: "skillGaps",
    };

    fn id(&self) -> &str {
        &self.id
    }
}

impl SkillGap {
    pub fn is_closed(&self) -> bool {
        self.current_level >= self.required_level
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SkillGapDraft {
    #[validate(length(min = 1, message = "O funcionário é obrigatório."))]
    pub employee_id: String,
    #[validate(length(min = 1, message = "A competência é obrigatória."))]
    pub skill_name: String,
    pub current_level: ProficiencyLevel,
    pub required_level: ProficiencyLevel,
    pub action_plan: Option<String>,
    pub target_date: Option<NaiveDate>,
}

impl SkillGapDraft {
    pub fn into_gap(self, id: String) -> SkillGap {
        SkillGap {
            id,
            employee_id: self.employee_id,
            skill_name: self.skill_name,
            current_level: self.current_level,
            required_level: self.required_level,
            action_plan: self.action_plan,
            target_date: self.target_date,
        }
    }
}
