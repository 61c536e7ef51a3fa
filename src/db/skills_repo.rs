// src/db/skills_repo.rs

use crate::db::{collection::Collection, kv_store::JsonStore};
use crate::models::skills::{Certification, Skill, SkillGap, Training};

// As quatro coleções do agregado 'skillsData'
#[derive(Clone)]
pub struct SkillsRepository {
    skills: Collection<Skill>,
    trainings: Collection<Training>,
    certifications: Collection<Certification>,
    gaps: Collection<SkillGap>,
}

impl SkillsRepository {
    pub fn new(store: JsonStore) -> Self {
        Self {
            skills: Collection::new(store.clone()),
            trainings: Collection::new(store.clone()),
            certifications: Collection::new(store.clone()),
            gaps: Collection::new(store),
        }
    }

    pub fn skills(&self) -> &Collection<Skill> {
        &self.skills
    }

    pub fn trainings(&self) -> &Collection<Training> {
        &self.trainings
    }

    pub fn certifications(&self) -> &Collection<Certification> {
        &self.certifications
    }

    pub fn gaps(&self) -> &Collection<SkillGap> {
        &self.gaps
    }
}
