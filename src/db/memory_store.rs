// src/db/memory_store.rs

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::{common::error::AppError, db::kv_store::KeyValueStore};

/// Backend em memória. Usado nos testes e em execuções efêmeras (`DATA_DIR=:memory:`).
#[derive(Default)]
pub struct MemoryStore {
    items: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        let items = self.items.read().unwrap_or_else(|p| p.into_inner());
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut items = self.items.write().unwrap_or_else(|p| p.into_inner());
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), AppError> {
        let mut items = self.items.write().unwrap_or_else(|p| p.into_inner());
        items.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, AppError> {
        let items = self.items.read().unwrap_or_else(|p| p.into_inner());
        Ok(items.keys().cloned().collect())
    }
}
