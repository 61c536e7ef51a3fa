// src/db/collection.rs

use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::{common::error::AppError, db::kv_store::JsonStore};

/// Onde a coleção mora no armazenamento.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionSlot {
    /// Array na raiz da chave (ex.: `employees`)
    Key(&'static str),
    /// Array dentro de um objeto agregado (ex.: `skillsData.trainings`)
    Nested {
        key: &'static str,
        field: &'static str,
    },
}

impl CollectionSlot {
    pub fn name(&self) -> &'static str {
        match self {
            CollectionSlot::Key(key) => key,
            CollectionSlot::Nested { field, .. } => field,
        }
    }
}

/// Um registro plano identificado por `id`.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const SLOT: CollectionSlot;

    fn id(&self) -> &str;
}

/// Coleção tipada: lê o array inteiro, altera em memória, grava o array inteiro.
pub struct Collection<T> {
    store: JsonStore,
    _marker: PhantomData<fn() -> T>,
}

// Derive exigiria `T: Clone`
impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Record> Collection<T> {
    pub fn new(store: JsonStore) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    pub fn list(&self) -> Vec<T> {
        match T::SLOT {
            CollectionSlot::Key(key) => self.store.get::<Vec<T>>(key).unwrap_or_default(),
            CollectionSlot::Nested { key, field } => {
                let aggregate = self.store.get::<Map<String, Value>>(key).unwrap_or_default();
                decode_field(&aggregate, key, field)
            }
        }
    }

    pub fn find(&self, id: &str) -> Option<T> {
        self.list().into_iter().find(|r| r.id() == id)
    }

    pub fn filter<P>(&self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        self.list().into_iter().filter(|r| predicate(r)).collect()
    }

    pub fn add(&self, record: T) -> Result<T, AppError> {
        self.mutate(|records| {
            if records.iter().any(|r| r.id() == record.id()) {
                return Err(AppError::DuplicateRecordId {
                    collection: T::SLOT.name(),
                    id: record.id().to_string(),
                });
            }
            records.push(record.clone());
            Ok(record)
        })
    }

    pub fn update(&self, record: T) -> Result<T, AppError> {
        self.mutate(|records| {
            let slot = records
                .iter_mut()
                .find(|r| r.id() == record.id())
                .ok_or_else(|| AppError::RecordNotFound {
                    collection: T::SLOT.name(),
                    id: record.id().to_string(),
                })?;
            *slot = record.clone();
            Ok(record)
        })
    }

    pub fn remove(&self, id: &str) -> Result<T, AppError> {
        self.mutate(|records| {
            let index = records
                .iter()
                .position(|r| r.id() == id)
                .ok_or_else(|| AppError::RecordNotFound {
                    collection: T::SLOT.name(),
                    id: id.to_string(),
                })?;
            Ok(records.remove(index))
        })
    }

    /// Aplica `f` ao array carregado e grava o resultado se `f` tiver sucesso.
    pub fn mutate<R, F>(&self, f: F) -> Result<R, AppError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, AppError>,
    {
        match T::SLOT {
            CollectionSlot::Key(key) => self.store.modify::<Vec<T>, R, _>(key, |current| {
                let mut records = current.unwrap_or_default();
                let ret = f(&mut records)?;
                Ok((records, ret))
            }),
            CollectionSlot::Nested { key, field } => {
                self.store
                    .modify::<Map<String, Value>, R, _>(key, |current| {
                        let mut aggregate = current.unwrap_or_default();
                        let mut records: Vec<T> = decode_field(&aggregate, key, field);
                        let ret = f(&mut records)?;
                        aggregate.insert(field.to_string(), serde_json::to_value(&records)?);
                        Ok((aggregate, ret))
                    })
            }
        }
    }
}

fn decode_field<T: DeserializeOwned>(aggregate: &Map<String, Value>, key: &str, field: &str) -> Vec<T> {
    match aggregate.get(field) {
        None | Some(Value::Null) => Vec::new(),
        Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|e| {
            tracing::warn!(key, field, error = %e, "campo agregado inválido, tratando como vazio");
            Vec::new()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use serde::Deserialize;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: String,
        text: String,
    }

    impl Record for Note {
        const SLOT: CollectionSlot = CollectionSlot::Key("notes");
        fn id(&self) -> &str {
            &self.id
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Tag {
        id: String,
    }

    impl Record for Tag {
        const SLOT: CollectionSlot = CollectionSlot::Nested {
            key: "notesData",
            field: "tags",
        };
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn note(id: &str, text: &str) -> Note {
        Note {
            id: id.into(),
            text: text.into(),
        }
    }

    fn store() -> JsonStore {
        JsonStore::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn add_then_list_contains_exactly_one_identical_record() {
        let notes = Collection::<Note>::new(store());
        notes.add(note("a", "first")).unwrap();
        notes.add(note("b", "second")).unwrap();

        let listed = notes.list();
        let matches: Vec<_> = listed.iter().filter(|n| n.id == "b").collect();
        assert_eq!(matches, vec![&note("b", "second")]);
    }

    #[test]
    fn add_rejects_duplicate_ids() {
        let notes = Collection::<Note>::new(store());
        notes.add(note("a", "first")).unwrap();
        let err = notes.add(note("a", "again")).unwrap_err();
        assert!(matches!(err, AppError::DuplicateRecordId { collection: "notes", .. }));
        assert_eq!(notes.list().len(), 1);
    }

    #[test]
    fn update_replaces_only_the_matching_record() {
        let store = store();
        let notes = Collection::<Note>::new(store.clone());
        notes.add(note("a", "first")).unwrap();
        notes.add(note("b", "second")).unwrap();
        notes.add(note("c", "third")).unwrap();
        let before = serde_json::to_string(&notes.find("a")).unwrap();

        notes.update(note("b", "edited")).unwrap();

        let listed = notes.list();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[1], note("b", "edited"));
        assert_eq!(serde_json::to_string(&notes.find("a")).unwrap(), before);
        assert_eq!(listed[2], note("c", "third"));
    }

    #[test]
    fn update_and_remove_unknown_id_are_not_found() {
        let notes = Collection::<Note>::new(store());
        notes.add(note("a", "first")).unwrap();
        assert!(matches!(
            notes.update(note("zz", "x")),
            Err(AppError::RecordNotFound { .. })
        ));
        assert!(matches!(notes.remove("zz"), Err(AppError::RecordNotFound { .. })));
        assert_eq!(notes.list(), vec![note("a", "first")]);
    }

    #[test]
    fn remove_drops_the_record_and_shrinks_by_one() {
        let notes = Collection::<Note>::new(store());
        notes.add(note("a", "first")).unwrap();
        notes.add(note("b", "second")).unwrap();

        let removed = notes.remove("a").unwrap();
        assert_eq!(removed.id, "a");
        let listed = notes.list();
        assert_eq!(listed.len(), 1);
        assert!(listed.iter().all(|n| n.id != "a"));
    }

    #[test]
    fn nested_slot_keeps_sibling_fields() {
        let store = store();
        store.set("notesData", &serde_json::json!({ "other": [1, 2, 3] }));

        let tags = Collection::<Tag>::new(store.clone());
        tags.add(Tag { id: "t1".into() }).unwrap();

        let raw: Map<String, Value> = store.get("notesData").unwrap();
        assert_eq!(raw["other"], serde_json::json!([1, 2, 3]));
        assert_eq!(raw["tags"], serde_json::json!([{ "id": "t1" }]));
        assert_eq!(tags.list(), vec![Tag { id: "t1".into() }]);
    }

    #[test]
    fn corrupt_collection_reads_as_empty() {
        let store = store();
        store.set("notes", &serde_json::json!({ "not": "an array" }));
        let notes = Collection::<Note>::new(store);
        assert!(notes.list().is_empty());
    }
}
