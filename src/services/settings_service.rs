// src/services/settings_service.rs

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex, RwLock,
};

use validator::Validate;

use crate::{
    common::error::AppError,
    db::SettingsRepository,
    models::settings::{Settings, SettingsPatch},
};

type Listener = Arc<dyn Fn(&Settings) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Dono único do objeto de configurações.
///
/// Vive no `AppState` e é compartilhado por `Arc`. Toda escrita grava as seções
/// e avisa os inscritos na mesma thread, depois que o novo estado já está visível.
pub struct SettingsProvider {
    repo: SettingsRepository,
    current: RwLock<Settings>,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_id: AtomicU64,
}

impl SettingsProvider {
    pub fn new(repo: SettingsRepository) -> Self {
        let current = repo.get_settings();
        Self {
            repo,
            current: RwLock::new(current),
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn get(&self) -> Settings {
        self.current
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    pub fn update(&self, patch: SettingsPatch) -> Result<Settings, AppError> {
        patch.validate()?;

        let next = {
            let mut current = self.current.write().unwrap_or_else(|p| p.into_inner());
            let next = current.merged(patch);
            self.repo.save_settings(&next);
            *current = next.clone();
            next
        };

        tracing::info!(app_name = %next.app.app_name, "⚙️ Configurações atualizadas");
        self.notify(&next);
        Ok(next)
    }

    pub fn reset(&self) -> Settings {
        let defaults = Settings::default();
        {
            let mut current = self.current.write().unwrap_or_else(|p| p.into_inner());
            self.repo.save_settings(&defaults);
            *current = defaults.clone();
        }

        tracing::info!("⚙️ Configurações restauradas para o padrão");
        self.notify(&defaults);
        defaults
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Settings) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.lock().unwrap_or_else(|p| p.into_inner());
        let before = listeners.len();
        listeners.retain(|(sid, _)| *sid != id);
        listeners.len() != before
    }

    fn notify(&self, settings: &Settings) {
        // Copia a lista para que um inscrito possa chamar get()/subscribe() sem deadlock
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();

        for listener in listeners {
            listener(settings);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{JsonStore, MemoryStore};
    use crate::models::settings::DEFAULT_APP_NAME;
    use std::sync::atomic::AtomicUsize;

    fn provider() -> (JsonStore, SettingsProvider) {
        let store = JsonStore::new(Arc::new(MemoryStore::new()));
        let provider = SettingsProvider::new(SettingsRepository::new(store.clone()));
        (store, provider)
    }

    #[test]
    fn update_merges_partial_fields() {
        let (_, settings) = provider();
        settings
            .update(SettingsPatch {
                company_name: Some("Initech".into()),
                ..Default::default()
            })
            .unwrap();
        let before = settings.get();

        let after = settings
            .update(SettingsPatch {
                app_name: Some("Acme".into()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(after.app.app_name, "Acme");
        assert_eq!(settings.get().app.app_name, "Acme");
        assert_eq!(after.company, before.company);
        assert_eq!(after.company.name, "Initech");
        assert_eq!(after.app.logo_data, before.app.logo_data);
        assert_eq!(after.working_hours, before.working_hours);
    }

    #[test]
    fn updates_are_persisted_per_section() {
        let (store, settings) = provider();
        settings
            .update(SettingsPatch {
                app_name: Some("Acme".into()),
                logo_data: Some(Some("data:image/png;base64,AA==".into())),
                ..Default::default()
            })
            .unwrap();

        let raw: serde_json::Value = store.get("appSettings").unwrap();
        assert_eq!(raw["appName"], "Acme");

        let reopened = SettingsProvider::new(SettingsRepository::new(store));
        assert_eq!(reopened.get(), settings.get());
    }

    #[test]
    fn reset_restores_defaults() {
        let (_, settings) = provider();
        settings
            .update(SettingsPatch {
                app_name: Some("Acme".into()),
                logo_data: Some(Some("data:image/png;base64,AA==".into())),
                ..Default::default()
            })
            .unwrap();

        let reset = settings.reset();
        assert_eq!(reset.app.app_name, DEFAULT_APP_NAME);
        assert_eq!(reset.app.logo_data, None);
        assert_eq!(settings.get(), Settings::default());
    }

    #[test]
    fn invalid_patch_changes_nothing() {
        let (_, settings) = provider();
        let result = settings.update(SettingsPatch {
            app_name: Some(String::new()),
            ..Default::default()
        });
        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert_eq!(settings.get().app.app_name, DEFAULT_APP_NAME);
    }

    #[test]
    fn subscribers_are_notified_synchronously() {
        let (_, settings) = provider();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(String::new()));

        let id = {
            let calls = Arc::clone(&calls);
            let seen = Arc::clone(&seen);
            settings.subscribe(move |s| {
                calls.fetch_add(1, Ordering::SeqCst);
                *seen.lock().unwrap() = s.app.app_name.clone();
            })
        };

        settings
            .update(SettingsPatch {
                app_name: Some("Acme".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*seen.lock().unwrap(), "Acme");

        settings.reset();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(*seen.lock().unwrap(), DEFAULT_APP_NAME);

        assert!(settings.unsubscribe(id));
        assert!(!settings.unsubscribe(id));
        settings.reset();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
