// src/db/settings_repo.rs

use serde::{de::DeserializeOwned, Serialize};

use crate::{
    db::kv_store::JsonStore,
    models::settings::{
        Settings, APP_SETTINGS_KEY, BRANDING_SETTINGS_KEY, COMPANY_SETTINGS_KEY,
        PAYROLL_SETTINGS_KEY, WORKING_HOURS_SETTINGS_KEY,
    },
};

#[derive(Clone)]
pub struct SettingsRepository {
    store: JsonStore,
}

impl SettingsRepository {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    // Seção ausente ou corrompida vira o padrão
    fn section<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        self.store.get::<T>(key).unwrap_or_default()
    }

    fn put<T: Serialize>(&self, key: &str, value: &T) {
        self.store.set(key, value);
    }

    pub fn get_settings(&self) -> Settings {
        Settings {
            app: self.section(APP_SETTINGS_KEY),
            company: self.section(COMPANY_SETTINGS_KEY),
            branding: self.section(BRANDING_SETTINGS_KEY),
            working_hours: self.section(WORKING_HOURS_SETTINGS_KEY),
            payroll: self.section(PAYROLL_SETTINGS_KEY),
        }
    }

    pub fn save_settings(&self, settings: &Settings) {
        self.put(APP_SETTINGS_KEY, &settings.app);
        self.put(COMPANY_SETTINGS_KEY, &settings.company);
        self.put(BRANDING_SETTINGS_KEY, &settings.branding);
        self.put(WORKING_HOURS_SETTINGS_KEY, &settings.working_hours);
        self.put(PAYROLL_SETTINGS_KEY, &settings.payroll);
    }
}
