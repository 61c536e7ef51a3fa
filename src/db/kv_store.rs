// src/db/kv_store.rs

use std::sync::{Arc, Mutex};

use serde::{de::DeserializeOwned, Serialize};

use crate::common::error::AppError;

/// Backend de chave/valor: strings in, strings out.
/// Equivalente local do `localStorage` do navegador.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, AppError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove_item(&self, key: &str) -> Result<(), AppError>;
    fn keys(&self) -> Result<Vec<String>, AppError>;
}

/// Adaptador JSON sobre um `KeyValueStore`.
///
/// Leituras com erro (I/O ou JSON) viram ausência; escritas com erro são
/// registradas no log e descartadas. Nada disso chega ao chamador.
#[derive(Clone)]
pub struct JsonStore {
    backend: Arc<dyn KeyValueStore>,
    // Serializa os ciclos ler-modificar-gravar entre requisições concorrentes
    write_lock: Arc<Mutex<()>>,
}

impl JsonStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "falha ao ler chave, tratando como ausente");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "JSON inválido na chave, tratando como ausente");
                None
            }
        }
    }

    /// Versão que propaga o erro, usada quando o chamador precisa saber.
    pub fn try_set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), AppError> {
        let raw = serde_json::to_string(value)?;
        self.backend.set_item(key, &raw)
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_set(key, value) {
            tracing::error!(key, error = %e, "falha ao gravar chave; escrita descartada");
        }
    }

    pub fn remove(&self, key: &str) {
        if let Err(e) = self.backend.remove_item(key) {
            tracing::error!(key, error = %e, "falha ao remover chave");
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.backend.keys().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falha ao listar chaves");
            Vec::new()
        })
    }

    /// Ler-modificar-gravar sob o lock de escrita.
    ///
    /// `f` recebe o valor atual (ou `None`) e devolve `Ok((novo_valor, retorno))`.
    /// Se `f` falhar, nada é gravado.
    pub fn modify<T, R, F>(&self, key: &str, f: F) -> Result<R, AppError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(Option<T>) -> Result<(T, R), AppError>,
    {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let current = self.get::<T>(key);
        let (next, ret) = f(current)?;
        self.set(key, &next);
        Ok(ret)
    }
}
