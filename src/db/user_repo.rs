// src/db/user_repo.rs

use crate::{
    common::error::AppError,
    db::{collection::Collection, kv_store::JsonStore},
    models::auth::User,
};

// A lista local de credenciais, chave 'users'
#[derive(Clone)]
pub struct UserRepository {
    users: Collection<User>,
}

impl UserRepository {
    pub fn new(store: JsonStore) -> Self {
        Self {
            users: Collection::new(store),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.users.list().is_empty()
    }

    pub fn list(&self) -> Vec<User> {
        self.users.list()
    }

    // Busca um usuário pelo nome (sem diferenciar maiúsculas)
    pub fn find_by_username(&self, username: &str) -> Option<User> {
        self.users
            .list()
            .into_iter()
            .find(|u| u.username.eq_ignore_ascii_case(username))
    }

    pub fn find_by_id(&self, id: &str) -> Option<User> {
        self.users.find(id)
    }

    // Cria um novo usuário, recusando nomes duplicados
    pub fn create_user(&self, user: User) -> Result<User, AppError> {
        self.users.mutate(|records| {
            if records
                .iter()
                .any(|u| u.username.eq_ignore_ascii_case(&user.username))
            {
                return Err(AppError::UsernameAlreadyExists);
            }
            records.push(user.clone());
            Ok(user)
        })
    }

    pub fn remove(&self, id: &str) -> Result<User, AppError> {
        self.users.remove(id)
    }
}
