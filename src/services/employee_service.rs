// src/services/employee_service.rs

use validator::Validate;

use crate::{
    common::{db_utils::new_record_id, error::AppError},
    db::EmployeeRepository,
    models::employee::{Employee, EmployeeDraft, EmployeeStatus},
};

pub const UNKNOWN_EMPLOYEE: &str = "Unknown";

#[derive(Clone)]
pub struct EmployeeService {
    repo: EmployeeRepository,
}

impl EmployeeService {
    pub fn new(repo: EmployeeRepository) -> Self {
        Self { repo }
    }

    pub fn list(&self) -> Vec<Employee> {
        self.repo.list()
    }

    pub fn list_filtered(
        &self,
        status: Option<EmployeeStatus>,
        department: Option<&str>,
    ) -> Vec<Employee> {
        let base = match department {
            Some(d) => self.repo.list_by_department(d),
            None => self.repo.list(),
        };
        base.into_iter()
            .filter(|e| status.is_none_or(|s| e.status == s))
            .collect()
    }

    pub fn get(&self, id: &str) -> Result<Employee, AppError> {
        self.repo
            .find_by_id(id)
            .ok_or_else(|| AppError::EmployeeNotFound(id.to_string()))
    }

    /// Falha com `EmployeeNotFound` se o ID não existir. Usado pelos outros serviços.
    pub fn ensure_exists(&self, id: &str) -> Result<(), AppError> {
        if self.repo.exists(id) {
            Ok(())
        } else {
            Err(AppError::EmployeeNotFound(id.to_string()))
        }
    }

    /// Nome para exibição; IDs órfãos viram "Unknown".
    pub fn display_name(&self, id: &str) -> String {
        self.repo
            .find_by_id(id)
            .map(|e| e.name)
            .unwrap_or_else(|| UNKNOWN_EMPLOYEE.to_string())
    }

    pub fn create(&self, draft: EmployeeDraft) -> Result<Employee, AppError> {
        draft.validate()?;
        let employee = self.repo.add(draft.into_employee(new_record_id()))?;
        tracing::info!(id = %employee.id, name = %employee.name, "👤 Funcionário cadastrado");
        Ok(employee)
    }

    /// Substitui o registro inteiro pelos dados do formulário.
    pub fn update(&self, id: &str, draft: EmployeeDraft) -> Result<Employee, AppError> {
        draft.validate()?;
        self.repo.update(draft.into_employee(id.to_string()))
    }

    pub fn set_status(&self, id: &str, status: EmployeeStatus) -> Result<Employee, AppError> {
        let mut employee = self.get(id)?;
        employee.status = status;
        self.repo.update(employee)
    }

    // Sem cascata: ponto, holerites etc. continuam apontando para o ID removido
    pub fn delete(&self, id: &str) -> Result<(), AppError> {
        self.repo.remove(id)?;
        tracing::info!(id, "🗑️ Funcionário removido");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::db::{JsonStore, MemoryStore};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::sync::Arc;

    pub(crate) fn draft(name: &str, department: &str, salary: i64) -> EmployeeDraft {
        EmployeeDraft {
            name: name.to_string(),
            email: format!(
                "{}@example.com",
                name.split_whitespace().collect::<String>().to_lowercase()
            ),
            phone: None,
            position: "Analyst".to_string(),
            department: department.to_string(),
            salary: Decimal::from(salary),
            join_date: NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(),
            status: EmployeeStatus::Active,
        }
    }

    fn service() -> EmployeeService {
        let store = JsonStore::new(Arc::new(MemoryStore::new()));
        EmployeeService::new(EmployeeRepository::new(store))
    }

    #[test]
    fn create_assigns_an_id_and_persists() {
        let service = service();
        let alice = service.create(draft("Alice", "Engineering", 5000)).unwrap();
        assert!(!alice.id.is_empty());
        assert_eq!(service.get(&alice.id).unwrap(), alice);
        assert_eq!(service.list().len(), 1);
    }

    #[test]
    fn invalid_draft_is_rejected_before_persistence() {
        let service = service();
        let mut bad = draft("Alice", "Engineering", 5000);
        bad.name = String::new();
        bad.email = "not-an-email".into();
        bad.salary = Decimal::from(-1);

        match service.create(bad) {
            Err(AppError::ValidationError(errors)) => {
                let fields = errors.field_errors();
                assert!(fields.contains_key("name"));
                assert!(fields.contains_key("email"));
                assert!(fields.contains_key("salary"));
            }
            other => panic!("esperava erro de validação: {other:?}"),
        }
        assert!(service.list().is_empty());
    }

    #[test]
    fn update_replaces_fields_and_keeps_id() {
        let service = service();
        let alice = service.create(draft("Alice", "Engineering", 5000)).unwrap();
        let bob = service.create(draft("Bob", "Sales", 4000)).unwrap();

        let updated = service
            .update(&alice.id, draft("Alice Smith", "Engineering", 5500))
            .unwrap();
        assert_eq!(updated.id, alice.id);
        assert_eq!(service.get(&alice.id).unwrap().name, "Alice Smith");
        assert_eq!(updated.email, "alicesmith@example.com");
        assert_eq!(service.get(&bob.id).unwrap(), bob);

        assert!(matches!(
            service.update("missing", draft("X", "Y", 1)),
            Err(AppError::RecordNotFound { .. })
        ));
    }

    #[test]
    fn filters_by_status_and_department() {
        let service = service();
        let alice = service.create(draft("Alice", "Engineering", 5000)).unwrap();
        service.create(draft("Bob", "Sales", 4000)).unwrap();
        service.set_status(&alice.id, EmployeeStatus::Inactive).unwrap();

        assert_eq!(service.list_filtered(Some(EmployeeStatus::Active), None).len(), 1);
        assert_eq!(service.list_filtered(None, Some("engineering")).len(), 1);
        assert!(service
            .list_filtered(Some(EmployeeStatus::Active), Some("Engineering"))
            .is_empty());
    }

    #[test]
    fn unknown_ids_render_as_placeholder() {
        let service = service();
        let alice = service.create(draft("Alice", "Engineering", 5000)).unwrap();
        assert_eq!(service.display_name(&alice.id), "Alice");
        assert_eq!(service.display_name("ghost"), UNKNOWN_EMPLOYEE);

        service.delete(&alice.id).unwrap();
        assert_eq!(service.display_name(&alice.id), UNKNOWN_EMPLOYEE);
        assert!(matches!(
            service.ensure_exists(&alice.id),
            Err(AppError::EmployeeNotFound(_))
        ));
        assert!(matches!(service.delete(&alice.id), Err(AppError::RecordNotFound { .. })));
    }
}
