// src/db/leave_repo.rs

use crate::{
    common::error::AppError,
    db::{collection::Collection, kv_store::JsonStore},
    models::leave::{LeaveRequest, PermissionRequest, RequestStatus},
};

// Férias/licenças ('leaves') e permissões ('permissions') andam juntas
#[derive(Clone)]
pub struct LeaveRepository {
    leaves: Collection<LeaveRequest>,
    permissions: Collection<PermissionRequest>,
}

impl LeaveRepository {
    pub fn new(store: JsonStore) -> Self {
        Self {
            leaves: Collection::new(store.clone()),
            permissions: Collection::new(store),
        }
    }

    // --- Férias / licenças ---

    pub fn list_leaves(&self) -> Vec<LeaveRequest> {
        self.leaves.list()
    }

    pub fn find_leave(&self, id: &str) -> Option<LeaveRequest> {
        self.leaves.find(id)
    }

    pub fn list_leaves_by_status(&self, status: RequestStatus) -> Vec<LeaveRequest> {
        self.leaves.filter(|l| l.status == status)
    }

    pub fn list_leaves_by_employee(&self, employee_id: &str) -> Vec<LeaveRequest> {
        self.leaves.filter(|l| l.employee_id == employee_id)
    }

    pub fn add_leave(&self, leave: LeaveRequest) -> Result<LeaveRequest, AppError> {
        self.leaves.add(leave)
    }

    pub fn update_leave(&self, leave: LeaveRequest) -> Result<LeaveRequest, AppError> {
        self.leaves.update(leave)
    }

    pub fn remove_leave(&self, id: &str) -> Result<LeaveRequest, AppError> {
        self.leaves.remove(id)
    }

    // --- Permissões ---

    pub fn list_permissions(&self) -> Vec<PermissionRequest> {
        self.permissions.list()
    }

    pub fn find_permission(&self, id: &str) -> Option<PermissionRequest> {
        self.permissions.find(id)
    }

    pub fn list_permissions_by_status(&self, status: RequestStatus) -> Vec<PermissionRequest> {
        self.permissions.filter(|p| p.status == status)
    }

    pub fn add_permission(&self, permission: PermissionRequest) -> Result<PermissionRequest, AppError> {
        self.permissions.add(permission)
    }

    pub fn update_permission(&self, permission: PermissionRequest) -> Result<PermissionRequest, AppError> {
        self.permissions.update(permission)
    }

    pub fn remove_permission(&self, id: &str) -> Result<PermissionRequest, AppError> {
        self.permissions.remove(id)
    }
}
