//! Role domain models and DTOs.
//!
//! A role is a named, ordered list of [`ModulePermission`] entries. Role
//! creation is the single place where the entry list is checked: every module
//! may appear at most once, and permission sets without `read` are cleared.

use std::borrow::Cow;

use backoffice_core::permissions::find_duplicate_module;
use backoffice_core::{ModulePermission, PermissionMap};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    /// Entries in authoring order.
    pub permissions: Vec<ModulePermission>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Role {
    pub fn permission_map(&self) -> PermissionMap {
        PermissionMap::from_entries(&self.permissions)
    }
}

/// Role name and id, embedded in user listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RoleSummary {
    pub id: Uuid,
    pub name: String,
}

impl From<&Role> for RoleSummary {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id,
            name: role.name.clone(),
        }
    }
}

/// A role as resolved for an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGrant {
    pub name: String,
    pub permissions: PermissionMap,
}

impl From<&Role> for RoleGrant {
    fn from(role: &Role) -> Self {
        Self {
            name: role.name.clone(),
            permissions: role.permission_map(),
        }
    }
}

fn validate_unique_modules(permissions: &[ModulePermission]) -> Result<(), ValidationError> {
    match find_duplicate_module(permissions) {
        Some(module) => Err(ValidationError::new("duplicate_module").with_message(Cow::Owned(
            format!("Module {} is listed more than once", module),
        ))),
        None => Ok(()),
    }
}

/// Role names are stored trimmed, so the length rule applies to the trimmed
/// text.
fn validate_role_name(name: &str) -> Result<(), ValidationError> {
    let length = name.trim().chars().count();
    if (1..=100).contains(&length) {
        return Ok(());
    }
    Err(ValidationError::new("length")
        .with_message(Cow::Borrowed("Name must be between 1 and 100 characters")))
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateRoleDto {
    #[validate(custom(function = "validate_role_name"))]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "validate_unique_modules"))]
    pub permissions: Vec<ModulePermission>,
}

/// A validated role ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRole {
    pub name: String,
    pub permissions: Vec<ModulePermission>,
}

impl CreateRoleDto {
    /// Converts into a storable role, clearing create/update/delete on any
    /// entry that does not grant read.
    pub fn into_new_role(self) -> NewRole {
        NewRole {
            name: self.name.trim().to_string(),
            permissions: self
                .permissions
                .into_iter()
                .map(|entry| ModulePermission::new(entry.module, entry.permissions.normalized()))
                .collect(),
        }
    }
}
