use backoffice_core::AppError;
use backoffice_db::{RoleRepository, Store};
use backoffice_models::{CreateRoleDto, Role};
use tracing::{info, instrument};

use crate::metrics::{self, Event};

pub struct RoleService;

impl RoleService {
    /// Stores a role after clearing create/update/delete on every entry
    /// that lacks read. Duplicate modules were already rejected by
    /// validation.
    #[instrument(skip(store, dto), fields(name = %dto.name))]
    pub async fn create_role(store: &dyn Store, dto: CreateRoleDto) -> Result<Role, AppError> {
        let role = store.create_role(dto.into_new_role()).await?;

        metrics::record(Event::RoleCreated);
        info!(role_id = %role.id, entries = role.permissions.len(), "Role created");
        Ok(role)
    }

    #[instrument(skip(store))]
    pub async fn list_roles(store: &dyn Store) -> Result<Vec<Role>, AppError> {
        Ok(store.list_roles().await?)
    }
}
