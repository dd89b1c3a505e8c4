use backoffice_core::{AppError, hash_password};
use backoffice_db::{RoleRepository, Store, UserRepository};
use backoffice_models::{
    AssignRoleDto, CreateUserDto, NewUser, UpdateUserDto, User, UserChanges, UserWithRole,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::metrics::{self, Event};

async fn ensure_role_exists(store: &dyn Store, role_id: Option<Uuid>) -> Result<(), AppError> {
    if let Some(role_id) = role_id {
        if store.find_role_by_id(role_id).await?.is_none() {
            return Err(AppError::not_found(anyhow::anyhow!("Role not found")));
        }
    }
    Ok(())
}

pub struct UserService;

impl UserService {
    /// Creates a user with a hashed password.
    #[instrument(skip(store, dto), fields(email = %dto.email))]
    pub async fn create_user(store: &dyn Store, dto: CreateUserDto) -> Result<User, AppError> {
        ensure_role_exists(store, dto.role_id).await?;

        let user = store
            .create_user(NewUser {
                name: dto.name,
                email: dto.email,
                password_hash: hash_password(&dto.password)?,
                role_id: dto.role_id,
            })
            .await?;

        metrics::record(Event::UserCreated);
        info!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Updates the supplied fields. The password is rehashed only when a
    /// non-empty one is supplied; the role is replaced only when supplied.
    #[instrument(skip(store, dto))]
    pub async fn update_user(
        store: &dyn Store,
        id: Uuid,
        dto: UpdateUserDto,
    ) -> Result<User, AppError> {
        ensure_role_exists(store, dto.role_id).await?;

        let password_hash = dto.new_password().map(hash_password).transpose()?;
        let changes = UserChanges {
            name: dto.name,
            email: dto.email,
            password_hash,
            role_id: dto.role_id,
        };

        Ok(store.update_user(id, changes).await?)
    }

    #[instrument(skip(store, dto))]
    pub async fn assign_role(
        store: &dyn Store,
        id: Uuid,
        dto: AssignRoleDto,
    ) -> Result<User, AppError> {
        ensure_role_exists(store, dto.role_id).await?;

        let user = store.assign_role(id, dto.role_id).await?;
        info!(user_id = %id, role_id = ?dto.role_id, "Role assigned");
        Ok(user)
    }

    #[instrument(skip(store))]
    pub async fn list_users(store: &dyn Store) -> Result<Vec<UserWithRole>, AppError> {
        Ok(store.list_users().await?)
    }
}
