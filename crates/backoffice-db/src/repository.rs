//! Storage traits consumed by the HTTP layer.
//!
//! Each resource gets its own repository trait; [`Store`] bundles them so the
//! application state can hold a single `Arc<dyn Store>`.

use async_trait::async_trait;
use backoffice_models::{
    CreateEmployeeDto, CreateEnterpriseDto, CreateProductDto, Employee, Enterprise, NewRole,
    NewUser, Product, Role, UpdateEmployeeDto, UpdateEnterpriseDto, UpdateProductDto, User,
    UserChanges, UserWithPassword, UserWithRole,
};
use uuid::Uuid;

use crate::error::DbError;

pub(crate) const DUPLICATE_EMAIL: &str = "User with this email already exists.";
pub(crate) const DUPLICATE_SKU: &str = "Product with this SKU already exists.";
pub(crate) const DUPLICATE_ROLE: &str = "Role with this name already exists.";
pub(crate) const MISSING_ENTERPRISE: &str = "Referenced enterprise does not exist.";
pub(crate) const MISSING_EMPLOYEE: &str = "Referenced employee does not exist.";

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Looks a user up by exact email, including the password hash.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserWithPassword>, DbError>;

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, DbError>;

    /// Fails with [`DbError::Conflict`] when the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, DbError>;

    /// Applies the supplied fields only.
    async fn update_user(&self, id: Uuid, changes: UserChanges) -> Result<User, DbError>;

    /// Replaces the user's role; `None` clears it.
    async fn assign_role(&self, id: Uuid, role_id: Option<Uuid>) -> Result<User, DbError>;

    async fn list_users(&self) -> Result<Vec<UserWithRole>, DbError>;
}

#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn find_role_by_id(&self, id: Uuid) -> Result<Option<Role>, DbError>;

    async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>, DbError>;

    /// Stores the entries as given; callers normalise them first.
    async fn create_role(&self, role: NewRole) -> Result<Role, DbError>;

    async fn list_roles(&self) -> Result<Vec<Role>, DbError>;
}

#[async_trait]
pub trait EnterpriseRepository: Send + Sync {
    async fn create_enterprise(&self, dto: CreateEnterpriseDto) -> Result<Enterprise, DbError>;
    async fn list_enterprises(&self) -> Result<Vec<Enterprise>, DbError>;
    async fn update_enterprise(
        &self,
        id: Uuid,
        dto: UpdateEnterpriseDto,
    ) -> Result<Enterprise, DbError>;
    /// Employees and products of the enterprise are detached, not deleted.
    async fn delete_enterprise(&self, id: Uuid) -> Result<(), DbError>;
}

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn create_employee(&self, dto: CreateEmployeeDto) -> Result<Employee, DbError>;
    async fn list_employees(&self) -> Result<Vec<Employee>, DbError>;
    async fn update_employee(&self, id: Uuid, dto: UpdateEmployeeDto)
    -> Result<Employee, DbError>;
    /// Products owned by the employee are detached, not deleted.
    async fn delete_employee(&self, id: Uuid) -> Result<(), DbError>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Fails with [`DbError::Conflict`] when the SKU is taken.
    async fn create_product(&self, dto: CreateProductDto) -> Result<Product, DbError>;
    async fn list_products(&self) -> Result<Vec<Product>, DbError>;
    async fn update_product(&self, id: Uuid, dto: UpdateProductDto) -> Result<Product, DbError>;
    async fn delete_product(&self, id: Uuid) -> Result<(), DbError>;
}

/// Everything the server needs from storage.
pub trait Store:
    UserRepository + RoleRepository + EnterpriseRepository + EmployeeRepository + ProductRepository
{
}

impl<T> Store for T where
    T: UserRepository
        + RoleRepository
        + EnterpriseRepository
        + EmployeeRepository
        + ProductRepository
{
}
