//! # Backoffice Models
//!
//! Domain models and DTOs for the Backoffice API, including stored entities,
//! request/response bodies, and validation rules.
//!
//! # Modules
//!
//! - [`auth`]: Login request/response
//! - [`roles`]: Roles, role creation, and the resolved role attached to requests
//! - [`users`]: Users and user administration DTOs
//! - [`enterprises`]: Enterprise records
//! - [`employees`]: Employee records
//! - [`products`]: Product records

pub mod auth;
pub mod employees;
pub mod enterprises;
pub mod products;
pub mod roles;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{LoginRequest, LoginResponse, LoginUser, MessageResponse};
pub use employees::{CreateEmployeeDto, Employee, EmployeeStatus, UpdateEmployeeDto};
pub use enterprises::{CreateEnterpriseDto, Enterprise, UpdateEnterpriseDto};
pub use products::{CreateProductDto, Product, ProductStatus, UpdateProductDto};
pub use roles::{CreateRoleDto, NewRole, Role, RoleGrant, RoleSummary};
pub use users::{
    AssignRoleDto, CreateUserDto, NewUser, UpdateUserDto, User, UserChanges, UserWithPassword,
    UserWithRole,
};
