//! User domain models and DTOs.
//!
//! Passwords only ever leave this module as bcrypt hashes: [`NewUser`] and
//! [`UserChanges`] carry the hash, never the plain text.

use backoffice_core::serde::deserialize_optional_uuid;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::roles::RoleSummary;

/// A back-office user. The role is a weak reference and may dangle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role_id: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// A user together with the stored password hash. Never serialized.
#[derive(Debug, Clone)]
pub struct UserWithPassword {
    pub user: User,
    pub password_hash: String,
}

/// User listing entry with the role resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserWithRole {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Option<RoleSummary>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl UserWithRole {
    pub fn new(user: User, role: Option<RoleSummary>) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    /// Role to assign. Empty or missing means no role.
    #[serde(default, alias = "role", deserialize_with = "deserialize_optional_uuid")]
    pub role_id: Option<Uuid>,
}

/// Partial user update. Absent fields are left untouched; an empty password
/// is treated as absent.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(default, alias = "role", deserialize_with = "deserialize_optional_uuid")]
    pub role_id: Option<Uuid>,
}

impl UpdateUserDto {
    /// The new plain-text password, if one was supplied.
    pub fn new_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AssignRoleDto {
    /// Role to assign, or `null` to clear the user's role.
    #[serde(default, alias = "roleId", deserialize_with = "deserialize_optional_uuid")]
    pub role_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_dto_validation() {
        let dto: CreateUserDto = serde_json::from_str(
            r#"{"name":"Ada","email":"ada@example.com","password":"secret1"}"#,
        )
        .unwrap();
        assert!(dto.validate().is_ok());
        assert!(dto.role_id.is_none());

        let bad_email: CreateUserDto = serde_json::from_str(
            r#"{"name":"Ada","email":"not-an-email","password":"secret1"}"#,
        )
        .unwrap();
        assert!(bad_email.validate().is_err());

        let short_password: CreateUserDto =
            serde_json::from_str(r#"{"name":"Ada","email":"ada@example.com","password":"abc"}"#)
                .unwrap();
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_create_user_dto_accepts_role_alias() {
        let role_id = Uuid::new_v4();
        let body = format!(
            r#"{{"name":"Ada","email":"ada@example.com","password":"secret1","role":"{}"}}"#,
            role_id
        );
        let dto: CreateUserDto = serde_json::from_str(&body).unwrap();
        assert_eq!(dto.role_id, Some(role_id));

        let empty: CreateUserDto = serde_json::from_str(
            r#"{"name":"Ada","email":"ada@example.com","password":"secret1","role":""}"#,
        )
        .unwrap();
        assert!(empty.role_id.is_none());
    }

    #[test]
    fn test_update_user_empty_password_is_absent() {
        let dto: UpdateUserDto = serde_json::from_str(r#"{"name":"Ada","password":""}"#).unwrap();
        assert!(dto.new_password().is_none());

        let dto: UpdateUserDto = serde_json::from_str(r#"{"password":"newsecret"}"#).unwrap();
        assert_eq!(dto.new_password(), Some("newsecret"));
    }

    #[test]
    fn test_assign_role_dto_accepts_camel_case() {
        let role_id = Uuid::new_v4();
        let dto: AssignRoleDto =
            serde_json::from_str(&format!(r#"{{"roleId":"{}"}}"#, role_id)).unwrap();
        assert_eq!(dto.role_id, Some(role_id));

        let cleared: AssignRoleDto = serde_json::from_str(r#"{"roleId":null}"#).unwrap();
        assert!(cleared.role_id.is_none());
    }
}
