//! JWT claim structure for session credentials.

use backoffice_core::PermissionMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims embedded in a session credential.
///
/// - `sub`: User ID (subject)
/// - `role`: Name of the user's role, if any
/// - `permissions`: Flattened module permission map derived from the role
/// - `exp`/`iat`: Expiry and issue timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// Role name at the time of issue
    pub role: Option<String>,
    /// Permission snapshot at the time of issue
    #[serde(default)]
    pub permissions: PermissionMap,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoffice_core::{Module, ModulePermission, PermissionSet};

    #[test]
    fn test_claims_serialize() {
        let claims = Claims {
            sub: "user-id-123".to_string(),
            role: Some("Manager".to_string()),
            permissions: PermissionMap::from_entries(&[ModulePermission::new(
                Module::Products,
                PermissionSet::read_only(),
            )]),
            exp: 1234567890,
            iat: 1234567800,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""sub":"user-id-123""#));
        assert!(serialized.contains(r#""role":"Manager""#));
        assert!(serialized.contains(r#""Products":{"read":true"#));
    }

    #[test]
    fn test_claims_deserialize_without_permissions() {
        let json = r#"{"sub":"user-id-456","role":null,"exp":9999999999,"iat":9999999900}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.sub, "user-id-456");
        assert!(claims.role.is_none());
        assert!(claims.permissions.is_empty());
    }
}
