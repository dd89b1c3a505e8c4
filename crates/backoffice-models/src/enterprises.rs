//! Enterprise models and DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Enterprise {
    pub id: Uuid,
    pub name: String,
    pub location: Option<String>,
    pub contact_info: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEnterpriseDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub location: Option<String>,
    #[serde(alias = "contactInfo")]
    pub contact_info: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEnterpriseDto {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub location: Option<String>,
    #[serde(alias = "contactInfo")]
    pub contact_info: Option<String>,
}

impl Enterprise {
    pub fn apply(&mut self, changes: UpdateEnterpriseDto) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(location) = changes.location {
            self.location = Some(location);
        }
        if let Some(contact_info) = changes.contact_info {
            self.contact_info = Some(contact_info);
        }
    }
}
