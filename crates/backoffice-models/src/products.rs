//! Product models and DTOs.
//!
//! Every product is owned by an enterprise, an employee, or both.

use std::fmt;
use std::str::FromStr;

use backoffice_core::serde::deserialize_optional_uuid;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Active,
    Inactive,
}

impl ProductStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            ProductStatus::Active => "active",
            ProductStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ProductStatus::Active),
            "inactive" => Ok(ProductStatus::Inactive),
            other => Err(format!("Unknown product status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub category: Option<String>,
    pub status: ProductStatus,
    pub enterprise_id: Option<Uuid>,
    pub employee_id: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProductDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "SKU is required"))]
    pub sku: String,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,
    pub category: Option<String>,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default, alias = "enterprise", deserialize_with = "deserialize_optional_uuid")]
    pub enterprise_id: Option<Uuid>,
    #[serde(default, alias = "employee", deserialize_with = "deserialize_optional_uuid")]
    pub employee_id: Option<Uuid>,
}

impl CreateProductDto {
    pub fn has_owner(&self) -> bool {
        self.enterprise_id.is_some() || self.employee_id.is_some()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProductDto {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "SKU cannot be empty"))]
    pub sku: Option<String>,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,
    pub category: Option<String>,
    pub status: Option<ProductStatus>,
    #[serde(default, alias = "enterprise", deserialize_with = "deserialize_optional_uuid")]
    pub enterprise_id: Option<Uuid>,
    #[serde(default, alias = "employee", deserialize_with = "deserialize_optional_uuid")]
    pub employee_id: Option<Uuid>,
}

impl Product {
    pub fn apply(&mut self, changes: UpdateProductDto) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(sku) = changes.sku {
            self.sku = sku;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(category) = changes.category {
            self.category = Some(category);
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(enterprise_id) = changes.enterprise_id {
            self.enterprise_id = Some(enterprise_id);
        }
        if let Some(employee_id) = changes.employee_id {
            self.employee_id = Some(employee_id);
        }
        self.updated_at = chrono::Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_references_are_absent() {
        let dto: CreateProductDto = serde_json::from_str(
            r#"{"name":"Widget","sku":"W-1","price":9.5,"enterprise":"","employee":""}"#,
        )
        .unwrap();
        assert!(!dto.has_owner());
        assert_eq!(dto.status, ProductStatus::Active);
    }

    #[test]
    fn test_either_reference_is_an_owner() {
        let body = format!(
            r#"{{"name":"Widget","sku":"W-1","price":9.5,"employee":"{}"}}"#,
            Uuid::new_v4()
        );
        let dto: CreateProductDto = serde_json::from_str(&body).unwrap();
        assert!(dto.has_owner());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_status_is_lowercase_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&ProductStatus::Inactive).unwrap(),
            r#""inactive""#
        );
        assert!(serde_json::from_str::<ProductStatus>(r#""Active""#).is_err());
    }
}
