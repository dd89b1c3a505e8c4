//! Employee models and DTOs.

use std::fmt;
use std::str::FromStr;

use backoffice_core::serde::deserialize_optional_uuid;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
}

impl EmployeeStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            EmployeeStatus::Active => "Active",
            EmployeeStatus::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployeeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(EmployeeStatus::Active),
            "Inactive" => Ok(EmployeeStatus::Inactive),
            other => Err(format!("Unknown employee status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub department: Option<String>,
    pub job_title: Option<String>,
    pub salary: Option<f64>,
    pub status: EmployeeStatus,
    /// Owning enterprise. Cleared when the enterprise is deleted.
    pub enterprise_id: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEmployeeDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub department: Option<String>,
    #[serde(alias = "role")]
    pub job_title: Option<String>,
    #[validate(range(min = 0.0, message = "Salary cannot be negative"))]
    pub salary: Option<f64>,
    #[serde(default)]
    pub status: EmployeeStatus,
    #[serde(default, alias = "enterprise", deserialize_with = "deserialize_optional_uuid")]
    pub enterprise_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEmployeeDto {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub department: Option<String>,
    #[serde(alias = "role")]
    pub job_title: Option<String>,
    #[validate(range(min = 0.0, message = "Salary cannot be negative"))]
    pub salary: Option<f64>,
    pub status: Option<EmployeeStatus>,
    #[serde(default, alias = "enterprise", deserialize_with = "deserialize_optional_uuid")]
    pub enterprise_id: Option<Uuid>,
}

impl Employee {
    pub fn apply(&mut self, changes: UpdateEmployeeDto) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(department) = changes.department {
            self.department = Some(department);
        }
        if let Some(job_title) = changes.job_title {
            self.job_title = Some(job_title);
        }
        if let Some(salary) = changes.salary {
            self.salary = Some(salary);
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(enterprise_id) = changes.enterprise_id {
            self.enterprise_id = Some(enterprise_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_employee_defaults() {
        let dto: CreateEmployeeDto =
            serde_json::from_str(r#"{"name":"Grace","role":"Engineer","enterprise":""}"#).unwrap();
        assert!(dto.validate().is_ok());
        assert_eq!(dto.status, EmployeeStatus::Active);
        assert_eq!(dto.job_title.as_deref(), Some("Engineer"));
        assert!(dto.enterprise_id.is_none());
    }

    #[test]
    fn test_negative_salary_rejected() {
        let dto: CreateEmployeeDto =
            serde_json::from_str(r#"{"name":"Grace","salary":-1.0}"#).unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!(serde_json::from_str::<CreateEmployeeDto>(r#"{"name":"Grace","status":"Retired"}"#)
            .is_err());
        assert_eq!("Inactive".parse::<EmployeeStatus>(), Ok(EmployeeStatus::Inactive));
    }
}
