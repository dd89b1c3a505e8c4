use backoffice_core::{Action, Module, ModulePermission, PermissionMap, PermissionSet};
use backoffice_models::{
    AssignRoleDto, CreateEmployeeDto, CreateEnterpriseDto, CreateProductDto, CreateRoleDto,
    CreateUserDto, Employee, EmployeeStatus, Enterprise, LoginRequest, LoginResponse, LoginUser,
    MessageResponse, Product, ProductStatus, Role, RoleSummary, UpdateEmployeeDto,
    UpdateEnterpriseDto, UpdateProductDto, UpdateUserDto, User, UserWithRole,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::assign_role,
        crate::modules::roles::controller::create_role,
        crate::modules::roles::controller::get_roles,
        crate::modules::enterprises::controller::create_enterprise,
        crate::modules::enterprises::controller::get_enterprises,
        crate::modules::enterprises::controller::update_enterprise,
        crate::modules::enterprises::controller::delete_enterprise,
        crate::modules::employees::controller::create_employee,
        crate::modules::employees::controller::get_employees,
        crate::modules::employees::controller::update_employee,
        crate::modules::employees::controller::delete_employee,
        crate::modules::products::controller::create_product,
        crate::modules::products::controller::get_products,
        crate::modules::products::controller::update_product,
        crate::modules::products::controller::delete_product,
    ),
    components(
        schemas(
            Module,
            Action,
            PermissionSet,
            ModulePermission,
            PermissionMap,
            LoginRequest,
            LoginResponse,
            LoginUser,
            MessageResponse,
            User,
            UserWithRole,
            RoleSummary,
            CreateUserDto,
            UpdateUserDto,
            AssignRoleDto,
            Role,
            CreateRoleDto,
            Enterprise,
            CreateEnterpriseDto,
            UpdateEnterpriseDto,
            Employee,
            EmployeeStatus,
            CreateEmployeeDto,
            UpdateEmployeeDto,
            Product,
            ProductStatus,
            CreateProductDto,
            UpdateProductDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and session credentials"),
        (name = "Users", description = "User administration"),
        (name = "Roles", description = "Roles and their module permissions"),
        (name = "Enterprises", description = "Enterprise management"),
        (name = "Employees", description = "Employee management"),
        (name = "Products", description = "Product management")
    ),
    info(
        title = "Backoffice API",
        version = "0.1.0",
        description = "Administrative back office with per-module, per-action role permissions.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_gated_routes() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/login",
            "/api/users",
            "/api/users/{id}/role",
            "/api/roles",
            "/api/products/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
