//! In-memory store.
//!
//! Used when no database is configured and by the test suites. Records are
//! kept in insertion order, which is also the listing order.

use async_trait::async_trait;
use backoffice_models::{
    CreateEmployeeDto, CreateEnterpriseDto, CreateProductDto, Employee, Enterprise, NewRole,
    NewUser, Product, Role, RoleSummary, UpdateEmployeeDto, UpdateEnterpriseDto,
    UpdateProductDto, User, UserChanges, UserWithPassword, UserWithRole,
};
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::{
    DUPLICATE_EMAIL, DUPLICATE_ROLE, DUPLICATE_SKU, EmployeeRepository, EnterpriseRepository,
    MISSING_EMPLOYEE, MISSING_ENTERPRISE, ProductRepository, RoleRepository, UserRepository,
};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<UserWithPassword>,
    roles: Vec<Role>,
    enterprises: Vec<Enterprise>,
    employees: Vec<Employee>,
    products: Vec<Product>,
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.users
            .iter()
            .any(|u| u.user.email == email && Some(u.user.id) != except)
    }

    fn sku_taken(&self, sku: &str, except: Option<Uuid>) -> bool {
        self.products
            .iter()
            .any(|p| p.sku == sku && Some(p.id) != except)
    }

    fn check_enterprise(&self, id: Option<Uuid>) -> Result<(), DbError> {
        match id {
            Some(id) if !self.enterprises.iter().any(|e| e.id == id) => {
                Err(DbError::InvalidReference(MISSING_ENTERPRISE.to_string()))
            }
            _ => Ok(()),
        }
    }

    fn check_employee(&self, id: Option<Uuid>) -> Result<(), DbError> {
        match id {
            Some(id) if !self.employees.iter().any(|e| e.id == id) => {
                Err(DbError::InvalidReference(MISSING_EMPLOYEE.to_string()))
            }
            _ => Ok(()),
        }
    }

    fn user_mut(&mut self, id: Uuid) -> Result<&mut UserWithPassword, DbError> {
        self.users
            .iter_mut()
            .find(|u| u.user.id == id)
            .ok_or(DbError::NotFound("User"))
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserWithPassword>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.user.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.user.id == id)
            .map(|u| u.user.clone()))
    }

    async fn create_user(&self, user: NewUser) -> Result<User, DbError> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&user.email, None) {
            return Err(DbError::Conflict(DUPLICATE_EMAIL.to_string()));
        }

        let now = Utc::now();
        let created = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            role_id: user.role_id,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(UserWithPassword {
            user: created.clone(),
            password_hash: user.password_hash,
        });
        Ok(created)
    }

    async fn update_user(&self, id: Uuid, changes: UserChanges) -> Result<User, DbError> {
        let mut tables = self.tables.write().await;
        if let Some(email) = &changes.email {
            if tables.email_taken(email, Some(id)) {
                return Err(DbError::Conflict(DUPLICATE_EMAIL.to_string()));
            }
        }

        let stored = tables.user_mut(id)?;
        if let Some(name) = changes.name {
            stored.user.name = name;
        }
        if let Some(email) = changes.email {
            stored.user.email = email;
        }
        if let Some(hash) = changes.password_hash {
            stored.password_hash = hash;
        }
        if let Some(role_id) = changes.role_id {
            stored.user.role_id = Some(role_id);
        }
        stored.user.updated_at = Utc::now();
        Ok(stored.user.clone())
    }

    async fn assign_role(&self, id: Uuid, role_id: Option<Uuid>) -> Result<User, DbError> {
        let mut tables = self.tables.write().await;
        let stored = tables.user_mut(id)?;
        stored.user.role_id = role_id;
        stored.user.updated_at = Utc::now();
        Ok(stored.user.clone())
    }

    async fn list_users(&self) -> Result<Vec<UserWithRole>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .map(|u| {
                let role = u
                    .user
                    .role_id
                    .and_then(|role_id| tables.roles.iter().find(|r| r.id == role_id))
                    .map(RoleSummary::from);
                UserWithRole::new(u.user.clone(), role)
            })
            .collect())
    }
}

#[async_trait]
impl RoleRepository for MemoryStore {
    async fn find_role_by_id(&self, id: Uuid) -> Result<Option<Role>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables.roles.iter().find(|r| r.id == id).cloned())
    }

    async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables.roles.iter().find(|r| r.name == name).cloned())
    }

    async fn create_role(&self, role: NewRole) -> Result<Role, DbError> {
        let mut tables = self.tables.write().await;
        if tables.roles.iter().any(|r| r.name == role.name) {
            return Err(DbError::Conflict(DUPLICATE_ROLE.to_string()));
        }

        let created = Role {
            id: Uuid::new_v4(),
            name: role.name,
            permissions: role.permissions,
            created_at: Utc::now(),
        };
        tables.roles.push(created.clone());
        Ok(created)
    }

    async fn list_roles(&self) -> Result<Vec<Role>, DbError> {
        Ok(self.tables.read().await.roles.clone())
    }
}

#[async_trait]
impl EnterpriseRepository for MemoryStore {
    async fn create_enterprise(&self, dto: CreateEnterpriseDto) -> Result<Enterprise, DbError> {
        let enterprise = Enterprise {
            id: Uuid::new_v4(),
            name: dto.name,
            location: dto.location,
            contact_info: dto.contact_info,
            created_at: Utc::now(),
        };
        self.tables.write().await.enterprises.push(enterprise.clone());
        Ok(enterprise)
    }

    async fn list_enterprises(&self) -> Result<Vec<Enterprise>, DbError> {
        Ok(self.tables.read().await.enterprises.clone())
    }

    async fn update_enterprise(
        &self,
        id: Uuid,
        dto: UpdateEnterpriseDto,
    ) -> Result<Enterprise, DbError> {
        let mut tables = self.tables.write().await;
        let enterprise = tables
            .enterprises
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(DbError::NotFound("Enterprise"))?;
        enterprise.apply(dto);
        Ok(enterprise.clone())
    }

    async fn delete_enterprise(&self, id: Uuid) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;
        let before = tables.enterprises.len();
        tables.enterprises.retain(|e| e.id != id);
        if tables.enterprises.len() == before {
            return Err(DbError::NotFound("Enterprise"));
        }

        for employee in tables.employees.iter_mut() {
            if employee.enterprise_id == Some(id) {
                employee.enterprise_id = None;
            }
        }
        for product in tables.products.iter_mut() {
            if product.enterprise_id == Some(id) {
                product.enterprise_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl EmployeeRepository for MemoryStore {
    async fn create_employee(&self, dto: CreateEmployeeDto) -> Result<Employee, DbError> {
        let mut tables = self.tables.write().await;
        tables.check_enterprise(dto.enterprise_id)?;

        let employee = Employee {
            id: Uuid::new_v4(),
            name: dto.name,
            department: dto.department,
            job_title: dto.job_title,
            salary: dto.salary,
            status: dto.status,
            enterprise_id: dto.enterprise_id,
            created_at: Utc::now(),
        };
        tables.employees.push(employee.clone());
        Ok(employee)
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, DbError> {
        Ok(self.tables.read().await.employees.clone())
    }

    async fn update_employee(
        &self,
        id: Uuid,
        dto: UpdateEmployeeDto,
    ) -> Result<Employee, DbError> {
        let mut tables = self.tables.write().await;
        tables.check_enterprise(dto.enterprise_id)?;

        let employee = tables
            .employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(DbError::NotFound("Employee"))?;
        employee.apply(dto);
        Ok(employee.clone())
    }

    async fn delete_employee(&self, id: Uuid) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;
        let before = tables.employees.len();
        tables.employees.retain(|e| e.id != id);
        if tables.employees.len() == before {
            return Err(DbError::NotFound("Employee"));
        }

        for product in tables.products.iter_mut() {
            if product.employee_id == Some(id) {
                product.employee_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn create_product(&self, dto: CreateProductDto) -> Result<Product, DbError> {
        let mut tables = self.tables.write().await;
        if tables.sku_taken(&dto.sku, None) {
            return Err(DbError::Conflict(DUPLICATE_SKU.to_string()));
        }
        tables.check_enterprise(dto.enterprise_id)?;
        tables.check_employee(dto.employee_id)?;

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            name: dto.name,
            sku: dto.sku,
            price: dto.price,
            category: dto.category,
            status: dto.status,
            enterprise_id: dto.enterprise_id,
            employee_id: dto.employee_id,
            created_at: now,
            updated_at: now,
        };
        tables.products.push(product.clone());
        Ok(product)
    }

    async fn list_products(&self) -> Result<Vec<Product>, DbError> {
        Ok(self.tables.read().await.products.clone())
    }

    async fn update_product(&self, id: Uuid, dto: UpdateProductDto) -> Result<Product, DbError> {
        let mut tables = self.tables.write().await;
        if let Some(sku) = &dto.sku {
            if tables.sku_taken(sku, Some(id)) {
                return Err(DbError::Conflict(DUPLICATE_SKU.to_string()));
            }
        }
        tables.check_enterprise(dto.enterprise_id)?;
        tables.check_employee(dto.employee_id)?;

        let product = tables
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DbError::NotFound("Product"))?;
        product.apply(dto);
        Ok(product.clone())
    }

    async fn delete_product(&self, id: Uuid) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;
        let before = tables.products.len();
        tables.products.retain(|p| p.id != id);
        if tables.products.len() == before {
            return Err(DbError::NotFound("Product"));
        }
        Ok(())
    }
}
