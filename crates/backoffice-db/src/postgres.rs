//! PostgreSQL store.
//!
//! Queries are checked at runtime (`sqlx::query` + `bind`) so the workspace
//! builds without a live database. Role entries live in a JSONB column.

use async_trait::async_trait;
use backoffice_core::permissions;
use backoffice_models::{
    CreateEmployeeDto, CreateEnterpriseDto, CreateProductDto, Employee, EmployeeStatus,
    Enterprise, NewRole, NewUser, Product, ProductStatus, Role, RoleSummary, UpdateEmployeeDto,
    UpdateEnterpriseDto, UpdateProductDto, User, UserChanges, UserWithPassword, UserWithRole,
};
use sqlx::migrate::Migrator;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::{
    DUPLICATE_EMAIL, DUPLICATE_ROLE, DUPLICATE_SKU, EmployeeRepository, EnterpriseRepository,
    MISSING_EMPLOYEE, MISSING_ENTERPRISE, ProductRepository, RoleRepository, UserRepository,
};

/// Migrations from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

const USER_COLUMNS: &str = "id, name, email, password_hash, role_id, created_at, updated_at";
const ROLE_COLUMNS: &str = "id, name, permissions, created_at";
const ENTERPRISE_COLUMNS: &str = "id, name, location, contact_info, created_at";
const EMPLOYEE_COLUMNS: &str =
    "id, name, department, job_title, salary, status, enterprise_id, created_at";
const PRODUCT_COLUMNS: &str = "id, name, sku, price, category, status, enterprise_id, employee_id, created_at, updated_at";

/// Connects a PostgreSQL pool.
///
/// # Errors
///
/// Returns [`DbError::Database`] if the connection cannot be established.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, DbError> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .map_err(DbError::from)
}

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects and applies pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self, DbError> {
        let pool = init_db_pool(database_url).await?;
        MIGRATOR
            .run(&pool)
            .await
            .map_err(|e| DbError::Database(format!("migration failed: {}", e)))?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> DbError {
    if let sqlx::Error::Database(db_err) = &err {
        let constraint = db_err.constraint().unwrap_or_default();
        match db_err.code().as_deref() {
            Some("23505") => {
                let message = match constraint {
                    "users_email_key" => DUPLICATE_EMAIL,
                    "products_sku_key" => DUPLICATE_SKU,
                    "roles_name_key" => DUPLICATE_ROLE,
                    _ => "Record already exists.",
                };
                return DbError::Conflict(message.to_string());
            }
            Some("23503") => {
                let message = match constraint {
                    "products_employee_id_fkey" => MISSING_EMPLOYEE,
                    _ => MISSING_ENTERPRISE,
                };
                return DbError::InvalidReference(message.to_string());
            }
            _ => {}
        }
    }
    DbError::Database(format!("{}: {}", operation, err))
}

fn decode_error(message: String) -> sqlx::Error {
    sqlx::Error::Decode(message.into())
}

fn user_from_row(row: &PgRow) -> Result<UserWithPassword, sqlx::Error> {
    Ok(UserWithPassword {
        user: User {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            role_id: row.try_get("role_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        },
        password_hash: row.try_get("password_hash")?,
    })
}

fn role_from_row(row: &PgRow) -> Result<Role, sqlx::Error> {
    let Json(stored): Json<Vec<serde_json::Value>> = row.try_get("permissions")?;
    Ok(Role {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        permissions: permissions::entries_from_stored(stored),
        created_at: row.try_get("created_at")?,
    })
}

fn enterprise_from_row(row: &PgRow) -> Result<Enterprise, sqlx::Error> {
    Ok(Enterprise {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        location: row.try_get("location")?,
        contact_info: row.try_get("contact_info")?,
        created_at: row.try_get("created_at")?,
    })
}

fn employee_from_row(row: &PgRow) -> Result<Employee, sqlx::Error> {
    let status: String = row.try_get("status")?;
    Ok(Employee {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        department: row.try_get("department")?,
        job_title: row.try_get("job_title")?,
        salary: row.try_get("salary")?,
        status: status.parse::<EmployeeStatus>().map_err(decode_error)?,
        enterprise_id: row.try_get("enterprise_id")?,
        created_at: row.try_get("created_at")?,
    })
}

fn product_from_row(row: &PgRow) -> Result<Product, sqlx::Error> {
    let status: String = row.try_get("status")?;
    Ok(Product {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        sku: row.try_get("sku")?,
        price: row.try_get("price")?,
        category: row.try_get("category")?,
        status: status.parse::<ProductStatus>().map_err(decode_error)?,
        enterprise_id: row.try_get("enterprise_id")?,
        employee_id: row.try_get("employee_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl UserRepository for PgStore {
    #[instrument(skip(self))]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserWithPassword>, DbError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_user_by_email", e))?;

        row.as_ref().map(user_from_row).transpose().map_err(DbError::from)
    }

    #[instrument(skip(self))]
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, DbError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_user_by_id", e))?;

        Ok(row
            .as_ref()
            .map(user_from_row)
            .transpose()?
            .map(|stored| stored.user))
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create_user(&self, user: NewUser) -> Result<User, DbError> {
        let row = sqlx::query(&format!(
            "INSERT INTO users (id, name, email, password_hash, role_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {USER_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_user", e))?;

        Ok(user_from_row(&row)?.user)
    }

    #[instrument(skip(self, changes))]
    async fn update_user(&self, id: Uuid, changes: UserChanges) -> Result<User, DbError> {
        let row = sqlx::query(&format!(
            "UPDATE users SET \
                name = COALESCE($2, name), \
                email = COALESCE($3, email), \
                password_hash = COALESCE($4, password_hash), \
                role_id = COALESCE($5, role_id), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(changes.name)
        .bind(changes.email)
        .bind(changes.password_hash)
        .bind(changes.role_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_user", e))?
        .ok_or(DbError::NotFound("User"))?;

        Ok(user_from_row(&row)?.user)
    }

    #[instrument(skip(self))]
    async fn assign_role(&self, id: Uuid, role_id: Option<Uuid>) -> Result<User, DbError> {
        let row = sqlx::query(&format!(
            "UPDATE users SET role_id = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(role_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("assign_role", e))?
        .ok_or(DbError::NotFound("User"))?;

        Ok(user_from_row(&row)?.user)
    }

    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<UserWithRole>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT u.id, u.name, u.email, u.password_hash, u.role_id, u.created_at, u.updated_at,
                   r.id AS joined_role_id, r.name AS role_name
            FROM users u
            LEFT JOIN roles r ON r.id = u.role_id
            ORDER BY u.created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_users", e))?;

        let mut users = Vec::with_capacity(rows.len());
        for row in &rows {
            let stored = user_from_row(row)?;
            let role_id: Option<Uuid> = row.try_get("joined_role_id")?;
            let role_name: Option<String> = row.try_get("role_name")?;
            let role = role_id
                .zip(role_name)
                .map(|(id, name)| RoleSummary { id, name });
            users.push(UserWithRole::new(stored.user, role));
        }
        Ok(users)
    }
}

#[async_trait]
impl RoleRepository for PgStore {
    #[instrument(skip(self))]
    async fn find_role_by_id(&self, id: Uuid) -> Result<Option<Role>, DbError> {
        let row = sqlx::query(&format!("SELECT {ROLE_COLUMNS} FROM roles WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_role_by_id", e))?;

        row.as_ref().map(role_from_row).transpose().map_err(DbError::from)
    }

    #[instrument(skip(self))]
    async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>, DbError> {
        let row = sqlx::query(&format!("SELECT {ROLE_COLUMNS} FROM roles WHERE name = $1"))
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_role_by_name", e))?;

        row.as_ref().map(role_from_row).transpose().map_err(DbError::from)
    }

    #[instrument(skip(self, role), fields(name = %role.name))]
    async fn create_role(&self, role: NewRole) -> Result<Role, DbError> {
        let row = sqlx::query(&format!(
            "INSERT INTO roles (id, name, permissions) VALUES ($1, $2, $3) RETURNING {ROLE_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&role.name)
        .bind(Json(&role.permissions))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_role", e))?;

        Ok(role_from_row(&row)?)
    }

    #[instrument(skip(self))]
    async fn list_roles(&self) -> Result<Vec<Role>, DbError> {
        let rows = sqlx::query(&format!(
            "SELECT {ROLE_COLUMNS} FROM roles ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_roles", e))?;

        rows.iter()
            .map(role_from_row)
            .collect::<Result<_, _>>()
            .map_err(DbError::from)
    }
}

#[async_trait]
impl EnterpriseRepository for PgStore {
    #[instrument(skip(self, dto))]
    async fn create_enterprise(&self, dto: CreateEnterpriseDto) -> Result<Enterprise, DbError> {
        let row = sqlx::query(&format!(
            "INSERT INTO enterprises (id, name, location, contact_info) \
             VALUES ($1, $2, $3, $4) RETURNING {ENTERPRISE_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(dto.name)
        .bind(dto.location)
        .bind(dto.contact_info)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_enterprise", e))?;

        Ok(enterprise_from_row(&row)?)
    }

    #[instrument(skip(self))]
    async fn list_enterprises(&self) -> Result<Vec<Enterprise>, DbError> {
        let rows = sqlx::query(&format!(
            "SELECT {ENTERPRISE_COLUMNS} FROM enterprises ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_enterprises", e))?;

        rows.iter()
            .map(enterprise_from_row)
            .collect::<Result<_, _>>()
            .map_err(DbError::from)
    }

    #[instrument(skip(self, dto))]
    async fn update_enterprise(
        &self,
        id: Uuid,
        dto: UpdateEnterpriseDto,
    ) -> Result<Enterprise, DbError> {
        let row = sqlx::query(&format!(
            "UPDATE enterprises SET \
                name = COALESCE($2, name), \
                location = COALESCE($3, location), \
                contact_info = COALESCE($4, contact_info) \
             WHERE id = $1 RETURNING {ENTERPRISE_COLUMNS}"
        ))
        .bind(id)
        .bind(dto.name)
        .bind(dto.location)
        .bind(dto.contact_info)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_enterprise", e))?
        .ok_or(DbError::NotFound("Enterprise"))?;

        Ok(enterprise_from_row(&row)?)
    }

    #[instrument(skip(self))]
    async fn delete_enterprise(&self, id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM enterprises WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_enterprise", e))?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound("Enterprise"));
        }
        Ok(())
    }
}

#[async_trait]
impl EmployeeRepository for PgStore {
    #[instrument(skip(self, dto))]
    async fn create_employee(&self, dto: CreateEmployeeDto) -> Result<Employee, DbError> {
        let row = sqlx::query(&format!(
            "INSERT INTO employees (id, name, department, job_title, salary, status, enterprise_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {EMPLOYEE_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(dto.name)
        .bind(dto.department)
        .bind(dto.job_title)
        .bind(dto.salary)
        .bind(dto.status.as_str())
        .bind(dto.enterprise_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_employee", e))?;

        Ok(employee_from_row(&row)?)
    }

    #[instrument(skip(self))]
    async fn list_employees(&self) -> Result<Vec<Employee>, DbError> {
        let rows = sqlx::query(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_employees", e))?;

        rows.iter()
            .map(employee_from_row)
            .collect::<Result<_, _>>()
            .map_err(DbError::from)
    }

    #[instrument(skip(self, dto))]
    async fn update_employee(
        &self,
        id: Uuid,
        dto: UpdateEmployeeDto,
    ) -> Result<Employee, DbError> {
        let row = sqlx::query(&format!(
            "UPDATE employees SET \
                name = COALESCE($2, name), \
                department = COALESCE($3, department), \
                job_title = COALESCE($4, job_title), \
                salary = COALESCE($5, salary), \
                status = COALESCE($6, status), \
                enterprise_id = COALESCE($7, enterprise_id) \
             WHERE id = $1 RETURNING {EMPLOYEE_COLUMNS}"
        ))
        .bind(id)
        .bind(dto.name)
        .bind(dto.department)
        .bind(dto.job_title)
        .bind(dto.salary)
        .bind(dto.status.map(EmployeeStatus::as_str))
        .bind(dto.enterprise_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_employee", e))?
        .ok_or(DbError::NotFound("Employee"))?;

        Ok(employee_from_row(&row)?)
    }

    #[instrument(skip(self))]
    async fn delete_employee(&self, id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_employee", e))?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound("Employee"));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for PgStore {
    #[instrument(skip(self, dto), fields(sku = %dto.sku))]
    async fn create_product(&self, dto: CreateProductDto) -> Result<Product, DbError> {
        let row = sqlx::query(&format!(
            "INSERT INTO products (id, name, sku, price, category, status, enterprise_id, employee_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(dto.name)
        .bind(dto.sku)
        .bind(dto.price)
        .bind(dto.category)
        .bind(dto.status.as_str())
        .bind(dto.enterprise_id)
        .bind(dto.employee_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_product", e))?;

        Ok(product_from_row(&row)?)
    }

    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, DbError> {
        let rows = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_products", e))?;

        rows.iter()
            .map(product_from_row)
            .collect::<Result<_, _>>()
            .map_err(DbError::from)
    }

    #[instrument(skip(self, dto))]
    async fn update_product(&self, id: Uuid, dto: UpdateProductDto) -> Result<Product, DbError> {
        let row = sqlx::query(&format!(
            "UPDATE products SET \
                name = COALESCE($2, name), \
                sku = COALESCE($3, sku), \
                price = COALESCE($4, price), \
                category = COALESCE($5, category), \
                status = COALESCE($6, status), \
                enterprise_id = COALESCE($7, enterprise_id), \
                employee_id = COALESCE($8, employee_id), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .bind(dto.name)
        .bind(dto.sku)
        .bind(dto.price)
        .bind(dto.category)
        .bind(dto.status.map(ProductStatus::as_str))
        .bind(dto.enterprise_id)
        .bind(dto.employee_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_product", e))?
        .ok_or(DbError::NotFound("Product"))?;

        Ok(product_from_row(&row)?)
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_product", e))?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound("Product"));
        }
        Ok(())
    }
}
