use backoffice_core::AppError;
use backoffice_db::{EmployeeRepository, Store};
use backoffice_models::{CreateEmployeeDto, Employee, UpdateEmployeeDto};
use tracing::{info, instrument};
use uuid::Uuid;

pub struct EmployeeService;

impl EmployeeService {
    #[instrument(skip(store, dto), fields(enterprise_id = ?dto.enterprise_id))]
    pub async fn create_employee(
        store: &dyn Store,
        dto: CreateEmployeeDto,
    ) -> Result<Employee, AppError> {
        let employee = store.create_employee(dto).await?;
        info!(employee_id = %employee.id, "Employee created");
        Ok(employee)
    }

    #[instrument(skip(store))]
    pub async fn list_employees(store: &dyn Store) -> Result<Vec<Employee>, AppError> {
        Ok(store.list_employees().await?)
    }

    #[instrument(skip(store, dto))]
    pub async fn update_employee(
        store: &dyn Store,
        id: Uuid,
        dto: UpdateEmployeeDto,
    ) -> Result<Employee, AppError> {
        Ok(store.update_employee(id, dto).await?)
    }

    /// Removing the employee also detaches it from its enterprise and
    /// from any products it owned.
    #[instrument(skip(store))]
    pub async fn delete_employee(store: &dyn Store, id: Uuid) -> Result<(), AppError> {
        store.delete_employee(id).await?;
        info!(employee_id = %id, "Employee deleted");
        Ok(())
    }
}
