use backoffice_core::AppError;
use backoffice_db::{EnterpriseRepository, Store};
use backoffice_models::{CreateEnterpriseDto, Enterprise, UpdateEnterpriseDto};
use tracing::instrument;
use uuid::Uuid;

pub struct EnterpriseService;

impl EnterpriseService {
    #[instrument(skip(store, dto))]
    pub async fn create_enterprise(
        store: &dyn Store,
        dto: CreateEnterpriseDto,
    ) -> Result<Enterprise, AppError> {
        Ok(store.create_enterprise(dto).await?)
    }

    #[instrument(skip(store))]
    pub async fn list_enterprises(store: &dyn Store) -> Result<Vec<Enterprise>, AppError> {
        Ok(store.list_enterprises().await?)
    }

    #[instrument(skip(store, dto))]
    pub async fn update_enterprise(
        store: &dyn Store,
        id: Uuid,
        dto: UpdateEnterpriseDto,
    ) -> Result<Enterprise, AppError> {
        Ok(store.update_enterprise(id, dto).await?)
    }

    /// Deletes the enterprise; its employees and products are detached.
    #[instrument(skip(store))]
    pub async fn delete_enterprise(store: &dyn Store, id: Uuid) -> Result<(), AppError> {
        Ok(store.delete_enterprise(id).await?)
    }
}
