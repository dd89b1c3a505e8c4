use backoffice_core::AppError;
use backoffice_db::{ProductRepository, Store};
use backoffice_models::{CreateProductDto, Product, UpdateProductDto};
use tracing::{info, instrument};
use uuid::Uuid;

pub const MISSING_OWNER: &str =
    "Product must be associated with either an enterprise or an employee.";

pub struct ProductService;

impl ProductService {
    /// Creates a product owned by an enterprise, an employee, or both.
    #[instrument(skip(store, dto), fields(sku = %dto.sku))]
    pub async fn create_product(
        store: &dyn Store,
        dto: CreateProductDto,
    ) -> Result<Product, AppError> {
        if !dto.has_owner() {
            return Err(AppError::bad_request(anyhow::anyhow!(MISSING_OWNER)));
        }

        let product = store.create_product(dto).await?;
        info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    #[instrument(skip(store))]
    pub async fn list_products(store: &dyn Store) -> Result<Vec<Product>, AppError> {
        Ok(store.list_products().await?)
    }

    #[instrument(skip(store, dto))]
    pub async fn update_product(
        store: &dyn Store,
        id: Uuid,
        dto: UpdateProductDto,
    ) -> Result<Product, AppError> {
        Ok(store.update_product(id, dto).await?)
    }

    #[instrument(skip(store))]
    pub async fn delete_product(store: &dyn Store, id: Uuid) -> Result<(), AppError> {
        Ok(store.delete_product(id).await?)
    }
}
