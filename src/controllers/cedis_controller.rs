use sqlx::PgPool;

use crate::dto::cedis_dto::CedisResponse;
use crate::repositories::cedis_repository::CedisRepository;
use crate::utils::errors::AppError;

pub struct CedisController {
    repository: CedisRepository,
}

impl CedisController {
    pub fn new(pool: PgPool) -> Self {
        Self { repository: CedisRepository::new(pool) }
    }

    pub async fn list(&self) -> Result<Vec<CedisResponse>, AppError> {
        let cedis = self.repository.find_all().await?;
        Ok(cedis.into_iter().map(Into::into).collect())
    }
}
