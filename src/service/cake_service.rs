use chrono::Utc;
use thiserror::Error;

use crate::models::{Cake, CakeFilter, CakeRequest, FindAllRequest};
use crate::repository::{CakeRepository, RepositoryError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request is nil")]
    RequestNil,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Repository(e) if e.is_not_found())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Cake use cases on top of a [`CakeRepository`].
///
/// Mutations check that the target exists before touching it, because the
/// repository's `update` and `delete` do not. The check and the mutation are
/// two separate statements: a concurrent delete in between goes unnoticed.
#[derive(Clone)]
pub struct CakeService<R> {
    repo: R,
}

impl<R: CakeRepository> CakeService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn find(&self, id: i64) -> ServiceResult<Cake> {
        Ok(self.repo.find(id).await?)
    }

    pub async fn find_all(&self, req: Option<&FindAllRequest>) -> ServiceResult<Vec<Cake>> {
        let req = req.ok_or(ServiceError::RequestNil)?;

        let filter = CakeFilter {
            title: req.title.clone(),
            description: req.description.clone(),
        };
        Ok(self.repo.find_all(Some(filter)).await?)
    }

    /// Stores a new cake and writes the generated id back onto `req`.
    pub async fn insert(&self, req: Option<&mut CakeRequest>) -> ServiceResult<()> {
        let req = req.ok_or(ServiceError::RequestNil)?;

        let record = Cake::new(
            req.title.clone(),
            req.description.clone(),
            req.rating,
            req.image.clone(),
        );
        let stored = self.repo.insert(Some(record)).await?;
        req.id = stored.id;
        Ok(())
    }

    pub async fn update(&self, req: Option<&CakeRequest>) -> ServiceResult<()> {
        let req = req.ok_or(ServiceError::RequestNil)?;

        let existing = self.repo.find(req.id).await?;

        // Storage ignores created_at on update.
        let record = Cake {
            id: req.id,
            title: req.title.clone(),
            description: req.description.clone(),
            rating: req.rating,
            image: req.image.clone(),
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        Ok(self.repo.update(Some(record)).await?)
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        self.repo.find(id).await?;
        Ok(self.repo.delete(id).await?)
    }
}
