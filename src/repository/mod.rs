pub mod cake_repo;
pub mod errors;
pub mod memory;
pub mod query;

pub use cake_repo::PgCakeRepository;
pub use errors::{RepositoryError, RepositoryResult};
pub use memory::InMemoryCakeRepository;
pub use query::QueryBuilder;

use async_trait::async_trait;

use crate::models::{Cake, CakeFilter};

/// Persistence operations on cakes.
///
/// Implementations own the mapping between [`Cake`] values and storage. They
/// reject invalid input before touching storage and report missing data as
/// [`RepositoryError::RecordNotFound`]. `update` and `delete` are
/// unconditional: they do not check that the row exists.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CakeRepository: Send + Sync {
    /// Looks up a single cake. `id <= 0` is never sent to storage.
    async fn find(&self, id: i64) -> RepositoryResult<Cake>;

    /// Lists cakes matching every active predicate of `filter`, ordered by
    /// title then rating. No match is `RecordNotFound`, never an empty list.
    async fn find_all(&self, filter: Option<CakeFilter>) -> RepositoryResult<Vec<Cake>>;

    /// Stores a new cake and hands it back with the generated `id` set.
    async fn insert(&self, record: Option<Cake>) -> RepositoryResult<Cake>;

    /// Overwrites everything but `id` and `created_at`.
    async fn update(&self, record: Option<Cake>) -> RepositoryResult<()>;

    async fn delete(&self, id: i64) -> RepositoryResult<()>;
}
