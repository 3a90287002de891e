use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::{FromRow, PgPool};

use super::errors::{RepositoryError, RepositoryResult};
use super::query::{contains, QueryBuilder};
use super::CakeRepository;
use crate::models::{Cake, CakeFilter};

const SELECT_CAKES: &str =
    "SELECT id, title, description, rating, image, created_at, updated_at FROM cakes";

#[derive(Clone)]
pub struct PgCakeRepository {
    pool: PgPool,
}

impl PgCakeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn filter_clause(filter: &CakeFilter) -> (String, Vec<String>) {
        let mut q = QueryBuilder::new();
        if filter.has_title() {
            q.and_where("title ILIKE ?", [contains(&filter.title)]);
        }
        if filter.has_description() {
            q.and_where("description ILIKE ?", [contains(&filter.description)]);
        }
        q.build()
    }
}

#[async_trait]
impl CakeRepository for PgCakeRepository {
    async fn find(&self, id: i64) -> RepositoryResult<Cake> {
        if id <= 0 {
            return Err(RepositoryError::RecordNotFound);
        }

        let query = format!("{} WHERE id = $1 LIMIT 1", SELECT_CAKES);
        tracing::debug!(%query, id, "find cake");

        let cake = sqlx::query_as::<_, Cake>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::storage("find cake by id"))?;

        cake.filter(Cake::is_persisted)
            .ok_or(RepositoryError::RecordNotFound)
    }

    async fn find_all(&self, filter: Option<CakeFilter>) -> RepositoryResult<Vec<Cake>> {
        let filter = filter.ok_or(RepositoryError::FilterNil)?;

        let (clause, args) = Self::filter_clause(&filter);
        let query = if clause.is_empty() {
            format!("{} ORDER BY title ASC, rating ASC", SELECT_CAKES)
        } else {
            format!("{} {} ORDER BY title ASC, rating ASC", SELECT_CAKES, clause)
        };
        tracing::debug!(%query, "find cakes");

        let mut stmt = sqlx::query(&query);
        for arg in args {
            stmt = stmt.bind(arg);
        }

        // Rows land in a local buffer that only escapes once every row mapped.
        let mut rows = stmt.fetch(&self.pool);
        let mut cakes = Vec::new();
        while let Some(row) = rows
            .try_next()
            .await
            .map_err(RepositoryError::storage("find cakes"))?
        {
            let cake = Cake::from_row(&row).map_err(RepositoryError::storage("find cakes"))?;
            cakes.push(cake);
        }

        if cakes.is_empty() {
            return Err(RepositoryError::RecordNotFound);
        }
        Ok(cakes)
    }

    async fn insert(&self, record: Option<Cake>) -> RepositoryResult<Cake> {
        let mut record = record.ok_or(RepositoryError::RecordNil)?;

        let query = "INSERT INTO cakes (title, description, rating, image, created_at, updated_at) \
                     VALUES ($1, $2, $3, $4, $5, $6) RETURNING id";
        tracing::debug!(%query, "insert cake");

        let id: i64 = sqlx::query_scalar(query)
            .bind(&record.title)
            .bind(&record.description)
            .bind(record.rating)
            .bind(&record.image)
            .bind(record.created_at)
            .bind(record.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::storage("insert cake"))?;

        record.id = id;
        Ok(record)
    }

    async fn update(&self, record: Option<Cake>) -> RepositoryResult<()> {
        let record = record.ok_or(RepositoryError::RecordNil)?;
        if record.id <= 0 {
            return Err(RepositoryError::RecordNotFound);
        }

        let query = "UPDATE cakes SET title = $1, description = $2, rating = $3, image = $4, updated_at = $5 \
                     WHERE id = $6";
        tracing::debug!(%query, id = record.id, "update cake");

        sqlx::query(query)
            .bind(&record.title)
            .bind(&record.description)
            .bind(record.rating)
            .bind(&record.image)
            .bind(record.updated_at)
            .bind(record.id)
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::storage("update cake"))?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        if id <= 0 {
            return Err(RepositoryError::RecordNotFound);
        }

        let query = "DELETE FROM cakes WHERE id = $1";
        tracing::debug!(%query, id, "delete cake");

        sqlx::query(query)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::storage("delete cake"))?;

        Ok(())
    }
}
