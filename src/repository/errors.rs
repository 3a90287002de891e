use thiserror::Error;

/// Outcomes of repository calls other than success.
///
/// `RecordNotFound`, `FilterNil` and `RecordNil` are sentinels: callers branch
/// on them by variant. Everything the database reports ends up in `Storage`,
/// annotated with the operation that failed.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record not found")]
    RecordNotFound,

    #[error("filter is nil")]
    FilterNil,

    #[error("record is nil")]
    RecordNil,

    #[error("{context}, an error occurred")]
    Storage {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl RepositoryError {
    pub fn storage(context: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self::Storage { context, source }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RecordNotFound)
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_keeps_context_and_source() {
        let err = RepositoryError::storage("find cakes")(sqlx::Error::RowNotFound);

        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "find cakes, an error occurred");
        let source = std::error::Error::source(&err).expect("source is kept");
        assert_eq!(source.to_string(), sqlx::Error::RowNotFound.to_string());
    }

    #[test]
    fn only_record_not_found_is_not_found() {
        assert!(RepositoryError::RecordNotFound.is_not_found());
        assert!(!RepositoryError::FilterNil.is_not_found());
        assert!(!RepositoryError::RecordNil.is_not_found());
    }
}
