//! Query Service - Read Access to the Published Dataset

use thiserror::Error;
use unim_domain::model::Dataset;
use unim_domain::repository::DatasetRepository;
use unim_domain::service::{query, QueryResult, QueryState};
use unim_types::{Error, TripType};

/// Errors specific to the query service
#[derive(Debug, Error)]
pub enum QueryServiceError {
    #[error("Dataset not found: {0} (run `convert` first)")]
    DatasetNotFound(String),

    #[error("Failed to read dataset: {0}")]
    ReadFailed(String),
}

impl From<Error> for QueryServiceError {
    fn from(err: Error) -> Self {
        match err {
            Error::DatasetNotFound(path) => QueryServiceError::DatasetNotFound(path),
            other => QueryServiceError::ReadFailed(other.to_string()),
        }
    }
}

impl From<QueryServiceError> for Error {
    fn from(err: QueryServiceError) -> Self {
        match err {
            QueryServiceError::DatasetNotFound(path) => Error::DatasetNotFound(path),
            QueryServiceError::ReadFailed(m) => Error::QueryFailed(m),
        }
    }
}

/// Load the published dataset
pub fn load_dataset<R: DatasetRepository>(
    repo: &R,
) -> std::result::Result<Dataset, QueryServiceError> {
    Ok(repo.load()?)
}

/// Run a tariff query against the published dataset
pub fn run_query<R: DatasetRepository>(
    repo: &R,
    state: &QueryState,
) -> std::result::Result<QueryResult, QueryServiceError> {
    let dataset = load_dataset(repo)?;
    Ok(query(&dataset, state))
}

/// List origin names available for one trip type, in sheet order
pub fn list_origins<R: DatasetRepository>(
    repo: &R,
    trip_type: TripType,
) -> std::result::Result<Vec<String>, QueryServiceError> {
    let dataset = load_dataset(repo)?;
    Ok(dataset.origin_names(trip_type))
}
