//! Repository trait definitions for dataset persistence

use unim_types::Error;

use crate::model::Dataset;

/// Repository for the published tariff dataset (a single denormalized
/// snapshot; there is no write path besides replacing the whole document)
pub trait DatasetRepository {
    /// Persist the dataset, replacing any previous snapshot
    fn save(&self, dataset: &Dataset) -> Result<(), Error>;

    /// Retrieve the dataset
    fn load(&self) -> Result<Dataset, Error>;

    /// Whether a published snapshot exists
    fn exists(&self) -> bool;
}
