//! Repository adapters for persistence layer

use std::path::PathBuf;

use unim_infra::persistence::FileDatasetRepository;

use crate::config::Config;

/// Open the file-based dataset repository configured in `Config`
pub fn open_dataset_repo(config: &Config) -> FileDatasetRepository {
    FileDatasetRepository::new(config.db_path.clone())
}

/// Open a dataset repository at a custom path
pub fn open_dataset_repo_at(db_path: PathBuf) -> FileDatasetRepository {
    FileDatasetRepository::new(db_path)
}
