//! Persistence implementations

mod file_dataset_repo;

pub use file_dataset_repo::FileDatasetRepository;
