//! File-based implementation of DatasetRepository
//!
//! The dataset is published as a single db.json document with the shape
//! `{"편도": {...}, "왕복": {...}}`, written compact like the original
//! conversion script.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use unim_domain::model::Dataset;
use unim_domain::repository::DatasetRepository;
use unim_types::{Error, Result};

/// Dataset repository over a single JSON document on disk
pub struct FileDatasetRepository {
    db_path: PathBuf,
}

impl FileDatasetRepository {
    pub fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    pub fn db_path(&self) -> &PathBuf {
        &self.db_path
    }
}

impl DatasetRepository for FileDatasetRepository {
    fn save(&self, dataset: &Dataset) -> std::result::Result<(), Error> {
        if let Some(parent) = self.db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.db_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer(writer, dataset)?;
        Ok(())
    }

    fn load(&self) -> std::result::Result<Dataset, Error> {
        if !self.db_path.exists() {
            return Err(Error::DatasetNotFound(self.db_path.display().to_string()));
        }
        let file = File::open(&self.db_path)?;
        let reader = BufReader::new(file);
        let dataset = serde_json::from_reader(reader)?;
        Ok(dataset)
    }

    fn exists(&self) -> bool {
        self.db_path.exists()
    }
}
