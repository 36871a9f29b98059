//! Domain layer: tariff rows, the dataset structure, and the query engine

pub mod model;
pub mod repository;
pub mod service;
