//! Domain services

mod query_engine;

pub use query_engine::{query, QueryResult, QueryRow, QueryState, PAGE_SIZE};
