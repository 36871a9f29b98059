//! Application use cases

mod convert_service;
mod query_service;

pub use convert_service::*;
pub use query_service::*;
