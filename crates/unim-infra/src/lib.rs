//! Infrastructure layer: workbook loading, dataset building, persistence

pub mod builder;
pub mod persistence;
pub mod tariff_xlsx;
pub mod workbook;
