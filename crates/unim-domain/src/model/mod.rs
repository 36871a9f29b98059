//! Domain model

mod dataset;
mod tariff_row;

pub use dataset::{Dataset, OriginMap};
pub use tariff_row::TariffRow;
