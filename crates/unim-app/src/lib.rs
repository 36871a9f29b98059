//! Application service layer for unim-checker

pub mod app;
pub mod config;
pub mod repository;
