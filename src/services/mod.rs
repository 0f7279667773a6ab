//! Service layer: controller mutations, AI orchestration, persistence, export.

pub mod export;
pub mod generate;
pub mod persistence;
pub mod studio;
