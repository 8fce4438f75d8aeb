pub mod designer_repo;
pub use designer_repo::{DesignItemStore, DesignerRepository};

#[cfg(test)]
pub mod memory_store;
