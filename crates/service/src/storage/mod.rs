//! Storage backends for the service layer
//!
//! - `blob_store`: where uploaded images land and how their public path is formed.
//! - `json_pet_store`: file-backed document store for single-node deployments.

pub mod blob_store;
pub mod json_pet_store;
