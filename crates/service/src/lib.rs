//! Service layer for pet listings.
//! - `pet` holds the business rules behind the six HTTP operations.
//! - `storage` holds the document store and blob storage backends.
//! - Collaborators are passed in explicitly; nothing here is a global.

pub mod errors;
pub mod pet;
pub mod storage;
#[cfg(test)]
pub mod test_support;
