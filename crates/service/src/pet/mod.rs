//! Pet listings: the Document Store seam (`repository`) and the business
//! rules applied on top of it (`service`).

pub mod repository;
pub mod service;

pub use repository::{PetRepository, SeaOrmPetRepository};
pub use service::{ImageUpload, PetService};
