pub mod config;
pub mod connector;
pub mod contracts;
pub mod env;
pub mod error;
pub mod queries;
pub mod registry;
pub mod types;
pub mod utils;

pub use error::RegistryError;
pub use registry::ArtworkRegistry;
