pub mod error;
pub use error::*;

pub mod provider;
pub mod record;
pub mod resource;

mod wrapper;
