//! v1 API Data Transfer Objects.
//!
//! These types define the wire format for the v1 REST API. They are separate
//! from the internal domain models in `src/models/`.

pub mod profiles;
pub mod risk;
pub mod weights;

pub use profiles::*;
pub use risk::*;
pub use weights::*;
