pub(crate) mod health;
pub mod profiles;
pub mod risk;
pub mod weights;

pub use health::health_check;
