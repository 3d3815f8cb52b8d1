mod audit;
mod factors;
mod narrative;
mod profile;
mod score;
mod weights;

pub use audit::*;
pub use factors::*;
pub use narrative::*;
pub use profile::*;
pub use score::*;
pub use weights::*;
