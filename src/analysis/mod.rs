pub mod score;
pub mod stats;

pub use score::*;
pub use stats::*;
