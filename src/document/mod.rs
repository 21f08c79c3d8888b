pub mod kind;
pub mod model;

pub use kind::*;
pub use model::*;
