//! Data models

pub mod alert;
pub mod score;

pub use alert::*;
pub use score::*;
