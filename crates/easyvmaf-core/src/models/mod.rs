//! Data models passed between pipeline stages

mod analysis;

pub use analysis::*;
