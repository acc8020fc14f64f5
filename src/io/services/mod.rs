//! Transfer services built on the codec and the provider boundary.

pub mod export;
pub mod import;
