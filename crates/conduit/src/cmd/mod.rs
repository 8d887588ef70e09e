//! Command implementations for the Conduit CLI

pub mod compose;
pub mod destinations;
