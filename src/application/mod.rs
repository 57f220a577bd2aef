// Application layer: the tracker owns all runtime state and is the single
// entry point for the command loop and for tests.

pub mod error;
pub mod reporting;
pub mod service;

pub use error::*;
pub use reporting::*;
pub use service::*;
