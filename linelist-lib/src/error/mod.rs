//! Error types

mod api;
mod backend;

pub use api::*;
pub use backend::*;

/// Top-level library error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error during an API call.
    #[error(transparent)]
    Api(#[from] ApiError),
}
