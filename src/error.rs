//! Centralized error type for the slremote umbrella crate.
//!
//! Wraps the subcrate errors so `?` propagates across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Mapping(#[from] slremote_mapping::Error),

    #[error("Invalid driver config: {0}")]
    Config(String),

    #[error("Page \"{0}\" is defined twice")]
    DuplicatePage(String),

    #[error("Config has no pages")]
    NoPages,

    #[error("No page named \"{0}\"")]
    UnknownPage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
