//! Errors raised while scaffolding a project.

use std::path::PathBuf;
use thiserror::Error;

pub type InitResult<T> = Result<T, InitError>;

#[derive(Debug, Error)]
pub enum InitError {
    /// `.crew-kit/` is already present and `force` was not requested.
    #[error("{} already exists. Use --force to overwrite.", .0.display())]
    AlreadyInitialized(PathBuf),

    /// The binary was built without one of the templates it tries to write.
    #[error("embedded template '{0}' is missing")]
    MissingTemplate(String),

    /// Creating a directory or writing a scaffolded file failed.
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
