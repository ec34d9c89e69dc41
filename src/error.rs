use std::path::PathBuf;

use crate::scene::SceneError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("'{}' not found", .path.display())]
    FontNotFound { path: PathBuf },

    #[error("font: {0}")]
    Font(String),

    #[error("window: {0}")]
    Window(String),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("unknown scene '{0}'")]
    UnknownScene(String),

    #[error("logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

impl From<minifb::Error> for Error {
    fn from(e: minifb::Error) -> Self {
        Error::Window(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
