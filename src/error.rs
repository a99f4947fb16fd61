use std::path::PathBuf;
use std::process::ExitStatus;

use cmake_template::{RenderError, UnknownLanguage};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    Language(#[from] UnknownLanguage),

    #[error("cannot determine the current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error("cannot derive a project name from {0:?}, pass --name")]
    NoProjectName(PathBuf),

    #[error("cannot read config file {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("invalid generator `{name}`. Must be one of {allowed:?}")]
    InvalidGenerator {
        name: String,
        allowed: &'static [&'static str],
    },

    #[error("cmake is not installed or not found in PATH")]
    CmakeNotFound,

    #[error("failed to run cmake: {0}")]
    CmakeSpawn(#[source] std::io::Error),

    #[error("cmake exited with {0}")]
    CmakeFailed(ExitStatus),
}

impl InitError {
    pub fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> InitError {
        let path = path.into();
        move |source| InitError::Io { path, source }
    }
}

pub type Result<T> = std::result::Result<T, InitError>;
