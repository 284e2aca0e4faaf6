use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("home directory not found")]
    HomeDirNotFound,

    #[error(
        "credential file not found: {0}\n\
        Create it with kamaki or point KAMAKI_CONFIG at an existing file"
    )]
    ConfigFileNotFound(PathBuf),

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("setting '{0}' is outside of any section")]
    SettingOutsideSection(String),

    #[error("invalid section [{0}]")]
    InvalidSection(String),

    #[error("cloud '{cloud}' is missing the '{field}' setting")]
    MissingField { cloud: String, field: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

impl From<ini::ParseError> for ConfigError {
    fn from(err: ini::ParseError) -> Self {
        ConfigError::Parse {
            line: err.line,
            message: err.msg.to_string(),
        }
    }
}
