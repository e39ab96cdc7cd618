//! error taxonomy: configuration failures are recoverable and surface through
//! `anyhow` at the CLI boundary; everything else the library asserts or panics on,
//! since there is no sensible recovery mid-search.

use std::fmt;
use std::path::PathBuf;

/// failure loading or parsing a configuration source.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: Option<PathBuf>,
        source: std::io::Error,
    },
    Parse {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path: Some(p), .. } => write!(f, "failed to read config at {}", p.display()),
            Self::Io { path: None, .. } => write!(f, "failed to read config from stdin"),
            Self::Parse { path: Some(p), .. } => write!(f, "failed to parse config at {}", p.display()),
            Self::Parse { path: None, .. } => write!(f, "failed to parse config from stdin"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}
