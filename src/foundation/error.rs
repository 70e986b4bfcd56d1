use std::path::{Path, PathBuf};

/// Convenience result type used across instafit.
pub type FitResult<T> = Result<T, FitError>;

/// Top-level error taxonomy used by the library.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FitError {
    /// Invalid or missing configuration value.
    #[error("config error: {0}")]
    Config(String),

    /// The source directory holds no matching images.
    #[error("no input: no jpg/jpeg files found in '{}'", dir.display())]
    NoInput {
        /// Directory that was scanned.
        dir: PathBuf,
    },

    /// Degenerate or unresolvable aspect ratio.
    #[error("ratio error: {0}")]
    Ratio(String),

    /// A file could not be decoded as an image.
    #[error("unsupported format '{}': {message}", path.display())]
    UnsupportedFormat {
        /// Offending file.
        path: PathBuf,
        /// Decoder message.
        message: String,
    },

    /// Read, write or directory creation failure.
    #[error("io error '{}': {message}", path.display())]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying error message.
        message: String,
    },
}

/// Discriminant of [`FitError`], used in job reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`FitError::Config`].
    Config,
    /// See [`FitError::NoInput`].
    NoInput,
    /// See [`FitError::Ratio`].
    Ratio,
    /// See [`FitError::UnsupportedFormat`].
    UnsupportedFormat,
    /// See [`FitError::Io`].
    Io,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Config => "ConfigError",
            Self::NoInput => "NoInputError",
            Self::Ratio => "RatioError",
            Self::UnsupportedFormat => "UnsupportedFormatError",
            Self::Io => "IOError",
        };
        f.write_str(name)
    }
}

impl FitError {
    /// Build a [`FitError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`FitError::NoInput`] value.
    pub fn no_input(dir: impl Into<PathBuf>) -> Self {
        Self::NoInput { dir: dir.into() }
    }

    /// Build a [`FitError::Ratio`] value.
    pub fn ratio(msg: impl Into<String>) -> Self {
        Self::Ratio(msg.into())
    }

    /// Build a [`FitError::UnsupportedFormat`] value.
    pub fn unsupported_format(path: impl Into<PathBuf>, msg: impl std::fmt::Display) -> Self {
        Self::UnsupportedFormat {
            path: path.into(),
            message: msg.to_string(),
        }
    }

    /// Build a [`FitError::Io`] value.
    pub fn io(path: impl Into<PathBuf>, msg: impl std::fmt::Display) -> Self {
        Self::Io {
            path: path.into(),
            message: msg.to_string(),
        }
    }

    /// Error kind discriminant.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Config,
            Self::NoInput { .. } => ErrorKind::NoInput,
            Self::Ratio(_) => ErrorKind::Ratio,
            Self::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    /// `true` for errors that abort a run before any job is dispatched.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Config | ErrorKind::NoInput | ErrorKind::Ratio
        )
    }

    /// Path carried by the error, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NoInput { dir } => Some(dir),
            Self::UnsupportedFormat { path, .. } | Self::Io { path, .. } => Some(path),
            Self::Config(_) | Self::Ratio(_) => None,
        }
    }

    /// Human-readable message without the kind prefix.
    pub fn message(&self) -> String {
        match self {
            Self::Config(msg) | Self::Ratio(msg) => msg.clone(),
            Self::NoInput { dir } => format!("no jpg/jpeg files found in '{}'", dir.display()),
            Self::UnsupportedFormat { message, .. } | Self::Io { message, .. } => message.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
