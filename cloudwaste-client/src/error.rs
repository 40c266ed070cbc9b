use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// Request could not be sent or its body could not be read
    Network {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
    /// Server answered with a non-success status
    Status { code: u16, message: String },
    /// Data serialization/deserialization errors
    Serialization { message: String },
    /// Invalid client configuration, e.g. an unusable API url
    Configuration { message: String },
    /// Terminal input/output errors
    Io { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    pub fn network_with_source<S: Into<String>>(
        message: S,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(source),
        }
    }

    pub fn status<S: Into<String>>(code: u16, message: S) -> Self {
        Self::Status {
            code,
            message: message.into(),
        }
    }

    pub fn serialization<S: Into<String>>(message: S) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Status { code: 404, .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Network { message, .. } => write!(f, "Network error: {}", message),
            Error::Status { code, message } => write!(f, "HTTP {}: {}", code, message),
            Error::Serialization { message } => write!(f, "Serialization error: {}", message),
            Error::Configuration { message } => write!(f, "Configuration error: {}", message),
            Error::Io { message } => write!(f, "I/O error: {}", message),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Network {
                source: Some(source),
                ..
            } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::serialization(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Error::serialization(err.to_string());
        }

        Error::network_with_source("HTTP request failed", Box::new(err))
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::configuration(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
        }
    }
}
