//! Error types and handling for slabbuf

/// Result type alias for slabbuf operations
pub type Result<T> = std::result::Result<T, BufferError>;

/// Coarse classification of a [`BufferError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrong kind of argument, or a well-typed argument with an unusable value
    Type,
    /// Offset/width combination outside a view, or a length not divisible by a group size
    Range,
    /// An encoding name that is not recognized
    UnknownEncoding,
}

/// Error types for buffer construction, codecs and pooling
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    /// Argument of the wrong kind (e.g. a serialized record that is not a buffer)
    #[error("Type error: {message}")]
    InvalidType { message: String },

    /// Argument value that is well-typed but unusable
    #[error("Invalid parameter: {parameter} - {message}")]
    InvalidParameter { parameter: String, message: String },

    /// A fixed-width access would leave the view
    #[error("Attempt to access memory outside buffer bounds: offset {offset}, width {width}, length {length}")]
    OutOfBounds {
        offset: usize,
        width: usize,
        length: usize,
    },

    /// Byte-order swap on a length that is not a multiple of the group size
    #[error("Buffer size must be a multiple of {}-bits, got {length} bytes", .group * 8)]
    Misaligned { group: usize, length: usize },

    /// Encoding name outside the supported alias set
    #[error("Unknown encoding: {name}")]
    UnknownEncoding { name: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl BufferError {
    /// Create a type error
    pub fn invalid_type(message: impl Into<String>) -> Self {
        Self::InvalidType {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Create an out-of-bounds error
    pub fn out_of_bounds(offset: usize, width: usize, length: usize) -> Self {
        Self::OutOfBounds {
            offset,
            width,
            length,
        }
    }

    /// Create a misaligned swap error
    pub fn misaligned(group: usize, length: usize) -> Self {
        Self::Misaligned { group, length }
    }

    /// Create an unknown encoding error
    pub fn unknown_encoding(name: impl Into<String>) -> Self {
        Self::UnknownEncoding { name: name.into() }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidType { .. } | Self::InvalidParameter { .. } | Self::Serialization { .. } => {
                ErrorKind::Type
            }
            Self::OutOfBounds { .. } | Self::Misaligned { .. } => ErrorKind::Range,
            Self::UnknownEncoding { .. } => ErrorKind::UnknownEncoding,
        }
    }

    /// Check whether this is a range error
    pub fn is_range_error(&self) -> bool {
        self.kind() == ErrorKind::Range
    }
}

impl From<serde_json::Error> for BufferError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
