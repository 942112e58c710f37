//! Error types and result handling for pkg-publisher.
//!
//! This module defines the main error type [`Error`] and a convenience
//! [`Result`] type alias used throughout the crate.
//!
//! # Example
//!
//! ```rust
//! use pkg_publisher::{Error, Result};
//!
//! fn connect() -> Result<()> {
//!     Err(Error::Config("broker list is empty".to_string()))
//! }
//!
//! match connect() {
//!     Ok(()) => println!("Connected"),
//!     Err(Error::Config(msg)) => eprintln!("Configuration error: {}", msg),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use thiserror::Error;

/// The main error type for pkg-publisher operations.
///
/// Every variant is fatal for the one-shot publisher: the binary logs it and
/// exits with a non-zero status.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid client configuration, such as an empty or malformed broker list.
    #[error("Configuration error: {0}")]
    Config(String),

    /// librdkafka refused to build a client from the rendered options.
    #[error("Failed to create Kafka client: {0}")]
    ClientCreation(rdkafka::error::KafkaError),

    /// Kafka admin or metadata error.
    #[error("Kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    /// The broker rejected a create-topic request for one topic.
    #[error("Failed to create topic '{topic}': {reason}")]
    TopicCreation {
        /// Name of the topic that could not be created
        topic: String,
        /// Broker-reported reason
        reason: String,
    },

    /// Protobuf encoding error.
    #[error("Serialization error: {0}")]
    Encode(#[from] prost::EncodeError),

    /// Protobuf decoding error.
    #[error("Deserialization error: {0}")]
    Decode(#[from] prost::DecodeError),

    /// A decoded message is missing a field or carries an unknown value.
    #[error("Invalid message format: {message}")]
    InvalidMessage {
        /// Description of what was invalid
        message: String,
    },

    /// The broker reported a delivery failure for a produced record.
    #[error("Publish error: {message}")]
    Publish {
        /// Description of the delivery failure
        message: String,
    },

    /// Operation timeout.
    #[error("Timeout error: {message}")]
    Timeout {
        /// Description of what timed out
        message: String,
    },
}

impl Error {
    /// Short name of the failure category, used as a structured log field.
    pub fn category(&self) -> &'static str {
        match self {
            Error::Config(_) | Error::ClientCreation(_) => "construction",
            Error::Kafka(_) | Error::TopicCreation { .. } => "admin",
            Error::Encode(_) | Error::Decode(_) | Error::InvalidMessage { .. } => "serialization",
            Error::Publish { .. } | Error::Timeout { .. } => "publish",
        }
    }
}

/// A convenient Result type alias for pkg-publisher operations.
///
/// This is equivalent to `std::result::Result<T, pkg_publisher::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(Error::Config("x".into()).category(), "construction");
        assert_eq!(
            Error::ClientCreation(rdkafka::error::KafkaError::ClientCreation(
                "bad option".into()
            ))
            .category(),
            "construction"
        );
        assert_eq!(
            Error::TopicCreation {
                topic: "t".into(),
                reason: "r".into()
            }
            .category(),
            "admin"
        );
        assert_eq!(
            Error::InvalidMessage {
                message: "m".into()
            }
            .category(),
            "serialization"
        );
        assert_eq!(
            Error::Timeout {
                message: "m".into()
            }
            .category(),
            "publish"
        );
    }

    #[test]
    fn test_topic_creation_display() {
        let err = Error::TopicCreation {
            topic: "orders".to_string(),
            reason: "InvalidReplicationFactor".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to create topic 'orders': InvalidReplicationFactor"
        );
    }
}
