use std::io;

use crate::messages::{command::Command, status::AmtStatus};

/// This is a specialized Result, similar to std::io::Result
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while talking to the management engine or while
/// assembling values out of its responses.
///
/// Transport and decoding failures always propagate to the caller. Only
/// presentation lookups (status labels and the like) fall back to defaults,
/// and those never produce an `Error` at all.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// The device channel could not be opened, e.g. the driver is not loaded
  /// or the caller lacks privileges.
  #[error("Management engine channel unavailable: {0}")]
  TransportUnavailable(#[source] io::Error),

  /// Sending or receiving on an open channel failed.
  #[error("Management engine transport failure: {reason}")]
  TransportFailure { reason: String },

  /// Request would not fit into a single message of the negotiated size.
  #[error("Message of {size} bytes exceeds channel maximum of {max} bytes")]
  MessageTooLarge { size: usize, max: usize },

  /// Firmware answered, but with a non-zero status. The raw code is kept.
  #[error("Firmware returned status {status} for {command:?}")]
  Status { command: Command, status: AmtStatus },

  /// Response did not have the shape expected for the command.
  #[error("Cannot decode response: {0}")]
  Decode(#[from] DecodeError),

  /// A lookup key was not present in a firmware table.
  #[error("{key} Not Found")]
  NotFound { key: String },

  /// The platform is already provisioned and no password was given.
  #[error("Control mode {control_mode} requires a password")]
  PasswordRequired { control_mode: u32 },

  /// Outbound payload could not be serialized.
  #[error("Payload serialization failed: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Message payload is not valid base64: {0}")]
  Base64(#[from] base64::DecodeError),

  /// Querying the host name or interfaces failed.
  #[error("Host network query failed: {0}")]
  HostNetwork(#[source] io::Error),
}

impl Error {
  pub fn transport_failure<T>(reason: &str) -> Result<T> {
    Err(Error::TransportFailure {
      reason: reason.to_string(),
    })
  }

  pub fn not_found<T>(key: &str) -> Result<T> {
    Err(Error::NotFound {
      key: key.to_string(),
    })
  }

  /// True if the firmware itself rejected the request.
  pub fn status(&self) -> Option<AmtStatus> {
    match self {
      Error::Status { status, .. } => Some(*status),
      _ => None,
    }
  }
}

/// Ways in which a received message can fail to match the wire contract.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
  #[error("{what}: expected {expected} bytes, got {actual}")]
  LengthMismatch {
    what: &'static str,
    expected: usize,
    actual: usize,
  },

  #[error("Expected response {expected:?}, got {actual:?}")]
  UnexpectedCommand { expected: Command, actual: Command },

  #[error("{what}: count {count} exceeds capacity {capacity}")]
  CapacityExceeded {
    what: &'static str,
    count: usize,
    capacity: usize,
  },

  #[error("Malformed field {what}")]
  Malformed { what: &'static str },

  #[error("Speedy deserializer error: {0}")]
  Speedy(#[from] speedy::Error),
}

impl DecodeError {
  pub(crate) fn expect_length(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
      Ok(())
    } else {
      Err(DecodeError::LengthMismatch {
        what,
        expected,
        actual,
      }
      .into())
    }
  }
}

impl From<speedy::Error> for Error {
  fn from(e: speedy::Error) -> Error {
    Error::Decode(DecodeError::Speedy(e))
  }
}
