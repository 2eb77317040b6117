use std::fmt;

use speedy::{Readable, Writable};

/// Status word of a firmware response. Zero means success; every other
/// value is passed through to the caller unchanged.
#[derive(Debug, PartialEq, Eq, Readable, Writable, Clone, Copy, Hash)]
pub struct AmtStatus(pub u32);

impl AmtStatus {
  pub const SUCCESS: AmtStatus = AmtStatus(0x0);
  pub const INTERNAL_ERROR: AmtStatus = AmtStatus(0x1);
  pub const NOT_READY: AmtStatus = AmtStatus(0x2);
  pub const INVALID_AMT_MODE: AmtStatus = AmtStatus(0x3);
  pub const INVALID_MESSAGE_LENGTH: AmtStatus = AmtStatus(0x4);

  pub fn is_success(self) -> bool {
    self == AmtStatus::SUCCESS
  }

  pub fn code(self) -> u32 {
    self.0
  }
}

impl fmt::Display for AmtStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match *self {
      AmtStatus::SUCCESS => "SUCCESS",
      AmtStatus::INTERNAL_ERROR => "INTERNAL_ERROR",
      AmtStatus::NOT_READY => "NOT_READY",
      AmtStatus::INVALID_AMT_MODE => "INVALID_AMT_MODE",
      AmtStatus::INVALID_MESSAGE_LENGTH => "INVALID_MESSAGE_LENGTH",
      AmtStatus(other) => return write!(f, "{:#x}", other),
    };
    write!(f, "{:#x} ({})", self.0, name)
  }
}
