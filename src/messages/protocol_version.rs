use speedy::{Readable, Writable};

#[derive(Debug, PartialOrd, PartialEq, Ord, Eq, Readable, Writable, Clone, Copy)]
pub struct ProtocolVersion {
  pub major: u8,
  pub minor: u8,
}

impl ProtocolVersion {
  pub const PROTOCOLVERSION: ProtocolVersion = ProtocolVersion::PROTOCOLVERSION_1_1;

  pub const PROTOCOLVERSION_1_0: ProtocolVersion = ProtocolVersion { major: 1, minor: 0 };
  pub const PROTOCOLVERSION_1_1: ProtocolVersion = ProtocolVersion { major: 1, minor: 1 };
}

impl Default for ProtocolVersion {
  fn default() -> Self {
    ProtocolVersion::PROTOCOLVERSION
  }
}
