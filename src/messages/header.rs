use speedy::{Readable, Writable};
use static_assertions::const_assert_eq;

use crate::messages::{
  command::Command, protocol_version::ProtocolVersion, status::AmtStatus,
  validity_trait::Validity,
};

/// Header in front of every request. `length` counts the bytes following
/// the header.
#[derive(Debug, Readable, Writable, PartialEq, Eq, Clone, Copy)]
pub struct MessageHeader {
  pub version: ProtocolVersion,
  pub reserved: u16,
  pub command: Command,
  pub length: u32,
}

impl MessageHeader {
  pub const SIZE: usize = 12;

  pub fn new(command: Command, length: u32) -> MessageHeader {
    MessageHeader {
      version: ProtocolVersion::PROTOCOLVERSION,
      reserved: 0,
      command,
      length,
    }
  }
}

impl Validity for MessageHeader {
  fn valid(&self) -> bool {
    self.version.major == ProtocolVersion::PROTOCOLVERSION.major
  }
}

/// Header in front of every response. The status word is part of the
/// byte count in `header.length`.
#[derive(Debug, Readable, Writable, PartialEq, Eq, Clone, Copy)]
pub struct ResponseHeader {
  pub header: MessageHeader,
  pub status: AmtStatus,
}

impl ResponseHeader {
  pub const SIZE: usize = MessageHeader::SIZE + 4;

  pub fn new(command: Command, status: AmtStatus, payload_length: usize) -> ResponseHeader {
    ResponseHeader {
      header: MessageHeader::new(command, (payload_length + 4) as u32),
      status,
    }
  }

  /// Bytes that follow the 16-byte response header.
  pub fn payload_length(&self) -> usize {
    (self.header.length as usize).saturating_sub(4)
  }
}

impl Validity for ResponseHeader {
  fn valid(&self) -> bool {
    self.header.valid() && self.header.length >= 4
  }
}

const_assert_eq!(MessageHeader::SIZE, 2 + 2 + 4 + 4);
const_assert_eq!(ResponseHeader::SIZE, 16);
