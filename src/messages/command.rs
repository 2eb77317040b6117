use std::fmt;

use speedy::{Readable, Writable};

/// Command identifier carried in every message header.
///
/// Responses use the request identifier with the response bit set.
#[derive(PartialEq, Eq, Readable, Writable, Clone, Copy, Hash)]
pub struct Command {
  value: u32,
}

impl Command {
  const RESPONSE_BIT: u32 = 0x0080_0000;

  pub const GET_CODE_VERSIONS: Command = Command { value: 0x0400_001A };
  pub const ENUMERATE_HASH_HANDLES: Command = Command { value: 0x0400_002C };
  pub const GET_CERTHASH_ENTRY: Command = Command { value: 0x0400_002D };
  pub const GET_PKI_FQDN_SUFFIX: Command = Command { value: 0x0400_0036 };
  pub const GET_REMOTE_ACCESS_CONNECTION_STATUS: Command = Command { value: 0x0400_0046 };
  pub const GET_LAN_INTERFACE_SETTINGS: Command = Command { value: 0x0400_0048 };
  pub const GET_UUID: Command = Command { value: 0x0400_005C };
  pub const GET_LOCAL_SYSTEM_ACCOUNT: Command = Command { value: 0x0400_0067 };
  pub const GET_CONTROL_MODE: Command = Command { value: 0x0400_006B };

  pub const fn from_raw(value: u32) -> Command {
    Command { value }
  }

  pub const fn raw(self) -> u32 {
    self.value
  }

  /// Identifier the firmware puts into the answer to this request.
  pub const fn response(self) -> Command {
    Command {
      value: self.value | Command::RESPONSE_BIT,
    }
  }

  pub const fn is_response(self) -> bool {
    self.value & Command::RESPONSE_BIT != 0
  }

  fn request_name(self) -> Option<&'static str> {
    let request = Command {
      value: self.value & !Command::RESPONSE_BIT,
    };
    let name = match request {
      Command::GET_CODE_VERSIONS => "GET_CODE_VERSIONS",
      Command::ENUMERATE_HASH_HANDLES => "ENUMERATE_HASH_HANDLES",
      Command::GET_CERTHASH_ENTRY => "GET_CERTHASH_ENTRY",
      Command::GET_PKI_FQDN_SUFFIX => "GET_PKI_FQDN_SUFFIX",
      Command::GET_REMOTE_ACCESS_CONNECTION_STATUS => "GET_REMOTE_ACCESS_CONNECTION_STATUS",
      Command::GET_LAN_INTERFACE_SETTINGS => "GET_LAN_INTERFACE_SETTINGS",
      Command::GET_UUID => "GET_UUID",
      Command::GET_LOCAL_SYSTEM_ACCOUNT => "GET_LOCAL_SYSTEM_ACCOUNT",
      Command::GET_CONTROL_MODE => "GET_CONTROL_MODE",
      _ => return None,
    };
    Some(name)
  }
}

impl fmt::Debug for Command {
  fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
    match (self.request_name(), self.is_response()) {
      (Some(name), false) => fmt.write_str(name),
      (Some(name), true) => write!(fmt, "{}_RESPONSE", name),
      (None, _) => write!(fmt, "Command {:#010x} (UNKNOWN!)", self.value),
    }
  }
}
