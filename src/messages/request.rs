use speedy::{Endianness, Readable, Writable};

use crate::{
  constants::LOCAL_SYSTEM_ACCOUNT_RESERVED,
  error::{DecodeError, Result},
  messages::{command::Command, header::MessageHeader, response::ResponsePayload},
  structure::{
    amt_uuid::AmtUuid,
    cert_hash::{CertHashEntry, HashHandle, HashHandles},
    code_versions::CodeVersions,
    control_mode::ControlMode,
    fixed_string::AnsiString,
    lan_settings::{LanInterface, LanInterfaceSettings},
    local_account::LocalSystemAccount,
    remote_access::RemoteAccessConnectionStatus,
  },
};

/// A typed firmware request. The body is everything after the header; the
/// associated `Response` names the payload the firmware answers with.
pub trait Request: Writable<Endianness> {
  const COMMAND: Command;
  type Response: ResponsePayload;

  /// Complete message: header followed by the body.
  fn to_bytes(&self) -> Result<Vec<u8>> {
    let body = self.write_to_vec_with_ctx(Endianness::LittleEndian)?;
    let header = MessageHeader::new(Self::COMMAND, body.len() as u32);
    let mut message = header.write_to_vec_with_ctx(Endianness::LittleEndian)?;
    message.extend(body);
    Ok(message)
  }
}

/// Splits a serialized request into its header and body, checking that the
/// declared length covers exactly the body.
pub fn parse_request(bytes: &[u8]) -> Result<(MessageHeader, &[u8])> {
  if bytes.len() < MessageHeader::SIZE {
    return Err(
      DecodeError::LengthMismatch {
        what: "request header",
        expected: MessageHeader::SIZE,
        actual: bytes.len(),
      }
      .into(),
    );
  }
  let header =
    MessageHeader::read_from_buffer_with_ctx(Endianness::LittleEndian, &bytes[..MessageHeader::SIZE])?;
  let body = &bytes[MessageHeader::SIZE..];
  DecodeError::expect_length("request body", header.length as usize, body.len())?;
  Ok((header, body))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Readable, Writable)]
pub struct GetCodeVersionsRequest;

impl Request for GetCodeVersionsRequest {
  const COMMAND: Command = Command::GET_CODE_VERSIONS;
  type Response = CodeVersions;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Readable, Writable)]
pub struct GetUuidRequest;

impl Request for GetUuidRequest {
  const COMMAND: Command = Command::GET_UUID;
  type Response = AmtUuid;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Readable, Writable)]
pub struct GetControlModeRequest;

impl Request for GetControlModeRequest {
  const COMMAND: Command = Command::GET_CONTROL_MODE;
  type Response = ControlMode;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Readable, Writable)]
pub struct GetDnsSuffixRequest;

impl Request for GetDnsSuffixRequest {
  const COMMAND: Command = Command::GET_PKI_FQDN_SUFFIX;
  type Response = AnsiString;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Readable, Writable)]
pub struct EnumerateHashHandlesRequest;

impl Request for EnumerateHashHandlesRequest {
  const COMMAND: Command = Command::ENUMERATE_HASH_HANDLES;
  type Response = HashHandles;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Readable, Writable)]
pub struct GetCertHashEntryRequest {
  pub handle: HashHandle,
}

impl Request for GetCertHashEntryRequest {
  const COMMAND: Command = Command::GET_CERTHASH_ENTRY;
  type Response = CertHashEntry;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Readable, Writable)]
pub struct GetRemoteAccessConnectionStatusRequest;

impl Request for GetRemoteAccessConnectionStatusRequest {
  const COMMAND: Command = Command::GET_REMOTE_ACCESS_CONNECTION_STATUS;
  type Response = RemoteAccessConnectionStatus;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Readable, Writable)]
pub struct GetLanInterfaceSettingsRequest {
  pub interface_index: u32,
}

impl GetLanInterfaceSettingsRequest {
  pub fn new(interface: LanInterface) -> GetLanInterfaceSettingsRequest {
    GetLanInterfaceSettingsRequest {
      interface_index: interface.index(),
    }
  }
}

impl Request for GetLanInterfaceSettingsRequest {
  const COMMAND: Command = Command::GET_LAN_INTERFACE_SETTINGS;
  type Response = LanInterfaceSettings;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetLocalSystemAccountRequest {
  pub reserved: [u8; LOCAL_SYSTEM_ACCOUNT_RESERVED],
}

impl Default for GetLocalSystemAccountRequest {
  fn default() -> Self {
    GetLocalSystemAccountRequest {
      reserved: [0u8; LOCAL_SYSTEM_ACCOUNT_RESERVED],
    }
  }
}

impl<C: speedy::Context> Writable<C> for GetLocalSystemAccountRequest {
  #[inline]
  fn write_to<T: ?Sized + speedy::Writer<C>>(
    &self,
    writer: &mut T,
  ) -> std::result::Result<(), C::Error> {
    writer.write_bytes(&self.reserved)
  }
}

impl Request for GetLocalSystemAccountRequest {
  const COMMAND: Command = Command::GET_LOCAL_SYSTEM_ACCOUNT;
  type Response = LocalSystemAccount;
}
