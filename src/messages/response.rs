use speedy::{Endianness, Readable, Writable};

use crate::{
  error::{DecodeError, Result},
  structure::{
    amt_uuid::AmtUuid,
    cert_hash::{CertHashEntry, HashHandles},
    code_versions::CodeVersions,
    control_mode::ControlMode,
    fixed_string::AnsiString,
    lan_settings::LanInterfaceSettings,
    local_account::LocalSystemAccount,
    remote_access::RemoteAccessConnectionStatus,
  },
};

/// Payload of a successful response, i.e. everything after the response
/// header. `decode` must consume `payload` exactly.
pub trait ResponsePayload: Sized {
  const NAME: &'static str;

  fn decode(payload: &[u8]) -> Result<Self>;
  fn encode(&self) -> Result<Vec<u8>>;
}

/// Decodes a fixed-size payload after checking its length.
fn decode_fixed<'a, T>(what: &'static str, size: usize, payload: &'a [u8]) -> Result<T>
where
  T: Readable<'a, Endianness>,
{
  DecodeError::expect_length(what, size, payload.len())?;
  Ok(T::read_from_buffer_with_ctx(Endianness::LittleEndian, payload)?)
}

fn encode_fixed<T: Writable<Endianness>>(value: &T) -> Result<Vec<u8>> {
  Ok(value.write_to_vec_with_ctx(Endianness::LittleEndian)?)
}

impl ResponsePayload for AmtUuid {
  const NAME: &'static str = "UUID";

  fn decode(payload: &[u8]) -> Result<Self> {
    decode_fixed(Self::NAME, AmtUuid::SIZE, payload)
  }

  fn encode(&self) -> Result<Vec<u8>> {
    encode_fixed(self)
  }
}

impl ResponsePayload for ControlMode {
  const NAME: &'static str = "control mode";

  fn decode(payload: &[u8]) -> Result<Self> {
    decode_fixed(Self::NAME, 4, payload)
  }

  fn encode(&self) -> Result<Vec<u8>> {
    encode_fixed(self)
  }
}

impl ResponsePayload for LanInterfaceSettings {
  const NAME: &'static str = "LAN interface settings";

  fn decode(payload: &[u8]) -> Result<Self> {
    decode_fixed(Self::NAME, LanInterfaceSettings::SIZE, payload)
  }

  fn encode(&self) -> Result<Vec<u8>> {
    encode_fixed(self)
  }
}

impl ResponsePayload for LocalSystemAccount {
  const NAME: &'static str = "local system account";

  fn decode(payload: &[u8]) -> Result<Self> {
    decode_fixed(Self::NAME, LocalSystemAccount::SIZE, payload)
  }

  fn encode(&self) -> Result<Vec<u8>> {
    encode_fixed(self)
  }
}

impl ResponsePayload for CodeVersions {
  const NAME: &'static str = "code versions";

  fn decode(payload: &[u8]) -> Result<Self> {
    CodeVersions::decode(payload)
  }

  fn encode(&self) -> Result<Vec<u8>> {
    CodeVersions::encode(self)
  }
}

// DNS suffix
impl ResponsePayload for AnsiString {
  const NAME: &'static str = "DNS suffix";

  fn decode(payload: &[u8]) -> Result<Self> {
    AnsiString::decode_tail(Self::NAME, payload)
  }

  fn encode(&self) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(AnsiString::LENGTH_FIELD_SIZE + self.len());
    AnsiString::encode(self, &mut out)?;
    Ok(out)
  }
}

impl ResponsePayload for HashHandles {
  const NAME: &'static str = "hash handles";

  fn decode(payload: &[u8]) -> Result<Self> {
    HashHandles::decode(payload)
  }

  fn encode(&self) -> Result<Vec<u8>> {
    Ok(HashHandles::encode(self))
  }
}

impl ResponsePayload for CertHashEntry {
  const NAME: &'static str = "certificate hash entry";

  fn decode(payload: &[u8]) -> Result<Self> {
    CertHashEntry::decode(payload)
  }

  fn encode(&self) -> Result<Vec<u8>> {
    CertHashEntry::encode(self)
  }
}

impl ResponsePayload for RemoteAccessConnectionStatus {
  const NAME: &'static str = "remote access status";

  fn decode(payload: &[u8]) -> Result<Self> {
    RemoteAccessConnectionStatus::decode(payload)
  }

  fn encode(&self) -> Result<Vec<u8>> {
    RemoteAccessConnectionStatus::encode(self)
  }
}
