use byteorder::{ByteOrder, LittleEndian};

use crate::{
  error::{DecodeError, Result},
  structure::fixed_string::AnsiString,
};

/// Remote access (CIRA) connection state as reported by the firmware.
/// The three codes are left uninterpreted here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteAccessConnectionStatus {
  pub network_status: u32,
  pub remote_status: u32,
  pub remote_trigger: u32,
  pub mps_hostname: AnsiString,
}

impl RemoteAccessConnectionStatus {
  const HEAD_SIZE: usize = 3 * 4;

  pub fn decode(payload: &[u8]) -> Result<RemoteAccessConnectionStatus> {
    if payload.len() < Self::HEAD_SIZE {
      return Err(
        DecodeError::LengthMismatch {
          what: "remote access status",
          expected: Self::HEAD_SIZE + AnsiString::LENGTH_FIELD_SIZE,
          actual: payload.len(),
        }
        .into(),
      );
    }
    Ok(RemoteAccessConnectionStatus {
      network_status: LittleEndian::read_u32(&payload[0..4]),
      remote_status: LittleEndian::read_u32(&payload[4..8]),
      remote_trigger: LittleEndian::read_u32(&payload[8..12]),
      mps_hostname: AnsiString::decode_tail("MPS hostname", &payload[Self::HEAD_SIZE..])?,
    })
  }

  pub fn encode(&self) -> Result<Vec<u8>> {
    let mut out = vec![0u8; Self::HEAD_SIZE];
    LittleEndian::write_u32(&mut out[0..4], self.network_status);
    LittleEndian::write_u32(&mut out[4..8], self.remote_status);
    LittleEndian::write_u32(&mut out[8..12], self.remote_trigger);
    self.mps_hostname.encode(&mut out)?;
    Ok(out)
  }
}
