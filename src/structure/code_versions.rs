use byteorder::{ByteOrder, LittleEndian};
use speedy::{Endianness, Readable, Writable};

use crate::{
  constants::{BIOS_VERSION_LEN, UNICODE_STRING_LEN, VERSIONS_NUMBER},
  error::{DecodeError, Result},
  messages::validity_trait::Validity,
  structure::fixed_string::FixedString,
};

pub type VersionString = FixedString<UNICODE_STRING_LEN>;

/// One (description, version) pair of the code version table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Readable, Writable)]
pub struct AmtVersionType {
  pub description: VersionString,
  pub version: VersionString,
}

impl AmtVersionType {
  pub const SIZE: usize = 2 * VersionString::SIZE;

  pub fn new(description: &str, version: &str) -> Option<AmtVersionType> {
    Some(AmtVersionType {
      description: VersionString::new(description.as_bytes())?,
      version: VersionString::new(version.as_bytes())?,
    })
  }
}

impl Validity for AmtVersionType {
  fn valid(&self) -> bool {
    self.description.valid() && self.version.valid()
  }
}

/// BIOS version and firmware component versions.
///
/// The firmware table has room for `VERSIONS_NUMBER` entries but sends only
/// the valid ones; `versions` holds exactly those.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeVersions {
  pub bios_version: [u8; BIOS_VERSION_LEN],
  pub versions: Vec<AmtVersionType>,
}

impl CodeVersions {
  const HEAD_SIZE: usize = BIOS_VERSION_LEN + 4;

  pub fn new(bios_version: &[u8], versions: Vec<AmtVersionType>) -> CodeVersions {
    let mut bios = [0u8; BIOS_VERSION_LEN];
    let n = bios_version.len().min(BIOS_VERSION_LEN);
    bios[..n].copy_from_slice(&bios_version[..n]);
    CodeVersions {
      bios_version: bios,
      versions,
    }
  }

  pub fn versions_count(&self) -> usize {
    self.versions.len()
  }

  /// Entry whose description matches `key` exactly (case-sensitive).
  pub fn find(&self, key: &str) -> Option<&AmtVersionType> {
    self
      .versions
      .iter()
      .find(|v| v.description.as_bytes() == key.as_bytes())
  }

  pub fn decode(payload: &[u8]) -> Result<CodeVersions> {
    if payload.len() < Self::HEAD_SIZE {
      return Err(
        DecodeError::LengthMismatch {
          what: "code versions",
          expected: Self::HEAD_SIZE,
          actual: payload.len(),
        }
        .into(),
      );
    }
    let mut bios_version = [0u8; BIOS_VERSION_LEN];
    bios_version.copy_from_slice(&payload[..BIOS_VERSION_LEN]);
    let count = LittleEndian::read_u32(&payload[BIOS_VERSION_LEN..Self::HEAD_SIZE]) as usize;
    if count > VERSIONS_NUMBER {
      return Err(
        DecodeError::CapacityExceeded {
          what: "code versions",
          count,
          capacity: VERSIONS_NUMBER,
        }
        .into(),
      );
    }
    DecodeError::expect_length(
      "code versions",
      Self::HEAD_SIZE + count * AmtVersionType::SIZE,
      payload.len(),
    )?;

    let versions = payload[Self::HEAD_SIZE..]
      .chunks_exact(AmtVersionType::SIZE)
      .map(|chunk| AmtVersionType::read_from_buffer_with_ctx(Endianness::LittleEndian, chunk))
      .collect::<std::result::Result<Vec<_>, _>>()?;
    if !versions.iter().all(|v| v.valid()) {
      return Err(
        DecodeError::Malformed {
          what: "code version string length",
        }
        .into(),
      );
    }
    Ok(CodeVersions {
      bios_version,
      versions,
    })
  }

  pub fn encode(&self) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(Self::HEAD_SIZE + self.versions.len() * AmtVersionType::SIZE);
    out.extend_from_slice(&self.bios_version);
    let mut count = [0u8; 4];
    LittleEndian::write_u32(&mut count, self.versions.len() as u32);
    out.extend_from_slice(&count);
    for v in &self.versions {
      out.extend(v.write_to_vec_with_ctx(Endianness::LittleEndian)?);
    }
    Ok(out)
  }
}
