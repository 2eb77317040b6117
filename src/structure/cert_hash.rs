use std::convert::TryFrom;

use byteorder::{ByteOrder, LittleEndian};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use speedy::{Readable, Writable};

use crate::{
  constants::{CERT_HASH_MAX_LENGTH, CERT_HASH_MAX_NUMBER},
  error::{DecodeError, Result},
  structure::fixed_string::AnsiString,
};

/// Opaque firmware handle of one trusted root certificate hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Readable, Writable)]
pub struct HashHandle(pub u32);

/// Handles reported by EnumerateHashHandles, at most `CERT_HASH_MAX_NUMBER`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashHandles {
  pub handles: Vec<HashHandle>,
}

impl HashHandles {
  pub fn new(handles: Vec<HashHandle>) -> HashHandles {
    HashHandles { handles }
  }

  pub fn len(&self) -> usize {
    self.handles.len()
  }

  pub fn is_empty(&self) -> bool {
    self.handles.is_empty()
  }

  pub fn decode(payload: &[u8]) -> Result<HashHandles> {
    if payload.len() < 4 {
      return Err(
        DecodeError::LengthMismatch {
          what: "hash handles",
          expected: 4,
          actual: payload.len(),
        }
        .into(),
      );
    }
    let count = LittleEndian::read_u32(&payload[..4]) as usize;
    if count > CERT_HASH_MAX_NUMBER {
      return Err(
        DecodeError::CapacityExceeded {
          what: "hash handles",
          count,
          capacity: CERT_HASH_MAX_NUMBER,
        }
        .into(),
      );
    }
    DecodeError::expect_length("hash handles", 4 + 4 * count, payload.len())?;
    let handles = payload[4..]
      .chunks_exact(4)
      .map(|c| HashHandle(LittleEndian::read_u32(c)))
      .collect();
    Ok(HashHandles { handles })
  }

  pub fn encode(&self) -> Vec<u8> {
    let mut out = vec![0u8; 4 + 4 * self.handles.len()];
    LittleEndian::write_u32(&mut out[..4], self.handles.len() as u32);
    for (chunk, handle) in out[4..].chunks_exact_mut(4).zip(&self.handles) {
      LittleEndian::write_u32(chunk, handle.0);
    }
    out
  }
}

/// Hash algorithms the firmware uses for certificate hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum HashAlgorithm {
  Md5 = 0,
  Sha1 = 1,
  Sha256 = 2,
  Sha384 = 3,
  Sha512 = 4,
}

impl HashAlgorithm {
  pub const UNKNOWN_NAME: &'static str = "unknown";

  pub fn name(self) -> &'static str {
    match self {
      HashAlgorithm::Md5 => "MD5",
      HashAlgorithm::Sha1 => "SHA1",
      HashAlgorithm::Sha256 => "SHA256",
      HashAlgorithm::Sha384 => "SHA384",
      HashAlgorithm::Sha512 => "SHA512",
    }
  }

  pub fn hash_size(self) -> usize {
    match self {
      HashAlgorithm::Md5 => 16,
      HashAlgorithm::Sha1 => 20,
      HashAlgorithm::Sha256 => 32,
      HashAlgorithm::Sha384 => 48,
      HashAlgorithm::Sha512 => 64,
    }
  }

  /// Name and digest length for a wire identifier. Unknown identifiers keep
  /// the whole hash buffer rather than guessing a shorter digest.
  pub fn interpret(id: u8) -> (&'static str, usize) {
    match HashAlgorithm::try_from(id) {
      Ok(alg) => (alg.name(), alg.hash_size()),
      Err(_) => (HashAlgorithm::UNKNOWN_NAME, CERT_HASH_MAX_LENGTH),
    }
  }
}

/// Certificate hash entry as returned by GetCertificateHashEntry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertHashEntry {
  pub is_default: u32,
  pub is_active: u32,
  pub certificate_hash: [u8; CERT_HASH_MAX_LENGTH],
  pub hash_algorithm: u8,
  pub name: AnsiString,
}

impl CertHashEntry {
  // is_default + is_active + hash + algorithm
  const HEAD_SIZE: usize = 4 + 4 + CERT_HASH_MAX_LENGTH + 1;

  pub fn decode(payload: &[u8]) -> Result<CertHashEntry> {
    if payload.len() < Self::HEAD_SIZE {
      return Err(
        DecodeError::LengthMismatch {
          what: "certificate hash entry",
          expected: Self::HEAD_SIZE + AnsiString::LENGTH_FIELD_SIZE,
          actual: payload.len(),
        }
        .into(),
      );
    }
    let is_default = LittleEndian::read_u32(&payload[0..4]);
    let is_active = LittleEndian::read_u32(&payload[4..8]);
    let mut certificate_hash = [0u8; CERT_HASH_MAX_LENGTH];
    certificate_hash.copy_from_slice(&payload[8..8 + CERT_HASH_MAX_LENGTH]);
    let hash_algorithm = payload[8 + CERT_HASH_MAX_LENGTH];
    let name = AnsiString::decode_tail("certificate hash name", &payload[Self::HEAD_SIZE..])?;
    Ok(CertHashEntry {
      is_default,
      is_active,
      certificate_hash,
      hash_algorithm,
      name,
    })
  }

  pub fn encode(&self) -> Result<Vec<u8>> {
    let mut out = vec![0u8; 8];
    LittleEndian::write_u32(&mut out[0..4], self.is_default);
    LittleEndian::write_u32(&mut out[4..8], self.is_active);
    out.extend_from_slice(&self.certificate_hash);
    out.push(self.hash_algorithm);
    self.name.encode(&mut out)?;
    Ok(out)
  }

  pub fn is_active(&self) -> bool {
    self.is_active == 1
  }

  pub fn is_default(&self) -> bool {
    self.is_default == 1
  }
}
