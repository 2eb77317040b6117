use byteorder::{ByteOrder, LittleEndian};
use speedy::{Context, Readable, Reader, Writable, Writer};

use crate::{
  error::{DecodeError, Error, Result},
  messages::validity_trait::Validity,
};

/// Length-prefixed string stored in a fixed N-byte buffer.
///
/// Only the first `length` bytes are meaningful. The rest is padding and is
/// never looked at.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FixedString<const N: usize> {
  length: u16,
  buffer: [u8; N],
}

impl<const N: usize> FixedString<N> {
  pub const SIZE: usize = 2 + N;

  /// Builds a string from `bytes`, which must fit the buffer.
  pub fn new(bytes: &[u8]) -> Option<FixedString<N>> {
    if bytes.len() > N {
      return None;
    }
    let mut buffer = [0u8; N];
    buffer[..bytes.len()].copy_from_slice(bytes);
    Some(FixedString {
      length: bytes.len() as u16,
      buffer,
    })
  }

  pub fn len(&self) -> usize {
    self.length as usize
  }

  pub fn is_empty(&self) -> bool {
    self.length == 0
  }

  /// The meaningful bytes. Clamped to the buffer if the length field is
  /// out of range; decoders reject such values through `Validity`.
  pub fn as_bytes(&self) -> &[u8] {
    &self.buffer[..self.len().min(N)]
  }
}

impl<const N: usize> Default for FixedString<N> {
  fn default() -> Self {
    FixedString {
      length: 0,
      buffer: [0u8; N],
    }
  }
}

impl<const N: usize> std::fmt::Debug for FixedString<N> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{:?}", String::from_utf8_lossy(self.as_bytes()))
  }
}

impl<const N: usize> Validity for FixedString<N> {
  fn valid(&self) -> bool {
    self.len() <= N
  }
}

impl<'a, C: Context, const N: usize> Readable<'a, C> for FixedString<N> {
  #[inline]
  fn read_from<R: Reader<'a, C>>(reader: &mut R) -> std::result::Result<Self, C::Error> {
    let length = reader.read_u16()?;
    let mut buffer = [0u8; N];
    reader.read_bytes(&mut buffer)?;
    Ok(FixedString { length, buffer })
  }

  #[inline]
  fn minimum_bytes_needed() -> usize {
    Self::SIZE
  }
}

impl<C: Context, const N: usize> Writable<C> for FixedString<N> {
  #[inline]
  fn write_to<T: ?Sized + Writer<C>>(&self, writer: &mut T) -> std::result::Result<(), C::Error> {
    writer.write_u16(self.length)?;
    writer.write_bytes(&self.buffer)
  }
}

/// Length-prefixed string whose bytes follow the length field directly and
/// end the message, so the firmware sends only `length` of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnsiString {
  bytes: Vec<u8>,
}

impl AnsiString {
  pub const LENGTH_FIELD_SIZE: usize = 2;

  pub fn new(bytes: &[u8]) -> AnsiString {
    AnsiString {
      bytes: bytes.to_vec(),
    }
  }

  /// Decodes a string that occupies all of `buffer`: the length field
  /// followed by exactly that many bytes.
  pub fn decode_tail(what: &'static str, buffer: &[u8]) -> Result<AnsiString> {
    if buffer.len() < Self::LENGTH_FIELD_SIZE {
      return Err(
        DecodeError::LengthMismatch {
          what,
          expected: Self::LENGTH_FIELD_SIZE,
          actual: buffer.len(),
        }
        .into(),
      );
    }
    let length = LittleEndian::read_u16(&buffer[..Self::LENGTH_FIELD_SIZE]) as usize;
    let tail = &buffer[Self::LENGTH_FIELD_SIZE..];
    DecodeError::expect_length(what, length, tail.len())?;
    Ok(AnsiString::new(tail))
  }

  /// Appends the length field and the bytes. Fails if the length does not
  /// fit the 16-bit field.
  pub fn encode(&self, out: &mut Vec<u8>) -> Result<()> {
    let length = u16::try_from(self.bytes.len()).map_err(|_| Error::MessageTooLarge {
      size: self.bytes.len(),
      max: u16::MAX as usize,
    })?;
    let mut field = [0u8; 2];
    LittleEndian::write_u16(&mut field, length);
    out.extend_from_slice(&field);
    out.extend_from_slice(&self.bytes);
    Ok(())
  }

  pub fn as_bytes(&self) -> &[u8] {
    &self.bytes
  }

  pub fn len(&self) -> usize {
    self.bytes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bytes.is_empty()
  }

  pub fn to_string_lossy(&self) -> String {
    String::from_utf8_lossy(&self.bytes).into_owned()
  }
}
