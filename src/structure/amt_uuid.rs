use std::fmt;

use speedy::{Context, Readable, Reader, Writable, Writer};
use uuid::Uuid;

/// Platform UUID as stored by the firmware.
///
/// The first three groups are little-endian on the wire, so the textual
/// form reverses bytes 0..4, 4..6 and 6..8 and keeps the rest in order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct AmtUuid {
  pub bytes: [u8; 16],
}

impl AmtUuid {
  pub const SIZE: usize = 16;

  pub fn new(bytes: [u8; 16]) -> AmtUuid {
    AmtUuid { bytes }
  }

  pub fn to_uuid(self) -> Uuid {
    Uuid::from_bytes_le(self.bytes)
  }
}

impl fmt::Display for AmtUuid {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.to_uuid().hyphenated())
  }
}

impl fmt::Debug for AmtUuid {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "AmtUuid({})", self)
  }
}

impl<'a, C: Context> Readable<'a, C> for AmtUuid {
  #[inline]
  fn read_from<R: Reader<'a, C>>(reader: &mut R) -> Result<Self, C::Error> {
    let mut uuid = AmtUuid::default();
    reader.read_bytes(&mut uuid.bytes)?;
    Ok(uuid)
  }

  #[inline]
  fn minimum_bytes_needed() -> usize {
    AmtUuid::SIZE
  }
}

impl<C: Context> Writable<C> for AmtUuid {
  #[inline]
  fn write_to<T: ?Sized + Writer<C>>(&self, writer: &mut T) -> Result<(), C::Error> {
    writer.write_bytes(&self.bytes)
  }
}
