use speedy::{Context, Readable, Reader, Writable, Writer};
use static_assertions::const_assert_eq;

/// Which of the firmware's network interfaces to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanInterface {
  Wired,
  Wireless,
}

impl LanInterface {
  pub fn from_wireless(use_wireless: bool) -> LanInterface {
    if use_wireless {
      LanInterface::Wireless
    } else {
      LanInterface::Wired
    }
  }

  /// Interface index used in the request.
  pub fn index(self) -> u32 {
    match self {
      LanInterface::Wired => 0,
      LanInterface::Wireless => 1,
    }
  }
}

/// LAN interface settings as returned by GetLANInterfaceSettings.
///
/// `ipv4_address` holds the address with the first octet in the most
/// significant byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LanInterfaceSettings {
  pub enabled: u32,
  pub ipv4_address: u32,
  pub dhcp_enabled: u32,
  pub dhcp_ip_mode: u8,
  pub link_status: u8,
  pub mac_address: [u8; 6],
}

impl LanInterfaceSettings {
  pub const SIZE: usize = 4 + 4 + 4 + 1 + 1 + 6;
}

const_assert_eq!(LanInterfaceSettings::SIZE, 20);

impl<'a, C: Context> Readable<'a, C> for LanInterfaceSettings {
  #[inline]
  fn read_from<R: Reader<'a, C>>(reader: &mut R) -> Result<Self, C::Error> {
    let mut settings = LanInterfaceSettings {
      enabled: reader.read_u32()?,
      ipv4_address: reader.read_u32()?,
      dhcp_enabled: reader.read_u32()?,
      dhcp_ip_mode: reader.read_u8()?,
      link_status: reader.read_u8()?,
      ..LanInterfaceSettings::default()
    };
    reader.read_bytes(&mut settings.mac_address)?;
    Ok(settings)
  }

  #[inline]
  fn minimum_bytes_needed() -> usize {
    LanInterfaceSettings::SIZE
  }
}

impl<C: Context> Writable<C> for LanInterfaceSettings {
  #[inline]
  fn write_to<T: ?Sized + Writer<C>>(&self, writer: &mut T) -> Result<(), C::Error> {
    writer.write_u32(self.enabled)?;
    writer.write_u32(self.ipv4_address)?;
    writer.write_u32(self.dhcp_enabled)?;
    writer.write_u8(self.dhcp_ip_mode)?;
    writer.write_u8(self.link_status)?;
    writer.write_bytes(&self.mac_address)
  }
}
