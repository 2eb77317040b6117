use speedy::{Context, Readable, Reader, Writable, Writer};

use crate::constants::{CFG_MAX_ACL_PWD_LENGTH, CFG_MAX_ACL_USER_LENGTH};

/// Local system account credentials. Both fields are NUL-padded C strings;
/// the firmware sends no length for them.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LocalSystemAccount {
  pub username: [u8; CFG_MAX_ACL_USER_LENGTH],
  pub password: [u8; CFG_MAX_ACL_PWD_LENGTH],
}

impl LocalSystemAccount {
  pub const SIZE: usize = CFG_MAX_ACL_USER_LENGTH + CFG_MAX_ACL_PWD_LENGTH;

  pub fn new(username: &[u8], password: &[u8]) -> LocalSystemAccount {
    let mut account = LocalSystemAccount::default();
    let u = username.len().min(CFG_MAX_ACL_USER_LENGTH);
    account.username[..u].copy_from_slice(&username[..u]);
    let p = password.len().min(CFG_MAX_ACL_PWD_LENGTH);
    account.password[..p].copy_from_slice(&password[..p]);
    account
  }
}

impl Default for LocalSystemAccount {
  fn default() -> Self {
    LocalSystemAccount {
      username: [0u8; CFG_MAX_ACL_USER_LENGTH],
      password: [0u8; CFG_MAX_ACL_PWD_LENGTH],
    }
  }
}

// Keeps the password out of logs.
impl std::fmt::Debug for LocalSystemAccount {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("LocalSystemAccount")
      .field("username", &String::from_utf8_lossy(trim_nul(&self.username)))
      .field("password", &"<redacted>")
      .finish()
  }
}

/// Bytes before the first NUL, or the whole buffer if there is none.
pub fn trim_nul(buffer: &[u8]) -> &[u8] {
  let end = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
  &buffer[..end]
}

impl<'a, C: Context> Readable<'a, C> for LocalSystemAccount {
  #[inline]
  fn read_from<R: Reader<'a, C>>(reader: &mut R) -> Result<Self, C::Error> {
    let mut account = LocalSystemAccount::default();
    reader.read_bytes(&mut account.username)?;
    reader.read_bytes(&mut account.password)?;
    Ok(account)
  }

  #[inline]
  fn minimum_bytes_needed() -> usize {
    LocalSystemAccount::SIZE
  }
}

impl<C: Context> Writable<C> for LocalSystemAccount {
  #[inline]
  fn write_to<T: ?Sized + Writer<C>>(&self, writer: &mut T) -> Result<(), C::Error> {
    writer.write_bytes(&self.username)?;
    writer.write_bytes(&self.password)
  }
}
