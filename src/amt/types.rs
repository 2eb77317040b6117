use serde::{Deserialize, Serialize};

/// LAN interface settings ready for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceSettings {
  pub is_enabled: bool,
  /// "up" or "down"
  pub link_status: String,
  pub dhcp_enabled: bool,
  /// "active" or "passive"
  pub dhcp_mode: String,
  pub ip_address: String,
  pub mac_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteAccessStatus {
  pub network_status: String,
  pub remote_status: String,
  pub remote_trigger: String,
  pub mps_hostname: String,
}

/// An active trusted root certificate hash.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertHash {
  /// Lowercase hex, as many bytes as the algorithm produces.
  pub hash: String,
  pub name: String,
  pub algorithm: String,
  pub is_active: bool,
  pub is_default: bool,
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct LocalAccount {
  pub username: String,
  pub password: String,
}

impl std::fmt::Debug for LocalAccount {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("LocalAccount")
      .field("username", &self.username)
      .field("password", &"<redacted>")
      .finish()
  }
}
