use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_API_KEY;

/// Caller supplied settings for building an activation request.
///
/// Empty strings and missing fields are treated alike.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActivationConfig {
  /// Activation service method, e.g. "activate".
  pub method: String,
  pub api_key: String,
  /// Overrides the DNS suffix reported by firmware and host.
  pub dns_suffix: Option<String>,
  /// Overrides the host name of this machine.
  pub hostname: Option<String>,
  /// AMT admin password. Required once the platform is provisioned.
  pub password: Option<String>,
}

impl ActivationConfig {
  pub fn new(method: &str) -> ActivationConfig {
    ActivationConfig {
      method: method.to_string(),
      ..ActivationConfig::default()
    }
  }

  pub fn with_dns_suffix(mut self, dns_suffix: &str) -> ActivationConfig {
    self.dns_suffix = Some(dns_suffix.to_string());
    self
  }

  pub fn with_hostname(mut self, hostname: &str) -> ActivationConfig {
    self.hostname = Some(hostname.to_string());
    self
  }

  pub fn with_password(mut self, password: &str) -> ActivationConfig {
    self.password = Some(password.to_string());
    self
  }

  pub fn dns_suffix(&self) -> Option<&str> {
    non_empty(&self.dns_suffix)
  }

  pub fn hostname(&self) -> Option<&str> {
    non_empty(&self.hostname)
  }

  pub fn password(&self) -> Option<&str> {
    non_empty(&self.password)
  }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
  value.as_deref().filter(|s| !s.is_empty())
}

impl Default for ActivationConfig {
  fn default() -> Self {
    ActivationConfig {
      method: String::new(),
      api_key: DEFAULT_API_KEY.to_string(),
      dns_suffix: None,
      hostname: None,
      password: None,
    }
  }
}

impl std::fmt::Debug for ActivationConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ActivationConfig")
      .field("method", &self.method)
      .field("api_key", &self.api_key)
      .field("dns_suffix", &self.dns_suffix)
      .field("hostname", &self.hostname)
      .field("password", &self.password.as_ref().map(|_| "<redacted>"))
      .finish()
  }
}
