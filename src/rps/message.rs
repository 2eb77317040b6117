use base64::Engine;
#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};
use serde::{Deserialize, Serialize};

use crate::{
  amt::{command::Amt, types::CertHash},
  constants::{
    AMT_VERSION_KEY, APP_VERSION, BUILD_NUMBER_KEY, CLIENT_NAME, DEFAULT_API_KEY,
    PROTOCOL_VERSION, RESPONSE_METHOD, SKU_KEY, STATUS_OK,
  },
  error::{Error, Result},
  rps::config::ActivationConfig,
  structure::control_mode::ControlMode,
};

/// Envelope exchanged with the activation server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
  pub method: String,
  pub api_key: String,
  pub app_version: String,
  pub protocol_version: String,
  pub status: String,
  pub message: String,
  pub fqdn: String,
  /// Base64 of the inner payload.
  pub payload: String,
}

impl Message {
  pub fn decode_payload(&self) -> Result<Vec<u8>> {
    Ok(base64::engine::general_purpose::STANDARD.decode(&self.payload)?)
  }
}

/// Description of this platform sent with an activation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePayload {
  #[serde(rename = "ver")]
  pub version: String,
  pub build: String,
  pub sku: String,
  pub uuid: String,
  pub username: String,
  pub password: String,
  pub current_mode: u32,
  pub hostname: String,
  pub fqdn: String,
  pub client: String,
  #[serde(rename = "certHashes")]
  pub certificate_hashes: Vec<CertHash>,
}

/// Builds activation messages from what the firmware reports.
pub struct Payload<A> {
  amt: A,
}

impl<A: Amt> Payload<A> {
  pub fn new(amt: A) -> Payload<A> {
    Payload { amt }
  }

  pub fn amt(&self) -> &A {
    &self.amt
  }

  /// Collects the platform description. `dns_suffix` and `hostname`
  /// override what firmware and host report.
  pub fn create_payload(
    &self,
    dns_suffix: Option<&str>,
    hostname: Option<&str>,
  ) -> Result<MessagePayload> {
    self
      .collect(dns_suffix, hostname)
      .map(|(_mode, payload)| payload)
  }

  fn collect(
    &self,
    dns_suffix: Option<&str>,
    hostname: Option<&str>,
  ) -> Result<(ControlMode, MessagePayload)> {
    let hostname = match hostname {
      Some(h) => h.to_string(),
      None => self.amt.get_os_hostname()?,
    };
    let fqdn = match dns_suffix {
      Some(s) => s.to_string(),
      None => self.resolve_dns_suffix()?,
    };
    let account = self.amt.get_local_system_account()?;
    let mode = self.amt.get_control_mode()?;

    let payload = MessagePayload {
      version: self.amt.get_version_data_from_me(AMT_VERSION_KEY)?,
      build: self.amt.get_version_data_from_me(BUILD_NUMBER_KEY)?,
      sku: self.amt.get_version_data_from_me(SKU_KEY)?,
      uuid: self.amt.get_uuid()?,
      username: account.username,
      password: account.password,
      current_mode: mode.0,
      hostname,
      fqdn,
      client: CLIENT_NAME.to_string(),
      certificate_hashes: self.amt.get_certificate_hashes()?,
    };
    debug!(
      "Payload for {} ({}), mode {}, {} certificate hashes",
      payload.hostname,
      payload.uuid,
      payload.current_mode,
      payload.certificate_hashes.len()
    );
    Ok((mode, payload))
  }

  // firmware suffix first, then the operating system's
  fn resolve_dns_suffix(&self) -> Result<String> {
    let suffix = self.amt.get_dns_suffix()?;
    if !suffix.is_empty() {
      return Ok(suffix);
    }
    self.amt.get_os_dns_suffix()
  }

  /// Activation request for `config.method`. A provisioned platform needs
  /// `config.password`, which then replaces the local account password.
  pub fn create_message_request(&self, config: &ActivationConfig) -> Result<Message> {
    let (mode, mut payload) = self.collect(config.dns_suffix(), config.hostname())?;
    if mode.is_provisioned() {
      match config.password() {
        Some(password) => payload.password = password.to_string(),
        None => {
          warn!("Platform is in control mode {}", mode.0);
          return Err(Error::PasswordRequired {
            control_mode: mode.0,
          });
        }
      }
    }
    let json = serde_json::to_vec(&payload)?;
    info!("Activation request {:?} for {}", config.method, payload.fqdn);
    Ok(Message {
      method: config.method.clone(),
      api_key: config.api_key.clone(),
      app_version: APP_VERSION.to_string(),
      protocol_version: PROTOCOL_VERSION.to_string(),
      status: STATUS_OK.to_string(),
      message: STATUS_OK.to_string(),
      fqdn: payload.fqdn,
      payload: base64::engine::general_purpose::STANDARD.encode(json),
    })
  }

  /// Wraps raw bytes going back to the activation server.
  pub fn create_message_response(&self, payload: &[u8]) -> Message {
    Message {
      method: RESPONSE_METHOD.to_string(),
      api_key: DEFAULT_API_KEY.to_string(),
      app_version: APP_VERSION.to_string(),
      protocol_version: PROTOCOL_VERSION.to_string(),
      status: STATUS_OK.to_string(),
      message: STATUS_OK.to_string(),
      fqdn: String::new(),
      payload: base64::engine::general_purpose::STANDARD.encode(payload),
    }
  }
}

#[cfg(test)]
mod tests {
  use std::cell::Cell;

  use super::*;
  use crate::amt::types::{InterfaceSettings, LocalAccount, RemoteAccessStatus};

  struct MockAmt {
    mebx_dns_suffix: &'static str,
    control_mode: u32,
    os_dns_calls: Cell<usize>,
  }

  impl Default for MockAmt {
    fn default() -> Self {
      MockAmt {
        mebx_dns_suffix: "mebxdns",
        control_mode: 0,
        os_dns_calls: Cell::new(0),
      }
    }
  }

  impl Amt for MockAmt {
    fn get_version_data_from_me(&self, _key: &str) -> Result<String> {
      Ok("Version".to_string())
    }
    fn get_uuid(&self) -> Result<String> {
      Ok("123-456-789".to_string())
    }
    fn get_control_mode(&self) -> Result<ControlMode> {
      Ok(ControlMode(self.control_mode))
    }
    fn get_os_hostname(&self) -> Result<String> {
      Ok("testhost".to_string())
    }
    fn get_os_dns_suffix(&self) -> Result<String> {
      self.os_dns_calls.set(self.os_dns_calls.get() + 1);
      Ok("osdns".to_string())
    }
    fn get_dns_suffix(&self) -> Result<String> {
      Ok(self.mebx_dns_suffix.to_string())
    }
    fn get_certificate_hashes(&self) -> Result<Vec<CertHash>> {
      Ok(vec![])
    }
    fn get_remote_access_connection_status(&self) -> Result<RemoteAccessStatus> {
      Ok(RemoteAccessStatus::default())
    }
    fn get_lan_interface_settings(&self, _use_wireless: bool) -> Result<InterfaceSettings> {
      Ok(InterfaceSettings::default())
    }
    fn get_local_system_account(&self) -> Result<LocalAccount> {
      Ok(LocalAccount {
        username: "Username".to_string(),
        password: "Password".to_string(),
      })
    }
  }

  fn payload(amt: MockAmt) -> Payload<MockAmt> {
    Payload::new(amt)
  }

  fn decode(message: &Message) -> MessagePayload {
    serde_json::from_slice(&message.decode_payload().unwrap()).unwrap()
  }

  #[test]
  fn create_payload() {
    let result = payload(MockAmt::default())
      .create_payload(None, None)
      .unwrap();
    assert_eq!(result.version, "Version");
    assert_eq!(result.build, "Version");
    assert_eq!(result.sku, "Version");
    assert_eq!(result.uuid, "123-456-789");
    assert_eq!(result.username, "Username");
    assert_eq!(result.password, "Password");
    assert_eq!(result.current_mode, 0);
    assert_eq!(result.hostname, "testhost");
    assert_eq!(result.fqdn, "mebxdns");
    assert_eq!(result.client, CLIENT_NAME);
    assert!(result.certificate_hashes.is_empty());
  }

  #[test]
  fn create_payload_with_os_dns_suffix() {
    let p = payload(MockAmt {
      mebx_dns_suffix: "",
      ..MockAmt::default()
    });
    let result = p.create_payload(None, None).unwrap();
    assert_eq!(result.fqdn, "osdns");
    assert_eq!(p.amt().os_dns_calls.get(), 1);
  }

  #[test]
  fn create_payload_with_overrides() {
    let p = payload(MockAmt::default());
    let result = p
      .create_payload(Some("vprodemo.com"), Some("override"))
      .unwrap();
    assert_eq!(result.fqdn, "vprodemo.com");
    assert_eq!(result.hostname, "override");
    assert_eq!(p.amt().os_dns_calls.get(), 0);
  }

  #[test]
  fn payload_json_field_names() {
    let result = payload(MockAmt::default())
      .create_payload(None, None)
      .unwrap();
    let json: serde_json::Value = serde_json::to_value(&result).unwrap();
    for field in &[
      "ver",
      "build",
      "sku",
      "uuid",
      "username",
      "password",
      "currentMode",
      "hostname",
      "fqdn",
      "client",
      "certHashes",
    ] {
      assert!(json.get(field).is_some(), "missing {}", field);
    }
  }

  #[test]
  fn activation_request_without_dns_suffix() {
    let result = payload(MockAmt::default())
      .create_message_request(&ActivationConfig::new("method"))
      .unwrap();
    assert_eq!(result.method, "method");
    assert_eq!(result.api_key, "key");
    assert_eq!(result.status, "ok");
    assert_eq!(result.message, "ok");
    assert!(!result.payload.is_empty());
    assert_eq!(result.protocol_version, PROTOCOL_VERSION);
    assert_eq!(result.app_version, APP_VERSION);
    assert_eq!(result.fqdn, "mebxdns");
  }

  #[test]
  fn activation_request_with_dns_suffix() {
    let config = ActivationConfig::new("method").with_dns_suffix("vprodemo.com");
    let result = payload(MockAmt::default())
      .create_message_request(&config)
      .unwrap();
    assert_eq!(result.method, "method");
    assert_eq!(result.fqdn, "vprodemo.com");
    assert_eq!(decode(&result).fqdn, "vprodemo.com");
  }

  #[test]
  fn activation_request_with_hostname() {
    let config = ActivationConfig::new("method").with_hostname("override");
    let result = payload(MockAmt::default())
      .create_message_request(&config)
      .unwrap();
    assert_eq!(decode(&result).hostname, "override");
  }

  #[test]
  fn provisioned_platform_requires_password() {
    let p = payload(MockAmt {
      control_mode: 1,
      ..MockAmt::default()
    });
    let err = p
      .create_message_request(&ActivationConfig::new("method"))
      .unwrap_err();
    assert!(matches!(err, Error::PasswordRequired { control_mode: 1 }));
  }

  #[test]
  fn provisioned_platform_uses_given_password() {
    let p = payload(MockAmt {
      control_mode: 1,
      ..MockAmt::default()
    });
    let config = ActivationConfig::new("method").with_password("password");
    let result = p.create_message_request(&config).unwrap();
    let inner = decode(&result);
    assert_eq!(inner.password, "password");
    assert_eq!(inner.current_mode, 1);
  }

  #[test]
  fn any_nonzero_control_mode_requires_password() {
    for mode in [2, 7] {
      let p = payload(MockAmt {
        control_mode: mode,
        ..MockAmt::default()
      });
      let err = p
        .create_message_request(&ActivationConfig::new("method"))
        .unwrap_err();
      assert!(matches!(err, Error::PasswordRequired { control_mode } if control_mode == mode));
    }
  }

  #[test]
  fn unprovisioned_platform_keeps_account_password() {
    let config = ActivationConfig::new("method").with_password("ignored");
    let result = payload(MockAmt::default())
      .create_message_request(&config)
      .unwrap();
    assert_eq!(decode(&result).password, "Password");
  }

  #[test]
  fn activation_response() {
    let result = payload(MockAmt::default()).create_message_response(b"123");
    assert_eq!(result.method, "response");
    assert_eq!(result.api_key, "key");
    assert_eq!(result.status, "ok");
    assert_eq!(result.message, "ok");
    assert_eq!(result.payload, "MTIz");
    assert_eq!(result.decode_payload().unwrap(), b"123");
    assert_eq!(result.protocol_version, PROTOCOL_VERSION);
    assert_eq!(result.app_version, APP_VERSION);
  }
}
