use std::net::IpAddr;

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

use crate::{
  amt::{
    interpret::{
      dhcp_mode_label, flag, format_ipv4, format_mac, link_status_label, network_status_label,
      remote_status_label, remote_trigger_label, to_hex, trim_padding,
    },
    types::{CertHash, InterfaceSettings, LocalAccount, RemoteAccessStatus},
  },
  constants::NAME_PADDING_BYTE,
  error::{Error, Result},
  network::{
    channel::Device,
    host::{HostNetwork, SystemHostNetwork},
  },
  pthi::commands::{PthiClient, PthiCommands},
  structure::{
    cert_hash::{CertHashEntry, HashAlgorithm},
    control_mode::ControlMode,
    lan_settings::LanInterface,
    local_account::trim_nul,
  },
};

/// Presentation level view of the firmware.
pub trait Amt {
  /// Version string of the code version entry described by `key`.
  fn get_version_data_from_me(&self, key: &str) -> Result<String>;
  fn get_uuid(&self) -> Result<String>;
  fn get_control_mode(&self) -> Result<ControlMode>;
  /// Name of this host as the operating system reports it. The same host
  /// view supplies the OS DNS suffix.
  fn get_os_hostname(&self) -> Result<String>;
  /// DNS suffix derived from the host's reverse DNS. Empty if none found.
  fn get_os_dns_suffix(&self) -> Result<String>;
  /// DNS suffix configured in the firmware. May be empty.
  fn get_dns_suffix(&self) -> Result<String>;
  /// Active certificate hashes only.
  fn get_certificate_hashes(&self) -> Result<Vec<CertHash>>;
  fn get_remote_access_connection_status(&self) -> Result<RemoteAccessStatus>;
  fn get_lan_interface_settings(&self, use_wireless: bool) -> Result<InterfaceSettings>;
  fn get_local_system_account(&self) -> Result<LocalAccount>;
}

/// `Amt` on top of the firmware commands and the host network.
pub struct AmtCommand<P, H> {
  pthi: P,
  host: H,
}

impl<D: Device> AmtCommand<PthiClient<D>, SystemHostNetwork> {
  pub fn with_device(device: D) -> Self {
    AmtCommand::new(PthiClient::new(device), SystemHostNetwork)
  }
}

impl<P: PthiCommands, H: HostNetwork> AmtCommand<P, H> {
  pub fn new(pthi: P, host: H) -> AmtCommand<P, H> {
    AmtCommand { pthi, host }
  }

  pub fn pthi(&self) -> &P {
    &self.pthi
  }

  fn cert_hash(entry: &CertHashEntry) -> CertHash {
    let (algorithm, hash_size) = HashAlgorithm::interpret(entry.hash_algorithm);
    let name = trim_padding(entry.name.as_bytes(), NAME_PADDING_BYTE);
    CertHash {
      hash: to_hex(&entry.certificate_hash[..hash_size]),
      name: String::from_utf8_lossy(name).into_owned(),
      algorithm: algorithm.to_string(),
      is_active: entry.is_active(),
      is_default: entry.is_default(),
    }
  }

  /// Reverse lookup of the first non-loopback IPv4 address on the host
  /// interface whose MAC is `mac`, without the leading host label.
  fn reverse_lookup_suffix(&self, mac: &str) -> Option<String> {
    let interfaces = match self.host.interfaces() {
      Ok(i) => i,
      Err(e) => {
        warn!("Cannot list host interfaces: {:?}", e);
        return None;
      }
    };
    if interfaces.iter().all(|i| i.mac_address.is_none()) {
      debug!(
        "No hardware address on any of {} host interfaces, cannot match {}",
        interfaces.len(),
        mac
      );
      return None;
    }
    let hostname = match self.host.hostname() {
      Ok(h) => h,
      Err(e) => {
        warn!("Cannot read host name: {:?}", e);
        return None;
      }
    };

    for iface in interfaces {
      if iface.mac_address.as_deref() != Some(mac) {
        continue;
      }
      let address = iface
        .addresses
        .iter()
        .find(|a| matches!(a, IpAddr::V4(v4) if !v4.is_loopback()));
      if let Some(address) = address {
        let name = match self.host.lookup_addr(address) {
          Ok(name) => name,
          Err(e) => {
            info!("No reverse DNS name for {}: {:?}", address, e);
            return None;
          }
        };
        return Some(strip_host_label(&name, &hostname).to_string());
      }
    }
    debug!("No host interface with hardware address {}", mac);
    None
  }
}

// Drops the first label of `name` when it is the host name's first label.
fn strip_host_label<'a>(name: &'a str, hostname: &str) -> &'a str {
  let name = name.trim_matches('.');
  let host_label = hostname.split('.').next().unwrap_or_default();
  match name.split_once('.') {
    Some((first, rest)) if !host_label.is_empty() && first.eq_ignore_ascii_case(host_label) => {
      rest.trim_matches('.')
    }
    _ => name,
  }
}

impl<P: PthiCommands, H: HostNetwork> Amt for AmtCommand<P, H> {
  fn get_version_data_from_me(&self, key: &str) -> Result<String> {
    let versions = self.pthi.get_code_versions()?;
    match versions.find(key) {
      Some(entry) => {
        let text: Vec<u8> = entry
          .version
          .as_bytes()
          .iter()
          .copied()
          .filter(|&b| b != 0)
          .collect();
        Ok(String::from_utf8_lossy(&text).into_owned())
      }
      None => {
        debug!("Code version {:?} not reported by firmware", key);
        Error::not_found(key)
      }
    }
  }

  fn get_uuid(&self) -> Result<String> {
    Ok(self.pthi.get_uuid()?.to_string())
  }

  fn get_control_mode(&self) -> Result<ControlMode> {
    self.pthi.get_control_mode()
  }

  fn get_os_hostname(&self) -> Result<String> {
    self.host.hostname().map_err(Error::HostNetwork)
  }

  fn get_os_dns_suffix(&self) -> Result<String> {
    let lan = self.get_lan_interface_settings(false)?;
    let suffix = self
      .reverse_lookup_suffix(&lan.mac_address)
      .unwrap_or_default();
    info!("DNS suffix from operating system: {:?}", suffix);
    Ok(suffix)
  }

  fn get_dns_suffix(&self) -> Result<String> {
    Ok(self.pthi.get_dns_suffix()?.to_string_lossy())
  }

  fn get_certificate_hashes(&self) -> Result<Vec<CertHash>> {
    let enumeration = self.pthi.get_certificate_hashes()?;
    if !enumeration.skipped.is_empty() {
      warn!(
        "{} certificate hash handles could not be read",
        enumeration.skipped.len()
      );
    }
    Ok(
      enumeration
        .entries
        .iter()
        .filter(|e| e.is_active())
        .map(Self::cert_hash)
        .collect(),
    )
  }

  fn get_remote_access_connection_status(&self) -> Result<RemoteAccessStatus> {
    let status = self.pthi.get_remote_access_connection_status()?;
    let hostname = trim_padding(status.mps_hostname.as_bytes(), NAME_PADDING_BYTE);
    Ok(RemoteAccessStatus {
      network_status: network_status_label(status.network_status).to_string(),
      remote_status: remote_status_label(status.remote_status).to_string(),
      remote_trigger: remote_trigger_label(status.remote_trigger).to_string(),
      mps_hostname: String::from_utf8_lossy(hostname).into_owned(),
    })
  }

  fn get_lan_interface_settings(&self, use_wireless: bool) -> Result<InterfaceSettings> {
    let settings = self
      .pthi
      .get_lan_interface_settings(LanInterface::from_wireless(use_wireless))?;
    Ok(InterfaceSettings {
      is_enabled: flag(settings.enabled),
      link_status: link_status_label(settings.link_status).to_string(),
      dhcp_enabled: flag(settings.dhcp_enabled),
      dhcp_mode: dhcp_mode_label(settings.dhcp_ip_mode).to_string(),
      ip_address: format_ipv4(settings.ipv4_address),
      mac_address: format_mac(&settings.mac_address),
    })
  }

  fn get_local_system_account(&self) -> Result<LocalAccount> {
    let account = self.pthi.get_local_system_account()?;
    Ok(LocalAccount {
      username: String::from_utf8_lossy(trim_nul(&account.username)).into_owned(),
      password: String::from_utf8_lossy(trim_nul(&account.password)).into_owned(),
    })
  }
}
