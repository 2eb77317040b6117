//! Mapping of firmware codes and raw buffers to presentation values.
//!
//! The label texts are relied upon by activation servers and must not be
//! reworded.

use itertools::Itertools;

use crate::structure::control_mode::ControlMode;

pub const UNKNOWN: &str = "unknown";

pub fn network_status_label(code: u32) -> &'static str {
  match code {
    0 => "direct",
    1 => "vpn",
    2 => "outside enterprise",
    _ => UNKNOWN,
  }
}

pub fn remote_status_label(code: u32) -> &'static str {
  match code {
    0 => "not connected",
    1 => "connecting",
    2 => "connected",
    _ => UNKNOWN,
  }
}

pub fn remote_trigger_label(code: u32) -> &'static str {
  match code {
    0 => "user initiated",
    1 => "alert",
    2 => "periodic",
    3 => "provisioning",
    _ => UNKNOWN,
  }
}

pub fn control_mode_label(mode: ControlMode) -> &'static str {
  match mode {
    ControlMode::PRE_PROVISIONING => "pre-provisioning state",
    ControlMode::CLIENT_CONTROL => "activated in client control mode",
    ControlMode::ADMIN_CONTROL => "activated in admin control mode",
    _ => "unknown state",
  }
}

/// Dotted decimal, first octet taken from the most significant byte.
pub fn format_ipv4(address: u32) -> String {
  format!(
    "{}.{}.{}.{}",
    (address >> 24) & 0xff,
    (address >> 16) & 0xff,
    (address >> 8) & 0xff,
    address & 0xff
  )
}

pub fn format_mac(mac: &[u8; 6]) -> String {
  mac.iter().map(|b| format!("{:02x}", b)).join(":")
}

pub fn to_hex(bytes: &[u8]) -> String {
  bytes.iter().map(|b| format!("{:02x}", b)).join("")
}

pub fn flag(value: u32) -> bool {
  value == 1
}

pub fn link_status_label(link_status: u8) -> &'static str {
  if link_status == 1 {
    "up"
  } else {
    "down"
  }
}

pub fn dhcp_mode_label(dhcp_ip_mode: u8) -> &'static str {
  if dhcp_ip_mode == 1 {
    "active"
  } else {
    "passive"
  }
}

/// Strips `pad` from both ends.
pub fn trim_padding(bytes: &[u8], pad: u8) -> &[u8] {
  let start = bytes.iter().position(|&b| b != pad).unwrap_or(bytes.len());
  let end = bytes.iter().rposition(|&b| b != pad).map_or(start, |i| i + 1);
  &bytes[start..end]
}
