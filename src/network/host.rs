use std::{collections::BTreeMap, io, net::IpAddr};

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

/// One host network interface with its hardware address, if known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInterface {
  pub name: String,
  /// Lowercase, colon separated.
  pub mac_address: Option<String>,
  pub addresses: Vec<IpAddr>,
}

/// Host networking facilities needed for the DNS suffix fallback.
pub trait HostNetwork {
  fn interfaces(&self) -> io::Result<Vec<HostInterface>>;
  /// Reverse lookup of `addr`.
  fn lookup_addr(&self, addr: &IpAddr) -> io::Result<String>;
  fn hostname(&self) -> io::Result<String>;
}

impl<H: HostNetwork + ?Sized> HostNetwork for &H {
  fn interfaces(&self) -> io::Result<Vec<HostInterface>> {
    (**self).interfaces()
  }

  fn lookup_addr(&self, addr: &IpAddr) -> io::Result<String> {
    (**self).lookup_addr(addr)
  }

  fn hostname(&self) -> io::Result<String> {
    (**self).hostname()
  }
}

/// Operating system view of the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHostNetwork;

impl SystemHostNetwork {
  #[cfg(target_os = "linux")]
  fn hardware_address(name: &str) -> Option<String> {
    match std::fs::read_to_string(format!("/sys/class/net/{}/address", name)) {
      Ok(s) => Some(s.trim().to_lowercase()),
      Err(e) => {
        trace!("No hardware address for {}: {:?}", name, e);
        None
      }
    }
  }

  #[cfg(not(target_os = "linux"))]
  fn hardware_address(_name: &str) -> Option<String> {
    None
  }
}

// One entry per interface name, addresses in reported order.
fn group_by_name<I, F>(addresses: I, hardware_address: F) -> Vec<HostInterface>
where
  I: IntoIterator<Item = (String, IpAddr)>,
  F: Fn(&str) -> Option<String>,
{
  let mut by_name: BTreeMap<String, HostInterface> = BTreeMap::new();
  for (name, ip) in addresses {
    by_name
      .entry(name)
      .or_insert_with_key(|name| HostInterface {
        name: name.clone(),
        mac_address: hardware_address(name),
        addresses: Vec::new(),
      })
      .addresses
      .push(ip);
  }
  by_name.into_values().collect()
}

impl HostNetwork for SystemHostNetwork {
  fn interfaces(&self) -> io::Result<Vec<HostInterface>> {
    let addresses = if_addrs::get_if_addrs()?
      .into_iter()
      .map(|iface| {
        let ip = iface.ip();
        (iface.name, ip)
      });
    Ok(group_by_name(addresses, Self::hardware_address))
  }

  fn lookup_addr(&self, addr: &IpAddr) -> io::Result<String> {
    dns_lookup::lookup_addr(addr)
  }

  fn hostname(&self) -> io::Result<String> {
    dns_lookup::get_hostname()
  }
}
