#![allow(dead_code)]

use std::{cell::RefCell, collections::HashMap, io, net::IpAddr, rc::Rc};

use byteorder::{ByteOrder, LittleEndian};
use speedy::{Endianness, Writable};

use rpc_amt::{
  constants::{CERT_HASH_MAX_LENGTH, DEFAULT_MAX_MESSAGE_SIZE},
  messages::{
    header::ResponseHeader, request::parse_request, response::ResponsePayload,
  },
  structure::{
    amt_uuid::AmtUuid,
    cert_hash::{CertHashEntry, HashHandle, HashHandles},
    code_versions::{AmtVersionType, CodeVersions},
    control_mode::ControlMode,
    fixed_string::AnsiString,
    lan_settings::LanInterfaceSettings,
    local_account::LocalSystemAccount,
    remote_access::RemoteAccessConnectionStatus,
  },
  AmtStatus, Command, Device, DeviceChannel, HostInterface, HostNetwork,
};

pub fn init_logging() {
  let _ = env_logger::builder().is_test(true).try_init();
}

/// Firmware state the scripted device answers from.
#[derive(Clone)]
pub struct Firmware {
  pub code_versions: CodeVersions,
  pub uuid: [u8; 16],
  pub control_mode: u32,
  pub dns_suffix: Vec<u8>,
  pub cert_hashes: Vec<CertHashEntry>,
  /// Handles answered with a failure status.
  pub failing_handles: Vec<u32>,
  pub remote_access: RemoteAccessConnectionStatus,
  pub wired: LanInterfaceSettings,
  pub wireless: LanInterfaceSettings,
  pub account: LocalSystemAccount,
}

pub fn cert_hash(is_active: u32, is_default: u32, algorithm: u8, hash: &[u8], name: &[u8]) -> CertHashEntry {
  let mut certificate_hash = [0u8; CERT_HASH_MAX_LENGTH];
  certificate_hash[..hash.len()].copy_from_slice(hash);
  CertHashEntry {
    is_default,
    is_active,
    certificate_hash,
    hash_algorithm: algorithm,
    name: AnsiString::new(name),
  }
}

impl Default for Firmware {
  fn default() -> Self {
    let versions = [
      ("Flash", "11.8.55"),
      ("Netstack", "11.8.55"),
      ("AMTApps", "11.8.55"),
      ("AMT", "11.8.55"),
      ("Sku", "16392"),
      ("VendorID", "8086"),
      ("Build Number", "3510"),
    ]
    .iter()
    .filter_map(|(d, v)| AmtVersionType::new(d, v))
    .collect();

    let mut name = vec![0xab, 0xab];
    name.extend_from_slice(b"VeriSign Class 3 Primary CA-G5");
    name.push(0xab);

    Firmware {
      code_versions: CodeVersions::new(b"VVRBDW.86A.0049.2017.0622.1349", versions),
      uuid: [
        0xd2, 0x3f, 0x11, 0x1c, 0x25, 0x33, 0x94, 0x45, 0xa2, 0x72, 0x54, 0xb2, 0x03, 0x8b, 0xeb,
        0x07,
      ],
      control_mode: 0,
      dns_suffix: b"vprodemo.com".to_vec(),
      cert_hashes: vec![
        cert_hash(1, 1, 2, &[0x9a; 32], &name),
        cert_hash(0, 0, 1, &[0x11; 20], b"Inactive"),
        cert_hash(1, 0, 3, &[0x42; 48], b"Go Daddy Root"),
      ],
      failing_handles: vec![],
      remote_access: RemoteAccessConnectionStatus {
        network_status: 0,
        remote_status: 2,
        remote_trigger: 3,
        mps_hostname: AnsiString::new(b"mps.vprodemo.com"),
      },
      wired: LanInterfaceSettings {
        enabled: 1,
        ipv4_address: 0xc0a8_0117,
        dhcp_enabled: 1,
        dhcp_ip_mode: 2,
        link_status: 1,
        mac_address: [0xa4, 0xbb, 0x6d, 0x89, 0x52, 0xe4],
      },
      wireless: LanInterfaceSettings::default(),
      account: LocalSystemAccount::new(b"$$OsAdmin", b"qE!7gR@2s"),
    }
  }
}

fn reply(command: Command, status: AmtStatus, body: &[u8]) -> Vec<u8> {
  let mut bytes = ResponseHeader::new(command.response(), status, body.len())
    .write_to_vec_with_ctx(Endianness::LittleEndian)
    .unwrap();
  bytes.extend_from_slice(body);
  bytes
}

fn ok<P: ResponsePayload>(command: Command, payload: &P) -> Vec<u8> {
  reply(command, AmtStatus::SUCCESS, &payload.encode().unwrap())
}

impl Firmware {
  /// Answer to one serialized request.
  pub fn answer(&self, request: &[u8]) -> Vec<u8> {
    let (header, body) = match parse_request(request) {
      Ok(r) => r,
      Err(_) => return reply(Command::from_raw(0), AmtStatus::INVALID_MESSAGE_LENGTH, &[]),
    };
    let command = header.command;
    match command {
      Command::GET_CODE_VERSIONS => ok(command, &self.code_versions),
      Command::GET_UUID => ok(command, &AmtUuid::new(self.uuid)),
      Command::GET_CONTROL_MODE => ok(command, &ControlMode(self.control_mode)),
      Command::GET_PKI_FQDN_SUFFIX => ok(command, &AnsiString::new(&self.dns_suffix)),
      Command::ENUMERATE_HASH_HANDLES => {
        let handles = (0..self.cert_hashes.len() as u32)
          .chain(self.failing_handles.iter().copied())
          .map(HashHandle)
          .collect();
        ok(command, &HashHandles::new(handles))
      }
      Command::GET_CERTHASH_ENTRY => {
        let handle = LittleEndian::read_u32(body) as usize;
        match self.cert_hashes.get(handle) {
          Some(entry) => ok(command, entry),
          None => reply(command, AmtStatus::INVALID_AMT_MODE, &[]),
        }
      }
      Command::GET_REMOTE_ACCESS_CONNECTION_STATUS => ok(command, &self.remote_access),
      Command::GET_LAN_INTERFACE_SETTINGS => match LittleEndian::read_u32(body) {
        0 => ok(command, &self.wired),
        _ => ok(command, &self.wireless),
      },
      Command::GET_LOCAL_SYSTEM_ACCOUNT => ok(command, &self.account),
      _ => reply(command, AmtStatus::INTERNAL_ERROR, &[]),
    }
  }
}

#[derive(Default)]
pub struct Sessions {
  pub open: usize,
  pub max_open: usize,
  pub total: usize,
  pub requests: Vec<Vec<u8>>,
}

/// Device backed by a `Firmware`; every session answers from it.
#[derive(Clone)]
pub struct FirmwareDevice {
  pub firmware: Rc<Firmware>,
  pub sessions: Rc<RefCell<Sessions>>,
}

impl FirmwareDevice {
  pub fn new(firmware: Firmware) -> FirmwareDevice {
    FirmwareDevice {
      firmware: Rc::new(firmware),
      sessions: Rc::new(RefCell::new(Sessions::default())),
    }
  }

  pub fn commands(&self) -> Vec<Command> {
    self
      .sessions
      .borrow()
      .requests
      .iter()
      .map(|r| parse_request(r).unwrap().0.command)
      .collect()
  }
}

pub struct FirmwareChannel {
  device: FirmwareDevice,
  pending: Option<Vec<u8>>,
  closed: bool,
}

impl Device for FirmwareDevice {
  type Channel = FirmwareChannel;

  fn open(&self) -> io::Result<FirmwareChannel> {
    let mut s = self.sessions.borrow_mut();
    s.open += 1;
    s.total += 1;
    s.max_open = s.max_open.max(s.open);
    Ok(FirmwareChannel {
      device: self.clone(),
      pending: None,
      closed: false,
    })
  }
}

impl DeviceChannel for FirmwareChannel {
  fn send(&mut self, buffer: &[u8]) -> io::Result<usize> {
    self.device.sessions.borrow_mut().requests.push(buffer.to_vec());
    self.pending = Some(self.device.firmware.answer(buffer));
    Ok(buffer.len())
  }

  fn receive(&mut self, buffer: &mut [u8]) -> io::Result<usize> {
    let reply = self
      .pending
      .take()
      .ok_or_else(|| io::Error::new(io::ErrorKind::WouldBlock, "nothing sent"))?;
    buffer[..reply.len()].copy_from_slice(&reply);
    Ok(reply.len())
  }

  fn close(&mut self) {
    if !self.closed {
      self.closed = true;
      self.device.sessions.borrow_mut().open -= 1;
    }
  }

  fn max_message_size(&self) -> usize {
    DEFAULT_MAX_MESSAGE_SIZE
  }
}

/// Host network with fixed answers.
#[derive(Default)]
pub struct StaticHost {
  pub hostname: String,
  pub interfaces: Vec<HostInterface>,
  pub names: HashMap<IpAddr, String>,
}

impl HostNetwork for StaticHost {
  fn interfaces(&self) -> io::Result<Vec<HostInterface>> {
    Ok(self.interfaces.clone())
  }

  fn lookup_addr(&self, addr: &IpAddr) -> io::Result<String> {
    self
      .names
      .get(addr)
      .cloned()
      .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "unknown host"))
  }

  fn hostname(&self) -> io::Result<String> {
    Ok(self.hostname.clone())
  }
}

pub fn static_host() -> StaticHost {
  let address: IpAddr = "192.168.1.23".parse().unwrap();
  let mut names = HashMap::new();
  names.insert(address, "nuc01.corp.example.com".to_string());
  StaticHost {
    hostname: "nuc01".to_string(),
    interfaces: vec![
      HostInterface {
        name: "lo".to_string(),
        mac_address: Some("00:00:00:00:00:00".to_string()),
        addresses: vec!["127.0.0.1".parse().unwrap()],
      },
      HostInterface {
        name: "enp0s31f6".to_string(),
        mac_address: Some("a4:bb:6d:89:52:e4".to_string()),
        addresses: vec!["fe80::a6bb:6dff:fe89:52e4".parse().unwrap(), address],
      },
    ],
    names,
  }
}
