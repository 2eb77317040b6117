#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

use crate::{
  error::{Error, Result},
  messages::request::{
    EnumerateHashHandlesRequest, GetCertHashEntryRequest, GetCodeVersionsRequest,
    GetControlModeRequest, GetDnsSuffixRequest, GetLanInterfaceSettingsRequest,
    GetLocalSystemAccountRequest, GetRemoteAccessConnectionStatusRequest, GetUuidRequest, Request,
  },
  network::channel::{Channel, Device},
  pthi::codec,
  structure::{
    amt_uuid::AmtUuid,
    cert_hash::{CertHashEntry, HashHandle, HashHandles},
    code_versions::CodeVersions,
    control_mode::ControlMode,
    fixed_string::AnsiString,
    lan_settings::{LanInterface, LanInterfaceSettings},
    local_account::LocalSystemAccount,
    remote_access::RemoteAccessConnectionStatus,
  },
};

/// A handle whose entry could not be fetched during enumeration.
#[derive(Debug)]
pub struct SkippedHandle {
  pub handle: HashHandle,
  pub error: Error,
}

/// Result of walking all certificate hash handles. Entries are in handle
/// order and include inactive ones.
#[derive(Debug, Default)]
pub struct CertHashEnumeration {
  pub entries: Vec<CertHashEntry>,
  pub skipped: Vec<SkippedHandle>,
}

/// The firmware commands, one method per command.
pub trait PthiCommands {
  fn get_code_versions(&self) -> Result<CodeVersions>;
  fn get_uuid(&self) -> Result<AmtUuid>;
  fn get_control_mode(&self) -> Result<ControlMode>;
  fn get_dns_suffix(&self) -> Result<AnsiString>;
  fn enumerate_hash_handles(&self) -> Result<HashHandles>;
  fn get_certificate_hash_entry(&self, handle: HashHandle) -> Result<CertHashEntry>;
  fn get_remote_access_connection_status(&self) -> Result<RemoteAccessConnectionStatus>;
  fn get_lan_interface_settings(&self, interface: LanInterface) -> Result<LanInterfaceSettings>;
  fn get_local_system_account(&self) -> Result<LocalSystemAccount>;

  /// Lists the hash handles, then fetches each entry. Failing to list the
  /// handles is fatal; a failure on one handle only skips that handle.
  fn get_certificate_hashes(&self) -> Result<CertHashEnumeration> {
    let handles = self.enumerate_hash_handles()?;
    debug!("Enumerated {} certificate hash handles", handles.len());
    let mut result = CertHashEnumeration::default();
    for &handle in &handles.handles {
      match self.get_certificate_hash_entry(handle) {
        Ok(entry) => result.entries.push(entry),
        Err(error) => {
          warn!("Skipping certificate hash handle {:?}: {}", handle, error);
          result.skipped.push(SkippedHandle { handle, error });
        }
      }
    }
    Ok(result)
  }
}

/// Executes commands against a device, one channel session per command.
pub struct PthiClient<D: Device> {
  device: D,
}

impl<D: Device> PthiClient<D> {
  pub fn new(device: D) -> PthiClient<D> {
    PthiClient { device }
  }

  /// Opens a channel, runs one request/response exchange and closes the
  /// channel again, whatever the outcome.
  pub fn call<R: Request>(&self, request: &R) -> Result<R::Response> {
    let mut channel = Channel::open(&self.device)?;
    let result = codec::exchange(&mut channel, request);
    channel.close();
    if let Err(e) = &result {
      debug!("{:?} failed: {}", R::COMMAND, e);
    }
    result
  }
}

impl<D: Device> PthiCommands for PthiClient<D> {
  fn get_code_versions(&self) -> Result<CodeVersions> {
    self.call(&GetCodeVersionsRequest)
  }

  fn get_uuid(&self) -> Result<AmtUuid> {
    self.call(&GetUuidRequest)
  }

  fn get_control_mode(&self) -> Result<ControlMode> {
    self.call(&GetControlModeRequest)
  }

  fn get_dns_suffix(&self) -> Result<AnsiString> {
    self.call(&GetDnsSuffixRequest)
  }

  fn enumerate_hash_handles(&self) -> Result<HashHandles> {
    self.call(&EnumerateHashHandlesRequest)
  }

  fn get_certificate_hash_entry(&self, handle: HashHandle) -> Result<CertHashEntry> {
    self.call(&GetCertHashEntryRequest { handle })
  }

  fn get_remote_access_connection_status(&self) -> Result<RemoteAccessConnectionStatus> {
    self.call(&GetRemoteAccessConnectionStatusRequest)
  }

  fn get_lan_interface_settings(&self, interface: LanInterface) -> Result<LanInterfaceSettings> {
    self.call(&GetLanInterfaceSettingsRequest::new(interface))
  }

  fn get_local_system_account(&self) -> Result<LocalSystemAccount> {
    self.call(&GetLocalSystemAccountRequest::default())
  }
}
