//! Client side of the Intel AMT host interface (PTHI).
//!
//! The crate talks to the management engine firmware over a device channel
//! supplied by the caller, decodes the firmware's binary responses and turns
//! them into values an activation server understands.
//!
//! Layers, bottom up:
//!
//! * [`network::channel`]: the device channel capability and a scoped
//!   session around it.
//! * [`messages`] and [`structure`]: wire layouts of requests and responses.
//! * [`pthi`]: one request/response exchange per firmware command.
//! * [`amt`]: presentation values (labels, formatted addresses, UUIDs).
//! * [`rps`]: the activation request payload and its message envelope.
//!
//! # Example
//!
//! ```no_run
//! # use rpc_amt::network::channel::{Device, DeviceChannel};
//! # struct Mei;
//! # struct MeiChannel;
//! # impl DeviceChannel for MeiChannel {
//! #   fn send(&mut self, b: &[u8]) -> std::io::Result<usize> { Ok(b.len()) }
//! #   fn receive(&mut self, _b: &mut [u8]) -> std::io::Result<usize> { Ok(0) }
//! #   fn close(&mut self) {}
//! #   fn max_message_size(&self) -> usize { 5120 }
//! # }
//! # impl Device for Mei {
//! #   type Channel = MeiChannel;
//! #   fn open(&self) -> std::io::Result<MeiChannel> { Ok(MeiChannel) }
//! # }
//! use rpc_amt::{ActivationConfig, Amt, AmtCommand, Payload};
//!
//! let amt = AmtCommand::with_device(Mei);
//! println!("UUID {}", amt.get_uuid()?);
//!
//! let payload = Payload::new(amt);
//! let request = payload.create_message_request(&ActivationConfig::new("activate"))?;
//! println!("{}", serde_json::to_string(&request)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod amt;
pub mod constants;
pub mod error;
pub mod messages;
pub mod network;
pub mod pthi;
pub mod rps;
pub mod structure;

mod test;

pub use crate::{
  amt::{
    command::{Amt, AmtCommand},
    types::{CertHash, InterfaceSettings, LocalAccount, RemoteAccessStatus},
  },
  error::{DecodeError, Error, Result},
  messages::{command::Command, status::AmtStatus},
  network::{
    channel::{Channel, Device, DeviceChannel},
    host::{HostInterface, HostNetwork, SystemHostNetwork},
  },
  pthi::commands::{CertHashEnumeration, PthiClient, PthiCommands, SkippedHandle},
  rps::{
    config::ActivationConfig,
    message::{Message, MessagePayload, Payload},
  },
  structure::{control_mode::ControlMode, lan_settings::LanInterface},
};
