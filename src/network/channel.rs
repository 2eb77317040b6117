use std::io;

#[allow(unused_imports)]
use log::{debug, error, trace, warn};

use crate::error::{Error, Result};

/// One open session with the management engine host interface.
///
/// How the session is obtained (MEI character device, driver ioctl, named
/// pipe) is up to the implementor. Each `send` carries one complete message
/// and each `receive` returns one complete message.
pub trait DeviceChannel {
  fn send(&mut self, buffer: &[u8]) -> io::Result<usize>;
  fn receive(&mut self, buffer: &mut [u8]) -> io::Result<usize>;
  /// Releases the session. Must be safe to call more than once.
  fn close(&mut self);
  /// Largest message the session accepts or delivers.
  fn max_message_size(&self) -> usize;
}

/// Something that can open sessions with the management engine. Sessions
/// are exclusive, so at most one should be open at a time.
pub trait Device {
  type Channel: DeviceChannel;

  fn open(&self) -> io::Result<Self::Channel>;
}

/// Scoped session: closed when dropped, on every exit path.
pub struct Channel<C: DeviceChannel> {
  inner: Option<C>,
  max_message_size: usize,
}

impl<C: DeviceChannel> Channel<C> {
  pub fn open<D>(device: &D) -> Result<Channel<C>>
  where
    D: Device<Channel = C>,
  {
    let inner = device.open().map_err(|e| {
      error!("Cannot open management engine channel: {:?}", e);
      Error::TransportUnavailable(e)
    })?;
    let max_message_size = inner.max_message_size();
    trace!("Channel open, max message size {}", max_message_size);
    Ok(Channel {
      inner: Some(inner),
      max_message_size,
    })
  }

  pub fn max_message_size(&self) -> usize {
    self.max_message_size
  }

  pub fn send(&mut self, buffer: &[u8]) -> Result<usize> {
    match self.inner.as_mut() {
      Some(inner) => inner.send(buffer).map_err(|e| Error::TransportFailure {
        reason: format!("send: {}", e),
      }),
      None => Error::transport_failure("send on closed channel"),
    }
  }

  pub fn receive(&mut self, buffer: &mut [u8]) -> Result<usize> {
    match self.inner.as_mut() {
      Some(inner) => inner.receive(buffer).map_err(|e| Error::TransportFailure {
        reason: format!("receive: {}", e),
      }),
      None => Error::transport_failure("receive on closed channel"),
    }
  }

  pub fn close(&mut self) {
    if let Some(mut inner) = self.inner.take() {
      inner.close();
      trace!("Channel closed");
    }
  }

  pub fn is_open(&self) -> bool {
    self.inner.is_some()
  }
}

impl<C: DeviceChannel> Drop for Channel<C> {
  fn drop(&mut self) {
    self.close();
  }
}
