use bytes::{Bytes, BytesMut};
use speedy::{Endianness, Readable};
#[allow(unused_imports)]
use log::{debug, error, trace, warn};

use crate::{
  error::{DecodeError, Error, Result},
  messages::{
    command::Command, header::ResponseHeader, request::Request, response::ResponsePayload,
    validity_trait::Validity,
  },
  network::channel::{Channel, DeviceChannel},
};

/// Sends one request and decodes the matching response.
///
/// The channel is left open; the caller owns its lifetime.
pub fn exchange<R, C>(channel: &mut Channel<C>, request: &R) -> Result<R::Response>
where
  R: Request,
  C: DeviceChannel,
{
  let message = request.to_bytes()?;
  let max = channel.max_message_size();
  if message.len() > max {
    return Err(Error::MessageTooLarge {
      size: message.len(),
      max,
    });
  }

  trace!("{:?} -> {} bytes", R::COMMAND, message.len());
  let written = channel.send(&message)?;
  if written != message.len() {
    error!(
      "{:?}: short write, {} of {} bytes",
      R::COMMAND,
      written,
      message.len()
    );
    return Err(Error::TransportFailure {
      reason: format!("short write: {} of {} bytes", written, message.len()),
    });
  }

  let mut buffer = BytesMut::zeroed(max);
  let received = channel.receive(&mut buffer)?;
  buffer.truncate(received);
  let reply = buffer.freeze();
  trace!("{:?} <- {} bytes", R::COMMAND.response(), reply.len());

  let payload = parse_response(R::COMMAND, &reply)?;
  let response = R::Response::decode(&payload)?;
  debug!("{:?} decoded {}", R::COMMAND, R::Response::NAME);
  Ok(response)
}

/// Validates the response header against `request` and returns the payload
/// that follows it.
///
/// A non-zero status is reported before the length is checked, since error
/// responses usually carry no payload.
pub fn parse_response(request: Command, reply: &Bytes) -> Result<Bytes> {
  if reply.len() < ResponseHeader::SIZE {
    return Err(
      DecodeError::LengthMismatch {
        what: "response header",
        expected: ResponseHeader::SIZE,
        actual: reply.len(),
      }
      .into(),
    );
  }
  let header =
    ResponseHeader::read_from_buffer_with_ctx(Endianness::LittleEndian, &reply[..ResponseHeader::SIZE])?;
  if !header.valid() {
    return Err(DecodeError::Malformed {
      what: "response header",
    }
    .into());
  }

  let expected = request.response();
  if header.header.command != expected {
    warn!(
      "Expected {:?}, firmware answered {:?}",
      expected, header.header.command
    );
    return Err(
      DecodeError::UnexpectedCommand {
        expected,
        actual: header.header.command,
      }
      .into(),
    );
  }

  if !header.status.is_success() {
    debug!("{:?} failed with status {}", request, header.status);
    return Err(Error::Status {
      command: request,
      status: header.status,
    });
  }

  DecodeError::expect_length(
    "response",
    ResponseHeader::SIZE + header.payload_length(),
    reply.len(),
  )?;
  Ok(reply.slice(ResponseHeader::SIZE..))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    messages::{
      request::{GetControlModeRequest, GetLocalSystemAccountRequest, GetUuidRequest},
      status::AmtStatus,
    },
    structure::{amt_uuid::AmtUuid, control_mode::ControlMode},
    test::{
      mock_device::{raw_reply, reply, status_reply, MockDevice},
      test_data::{control_mode_response_raw, uuid_response_raw},
    },
  };

  fn open(device: &MockDevice) -> Channel<crate::test::mock_device::MockChannel> {
    Channel::open(device).unwrap()
  }

  #[test]
  fn uuid_exchange() {
    let device = MockDevice::new(vec![uuid_response_raw()]);
    let mut channel = open(&device);
    let uuid = exchange(&mut channel, &GetUuidRequest).unwrap();
    assert_eq!(uuid.to_string(), "1c113fd2-3325-4594-a272-54b2038beb07");
    assert_eq!(device.sent(), vec![GetUuidRequest.to_bytes().unwrap()]);
  }

  #[test]
  fn control_mode_exchange() {
    let device = MockDevice::new(vec![control_mode_response_raw()]);
    let mut channel = open(&device);
    assert_eq!(
      exchange(&mut channel, &GetControlModeRequest).unwrap(),
      ControlMode::ADMIN_CONTROL
    );
  }

  #[test]
  fn status_is_reported_before_length() {
    let device = MockDevice::new(vec![status_reply(
      Command::GET_UUID,
      AmtStatus::NOT_READY,
    )]);
    let mut channel = open(&device);
    let err = exchange(&mut channel, &GetUuidRequest).unwrap_err();
    assert_eq!(err.status(), Some(AmtStatus::NOT_READY));
  }

  #[test]
  fn wrong_response_command() {
    let device = MockDevice::new(vec![reply(Command::GET_CONTROL_MODE, &ControlMode(1))]);
    let mut channel = open(&device);
    let err = exchange(&mut channel, &GetUuidRequest).unwrap_err();
    assert!(matches!(
      err,
      Error::Decode(DecodeError::UnexpectedCommand { .. })
    ));
  }

  #[test]
  fn request_echo_is_not_a_response() {
    let device = MockDevice::new(vec![raw_reply(
      Command::GET_UUID,
      AmtStatus::SUCCESS,
      &[0u8; 16],
    )]);
    let mut channel = open(&device);
    assert!(exchange(&mut channel, &GetUuidRequest).is_err());
  }

  #[test]
  fn truncated_reply() {
    let mut raw = uuid_response_raw();
    raw.truncate(20);
    let device = MockDevice::new(vec![raw]);
    let mut channel = open(&device);
    let err = exchange(&mut channel, &GetUuidRequest).unwrap_err();
    assert!(matches!(
      err,
      Error::Decode(DecodeError::LengthMismatch { .. })
    ));
  }

  #[test]
  fn header_shorter_than_minimum() {
    let device = MockDevice::new(vec![vec![1, 1, 0, 0, 0x5c, 0, 0x80, 4]]);
    let mut channel = open(&device);
    assert!(exchange(&mut channel, &GetUuidRequest).is_err());
  }

  #[test]
  fn payload_length_must_match_header() {
    // header claims 16 payload bytes, 17 delivered
    let mut raw = reply(Command::GET_UUID, &AmtUuid::new([0; 16]));
    raw.push(0);
    let device = MockDevice::new(vec![raw]);
    let mut channel = open(&device);
    assert!(exchange(&mut channel, &GetUuidRequest).is_err());
  }

  #[test]
  fn oversized_request_is_not_sent() {
    let device = MockDevice::new(vec![]).with_max_message_size(32);
    let mut channel = open(&device);
    let err = exchange(&mut channel, &GetLocalSystemAccountRequest::default()).unwrap_err();
    assert!(matches!(err, Error::MessageTooLarge { size: 52, max: 32 }));
    assert!(device.sent().is_empty());
  }

  #[test]
  fn short_write_fails() {
    let device = MockDevice::new(vec![uuid_response_raw()]).short_write();
    let mut channel = open(&device);
    assert!(matches!(
      exchange(&mut channel, &GetUuidRequest),
      Err(Error::TransportFailure { .. })
    ));
  }

  #[test]
  fn send_error_is_transport_failure() {
    let device = MockDevice::new(vec![]).failing_send();
    let mut channel = open(&device);
    assert!(matches!(
      exchange(&mut channel, &GetUuidRequest),
      Err(Error::TransportFailure { .. })
    ));
  }
}
