use speedy::{Readable, Writable};

/// Provisioning state of the platform as a raw firmware code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Readable, Writable)]
pub struct ControlMode(pub u32);

impl ControlMode {
  pub const PRE_PROVISIONING: ControlMode = ControlMode(0);
  pub const CLIENT_CONTROL: ControlMode = ControlMode(1);
  pub const ADMIN_CONTROL: ControlMode = ControlMode(2);

  pub fn is_provisioned(self) -> bool {
    self != ControlMode::PRE_PROVISIONING
  }
}
