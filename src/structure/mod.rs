pub mod amt_uuid;
pub mod cert_hash;
pub mod code_versions;
pub mod control_mode;
pub mod fixed_string;
pub mod lan_settings;
pub mod local_account;
pub mod remote_access;
