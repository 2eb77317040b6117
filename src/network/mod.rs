pub mod channel;
pub mod host;
