// message headers
pub mod command;
pub mod header;
pub mod protocol_version;
pub mod status;

// typed requests and their response payloads
pub mod request;
pub mod response;

pub mod validity_trait;
