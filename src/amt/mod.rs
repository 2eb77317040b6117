pub mod command;
pub mod interpret;
pub mod types;
