// Identification of this client towards the activation service.
pub const CLIENT_NAME: &str = "RPC";
pub const APP_VERSION: &str = "1.0.0";
// Version of the messages exchanged with the activation service.
pub const PROTOCOL_VERSION: &str = "4.0.0";

pub const DEFAULT_API_KEY: &str = "key";
pub const STATUS_OK: &str = "ok";
pub const RESPONSE_METHOD: &str = "response";

// Code version table key holding the firmware version.
pub const AMT_VERSION_KEY: &str = "AMT";
pub const BUILD_NUMBER_KEY: &str = "Build Number";
pub const SKU_KEY: &str = "Sku";

// Typical HECI maximum message length.
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 5120;

// Firmware buffer capacities
pub const BIOS_VERSION_LEN: usize = 65;
pub const VERSIONS_NUMBER: usize = 50;
pub const UNICODE_STRING_LEN: usize = 20;
pub const CERT_HASH_MAX_LENGTH: usize = 64;
pub const CERT_HASH_MAX_NUMBER: usize = 33;
pub const CFG_MAX_ACL_USER_LENGTH: usize = 33;
pub const CFG_MAX_ACL_PWD_LENGTH: usize = 33;
pub const LOCAL_SYSTEM_ACCOUNT_RESERVED: usize = 40;

// Filler byte the firmware uses around certificate names.
pub const NAME_PADDING_BYTE: u8 = 0xab;
