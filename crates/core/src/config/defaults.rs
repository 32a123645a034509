//! Default values and functions for configuration

// Default constants
pub(crate) const DEFAULT_STORAGE_PROVIDER: &str = "mongodb";
pub(crate) const DEFAULT_APP_NAME: &str = "mongoidx";
pub(crate) const DEFAULT_SERVER_API_VERSION: &str = "1";

/// Environment variable holding the connection string, honoured for compatibility
pub const MONGODB_URL_ENV: &str = "MONGODB_URL";

/// Prefix for environment overrides (`MONGOIDX_STORAGE__URL`, ...)
pub(crate) const ENV_PREFIX: &str = "MONGOIDX";

pub(crate) const VALID_STORAGE_PROVIDERS: [&str; 2] = ["mongodb", "mock"];
pub(crate) const VALID_SERVER_API_VERSIONS: [&str; 1] = ["1"];

pub(crate) fn default_storage_provider() -> String {
    DEFAULT_STORAGE_PROVIDER.to_string()
}

pub(crate) fn default_app_name() -> String {
    DEFAULT_APP_NAME.to_string()
}

pub(crate) fn default_connect_timeout_secs() -> u64 {
    10
}

pub(crate) fn default_server_selection_timeout_secs() -> u64 {
    30
}

pub(crate) fn default_server_api_version() -> String {
    DEFAULT_SERVER_API_VERSION.to_string()
}
