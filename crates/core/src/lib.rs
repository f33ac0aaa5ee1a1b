pub mod config;
pub mod error;
pub mod logging;
pub mod version;
pub mod xep;

pub use error::{Result, SiproxylinError};
pub use version::{
    APP_NAME, VersionDescriptor, VersionInfo, get_full_version_info, get_version_string,
};
pub use xep::{SUPPORTED_XEPS, SupportedXep};
