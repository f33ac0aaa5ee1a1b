pub mod error;
pub mod software_version;

pub use error::SoftwareVersionError;
pub use software_version::{
    NS_VERSION, SoftwareVersion, build_version_response, disco_features, is_version_query,
};
