use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::version::VersionInfo;

/// Install the global fmt subscriber writing to stderr. `RUST_LOG` wins over
/// `default_level`. Calling this more than once is a no-op.
pub fn init(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Emit the startup banner for the resolved version.
pub fn log_banner(info: &VersionInfo) {
    info!(
        app = info.app_name,
        version = %info.version,
        codename = %info.codename,
        xeps = info.xeps.len(),
        "{} {} starting",
        info.app_name,
        info.version
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::VersionDescriptor;
    use tracing_test::traced_test;

    #[test]
    #[traced_test]
    fn banner_contains_version_and_codename() {
        log_banner(&VersionDescriptor::new("0.4.2", "Moth").info());
        assert!(logs_contain("Siproxylin 0.4.2 starting"));
        assert!(logs_contain("codename=Moth"));
    }
}
