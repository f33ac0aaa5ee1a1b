//! Application version metadata.
//!
//! `version.sh` at the repository (or AppDir) root is the single source of
//! truth for the version and build codename. It is a shell fragment, but
//! only two `KEY=value` lines are read from it:
//!
//! ```text
//! SIPROXYLIN_VERSION="0.4.2"
//! SIPROXYLIN_CODENAME="Cellar Door"
//! ```
//!
//! Resolution never fails: a missing or incomplete descriptor yields the
//! `dev` fallback pair so the application can always start.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::xep::{SUPPORTED_XEPS, SupportedXep};

pub const APP_NAME: &str = "Siproxylin";

/// File name of the version descriptor.
pub const VERSION_FILE_NAME: &str = "version.sh";

pub const FALLBACK_VERSION: &str = "dev";
pub const FALLBACK_CODENAME: &str = "🍺";

const VERSION_KEY: &str = "SIPROXYLIN_VERSION=";
const CODENAME_KEY: &str = "SIPROXYLIN_CODENAME=";

/// Ancestor levels probed relative to the install root: one up for a
/// development checkout, two up for a packaged AppDir.
const PROBE_LEVELS: [usize; 2] = [1, 2];

static RESOLVED: OnceLock<VersionDescriptor> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum VersionError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Version and codename read from `version.sh`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionDescriptor {
    pub version: String,
    pub codename: String,
}

impl VersionDescriptor {
    pub fn new(version: impl Into<String>, codename: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            codename: codename.into(),
        }
    }

    /// The `dev` pair used when no valid descriptor is found.
    pub fn fallback() -> Self {
        Self::new(FALLBACK_VERSION, FALLBACK_CODENAME)
    }

    pub fn is_fallback(&self) -> bool {
        self.version == FALLBACK_VERSION && self.codename == FALLBACK_CODENAME
    }

    /// Formatted `"<AppName> <Version>"` string.
    pub fn version_string(&self) -> String {
        format!("{APP_NAME} {}", self.version)
    }

    /// Full version info record for this descriptor.
    pub fn info(&self) -> VersionInfo {
        VersionInfo {
            app_name: APP_NAME,
            version: self.version.clone(),
            codename: self.codename.clone(),
            xeps: SUPPORTED_XEPS,
        }
    }
}

impl std::fmt::Display for VersionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.version, self.codename)
    }
}

/// Read-only summary consumed by the About dialog and the startup banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    pub app_name: &'static str,
    pub version: String,
    pub codename: String,
    pub xeps: &'static [SupportedXep],
}

/// Ordered list of `version.sh` locations probed for `install_root`.
pub fn candidate_paths(install_root: &Path) -> Vec<PathBuf> {
    PROBE_LEVELS
        .iter()
        .filter_map(|&level| install_root.ancestors().nth(level))
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(VERSION_FILE_NAME))
        .collect()
}

/// Strip surrounding whitespace and any enclosing single or double quotes.
/// Whitespace and quotes are trimmed as one set, so whitespace inside the
/// quotes goes too and a quoted blank value ends up empty.
pub fn strip_value(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '"' || c == '\'')
}

/// Parse `version.sh` contents. Unknown lines are ignored and a repeated key
/// overwrites the earlier value. Returns `None` unless both fields end up
/// non-empty.
pub fn parse_version_sh(contents: &str) -> Option<VersionDescriptor> {
    let mut version = None;
    let mut codename = None;

    for line in contents.lines() {
        if let Some(rest) = line.strip_prefix(VERSION_KEY) {
            version = Some(strip_value(rest));
        } else if let Some(rest) = line.strip_prefix(CODENAME_KEY) {
            codename = Some(strip_value(rest));
        }
    }

    match (version, codename) {
        (Some(v), Some(c)) if !v.is_empty() && !c.is_empty() => {
            Some(VersionDescriptor::new(v, c))
        }
        _ => None,
    }
}

/// Read and parse a single descriptor file.
pub fn read_version_file(path: &Path) -> Result<Option<VersionDescriptor>, VersionError> {
    let contents = std::fs::read_to_string(path).map_err(|source| VersionError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_version_sh(&contents))
}

/// Resolve the version descriptor for `install_root`.
///
/// Probing stops at the first candidate that exists; if it cannot be read or
/// lacks either field, the fallback pair is returned.
pub fn resolve_version(install_root: &Path) -> VersionDescriptor {
    let Some(path) = candidate_paths(install_root).into_iter().find(|p| {
        let exists = p.is_file();
        debug!(path = %p.display(), exists, "probing version descriptor");
        exists
    }) else {
        debug!(root = %install_root.display(), "no version descriptor found, using fallback");
        return VersionDescriptor::fallback();
    };

    match read_version_file(&path) {
        Ok(Some(descriptor)) => {
            info!(
                path = %path.display(),
                version = %descriptor.version,
                codename = %descriptor.codename,
                "version descriptor resolved"
            );
            descriptor
        }
        Ok(None) => {
            warn!(
                path = %path.display(),
                "version descriptor is missing {VERSION_KEY} or {CODENAME_KEY}, using fallback"
            );
            VersionDescriptor::fallback()
        }
        Err(e) => {
            warn!(error = %e, "version descriptor unreadable, using fallback");
            VersionDescriptor::fallback()
        }
    }
}

/// Directory containing the running executable, or `.` if unknown.
pub fn default_install_root() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Resolve once for `install_root` and cache the result for the process
/// lifetime. Later calls return the cached value regardless of the argument.
pub fn init(install_root: &Path) -> &'static VersionDescriptor {
    RESOLVED.get_or_init(|| resolve_version(install_root))
}

/// The cached descriptor, resolving against [`default_install_root`] if
/// [`init`] has not run yet.
pub fn current() -> &'static VersionDescriptor {
    RESOLVED.get_or_init(|| resolve_version(&default_install_root()))
}

/// Formatted `"<AppName> <Version>"` for the cached descriptor.
pub fn get_version_string() -> String {
    current().version_string()
}

/// Full version info for the cached descriptor.
pub fn get_full_version_info() -> VersionInfo {
    current().info()
}
