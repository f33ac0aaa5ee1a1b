//! Siproxylin CLI - reports the resolved version metadata.

use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;

use siproxylin_core::{VersionDescriptor, config, logging, version};
use siproxylin_xmpp::{SoftwareVersion, build_version_response, disco_features};

/// Siproxylin - XMPP client version and capability report
#[derive(Parser)]
#[command(name = "siproxylin")]
#[command(author, about, long_about = None, disable_version_flag = true)]
struct Cli {
    /// Print the version resolved from version.sh
    #[arg(short = 'V', long = "version", action = ArgAction::SetTrue)]
    show_version: bool,

    /// Directory the application is installed in (version.sh is looked up
    /// one and two levels above it)
    #[arg(long, global = true)]
    install_root: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    /// `--version` and a bare invocation both mean the `version` subcommand.
    fn selected_command(&self) -> Commands {
        if self.show_version {
            return Commands::Version;
        }
        self.command.clone().unwrap_or(Commands::Version)
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Commands {
    /// Print "<AppName> <Version>"
    Version,
    /// Print name, version, codename, and supported XEPs
    Info {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List supported XEPs, one per line
    Xeps,
    /// Answer a XEP-0092 version query read from stdin
    Respond,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.selected_command();

    let mut config = config::load_config().context("failed to load configuration")?;
    if let Some(root) = cli.install_root {
        config.paths.install_root = Some(root);
    }

    logging::init(&config.logging.level);

    let install_root = config.install_root();
    debug!(root = %install_root.display(), "resolving version");
    let descriptor = version::init(&install_root);
    logging::log_banner(&descriptor.info());

    let output = run(&command, descriptor, io::stdin().lock())?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{output}")?;
    Ok(())
}

/// Produce the output for `command`. `input` is only read by `respond`.
fn run(
    command: &Commands,
    descriptor: &VersionDescriptor,
    mut input: impl Read,
) -> Result<String> {
    let info = descriptor.info();
    match command {
        Commands::Version => Ok(descriptor.version_string()),
        Commands::Info { json: true } => {
            serde_json::to_string_pretty(&info).context("failed to serialize version info")
        }
        Commands::Info { json: false } => {
            let mut out = format!(
                "{}\nCodename: {}\nFeatures: {}\nSupported XEPs:",
                descriptor.version_string(),
                info.codename,
                disco_features().join(", ")
            );
            for xep in info.xeps {
                out.push_str("\n  ");
                out.push_str(&xep.label());
            }
            Ok(out)
        }
        Commands::Xeps => Ok(info
            .xeps
            .iter()
            .map(|xep| xep.label())
            .collect::<Vec<_>>()
            .join("\n")),
        Commands::Respond => {
            let mut request = Vec::new();
            input
                .read_to_end(&mut request)
                .context("failed to read request from stdin")?;
            let sv = SoftwareVersion::from_info(&info);
            let response =
                build_version_response(&request, &sv).context("failed to answer version query")?;
            String::from_utf8(response).context("response is not UTF-8")
        }
    }
}
