use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tcfetch::commands::{self, Options};
use tcfetch::platform::Arch;

/// tcfetch - fetch prebuilt DeepSpeech artifacts from TaskCluster
///
/// Downloads native client binaries into a directory (extracting tar
/// archives), or prints the URL of the ds_ctcdecoder Python package built
/// for this platform.
///
/// If the TASKCLUSTER_SCHEME environment variable is set, it replaces the
/// default URL template. It must contain %(arch_string)s, %(artifact_name)s
/// and %(branch_name)s.
///
/// Examples:
///   tcfetch --target native_client               # CPU binaries for this machine
///   tcfetch --target native_client --arch gpu    # CUDA binaries
///   tcfetch --decoder                            # URL of the decoder wheel
#[derive(Parser, Debug)]
#[command(author, version = env!("TCFETCH_VERSION"), about)]
struct Cli {
    /// Where to put the native client binary files
    #[arg(long, value_name = "DIR")]
    target: Option<PathBuf>,

    /// Which architecture to download binaries for (detected by default)
    #[arg(long, value_enum)]
    arch: Option<Arch>,

    /// Name of the artifact to download
    #[arg(long, default_value = "native_client.tar.xz")]
    artifact: String,

    /// Name of the TaskCluster scheme to use (deepspeech, tensorflow)
    #[arg(long, value_name = "SCHEME_NAME")]
    source: Option<String>,

    /// Branch name to use [default: master]
    #[arg(long)]
    branch: Option<String>,

    /// Print the URL of the ds_ctcdecoder Python package instead of downloading
    #[arg(long)]
    decoder: bool,

    /// File holding the product version, used in decoder mode
    #[arg(long, value_name = "PATH", default_value = "VERSION")]
    version_file: PathBuf,

    /// Python interpreter the decoder package is meant for
    #[arg(long, value_name = "PROGRAM", default_value = "python3")]
    python: String,

    /// Do not print download progress
    #[arg(long)]
    no_progress: bool,
}

impl From<Cli> for Options {
    fn from(cli: Cli) -> Self {
        Options {
            target: cli.target,
            decoder: cli.decoder,
            arch: cli.arch,
            artifact: cli.artifact,
            source: cli.source,
            branch: cli.branch,
            version_file: cli.version_file,
            python: cli.python,
            show_progress: !cli.no_progress,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = tcfetch::runtime::RealRuntime;

    commands::run(runtime, cli.into()).await
}
