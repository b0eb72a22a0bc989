mod progress;

use crate::error::TcError;
use crate::http::HttpClient;
use crate::runtime::Runtime;
use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

pub use progress::ProgressReporter;

/// Owner execute permission bit.
const OWNER_EXEC: u32 = 0o100;

/// Downloads `url` into `target_dir` unless the file is already there.
///
/// The destination is named after the last path segment of the URL. Returns
/// the destination path in both cases.
#[tracing::instrument(skip(runtime, http_client))]
pub async fn maybe_download<R: Runtime>(
    runtime: &R,
    http_client: &HttpClient,
    target_dir: &Path,
    url: &str,
    show_progress: bool,
) -> Result<PathBuf> {
    let target_dir = if target_dir.is_absolute() {
        target_dir.to_path_buf()
    } else {
        runtime.current_dir()?.join(target_dir)
    };

    runtime
        .create_dir_all(&target_dir)
        .map_err(|e| TcError::Filesystem {
            path: target_dir.clone(),
            message: format!("{:#}", e),
        })?;
    if !runtime.is_dir(&target_dir) {
        return Err(TcError::Filesystem {
            path: target_dir,
            message: "not a directory".to_string(),
        }
        .into());
    }

    let file_name = artifact_file_name(url)?;
    let target_file = target_dir.join(file_name);

    if runtime.is_file(&target_file) {
        println!("File already exists: {}", target_file.display());
        return Ok(target_file);
    }

    println!("Downloading {} ...", url);
    let mut reporter = ProgressReporter::new(std::io::stdout());
    http_client
        .download_file(
            url,
            || {
                runtime
                    .create_file(&target_file)
                    .with_context(|| format!("Failed to create {:?}", target_file))
            },
            |received, total| {
                if show_progress {
                    reporter.update(received, total);
                }
            },
        )
        .await?;

    info!("Download complete: {}", target_file.display());
    Ok(target_file)
}

/// Adds the owner execute bit to `path`, keeping every other bit.
#[tracing::instrument(skip(runtime))]
pub fn make_executable<R: Runtime>(runtime: &R, path: &Path) -> Result<()> {
    let mode = runtime.mode(path)?;
    runtime
        .set_permissions(path, mode | OWNER_EXEC)
        .with_context(|| format!("Failed to mark {:?} executable", path))
}

/// Final path segment of a URL, as written.
///
/// The segment is taken from the URL text rather than the parsed URL so that
/// names are not percent-encoded (`a b.tar.xz` stays `a b.tar.xz`).
pub fn artifact_file_name(url: &str) -> Result<String> {
    reqwest::Url::parse(url)
        .map_err(|e| TcError::InvalidArgument(format!("Invalid URL '{}': {}", url, e)))?;

    url.split(['?', '#'])
        .next()
        .and_then(|path| path.rsplit('/').next())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| TcError::InvalidArgument(format!("URL '{}' has no file name", url)).into())
}
