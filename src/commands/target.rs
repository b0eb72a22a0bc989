use anyhow::Result;
use log::info;
use std::path::{Path, PathBuf};

use super::Config;
use crate::{
    archive::Extractor,
    download::{make_executable, maybe_download},
    platform::Arch,
    runtime::Runtime,
    scheme::resolve_url,
};

/// A `--target` download.
#[derive(Debug, Clone)]
pub struct TargetRequest {
    pub target_dir: PathBuf,
    pub arch: Arch,
    pub artifact: String,
    pub branch: String,
    pub show_progress: bool,
}

/// Download an artifact, then extract it when it is a tar archive or mark
/// it executable otherwise.
#[tracing::instrument(skip(config))]
pub async fn fetch_target<R: Runtime + 'static, E: Extractor>(
    config: &Config<R, E>,
    request: &TargetRequest,
) -> Result<PathBuf> {
    let url = resolve_url(
        &config.scheme,
        request.arch.as_str(),
        &request.artifact,
        &request.branch,
    )?;
    info!("Resolved {} to {}", request.artifact, url);

    let path = maybe_download(
        &config.runtime,
        &config.http_client,
        &request.target_dir,
        &url,
        request.show_progress,
    )
    .await?;

    if config.extractor.can_handle(&request.artifact) {
        let extract_to = path.parent().unwrap_or(Path::new("."));
        config.extractor.extract(&config.runtime, &path, extract_to)?;
    } else {
        make_executable(&config.runtime, &path)?;
    }

    Ok(path)
}
