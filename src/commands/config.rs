use anyhow::Result;
use log::debug;
use reqwest::Client;

use crate::{
    archive::{Extractor, TarExtractor},
    http::HttpClient,
    runtime::Runtime,
    scheme::{self, SCHEME_ENV},
};

/// Everything a command needs, assembled once at startup.
pub struct Config<R: Runtime, E: Extractor> {
    pub runtime: R,
    pub http_client: HttpClient,
    pub extractor: E,
    /// URL template every artifact URL is resolved against.
    pub scheme: String,
}

impl<R: Runtime> Config<R, TarExtractor> {
    /// Build the configuration, selecting the scheme from `--source`, the
    /// `TASKCLUSTER_SCHEME` environment variable or the built-in default.
    pub fn new(runtime: R, source: Option<&str>) -> Result<Self> {
        let env_override = runtime.env_var(SCHEME_ENV).ok();
        let scheme = scheme::select(env_override, source)?;
        debug!("Scheme template: {}", scheme);

        let client = Client::builder().user_agent("tcfetch-cli").build()?;

        Ok(Self {
            runtime,
            http_client: HttpClient::new(client),
            extractor: TarExtractor::new(),
            scheme,
        })
    }
}
