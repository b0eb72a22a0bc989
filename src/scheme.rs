//! Artifact URL templates.
//!
//! A scheme is a URL template with three `%(name)s` placeholders. The
//! built-in table is fixed; the `TASKCLUSTER_SCHEME` environment variable can
//! replace the default template and `--source` picks a named entry.

use anyhow::Result;
use log::debug;

use crate::error::TcError;

/// Environment variable that replaces the default template.
pub const SCHEME_ENV: &str = "TASKCLUSTER_SCHEME";

/// Name of the scheme used when nothing else is selected.
pub const DEFAULT_SCHEME: &str = "deepspeech";

/// Built-in scheme table.
pub const DEFAULT_SCHEMES: &[(&str, &str)] = &[
    (
        "deepspeech",
        "https://index.taskcluster.net/v1/task/project.deepspeech.deepspeech.native_client.%(branch_name)s.%(arch_string)s/artifacts/public/%(artifact_name)s",
    ),
    (
        "tensorflow",
        "https://index.taskcluster.net/v1/task/project.deepspeech.tensorflow.pip.%(branch_name)s.%(arch_string)s/artifacts/public/%(artifact_name)s",
    ),
];

const ARCH_PLACEHOLDER: &str = "%(arch_string)s";
const ARTIFACT_PLACEHOLDER: &str = "%(artifact_name)s";
const BRANCH_PLACEHOLDER: &str = "%(branch_name)s";

/// Look up a template in the built-in table.
pub fn lookup(name: &str) -> Option<&'static str> {
    DEFAULT_SCHEMES
        .iter()
        .find(|(scheme, _)| *scheme == name)
        .map(|(_, template)| *template)
}

/// Pick the template for this run.
///
/// Precedence: `--source` name, then the environment override, then the
/// built-in default.
pub fn select(env_override: Option<String>, source: Option<&str>) -> Result<String> {
    if let Some(name) = source {
        let template = lookup(name).ok_or_else(|| TcError::UnknownScheme(name.to_string()))?;
        debug!("Using scheme '{}' from --source", name);
        return Ok(template.to_string());
    }

    if let Some(template) = env_override.filter(|t| !t.is_empty()) {
        debug!("Using scheme template from {}", SCHEME_ENV);
        return Ok(template);
    }

    Ok(lookup(DEFAULT_SCHEME)
        .unwrap_or(DEFAULT_SCHEMES[0].1)
        .to_string())
}

/// Substitute arch, artifact and branch into a scheme template.
pub fn resolve_url(template: &str, arch: &str, artifact: &str, branch: &str) -> Result<String> {
    for (label, value) in [("arch", arch), ("artifact", artifact), ("branch", branch)] {
        if value.is_empty() {
            return Err(TcError::InvalidArgument(format!("{} must not be empty", label)).into());
        }
    }

    for placeholder in [ARCH_PLACEHOLDER, ARTIFACT_PLACEHOLDER, BRANCH_PLACEHOLDER] {
        if !template.contains(placeholder) {
            return Err(TcError::Template(format!("missing {} in '{}'", placeholder, template)).into());
        }
    }

    let stripped = template
        .replace(ARCH_PLACEHOLDER, "")
        .replace(ARTIFACT_PLACEHOLDER, "")
        .replace(BRANCH_PLACEHOLDER, "");
    if let Some(start) = stripped.find("%(") {
        let rest = &stripped[start..];
        let end = rest.find(")s").map(|i| i + 2).unwrap_or(rest.len());
        return Err(TcError::Template(format!("unknown placeholder {}", &rest[..end])).into());
    }

    // Values are substituted in one pass so a value containing placeholder
    // text is never expanded again.
    let mut url = String::with_capacity(template.len() + arch.len() + artifact.len() + branch.len());
    let mut rest = template;
    while let Some(start) = rest.find("%(") {
        url.push_str(&rest[..start]);
        let tail = &rest[start..];
        let (value, len) = if tail.starts_with(ARCH_PLACEHOLDER) {
            (arch, ARCH_PLACEHOLDER.len())
        } else if tail.starts_with(ARTIFACT_PLACEHOLDER) {
            (artifact, ARTIFACT_PLACEHOLDER.len())
        } else if tail.starts_with(BRANCH_PLACEHOLDER) {
            (branch, BRANCH_PLACEHOLDER.len())
        } else {
            ("%(", 2)
        };
        url.push_str(value);
        rest = &tail[len..];
    }
    url.push_str(rest);

    Ok(url)
}
