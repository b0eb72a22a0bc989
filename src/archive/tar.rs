use anyhow::Result;
use log::debug;
use std::path::Path;

use super::Extractor;
use crate::error::TcError;
use crate::runtime::Runtime;

/// Marker identifying tar-family archives (`.tar.xz`, `.tar.gz`, ...).
const TAR_MARKER: &str = ".tar.";

/// Extracts tar archives with the system `tar` program.
pub struct TarExtractor {
    program: String,
}

impl Default for TarExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TarExtractor {
    pub fn new() -> Self {
        Self::with_program("tar")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Extractor for TarExtractor {
    fn can_handle(&self, artifact_name: &str) -> bool {
        artifact_name.contains(TAR_MARKER)
    }

    #[tracing::instrument(skip(self, runtime))]
    fn extract<R: Runtime + 'static>(
        &self,
        runtime: &R,
        archive_path: &Path,
        extract_to: &Path,
    ) -> Result<()> {
        let args = vec![
            "xvf".to_string(),
            archive_path.to_string_lossy().into_owned(),
            "-C".to_string(),
            extract_to.to_string_lossy().into_owned(),
        ];
        debug!("Extracting {:?} into {:?}", archive_path, extract_to);

        let status = runtime.run(&self.program, &args)?;
        if !status.success() {
            return Err(TcError::Subprocess {
                program: self.program.clone(),
                status: status.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{MockRuntime, RealRuntime};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_can_handle() {
        let extractor = TarExtractor::new();
        assert!(extractor.can_handle("native_client.tar.xz"));
        assert!(extractor.can_handle("native_client.tar.gz"));
        assert!(!extractor.can_handle("native_client.tar"));
        assert!(!extractor.can_handle("deepspeech"));
        assert!(!extractor.can_handle("ds_ctcdecoder-0.6.0-cp37-cp37m-manylinux1_x86_64.whl"));
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_invokes_tar() {
        use std::os::unix::process::ExitStatusExt;

        let mut runtime = MockRuntime::new();
        runtime
            .expect_run()
            .withf(|program, args| {
                program == "tar"
                    && args
                        == [
                            "xvf".to_string(),
                            "/tmp/x/native_client.tar.xz".to_string(),
                            "-C".to_string(),
                            "/tmp/x".to_string(),
                        ]
            })
            .times(1)
            .returning(|_, _| Ok(std::process::ExitStatus::from_raw(0)));

        TarExtractor::new()
            .extract(
                &runtime,
                Path::new("/tmp/x/native_client.tar.xz"),
                Path::new("/tmp/x"),
            )
            .unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_real_archive() {
        use flate2::Compression;
        use flate2::write::GzEncoder;

        let dir = tempdir().unwrap();
        let archive_path = dir.path().join("native_client.tar.gz");

        {
            let file = fs::File::create(&archive_path).unwrap();
            let enc = GzEncoder::new(file, Compression::default());
            let mut builder = ::tar::Builder::new(enc);
            let content = b"generate_trie";
            let mut header = ::tar::Header::new_gnu();
            header.set_path("generate_trie").unwrap();
            header.set_size(content.len() as u64);
            header.set_mode(0o755);
            header.set_cksum();
            builder.append(&header, &content[..]).unwrap();
            builder.into_inner().unwrap().finish().unwrap();
        }

        TarExtractor::new()
            .extract(&RealRuntime, &archive_path, dir.path())
            .unwrap();

        let extracted = dir.path().join("generate_trie");
        assert_eq!(fs::read_to_string(extracted).unwrap(), "generate_trie");
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_failure_is_subprocess_error() {
        let dir = tempdir().unwrap();
        let archive_path = dir.path().join("broken.tar.xz");
        fs::write(&archive_path, b"this is not an archive").unwrap();

        let err = TarExtractor::new()
            .extract(&RealRuntime, &archive_path, dir.path())
            .unwrap_err();

        match err.downcast_ref::<TcError>() {
            Some(TcError::Subprocess { program, .. }) => assert_eq!(program, "tar"),
            other => panic!("expected subprocess error, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_missing_program() {
        let dir = tempdir().unwrap();
        let result = TarExtractor::with_program("tcfetch-no-such-tar").extract(
            &RealRuntime,
            &dir.path().join("a.tar.xz"),
            dir.path(),
        );
        assert!(result.is_err());
    }
}
