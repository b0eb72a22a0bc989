use anyhow::Result;
use log::debug;
use std::path::Path;

use super::BranchChoice;
use crate::{
    platform::{Arch, Interpreter, PlatformDescriptor, PlatformFacts},
    runtime::Runtime,
    scheme::resolve_url,
    version::ProductVersion,
};

/// Python package holding the CTC decoder.
pub const DECODER_PACKAGE: &str = "ds_ctcdecoder";

/// Suffix appended to the arch token for decoder builds.
const DECODER_ARCH_SUFFIX: &str = "-ctc";

/// Wheel filename, e.g. `ds_ctcdecoder-0.6.0-cp37-cp37m-manylinux1_x86_64.whl`.
pub fn decoder_artifact_name(
    version: &ProductVersion,
    interpreter: &Interpreter,
    platform: &PlatformDescriptor,
) -> String {
    let pyver = interpreter.tag();
    format!(
        "{package}-{version}-cp{pyver}-cp{pyver}{abi}-{platform}.whl",
        package = DECODER_PACKAGE,
        version = version,
        pyver = pyver,
        abi = interpreter.abi_suffix(),
        platform = platform.wheel_platform_tag(),
    )
}

/// Resolve the URL of the decoder wheel for this platform and interpreter.
///
/// Without an explicit branch the release branch `v{VERSION}` is used.
#[tracing::instrument(skip(runtime, facts, platform))]
pub fn decoder_url<R: Runtime, F: PlatformFacts + ?Sized>(
    runtime: &R,
    facts: &F,
    platform: &PlatformDescriptor,
    scheme: &str,
    arch: Arch,
    branch: &BranchChoice,
    version_file: &Path,
) -> Result<String> {
    let version = ProductVersion::read(runtime, version_file)?;
    let interpreter = facts.interpreter()?;
    debug!("Decoder for version {} on {:?}", version, interpreter);

    let branch = branch.or_release(&version);
    let artifact = decoder_artifact_name(&version, &interpreter, platform);
    let ctc_arch = format!("{}{}", arch, DECODER_ARCH_SUFFIX);

    resolve_url(scheme, &ctc_arch, &artifact, &branch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MockPlatformFacts;
    use crate::runtime::MockRuntime;
    use crate::scheme;
    use std::path::PathBuf;

    fn facts(machine: &str, system: &str, interpreter: &str) -> MockPlatformFacts {
        let mut facts = MockPlatformFacts::new();
        let machine = machine.to_string();
        let system = system.to_string();
        let interpreter = interpreter.to_string();
        facts.expect_machine().returning(move || machine.clone());
        facts.expect_system().returning(move || system.clone());
        facts.expect_is_64bit().return_const(true);
        facts
            .expect_interpreter()
            .returning(move || Interpreter::parse(&interpreter));
        facts
    }

    fn runtime_with_version(version: &'static str) -> MockRuntime {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_read_to_string()
            .with(mockall::predicate::eq(PathBuf::from("VERSION")))
            .returning(move |_| Ok(format!("{}\n", version)));
        runtime
    }

    #[test]
    fn test_decoder_url_linux_release_branch() {
        let facts = facts("x86_64", "linux", "3 7 1114111");
        let platform = PlatformDescriptor::detect(&facts);
        let runtime = runtime_with_version("0.6.0");

        let url = decoder_url(
            &runtime,
            &facts,
            &platform,
            scheme::lookup("deepspeech").unwrap(),
            platform.arch(None),
            &BranchChoice::new(None),
            Path::new("VERSION"),
        )
        .unwrap();

        assert_eq!(
            url,
            "https://index.taskcluster.net/v1/task/project.deepspeech.deepspeech.native_client.v0.6.0.cpu-ctc/artifacts/public/ds_ctcdecoder-0.6.0-cp37-cp37m-manylinux1_x86_64.whl"
        );
    }

    #[test]
    fn test_decoder_url_explicit_branch() {
        let facts = facts("x86_64", "darwin", "3 6 1114111");
        let platform = PlatformDescriptor::detect(&facts);
        let runtime = runtime_with_version("0.6.0-alpha.15");

        let url = decoder_url(
            &runtime,
            &facts,
            &platform,
            scheme::lookup("deepspeech").unwrap(),
            platform.arch(None),
            &BranchChoice::new(Some("master".to_string())),
            Path::new("VERSION"),
        )
        .unwrap();

        assert!(url.contains(".master.osx-ctc/"), "{}", url);
        assert!(url.ends_with("/ds_ctcdecoder-0.6.0a15-cp36-cp36m-macosx_10_10_x86_64.whl"));
    }

    #[test]
    fn test_decoder_url_narrow_unicode_arm() {
        let facts = facts("armv7l", "linux", "2 7 65535");
        let mut platform = PlatformDescriptor::detect(&facts);
        platform.is_64bit = false;
        let runtime = runtime_with_version("0.6.0");

        let url = decoder_url(
            &runtime,
            &facts,
            &platform,
            scheme::lookup("deepspeech").unwrap(),
            platform.arch(None),
            &BranchChoice::new(None),
            Path::new("VERSION"),
        )
        .unwrap();

        assert!(url.contains(".v0.6.0.arm-ctc/"), "{}", url);
        assert!(url.ends_with("/ds_ctcdecoder-0.6.0-cp27-cp27mu-linux_armv7l.whl"));
    }

    #[test]
    fn test_decoder_url_missing_version_file() {
        let facts = MockPlatformFacts::new();
        let mut runtime = MockRuntime::new();
        runtime
            .expect_read_to_string()
            .returning(|_| Err(anyhow::anyhow!("No such file or directory")));
        let platform = PlatformDescriptor {
            is_arm: false,
            is_macos: false,
            is_64bit: true,
            os_name: "linux".to_string(),
            machine: "x86_64".to_string(),
        };

        let result = decoder_url(
            &runtime,
            &facts,
            &platform,
            scheme::lookup("deepspeech").unwrap(),
            Arch::Cpu,
            &BranchChoice::new(None),
            Path::new("VERSION"),
        );
        assert!(result.is_err());
    }
}
