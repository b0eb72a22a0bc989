use anyhow::{Context, Result, anyhow};

/// Largest code point of a wide-unicode Python build.
const WIDE_MAX_UNICODE: u32 = 0x10FFFF;

/// One-liner printing `major minor maxunicode`.
pub(crate) const PROBE_SCRIPT: &str =
    "import sys; print(sys.version_info[0], sys.version_info[1], sys.maxunicode)";

/// Version and unicode width of a Python interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interpreter {
    pub major: u32,
    pub minor: u32,
    pub max_unicode: u32,
}

impl Interpreter {
    /// Parse the output of [`PROBE_SCRIPT`].
    pub fn parse(output: &str) -> Result<Self> {
        let fields: Vec<&str> = output.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(anyhow!("Unexpected interpreter probe output: {:?}", output.trim()));
        }

        let field = |i: usize, name: &str| -> Result<u32> {
            fields[i]
                .parse::<u32>()
                .with_context(|| format!("Invalid {} in interpreter probe output: {:?}", name, fields[i]))
        };

        Ok(Self {
            major: field(0, "major version")?,
            minor: field(1, "minor version")?,
            max_unicode: field(2, "maxunicode")?,
        })
    }

    /// UCS-2 builds report a `maxunicode` below the full code point range.
    pub fn is_narrow_unicode(&self) -> bool {
        self.max_unicode < WIDE_MAX_UNICODE
    }

    /// `cp` tag digits, e.g. `37`.
    pub fn tag(&self) -> String {
        format!("{}{}", self.major, self.minor)
    }

    /// ABI flag appended to the tag: `mu` for narrow builds, `m` otherwise.
    pub fn abi_suffix(&self) -> &'static str {
        if self.is_narrow_unicode() { "mu" } else { "m" }
    }
}
