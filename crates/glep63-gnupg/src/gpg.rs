//! Keyring listing through an external GnuPG executable.

use crate::colons::parse_colons;
use anyhow::Context;
use camino::Utf8Path;
use glep63_domain::model::PublicKey;
use std::process::{Command, Stdio};

/// A usable GnuPG executable, resolved once and passed around explicitly.
#[derive(Clone, Debug)]
pub struct GpgTool {
    program: String,
}

impl GpgTool {
    const CANDIDATES: [&'static str; 2] = ["gpg2", "gpg"];

    /// Probe the candidate executables in preference order.
    pub fn discover() -> anyhow::Result<Self> {
        for candidate in Self::CANDIDATES {
            let probe = Command::new(candidate)
                .arg("--version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status();
            if let Ok(status) = probe
                && status.success()
            {
                return Ok(Self {
                    program: candidate.to_string(),
                });
            }
        }
        anyhow::bail!(
            "no usable GnuPG executable found (tried: {})",
            Self::CANDIDATES.join(", ")
        )
    }

    /// Use a specific executable, bypassing discovery.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// List keys, optionally restricted to specific keyrings and/or key
    /// queries (ids, fingerprints, names), and decode the result.
    pub fn list_keys(
        &self,
        keyrings: &[impl AsRef<Utf8Path>],
        key_ids: &[String],
    ) -> anyhow::Result<Vec<PublicKey>> {
        let mut cmd = Command::new(&self.program);
        cmd.args(["--with-colons", "--list-keys"]);
        if !keyrings.is_empty() {
            cmd.arg("--no-default-keyring");
            for ring in keyrings {
                cmd.arg("--keyring").arg(ring.as_ref().as_str());
            }
        }
        for id in key_ids {
            cmd.arg(id);
        }

        let output = cmd
            .output()
            .with_context(|| format!("spawn {}", self.program))?;
        if !output.status.success() {
            anyhow::bail!(
                "{} --list-keys returned non-zero exit status",
                self.program
            );
        }

        let stdout =
            String::from_utf8(output.stdout).context("gpg output is not valid UTF-8")?;
        let keys = parse_colons(&stdout).context("parse gpg --with-colons output")?;
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    #[test]
    fn with_program_skips_discovery() {
        let tool = GpgTool::with_program("gpg");
        assert_eq!(tool.program(), "gpg");
    }

    #[test]
    fn missing_executable_is_a_context_error() {
        let tool = GpgTool::with_program("definitely-not-a-gpg-binary");
        let rings: [Utf8PathBuf; 0] = [];
        let err = tool.list_keys(&rings, &[]).unwrap_err();
        assert!(format!("{err:#}").contains("definitely-not-a-gpg-binary"));
    }
}
