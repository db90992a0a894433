//! Turning raw certificate bytes into a decoder text report.

use std::io::Write;
use std::process::{Command, Stdio};

use bon::Builder;

use crate::error::{CertMetaError, Result};

pub const DEFAULT_PROGRAM: &str = "openssl";
pub const DEFAULT_ARGS: [&str; 5] = ["x509", "-inform", "der", "-text", "-noout"];

/// Something that renders DER certificate bytes as a human-readable report.
///
/// Any `Fn(&[u8]) -> Result<String>` is a decoder, which keeps batch logic
/// testable without a subprocess.
pub trait CertificateDecoder {
    /// Decodes one certificate.
    ///
    /// # Errors
    /// Returns [`CertMetaError::Decode`] when no report could be produced.
    fn decode(&self, der: &[u8]) -> Result<String>;
}

impl<F> CertificateDecoder for F
where
    F: Fn(&[u8]) -> Result<String>,
{
    fn decode(&self, der: &[u8]) -> Result<String> {
        self(der)
    }
}

/// Runs an external program once per certificate, feeding it the DER bytes on
/// stdin and keeping only its stdout.
///
/// # Example
/// ```
/// use certmeta::decoder::CommandDecoder;
/// let decoder = CommandDecoder::builder().build();
/// assert_eq!(decoder.program(), "openssl");
/// ```
#[derive(Clone, Debug, Builder)]
pub struct CommandDecoder {
    #[builder(default = DEFAULT_PROGRAM.to_string())]
    program: String,
    #[builder(default = DEFAULT_ARGS.iter().map(|arg| arg.to_string()).collect::<Vec<_>>())]
    args: Vec<String>,
}

impl Default for CommandDecoder {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl CommandDecoder {
    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl CertificateDecoder for CommandDecoder {
    fn decode(&self, der: &[u8]) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| CertMetaError::Decode(format!("failed to start {}: {e}", self.program)))?;

        let stdin = child.stdin.take();
        // stdin must be written while stdout is being drained.
        let output = std::thread::scope(|scope| {
            if let Some(mut stdin) = stdin {
                scope.spawn(move || {
                    // A decoder that rejects the input may close stdin early;
                    // its exit status is what decides the outcome.
                    if let Err(e) = stdin.write_all(der) {
                        tracing::debug!("{} closed stdin early: {}", self.program, e);
                    }
                });
            }
            child.wait_with_output()
        })
        .map_err(|e| CertMetaError::Decode(format!("{} did not finish: {e}", self.program)))?;

        if !output.status.success() {
            return Err(CertMetaError::Decode(format!(
                "{} exited with {}",
                self.program, output.status
            )));
        }
        if output.stdout.is_empty() {
            return Err(CertMetaError::Decode(format!(
                "{} produced no output",
                self.program
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
