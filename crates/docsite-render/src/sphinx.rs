//! Subprocess-backed renderer driving a `sphinx-build`-style program.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::process::Command;
use std::time::Instant;

use crate::renderer::{RenderError, RenderReport, RenderRequest, Renderer};

/// Default renderer executable.
pub const DEFAULT_PROGRAM: &str = "sphinx-build";

/// Renders documentation by invoking an external program with the
/// canonical `sphinx-build` argument shape:
///
/// ```text
/// <program> -b <builder> -c <confdir> -d <doctreedir> [-E] [-D k=v]... <srcdir> <outdir>
/// ```
///
/// The child inherits stdout and stderr, so renderer output streams
/// straight through to the terminal.
pub struct SphinxRenderer {
    program: String,
}

impl SphinxRenderer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Argument vector for a request, excluding the program itself.
    fn args(&self, request: &RenderRequest) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-b".into(),
            request.builder.clone().into(),
            "-c".into(),
            request.config_dir.clone().into(),
            "-d".into(),
            request.doctree_dir.clone().into(),
        ];

        if request.fresh_env {
            args.push("-E".into());
        }

        // BTreeMap iteration keeps override order deterministic.
        for (key, value) in &request.overrides {
            args.push("-D".into());
            args.push(format!("{key}={value}").into());
        }

        args.push(request.source_dir.clone().into());
        args.push(request.output_dir.clone().into());
        args
    }
}

impl Default for SphinxRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl Renderer for SphinxRenderer {
    fn render(&self, request: &RenderRequest) -> Result<RenderReport, RenderError> {
        let start = Instant::now();

        tracing::debug!(
            "Invoking {} for {}",
            self.program,
            request.source_dir.display()
        );

        let status = Command::new(&self.program)
            .args(self.args(request))
            .status()
            .map_err(|source| {
                if source.kind() == ErrorKind::NotFound {
                    RenderError::NotFound {
                        program: self.program.clone(),
                        source,
                    }
                } else {
                    RenderError::Launch {
                        program: self.program.clone(),
                        source,
                    }
                }
            })?;

        if !status.success() {
            return Err(RenderError::Failed {
                program: self.program.clone(),
                status,
            });
        }

        Ok(RenderReport {
            output_dir: request.output_dir.clone(),
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}
