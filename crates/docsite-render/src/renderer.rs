//! Render request, report, and error types.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitStatus;

/// A single documentation render pass.
///
/// All paths are expected to be absolute by the time the request is built;
/// the caller resolves them against its own base directory so nothing here
/// depends on the process working directory.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// Markup source tree
    pub source_dir: PathBuf,

    /// Renderer configuration directory
    pub config_dir: PathBuf,

    /// Destination for generated HTML
    pub output_dir: PathBuf,

    /// Parsed-document cache managed by the renderer
    pub doctree_dir: PathBuf,

    /// Output format identifier understood by the renderer
    pub builder: String,

    /// Extra renderer options, emitted in sorted order
    pub overrides: BTreeMap<String, String>,

    /// Discard cached parse state from previous runs
    pub fresh_env: bool,
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("rst"),
            config_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            doctree_dir: PathBuf::from(".doctrees"),
            builder: "html".to_string(),
            overrides: BTreeMap::new(),
            fresh_env: true,
        }
    }
}

/// Outcome of a successful render.
#[derive(Debug)]
pub struct RenderReport {
    /// Directory the site was written to
    pub output_dir: PathBuf,

    /// Wall-clock render time in milliseconds
    pub duration_ms: u64,
}

/// Errors raised while driving the external renderer.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The renderer executable is not installed or not on PATH.
    #[error("renderer '{program}' not found; is it installed and on PATH?")]
    NotFound {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The renderer exists but could not be started.
    #[error("failed to launch renderer '{program}'")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The renderer ran and reported failure.
    #[error("renderer '{program}' exited with {status}")]
    Failed { program: String, status: ExitStatus },
}

impl RenderError {
    /// True when the renderer itself could not be located or started,
    /// as opposed to running and rejecting the input.
    pub fn is_load_failure(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Launch { .. })
    }
}

/// Something that can turn a source tree into a rendered site.
pub trait Renderer {
    /// Perform one render pass. Blocks until the renderer finishes.
    fn render(&self, request: &RenderRequest) -> Result<RenderReport, RenderError>;
}
