//! Documentation build command.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use docsite_render::{RenderRequest, Renderer, SphinxRenderer};

/// Configuration file structure (docsite.toml).
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    docs: DocsConfig,
    #[serde(default)]
    build: BuildSettings,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DocsConfig {
    /// Renderer configuration directory
    config: String,

    /// Source tree, resolved under the config directory when relative
    source: String,

    /// Destination for generated HTML
    output: String,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            config: ".".to_string(),
            source: "rst".to_string(),
            output: ".".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct BuildSettings {
    /// Renderer executable
    renderer: String,

    /// Output format identifier passed to the renderer
    builder: String,

    /// Discard the renderer's cached parse state from previous runs
    fresh: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            renderer: docsite_render::sphinx::DEFAULT_PROGRAM.to_string(),
            builder: "html".to_string(),
            fresh: true,
        }
    }
}

/// Build command inputs. Relative paths resolve against `base_dir`, never
/// against ambient process state, so the command is testable in isolation.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Directory relative paths resolve against (the CLI passes the CWD)
    pub base_dir: PathBuf,

    /// Config file location
    pub config_file: PathBuf,

    /// Output directory override
    pub output: Option<PathBuf>,

    /// Open index.html in the default browser after building
    pub view: bool,
}

/// Load configuration from docsite.toml if it exists.
/// Returns an error if the config file exists but is malformed.
fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Turn options plus config into an absolute render request.
fn resolve_request(options: &BuildOptions, config: &ConfigFile) -> RenderRequest {
    let config_dir = absolutize(&options.base_dir, Path::new(&config.docs.config));
    let source_dir = absolutize(&config_dir, Path::new(&config.docs.source));
    let output_dir = match &options.output {
        Some(output) => absolutize(&options.base_dir, output),
        None => absolutize(&options.base_dir, Path::new(&config.docs.output)),
    };
    let doctree_dir = output_dir.join(".doctrees");

    RenderRequest {
        source_dir,
        config_dir,
        output_dir,
        doctree_dir,
        builder: config.build.builder.clone(),
        overrides: BTreeMap::new(),
        fresh_env: config.build.fresh,
    }
}

/// Run the build command.
pub fn run(options: &BuildOptions) -> Result<()> {
    let config = load_config(&absolutize(&options.base_dir, &options.config_file))?;
    let renderer = SphinxRenderer::new(&config.build.renderer);
    execute(
        options,
        &config,
        &renderer,
        |index| open::that(index),
        &mut io::stderr(),
    )
}

/// Build once, then optionally launch the browser preview.
///
/// Build failures of any kind are reported on `stderr` and swallowed;
/// the process historically exits 0 either way, and callers rely on
/// that. The view step runs even when the build failed.
fn execute(
    options: &BuildOptions,
    config: &ConfigFile,
    renderer: &impl Renderer,
    launch: impl FnOnce(&Path) -> io::Result<()>,
    stderr: &mut impl io::Write,
) -> Result<()> {
    let request = resolve_request(options, config);

    tracing::info!("Creating html documentation ...");

    // Output directory always exists before the render call is issued;
    // when it cannot be created, only the render call is skipped.
    match fs::create_dir_all(&request.output_dir) {
        Err(err) => {
            let _ = writeln!(stderr, "FAIL! exiting ... ({err})");
        }
        Ok(()) => match renderer.render(&request) {
            Ok(report) => {
                tracing::info!(
                    "Rendered {} in {}ms",
                    report.output_dir.display(),
                    report.duration_ms
                );
            }
            Err(err) if err.is_load_failure() => {
                // Full error chain, the closest thing to a stack trace.
                let _ = writeln!(stderr, "{:?}", anyhow::Error::new(err));
            }
            Err(err) => {
                let _ = writeln!(stderr, "FAIL! exiting ... ({err})");
            }
        },
    }

    if options.view {
        let index = request.output_dir.join("index.html");
        if let Err(err) = launch(&index) {
            let _ = writeln!(
                stderr,
                "Could not open {} in your web browser. ({err})",
                index.display()
            );
        }
    }

    Ok(())
}
