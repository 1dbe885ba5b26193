//! Renderer contract for docsite.
//!
//! Documentation rendering is done by an external tool; this crate defines
//! the request handed to it and the subprocess-backed implementation that
//! drives a `sphinx-build`-style program.

pub mod renderer;
pub mod sphinx;

pub use renderer::{RenderError, RenderReport, RenderRequest, Renderer};
pub use sphinx::SphinxRenderer;
