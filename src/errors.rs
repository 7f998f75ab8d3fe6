//! Error types with diagnostics using miette
//!
//! Only construction can fail. Per-frame degeneracies (edge-on discs, apexes
//! hidden behind their base) are skipped silently and never surface here.

use miette::Diagnostic;
use thiserror::Error;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Errors raised while building a shape from its options
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{shape}: inner diameter {inner} must be smaller than diameter {diameter}")]
    #[diagnostic(
        code(flatland::config::inner_diameter_too_large),
        help("use an inner diameter in the range 0 <= d < diameter; 0 means no front face")
    )]
    InnerDiameterTooLarge {
        shape: &'static str,
        inner: f64,
        diameter: f64,
    },

    #[error("{shape}: diameter must not be negative, got {value}")]
    #[diagnostic(code(flatland::config::negative_diameter))]
    NegativeDiameter { shape: &'static str, value: f64 },

    #[error("{field} must be finite, got {value}")]
    #[diagnostic(code(flatland::config::non_finite))]
    NonFinite { field: &'static str, value: f64 },

    #[error("invalid color: {value:?}")]
    #[diagnostic(
        code(flatland::config::invalid_color),
        help("colors are #rgb, #rrggbb, #rrggbbaa, rgb(r,g,b), rgba(r,g,b,a) or a CSS color name")
    )]
    InvalidColor { value: String },
}

impl ConfigError {
    /// Reject NaN and infinite parameters.
    pub(crate) fn check_finite(field: &'static str, value: f64) -> Result<f64, ConfigError> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ConfigError::NonFinite { field, value })
        }
    }
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors from output backends
#[derive(Error, Diagnostic, Debug)]
pub enum RenderError {
    #[error("cannot allocate a {width}x{height} raster surface")]
    #[diagnostic(
        code(flatland::render::invalid_surface),
        help("surface dimensions must be non-zero")
    )]
    InvalidSurface { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    #[diagnostic(code(flatland::render::encode))]
    Encode(String),
}
