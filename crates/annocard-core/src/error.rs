//! Error types for annocard
//!
//! Three families, matching the three places a share action can go wrong:
//! loading a typeface (always recovered), drawing the card, and saving it.

use thiserror::Error;

pub type Result<T, E = ComposeError> = std::result::Result<T, E>;

/// What a caller of the composer sees
///
/// `Render` means "could not compose image", `Persist` means "could not save image".
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Saving failed: {0}")]
    Persist(#[from] PersistError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Font loading errors
///
/// Never crosses the typeface resolver boundary; every variant ends in a
/// fallback to the default sans-serif family.
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid font data")]
    InvalidData,

    #[error("Font file too large: {size} bytes (max {max})")]
    TooLarge { size: u64, max: u64 },

    #[error("Content reference could not be resolved: {0}")]
    ContentUnresolved(String),

    #[error("System font not found: {0}")]
    SystemFamilyNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Pixmap allocation failed for {width}x{height}")]
    PixmapCreationFailed { width: u32, height: u32 },

    #[error("Path building failed")]
    PathBuildingFailed,

    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Errors from the image store
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Nothing was written to {0}")]
    EmptyWrite(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_and_persist_stay_distinguishable() {
        let render: ComposeError = RenderError::PathBuildingFailed.into();
        let persist: ComposeError = PersistError::EmptyWrite("a.png".into()).into();

        assert!(matches!(render, ComposeError::Render(_)));
        assert!(matches!(persist, ComposeError::Persist(_)));
        assert!(render.to_string().starts_with("Rendering failed"));
        assert!(persist.to_string().starts_with("Saving failed"));
    }
}
