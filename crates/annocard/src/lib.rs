//! Annocard: shareable cards from book excerpts and reflections
//!
//! ```ignore
//! use annocard::prelude::*;
//!
//! let card = AnnotationCard {
//!     book_name: "Walden".into(),
//!     book_author: "Henry David Thoreau".into(),
//!     chapter_name: "Where I Lived".into(),
//!     excerpt: "I went to the woods because I wished to live deliberately.".into(),
//!     reflection: "Still true.".into(),
//!     theme: 0,
//! };
//!
//! let composer = Composer::new(ComposerConfig::default());
//! let gallery = GalleryStore::new("Pictures");
//! let location = composer.export_to_store(&gallery, &card, &card.reflection, card.theme)?;
//! ```

pub mod composer;
pub mod config;

pub use annocard_core::*;
pub use annocard_export::{encode_png, GalleryStore, PngFile, DEFAULT_ALBUM};
pub use annocard_fontdb::{DirectoryContentResolver, SystemFonts, TypefaceResolver};
pub use annocard_layout::{CardLayoutPlanner, MetadataFitter, TextFlowEngine};
pub use annocard_render_skia::SkiaRenderer;
pub use composer::{render, Composer};
pub use config::ComposerConfig;

/// The names most callers need
pub mod prelude {
    pub use crate::{
        render, AnnotationCard, ComposeError, Composer, ComposerConfig, GalleryStore,
        ImageLocation, ImageStore, PngFile, RasterImage, Result, Theme,
    };
}
