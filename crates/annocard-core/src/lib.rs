//! Annocard Core: five stages from a note to a shareable card
//!
//! A book excerpt and a reader's reflection enter as strings, a fixed-width
//! raster card leaves. This crate holds the data that flows between the
//! stages and the contracts each stage implements.
//!
//! ## The Pipeline
//!
//! 1. **Typeface Resolution** - A font source descriptor becomes a usable [`Typeface`]
//! 2. **Text Flow** - Excerpt and reflection wrap into width-constrained [`types::TextLayout`]s
//! 3. **Header Fitting** - Book/author and chapter labels squeeze into one line
//! 4. **Planning** - Everything gets absolute geometry in a [`plan::CardPlan`]
//! 5. **Rendering** - The plan becomes pixels in a [`types::RasterImage`]
//!
//! Persisting the image is left to an [`ImageStore`], outside the pipeline proper.
//!
//! Every stage consumes plain data and produces plain data. Nothing is cached
//! between calls, so two renders of the same input are pixel-identical.
//!
//! ## The Traits
//!
//! - [`FontRef`] - Your window into font data and metrics
//! - [`Renderer`] - Where a plan becomes an image
//! - [`ImageStore`] - Where an image becomes a saved file
//! - [`ContentResolver`] - How opaque content references reach font bytes

pub mod error;
pub mod plan;
pub mod style;
pub mod traits;
pub mod typeface;
pub mod types;

pub use error::{ComposeError, FontLoadError, PersistError, RenderError, Result};
pub use plan::{CardPlan, DrawOp, FaceWeight, GradientStop, PlanMetrics, Point, Rect, TextStyle};
pub use style::{CardStyle, Color, Theme};
pub use traits::{ContentResolver, FontRef, ImageLocation, ImageStore, Renderer};
pub use typeface::{LineMetrics, ShapedGlyph, ShapedRun, Typeface, TypefaceOrigin};
pub use types::{
    AnnotationCard, FontMetrics, GlyphId, LineRecord, MetadataFitResult, RasterImage,
    SystemFamily, TextLayout, TypefaceSource, CONTENT_SCHEME,
};
