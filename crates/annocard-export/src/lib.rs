//! Getting finished cards out of memory
//!
//! PNG encoding plus two [`ImageStore`](annocard_core::ImageStore)
//! implementations: a timestamped picture album and a single fixed file.

pub mod gallery;
pub mod png;

pub use gallery::{GalleryStore, PngFile, DEFAULT_ALBUM};
pub use png::encode_png;
