// this_file: crates/annocard-export/src/gallery.rs

//! Directory-backed image stores
//!
//! [`GalleryStore`] mirrors a phone's picture album: every card gets a
//! fresh timestamped name inside one album directory. [`PngFile`] writes to
//! exactly one path chosen by the caller.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use annocard_core::{
    error::PersistError,
    traits::{ImageLocation, ImageStore},
    types::RasterImage,
};

use crate::png::encode_png;

/// Album used when none is configured
pub const DEFAULT_ALBUM: &str = "LegadoThoughts";

/// Attempts at finding a free file name within the same millisecond
const NAME_ATTEMPTS: u32 = 100;

/// Saves cards as `thought_<unix-millis>.png` in `<root>/<album>`
#[derive(Debug, Clone)]
pub struct GalleryStore {
    root: PathBuf,
    album: String,
}

impl GalleryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            album: DEFAULT_ALBUM.to_string(),
        }
    }

    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = album.into();
        self
    }

    /// Directory the images land in
    pub fn album_dir(&self) -> PathBuf {
        self.root.join(&self.album)
    }
}

impl ImageStore for GalleryStore {
    fn name(&self) -> &'static str {
        "gallery"
    }

    fn persist(&self, image: &RasterImage) -> Result<ImageLocation, PersistError> {
        let png = encode_png(image)?;

        let dir = self.album_dir();
        fs::create_dir_all(&dir).map_err(|err| {
            PersistError::Unavailable(format!("cannot create {}: {}", dir.display(), err))
        })?;

        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or(0);

        for attempt in 0..NAME_ATTEMPTS {
            let name = if attempt == 0 {
                format!("thought_{millis}.png")
            } else {
                format!("thought_{millis}_{attempt}.png")
            };
            let path = dir.join(name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => {
                    write_or_discard(&path, file, &png)?;
                    return finish(&path);
                },
                Err(err) if err.kind() == ErrorKind::AlreadyExists => continue,
                Err(err) => return Err(err.into()),
            }
        }

        Err(PersistError::Unavailable(format!(
            "no free file name in {}",
            dir.display()
        )))
    }
}

/// Saves every card to one fixed path, replacing what was there
#[derive(Debug, Clone)]
pub struct PngFile {
    path: PathBuf,
}

impl PngFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ImageStore for PngFile {
    fn name(&self) -> &'static str {
        "png-file"
    }

    fn persist(&self, image: &RasterImage) -> Result<ImageLocation, PersistError> {
        let png = encode_png(image)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, &png)?;
        finish(&self.path)
    }
}

/// Fills a freshly created file, deleting it again if the write fails
fn write_or_discard(path: &Path, mut file: File, png: &[u8]) -> Result<(), PersistError> {
    let written = file.write_all(png).and_then(|()| file.sync_all());
    drop(file);
    if let Err(err) = written {
        let _ = fs::remove_file(path);
        return Err(err.into());
    }
    Ok(())
}

/// Checks the written file really holds data and reports its location
fn finish(path: &Path) -> Result<ImageLocation, PersistError> {
    let written = fs::metadata(path)?.len();
    if written == 0 {
        let _ = fs::remove_file(path);
        return Err(PersistError::EmptyWrite(path.display().to_string()));
    }
    log::debug!("Saved {} bytes to {}", written, path.display());
    Ok(ImageLocation(path.display().to_string()))
}
