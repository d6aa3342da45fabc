//! A content resolver backed by a local directory
//!
//! `content://<authority>/<path>` maps onto `<root>/<path>`. The authority is
//! ignored. References that try to climb out of the root are refused.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};

use annocard_core::{traits::ContentResolver, types::CONTENT_SCHEME};

#[derive(Debug, Clone)]
pub struct DirectoryContentResolver {
    root: PathBuf,
    streaming: bool,
}

impl DirectoryContentResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            streaming: true,
        }
    }

    /// Forces the path-indirection route instead of opening streams
    pub fn without_streaming(mut self) -> Self {
        self.streaming = false;
        self
    }

    fn local_path(&self, uri: &str) -> Option<PathBuf> {
        let rest = uri.strip_prefix(CONTENT_SCHEME)?;
        let (_authority, relative) = rest.split_once('/')?;
        let relative = Path::new(relative);

        let safe = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if !safe || relative.as_os_str().is_empty() {
            return None;
        }
        Some(self.root.join(relative))
    }
}

impl ContentResolver for DirectoryContentResolver {
    fn supports_streaming(&self) -> bool {
        self.streaming
    }

    fn open(&self, uri: &str) -> io::Result<Box<dyn Read + Send>> {
        let path = self.local_path(uri).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("unmapped content: {uri}"))
        })?;
        Ok(Box::new(File::open(path)?))
    }

    fn real_path(&self, uri: &str) -> Option<PathBuf> {
        self.local_path(uri).filter(|path| path.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_below_root() {
        let resolver = DirectoryContentResolver::new("/fonts");
        assert_eq!(
            resolver.local_path("content://com.example.docs/user/kai.ttf"),
            Some(PathBuf::from("/fonts/user/kai.ttf"))
        );
    }

    #[test]
    fn refuses_escapes_and_other_schemes() {
        let resolver = DirectoryContentResolver::new("/fonts");
        assert_eq!(resolver.local_path("content://docs/../etc/passwd"), None);
        assert_eq!(resolver.local_path("content://docs//abs.ttf"), None);
        assert_eq!(resolver.local_path("file:///fonts/a.ttf"), None);
        assert_eq!(resolver.local_path("content://docs"), None);
    }

    #[test]
    fn missing_content_fails_to_open() {
        let resolver = DirectoryContentResolver::new("/definitely/not/here");
        assert!(resolver.open("content://docs/a.ttf").is_err());
        assert!(resolver.real_path("content://docs/a.ttf").is_none());
    }
}
