// this_file: crates/annocard-fontdb/src/resolver.rs

//! Typeface resolution: source descriptor in, usable typefaces out.
//!
//! Resolution order follows the source variant:
//!
//! 1. `FileReference` - read the file and build a face from its bytes
//! 2. `ContentReference` - stream the content when the resolver can,
//!    otherwise go through its real filesystem path
//! 3. `SystemFamily` / `Unset` - the installed sans, serif or monospace family
//!
//! Any failure along the way is logged and replaced by the default
//! sans-serif family, so [`TypefaceResolver::resolve`] cannot fail.
//!
//! Resolved typefaces also carry installed faces for the common CJK
//! characters their primary face cannot draw.
//! It does blocking file I/O; keep it off latency-sensitive threads.

use std::io::Read;
use std::sync::Arc;

use annocard_core::{
    error::FontLoadError,
    traits::{ContentResolver, FontRef},
    typeface::{Typeface, TypefaceOrigin},
    types::{SystemFamily, TypefaceSource},
};

use crate::{
    builtin::BuiltinFace,
    system::{SystemFonts, COVERAGE_SAMPLES},
    Font,
};

/// Regular and bold typefaces for one card
#[derive(Debug, Clone)]
pub struct ResolvedTypefaces {
    pub regular: Typeface,
    pub bold: Typeface,
}

pub struct TypefaceResolver {
    system: SystemFonts,
    content: Option<Arc<dyn ContentResolver>>,
}

impl TypefaceResolver {
    /// Resolver over the installed system fonts
    pub fn new() -> Self {
        Self::with_system_fonts(SystemFonts::load())
    }

    pub fn with_system_fonts(system: SystemFonts) -> Self {
        Self {
            system,
            content: None,
        }
    }

    pub fn with_content_resolver(mut self, resolver: Arc<dyn ContentResolver>) -> Self {
        self.content = Some(resolver);
        self
    }

    /// Resolve a source, falling back to the default sans-serif on any failure
    ///
    /// `preference` selects the system family when the source is unset:
    /// 0 sans-serif, 1 serif, 2 monospace.
    pub fn resolve(&self, source: &TypefaceSource, preference: i64) -> ResolvedTypefaces {
        match self.try_resolve(source, preference) {
            Ok(resolved) => {
                log::debug!("Resolved typeface: {:?}", resolved.regular.origin());
                resolved
            },
            Err(err) => {
                log::warn!("Typeface {:?} unavailable, using sans-serif: {}", source, err);
                self.default_family()
            },
        }
    }

    fn try_resolve(
        &self,
        source: &TypefaceSource,
        preference: i64,
    ) -> Result<ResolvedTypefaces, FontLoadError> {
        match source {
            TypefaceSource::FileReference(path) => {
                let font = Font::from_file(path)?;
                Ok(self.custom(font, TypefaceOrigin::File(path.clone())))
            },
            TypefaceSource::ContentReference(uri) => {
                let font = self.load_content(uri)?;
                Ok(self.custom(font, TypefaceOrigin::Content(uri.clone())))
            },
            TypefaceSource::SystemFamily(family) => self.system_family(*family),
            TypefaceSource::Unset => self.system_family(SystemFamily::from_preference(preference)),
        }
    }

    fn load_content(&self, uri: &str) -> Result<Font, FontLoadError> {
        let resolver = self
            .content
            .as_ref()
            .ok_or_else(|| FontLoadError::ContentUnresolved(uri.to_string()))?;

        if resolver.supports_streaming() {
            let mut reader = resolver.open(uri)?;
            let mut data = Vec::new();
            reader.read_to_end(&mut data)?;
            return Font::from_data(data);
        }

        let path = resolver
            .real_path(uri)
            .ok_or_else(|| FontLoadError::ContentUnresolved(uri.to_string()))?;
        Font::from_file(&path)
    }

    /// A user font, backed by the system sans-serif for missing characters
    fn custom(&self, font: Font, origin: TypefaceOrigin) -> ResolvedTypefaces {
        let mut regular = Typeface::new(Arc::new(font), origin);
        if let Ok(sans) = self.system.face(SystemFamily::SansSerif, false) {
            regular = regular.with_fallback(Arc::new(sans.font));
        }
        let coverage = self.coverage(&regular);
        let regular = with_fallbacks(regular, &coverage);
        let bold = regular.emboldened();
        ResolvedTypefaces { regular, bold }
    }

    fn system_family(&self, family: SystemFamily) -> Result<ResolvedTypefaces, FontLoadError> {
        let origin = TypefaceOrigin::System(family);
        let regular = Typeface::new(
            Arc::new(self.system.face(family, false)?.font),
            origin.clone(),
        );
        let coverage = self.coverage(&regular);
        let regular = with_fallbacks(regular, &coverage);

        let bold = match self.system.face(family, true) {
            Ok(face) if face.weight_matched => {
                with_fallbacks(Typeface::new(Arc::new(face.font), origin), &coverage)
            },
            _ => regular.emboldened(),
        };

        Ok(ResolvedTypefaces { regular, bold })
    }

    /// Installed faces for the sample characters `typeface` cannot draw
    fn coverage(&self, typeface: &Typeface) -> Vec<Arc<dyn FontRef>> {
        let missing: Vec<char> = COVERAGE_SAMPLES
            .iter()
            .copied()
            .filter(|&ch| typeface.faces().iter().all(|face| face.glyph_id(ch).is_none()))
            .collect();

        let faces = self.system.covering_faces(&missing);
        if !faces.is_empty() {
            log::debug!("Added {} fallback faces for {:?}", faces.len(), missing);
        }
        faces
            .into_iter()
            .map(|font| Arc::new(font) as Arc<dyn FontRef>)
            .collect()
    }

    /// Sans-serif, or the metrics-only face when nothing is installed
    fn default_family(&self) -> ResolvedTypefaces {
        self.system_family(SystemFamily::SansSerif)
            .unwrap_or_else(|err| {
                log::warn!("No system fonts available, using metrics-only face: {}", err);
                let regular = Typeface::new(Arc::new(BuiltinFace::new()), TypefaceOrigin::Builtin);
                let bold = regular.emboldened();
                ResolvedTypefaces { regular, bold }
            })
    }
}

fn with_fallbacks(typeface: Typeface, faces: &[Arc<dyn FontRef>]) -> Typeface {
    faces
        .iter()
        .fold(typeface, |typeface, face| typeface.with_fallback(Arc::clone(face)))
}

impl Default for TypefaceResolver {
    fn default() -> Self {
        Self::new()
    }
}
