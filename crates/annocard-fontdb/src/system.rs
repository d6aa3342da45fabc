// this_file: crates/annocard-fontdb/src/system.rs

//! System family lookup on top of `fontdb`.

use std::collections::HashSet;

use fontdb::{Database, Family, Query, Weight};

use annocard_core::{error::FontLoadError, traits::FontRef, types::SystemFamily};

use crate::Font;

const SANS_NAMES: &[&str] = &[
    "Roboto",
    "Noto Sans",
    "DejaVu Sans",
    "Liberation Sans",
    "Arial",
    "Helvetica",
];
const SERIF_NAMES: &[&str] = &[
    "Noto Serif",
    "DejaVu Serif",
    "Liberation Serif",
    "Times New Roman",
    "Times",
];
const MONO_NAMES: &[&str] = &[
    "Roboto Mono",
    "Noto Sans Mono",
    "DejaVu Sans Mono",
    "Liberation Mono",
    "Courier New",
    "Menlo",
];

/// Families tried first when looking for CJK coverage
const CJK_NAMES: &[&str] = &[
    "Noto Sans CJK SC",
    "Noto Sans SC",
    "Source Han Sans SC",
    "Source Han Sans CN",
    "WenQuanYi Micro Hei",
    "WenQuanYi Zen Hei",
    "Droid Sans Fallback",
    "PingFang SC",
    "Microsoft YaHei",
];

/// Characters every reading typeface is expected to draw
///
/// Includes the default reflection title and common CJK punctuation.
pub const COVERAGE_SAMPLES: &[char] = &['感', '想', '读', '书', '的', '，', '。'];

/// A system face plus whether it really has the requested weight
#[derive(Debug)]
pub struct SystemFace {
    pub font: Font,
    pub weight_matched: bool,
}

/// Installed fonts, indexed once
pub struct SystemFonts {
    db: Database,
}

impl SystemFonts {
    /// Scans the platform font directories
    pub fn load() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        log::debug!("SystemFonts: indexed {} faces", db.len());
        Self { db }
    }

    /// No fonts at all; every lookup fails
    pub fn empty() -> Self {
        Self {
            db: Database::new(),
        }
    }

    pub fn from_database(db: Database) -> Self {
        Self { db }
    }

    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Loads the best installed match for a generic family
    ///
    /// Tries the generic family, then well-known family names, then any
    /// installed face at all.
    pub fn face(&self, family: SystemFamily, bold: bool) -> Result<SystemFace, FontLoadError> {
        let names = match family {
            SystemFamily::SansSerif => SANS_NAMES,
            SystemFamily::Serif => SERIF_NAMES,
            SystemFamily::Monospace => MONO_NAMES,
        };
        let generic = match family {
            SystemFamily::SansSerif => Family::SansSerif,
            SystemFamily::Serif => Family::Serif,
            SystemFamily::Monospace => Family::Monospace,
        };

        let mut families = Vec::with_capacity(names.len() + 1);
        families.push(generic);
        families.extend(names.iter().map(|name| Family::Name(name)));

        let weight = if bold { Weight::BOLD } else { Weight::NORMAL };
        let query = Query {
            families: &families,
            weight,
            ..Query::default()
        };

        let id = self
            .db
            .query(&query)
            .or_else(|| self.db.faces().next().map(|face| face.id))
            .ok_or_else(|| FontLoadError::SystemFamilyNotFound(family.as_str().to_string()))?;

        let weight_matched = self
            .db
            .face(id)
            .map(|info| (info.weight.0 >= Weight::SEMIBOLD.0) == bold)
            .unwrap_or(false);

        let font = self
            .db
            .with_face_data(id, |data, index| Font::from_data_index(data.to_vec(), index))
            .ok_or_else(|| FontLoadError::SystemFamilyNotFound(family.as_str().to_string()))??;

        Ok(SystemFace {
            font,
            weight_matched,
        })
    }

    /// Installed faces that together draw as many of `missing` as possible
    ///
    /// Well-known CJK families are checked first, then every indexed face in
    /// database order. A face is kept only if it maps a character no earlier
    /// face did.
    pub fn covering_faces(&self, missing: &[char]) -> Vec<Font> {
        let mut remaining = missing.to_vec();
        let mut found = Vec::new();
        if remaining.is_empty() {
            return found;
        }

        let named = CJK_NAMES.iter().filter_map(|name| {
            self.db.query(&Query {
                families: &[Family::Name(name)],
                ..Query::default()
            })
        });
        let mut seen = HashSet::new();

        for id in named.chain(self.db.faces().map(|face| face.id)) {
            if remaining.is_empty() {
                break;
            }
            if !seen.insert(id) {
                continue;
            }
            let Some(Ok(font)) = self
                .db
                .with_face_data(id, |data, index| Font::from_data_index(data.to_vec(), index))
            else {
                continue;
            };

            let before = remaining.len();
            remaining.retain(|&ch| font.glyph_id(ch).is_none());
            if remaining.len() < before {
                found.push(font);
            }
        }

        if !remaining.is_empty() {
            log::debug!("SystemFonts: no installed face covers {:?}", remaining);
        }
        found
    }
}

impl Default for SystemFonts {
    fn default() -> Self {
        Self::load()
    }
}
