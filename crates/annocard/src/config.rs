//! Composer settings: which typeface to use and how the card is measured

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use annocard_core::{error::ComposeError, CardStyle, Result, TypefaceSource};

/// Environment variable overriding [`ComposerConfig::typeface`]
pub const TYPEFACE_ENV: &str = "ANNOCARD_TYPEFACE";
/// Environment variable overriding [`ComposerConfig::system_typeface`]
pub const SYSTEM_TYPEFACE_ENV: &str = "ANNOCARD_SYSTEM_TYPEFACE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    /// Empty for the system family, `content://...` for a content reference,
    /// anything else is a font file path
    pub typeface: String,
    /// System family used when `typeface` is empty: 0 sans-serif, 1 serif, 2 monospace
    pub system_typeface: u8,
    pub style: CardStyle,
}

impl ComposerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ComposeError::Config(format!("invalid config: {e}")))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| ComposeError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    /// Applies `ANNOCARD_TYPEFACE` and `ANNOCARD_SYSTEM_TYPEFACE` when set
    pub fn with_env(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(typeface) = lookup(TYPEFACE_ENV) {
            self.typeface = typeface;
        }
        if let Some(raw) = lookup(SYSTEM_TYPEFACE_ENV) {
            self.system_typeface = raw.trim().parse().map_err(|_| {
                ComposeError::Config(format!(
                    "{SYSTEM_TYPEFACE_ENV} must be 0, 1 or 2, got {raw:?}"
                ))
            })?;
        }
        Ok(self)
    }

    pub fn typeface_source(&self) -> TypefaceSource {
        TypefaceSource::from_config(&self.typeface)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ComposerConfig::from_json_str(
            r#"{ "typeface": "/fonts/kai.ttf", "style": { "text_scale": 2.0 } }"#,
        )
        .unwrap();
        assert_eq!(config.typeface, "/fonts/kai.ttf");
        assert_eq!(config.system_typeface, 0);
        assert_eq!(config.style.text_scale, 2.0);
        assert_eq!(config.style.width, 1125);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(
            ComposerConfig::from_json_str("{ typeface"),
            Err(ComposeError::Config(_))
        ));
    }

    #[test]
    fn overrides_replace_fields() {
        let vars: HashMap<&str, &str> =
            [(TYPEFACE_ENV, "content://fonts/7"), (SYSTEM_TYPEFACE_ENV, "2")].into();
        let config = ComposerConfig::default()
            .with_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(
            config.typeface_source(),
            TypefaceSource::ContentReference("content://fonts/7".into())
        );
        assert_eq!(config.system_typeface, 2);
    }

    #[test]
    fn bad_system_typeface_override_is_rejected() {
        let result = ComposerConfig::default()
            .with_overrides(|key| (key == SYSTEM_TYPEFACE_ENV).then(|| "serif".into()));
        assert!(matches!(result, Err(ComposeError::Config(_))));
    }
}
