//! The share pipeline: resolve, plan, render and optionally persist

use std::sync::Arc;

use log::debug;

use annocard_core::{
    AnnotationCard, CardPlan, ImageLocation, ImageStore, RasterImage, Renderer, Result, Theme,
};
use annocard_fontdb::TypefaceResolver;
use annocard_layout::CardLayoutPlanner;
use annocard_render_skia::SkiaRenderer;

use crate::config::ComposerConfig;

/// Turns annotation cards into images
///
/// The typeface is resolved again on every call, so a changed font setting
/// takes effect on the next card without rebuilding the composer.
pub struct Composer {
    config: ComposerConfig,
    resolver: TypefaceResolver,
    planner: CardLayoutPlanner,
    renderer: Arc<dyn Renderer>,
}

impl Composer {
    pub fn new(config: ComposerConfig) -> Self {
        Self {
            planner: CardLayoutPlanner::new(config.style.clone()),
            resolver: TypefaceResolver::new(),
            renderer: Arc::new(SkiaRenderer::new()),
            config,
        }
    }

    pub fn with_resolver(mut self, resolver: TypefaceResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Lays the card out without drawing it
    pub fn plan(&self, card: &AnnotationCard, reflection_text: &str, theme: usize) -> CardPlan {
        let faces = self.resolver.resolve(
            &self.config.typeface_source(),
            i64::from(self.config.system_typeface),
        );
        self.planner.plan(
            card,
            reflection_text,
            Theme::by_index(theme),
            &faces.regular,
            &faces.bold,
        )
    }

    /// Renders one card
    ///
    /// `reflection_text` replaces the card's stored reflection in the panel.
    pub fn compose(
        &self,
        card: &AnnotationCard,
        reflection_text: &str,
        theme: usize,
    ) -> Result<RasterImage> {
        let plan = self.plan(card, reflection_text, theme);
        let image = self.renderer.render(&plan)?;
        debug!(
            "Composed {}x{} card with {} renderer",
            image.width,
            image.height,
            self.renderer.name()
        );
        Ok(image)
    }

    /// Renders one card and hands it to `store`
    ///
    /// The store is never touched when rendering fails.
    pub fn export_to_store(
        &self,
        store: &dyn ImageStore,
        card: &AnnotationCard,
        reflection_text: &str,
        theme: usize,
    ) -> Result<ImageLocation> {
        let image = self.compose(card, reflection_text, theme)?;
        let location = store.persist(&image)?;
        debug!("Saved card to {} via {}", location, store.name());
        Ok(location)
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(ComposerConfig::default())
    }
}

/// Renders a card with the default configuration plus environment overrides
pub fn render(card: &AnnotationCard, reflection_text: &str, theme: usize) -> Result<RasterImage> {
    Composer::new(ComposerConfig::default().with_env()?).compose(card, reflection_text, theme)
}
