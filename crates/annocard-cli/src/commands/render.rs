//! Render command: one card from flags or a JSON file

use std::fs;
use std::io::{self, Read};
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use annocard::{
    AnnotationCard, Composer, ComposerConfig, DirectoryContentResolver, GalleryStore,
    ImageStore, PngFile, TypefaceResolver,
};

use crate::cli::RenderArgs;

pub fn run(args: &RenderArgs) -> Result<()> {
    let card = load_card(args)?;
    let config = load_config(args)?;

    let mut resolver = TypefaceResolver::new();
    if let Some(root) = &args.content_root {
        resolver = resolver.with_content_resolver(Arc::new(DirectoryContentResolver::new(root)));
    }
    let composer = Composer::new(config).with_resolver(resolver);

    let store: Box<dyn ImageStore> = match (&args.output, &args.gallery) {
        (Some(path), _) => Box::new(PngFile::new(path)),
        (None, Some(root)) => {
            let mut gallery = GalleryStore::new(root);
            if let Some(album) = &args.album {
                gallery = gallery.with_album(album);
            }
            Box::new(gallery)
        },
        (None, None) => bail!("nowhere to save the card: pass --output or --gallery"),
    };

    let location = composer
        .export_to_store(store.as_ref(), &card, &card.reflection, card.theme)
        .context("could not share the card")?;

    if args.quiet {
        println!("{location}");
    } else {
        println!("Saved card to {location}");
    }
    Ok(())
}

fn load_card(args: &RenderArgs) -> Result<AnnotationCard> {
    let mut card = match &args.card {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("cannot read card file {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("invalid card file {}", path.display()))?
        },
        None => AnnotationCard::default(),
    };

    if let Some(book) = &args.book {
        card.book_name = book.clone();
    }
    if let Some(author) = &args.author {
        card.book_author = author.clone();
    }
    if let Some(chapter) = &args.chapter {
        card.chapter_name = chapter.clone();
    }
    if let Some(excerpt) = &args.excerpt {
        card.excerpt = if excerpt == "-" {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read excerpt from stdin")?;
            buffer.trim_end_matches('\n').to_string()
        } else {
            excerpt.clone()
        };
    }
    if let Some(reflection) = &args.reflection {
        card.reflection = reflection.clone();
    }
    if let Some(theme) = args.theme {
        card.theme = theme;
    }
    Ok(card)
}

fn load_config(args: &RenderArgs) -> Result<ComposerConfig> {
    let mut config = match &args.config {
        Some(path) => ComposerConfig::from_json_file(path)?,
        None => ComposerConfig::default(),
    }
    .with_env()?;

    if let Some(typeface) = &args.typeface {
        config.typeface = typeface.clone();
    }
    if let Some(system) = args.system_typeface {
        config.system_typeface = system;
    }
    log::debug!("Typeface source: {:?}", config.typeface_source());
    Ok(config)
}
