//! Command-line argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Annocard - turn a book excerpt and your reflection into a shareable card
#[derive(Parser, Debug)]
#[command(name = "annocard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log pipeline decisions to stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render one card to a PNG file or a gallery album
    #[command(alias = "r")]
    Render(Box<RenderArgs>),

    /// List the built-in color themes
    #[command(alias = "t")]
    Themes,
}

/// Arguments for the render command
#[derive(Parser, Debug)]
pub struct RenderArgs {
    // Card Input
    /// Read the whole card from a JSON file (fields below override it)
    #[arg(short = 'C', long = "card")]
    pub card: Option<PathBuf>,

    /// Book title
    #[arg(short = 'b', long = "book")]
    pub book: Option<String>,

    /// Book author
    #[arg(short = 'a', long = "author")]
    pub author: Option<String>,

    /// Chapter title
    #[arg(short = 'c', long = "chapter")]
    pub chapter: Option<String>,

    /// The excerpt; `-` reads it from stdin
    #[arg(short = 'e', long = "excerpt")]
    pub excerpt: Option<String>,

    /// Your reflection, shown in the panel
    #[arg(short = 'r', long = "reflection")]
    pub reflection: Option<String>,

    /// Theme index, see `annocard themes`
    #[arg(long = "theme")]
    pub theme: Option<usize>,

    // Typeface
    /// Font file path or content:// reference
    #[arg(short = 'f', long = "typeface")]
    pub typeface: Option<String>,

    /// System family when no typeface is set: 0 sans-serif, 1 serif, 2 monospace
    #[arg(long = "system-typeface")]
    pub system_typeface: Option<u8>,

    /// Directory that content:// references resolve against
    #[arg(long = "content-root")]
    pub content_root: Option<PathBuf>,

    /// Composer settings as JSON
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    // Output
    /// Write the card to this PNG file
    #[arg(short = 'o', long = "output", conflicts_with = "gallery")]
    pub output: Option<PathBuf>,

    /// Save into an album under this pictures directory
    #[arg(short = 'g', long = "gallery")]
    pub gallery: Option<PathBuf>,

    /// Album name inside the gallery
    #[arg(long = "album", requires = "gallery")]
    pub album: Option<String>,

    /// Print only the saved location
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}
