//! Themes command: prints the palette table

use annocard::{Color, Theme};

fn hex(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

pub fn run() {
    println!("{:<3} {:<10} {:<9} {:<9} TEXT", "#", "NAME", "ACCENT", "SURFACE");
    for (index, theme) in Theme::all().iter().enumerate() {
        println!(
            "{:<3} {:<10} {:<9} {:<9} {}",
            index,
            theme.name,
            hex(theme.accent),
            hex(theme.surface),
            hex(theme.text)
        );
    }
}
