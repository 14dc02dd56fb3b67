//! Terminal styles per token kind.

use crossterm::style::{Attribute, Color, ContentStyle};
use std::collections::HashMap;
use yutex_config::PaletteConfig;
use yutex_core::TokenKind;

/// Resolved terminal style for every token kind.
#[derive(Debug, Clone, Default)]
pub struct TokenStyles {
    styles: HashMap<TokenKind, ContentStyle>,
}

impl TokenStyles {
    /// Build styles from a palette. Kinds without a color stay unstyled.
    pub fn from_palette(palette: &PaletteConfig) -> Self {
        let styles = TokenKind::ALL
            .into_iter()
            .map(|kind| (kind, style_for(kind, palette.color(kind))))
            .collect();
        Self { styles }
    }

    /// Style for `kind`.
    pub fn get(&self, kind: TokenKind) -> ContentStyle {
        self.styles.get(&kind).copied().unwrap_or_default()
    }
}

fn style_for(kind: TokenKind, rgb: Option<(u8, u8, u8)>) -> ContentStyle {
    let mut style = ContentStyle::new();
    style.foreground_color = rgb.map(|(r, g, b)| Color::Rgb { r, g, b });
    match kind {
        TokenKind::Tag | TokenKind::Keyword => style.attributes.set(Attribute::Bold),
        TokenKind::Comment => style.attributes.set(Attribute::Italic),
        TokenKind::Link => style.attributes.set(Attribute::Underlined),
        _ => {}
    }
    style
}
