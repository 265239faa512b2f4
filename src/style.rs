//! Style kinds and resolved text attributes.
//!
//! This module provides the vocabulary shared by every engine component:
//!
//! - [`StyleKind`]: the tag stored on each span (character- or line-level)
//! - [`QuoteStyle`]: rendering metadata carried by quote spans
//! - [`TextAttributes`]: bitflags describing every style active at an offset
//!
//! # Examples
//!
//! ```
//! use richnote::{StyleKind, TextAttributes};
//!
//! assert!(StyleKind::Bold.is_character_level());
//! assert!(StyleKind::AlignCenter.is_alignment());
//!
//! let attrs = StyleKind::Bold.attribute() | StyleKind::Bullet.attribute();
//! assert!(attrs.contains(TextAttributes::BOLD));
//! assert_eq!(attrs.kinds().count(), 2);
//! ```

use crate::color::Rgba;
use bitflags::bitflags;
use std::fmt;

/// The kind of style a span applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleKind {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    /// Background highlight. Produced by quotes; has no toggle command.
    Highlight,
    Bullet,
    Quote,
    AlignLeft,
    AlignRight,
    AlignCenter,
}

impl StyleKind {
    /// Every kind, in canonical order.
    pub const ALL: [Self; 10] = [
        Self::Bold,
        Self::Italic,
        Self::Underline,
        Self::Strikethrough,
        Self::Highlight,
        Self::Bullet,
        Self::Quote,
        Self::AlignLeft,
        Self::AlignRight,
        Self::AlignCenter,
    ];

    /// Character-level kinds that can be engaged for typing continuation.
    pub const TOGGLEABLE: [Self; 4] = [
        Self::Bold,
        Self::Italic,
        Self::Underline,
        Self::Strikethrough,
    ];

    /// Alignment kinds. At most one is active over any range.
    pub const ALIGNMENTS: [Self; 3] = [Self::AlignLeft, Self::AlignRight, Self::AlignCenter];

    /// Check if this kind styles individual characters.
    #[must_use]
    pub const fn is_character_level(self) -> bool {
        matches!(
            self,
            Self::Bold | Self::Italic | Self::Underline | Self::Strikethrough | Self::Highlight
        )
    }

    /// Check if this kind styles whole lines.
    #[must_use]
    pub const fn is_line_level(self) -> bool {
        !self.is_character_level()
    }

    /// Check if this kind is one of the three alignments.
    #[must_use]
    pub const fn is_alignment(self) -> bool {
        matches!(self, Self::AlignLeft | Self::AlignRight | Self::AlignCenter)
    }

    /// Position in [`StyleKind::TOGGLEABLE`], if the kind is toggleable.
    #[must_use]
    pub const fn toggle_index(self) -> Option<usize> {
        match self {
            Self::Bold => Some(0),
            Self::Italic => Some(1),
            Self::Underline => Some(2),
            Self::Strikethrough => Some(3),
            _ => None,
        }
    }

    /// The attribute flag corresponding to this kind.
    #[must_use]
    pub const fn attribute(self) -> TextAttributes {
        match self {
            Self::Bold => TextAttributes::BOLD,
            Self::Italic => TextAttributes::ITALIC,
            Self::Underline => TextAttributes::UNDERLINE,
            Self::Strikethrough => TextAttributes::STRIKETHROUGH,
            Self::Highlight => TextAttributes::HIGHLIGHT,
            Self::Bullet => TextAttributes::BULLET,
            Self::Quote => TextAttributes::QUOTE,
            Self::AlignLeft => TextAttributes::ALIGN_LEFT,
            Self::AlignRight => TextAttributes::ALIGN_RIGHT,
            Self::AlignCenter => TextAttributes::ALIGN_CENTER,
        }
    }

    /// Markup tag name.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Bold => "b",
            Self::Italic => "i",
            Self::Underline => "u",
            Self::Strikethrough => "s",
            Self::Highlight => "mark",
            Self::Bullet => "bullet",
            Self::Quote => "quote",
            Self::AlignLeft => "left",
            Self::AlignRight => "right",
            Self::AlignCenter => "center",
        }
    }

    /// Look up a kind by its markup tag name.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Rendering metadata for quote spans.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuoteStyle {
    /// Color of the vertical stripe.
    pub stripe_color: Rgba,
    /// Stripe width in pixels.
    pub stripe_width: u16,
    /// Gap between stripe and text in pixels.
    pub gap_width: u16,
}

impl QuoteStyle {
    pub const DEFAULT_STRIPE_WIDTH: u16 = 2;
    pub const DEFAULT_GAP_WIDTH: u16 = 2;

    /// Create a quote style with explicit metadata.
    #[must_use]
    pub const fn new(stripe_color: Rgba, stripe_width: u16, gap_width: u16) -> Self {
        Self {
            stripe_color,
            stripe_width,
            gap_width,
        }
    }
}

impl Default for QuoteStyle {
    fn default() -> Self {
        Self::new(
            Rgba::BLUE,
            Self::DEFAULT_STRIPE_WIDTH,
            Self::DEFAULT_GAP_WIDTH,
        )
    }
}

bitflags! {
    /// Every style active at a position, one flag per [`StyleKind`].
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct TextAttributes: u16 {
        const BOLD          = 0x001;
        const ITALIC        = 0x002;
        const UNDERLINE     = 0x004;
        const STRIKETHROUGH = 0x008;
        const HIGHLIGHT     = 0x010;
        const BULLET        = 0x020;
        const QUOTE         = 0x040;
        const ALIGN_LEFT    = 0x080;
        const ALIGN_RIGHT   = 0x100;
        const ALIGN_CENTER  = 0x200;
    }
}

impl TextAttributes {
    /// Character-level flags.
    pub const CHARACTER_MASK: Self = Self::BOLD
        .union(Self::ITALIC)
        .union(Self::UNDERLINE)
        .union(Self::STRIKETHROUGH)
        .union(Self::HIGHLIGHT);

    /// Iterate the kinds present, in canonical order.
    pub fn kinds(self) -> impl Iterator<Item = StyleKind> {
        StyleKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(kind.attribute()))
    }

    /// Check if the given kind is present.
    #[must_use]
    pub const fn has(self, kind: StyleKind) -> bool {
        self.contains(kind.attribute())
    }
}

impl From<StyleKind> for TextAttributes {
    fn from(kind: StyleKind) -> Self {
        kind.attribute()
    }
}
