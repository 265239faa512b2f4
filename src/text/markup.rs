//! Markup serialization for persistence.
//!
//! The storage layer only ever sees a markup string. The format is a small
//! tag language:
//!
//! - text with `&lt;`, `&gt;` and `&amp;` escapes (newlines are literal)
//! - `<b> <i> <u> <s> <mark>` for character styles
//! - `<bullet> <quote> <left> <right> <center>` for line styles; `quote`
//!   takes optional `color`, `stripe` and `gap` attributes
//!
//! [`to_markup`] splits the text into maximal runs of constant style and
//! wraps each run in its tags. [`parse_markup`] accepts any properly closed
//! tag sequence. Loading then saving preserves the text and, per style
//! kind, exactly which characters are covered.
//!
//! ```
//! use richnote::text::{SpanStore, parse_markup, to_markup};
//! use richnote::StyleKind;
//!
//! let mut spans = SpanStore::new();
//! spans.add(StyleKind::Bold, 0, 5);
//! let markup = to_markup("Hello <world>", spans.spans());
//! assert_eq!(markup, "<b>Hello</b> &lt;world&gt;");
//!
//! let doc = parse_markup(&markup).unwrap();
//! assert_eq!(doc.text, "Hello <world>");
//! assert_eq!(doc.spans.spans()[0].range, 0..5);
//! ```

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::style::{QuoteStyle, StyleKind, TextAttributes};
use crate::text::span::{SpanStore, StyleSpan};
use std::fmt::Write as _;
use tracing::debug;

/// Tag nesting order, outermost first.
const NESTING: [StyleKind; 10] = [
    StyleKind::AlignLeft,
    StyleKind::AlignRight,
    StyleKind::AlignCenter,
    StyleKind::Bullet,
    StyleKind::Quote,
    StyleKind::Highlight,
    StyleKind::Bold,
    StyleKind::Italic,
    StyleKind::Underline,
    StyleKind::Strikethrough,
];

/// Text and spans reconstructed from markup.
#[derive(Clone, Debug, Default)]
pub struct MarkupDocument {
    pub text: String,
    pub spans: SpanStore,
}

/// A maximal run of characters sharing one style set.
#[derive(Clone, Debug, PartialEq)]
struct Run {
    start: usize,
    end: usize,
    attrs: TextAttributes,
    quote: Option<QuoteStyle>,
}

/// Serialize text and spans to markup.
///
/// Spans reaching past the end of `text` are clipped.
#[must_use]
pub fn to_markup(text: &str, spans: &[StyleSpan]) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + spans.len() * 8);

    for run in runs(chars.len(), spans) {
        let kinds: Vec<StyleKind> = NESTING
            .into_iter()
            .filter(|kind| run.attrs.has(*kind))
            .collect();

        for kind in &kinds {
            open_tag(&mut out, *kind, run.quote);
        }
        for &ch in &chars[run.start..run.end] {
            match ch {
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '&' => out.push_str("&amp;"),
                _ => out.push(ch),
            }
        }
        for kind in kinds.iter().rev() {
            let _ = write!(out, "</{}>", kind.tag());
        }
    }
    out
}

fn runs(len: usize, spans: &[StyleSpan]) -> Vec<Run> {
    let mut bounds: Vec<usize> = vec![0, len];
    for span in spans {
        bounds.push(span.range.start.min(len));
        bounds.push(span.range.end.min(len));
    }
    bounds.sort_unstable();
    bounds.dedup();

    let mut runs: Vec<Run> = Vec::new();
    for pair in bounds.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let covering = spans.iter().filter(|span| span.contains(start));
        let mut attrs = TextAttributes::empty();
        let mut quote = None;
        for span in covering {
            attrs |= span.kind.attribute();
            if span.kind == StyleKind::Quote && quote.is_none() {
                quote = Some(span.quote.unwrap_or_default());
            }
        }

        match runs.last_mut() {
            Some(last) if last.attrs == attrs && last.quote == quote => last.end = end,
            _ => runs.push(Run {
                start,
                end,
                attrs,
                quote,
            }),
        }
    }
    runs
}

fn open_tag(out: &mut String, kind: StyleKind, quote: Option<QuoteStyle>) {
    match (kind, quote) {
        (StyleKind::Quote, Some(quote)) => {
            let _ = write!(
                out,
                "<quote color=\"{}\" stripe=\"{}\" gap=\"{}\">",
                quote.stripe_color, quote.stripe_width, quote.gap_width
            );
        }
        _ => {
            let _ = write!(out, "<{}>", kind.tag());
        }
    }
}

/// Parse markup back into text and spans.
///
/// Spans of the same kind that touch or overlap are coalesced.
pub fn parse_markup(input: &str) -> Result<MarkupDocument> {
    let mut text = String::with_capacity(input.len());
    let mut spans = SpanStore::new();
    let mut open: Vec<(StyleKind, usize, Option<QuoteStyle>, usize)> = Vec::new();
    let mut pos = 0usize;
    let mut rest = input.char_indices().peekable();

    while let Some((idx, ch)) = rest.next() {
        match ch {
            '<' => {
                let Some(close) = input[idx..].find('>') else {
                    return Err(Error::markup(idx, "unterminated tag"));
                };
                let body = &input[idx + 1..idx + close];
                while rest.peek().is_some_and(|(i, _)| *i <= idx + close) {
                    rest.next();
                }

                if let Some(name) = body.strip_prefix('/') {
                    let kind = lookup_tag(name.trim(), idx)?;
                    let Some(slot) = open.iter().rposition(|(k, ..)| *k == kind) else {
                        return Err(Error::markup(idx, format!("unmatched closing tag </{kind}>")));
                    };
                    let (kind, start, quote, _) = open.remove(slot);
                    spans.add_span(StyleSpan {
                        kind,
                        range: start..pos,
                        quote,
                    });
                } else {
                    let mut parts = body.split_whitespace();
                    let kind = lookup_tag(parts.next().unwrap_or_default(), idx)?;
                    let attrs: Vec<&str> = parts.collect();
                    let quote = if kind == StyleKind::Quote {
                        Some(parse_quote_attrs(&attrs, idx)?)
                    } else if attrs.is_empty() {
                        None
                    } else {
                        return Err(Error::markup(idx, format!("<{kind}> takes no attributes")));
                    };
                    open.push((kind, pos, quote, idx));
                }
            }
            '&' => {
                let Some(semi) = input[idx..].find(';') else {
                    return Err(Error::markup(idx, "unterminated entity"));
                };
                let decoded = match &input[idx + 1..idx + semi] {
                    "lt" => '<',
                    "gt" => '>',
                    "amp" => '&',
                    other => {
                        return Err(Error::markup(idx, format!("unknown entity &{other};")));
                    }
                };
                while rest.peek().is_some_and(|(i, _)| *i <= idx + semi) {
                    rest.next();
                }
                text.push(decoded);
                pos += 1;
            }
            _ => {
                text.push(ch);
                pos += 1;
            }
        }
    }

    if let Some((kind, _, _, at)) = open.first() {
        return Err(Error::markup(*at, format!("unclosed tag <{kind}>")));
    }

    spans.coalesce_all();
    debug!(chars = pos, spans = spans.len(), "markup parsed");
    Ok(MarkupDocument { text, spans })
}

fn lookup_tag(name: &str, at: usize) -> Result<StyleKind> {
    StyleKind::from_tag(name).ok_or_else(|| Error::markup(at, format!("unknown tag <{name}>")))
}

fn parse_quote_attrs(attrs: &[&str], at: usize) -> Result<QuoteStyle> {
    let mut quote = QuoteStyle::default();
    for attr in attrs {
        let Some((key, value)) = attr.split_once('=') else {
            return Err(Error::markup(at, format!("malformed attribute {attr}")));
        };
        let value = value.trim_matches('"');
        match key {
            "color" => {
                quote.stripe_color =
                    Rgba::from_hex(value).ok_or_else(|| Error::InvalidColor(value.to_string()))?;
            }
            "stripe" => quote.stripe_width = parse_width(value, at)?,
            "gap" => quote.gap_width = parse_width(value, at)?,
            _ => return Err(Error::markup(at, format!("unknown attribute {key}"))),
        }
    }
    Ok(quote)
}

fn parse_width(value: &str, at: usize) -> Result<u16> {
    value
        .parse()
        .map_err(|_| Error::markup(at, format!("invalid width {value}")))
}
