//! ANSI styling primitives.
//!
//! Every styled fragment goes through [`paint`], which wraps text in a single
//! SGR sequence drawn from a fixed 8-color foreground palette. The escape-aware
//! helpers ([`strip_ansi`], [`visible_len`], [`truncate_visible`]) measure and
//! cut text that already carries styling without splitting an escape sequence.

use std::fmt::Write as _;

/// SGR sequence that resets all attributes.
pub const RESET: &str = "\x1b[m";

/// Foreground color from the standard 30-37 palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// SGR 30.
    Black,
    /// SGR 31.
    Red,
    /// SGR 32.
    Green,
    /// SGR 33.
    Yellow,
    /// SGR 34.
    Blue,
    /// SGR 35.
    Magenta,
    /// SGR 36.
    Cyan,
    /// SGR 37.
    Gray,
}

impl Color {
    /// Return the SGR foreground code for this color.
    pub const fn code(self) -> u8 {
        match self {
            Self::Black => 30,
            Self::Red => 31,
            Self::Green => 32,
            Self::Yellow => 33,
            Self::Blue => 34,
            Self::Magenta => 35,
            Self::Cyan => 36,
            Self::Gray => 37,
        }
    }
}

/// Intensity applied together with a [`Color`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Weight {
    /// SGR 0.
    #[default]
    Normal,
    /// SGR 1 (bold / bright).
    Bright,
}

impl Weight {
    /// Return the SGR attribute code for this weight.
    pub const fn code(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Bright => 1,
        }
    }
}

/// Wrap `text` as `ESC[<weight>;<color>m<text>ESC[m`.
pub fn paint(text: &str, color: Color, weight: Weight) -> String {
    let mut out = String::with_capacity(text.len().saturating_add(12));
    write_painted(&mut out, text, color, weight);
    out
}

fn write_painted(out: &mut String, text: &str, color: Color, weight: Weight) {
    // Writing into a String cannot fail.
    let _ = write!(out, "\x1b[{};{}m{text}{RESET}", weight.code(), color.code());
}

/// Output buffer that a single rendered line is assembled in.
#[derive(Debug, Clone, Default)]
pub struct StyledBuffer {
    buf: String,
}

impl StyledBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text unchanged.
    pub fn push(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    /// Append text wrapped in an SGR sequence.
    pub fn push_styled(&mut self, text: &str, color: Color, weight: Weight) {
        write_painted(&mut self.buf, text, color, weight);
    }

    /// View the buffered text.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Whether nothing has been buffered.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Discard the buffered text.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Take the buffered text, leaving the buffer empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buf)
    }
}

/// A piece of styled text: either a whole escape sequence or one visible char.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Escape(&'a str),
    Visible(&'a str),
}

struct Segments<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        let first = self.rest.chars().next()?;
        let (len, escape) = if first == '\x1b' {
            (escape_len(self.rest), true)
        } else {
            (first.len_utf8(), false)
        };
        let (head, tail) = self.rest.split_at(len);
        self.rest = tail;
        Some(if escape {
            Segment::Escape(head)
        } else {
            Segment::Visible(head)
        })
    }
}

fn segments(text: &str) -> Segments<'_> {
    Segments { rest: text }
}

/// Byte length of the escape sequence at the start of `rest`.
///
/// CSI sequences run up to and including their final byte (0x40-0x7E). An
/// unterminated CSI swallows the remainder of the text. Any other escape is
/// treated as two characters long.
fn escape_len(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    match bytes.get(1) {
        None => 1,
        Some(b'[') => bytes
            .iter()
            .skip(2)
            .position(|b| (0x40..=0x7e).contains(b))
            .map_or(bytes.len(), |pos| pos.saturating_add(3)),
        Some(_) => rest
            .chars()
            .nth(1)
            .map_or(1, |c| c.len_utf8().saturating_add(1)),
    }
}

/// Remove all ANSI escape sequences from `text`.
pub fn strip_ansi(text: &str) -> String {
    segments(text)
        .filter_map(|segment| match segment {
            Segment::Visible(s) => Some(s),
            Segment::Escape(_) => None,
        })
        .collect()
}

/// Count the characters of `text` that are not part of an escape sequence.
pub fn visible_len(text: &str) -> usize {
    segments(text)
        .filter(|segment| matches!(segment, Segment::Visible(_)))
        .count()
}

/// Cut styled text down to `max` visible characters.
///
/// Returns `None` when the text already fits. Otherwise keeps escape sequences
/// whole, resets styling if any was emitted, and appends
/// ` ... (N more chars)` where `N` is the number of visible characters dropped.
pub fn truncate_visible(text: &str, max: usize) -> Option<String> {
    let total = visible_len(text);
    if total <= max {
        return None;
    }

    let mut out = String::with_capacity(text.len());
    let mut kept = 0usize;
    let mut styled = false;
    for segment in segments(text) {
        if kept >= max {
            break;
        }
        match segment {
            Segment::Escape(s) => {
                styled = true;
                out.push_str(s);
            }
            Segment::Visible(s) => {
                out.push_str(s);
                kept = kept.saturating_add(1);
            }
        }
    }

    if styled {
        out.push_str(RESET);
    }
    let elided = total.saturating_sub(max);
    let _ = write!(out, " ... ({elided} more chars)");
    Some(out)
}
