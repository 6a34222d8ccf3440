//! Route colours.
//!
//! Colours travel as `#rrggbb` strings in every external format we deal
//! with (cache files, plan files, the query API), so `Colour` validates
//! that form once and always displays it lower-cased.

use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an invalid colour.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid colour {value:?}: expected #rrggbb")]
pub struct InvalidColour {
    value: String,
}

/// An opaque RGB colour.
///
/// ```
/// use journey_gen::domain::Colour;
///
/// let c: Colour = "#1A2B3C".parse().unwrap();
/// assert_eq!(c.to_string(), "#1a2b3c");
/// assert_eq!(Colour::rgb(128, 128, 128).to_string(), "#808080");
/// assert!("1a2b3c".parse::<Colour>().is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Colour([u8; 3]);

impl Colour {
    pub const WHITE: Colour = Colour([0xff, 0xff, 0xff]);
    pub const BLACK: Colour = Colour([0x00, 0x00, 0x00]);
    pub const GREY: Colour = Colour([0x80, 0x80, 0x80]);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Colour([r, g, b])
    }

    /// Parse a `#rrggbb` hex string. Surrounding whitespace is ignored.
    pub fn parse_hex(s: &str) -> Result<Self, InvalidColour> {
        let invalid = || InvalidColour {
            value: s.to_string(),
        };

        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Colour([channel(0)?, channel(2)?, channel(4)?]))
    }

    pub fn red(&self) -> u8 {
        self.0[0]
    }

    pub fn green(&self) -> u8 {
        self.0[1]
    }

    pub fn blue(&self) -> u8 {
        self.0[2]
    }
}

impl FromStr for Colour {
    type Err = InvalidColour;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Colour::parse_hex(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }
}

impl fmt::Debug for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Colour({self})")
    }
}

/// The pair of colours that identifies a route: badge background and the
/// text drawn on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColourPair {
    pub background: Colour,
    pub foreground: Colour,
}

impl ColourPair {
    pub fn new(background: Colour, foreground: Colour) -> Self {
        Self {
            background,
            foreground,
        }
    }
}

/// Colours a rendered segment is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentColours {
    pub foreground: Colour,
    pub background: Colour,
    pub border: Colour,
}

impl SegmentColours {
    /// Colours for a resolved route pair; the border follows the background.
    pub fn from_pair(pair: ColourPair) -> Self {
        Self {
            foreground: pair.foreground,
            background: pair.background,
            border: pair.background,
        }
    }

    pub fn with_border(mut self, border: Colour) -> Self {
        self.border = border;
        self
    }
}

impl Default for SegmentColours {
    /// White on black: what an unstyled segment looks like.
    fn default() -> Self {
        Self {
            foreground: Colour::WHITE,
            background: Colour::BLACK,
            border: Colour::BLACK,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn display_then_parse(r: u8, g: u8, b: u8) {
            let c = Colour::rgb(r, g, b);
            prop_assert_eq!(Colour::parse_hex(&c.to_string()).unwrap(), c);
        }
    }
}
