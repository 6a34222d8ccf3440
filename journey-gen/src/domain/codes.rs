//! Stop identifier codes.
//!
//! Railway stations are matched by their 3-letter CRS code and bus stops by
//! their ATCO code. Both are validated on the way in from a gateway so the
//! segment extractor only ever compares well-formed identifiers.

use std::fmt;

/// Error returned when parsing an invalid stop code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {scheme} code {value:?}: {reason}")]
pub struct InvalidCode {
    scheme: &'static str,
    value: String,
    reason: &'static str,
}

/// A 3-letter CRS (Computer Reservation System) station code.
///
/// Input is trimmed and upper-cased, so `"pad"` and `"PAD"` are the same
/// station.
///
/// ```
/// use journey_gen::domain::Crs;
///
/// assert_eq!(Crs::parse("pad").unwrap().as_str(), "PAD");
/// assert!(Crs::parse("PADD").is_err());
/// assert!(Crs::parse("P4D").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Crs([u8; 3]);

impl Crs {
    pub fn parse(s: &str) -> Result<Self, InvalidCode> {
        let invalid = |reason| InvalidCode {
            scheme: "CRS",
            value: s.to_string(),
            reason,
        };

        let bytes = s.trim().as_bytes();
        if bytes.len() != 3 {
            return Err(invalid("must be exactly 3 characters"));
        }
        if !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(invalid("must be ASCII letters"));
        }

        Ok(Crs([
            bytes[0].to_ascii_uppercase(),
            bytes[1].to_ascii_uppercase(),
            bytes[2].to_ascii_uppercase(),
        ]))
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Debug for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Crs({})", self.as_str())
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ATCO bus stop code, e.g. `0100BRP90312`.
///
/// ATCO codes are alphanumeric and at most 12 characters. Letters are kept
/// upper-case so codes from different feeds compare equal.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AtcoCode(String);

impl AtcoCode {
    const MAX_LEN: usize = 12;

    pub fn parse(s: &str) -> Result<Self, InvalidCode> {
        let invalid = |reason| InvalidCode {
            scheme: "ATCO",
            value: s.to_string(),
            reason,
        };

        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.len() > Self::MAX_LEN {
            return Err(invalid("must be 1 to 12 characters"));
        }
        if !trimmed.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(invalid("must be ASCII letters and digits"));
        }

        Ok(AtcoCode(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AtcoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AtcoCode({})", self.0)
    }
}

impl fmt::Display for AtcoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
