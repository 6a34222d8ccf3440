//! Flat-file colour cache.
//!
//! One file per route under `{root}/{namespace}/{slug}`, holding exactly
//! two lines: background then foreground, each `#rrggbb`. The files are
//! meant to be edited by hand when a looked-up colour is wrong.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use super::error::ColourError;
use crate::domain::{Colour, ColourPair};

/// Which family of routes a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Bus,
    Train,
}

impl Namespace {
    /// Subdirectory of the cache root holding this namespace.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Namespace::Bus => "bus",
            Namespace::Train => "train",
        }
    }
}

/// A normalised route key.
///
/// The slug is lower-cased and every character other than `a-z`, `0-9`,
/// `-` and `_` becomes `-`, so it is always a safe file name.
///
/// ```
/// use journey_gen::colour::{CacheKey, Namespace};
///
/// let key = CacheKey::new(Namespace::Train, "Great Western Railway");
/// assert_eq!(key.to_string(), "train/great-western-railway");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    namespace: Namespace,
    slug: String,
}

impl CacheKey {
    pub fn new(namespace: Namespace, raw: &str) -> Self {
        Self {
            namespace,
            slug: normalise(raw),
        }
    }

    pub fn bus(raw: &str) -> Self {
        Self::new(Namespace::Bus, raw)
    }

    pub fn train(raw: &str) -> Self {
        Self::new(Namespace::Train, raw)
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    fn relative_path(&self) -> PathBuf {
        Path::new(self.namespace.dir_name()).join(&self.slug)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace.dir_name(), self.slug)
    }
}

fn normalise(raw: &str) -> String {
    let slug: String = raw
        .trim()
        .chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();

    if slug.is_empty() { "_".to_string() } else { slug }
}

/// The on-disk colour store.
#[derive(Debug, Clone)]
pub struct ColourCache {
    root: PathBuf,
}

impl ColourCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File a key is stored in.
    pub fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.root.join(key.relative_path())
    }

    /// Look up a key.
    ///
    /// Returns `Ok(None)` when no record exists. A record that exists but
    /// cannot be read or parsed is an error rather than a miss, so a
    /// hand-edit gone wrong is noticed instead of silently re-resolved.
    pub fn get(&self, key: &CacheKey) -> Result<Option<ColourPair>, ColourError> {
        let path = self.path_for(key);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!(%key, "colour cache miss");
                return Ok(None);
            }
            Err(e) => return Err(ColourError::io(path, e)),
        };

        let pair = parse_record(&contents).map_err(|reason| ColourError::Corrupt {
            path: path.clone(),
            reason,
        })?;
        debug!(%key, background = %pair.background, foreground = %pair.foreground, "colour cache hit");
        Ok(Some(pair))
    }

    /// Store a pair, replacing any existing record.
    ///
    /// The record is written to a temporary file and renamed into place.
    pub fn put(&self, key: &CacheKey, pair: ColourPair) -> Result<(), ColourError> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ColourError::io(parent, e))?;
        }

        let tmp = path.with_extension("tmp");
        let record = format!("{}\n{}\n", pair.background, pair.foreground);
        std::fs::write(&tmp, record).map_err(|e| ColourError::io(&tmp, e))?;
        std::fs::rename(&tmp, &path).map_err(|e| ColourError::io(&path, e))?;

        debug!(%key, background = %pair.background, foreground = %pair.foreground, "colour cache write");
        Ok(())
    }
}

fn parse_record(contents: &str) -> Result<ColourPair, String> {
    let mut lines = contents.lines().map(str::trim).filter(|l| !l.is_empty());
    let (Some(bg), Some(fg)) = (lines.next(), lines.next()) else {
        return Err("expected two lines".to_string());
    };
    if lines.next().is_some() {
        return Err("more than two lines".to_string());
    }

    let background = Colour::parse_hex(bg).map_err(|e| e.to_string())?;
    let foreground = Colour::parse_hex(fg).map_err(|e| e.to_string())?;
    Ok(ColourPair::new(background, foreground))
}
