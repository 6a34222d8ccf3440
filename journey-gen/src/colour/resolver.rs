//! Route colour resolution: cache, then live lookup, then an operator.
//!
//! Each stage hands back a typed outcome. Whatever stage produces the
//! pair, it is written to the cache before `resolve` returns, so the next
//! resolution of the same key never touches the network.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::cache::{CacheKey, ColourCache};
use super::error::ColourError;
use super::lookup::{LiveLookup, LookupFault};
use super::prompt::ManualInput;
use super::style::{StyleMap, style_colour};
use crate::domain::{Colour, ColourPair};

/// Default bound on a single live lookup attempt.
const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the colour resolver.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// How long one live lookup attempt may take before the next term is tried.
    pub lookup_timeout: Duration,
    /// Colours used for any style property the matched badge lacks.
    pub fallback: ColourPair,
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    pub fn with_fallback(mut self, fallback: ColourPair) -> Self {
        self.fallback = fallback;
        self
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            fallback: ColourPair::new(Colour::GREY, Colour::WHITE),
        }
    }
}

/// Where a resolved pair came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColourSource {
    Cache,
    /// Found by the live lookup using the search term at `term_index`.
    Live { term_index: usize },
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub colours: ColourPair,
    pub source: ColourSource,
}

enum LiveOutcome {
    Matched { colours: ColourPair, term_index: usize },
    Exhausted,
    Aborted(LookupFault),
}

/// Read background and foreground from a matched badge's style.
pub fn colours_from_style(style: &StyleMap, fallback: ColourPair) -> ColourPair {
    ColourPair::new(
        style_colour(style, "background-color", fallback.background),
        style_colour(style, "color", fallback.foreground),
    )
}

/// Resolves route colours, owning the cache and both collaborators.
pub struct ColourResolver<L, M> {
    cache: ColourCache,
    lookup: L,
    manual: M,
    config: ResolverConfig,
}

impl<L: LiveLookup, M: ManualInput> ColourResolver<L, M> {
    pub fn new(cache: ColourCache, lookup: L, manual: M) -> Self {
        Self {
            cache,
            lookup,
            manual,
            config: ResolverConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn cache(&self) -> &ColourCache {
        &self.cache
    }

    /// Hand back the lookup collaborator, e.g. to close its session.
    pub fn into_lookup(self) -> L {
        self.lookup
    }

    /// Resolve the colours of the route labelled `route_label`.
    ///
    /// `search_terms` are tried one at a time, in order. Only cache IO can
    /// fail: lookup faults advance to the next term or fall through to
    /// manual input, which always answers.
    pub async fn resolve(
        &mut self,
        route_label: &str,
        key: &CacheKey,
        search_terms: &[String],
    ) -> Result<Resolution, ColourError> {
        if let Some(colours) = self.cache.get(key)? {
            return Ok(Resolution {
                colours,
                source: ColourSource::Cache,
            });
        }

        let resolution = match self.search(route_label, search_terms).await {
            LiveOutcome::Matched {
                colours,
                term_index,
            } => {
                info!(%key, term_index, background = %colours.background, foreground = %colours.foreground, "found route colour");
                Resolution {
                    colours,
                    source: ColourSource::Live { term_index },
                }
            }
            LiveOutcome::Exhausted => {
                info!(%key, terms = search_terms.len(), "no route colour found; asking operator");
                self.ask(route_label, key)
            }
            LiveOutcome::Aborted(fault) => {
                warn!(%key, error = %fault, "route colour lookup aborted; asking operator");
                self.ask(route_label, key)
            }
        };

        self.cache.put(key, resolution.colours)?;
        Ok(resolution)
    }

    fn ask(&mut self, route_label: &str, key: &CacheKey) -> Resolution {
        Resolution {
            colours: self.manual.request_colours(route_label, key),
            source: ColourSource::Manual,
        }
    }

    async fn search(&mut self, route_label: &str, search_terms: &[String]) -> LiveOutcome {
        let limit = self.config.lookup_timeout;
        for (term_index, term) in search_terms.iter().enumerate() {
            debug!(term, route_label, "live colour lookup");
            let attempt = tokio::time::timeout(limit, self.lookup.lookup(term, route_label))
                .await
                .unwrap_or(Err(LookupFault::Timeout(limit)));

            match attempt {
                Ok(Some(style)) => {
                    return LiveOutcome::Matched {
                        colours: colours_from_style(&style, self.config.fallback),
                        term_index,
                    };
                }
                Ok(None) => debug!(term, "no matching route badge"),
                Err(fault) if fault.is_recoverable() => {
                    warn!(term, error = %fault, "live colour lookup failed; trying next term");
                }
                Err(fault) => return LiveOutcome::Aborted(fault),
            }
        }
        LiveOutcome::Exhausted
    }
}
