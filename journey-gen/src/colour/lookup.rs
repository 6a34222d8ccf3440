//! The live route-colour lookup seam.

use std::future::Future;
use std::time::Duration;

use super::style::StyleMap;

/// A failed lookup attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupFault {
    /// The attempt did not finish within its bound
    #[error("lookup timed out after {0:?}")]
    Timeout(Duration),

    /// A network or page problem that may not recur for the next term
    #[error("transient lookup failure: {0}")]
    Transient(String),

    /// The browser session itself is unusable
    #[error("lookup session failed: {0}")]
    Navigation(String),
}

impl LookupFault {
    /// Whether the resolver should move on to the next search term.
    /// Anything else sends it straight to manual input.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, LookupFault::Navigation(_))
    }
}

/// Something that can search for a place and report the style of a route
/// badge shown there.
pub trait LiveLookup {
    /// Search for `term` and return the parsed style of the first route
    /// badge whose text starts with `route_label`, or `None` if no badge
    /// matches.
    fn lookup(
        &mut self,
        term: &str,
        route_label: &str,
    ) -> impl Future<Output = Result<Option<StyleMap>, LookupFault>> + Send;
}

/// No session at all behaves like a session that has died: every lookup
/// fails with `Navigation`, so resolution goes straight to manual input.
impl<L: LiveLookup + Send> LiveLookup for Option<L> {
    fn lookup(
        &mut self,
        term: &str,
        route_label: &str,
    ) -> impl Future<Output = Result<Option<StyleMap>, LookupFault>> + Send {
        async move {
            match self {
                Some(inner) => inner.lookup(term, route_label).await,
                None => Err(LookupFault::Navigation("no browser session".to_string())),
            }
        }
    }
}
