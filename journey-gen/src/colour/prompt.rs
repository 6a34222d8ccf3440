//! Asking an operator for colours the lookup could not find.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use tracing::warn;

use super::cache::CacheKey;
use crate::domain::{Colour, ColourPair};

/// A source of colours of last resort. Always produces an answer.
pub trait ManualInput {
    fn request_colours(&mut self, route_label: &str, key: &CacheKey) -> ColourPair;
}

/// Terminal prompt: asks for background then foreground, re-asking until
/// each is a valid `#rrggbb`. An empty answer takes the default shown in
/// brackets; end of input takes the defaults for everything left.
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
    defaults: ColourPair,
}

impl ConsolePrompt<StdinLock<'static>, Stdout> {
    pub fn stdio(defaults: ColourPair) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), defaults)
    }
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W, defaults: ColourPair) -> Self {
        Self {
            input,
            output,
            defaults,
        }
    }

    /// `None` at end of input.
    fn ask(&mut self, question: &str, default: Colour) -> Option<Colour> {
        loop {
            // Prompt output is best effort; a closed terminal still gets defaults.
            let _ = write!(self.output, "{question} [{default}]: ");
            let _ = self.output.flush();

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "failed to read colour from terminal");
                    return None;
                }
            }

            let answer = line.trim();
            if answer.is_empty() {
                return Some(default);
            }
            match Colour::parse_hex(answer) {
                Ok(colour) => return Some(colour),
                Err(e) => {
                    let _ = writeln!(self.output, "{e}");
                }
            }
        }
    }
}

impl<R: BufRead, W: Write> ManualInput for ConsolePrompt<R, W> {
    fn request_colours(&mut self, route_label: &str, key: &CacheKey) -> ColourPair {
        let _ = writeln!(self.output, "Could not get colour for {route_label} ({key})");

        let Some(background) = self.ask("Background colour", self.defaults.background) else {
            warn!(%key, "no manual colour given; using defaults");
            return self.defaults;
        };
        let Some(foreground) = self.ask("Foreground colour", self.defaults.foreground) else {
            warn!(%key, "no manual foreground given; using default");
            return ColourPair::new(background, self.defaults.foreground);
        };
        ColourPair::new(background, foreground)
    }
}
