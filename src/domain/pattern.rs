//! Ticket reference resolution.
//!
//! Patterns are tried in a fixed order and the first pattern that matches
//! anywhere in the input decides the ticket:
//!
//! 1. a canonical bracketed tag already present (`[PROJ-123]`, `[#123]`),
//! 2. the configured `TICKET_REGEX` list, in the given order, if any,
//! 3. otherwise the default project pattern (`PROJ-123`, `proj_123`),
//! 4. then the default numeric pattern (`123-`, `feature/123_`, `#123-`).
//!
//! All patterns match case-insensitively.

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::domain::ticket::TicketId;
use crate::error::{AppError, AppResult};

// Project codes are ASCII-only; the case-sensitive groups keep Unicode case
// folding (U+212A KELVIN SIGN for `k`) out of them.
pub const CANONICAL_PATTERN: &str =
    r"\[(#[0-9]+|(?-i:[A-Za-z][A-Za-z0-9]{1,9})[-_][0-9]+)\]";
pub const DEFAULT_PROJECT_PATTERN: &str =
    r"(?:^|(?-i:[^A-Za-z0-9]))((?-i:[A-Za-z][A-Za-z0-9]{1,9})[-_][0-9]+)";
pub const DEFAULT_NUMERIC_PATTERN: &str = r"(?:^|/|#)([0-9]+)[-_]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternSource {
    Canonical,
    Configured,
    Builtin,
}

#[derive(Debug, Clone)]
pub struct TicketPattern {
    source: PatternSource,
    regex: Regex,
}

impl TicketPattern {
    fn compile(pattern: &str, source: PatternSource) -> AppResult<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| AppError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self { source, regex })
    }

    pub fn source(&self) -> PatternSource {
        self.source
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Canonicalizes the first match only: capture groups left to right, then
    /// the whole match.
    fn find(&self, text: &str) -> Option<TicketId> {
        let captures = self.regex.captures(text)?;
        captures
            .iter()
            .skip(1)
            .chain(std::iter::once(captures.get(0)))
            .flatten()
            .find_map(|group| TicketId::from_token(group.as_str()))
    }
}

/// The ordered rule list used for one invocation.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<TicketPattern>,
}

impl PatternSet {
    #[cfg(test)]
    pub fn builtin() -> Self {
        Self::from_config(&[]).expect("built-in ticket patterns compile")
    }

    /// An empty override list selects the built-in project and numeric patterns.
    pub fn from_config(overrides: &[String]) -> AppResult<Self> {
        let mut patterns = vec![TicketPattern::compile(
            CANONICAL_PATTERN,
            PatternSource::Canonical,
        )?];

        if overrides.is_empty() {
            patterns.push(TicketPattern::compile(
                DEFAULT_PROJECT_PATTERN,
                PatternSource::Builtin,
            )?);
            patterns.push(TicketPattern::compile(
                DEFAULT_NUMERIC_PATTERN,
                PatternSource::Builtin,
            )?);
        } else {
            for pattern in overrides {
                patterns.push(TicketPattern::compile(pattern, PatternSource::Configured)?);
            }
        }

        Ok(Self { patterns })
    }

    #[cfg(test)]
    pub fn patterns(&self) -> &[TicketPattern] {
        &self.patterns
    }

    pub fn resolve(&self, text: &str) -> Option<TicketId> {
        for pattern in &self.patterns {
            if let Some(ticket) = pattern.find(text) {
                debug!(
                    ticket = %ticket,
                    pattern = pattern.as_str(),
                    source = ?pattern.source(),
                    "matched ticket reference"
                );
                return Some(ticket);
            }
        }

        let preview: String = text.chars().take(70).collect();
        debug!(content = %preview, "no ticket reference found");
        None
    }
}
