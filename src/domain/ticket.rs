use std::fmt;

use serde::{Serialize, Serializer};

/// A ticket reference in its canonical form: `[CODE-NNN]` or `[#NNN]`.
///
/// Issue numbers are kept as digit strings so that `[PROJ-007]` resolves back
/// to itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketId {
    Project { code: String, number: String },
    Numeric { number: String },
}

const MIN_CODE_LEN: usize = 2;
const MAX_CODE_LEN: usize = 10;

impl TicketId {
    pub fn project(code: &str, number: &str) -> Option<Self> {
        if !is_project_code(code) || !is_issue_number(number) {
            return None;
        }
        Some(TicketId::Project {
            code: code.to_ascii_uppercase(),
            number: number.to_string(),
        })
    }

    pub fn numeric(number: &str) -> Option<Self> {
        is_issue_number(number).then(|| TicketId::Numeric {
            number: number.to_string(),
        })
    }

    /// Interprets a single matched token such as `proj_12`, `[PROJ-12]`, `#12` or `12`.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        let token = token
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .unwrap_or(token);

        if let Some(number) = token.strip_prefix('#') {
            return Self::numeric(number);
        }
        if let Some(ticket) = Self::numeric(token) {
            return Some(ticket);
        }

        let split = token.rfind(['-', '_'])?;
        Self::project(&token[..split], &token[split + 1..])
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TicketId::Project { .. } => "project",
            TicketId::Numeric { .. } => "numeric",
        }
    }

    pub fn project_code(&self) -> Option<&str> {
        match self {
            TicketId::Project { code, .. } => Some(code),
            TicketId::Numeric { .. } => None,
        }
    }

    /// The numeric id platforms look issues up by.
    pub fn issue_number(&self) -> &str {
        match self {
            TicketId::Project { number, .. } | TicketId::Numeric { number } => number,
        }
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketId::Project { code, number } => write!(f, "[{code}-{number}]"),
            TicketId::Numeric { number } => write!(f, "[#{number}]"),
        }
    }
}

impl Serialize for TicketId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn is_project_code(code: &str) -> bool {
    (MIN_CODE_LEN..=MAX_CODE_LEN).contains(&code.len())
        && code.starts_with(|c: char| c.is_ascii_alphabetic())
        && code.chars().all(|c| c.is_ascii_alphanumeric())
}

fn is_issue_number(number: &str) -> bool {
    !number.is_empty() && number.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_canonical_forms() {
        let project = TicketId::project("proj", "123").unwrap();
        assert_eq!(project.to_string(), "[PROJ-123]");

        let numeric = TicketId::numeric("456").unwrap();
        assert_eq!(numeric.to_string(), "[#456]");
    }

    #[test]
    fn parses_tokens_in_every_accepted_shape() {
        assert_eq!(
            TicketId::from_token("abc_999").unwrap().to_string(),
            "[ABC-999]"
        );
        assert_eq!(
            TicketId::from_token("[PROJ-007]").unwrap().to_string(),
            "[PROJ-007]"
        );
        assert_eq!(TicketId::from_token("#12").unwrap().to_string(), "[#12]");
        assert_eq!(TicketId::from_token("[#12]").unwrap().to_string(), "[#12]");
        assert_eq!(TicketId::from_token("88").unwrap().to_string(), "[#88]");
    }

    #[test]
    fn rejects_codes_outside_length_bounds() {
        assert!(TicketId::from_token("A-1").is_none());
        assert!(TicketId::from_token("ABCDEFGHIJK-1").is_none());
        assert!(TicketId::from_token("1AB-1").is_none());
        assert!(TicketId::from_token("PROJ-").is_none());
        assert!(TicketId::from_token("feature/").is_none());
    }

    #[test]
    fn issue_number_strips_project_code() {
        let ticket = TicketId::from_token("PROJ-42").unwrap();
        assert_eq!(ticket.issue_number(), "42");
        assert_eq!(ticket.project_code(), Some("PROJ"));
        assert_eq!(ticket.kind(), "project");

        let numeric = TicketId::from_token("#42").unwrap();
        assert_eq!(numeric.issue_number(), "42");
        assert_eq!(numeric.project_code(), None);
    }

    #[test]
    fn serializes_as_canonical_string() {
        let ticket = TicketId::from_token("proj-5").unwrap();
        assert_eq!(serde_json::to_string(&ticket).unwrap(), "\"[PROJ-5]\"");
    }
}
