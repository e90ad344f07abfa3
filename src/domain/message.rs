use crate::domain::ticket::TicketId;

const SCISSORS: &str = "------------------------ >8 ------------------------";

/// Raw contents of a commit message file as git hands it to a hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage(String);

impl CommitMessage {
    pub fn new(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The message text git will keep: comment lines and anything below the
    /// scissors line are dropped.
    ///
    /// A line starting with `#` and a digit (`#123-fix`) is kept as content so
    /// numeric references can lead the subject. Git's default `strip` cleanup
    /// still removes such a line after the commit-msg hook has accepted it;
    /// repositories relying on it need `commit.cleanup=whitespace` or a
    /// `core.commentChar` other than `#`.
    pub fn body(&self) -> String {
        self.0
            .lines()
            .take_while(|line| !is_scissors(line))
            .filter(|line| !is_comment(line))
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }

    /// Prefixes the subject line with `<ticket>: `.
    pub fn with_ticket(&self, ticket: &TicketId) -> Self {
        let mut offset = 0;
        for line in self.0.split_inclusive('\n') {
            if is_scissors(line) {
                break;
            }
            if !is_comment(line) && !line.trim().is_empty() {
                let indent = line.len() - line.trim_start().len();
                let at = offset + indent;
                return Self(format!("{}{ticket}: {}", &self.0[..at], &self.0[at..]));
            }
            offset += line.len();
        }

        Self(format!("{ticket}: \n{}", self.0))
    }
}

fn is_comment(line: &str) -> bool {
    let mut chars = line.chars();
    chars.next() == Some('#') && !chars.next().is_some_and(|c| c.is_ascii_digit())
}

fn is_scissors(line: &str) -> bool {
    is_comment(line) && line.contains(SCISSORS)
}
