//! The set of supported IDE targets.

use std::fmt;
use std::str::FromStr;

/// An IDE (or agent) rulekit can write configuration for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Ide {
    /// One `.mdc` file per rule under `.cursor/rules/`, MCP in `.cursor/mcp.json`
    #[default]
    Cursor,
    /// Rule bodies in `.rulekit/`, summary in `.windsurfrules`
    Windsurf,
    /// Rule bodies in `.rulekit/`, summary in `AGENTS.md`
    Codex,
    /// Rule bodies in `.rulekit/`, summary in `CLAUDE.md`, MCP in `.mcp.json`
    Claude,
}

impl Ide {
    pub const ALL: [Ide; 4] = [Ide::Cursor, Ide::Windsurf, Ide::Codex, Ide::Claude];

    pub fn as_str(&self) -> &'static str {
        match self {
            Ide::Cursor => "cursor",
            Ide::Windsurf => "windsurf",
            Ide::Codex => "codex",
            Ide::Claude => "claude",
        }
    }

    /// Comma-separated list of every supported identifier.
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(Ide::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for Ide {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ide| ide.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

impl fmt::Display for Ide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_cursor() {
        assert_eq!(Ide::default(), Ide::Cursor);
    }

    #[test]
    fn test_from_str_is_exact() {
        assert_eq!("claude".parse::<Ide>().unwrap(), Ide::Claude);
        assert!("Cursor".parse::<Ide>().is_err());
        assert!("vscode".parse::<Ide>().is_err());
    }

    #[test]
    fn test_supported_list() {
        assert_eq!(Ide::supported_list(), "cursor, windsurf, codex, claude");
    }
}
