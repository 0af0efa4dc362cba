//! String pattern compiler
//!
//! `/.../` compiles its interior as a regular expression; any other text
//! matches as a literal substring. Missing or empty input matches everything.

use regex::Regex;

/// Compiled matching predicate
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Matches every input
    Any,
    Regex(Regex),
}

impl Pattern {
    /// Compile an optional pattern
    pub fn compile(input: Option<&str>) -> Result<Self, regex::Error> {
        let text = match input {
            None | Some("") => return Ok(Pattern::Any),
            Some(text) => text,
        };

        let delimited = text.len() > 1 && text.starts_with('/') && text.ends_with('/');
        let regex = if delimited {
            Regex::new(&text[1..text.len() - 1])?
        } else {
            Regex::new(&regex::escape(text))?
        };

        Ok(Pattern::Regex(regex))
    }

    /// Whether `text` matches
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Pattern::Any => true,
            Pattern::Regex(regex) => regex.is_match(text),
        }
    }
}
