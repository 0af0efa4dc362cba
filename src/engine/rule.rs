//! Scriptlet rule parsing
//!
//! Turns filter-list rule text into an invocation request. Two syntaxes are
//! understood:
//! - AdGuard: `example.org#%#//scriptlet('set-constant', 'a.b', 'true')`
//! - uBlock Origin: `example.org##+js(set-constant, a.b, true)`
//!
//! Both have an exception form (`#@%#//scriptlet(` and `#@#+js(`).

use std::fmt;
use std::str::FromStr;

use super::source::{Arg, Engine, Source};
use crate::{Error, Result};

const ADG_MARKER: &str = "#%#//scriptlet(";
const ADG_EXCEPTION_MARKER: &str = "#@%#//scriptlet(";
const UBO_MARKER: &str = "##+js(";
const UBO_EXCEPTION_MARKER: &str = "#@#+js(";

/// Rule dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSyntax {
    AdGuard,
    UBlock,
}

/// Parsed scriptlet rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptletRule {
    /// Original rule text
    pub text: String,
    /// Domains the rule applies to; empty means generic
    pub domains: Vec<String>,
    /// Exception (`#@`) rule
    pub exception: bool,
    pub syntax: RuleSyntax,
    /// Scriptlet name, normalised to its `.js` form for uBlock rules
    pub name: String,
    pub args: Vec<String>,
}

impl ScriptletRule {
    /// Parse rule text
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let (syntax, exception, position, marker) = locate_marker(text)
            .ok_or_else(|| Error::invalid_rule(format!("no scriptlet marker in `{}`", text)))?;

        let domains = text[..position]
            .split(',')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .collect();

        let call = &text[position + marker.len()..];
        let inner = call
            .strip_suffix(')')
            .ok_or_else(|| Error::invalid_rule(format!("missing closing parenthesis in `{}`", text)))?;

        let params = match syntax {
            RuleSyntax::AdGuard => parse_quoted_params(inner)?,
            RuleSyntax::UBlock => split_ubo_params(inner),
        };

        let (name, args) = params
            .split_first()
            .ok_or_else(|| Error::invalid_rule(format!("missing scriptlet name in `{}`", text)))?;
        if name.is_empty() {
            return Err(Error::invalid_rule(format!("empty scriptlet name in `{}`", text)));
        }

        let name = match syntax {
            RuleSyntax::UBlock if !name.ends_with(".js") => format!("{}.js", name),
            _ => name.clone(),
        };

        tracing::debug!(rule = text, scriptlet = %name, "Parsed scriptlet rule");

        Ok(Self {
            text: text.to_string(),
            domains,
            exception,
            syntax,
            name,
            args: args.to_vec(),
        })
    }

    /// Invocation request for this rule
    pub fn to_source(&self, engine: Engine, verbose: bool) -> Source {
        let mut source = Source::new(self.name.clone())
            .with_args(self.args.iter().map(|a| Arg::String(a.clone())))
            .engine(engine)
            .verbose(verbose)
            .rule_text(self.text.clone());
        if !self.domains.is_empty() {
            source = source.domain_name(self.domains.join(","));
        }
        source
    }

    /// Render the rule in AdGuard syntax.
    ///
    /// uBlock names gain the `ubo-` prefix their AdGuard aliases carry.
    pub fn to_adguard(&self) -> String {
        let name = match self.syntax {
            RuleSyntax::UBlock => format!("ubo-{}", self.name),
            RuleSyntax::AdGuard => self.name.clone(),
        };
        let params: Vec<String> = std::iter::once(name.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(quote)
            .collect();
        let marker = if self.exception { ADG_EXCEPTION_MARKER } else { ADG_MARKER };

        format!("{}{}{})", self.domains.join(","), marker, params.join(", "))
    }
}

impl FromStr for ScriptletRule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ScriptletRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn locate_marker(text: &str) -> Option<(RuleSyntax, bool, usize, &'static str)> {
    [
        (RuleSyntax::AdGuard, true, ADG_EXCEPTION_MARKER),
        (RuleSyntax::AdGuard, false, ADG_MARKER),
        (RuleSyntax::UBlock, true, UBO_EXCEPTION_MARKER),
        (RuleSyntax::UBlock, false, UBO_MARKER),
    ]
    .into_iter()
    .filter_map(|(syntax, exception, marker)| {
        text.find(marker).map(|pos| (syntax, exception, pos, marker))
    })
    .min_by_key(|(_, _, pos, _)| *pos)
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Parse `'a', "b", 'c\'d'`.
///
/// A backslash escapes the active quote or another backslash. Any other
/// backslash is kept, so `/\d+/` arrives intact.
fn parse_quoted_params(input: &str) -> Result<Vec<String>> {
    let mut params = Vec::new();
    let mut chars = input.chars().peekable();
    let mut expect_param = false;

    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }

        let quote_char = match chars.next() {
            None if expect_param => {
                return Err(Error::invalid_rule("trailing comma in scriptlet arguments"))
            }
            None => break,
            Some(c @ ('\'' | '"')) => c,
            Some(c) => {
                return Err(Error::invalid_rule(format!(
                    "unexpected `{}` in scriptlet arguments",
                    c
                )))
            }
        };

        let mut param = String::new();
        let mut closed = false;
        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.peek() {
                    Some(&next) if next == quote_char || next == '\\' => {
                        param.push(next);
                        chars.next();
                    }
                    _ => param.push('\\'),
                },
                c if c == quote_char => {
                    closed = true;
                    break;
                }
                c => param.push(c),
            }
        }
        if !closed {
            return Err(Error::invalid_rule("unterminated quoted argument"));
        }
        params.push(param);

        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        match chars.next() {
            None => break,
            Some(',') => expect_param = true,
            Some(c) => {
                return Err(Error::invalid_rule(format!(
                    "expected `,` between arguments, found `{}`",
                    c
                )))
            }
        }
    }

    Ok(params)
}

/// Split `name, a, b\, c` on unescaped commas and trim each part
fn split_ubo_params(input: &str) -> Vec<String> {
    if input.trim().is_empty() {
        return Vec::new();
    }

    let mut params = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&',') => {
                current.push(',');
                chars.next();
            }
            ',' => params.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    params.push(current);

    params.into_iter().map(|p| p.trim().to_string()).collect()
}
