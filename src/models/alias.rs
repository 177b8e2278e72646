//! User-defined command aliases
//!
//! An alias is a macro expanding one command word into another command line.
//! The expansion template is parsed once at definition time into a token
//! sequence; dispatch only substitutes, it never re-parses the `$N`
//! placeholder syntax.

use serde::{Deserialize, Serialize};

use crate::error::{LockboxError, LockboxResult};

/// One token of an alias expansion template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AliasToken {
    /// Passed through verbatim
    Literal(String),
    /// Replaced by the caller's argument at this position
    Param(usize),
}

/// A stored alias definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    /// The command word that triggers this alias
    pub name: String,
    /// Parsed expansion template
    pub tokens: Vec<AliasToken>,
    /// Number of arguments consumed by `Param` placeholders
    pub arg_count: usize,
}

impl Alias {
    /// Parse an alias definition from its name and raw template words.
    ///
    /// `$0`, `$1`, ... become [`AliasToken::Param`]; everything else is
    /// literal. The argument count is one past the highest placeholder
    /// index, so `$0 $2` requires three arguments even if `$1` is unused.
    pub fn parse(name: impl Into<String>, template: &[&str]) -> Self {
        let mut tokens = Vec::with_capacity(template.len());
        let mut arg_count = 0;
        for word in template {
            match parse_param(word) {
                Some(index) => {
                    arg_count = arg_count.max(index + 1);
                    tokens.push(AliasToken::Param(index));
                }
                None => tokens.push(AliasToken::Literal((*word).to_string())),
            }
        }
        Self {
            name: name.into(),
            tokens,
            arg_count,
        }
    }

    /// Expand the alias against the caller's trailing arguments.
    ///
    /// The first `arg_count` arguments fill placeholders; any surplus is
    /// appended verbatim. Too few arguments aborts the invocation.
    pub fn expand(&self, args: &[&str]) -> LockboxResult<Vec<String>> {
        if args.len() < self.arg_count {
            return Err(LockboxError::UnexpectedArgumentCount {
                alias: self.name.clone(),
                expected: self.arg_count,
                got: args.len(),
            });
        }

        let mut line: Vec<String> = self
            .tokens
            .iter()
            .map(|token| match token {
                AliasToken::Literal(word) => word.clone(),
                AliasToken::Param(index) => args[*index].to_string(),
            })
            .collect();

        line.extend(args[self.arg_count..].iter().map(|s| s.to_string()));
        Ok(line)
    }
}

fn parse_param(word: &str) -> Option<usize> {
    word.strip_prefix('$')?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literals_and_params() {
        let alias = Alias::parse("g", &["get", "$0"]);
        assert_eq!(
            alias.tokens,
            vec![
                AliasToken::Literal("get".into()),
                AliasToken::Param(0),
            ]
        );
        assert_eq!(alias.arg_count, 1);
    }

    #[test]
    fn test_arg_count_from_highest_index() {
        let alias = Alias::parse("x", &["cmd", "$2"]);
        assert_eq!(alias.arg_count, 3);
    }

    #[test]
    fn test_dollar_non_number_is_literal() {
        let alias = Alias::parse("x", &["echo", "$HOME"]);
        assert_eq!(alias.tokens[1], AliasToken::Literal("$HOME".into()));
        assert_eq!(alias.arg_count, 0);
    }

    #[test]
    fn test_expand_substitutes() {
        let alias = Alias::parse("g", &["get", "$0"]);
        let line = alias.expand(&["3"]).unwrap();
        assert_eq!(line, vec!["get", "3"]);
    }

    #[test]
    fn test_expand_appends_surplus() {
        let alias = Alias::parse("g", &["get", "$0"]);
        let line = alias.expand(&["3", "extra"]).unwrap();
        assert_eq!(line, vec!["get", "3", "extra"]);
    }

    #[test]
    fn test_expand_too_few_args() {
        let alias = Alias::parse("g", &["get", "$0", "$1"]);
        let err = alias.expand(&["3"]).unwrap_err();
        assert!(matches!(
            err,
            LockboxError::UnexpectedArgumentCount {
                expected: 2,
                got: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_serde_round_trip() {
        let alias = Alias::parse("g", &["get", "$0"]);
        let json = serde_json::to_string(&alias).unwrap();
        let back: Alias = serde_json::from_str(&json).unwrap();
        assert_eq!(alias, back);
    }
}
