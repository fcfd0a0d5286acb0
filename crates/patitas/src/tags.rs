//! Scenario tags and tag-filter expressions.
//!
//! Runners select scenarios with boolean expressions over tags, e.g.
//! `@web and not @pending and not @pending-web and not @legacy`. Tags are
//! labels only; they have no runtime representation beyond filtering.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::result::{PatitasError, PatitasResult};

/// A scenario label. Stored without the leading `@`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    /// Parse a tag, accepting an optional leading `@`.
    ///
    /// # Errors
    ///
    /// Returns an error for empty names or names with characters outside
    /// `[A-Za-z0-9_-]`.
    pub fn parse(raw: &str) -> PatitasResult<Self> {
        let name = raw.strip_prefix('@').unwrap_or(raw);
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(PatitasError::InvalidTagExpression {
                expression: raw.to_string(),
                message: "tag names are non-empty [A-Za-z0-9_-]".to_string(),
            });
        }
        Ok(Self(name.to_string()))
    }

    /// The tag name without `@`
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// A boolean expression over scenario tags.
///
/// Grammar: `or := and ("or" and)*`, `and := unary ("and" unary)*`,
/// `unary := "not" unary | "(" or ")" | tag`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagExpression {
    /// A single tag
    Tag(Tag),
    /// Negation
    Not(Box<TagExpression>),
    /// Conjunction
    And(Box<TagExpression>, Box<TagExpression>),
    /// Disjunction
    Or(Box<TagExpression>, Box<TagExpression>),
    /// Matches every scenario (empty filter)
    All,
}

impl TagExpression {
    /// Parse an expression such as `@web and not (@pending or @legacy)`.
    ///
    /// An empty or whitespace-only input yields [`TagExpression::All`].
    pub fn parse(input: &str) -> PatitasResult<Self> {
        let tokens = tokenize(input)?;
        if tokens.is_empty() {
            return Ok(Self::All);
        }
        let mut parser = Parser {
            tokens: &tokens,
            pos: 0,
            source: input,
        };
        let expr = parser.parse_or()?;
        if parser.pos != parser.tokens.len() {
            return Err(parser.error("trailing tokens after expression"));
        }
        Ok(expr)
    }

    /// Evaluate against a scenario's effective tag set
    #[must_use]
    pub fn evaluate(&self, tags: &HashSet<Tag>) -> bool {
        match self {
            Self::Tag(tag) => tags.contains(tag),
            Self::Not(inner) => !inner.evaluate(tags),
            Self::And(lhs, rhs) => lhs.evaluate(tags) && rhs.evaluate(tags),
            Self::Or(lhs, rhs) => lhs.evaluate(tags) || rhs.evaluate(tags),
            Self::All => true,
        }
    }
}

impl fmt::Display for TagExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(tag) => write!(f, "{tag}"),
            Self::Not(inner) => match inner.as_ref() {
                Self::And(..) | Self::Or(..) => write!(f, "not ({inner})"),
                _ => write!(f, "not {inner}"),
            },
            Self::And(lhs, rhs) => write!(f, "{lhs} and {rhs}"),
            Self::Or(lhs, rhs) => write!(f, "({lhs} or {rhs})"),
            Self::All => write!(f, "*"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Tag(String),
    And,
    Or,
    Not,
    Open,
    Close,
}

fn tokenize(input: &str) -> PatitasResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                let _ = chars.next();
            }
            '(' => {
                let _ = chars.next();
                tokens.push(Token::Open);
            }
            ')' => {
                let _ = chars.next();
                tokens.push(Token::Close);
            }
            _ => {
                let mut word = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() || c == '(' || c == ')' {
                        break;
                    }
                    word.push(c);
                    let _ = chars.next();
                }
                tokens.push(match word.as_str() {
                    "and" => Token::And,
                    "or" => Token::Or,
                    "not" => Token::Not,
                    _ => {
                        // Validate through Tag::parse so bad names fail here
                        let tag = Tag::parse(&word).map_err(|_| {
                            PatitasError::InvalidTagExpression {
                                expression: input.to_string(),
                                message: format!("invalid tag {word:?}"),
                            }
                        })?;
                        Token::Tag(tag.name().to_string())
                    }
                });
            }
        }
    }
    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    source: &'a str,
}

impl Parser<'_> {
    fn error(&self, message: &str) -> PatitasError {
        PatitasError::InvalidTagExpression {
            expression: self.source.to_string(),
            message: message.to_string(),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_or(&mut self) -> PatitasResult<TagExpression> {
        let mut expr = self.parse_and()?;
        while self.peek() == Some(&Token::Or) {
            let _ = self.advance();
            let rhs = self.parse_and()?;
            expr = TagExpression::Or(Box::new(expr), Box::new(rhs));
        }
        Ok(expr)
    }

    fn parse_and(&mut self) -> PatitasResult<TagExpression> {
        let mut expr = self.parse_unary()?;
        while self.peek() == Some(&Token::And) {
            let _ = self.advance();
            let rhs = self.parse_unary()?;
            expr = TagExpression::And(Box::new(expr), Box::new(rhs));
        }
        Ok(expr)
    }

    fn parse_unary(&mut self) -> PatitasResult<TagExpression> {
        match self.advance() {
            Some(Token::Not) => {
                let inner = self.parse_unary()?;
                Ok(TagExpression::Not(Box::new(inner)))
            }
            Some(Token::Open) => {
                let expr = self.parse_or()?;
                if self.advance() == Some(&Token::Close) {
                    Ok(expr)
                } else {
                    Err(self.error("expected closing parenthesis"))
                }
            }
            Some(Token::Tag(name)) => Ok(TagExpression::Tag(Tag(name.clone()))),
            Some(Token::And | Token::Or | Token::Close) | None => {
                Err(self.error("expected tag, 'not', or '('"))
            }
        }
    }
}

/// Build a tag set from string labels; panics on invalid names, so only
/// call it with literals.
#[must_use]
pub fn tag_set(names: &[&str]) -> HashSet<Tag> {
    names
        .iter()
        .map(|n| Tag::parse(n).expect("valid tag literal"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    mod tag_tests {
        use super::*;

        #[test]
        fn test_parse_with_at() {
            let tag = Tag::parse("@web").unwrap();
            assert_eq!(tag.name(), "web");
            assert_eq!(tag.to_string(), "@web");
        }

        #[test]
        fn test_parse_without_at() {
            assert_eq!(Tag::parse("pending-web").unwrap().name(), "pending-web");
        }

        #[test]
        fn test_parse_rejects_empty() {
            assert!(Tag::parse("@").is_err());
            assert!(Tag::parse("").is_err());
        }

        #[test]
        fn test_parse_rejects_bad_characters() {
            assert!(Tag::parse("@two words").is_err());
        }
    }

    mod expression_tests {
        use super::*;

        #[test]
        fn test_single_tag() {
            let expr = TagExpression::parse("@web").unwrap();
            assert!(expr.evaluate(&tag_set(&["web"])));
            assert!(!expr.evaluate(&tag_set(&["android"])));
        }

        #[test]
        fn test_empty_matches_all() {
            let expr = TagExpression::parse("   ").unwrap();
            assert_eq!(expr, TagExpression::All);
            assert!(expr.evaluate(&tag_set(&[])));
        }

        #[test]
        fn test_web_runner_expression() {
            let expr =
                TagExpression::parse("@web and not @pending and not @pending-web and not @legacy")
                    .unwrap();
            assert!(expr.evaluate(&tag_set(&["web"])));
            assert!(!expr.evaluate(&tag_set(&["web", "pending"])));
            assert!(!expr.evaluate(&tag_set(&["web", "pending-web"])));
            assert!(!expr.evaluate(&tag_set(&["web", "legacy"])));
            assert!(!expr.evaluate(&tag_set(&["android"])));
        }

        #[test]
        fn test_or_and_precedence() {
            // and binds tighter than or
            let expr = TagExpression::parse("@web or @android and @smoke").unwrap();
            assert!(expr.evaluate(&tag_set(&["web"])));
            assert!(expr.evaluate(&tag_set(&["android", "smoke"])));
            assert!(!expr.evaluate(&tag_set(&["android"])));
        }

        #[test]
        fn test_parentheses() {
            let expr = TagExpression::parse("(@web or @android) and not @legacy").unwrap();
            assert!(expr.evaluate(&tag_set(&["android"])));
            assert!(!expr.evaluate(&tag_set(&["android", "legacy"])));
        }

        #[test]
        fn test_double_negation() {
            let expr = TagExpression::parse("not not @web").unwrap();
            assert!(expr.evaluate(&tag_set(&["web"])));
            assert!(!expr.evaluate(&tag_set(&[])));
        }

        #[test]
        fn test_unbalanced_parenthesis() {
            assert!(TagExpression::parse("(@web and @ios").is_err());
        }

        #[test]
        fn test_dangling_operator() {
            assert!(TagExpression::parse("@web and").is_err());
        }

        #[test]
        fn test_trailing_tokens() {
            assert!(TagExpression::parse("@web @android").is_err());
        }

        #[test]
        fn test_display_round_trip() {
            let expr = TagExpression::parse("@web and not @legacy").unwrap();
            let reparsed = TagExpression::parse(&expr.to_string()).unwrap();
            assert_eq!(expr, reparsed);
        }
    }
}
