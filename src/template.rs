use crate::error::TemplateError;
use crate::params::Params;
use crate::path::{split_template, untokenize};

use regex::Regex;
use std::borrow::Cow;
use std::fmt;

/// The classification of a single template segment.
#[derive(Clone, Debug)]
pub enum TokenKind {
    /// Matched exactly (case-sensitive) against the request segment.
    Literal(String),
    /// `{name}`: matches any single segment.
    Param {
        /// The parameter name.
        name: String,
    },
    /// `{name:pattern}`: matches a single segment accepted by the pattern.
    ///
    /// The pattern is applied as written, so a pattern without anchors is a
    /// substring search and `^prefix-` accepts any segment with that prefix.
    Regex {
        /// The parameter name, `None` for `{:pattern}`.
        name: Option<String>,
        /// The compiled pattern.
        regex: Regex,
    },
    /// `{name:*}`: consumes every remaining segment, at least one.
    Wildcard {
        /// The parameter name, `None` for `{:*}`.
        name: Option<String>,
    },
}

impl PartialEq for TokenKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Literal(a), Self::Literal(b)) => a == b,
            (Self::Param { name: a }, Self::Param { name: b }) => a == b,
            (Self::Regex { name: a, regex: x }, Self::Regex { name: b, regex: y }) => {
                a == b && x.as_str() == y.as_str()
            }
            (Self::Wildcard { name: a }, Self::Wildcard { name: b }) => a == b,
            _ => false,
        }
    }
}

impl Eq for TokenKind {}

/// One classified segment of a [`PathTemplate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    raw: String,
    kind: TokenKind,
    verb: Option<String>,
}

impl Token {
    /// The segment as written in the template, custom verb included.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The classification of this segment.
    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// The name this segment binds a value to, if any.
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Literal(_) => None,
            TokenKind::Param { name } => Some(name),
            TokenKind::Regex { name, .. } | TokenKind::Wildcard { name } => name.as_deref(),
        }
    }

    /// The custom verb attached to this segment. Only the final token has one.
    pub fn verb(&self) -> Option<&str> {
        self.verb.as_deref()
    }

    /// Returns `true` if this is a wildcard segment.
    pub fn is_wildcard(&self) -> bool {
        matches!(self.kind, TokenKind::Wildcard { .. })
    }

    // Matches a single request segment, the custom verb already stripped.
    // Wildcards accept anything here; callers handle the remainder.
    pub(crate) fn accepts(&self, segment: &str) -> bool {
        match &self.kind {
            TokenKind::Literal(text) => text == segment,
            TokenKind::Param { .. } | TokenKind::Wildcard { .. } => true,
            TokenKind::Regex { regex, .. } => regex.is_match(segment),
        }
    }

    fn parse(raw: &str) -> Result<Token, TemplateError> {
        let (body, verb) = split_verb(raw);

        let kind = match body.strip_prefix('{') {
            Some(inner) => {
                let inner = inner.strip_suffix('}').ok_or_else(|| malformed(raw))?;

                // braces may only appear inside the pattern
                let name = inner.split_once(':').map_or(inner, |(name, _)| name);
                if name.contains(['{', '}']) {
                    return Err(malformed(raw));
                }

                match inner.split_once(':') {
                    None if inner.is_empty() => return Err(TemplateError::UnnamedParam),
                    None => TokenKind::Param {
                        name: inner.to_owned(),
                    },
                    Some((name, "*")) => TokenKind::Wildcard {
                        name: named(name),
                    },
                    Some((name, pattern)) => TokenKind::Regex {
                        name: named(name),
                        regex: Regex::new(pattern).map_err(|err| TemplateError::InvalidRegex {
                            pattern: pattern.to_owned(),
                            message: err.to_string(),
                        })?,
                    },
                }
            }
            None if body.contains(['{', '}']) => return Err(malformed(raw)),
            None => TokenKind::Literal(body.to_owned()),
        };

        if let (TokenKind::Wildcard { .. }, Some(verb)) = (&kind, verb) {
            return Err(TemplateError::CustomVerbOnWildcard {
                verb: verb.to_owned(),
            });
        }

        Ok(Token {
            raw: raw.to_owned(),
            kind,
            verb: verb.map(str::to_owned),
        })
    }
}

fn named(name: &str) -> Option<String> {
    (!name.is_empty()).then(|| name.to_owned())
}

fn malformed(segment: &str) -> TemplateError {
    TemplateError::MalformedSegment {
        segment: segment.to_owned(),
    }
}

// Splits a trailing `:verb` (ASCII letters) off a segment. The colon must sit
// outside of any braces, so `{x:abc}` has no verb but `{x:^a-}:start` does.
fn split_verb(segment: &str) -> (&str, Option<&str>) {
    let Some(colon) = segment.rfind(':') else {
        return (segment, None);
    };

    let verb = &segment[colon + 1..];
    let outside_braces = segment[colon..].find('}').is_none();

    if colon > 0 && outside_braces && !verb.is_empty() && verb.bytes().all(|b| b.is_ascii_alphabetic())
    {
        (&segment[..colon], Some(verb))
    } else {
        (segment, None)
    }
}

// Strips `:verb` from the end of a request segment.
fn strip_verb<'v>(segment: &'v str, verb: &str) -> Option<&'v str> {
    segment.strip_suffix(verb)?.strip_suffix(':')
}

/// How specific a route match is. Higher compares greater.
///
/// Static segments (literals and the custom verb) dominate; parameters only
/// break ties between routes with the same number of static segments.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Specificity {
    /// Literal segments matched, plus one for a matched custom verb.
    pub static_count: usize,
    /// Parameter, regex and wildcard segments matched.
    pub param_count: usize,
}

/// A compiled route or service path pattern.
///
/// ```rust
/// use curly::PathTemplate;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let template = PathTemplate::new("/static/{var:*}")?;
///
/// let request = curly::tokenize("/static/test/sub/hi.html");
/// assert!(template.match_route(&request).is_some());
/// assert_eq!(template.extract(&request).get("var"), Some("test/sub/hi.html"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathTemplate {
    source: String,
    tokens: Vec<Token>,
}

impl PathTemplate {
    /// Compiles a template string.
    pub fn new(template: impl Into<String>) -> Result<PathTemplate, TemplateError> {
        let source = template.into();
        let segments = split_template(&source).ok_or_else(|| malformed(&source))?;

        let mut tokens: Vec<Token> = Vec::with_capacity(segments.len());
        for segment in segments {
            let token = Token::parse(segment)?;

            if let Some(previous) = tokens.last() {
                if previous.is_wildcard() {
                    return Err(if token.is_wildcard() {
                        TemplateError::MultipleWildcards
                    } else {
                        TemplateError::WildcardNotLast
                    });
                }

                if let Some(verb) = previous.verb() {
                    return Err(TemplateError::CustomVerbNotLast {
                        verb: verb.to_owned(),
                    });
                }
            }

            if let Some(name) = token.name() {
                if tokens.iter().any(|t| t.name() == Some(name)) {
                    return Err(TemplateError::DuplicateParam {
                        name: name.to_owned(),
                    });
                }
            }

            tokens.push(token);
        }

        debug!("compiled template '{}' into {} tokens", source, tokens.len());

        Ok(PathTemplate { source, tokens })
    }

    /// The template string this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The classified segments.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The number of segments.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` for the root template `/`.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns `true` if the final segment carries a custom verb.
    pub fn has_custom_verb(&self) -> bool {
        self.tokens.last().is_some_and(|t| t.verb.is_some())
    }

    /// Returns `true` if the final segment is a wildcard.
    pub fn ends_with_wildcard(&self) -> bool {
        self.tokens.last().is_some_and(Token::is_wildcard)
    }

    /// Matches the template against a full tokenized request path.
    ///
    /// The request must have exactly as many segments as the template, unless
    /// the template ends with a wildcard, which then consumes one or more
    /// remaining segments. A custom verb must be present on the final request
    /// segment and is stripped before that segment is compared.
    pub fn match_route(&self, request: &[&str]) -> Option<Specificity> {
        if self.tokens.len() > request.len()
            || (self.tokens.len() < request.len() && !self.ends_with_wildcard())
        {
            return None;
        }

        let mut specificity = Specificity::default();
        let last = self.tokens.len().saturating_sub(1);

        for (i, (token, &segment)) in self.tokens.iter().zip(request).enumerate() {
            let mut segment = segment;

            if i == last && self.has_custom_verb() {
                segment = strip_verb(segment, token.verb.as_deref()?)?;
                specificity.static_count += 1;
            }

            if !token.accepts(segment) {
                return None;
            }

            match token.kind {
                TokenKind::Literal(_) => specificity.static_count += 1,
                TokenKind::Wildcard { .. } => {
                    specificity.param_count += 1;
                    break;
                }
                TokenKind::Param { .. } | TokenKind::Regex { .. } => specificity.param_count += 1,
            }
        }

        Some(specificity)
    }

    /// Binds each named parameter to its segment of the request path.
    ///
    /// A wildcard binds the `/`-joined remainder. Literals and anonymous
    /// parameters bind nothing, and positions missing from the request are
    /// skipped, so extraction never fails.
    pub fn extract<'k, 'v>(&'k self, request: &[&'v str]) -> Params<'k, 'v> {
        let mut params = Params::new();
        let last = self.tokens.len().saturating_sub(1);

        for (i, (token, &segment)) in self.tokens.iter().zip(request).enumerate() {
            let Some(name) = token.name() else {
                continue;
            };

            if token.is_wildcard() {
                let value = match &request[i..] {
                    [single] => Cow::Borrowed(*single),
                    rest => Cow::Owned(untokenize(rest)),
                };
                params.push(name, value);
                break;
            }

            let value = match token.verb() {
                Some(verb) if i == last => strip_verb(segment, verb).unwrap_or(segment),
                _ => segment,
            };
            params.push(name, Cow::Borrowed(value));
        }

        params
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
