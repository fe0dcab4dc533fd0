use http::Method;

/// Represents errors that can occur when compiling a path template.
///
/// These are configuration errors: they are reported when a service or route
/// is registered and never while matching a request.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Hash, PartialEq, thiserror::Error)]
pub enum TemplateError {
    /// A regex-constrained parameter has a pattern that does not compile.
    #[error("invalid pattern `{pattern}` in template segment: {message}")]
    InvalidRegex {
        /// The pattern as written in the template.
        pattern: String,
        /// The compiler's description of the problem.
        message: String,
    },
    /// Wildcard parameters are only allowed at the end of a template.
    #[error("wildcard parameters are only allowed at the end of a template")]
    WildcardNotLast,
    /// Only one wildcard parameter is allowed per template.
    #[error("only one wildcard parameter is allowed per template")]
    MultipleWildcards,
    /// Custom verbs are only allowed on the final segment.
    #[error("custom verb `{verb}` is only allowed on the final segment")]
    CustomVerbNotLast {
        /// The misplaced verb.
        verb: String,
    },
    /// A wildcard segment cannot carry a custom verb.
    #[error("custom verb `{verb}` cannot be attached to a wildcard")]
    CustomVerbOnWildcard {
        /// The rejected verb.
        verb: String,
    },
    /// A segment mixes literal text with a parameter, or its braces do not balance.
    #[error("malformed template segment `{segment}`")]
    MalformedSegment {
        /// The offending segment, or the whole template for unbalanced braces.
        segment: String,
    },
    /// Plain parameters must be registered with a name.
    #[error("parameters must be registered with a name")]
    UnnamedParam,
    /// The same parameter name appears twice in one template.
    #[error("parameter `{name}` appears more than once")]
    DuplicateParam {
        /// The repeated name.
        name: String,
    },
}

/// A failed match attempt.
///
/// The first two variants separate "nothing lives here" from "something lives
/// here but not at this exact path", which callers usually both answer with a
/// 404. `MethodNotAllowed` is the 405 case.
///
/// ```
/// use curly::{MatchError, Router};
/// use http::Method;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut router = Router::new();
/// router.insert("/users")?.get("/{id}", "user")?;
///
/// assert_eq!(router.at(&Method::GET, "/teams/1").unwrap_err(), MatchError::NoService);
/// assert_eq!(router.at(&Method::GET, "/users/1/x").unwrap_err(), MatchError::NoRoute);
/// assert_eq!(
///     router.at(&Method::POST, "/users/1").unwrap_err(),
///     MatchError::MethodNotAllowed { allowed: vec![Method::GET] }
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum MatchError {
    /// No service root is a prefix of the request path.
    #[error("no service matches the request path")]
    NoService,
    /// A service matched, but none of its routes match the request path.
    #[error("no route of the matching service matches the request path")]
    NoRoute,
    /// Routes match the request path, but none for the request method.
    #[error("request method not allowed, expected one of {allowed:?}")]
    MethodNotAllowed {
        /// The methods of the matching routes, most specific route first.
        allowed: Vec<Method>,
    },
}
