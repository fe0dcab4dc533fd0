//! Service detection.
//!
//! A service owns a root template and the routes registered beneath it. For a
//! request, every service whose root is a prefix of the request path is
//! scored, and the highest score wins:
//!
//! ```text
//!  Root            Request /p/x
//!  /               matches, score 0
//!  /p              matches, score 15 (literal)
//!  /p/{q}          matches, score 32 (literal at depth 0 of 2, then a parameter)
//!  /{a}/{b}        matches, score 4 (two parameters)
//!  /q              no match
//!  /p/x/y          no match (longer than the request)
//! ```
//!
//! A literal segment outweighs any number of parameters, and literals weigh
//! more the closer they are to the start of the root, so of two equally long
//! roots the one with the earlier literal wins. Ties go to the first
//! candidate in the order they are supplied.

use crate::config::RoutePaths;
use crate::error::TemplateError;
use crate::route::Route;
use crate::template::{PathTemplate, TokenKind};

use http::Method;

/// Base score of a literal segment.
///
/// It is multiplied by the number of root segments from its position to the
/// end, and by `WEIGHT_PARAM * request.len() + 1` so that one literal scores
/// more than every parameter a root of that request could match.
pub const WEIGHT_LITERAL: usize = 3;

/// Score of a parameter or regex-constrained parameter segment.
pub const WEIGHT_PARAM: usize = 2;

/// Score of a trailing wildcard segment.
pub const WEIGHT_WILDCARD: usize = 1;

/// A group of routes sharing a root path.
#[derive(Debug)]
pub struct Service<T> {
    root: PathTemplate,
    route_paths: RoutePaths,
    routes: Vec<Route<T>>,
}

impl<T> Service<T> {
    /// Creates a service with a root template, joining route paths onto it.
    pub fn new(root: &str) -> Result<Self, TemplateError> {
        Self::with_route_paths(root, RoutePaths::Relative)
    }

    /// Creates a service with a root template and the given route path mode.
    pub fn with_route_paths(root: &str, route_paths: RoutePaths) -> Result<Self, TemplateError> {
        Ok(Service {
            root: PathTemplate::new(root)?,
            route_paths,
            routes: Vec::new(),
        })
    }

    /// The root template.
    pub fn root(&self) -> &PathTemplate {
        &self.root
    }

    /// The root template as written, e.g. `/p/{q}`.
    pub fn root_path(&self) -> &str {
        self.root.as_str()
    }

    /// The routes in registration order.
    pub fn routes(&self) -> &[Route<T>] {
        &self.routes
    }

    /// Registers a route.
    ///
    /// With [`RoutePaths::Relative`] the path is joined onto the root first,
    /// so `/users` + `/{id}` matches `/users/1`.
    ///
    /// ```rust
    /// use curly::Service;
    /// use http::Method;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut service = Service::new("/users")?;
    /// service
    ///     .route(Method::GET, "/{id}", "get user")?
    ///     .route(Method::DELETE, "/{id}", "delete user")?;
    ///
    /// assert_eq!(service.routes()[0].path(), "/users/{id}");
    /// # Ok(())
    /// # }
    /// ```
    pub fn route(&mut self, method: Method, path: &str, value: T) -> Result<&mut Self, TemplateError> {
        let path = match self.route_paths {
            RoutePaths::Relative => join_paths(self.root.as_str(), path),
            RoutePaths::Absolute => path.to_owned(),
        };

        let route = Route::new(method, PathTemplate::new(path)?, value);
        debug!(
            "registered route {} {} on service '{}'",
            route.method(),
            route.path(),
            self.root
        );

        self.routes.push(route);
        Ok(self)
    }

    /// Registers a GET route.
    pub fn get(&mut self, path: &str, value: T) -> Result<&mut Self, TemplateError> {
        self.route(Method::GET, path, value)
    }

    /// Registers a POST route.
    pub fn post(&mut self, path: &str, value: T) -> Result<&mut Self, TemplateError> {
        self.route(Method::POST, path, value)
    }

    /// Registers a PUT route.
    pub fn put(&mut self, path: &str, value: T) -> Result<&mut Self, TemplateError> {
        self.route(Method::PUT, path, value)
    }

    /// Registers a PATCH route.
    pub fn patch(&mut self, path: &str, value: T) -> Result<&mut Self, TemplateError> {
        self.route(Method::PATCH, path, value)
    }

    /// Registers a DELETE route.
    pub fn delete(&mut self, path: &str, value: T) -> Result<&mut Self, TemplateError> {
        self.route(Method::DELETE, path, value)
    }
}

// Joins a route path onto a root. Empty segments are dropped when the result
// is compiled, so only the slash between the two needs care.
fn join_paths(root: &str, path: &str) -> String {
    let root = root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        return if root.is_empty() { "/".to_owned() } else { root.to_owned() };
    }

    format!("{root}/{path}")
}

/// Scores a service root against a tokenized request path.
///
/// Returns `None` if the root is longer than the request or one of its
/// literal or regex segments rejects the corresponding request segment. The
/// root `/` matches everything with a score of zero.
///
/// ```rust
/// use curly::{score_service, tokenize, PathTemplate};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let request = tokenize("/p/x");
///
/// let p = score_service(&request, &PathTemplate::new("/p")?);
/// let pq = score_service(&request, &PathTemplate::new("/p/{q}")?);
/// assert!(pq > p);
/// assert_eq!(score_service(&request, &PathTemplate::new("/q")?), None);
/// # Ok(())
/// # }
/// ```
pub fn score_service(request: &[&str], root: &PathTemplate) -> Option<usize> {
    let tokens = root.tokens();
    if tokens.len() > request.len() {
        return None;
    }

    // parameters of a root never sum to this much
    let literal_scale = WEIGHT_PARAM * request.len() + 1;
    let mut score = 0;

    for (i, (token, &segment)) in tokens.iter().zip(request).enumerate() {
        let segment = match token.verb() {
            Some(verb) => segment.strip_suffix(verb)?.strip_suffix(':')?,
            None => segment,
        };

        if !token.accepts(segment) {
            return None;
        }

        match token.kind() {
            TokenKind::Literal(_) => score += WEIGHT_LITERAL * (tokens.len() - i) * literal_scale,
            TokenKind::Param { .. } | TokenKind::Regex { .. } => score += WEIGHT_PARAM,
            TokenKind::Wildcard { .. } => {
                score += WEIGHT_WILDCARD;
                break;
            }
        }
    }

    Some(score)
}

/// Returns the best matching service for a tokenized request path.
///
/// Candidates are scored with [`score_service`]; on equal scores the first
/// candidate in iteration order is kept, so callers control precedence by
/// the order they supply.
pub fn detect_service<'s, T: 's>(
    request: &[&str],
    candidates: impl IntoIterator<Item = &'s Service<T>>,
) -> Option<&'s Service<T>> {
    let mut best: Option<(&'s Service<T>, usize)> = None;

    for service in candidates {
        let Some(score) = score_service(request, &service.root) else {
            continue;
        };

        trace!("service '{}' scored {}", service.root, score);

        if !matches!(best, Some((_, top)) if score <= top) {
            best = Some((service, score));
        }
    }

    best.map(|(service, _)| service)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join() {
        assert_eq!(join_paths("/", "/hello"), "/hello");
        assert_eq!(join_paths("/users", "/{id}"), "/users/{id}");
        assert_eq!(join_paths("/users/", "{id}/"), "/users/{id}/");
        assert_eq!(join_paths("/users", "/"), "/users");
        assert_eq!(join_paths("/", ""), "/");
        assert_eq!(join_paths("", "/a"), "/a");
    }

    #[test]
    fn absolute_route_paths() {
        let mut service = Service::with_route_paths("/users", RoutePaths::Absolute).unwrap();
        service.get("/users/{id}", ()).unwrap();
        assert_eq!(service.routes()[0].path(), "/users/{id}");
    }

    #[test]
    fn literal_outweighs_param_at_same_position() {
        let request = ["p", "q"];
        let literal_first = score_service(&request, &PathTemplate::new("/p/{q}").unwrap());
        let param_first = score_service(&request, &PathTemplate::new("/{p}/q").unwrap());
        assert!(literal_first > param_first);
    }

    #[test]
    fn literal_outweighs_longer_param_root() {
        let request = ["users", "5"];
        let literal = score_service(&request, &PathTemplate::new("/users").unwrap());
        let params = score_service(&request, &PathTemplate::new("/{tenant}/{id}").unwrap());
        assert_eq!(params, Some(2 * WEIGHT_PARAM));
        assert!(literal > params);

        let request = ["a", "b", "c", "d", "e", "f"];
        let literal = score_service(&request, &PathTemplate::new("/a").unwrap());
        let params = score_service(&request, &PathTemplate::new("/{p}/{q}/{r}/{s}/{t}/{u}").unwrap());
        assert!(literal > params);
    }

    #[test]
    fn root_custom_verb() {
        let root = PathTemplate::new("/resources:run").unwrap();
        assert!(score_service(&["resources:run"], &root).is_some());
        assert!(score_service(&["resources:run", "x"], &root).is_some());
        assert_eq!(score_service(&["resources"], &root), None);
        assert_eq!(score_service(&["user:run"], &root), None);
    }

    #[test]
    fn wildcard_root_needs_a_segment() {
        let root = PathTemplate::new("/{rest:*}").unwrap();
        assert_eq!(score_service(&[], &root), None);
        assert_eq!(score_service(&["a", "b"], &root), Some(WEIGHT_WILDCARD));
    }

    #[test]
    fn regex_root_mismatch() {
        let root = PathTemplate::new("/{:^hello$}").unwrap();
        assert_eq!(score_service(&["hola"], &root), None);
        assert_eq!(score_service(&["hello"], &root), Some(WEIGHT_PARAM));
    }
}
