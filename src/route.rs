use crate::service::Service;
use crate::template::{PathTemplate, Specificity};

use http::Method;

/// A route: a method and a path template, carrying a caller-defined value.
///
/// The value is whatever the caller dispatches to: a handler, an index into
/// another table, or just a name.
#[derive(Debug)]
pub struct Route<T> {
    method: Method,
    template: PathTemplate,
    value: T,
}

impl<T> Route<T> {
    pub(crate) fn new(method: Method, template: PathTemplate, value: T) -> Self {
        Route {
            method,
            template,
            value,
        }
    }

    /// The method this route accepts.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The compiled path template.
    pub fn template(&self) -> &PathTemplate {
        &self.template
    }

    /// The path template as registered, root included.
    pub fn path(&self) -> &str {
        self.template.as_str()
    }

    /// The value registered with this route.
    pub fn value(&self) -> &T {
        &self.value
    }
}

/// A route whose template matched a request path, with how specific the
/// match was.
#[derive(Debug)]
pub struct RouteCandidate<'r, T> {
    /// The matching route.
    pub route: &'r Route<T>,
    /// The static and parameter segment counts of the match.
    pub specificity: Specificity,
}

// Manual impls, the derives would require `T: Clone`.
impl<T> Clone for RouteCandidate<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RouteCandidate<'_, T> {}

/// Returns the routes of a service matching a tokenized request path, most
/// specific first.
///
/// Candidates are ordered by static segment count, then parameter count,
/// both descending. The sort is stable, so routes that tie keep their
/// registration order.
///
/// ```rust
/// use curly::{select_routes, tokenize, Service};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut service = Service::new("/")?;
/// service.get("/{type}/{id}", "generic")?.get("/network/{id}", "network")?;
///
/// let candidates = select_routes(&service, &tokenize("/network/12"));
/// assert_eq!(candidates.len(), 2);
/// assert_eq!(candidates[0].route.path(), "/network/{id}");
/// # Ok(())
/// # }
/// ```
pub fn select_routes<'r, T>(service: &'r Service<T>, request: &[&str]) -> Vec<RouteCandidate<'r, T>> {
    let mut candidates: Vec<_> = service
        .routes()
        .iter()
        .filter_map(|route| {
            route
                .template
                .match_route(request)
                .map(|specificity| RouteCandidate { route, specificity })
        })
        .collect();

    candidates.sort_by(|a, b| b.specificity.cmp(&a.specificity));

    trace!(
        "{} of {} routes on service '{}' match",
        candidates.len(),
        service.routes().len(),
        service.root_path()
    );

    candidates
}
