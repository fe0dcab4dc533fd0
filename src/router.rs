use crate::config::RouterConfig;
use crate::error::{MatchError, TemplateError};
use crate::params::Params;
use crate::path::tokenize;
use crate::route::{select_routes, Route};
use crate::service::{detect_service, Service};

use http::Method;

/// A table of services, each with its own routes.
///
/// Lookups run in three steps: the best matching service is detected from
/// its root, that service's routes are ranked against the full path, and the
/// most specific route for the request method is picked.
///
/// ```rust
/// use curly::Router;
/// use http::Method;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut router = Router::new();
/// router.insert("/")?.get("/{type}/{id}", "generic")?;
/// router.insert("/network")?.get("/{id}", "network")?;
///
/// let matched = router.at(&Method::GET, "/network/12")?;
/// assert_eq!(*matched.value(), "network");
/// assert_eq!(matched.params.get("id"), Some("12"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Router<T> {
    config: RouterConfig,
    services: Vec<Service<T>>,
}

/// A successful lookup.
#[derive(Debug)]
pub struct Match<'r, 'p, T> {
    /// The service whose root matched.
    pub service: &'r Service<T>,
    /// The most specific route for the request method.
    pub route: &'r Route<T>,
    /// The parameters extracted from the request path.
    pub params: Params<'r, 'p>,
}

impl<'r, T> Match<'r, '_, T> {
    /// The value registered with the matched route.
    pub fn value(&self) -> &'r T {
        self.route.value()
    }
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::with_config(RouterConfig::default())
    }
}

impl<T> Router<T> {
    /// Construct a new, empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a new, empty router with the given options.
    pub fn with_config(config: RouterConfig) -> Self {
        Router {
            config,
            services: Vec::new(),
        }
    }

    /// The router's options.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Adds a service and returns it so routes can be registered on it.
    ///
    /// Services that score equally for a request are resolved in insertion
    /// order, so register more specific roots first where roots overlap.
    pub fn insert(&mut self, root: &str) -> Result<&mut Service<T>, TemplateError> {
        let service = Service::with_route_paths(root, self.config.route_paths)?;
        debug!("registered service '{}'", service.root_path());

        let index = self.services.len();
        self.services.push(service);
        Ok(&mut self.services[index])
    }

    /// The services in insertion order.
    pub fn services(&self) -> impl ExactSizeIterator<Item = &Service<T>> {
        self.services.iter()
    }

    /// Tries to find the route for a method and path.
    pub fn at<'r, 'p>(&'r self, method: &Method, path: &'p str) -> Result<Match<'r, 'p, T>, MatchError> {
        let request = tokenize(path);

        let Some(service) = detect_service(&request, &self.services) else {
            trace!("no service matches '{}'", path);
            return Err(MatchError::NoService);
        };

        let candidates = select_routes(service, &request);
        if candidates.is_empty() {
            trace!(
                "no route of service '{}' matches '{}'",
                service.root_path(),
                path
            );
            return Err(MatchError::NoRoute);
        }

        let Some(candidate) = candidates.iter().find(|c| c.route.method() == method) else {
            let allowed = methods(candidates.iter().map(|c| c.route));
            trace!("{} not allowed for '{}', allowed: {:?}", method, path, allowed);
            return Err(MatchError::MethodNotAllowed { allowed });
        };

        let route = candidate.route;
        trace!("'{}' matched {} {}", path, route.method(), route.path());

        Ok(Match {
            service,
            route,
            params: route.template().extract(&request),
        })
    }

    /// Returns the methods accepted for a path, most specific route first.
    ///
    /// ```rust
    /// use curly::Router;
    /// use http::Method;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut router = Router::new();
    /// router.insert("/products")?.get("/", "all products")?.post("/", "product created")?;
    ///
    /// assert_eq!(router.allowed("/products"), [Method::GET, Method::POST]);
    /// assert!(router.allowed("/teapot").is_empty());
    /// # Ok(())
    /// # }
    /// ```
    pub fn allowed(&self, path: &str) -> Vec<Method> {
        let request = tokenize(path);

        detect_service(&request, &self.services)
            .map(|service| methods(select_routes(service, &request).iter().map(|c| c.route)))
            .unwrap_or_default()
    }
}

// Distinct methods, first occurrence wins.
fn methods<'r, T: 'r>(routes: impl Iterator<Item = &'r Route<T>>) -> Vec<Method> {
    let mut methods: Vec<Method> = Vec::new();
    for route in routes {
        if !methods.contains(route.method()) {
            methods.push(route.method().clone());
        }
    }
    methods
}
