//! Specificity-ranked URL path matching.
//!
//! `curly` dispatches a request path to a *service* (a group of routes under a
//! common root) and then to the most specific *route* of that service, with
//! the path parameters extracted along the way.
//!
//! ```rust
//! use curly::Router;
//! use http::Method;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut router = Router::new();
//! router
//!     .insert("/users")?
//!     .get("/{id}", "show user")?
//!     .post("/{id}:activate", "activate user")?;
//! router.insert("/static")?.get("/{file:*}", "serve file")?;
//!
//! let matched = router.at(&Method::GET, "/users/978")?;
//! assert_eq!(*matched.value(), "show user");
//! assert_eq!(matched.params.get("id"), Some("978"));
//!
//! let matched = router.at(&Method::POST, "/users/978:activate")?;
//! assert_eq!(*matched.value(), "activate user");
//! assert_eq!(matched.params.get("id"), Some("978"));
//!
//! let matched = router.at(&Method::GET, "/static/css/site.css")?;
//! assert_eq!(matched.params.get("file"), Some("css/site.css"));
//! # Ok(())
//! # }
//! ```
//!
//! # Templates
//!
//! Services and routes are registered with path templates:
//!
//! ```text
//!  Syntax           Type
//!  literal          matched exactly, case-sensitive
//!  {name}           parameter, any single segment
//!  {name:pattern}   parameter constrained by a regex, `{:pattern}` is unnamed
//!  {name:*}         wildcard, one or more trailing segments, `{:*}` is unnamed
//!  segment:verb     custom verb, final segment only
//! ```
//!
//! Regex patterns are applied as written. `{id:^[0-9]+$}` constrains the whole
//! segment, while `{id:[0-9]}` accepts any segment *containing* a digit and
//! `{id:^v}` any segment starting with `v`.
//!
//! A custom verb is a `:name` suffix on the final segment that the request
//! must repeat exactly. It is stripped before the rest of the segment is
//! matched and is never part of an extracted value.
//!
//! # Precedence
//!
//! The service whose root scores highest wins. A literal root segment scores
//! more than any number of parameters, a parameter more than a wildcard, and
//! earlier literals score more than later ones. Equal scores go to the service
//! registered first.
//!
//! Within the service, matching routes are ranked by their number of static
//! segments, then by their number of parameters, then by registration order:
//!
//! ```text
//!  Routes:  /{type}/{id}   /network/{id}
//!  Request: /network/12    → /network/{id}
//! ```
//!
//! Lookups that fail report why, see [`MatchError`].

#![deny(clippy::all)]
#![forbid(unsafe_code)]

#[macro_use]
extern crate log;

mod config;
mod error;
mod params;
mod path;
mod route;
mod router;
mod service;
mod template;

pub use config::{load_config, ConfigError, RouteConfig, RoutePaths, RouterConfig, ServiceConfig, TableConfig};
pub use error::{MatchError, TemplateError};
pub use params::{Params, ParamsIter};
pub use path::{tokenize, untokenize};
pub use route::{select_routes, Route, RouteCandidate};
pub use router::{Match, Router};
pub use service::{detect_service, score_service, Service, WEIGHT_LITERAL, WEIGHT_PARAM, WEIGHT_WILDCARD};
pub use template::{PathTemplate, Specificity, Token, TokenKind};
