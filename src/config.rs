//! Router options and declarative route tables.
//!
//! A route table can be written in TOML and turned into a [`Router`] whose
//! route values are the route names:
//!
//! ```toml
//! [router]
//! route_paths = "relative"
//!
//! [[services]]
//! root = "/users"
//!
//! [[services.routes]]
//! method = "GET"
//! path = "/{id}"
//! name = "get-user"
//! ```

use crate::error::TemplateError;
use crate::router::Router;

use http::Method;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// How route paths relate to their service root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutePaths {
    /// Route paths are joined onto the service root: `/users` + `/{id}`.
    #[default]
    Relative,
    /// Route paths are compiled as written and include the root themselves.
    Absolute,
}

/// Options for a [`Router`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouterConfig {
    /// How route paths relate to their service root.
    pub route_paths: RoutePaths,
}

/// A declarative route table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    /// Router options.
    pub router: RouterConfig,
    /// Services in precedence order.
    pub services: Vec<ServiceConfig>,
}

/// A service entry of a [`TableConfig`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// The root path template.
    pub root: String,
    /// Routes in registration order.
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

/// A route entry of a [`ServiceConfig`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
    /// The HTTP method, e.g. `GET`.
    pub method: String,
    /// The path template.
    pub path: String,
    /// The value stored with the route. Defaults to `"{method} {path}"`.
    pub name: Option<String>,
}

/// Errors loading a route table.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read route table: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not a valid route table.
    #[error("failed to parse route table: {0}")]
    Parse(#[from] toml::de::Error),
    /// A route names a method that is not a valid HTTP method token.
    #[error("invalid method `{method}` for route `{path}`")]
    Method {
        /// The method as written.
        method: String,
        /// The route path it was attached to.
        path: String,
    },
    /// A service root or route path does not compile.
    #[error("invalid template `{path}`: {source}")]
    Template {
        /// The template as written.
        path: String,
        /// Why it was rejected.
        #[source]
        source: TemplateError,
    },
}

impl TableConfig {
    /// Parses a route table from TOML.
    pub fn from_toml(content: &str) -> Result<TableConfig, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Compiles every service and route into a router.
    pub fn into_router(self) -> Result<Router<String>, ConfigError> {
        let mut router = Router::with_config(self.router);

        for service in self.services {
            let root = service.root;
            let registered = router.insert(&root).map_err(|source| ConfigError::Template {
                path: root.clone(),
                source,
            })?;

            for route in service.routes {
                let method = Method::from_bytes(route.method.as_bytes()).map_err(|_| {
                    ConfigError::Method {
                        method: route.method.clone(),
                        path: route.path.clone(),
                    }
                })?;

                let name = route
                    .name
                    .unwrap_or_else(|| format!("{} {}", method, route.path));

                registered
                    .route(method, &route.path, name)
                    .map_err(|source| ConfigError::Template {
                        path: route.path.clone(),
                        source,
                    })?;
            }
        }

        Ok(router)
    }
}

/// Loads a route table from a TOML file.
pub fn load_config(path: &Path) -> Result<TableConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = TableConfig::from_toml(&content)?;

    debug!(
        "loaded route table from {} with {} services",
        path.display(),
        config.services.len()
    );

    Ok(config)
}
