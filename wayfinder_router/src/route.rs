// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static route table and path resolution.
//!
//! A route pattern is an absolute path whose segments are either literals or
//! `:name` parameters, e.g. `/components/:name`. Resolution ignores the query
//! string, the fragment, repeated slashes, and a trailing slash. When several
//! patterns match, the one with the fewest parameters wins, then table order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Path parameters captured by `:name` segments.
pub type Params = BTreeMap<String, String>;

/// One entry of the route table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// View id, unique within the table.
    pub id: String,
    /// Path pattern, starting with `/`.
    pub path: String,
    /// Optional display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Route {
    /// A route without a title.
    pub fn new(id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            title: None,
        }
    }

    /// Set the display title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Problems found while building a [`RouteTable`].
#[derive(Debug, Error)]
pub enum RouteTableError {
    /// The JSON could not be parsed into routes.
    #[error("invalid route table json: {0}")]
    Json(#[from] serde_json::Error),
    /// No routes were given.
    #[error("route table is empty")]
    Empty,
    /// Two routes share a view id.
    #[error("duplicate route id `{0}`")]
    DuplicateId(String),
    /// Two routes share a path pattern.
    #[error("duplicate route path `{0}`")]
    DuplicatePath(String),
    /// A path pattern is malformed.
    #[error("route `{id}` has invalid path `{path}`")]
    InvalidPath {
        /// Offending route id.
        id: String,
        /// Offending pattern.
        path: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

#[derive(Clone, Debug)]
struct Compiled {
    route: Route,
    segments: Vec<Segment>,
    params: usize,
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end].split('/').filter(|s| !s.is_empty())
}

fn compile(route: Route) -> Result<Compiled, RouteTableError> {
    let invalid = |route: &Route| RouteTableError::InvalidPath {
        id: route.id.clone(),
        path: route.path.clone(),
    };
    if !route.path.starts_with('/') || route.path.contains(['?', '#']) {
        return Err(invalid(&route));
    }
    let mut segments = Vec::new();
    for part in split_path(&route.path) {
        match part.strip_prefix(':') {
            Some("") => return Err(invalid(&route)),
            Some(name) => {
                if segments.contains(&Segment::Param(name.to_string())) {
                    return Err(invalid(&route));
                }
                segments.push(Segment::Param(name.to_string()));
            }
            None => segments.push(Segment::Literal(part.to_string())),
        }
    }
    let params = segments
        .iter()
        .filter(|s| matches!(s, Segment::Param(_)))
        .count();
    Ok(Compiled {
        route,
        segments,
        params,
    })
}

impl Compiled {
    fn matches(&self, parts: &[&str]) -> Option<Params> {
        if parts.len() != self.segments.len() {
            return None;
        }
        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(lit) if lit == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), (*part).to_string());
                }
            }
        }
        Some(params)
    }

    fn canonical(&self) -> Vec<&str> {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Literal(l) => l.as_str(),
                Segment::Param(_) => ":",
            })
            .collect()
    }
}

/// Validated, immutable route table.
#[derive(Clone, Debug)]
pub struct RouteTable {
    routes: Vec<Compiled>,
}

impl RouteTable {
    /// Validate and compile `routes`.
    pub fn new(routes: Vec<Route>) -> Result<Self, RouteTableError> {
        if routes.is_empty() {
            return Err(RouteTableError::Empty);
        }
        let mut compiled: Vec<Compiled> = Vec::with_capacity(routes.len());
        for route in routes {
            if compiled.iter().any(|c| c.route.id == route.id) {
                return Err(RouteTableError::DuplicateId(route.id));
            }
            let next = compile(route)?;
            if compiled.iter().any(|c| c.canonical() == next.canonical()) {
                return Err(RouteTableError::DuplicatePath(next.route.path));
            }
            compiled.push(next);
        }
        Ok(Self { routes: compiled })
    }

    /// Parse a JSON array of routes.
    pub fn from_json(json: &str) -> Result<Self, RouteTableError> {
        Self::new(serde_json::from_str(json)?)
    }

    /// The route registered for `view`.
    pub fn resolve_view(&self, view: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|c| c.route.id == view)
            .map(|c| &c.route)
    }

    /// The route matching a URL path, with captured parameters.
    pub fn resolve_path(&self, path: &str) -> Option<(&Route, Params)> {
        let parts: Vec<&str> = split_path(path).collect();
        self.routes
            .iter()
            .filter_map(|c| c.matches(&parts).map(|p| (c, p)))
            .min_by_key(|(c, _)| c.params)
            .map(|(c, p)| (&c.route, p))
    }

    /// Build the URL path for `view`, filling `:name` segments from `params`.
    ///
    /// Returns `None` for unknown views or missing parameters.
    pub fn href_for(&self, view: &str, params: &Params) -> Option<String> {
        let compiled = self.routes.iter().find(|c| c.route.id == view)?;
        let mut href = String::new();
        for segment in &compiled.segments {
            href.push('/');
            match segment {
                Segment::Literal(lit) => href.push_str(lit),
                Segment::Param(name) => href.push_str(params.get(name)?),
            }
        }
        if href.is_empty() {
            href.push('/');
        }
        Some(href)
    }

    /// Routes in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> + '_ {
        self.routes.iter().map(|c| &c.route)
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Always `false`: an empty table is rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::new(vec![
            Route::new("home", "/"),
            Route::new("component", "/components/:name"),
            Route::new("button", "/components/button").with_title("Button"),
            Route::new("token", "/tokens/:group/:name"),
        ])
        .unwrap()
    }

    #[test]
    fn literal_beats_parameter() {
        let t = table();
        let (route, params) = t.resolve_path("/components/button").unwrap();
        assert_eq!(route.id, "button");
        assert!(params.is_empty());
        let (route, params) = t.resolve_path("/components/tabs").unwrap();
        assert_eq!(route.id, "component");
        assert_eq!(params["name"], "tabs");
    }

    #[test]
    fn query_fragment_and_trailing_slash_are_ignored() {
        let t = table();
        assert_eq!(t.resolve_path("/?q=1").unwrap().0.id, "home");
        assert_eq!(t.resolve_path("").unwrap().0.id, "home");
        let (route, params) = t.resolve_path("/tokens/color/accent/#top").unwrap();
        assert_eq!(route.id, "token");
        assert_eq!(params["group"], "color");
        assert_eq!(params["name"], "accent");
        assert!(t.resolve_path("/tokens/color").is_none());
    }

    #[test]
    fn href_round_trips_through_resolution() {
        let t = table();
        let params = Params::from([("name".to_string(), "menu".to_string())]);
        let href = t.href_for("component", &params).unwrap();
        assert_eq!(href, "/components/menu");
        assert_eq!(t.resolve_path(&href).unwrap().1, params);
        assert_eq!(t.href_for("home", &Params::new()).as_deref(), Some("/"));
        assert!(t.href_for("component", &Params::new()).is_none());
        assert!(t.href_for("missing", &Params::new()).is_none());
    }

    #[test]
    fn invalid_tables_are_rejected() {
        assert!(matches!(RouteTable::new(vec![]), Err(RouteTableError::Empty)));
        assert!(matches!(
            RouteTable::new(vec![Route::new("a", "/a"), Route::new("a", "/b")]),
            Err(RouteTableError::DuplicateId(id)) if id == "a"
        ));
        assert!(matches!(
            RouteTable::new(vec![Route::new("a", "/x/:id"), Route::new("b", "/x/:slug/")]),
            Err(RouteTableError::DuplicatePath(_))
        ));
        for path in ["relative", "/x/:", "/x/:a/:a", "/x?y"] {
            assert!(matches!(
                RouteTable::new(vec![Route::new("a", path)]),
                Err(RouteTableError::InvalidPath { .. })
            ));
        }
    }

    #[test]
    fn from_json_reads_optional_titles() {
        let t = RouteTable::from_json(
            r#"[{"id":"page1","path":"/page1","title":"Page one"},{"id":"page2","path":"/page2"}]"#,
        )
        .unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.resolve_view("page1").unwrap().title.as_deref(), Some("Page one"));
        assert_eq!(t.resolve_view("page2").unwrap().title, None);
        assert!(matches!(RouteTable::from_json("{"), Err(RouteTableError::Json(_))));
    }
}
