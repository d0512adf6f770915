// Ordered route table with first-match resolution

use std::fmt;

use super::{
    error::RouteError,
    pattern::{Captures, RoutePattern},
    view::RouteHandler,
};

/// What a route points at
pub enum RouteTarget<S> {
    /// A concrete endpoint; its pattern must consume the whole remaining path
    View(RouteHandler<S>),
    /// A sub-table mounted under the pattern's prefix
    Include(RouteTable<S>),
}

impl<S> Clone for RouteTarget<S> {
    fn clone(&self) -> Self {
        match self {
            Self::View(handler) => Self::View(handler.clone()),
            Self::Include(table) => Self::Include(table.clone()),
        }
    }
}

/// A single (pattern, target) binding
pub struct Route<S> {
    pattern: RoutePattern,
    target: RouteTarget<S>,
    name: Option<String>,
}

impl<S> Clone for Route<S> {
    fn clone(&self) -> Self {
        Self {
            pattern: self.pattern.clone(),
            target: self.target.clone(),
            name: self.name.clone(),
        }
    }
}

impl<S> fmt::Debug for Route<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target: String = match &self.target {
            RouteTarget::View(_) => "view".to_string(),
            RouteTarget::Include(table) => format!("include({} routes)", table.len()),
        };

        f.debug_struct("Route")
            .field("pattern", &self.pattern.as_str())
            .field("name", &self.name)
            .field("target", &target)
            .finish()
    }
}

/// Outcome of a successful resolution
pub struct Resolved<S> {
    pub handler: RouteHandler<S>,
    pub captures: Captures,
    /// Name of the matched leaf route, if it has one
    pub name: Option<String>,
    /// Pattern sources from the outermost include down to the leaf
    pub chain: Vec<String>,
}

impl<S> fmt::Debug for Resolved<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved")
            .field("captures", &self.captures)
            .field("name", &self.name)
            .field("chain", &self.chain)
            .finish_non_exhaustive()
    }
}

/// Routes in declaration order. Built once, then only read.
pub struct RouteTable<S> {
    routes: Vec<Route<S>>,
}

impl<S> Clone for RouteTable<S> {
    fn clone(&self) -> Self {
        Self {
            routes: self.routes.clone(),
        }
    }
}

impl<S> Default for RouteTable<S> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<S> fmt::Debug for RouteTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.routes).finish()
    }
}

impl<S> RouteTable<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a view route
    pub fn route(self, pattern: &str, handler: RouteHandler<S>) -> Result<Self, RouteError> {
        self.push(pattern, RouteTarget::View(handler), None)
    }

    /// Appends a view route carrying a name
    pub fn named_route(self, pattern: &str, handler: RouteHandler<S>, name: &str) -> Result<Self, RouteError> {
        self.push(pattern, RouteTarget::View(handler), Some(name))
    }

    /// Mounts `table` under the prefix matched by `pattern`
    pub fn include(self, pattern: &str, table: RouteTable<S>) -> Result<Self, RouteError> {
        self.push(pattern, RouteTarget::Include(table), None)
    }

    fn push(mut self, pattern: &str, target: RouteTarget<S>, name: Option<&str>) -> Result<Self, RouteError> {
        self.routes.push(Route {
            pattern: RoutePattern::new(pattern)?,
            target,
            name: name.map(String::from),
        });
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Pattern sources of the top-level routes, in evaluation order
    pub fn patterns(&self) -> Vec<&str> {
        self.routes.iter().map(|route: &Route<S>| route.pattern.as_str()).collect()
    }

    /// Resolves a request path. A single leading `/` is ignored.
    /// Returns `None` when no route matches.
    pub fn resolve(&self, path: &str) -> Option<Resolved<S>> {
        let path: &str = path.strip_prefix('/').unwrap_or(path);
        self.resolve_relative(path)
    }

    fn resolve_relative(&self, path: &str) -> Option<Resolved<S>> {
        for route in &self.routes {
            match &route.target {
                RouteTarget::View(handler) => {
                    if let Some(captures) = route.pattern.match_full(path) {
                        return Some(Resolved {
                            handler: handler.clone(),
                            captures,
                            name: route.name.clone(),
                            chain: vec![route.pattern.as_str().to_string()],
                        });
                    }
                }
                RouteTarget::Include(table) => {
                    let Some((prefix_captures, rest)) = route.pattern.match_prefix(path) else {
                        continue;
                    };

                    if let Some(mut resolved) = table.resolve_relative(rest) {
                        for (key, value) in prefix_captures {
                            resolved.captures.entry(key).or_insert(value);
                        }
                        resolved.chain.insert(0, route.pattern.as_str().to_string());
                        return Some(resolved);
                    }
                }
            }
        }

        None
    }
}
