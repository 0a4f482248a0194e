//! The route table.
//!
//! A [`RouteTable`] is an ordered list of [`RouteDescriptor`]s built once and
//! never mutated afterwards. Lookups are a linear scan over either the route
//! name or its path, returning the first match.
//!
//! # Example
//!
//! ```
//! use miniapp_navigator::{LookupField, RouteDescriptor, RouteTable};
//!
//! let table = RouteTable::new(vec![
//!     RouteDescriptor::new("/pages/home/home").name("home"),
//!     RouteDescriptor::new("/pages/login/login").name("login"),
//! ]);
//!
//! assert_eq!(table.get("login").unwrap().path, "/pages/login/login");
//! assert!(table.lookup("/pages/home/home", LookupField::Path).is_ok());
//! assert!(table.get("settings").is_err());
//! ```

use crate::error::NavigationError;
use crate::{info_log, trace_log, warn_log};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

// ============================================================================
// RouteDescriptor
// ============================================================================

/// A navigable page.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDescriptor {
    /// Canonical page path, always starting with `/`.
    pub path: String,

    /// Optional unique name used by name-based navigation.
    pub name: Option<String>,

    /// Page style metadata, passed through untouched.
    pub style: Option<Value>,
}

impl RouteDescriptor {
    /// Create a descriptor for `path`. A missing leading `/` is added.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: normalize_path(&path.into()),
            name: None,
            style: None,
        }
    }

    /// Set the route name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach style metadata.
    #[must_use]
    pub fn style(mut self, style: Value) -> Self {
        self.style = Some(style);
        self
    }

    fn field(&self, field: LookupField) -> Option<&str> {
        match field {
            LookupField::Name => self.name.as_deref(),
            LookupField::Path => Some(&self.path),
        }
    }
}

/// Prefix a raw page route with `/`, as the host reports routes without it.
pub(crate) fn normalize_path(raw: &str) -> String {
    format!("/{}", raw.trim_start_matches('/'))
}

// ============================================================================
// LookupField
// ============================================================================

/// Which descriptor field a lookup compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LookupField {
    #[default]
    Name,
    Path,
}

impl fmt::Display for LookupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupField::Name => f.write_str("name"),
            LookupField::Path => f.write_str("path"),
        }
    }
}

// ============================================================================
// RouteTable
// ============================================================================

/// Immutable, ordered collection of routes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    /// Build a table, keeping the given order.
    ///
    /// Duplicate paths or names are kept but logged; lookups return the first.
    pub fn new(routes: impl IntoIterator<Item = RouteDescriptor>) -> Self {
        let routes: Vec<RouteDescriptor> = routes.into_iter().collect();

        let mut paths = HashSet::new();
        let mut names = HashSet::new();
        for route in &routes {
            if !paths.insert(route.path.as_str()) {
                warn_log!("Duplicate route path '{}', first entry wins", route.path);
            }
            if let Some(name) = &route.name {
                if !names.insert(name.as_str()) {
                    warn_log!("Duplicate route name '{}', first entry wins", name);
                }
            }
        }

        info_log!("Route table built with {} routes", routes.len());
        Self { routes }
    }

    /// Build a table from a host `pages.json` document.
    ///
    /// Main package pages come first, then every sub-package's pages with the
    /// sub-package `root` prefixed to their path.
    ///
    /// ```
    /// use miniapp_navigator::RouteTable;
    ///
    /// let table = RouteTable::from_pages_json(r#"{
    ///     "pages": [{ "path": "pages/home/home", "name": "home" }],
    ///     "subPackages": [{ "root": "shop", "pages": [{ "path": "cart/cart", "name": "cart" }] }]
    /// }"#).unwrap();
    ///
    /// assert_eq!(table.get("cart").unwrap().path, "/shop/cart/cart");
    /// ```
    pub fn from_pages_json(json: &str) -> Result<Self, NavigationError> {
        let document: PagesDocument = serde_json::from_str(json)?;

        let main = document.pages.into_iter().map(PageEntry::into_route);
        let sub = document.sub_packages.into_iter().flat_map(|package| {
            let root = package.root.trim_matches('/').to_string();
            package.pages.into_iter().map(move |page| {
                let mut route = page.into_route();
                route.path = normalize_path(&format!("{}{}", root, route.path));
                route
            })
        });

        Ok(Self::new(main.chain(sub)))
    }

    /// Find the first route whose `field` equals `key`.
    pub fn lookup(&self, key: &str, field: LookupField) -> Result<&RouteDescriptor, NavigationError> {
        let found = self
            .routes
            .iter()
            .find(|route| route.field(field) == Some(key));

        trace_log!("Lookup {} '{}' → {}", field, key, found.is_some());

        found.ok_or_else(|| NavigationError::RouteNotFound {
            key: key.to_string(),
            field,
        })
    }

    /// Look up a route by name.
    pub fn get(&self, name: &str) -> Result<&RouteDescriptor, NavigationError> {
        self.lookup(name, LookupField::Name)
    }

    /// All routes in table order.
    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    /// Iterate over all routes.
    pub fn iter(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter()
    }

    /// Return the number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Return `true` if the table has no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl FromIterator<RouteDescriptor> for RouteTable {
    fn from_iter<I: IntoIterator<Item = RouteDescriptor>>(iter: I) -> Self {
        Self::new(iter)
    }
}

// ============================================================================
// pages.json
// ============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PagesDocument {
    #[serde(default)]
    pages: Vec<PageEntry>,
    #[serde(default, alias = "subpackages")]
    sub_packages: Vec<SubPackage>,
}

#[derive(Deserialize)]
struct SubPackage {
    root: String,
    #[serde(default)]
    pages: Vec<PageEntry>,
}

#[derive(Deserialize)]
struct PageEntry {
    path: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    style: Option<Value>,
}

impl PageEntry {
    fn into_route(self) -> RouteDescriptor {
        RouteDescriptor {
            path: normalize_path(&self.path),
            name: self.name,
            style: self.style,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
