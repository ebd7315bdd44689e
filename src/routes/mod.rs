//! Route-key resolution.
//!
//! Summary tables name routes in human-readable form (`KCCI_미주서안`) while
//! the raw series name fields canonically (`KCCI_US_West_Coast`). The
//! `RouteKeyTable` bridges the two. It is versioned external configuration:
//! a JSON file can replace the built-in table when the feed renames a field.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::IndexFamily;
use crate::error::RouteMapError;

mod builtin;

/// Route name → canonical field name, or `None` for "known route, no chart".
pub type RouteKeyMap = IndexMap<String, Option<String>>;

/// Outcome of resolving one route name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Route maps to this raw-series field.
    Field(&'a str),
    /// Route is known but deliberately has no chart series.
    Unchartable,
    /// Route is absent from the family's map (table and map have drifted).
    NotFound,
}

/// Per-family route maps plus the version tag they were published under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteKeyTable {
    pub version: String,
    pub families: IndexMap<IndexFamily, RouteKeyMap>,
}

impl RouteKeyTable {
    /// The table compiled into the binary.
    pub fn builtin() -> Self {
        let families: IndexMap<IndexFamily, RouteKeyMap> = builtin::ENTRIES
            .iter()
            .map(|(family, routes)| {
                let map: RouteKeyMap = routes
                    .iter()
                    .map(|(name, field)| (name.to_string(), field.map(str::to_string)))
                    .collect();
                (*family, map)
            })
            .collect();

        Self {
            version: builtin::VERSION.to_string(),
            families,
        }
    }

    /// Load a table from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, RouteMapError> {
        let text = fs::read_to_string(path).map_err(|source| RouteMapError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let table: RouteKeyTable =
            serde_json::from_str(&text).map_err(|source| RouteMapError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        Ok(table.normalized())
    }

    pub fn family_map(&self, family: IndexFamily) -> Option<&RouteKeyMap> {
        self.families.get(&family)
    }

    /// Resolve a human-readable route name (family prefix already stripped).
    pub fn resolve(&self, family: IndexFamily, route_name: &str) -> Resolution<'_> {
        let Some(map) = self.families.get(&family) else {
            return Resolution::NotFound;
        };
        match map.get(normalize_route_name(route_name)) {
            Some(Some(field)) => Resolution::Field(field.as_str()),
            Some(None) => Resolution::Unchartable,
            None => Resolution::NotFound,
        }
    }

    fn normalized(self) -> Self {
        let families: IndexMap<IndexFamily, RouteKeyMap> = self
            .families
            .into_iter()
            .map(|(family, map)| {
                let map: RouteKeyMap = map
                    .into_iter()
                    .map(|(name, field)| {
                        let field = field
                            .map(|f| f.trim().to_string())
                            .filter(|f| !f.is_empty());
                        (normalize_route_name(&name).to_string(), field)
                    })
                    .collect();
                (family, map)
            })
            .collect();

        Self {
            version: self.version,
            families,
        }
    }
}

impl Default for RouteKeyTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Strip the family prefix from a composite route string.
///
/// Splits on `_`, drops the first segment and rejoins the rest, so route
/// names that contain underscores themselves survive intact.
pub fn route_display_name(route: &str) -> String {
    route.split('_').skip(1).collect::<Vec<_>>().join("_")
}

fn normalize_route_name(name: &str) -> &str {
    name.trim()
}
