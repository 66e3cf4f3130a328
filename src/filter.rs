//! Independent filter selections that narrow a row collection.
//!
//! Every filter declares where it is evaluated: client-side filters narrow
//! the rows already held in memory, server-side filters are encoded as query
//! parameters and require a new fetch.

use std::fmt;
use std::str::FromStr;

use crate::error::ScopeError;
use crate::table::Row;

/// Sentinel string meaning "no constraint".
pub const ALL: &str = "all";

/// Current value of one filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Value(String),
    /// Boolean filter; `Flag(false)` places no constraint
    Flag(bool),
}

impl Selection {
    pub fn is_active(&self) -> bool {
        match self {
            Selection::All | Selection::Flag(false) => false,
            Selection::Value(_) | Selection::Flag(true) => true,
        }
    }

    /// `None`/`"all"` map to [`Selection::All`].
    pub fn from_option(value: Option<&str>) -> Self {
        match value {
            None => Selection::All,
            Some(v) if v.eq_ignore_ascii_case(ALL) => Selection::All,
            Some(v) => Selection::Value(v.to_string()),
        }
    }

    fn expected(&self) -> Option<String> {
        match self {
            Selection::All | Selection::Flag(false) => None,
            Selection::Value(v) => Some(v.clone()),
            Selection::Flag(true) => Some("true".to_string()),
        }
    }
}

impl FromStr for Selection {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ScopeError::invalid_input("empty filter value"));
        }
        Ok(Selection::from_option(Some(s)))
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str(ALL),
            Selection::Value(v) => f.write_str(v),
            Selection::Flag(b) => write!(f, "{b}"),
        }
    }
}

/// Where a filter is evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterScope {
    Client,
    /// Sent to the backend as `param=value`
    Server { param: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub name: String,
    /// Row field the filter is matched against
    pub field: String,
    pub selection: Selection,
    pub scope: FilterScope,
}

impl Filter {
    pub fn client(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            selection: Selection::All,
            scope: FilterScope::Client,
        }
    }

    /// Server-side filter whose query parameter is named after the filter.
    pub fn server(name: impl Into<String>, field: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            scope: FilterScope::Server {
                param: name.clone(),
            },
            name,
            field: field.into(),
            selection: Selection::All,
        }
    }

    /// Send this filter as `param` instead of its name. Makes it server-side.
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.scope = FilterScope::Server {
            param: param.into(),
        };
        self
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    pub fn is_server_side(&self) -> bool {
        matches!(self.scope, FilterScope::Server { .. })
    }

    pub fn matches(&self, row: &Row) -> bool {
        match self.selection.expected() {
            None => true,
            Some(expected) => row.get(&self.field).matches(&expected),
        }
    }
}

/// Effect of a [`FilterSet::set`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterChange {
    Unchanged,
    /// Re-derive the in-memory view
    Client,
    /// Re-fetch from page 1
    Server,
}

/// Ordered filters combined with AND semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    pub fn new(filters: Vec<Filter>) -> Self {
        Self { filters }
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn get(&self, name: &str) -> Option<&Selection> {
        self.filters
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.selection)
    }

    pub fn set(&mut self, name: &str, selection: Selection) -> FilterChange {
        let Some(filter) = self.filters.iter_mut().find(|f| f.name == name) else {
            tracing::debug!("ignoring unknown filter '{name}'");
            return FilterChange::Unchanged;
        };
        if filter.selection == selection {
            return FilterChange::Unchanged;
        }
        filter.selection = selection;
        if filter.is_server_side() {
            FilterChange::Server
        } else {
            FilterChange::Client
        }
    }

    /// Reset every filter to "no constraint".
    pub fn clear(&mut self) {
        for filter in &mut self.filters {
            filter.selection = match filter.selection {
                Selection::Flag(_) => Selection::Flag(false),
                _ => Selection::All,
            };
        }
    }

    /// Whether `row` passes every active client-side filter.
    pub fn matches(&self, row: &Row) -> bool {
        self.filters
            .iter()
            .filter(|f| !f.is_server_side())
            .all(|f| f.matches(row))
    }

    /// Derived view over `rows`, in original order.
    pub fn apply<'a>(&self, rows: &'a [Row]) -> Vec<&'a Row> {
        rows.iter().filter(|row| self.matches(row)).collect()
    }

    /// Owned variant of [`FilterSet::apply`].
    pub fn apply_owned(&self, rows: &[Row]) -> Vec<Row> {
        self.apply(rows).into_iter().cloned().collect()
    }

    /// Active server-side filters as query parameters.
    pub fn query_params(&self) -> Vec<(String, String)> {
        self.filters
            .iter()
            .filter_map(|f| match (&f.scope, f.selection.expected()) {
                (FilterScope::Server { param }, Some(value)) => Some((param.clone(), value)),
                _ => None,
            })
            .collect()
    }
}
