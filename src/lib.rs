pub mod macros;

pub mod api;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod formatting;
pub mod list;
pub mod models;
pub mod pages;
pub mod pagination;
pub mod sample;
pub mod search;
pub mod table;
pub mod types;

#[cfg(test)]
pub mod test_guards;

pub use api::ApiClient;
pub use config::Config;
pub use error::{Result, ScopeError};
pub use filter::{Filter, FilterSet, Selection};
pub use list::{ListController, ListQuery, ListSource, LocalSource, Page, RemoteSource};
pub use table::{Column, ComparisonTable, HighlightRule, Row, Schema, ToRow, Value};
