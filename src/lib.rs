//! Core of the repository dashboard: loading a table of GitHub repositories,
//! cleaning missing values, filtering by language and star range, and
//! computing the summaries the dashboard draws.

pub mod config;
pub mod data;
