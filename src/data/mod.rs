/// Data layer: core types, loading, cleaning, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file, trim headers, coerce declared types → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  schema  │  required columns present?  (advisory)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ resolve  │  Drop / FillDefault on stars, forks, language
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  language == selection  &&  stars in [min, max]
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  describe, top-N by stars, language counts
///   └───────────┘
/// ```
///
/// [`session::Session`] owns the loaded table and runs the last three
/// stages from scratch for every parameter change.

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod resolve;
pub mod schema;
pub mod session;
