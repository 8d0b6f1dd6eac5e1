/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → IncidentTable
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ IncidentTable  │  Vec<IncidentRecord>, attack-type domain
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  attack type == selection → filtered rows
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  top-10 losses, group counts, resolution times
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
