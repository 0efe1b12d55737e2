/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///     data_set.csv
///          │
///          ▼
///     ┌──────────┐
///     │  loader   │  trim headers, drop index column, coerce types
///     └──────────┘
///          │
///          ▼
///     ┌────────────┐
///     │ TrackTable  │  column-major, immutable, shared via Arc
///     └────────────┘
///        │        │
///        ▼        ▼
///   ┌──────────┐ ┌──────────┐
///   │  filter   │ │  stats    │  criteria → row indices; describe/corr/…
///   └──────────┘ └──────────┘
/// ```
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
