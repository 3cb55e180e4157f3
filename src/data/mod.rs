/// Data layer: core types, loading, selection, and derived views.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (fail-fast on bad rows)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐      ┌────────────┐
///   │ Dataset   │◄────►│ selection   │  site + payload range
///   └──────────┘      └────────────┘
///        │                   │
///        └────────┬──────────┘
///                 ▼
///           ┌──────────┐
///           │   view    │  (Dataset, SelectionState) →
///           └──────────┘  AggregationView + PointSetView
/// ```
pub mod loader;
pub mod model;
pub mod selection;
pub mod view;
