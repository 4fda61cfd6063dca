//! Market-data providers for the analysis pipeline.
//!
//! `InMemoryProvider` serves caller-supplied snapshots; `MockMarketData`
//! synthesizes reproducible random-walk series for a fixed NSE universe.

pub mod memory;
pub mod mock;
pub mod universe;

pub use memory::InMemoryProvider;
pub use mock::{MockConfig, MockMarketData};
pub use universe::{nse_large_caps, SeriesShape, UniverseEntry};
