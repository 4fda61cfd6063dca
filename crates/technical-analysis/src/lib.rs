pub mod indicators;
pub mod scorer;
pub mod series;

#[cfg(test)]
mod indicators_tests;

pub use indicators::*;
pub use scorer::*;
pub use series::*;
