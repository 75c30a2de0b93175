//! Month-stepping financial independence simulation
//!
//! This crate projects a household's finances one calendar month at a time
//! and searches for the month after which salary is no longer needed.
//! It supports:
//! - Stocks, bonds and cash with fixed annual returns
//! - Investment properties with amortizing mortgages and yearly rent reviews
//! - A cash-shortfall waterfall with forced property sales
//! - Surplus reinvestment strategies
//! - Fixed, replayed or randomly sampled inflation
//!
//! All money is exact decimal arithmetic, rounded to cents at each step.
//!
//! # Example
//!
//! ```ignore
//! use firesim_core::config::FireSimulationBuilder;
//! use firesim_core::simulation::run_fire_simulation;
//! use rust_decimal_macros::dec;
//!
//! let init = FireSimulationBuilder::new()
//!     .start(2025, 1, 1)
//!     .income(dec!(6000))
//!     .expenses(dec!(4000))
//!     .build();
//!
//! let result = run_fire_simulation(&init, 600, None);
//! println!("{:?}", result.outlook());
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod date_math;
pub mod error;
pub mod evolve;
pub mod inflation;
pub mod liquidation;
pub mod mortgage;
pub mod simulation;
pub mod transition;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{FireSimulationBuilder, PropertyBuilder, SimulationConfig};
pub use inflation::InflationSource;
pub use model::{FireSearchResult, FireSimulation, RetirementOutlook};
pub use transition::simulate_next;
