//! Household state and run outputs

mod policy;
mod property;
mod results;
mod snapshot;

pub use policy::{SimulationPolicy, SurplusStrategy};
pub use property::InvestmentProperty;
pub use results::{FireSearchResult, RetirementOutlook, SnapshotRecord};
pub use snapshot::FireSimulation;
