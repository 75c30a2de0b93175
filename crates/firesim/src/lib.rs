//! Command-line front end for the firesim engine
//!
//! Loads YAML scenarios and CSV inflation histories, runs projections or the
//! retirement search, and renders the monthly snapshots as a table or JSON.

pub mod logging;
pub mod report;
pub mod scenario;
pub mod util;

pub use logging::init_logging;
