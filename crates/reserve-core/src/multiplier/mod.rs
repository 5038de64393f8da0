pub mod engine;

#[cfg(feature = "report")]
pub mod report;

pub use engine::{
    run_ledger, simulate, IterationRow, MAX_ITERATIONS, SimulationInput, SimulationOutput,
    SimulationResult,
};
