// Event module for the dispatch console
// Runs the interactive loop and the headless modes

mod loop_handler;

pub use loop_handler::{run, run_headless, run_health_check};
