// Terminal module for the dispatch console
// Raw mode, alternate screen and mouse capture

mod setup;

pub use setup::{cleanup_terminal_state as cleanup, setup_terminal as setup};
