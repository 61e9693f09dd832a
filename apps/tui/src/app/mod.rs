// App module for the dispatch console
// Handles application state and the actions keys and clicks trigger

pub mod actions;
pub mod input;
pub mod state;

pub use input::{handle_key, handle_mouse};
pub use state::App;
