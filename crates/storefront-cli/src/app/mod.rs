pub mod bootstrap;
pub mod state;

pub use state::AppState;
