pub mod app_state;
pub mod signing_context;

pub use app_state::AppState;
pub use signing_context::{SigningContext, SigningContextError};
