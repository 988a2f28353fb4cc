//! Application services composed from the lower layers.

mod container;
mod sign_in;

pub use container::AppContainer;
pub use sign_in::SignInService;
