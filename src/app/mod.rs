// Application layer - Use case interactors

pub mod container;
pub mod order_interactor;
pub mod sanitize_interactor;
pub mod size_check_interactor;

// Re-export interactors
pub use container::{AppContainer, DefaultAppContainer};
pub use order_interactor::OrderInteractor;
pub use sanitize_interactor::SanitizeInteractor;
pub use size_check_interactor::SizeCheckInteractor;
