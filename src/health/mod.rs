pub mod index;
pub mod refresh;
pub mod store;

pub use refresh::refresh_health;
pub use store::HealthStore;
