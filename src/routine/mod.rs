mod seed;
pub mod store;

pub use store::{recommendation_task, RoutineStore};
