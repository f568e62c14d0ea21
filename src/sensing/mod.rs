pub mod alerts;
pub mod controller;
pub mod generator;
pub mod history;
pub mod loop_worker;
pub mod risk;
pub mod store;

pub use controller::SensingController;
pub use generator::Baseline;
pub use history::HistorySummary;
pub use risk::ZoneStatus;
pub use store::SensorStore;
