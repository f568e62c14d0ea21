mod controller;
mod events;

pub use controller::MonitorController;
pub use events::MonitorEvent;
