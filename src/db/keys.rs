//! Storage keys, one JSON blob per key.

pub const AUTH: &str = "xstep_auth";
pub const PROFILE: &str = "xstep_profile";
pub const THRESHOLDS: &str = "xstep_thresholds";
pub const HISTORY: &str = "xstep_history";
pub const ALERTS: &str = "xstep_alerts";
pub const HEALTH: &str = "xstep_health";
pub const ROUTINE: &str = "xstep_routine";
pub const TODOS: &str = "xstep_todos";
