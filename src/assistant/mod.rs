pub mod context;
pub mod tools;

pub use context::{greeting_prompt, system_prompt, PatientContext};
pub use tools::{execute_tool, tool_definitions};
