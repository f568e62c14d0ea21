use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    models::{GeneratedBy, NewTask, TaskType, TaskUrgency, TodoTask},
    todo::TodoStore,
};

pub const ADD_TODO_TASK: &str = "addTodoTask";

/// Raw tool input; enum fields stay strings until validated so the error can
/// name the field and its allowed values.
#[derive(Debug, Deserialize)]
struct AddTaskArgs {
    title: String,
    #[serde(default)]
    description: Option<String>,
    category: String,
    priority: String,
}

fn allowed<T>(values: &[T], name: fn(&T) -> &'static str) -> String {
    values.iter().map(name).collect::<Vec<_>>().join(", ")
}

/// Tool definitions advertised to the chat model.
pub fn tool_definitions() -> Value {
    json!([{
        "name": ADD_TODO_TASK,
        "description": "Add a new task to the user's to-do list",
        "parameters": {
            "type": "object",
            "properties": {
                "title": { "type": "string", "description": "Short title for the task" },
                "description": { "type": "string", "description": "Detailed description of the task" },
                "category": {
                    "type": "string",
                    "enum": TaskType::ALL.iter().map(TaskType::as_str).collect::<Vec<_>>(),
                    "description": "Task category"
                },
                "priority": {
                    "type": "string",
                    "enum": TaskUrgency::ALL.iter().map(TaskUrgency::as_str).collect::<Vec<_>>(),
                    "description": "Task priority"
                }
            },
            "required": ["title", "category", "priority"]
        }
    }])
}

/// Validates `addTodoTask` input into a task attributed to the assistant.
pub fn parse_add_task(args: &Value) -> Result<NewTask> {
    let args = AddTaskArgs::deserialize(args).context("invalid addTodoTask arguments")?;

    if args.title.trim().is_empty() {
        bail!("title must not be empty");
    }
    let kind: TaskType = args.category.parse().with_context(|| {
        format!(
            "category must be one of: {}",
            allowed(&TaskType::ALL, TaskType::as_str)
        )
    })?;
    let urgency: TaskUrgency = args.priority.parse().with_context(|| {
        format!(
            "priority must be one of: {}",
            allowed(&TaskUrgency::ALL, TaskUrgency::as_str)
        )
    })?;

    Ok(NewTask {
        title: args.title,
        description: args.description.unwrap_or_default(),
        kind,
        urgency,
        due_time: None,
        generated_by: GeneratedBy::Stepmate,
        related_alert: None,
    })
}

pub fn add_todo_task(todos: &TodoStore, args: &Value) -> Result<(TodoTask, String)> {
    let task = todos.add_task(parse_add_task(args)?);
    let reply = format!("Task \"{}\" added to your to-do list!", task.title);
    Ok((task, reply))
}

/// Dispatches a tool call by name and returns the text handed back to the model.
pub fn execute_tool(todos: &TodoStore, name: &str, args: &Value) -> Result<String> {
    match name {
        ADD_TODO_TASK => add_todo_task(todos, args).map(|(_, reply)| reply),
        other => bail!("unknown tool '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_input() {
        let task = parse_add_task(&json!({
            "title": "Check insoles",
            "category": "foot_care",
            "priority": "high"
        }))
        .unwrap();

        assert_eq!(task.kind, TaskType::FootCare);
        assert_eq!(task.urgency, TaskUrgency::High);
        assert_eq!(task.description, "");
        assert_eq!(task.generated_by, GeneratedBy::Stepmate);
    }

    #[test]
    fn rejects_unknown_category_naming_allowed_values() {
        let err = parse_add_task(&json!({
            "title": "Check insoles",
            "category": "footcare",
            "priority": "high"
        }))
        .unwrap_err();

        let message = format!("{err:#}");
        assert!(message.contains("category must be one of"));
        assert!(message.contains("health_tracking"));
    }

    #[test]
    fn rejects_missing_priority_and_blank_title() {
        assert!(parse_add_task(&json!({ "title": "x", "category": "activity" })).is_err());
        assert!(parse_add_task(&json!({
            "title": "  ",
            "category": "activity",
            "priority": "low"
        }))
        .is_err());
    }

    #[test]
    fn definitions_list_every_category() {
        let definitions = tool_definitions();
        let categories = &definitions[0]["parameters"]["properties"]["category"]["enum"];
        assert_eq!(categories.as_array().unwrap().len(), TaskType::ALL.len());
        assert_eq!(definitions[0]["name"], ADD_TODO_TASK);
    }
}
