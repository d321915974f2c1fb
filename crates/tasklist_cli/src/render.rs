//! Plain-text rendering of the task list.

use tasklist_core::Task;

pub const EMPTY_LIST_MESSAGE: &str = "No tasks yet. Add one to get started!";

pub fn render_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return EMPTY_LIST_MESSAGE.to_string();
    }
    tasks.iter().map(render_task).collect::<Vec<_>>().join("\n")
}

pub fn render_task(task: &Task) -> String {
    let checkbox = if task.completed { "[x]" } else { "[ ]" };
    let mut line = format!(
        "{checkbox} {} ({}) {} {}",
        task.title,
        task.priority.label(),
        task.id,
        task.created_at.format("%Y-%m-%d")
    );
    if !task.description.is_empty() {
        line.push_str("\n    ");
        line.push_str(&task.description);
    }
    line
}
