use tsdev::application::Task;

/// One line per task: name, plan and description
pub fn render_task_list() -> String {
    let width = Task::ALL
        .iter()
        .map(|task| task.name().len())
        .max()
        .unwrap_or(0);

    let mut out = String::from("Tasks:\n");
    for task in Task::ALL {
        out.push_str(&format!(
            "  {:width$}  {}\n",
            task.name(),
            task.description(),
            width = width
        ));
        if !task.is_primitive() {
            out.push_str(&format!(
                "  {:width$}  = {}\n",
                "",
                task.composition(),
                width = width
            ));
        }
    }
    out.push_str("\nDefault: dev\n");
    out
}

/// NDJSON rendition of the task list
pub fn render_task_list_json() -> String {
    Task::ALL
        .iter()
        .map(|task| {
            serde_json::json!({
                "event": "task",
                "name": task.name(),
                "description": task.description(),
                "plan": task.composition(),
            })
            .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
