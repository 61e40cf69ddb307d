//! Drive the task list from code instead of the interactive view.
//!
//! Run with `cargo run --example basic [DIR]`. Without DIR it uses the same
//! store as `tydid` itself (`~/.tydid`).

use tydid::api::Tydid;
use tydid::model::Task;

fn print_tasks(tasks: &[Task]) {
    for task in tasks {
        let priority = if task.priority { "!" } else { " " };
        println!("{} {} {}", task.status_mark(), priority, task.title);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let tydid = match std::env::args_os().nth(1) {
        Some(dir) => Tydid::open(dir)?,
        None => Tydid::open_default()?,
    };

    let docs = tydid.add_task("Complete the documentation", false);
    println!("Created new task: {} ({})", docs.title, docs.id);

    let bug = tydid.add_task("Fix critical bug", true);
    println!("Created task with priority: {} ({})", bug.title, bug.id);

    tydid.complete_task(&docs.id);
    println!("Marked task as complete");

    println!("\nAll todos:");
    print_tasks(&tydid.tasks());

    tydid.delete_task(&bug.id);
    println!("\nDeleted a todo. Updated list:");
    print_tasks(&tydid.tasks());

    println!("\nRun `tydid` in your terminal to start the interactive UI");
    Ok(())
}
