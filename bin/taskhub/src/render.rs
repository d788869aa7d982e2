//! Terminal output — table or JSON, selected by `-o`.

use taskhub_tasks::model::Task;

use crate::view::Stats;

fn short_id(id: &str) -> &str {
    &id[..id.len().min(8)]
}

fn created_day(task: &Task) -> &str {
    // RFC 3339 leads with the date.
    &task.created_at[..task.created_at.len().min(10)]
}

/// Print a task list.
pub fn print_tasks(tasks: &[&Task], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(tasks)?);
        return Ok(());
    }

    if tasks.is_empty() {
        println!("No tasks.");
        return Ok(());
    }

    println!("{:<10} {:<5} {:<8} {:<12} TITLE", "ID", "DONE", "PRI", "CREATED");
    for task in tasks {
        println!(
            "{:<10} {:<5} {:<8} {:<12} {}",
            short_id(&task.id),
            if task.completed { "[x]" } else { "[ ]" },
            task.priority.as_str(),
            created_day(task),
            task.title,
        );
    }
    Ok(())
}

/// Print a single task with all fields.
pub fn print_task(task: &Task, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(task)?);
        return Ok(());
    }

    println!("id:          {}", task.id);
    println!("title:       {}", task.title);
    if !task.description.is_empty() {
        println!("description: {}", task.description);
    }
    println!("completed:   {}", task.completed);
    println!("priority:    {}", task.priority);
    println!("created:     {}", task.created_at);
    println!("updated:     {}", task.updated_at);
    Ok(())
}

/// Print aggregate statistics.
pub fn print_stats(stats: &Stats, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(stats)?);
        return Ok(());
    }

    println!("Total:          {}", stats.total);
    println!("Completed:      {}", stats.completed);
    println!("Active:         {}", stats.active);
    println!("Completion:     {}%", stats.completion_pct);
    println!("Created today:  {}", stats.created_today);
    println!();
    println!("By priority:");
    for (name, ps) in [
        ("high", &stats.high),
        ("medium", &stats.medium),
        ("low", &stats.low),
    ] {
        println!("  {:<8} {} total, {} completed", name, ps.total, ps.completed);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_id_truncates() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }
}
