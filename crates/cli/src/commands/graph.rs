use anyhow::Result;
use colored::*;
use lifecycle_core::colors::get_target_color;
use lifecycle_core::lifecycle_manager::LifecycleManager;

pub fn execute(manager: &LifecycleManager) -> Result<()> {
    let listing = manager.list_targets();
    let graph = manager.get_dependency_graph();

    println!("{}", "Target graph".bold().underline());

    for cycle in &graph.cycles {
        let mut path = cycle.clone();
        path.extend(cycle.first().cloned());
        eprintln!(
            "{} {}",
            "cycle:".red().bold(),
            path.join(" -> ").red()
        );
    }

    for target in &listing.targets {
        let marker = if target.phony {
            "○".dimmed()
        } else {
            "●".bright_blue()
        };
        println!(
            "{} {}",
            marker,
            target.name.color(get_target_color(&target.name)).bold()
        );

        // Prerequisites in the order they run
        if target.prerequisites.is_empty() {
            println!("    {}", "needs nothing".dimmed());
        } else {
            println!("    {} {}", "needs".dimmed(), target.prerequisites.join(", "));
        }

        let required_by: Vec<&str> = listing
            .targets
            .iter()
            .filter(|other| other.prerequisites.contains(&target.name))
            .map(|other| other.name.as_str())
            .collect();
        if !required_by.is_empty() {
            println!("    {} {}", "needed by".dimmed(), required_by.join(", "));
        }
    }

    println!();
    println!(
        "{} phony   {} produces an artifact",
        "○".dimmed(),
        "●".bright_blue()
    );

    Ok(())
}
