use anyhow::Result;
use colored::*;
use lifecycle_core::colors::get_target_color;
use lifecycle_core::lifecycle_manager::LifecycleManager;

pub fn execute(manager: &LifecycleManager) -> Result<()> {
    let result = manager.list_targets();

    println!("{}", "Targets".bold().underline());

    if result.targets.is_empty() {
        println!("  {}", "No targets declared".dimmed());
        return Ok(());
    }

    let width = result.targets.iter().map(|t| t.name.len()).max().unwrap_or(0);
    for target in &result.targets {
        let name = format!("{:width$}", target.name, width = width);
        let description = target.description.as_deref().unwrap_or("");
        println!("  {}  {}", name.color(get_target_color(&target.name)).bold(), description);
        if !target.prerequisites.is_empty() {
            println!(
                "  {:width$}  {} {}",
                "",
                "requires:".dimmed(),
                target.prerequisites.join(", "),
                width = width
            );
        }
    }

    println!();
    println!("{} {}", "Platform:".bright_black(), result.platform);
    if result.config_dirs.is_empty() {
        println!("{} {}", "Config dirs:".bright_black(), "none found".dimmed());
    } else {
        for dir in &result.config_dirs {
            println!("{} {}", "Config dir:".bright_black(), dir.display());
        }
    }

    Ok(())
}
