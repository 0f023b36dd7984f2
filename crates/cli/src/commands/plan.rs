use anyhow::Result;
use colored::*;
use lifecycle_core::colors::get_target_color;
use lifecycle_core::lifecycle_manager::LifecycleManager;

pub fn execute(manager: &LifecycleManager, target: &str) -> Result<i32> {
    println!("{} {}", "Execution plan for".bold(), target.cyan());

    let plan = match manager.get_execution_plan(target) {
        Ok(plan) => plan,
        Err(err) => {
            eprintln!("{} {}", "✗".red().bold(), err.to_string().red());
            return Ok(err.exit_code());
        }
    };

    println!("\n{}:", "Execution order".bold());
    for (i, step) in plan.iter().enumerate() {
        println!("  {}. {}", i + 1, step.name.color(get_target_color(&step.name)));
        for command in &step.commands {
            let marker = if command.allow_failure {
                " (failure allowed)".dimmed()
            } else {
                "".normal()
            };
            println!("       {} {}{}", "$".dimmed(), command, marker);
            for (key, value) in &command.env_overrides {
                println!("         {} {}={}", "env".dimmed(), key, value);
            }
        }
    }

    Ok(0)
}
