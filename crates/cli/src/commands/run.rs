use anyhow::Result;
use colored::*;
use lifecycle_core::lifecycle_manager::LifecycleManager;
use lifecycle_core::results::RunOutcome;

/// Run a target and return the process exit code
pub fn execute(manager: &LifecycleManager, target: &str) -> Result<i32> {
    println!("{} {}", "Running target".bold(), target.cyan());

    let outcome = match manager.run_target(target) {
        Ok(outcome) => outcome,
        Err(err) if err.is_resolution_error() => {
            eprintln!("{} {}", "✗".red().bold(), err.to_string().red());
            return Ok(err.exit_code());
        }
        Err(err) => return Err(anyhow::anyhow!("Failed to run target: {}", err)),
    };

    print_summary(&outcome);
    Ok(outcome.exit_code())
}

fn print_summary(outcome: &RunOutcome) {
    println!();
    for result in &outcome.results {
        let status = if result.succeeded {
            "✓".green().bold()
        } else {
            "✗".red().bold()
        };
        println!("  {} {}", status, result.target);
        for tolerated in &result.tolerated {
            println!("      {} {}", "ignored:".yellow(), tolerated.message.dimmed());
        }
    }
    println!();

    match &outcome.failure {
        None => println!(
            "{} {}",
            "✓".green().bold(),
            "All targets completed successfully!".green().bold()
        ),
        Some(err) => eprintln!("{} {}", "✗".red().bold(), err.to_string().red()),
    }
}
