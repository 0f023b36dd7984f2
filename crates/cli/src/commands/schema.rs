use anyhow::Result;
use lifecycle_core::configs::lifecycle::LifecycleConfig;

/// Print the JSON schema of the lifecycle config file
pub fn execute() -> Result<()> {
    let schema = schemars::schema_for!(LifecycleConfig);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
