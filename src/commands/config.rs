use crate::CheckContext;
use anyhow::{Result, bail};

/// Execute config command - show effective configuration values
///
/// # Errors
///
/// Returns an error if the key is unknown or serialization fails
pub fn execute(ctx: &CheckContext, key: Option<&str>, list: bool) -> Result<()> {
    match (key, list) {
        (Some(key), false) => match ctx.config.get(key) {
            Some(value) => println!("{value}"),
            None => bail!("Unknown or unset configuration key: {key}"),
        },
        _ => {
            if let Some(path) = &ctx.config_path {
                println!("# {}", path.display());
            }
            print!("{}", ctx.config.to_toml()?);
        }
    }
    Ok(())
}
