//! Workflow init step.
//!
//! Init writes a starter config with every editable field present so the
//! operator can fill it in without hunting for field names.
use super::resolve_config_path;
use crate::cli::InitArgs;
use crate::config::{default_config, write_config};
use anyhow::{anyhow, Result};

/// Run the init step, writing a starter config.
pub(crate) fn run_init(args: &InitArgs) -> Result<()> {
    let config_path = resolve_config_path(args.config.as_deref())?;
    if config_path.is_file() && !args.force {
        return Err(anyhow!(
            "config already exists at {} (use --force to overwrite)",
            config_path.display()
        ));
    }
    write_config(&config_path, &default_config())?;
    println!("wrote {}", config_path.display());
    Ok(())
}
