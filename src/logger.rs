use anyhow::{Context, Result};
use log::Level;
use simple_logger::init_with_level;
use std::str::FromStr;

pub fn init(level: &str) -> Result<()> {
    let level = Level::from_str(level).with_context(|| format!("Invalid log level {level}"))?;

    init_with_level(level)?;

    Ok(())
}
