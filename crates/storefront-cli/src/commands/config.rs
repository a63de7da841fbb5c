use anyhow::Result;

use crate::app::AppState;

pub fn show(state: &AppState) -> Result<()> {
    println!("# {}", state.config_service.path().display());
    print!("{}", toml::to_string_pretty(&state.config)?);
    Ok(())
}
