use crate::config::Config;
use crate::error::Result;

/// Print the resolved configuration.
pub fn cmd_config_show() -> Result<()> {
    let config = Config::load()?;
    println!("api_url: {}", config.api_url()?);
    match config.default_reporter_id {
        Some(id) => println!("default_reporter_id: {}", id),
        None => println!("default_reporter_id: (unset)"),
    }
    Ok(())
}

/// Persist the API base URL.
pub fn cmd_config_set_url(url: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set_api_url(url)?;
    config.save()?;
    println!("api_url set to {}", url);
    Ok(())
}

/// Persist the default reporter for new issues and comments.
pub fn cmd_config_set_reporter(user_id: u64) -> Result<()> {
    let mut config = Config::load()?;
    config.set_default_reporter(user_id);
    config.save()?;
    println!("default_reporter_id set to {}", user_id);
    Ok(())
}
