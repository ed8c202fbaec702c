use crate::display::user_table;
use crate::error::Result;

use super::connect;

/// List the tracker's user directory.
pub async fn cmd_users(output_json: bool) -> Result<()> {
    let (_config, api) = connect()?;
    let users = api.list_users().await?;

    if output_json {
        println!("{}", serde_json::to_string_pretty(&users)?);
        return Ok(());
    }

    if users.is_empty() {
        println!("No users found.");
    } else {
        println!("{}", user_table(&users));
    }
    Ok(())
}
