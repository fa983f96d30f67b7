//! Settings CLI commands

use clap::Subcommand;

use crate::audit::EntityType;
use crate::config::settings::Settings;
use crate::error::XpenseResult;
use crate::storage::Storage;

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show settings and file locations
    Show,
    /// Change one setting
    Set {
        /// currency, theme, show_camera, show_manual_entry, spending_limit,
        /// travel_mode, language, week_start_day
        key: String,
        value: String,
    },
}

/// Handle a config command
pub fn handle_config_command(
    storage: &Storage,
    settings: &mut Settings,
    cmd: ConfigCommands,
) -> XpenseResult<()> {
    let paths = storage.paths();

    match cmd {
        ConfigCommands::Show => {
            println!("xpense configuration");
            println!("====================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("currency          {}", settings.currency);
            println!("theme             {:?}", settings.theme);
            println!("language          {}", settings.language.code());
            println!("week_start_day    {}", settings.week_start_day);
            println!("spending_limit    {}", settings.spending_limit);
            println!("show_camera       {}", settings.show_camera);
            println!("show_manual_entry {}", settings.show_manual_entry);
            println!("travel_mode       {}", settings.travel_mode);
        }

        ConfigCommands::Set { key, value } => {
            let before = settings.clone();
            settings.set(&key, &value)?;
            settings.save(paths)?;

            storage.log_update(
                EntityType::Settings,
                "settings",
                None,
                &before,
                &*settings,
                None,
            );
            println!("Set {} = {}", key, value);
        }
    }

    Ok(())
}
