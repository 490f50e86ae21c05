use clap::{Args, Subcommand};

use crate::config::Config;

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show the active configuration
    Show,

    /// Print the default config file path
    Path,
}

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show => {
                println!("database_path: {}", config.database_path.display());
                println!("foods_url: {}", config.foods_url);
            }
            ConfigSubcommand::Path => {
                println!("{}", Config::default_config_path().display());
            }
        }
        Ok(())
    }
}
