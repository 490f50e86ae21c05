mod config_cmd;
mod food;
mod log;
mod set;
mod setup;
mod status;
mod transfer_cmd;

pub use config_cmd::ConfigCommand;
pub use food::FoodCommand;
pub use log::LogCommand;
pub use set::SetCommand;
pub use setup::SetupCommand;
pub use status::StatusCommand;
pub use transfer_cmd::{ExportCommand, ImportCommand};
