use clap::Args;
use sqlx::SqlitePool;
use std::path::PathBuf;

use crate::models::Snapshot;
use crate::transfer;

#[derive(Args)]
pub struct ExportCommand {
    /// Destination file for the snapshot
    path: PathBuf,
}

impl ExportCommand {
    pub async fn run(&self, pool: &SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
        let snapshot = transfer::export_all(pool).await?;
        let json = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(&self.path, json)?;

        println!(
            "Exported {} settings, {} meal logs and {} sets to {}",
            snapshot.settings.len(),
            snapshot.meal_logs.len(),
            snapshot.my_sets.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[derive(Args)]
pub struct ImportCommand {
    /// Snapshot file to restore from
    path: PathBuf,
}

impl ImportCommand {
    pub async fn run(&self, pool: &SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(&self.path)?;
        let snapshot: Snapshot = serde_json::from_str(&contents)?;

        transfer::import_all(pool, &snapshot).await?;

        println!(
            "Imported {} settings, {} meal logs and {} sets from {}",
            snapshot.settings.len(),
            snapshot.meal_logs.len(),
            snapshot.my_sets.len(),
            self.path.display()
        );
        Ok(())
    }
}
