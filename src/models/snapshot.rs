use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::meal_log::MealLog;
use super::my_set::MySet;
use super::profile::Settings;

/// Current snapshot interchange format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Portable backup of all user-owned tables.
///
/// The food catalog is deliberately excluded: it is re-derivable from the
/// seed source and would bloat the file. Each list defaults to empty so an
/// absent key and an empty array both mean "leave that table unchanged" on
/// import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    #[serde(default)]
    pub settings: Vec<Settings>,
    #[serde(default)]
    pub meal_logs: Vec<MealLog>,
    #[serde(default)]
    pub my_sets: Vec<MySet>,
}
