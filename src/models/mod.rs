mod food;
mod meal_log;
mod my_set;
mod profile;
mod snapshot;

pub use food::Food;
pub use meal_log::{MealLog, MealType, NewMealLog};
pub use my_set::{MySet, NewMySet, SetItem};
pub use profile::{ActivityLevel, Gender, Goal, Profile, Settings, SETTINGS_ID};
pub use snapshot::{Snapshot, SNAPSHOT_VERSION};
