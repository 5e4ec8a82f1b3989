mod grouping;
mod validation;

pub use grouping::{CropGroup, group_by_crop};
pub use validation::{Collected, Rejection, collect, collect_partitioned, validate_entry};
