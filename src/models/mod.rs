mod activity;
mod factor;
mod footprint;

pub use activity::{ActivityCategory, CropActivity, RawActivity, Unit, normalize_crop};
pub use factor::{EmissionFactor, FactorKey, Scope};
pub use footprint::{Contribution, FOOTPRINT_UNIT, FootprintResult, Report};
