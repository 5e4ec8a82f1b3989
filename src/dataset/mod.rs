mod activities;
mod factors;

pub use activities::{load_activities, read_activities};
pub use factors::{
    load_factor_table, load_factors_csv, load_factors_json, parse_factors_json, read_factors_csv,
};
