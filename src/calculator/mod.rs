pub mod calculations;

pub use calculations::{
    FootprintCalculator, StandardCalculator, activity_contribution, sum_in_order,
};
