mod table;

pub use table::{EmissionFactorTable, FactorSource};
