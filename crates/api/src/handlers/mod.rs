pub mod alerts;
pub mod datasets;
pub mod imports;
