pub mod schedule;
pub mod synthesize;
