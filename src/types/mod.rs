pub mod quiz;
pub mod report;
pub mod state;
