pub mod catalog;
pub mod estimate;
pub mod stats;
pub mod submission;
