pub mod command;
pub mod estimate;
pub mod sort;
pub mod status;
