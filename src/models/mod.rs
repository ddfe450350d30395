pub mod components;
pub mod estimate;
pub mod weather;
