pub mod memory;
pub mod seed;
pub mod sentiment;
