// Business domains

pub mod detection;
