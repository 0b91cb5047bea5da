// Domain layer - Pure data types with no I/O
pub mod chart;
pub mod pipeline;
pub mod region;
pub mod trends;
