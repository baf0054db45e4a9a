//! Hub table and the distance-threshold network built over it

pub mod graph;
pub mod hub;
