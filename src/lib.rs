//! At-Bat Engine - tabletop baseball at-bat resolution over range tables

pub mod core;
pub mod data;
pub mod simulation;
pub mod stats;
pub mod tables;
