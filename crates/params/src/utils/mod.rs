//! Utility constants shared by several algorithms

pub mod hash;
