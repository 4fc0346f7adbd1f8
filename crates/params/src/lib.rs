//! Constant values for dsacrypt cryptographic operations
//!
//! This library provides common constants used across the dsacrypt project.

#![no_std]

// Traditional algorithm constants
pub mod traditional;

// Utility constants
pub mod utils;
