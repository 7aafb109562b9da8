// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod entity;
pub mod places;

pub use entity::*;
pub use places::*;
