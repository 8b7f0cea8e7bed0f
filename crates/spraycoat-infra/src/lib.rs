//! Infrastructure layer - repository implementations over a record store

pub mod persistence;
