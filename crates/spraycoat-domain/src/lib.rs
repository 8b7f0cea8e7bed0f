//! Domain layer: quote options, leads, job sites and the record store seam

pub mod model;
pub mod repository;
pub mod service;
