//! Application service layer - config, session, job-site forms, queries

pub mod app;
pub mod config;
pub mod repository;
pub mod session;
