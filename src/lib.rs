// ABOUTME: Library module for mysql-csv-export
// ABOUTME: Exports all core functionality for use in binary and tests

pub mod commands;
pub mod config;
pub mod export;
pub mod mysql;
