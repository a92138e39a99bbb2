pub mod catalog;
pub mod config;
pub mod error;
pub mod resolver;
pub mod web;
