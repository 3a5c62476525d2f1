//! Streamflix: a server-rendered browsing front end over the TMDB catalog.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod telemetry;
pub mod views;
