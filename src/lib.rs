//! Travel destination recommendations.
//!
//! A fixed catalog of cities is loaded once at startup. Each request prices
//! every destination from the traveller's position, buckets the prices
//! relative to one another, then filters by country, flight time, budget,
//! climate and activities before ranking cheapest first.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
