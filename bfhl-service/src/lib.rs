//! bfhl-service: one JSON endpoint for Fibonacci, prime filtering, LCM, HCF
//! and one-word AI answers.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;
