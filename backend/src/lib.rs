//! Exam administration backend library
//!
//! Authentication (login, token refresh, logout), the access-token gate and
//! the administration endpoints built on top of them.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod theme;
