//! Themes and their assignment to users

pub mod model;
pub mod service;

pub use model::{CreateThemeRequest, ThemeFilter, UpdateThemeRequest};
pub use service::ThemeService;
