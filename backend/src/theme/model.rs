use serde::Deserialize;
use validator::Validate;

use crate::error::ApiError;

pub use crate::models::{PaginatedResponse, Theme};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateThemeRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateThemeRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ThemeFilter {
    /// Only themes assigned to this user
    pub user_id: Option<i64>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ThemeFilter {
    /// Resolve `(page, limit, offset)`; limit is clamped to 1..=100
    pub fn window(&self) -> Result<(i64, i64, i64), ApiError> {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1)
            .checked_mul(limit)
            .ok_or_else(|| ApiError::BadRequest("page is out of range".to_string()))?;

        Ok((page, limit, offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(page: Option<i64>, limit: Option<i64>) -> ThemeFilter {
        ThemeFilter {
            page,
            limit,
            ..Default::default()
        }
    }

    #[test]
    fn test_window_defaults_and_clamping() {
        assert_eq!(filter(None, None).window().unwrap(), (1, 20, 0));
        assert_eq!(filter(Some(-3), Some(0)).window().unwrap(), (1, 1, 0));
        assert_eq!(filter(Some(3), Some(500)).window().unwrap(), (3, 100, 200));
    }

    #[test]
    fn test_window_rejects_overflowing_page() {
        let err = filter(Some(i64::MAX), Some(100)).window().unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
