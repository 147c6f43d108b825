use sqlx::PgPool;

use crate::error::ApiError;
use crate::theme::model::{
    CreateThemeRequest, PaginatedResponse, Theme, ThemeFilter, UpdateThemeRequest,
};

#[derive(Clone)]
pub struct ThemeService {
    db_pool: PgPool,
}

impl ThemeService {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    pub async fn create_theme(&self, request: CreateThemeRequest) -> Result<Theme, ApiError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(ApiError::BadRequest("Theme name must not be blank".to_string()));
        }

        let theme = sqlx::query_as::<_, Theme>(
            r#"
            INSERT INTO themes (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(&request.description)
        .fetch_one(&self.db_pool)
        .await?;

        tracing::info!(theme_id = theme.id, "Theme created");

        Ok(theme)
    }

    pub async fn get_theme(&self, id: i64) -> Result<Theme, ApiError> {
        let theme = sqlx::query_as::<_, Theme>(
            "SELECT id, name, description, created_at, updated_at FROM themes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Theme {} not found", id)))?;

        Ok(theme)
    }

    pub async fn list_themes(
        &self,
        filter: ThemeFilter,
    ) -> Result<PaginatedResponse<Theme>, ApiError> {
        let (page, limit, offset) = filter.window()?;

        let mut query_builder = sqlx::QueryBuilder::new(
            "SELECT t.id, t.name, t.description, t.created_at, t.updated_at FROM themes t WHERE 1=1",
        );
        let mut count_builder = sqlx::QueryBuilder::new("SELECT COUNT(*) FROM themes t WHERE 1=1");

        if let Some(user_id) = filter.user_id {
            let clause = " AND EXISTS (SELECT 1 FROM user_themes ut WHERE ut.theme_id = t.id AND ut.user_id = ";
            query_builder.push(clause);
            query_builder.push_bind(user_id);
            query_builder.push(")");
            count_builder.push(clause);
            count_builder.push_bind(user_id);
            count_builder.push(")");
        }

        let total_count: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.db_pool)
            .await?;

        query_builder.push(" ORDER BY t.name ASC LIMIT ");
        query_builder.push_bind(limit);
        query_builder.push(" OFFSET ");
        query_builder.push_bind(offset);

        let items = query_builder
            .build_query_as::<Theme>()
            .fetch_all(&self.db_pool)
            .await?;

        Ok(PaginatedResponse {
            data: items,
            total: total_count,
            page,
            limit,
        })
    }

    pub async fn update_theme(
        &self,
        id: i64,
        request: UpdateThemeRequest,
    ) -> Result<Theme, ApiError> {
        let current = self.get_theme(id).await?;

        let name = match request.name {
            Some(name) if name.trim().is_empty() => {
                return Err(ApiError::BadRequest("Theme name must not be blank".to_string()))
            }
            Some(name) => name.trim().to_string(),
            None => current.name,
        };
        let description = request.description.or(current.description);

        let theme = sqlx::query_as::<_, Theme>(
            r#"
            UPDATE themes
            SET name = $1, description = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(&name)
        .bind(&description)
        .bind(id)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(theme)
    }

    pub async fn delete_theme(&self, id: i64) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM themes WHERE id = $1")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("Theme {} not found", id)));
        }

        tracing::info!(theme_id = id, "Theme deleted");

        Ok(())
    }

    pub async fn is_assigned(&self, theme_id: i64, user_id: i64) -> Result<bool, ApiError> {
        let assigned: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM user_themes WHERE theme_id = $1 AND user_id = $2)",
        )
        .bind(theme_id)
        .bind(user_id)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(assigned)
    }

    /// Assign a theme to a user; assigning twice is a no-op
    pub async fn assign_user(&self, theme_id: i64, user_id: i64) -> Result<(), ApiError> {
        self.get_theme(theme_id).await?;

        let user_exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
                .bind(user_id)
                .fetch_one(&self.db_pool)
                .await?;
        if !user_exists {
            return Err(ApiError::NotFound(format!("User {} not found", user_id)));
        }

        sqlx::query(
            r#"
            INSERT INTO user_themes (user_id, theme_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, theme_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(theme_id)
        .execute(&self.db_pool)
        .await?;

        tracing::info!(theme_id, user_id, "Theme assigned");

        Ok(())
    }

    pub async fn unassign_user(&self, theme_id: i64, user_id: i64) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM user_themes WHERE theme_id = $1 AND user_id = $2")
            .bind(theme_id)
            .bind(user_id)
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!(
                "Theme {} is not assigned to user {}",
                theme_id, user_id
            )));
        }

        Ok(())
    }
}
