//! PostgreSQL implementation of the click event repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Click, NewClick};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

const CLICK_COLUMNS: &str = "id, link_id, clicked_at, ip_address, user_agent, referrer, \
                             country, city, device_type, browser, operating_system";

#[derive(sqlx::FromRow)]
struct ClickRow {
    id: i64,
    link_id: i64,
    clicked_at: DateTime<Utc>,
    ip_address: Option<String>,
    user_agent: Option<String>,
    referrer: String,
    country: String,
    city: String,
    device_type: String,
    browser: String,
    operating_system: String,
}

impl From<ClickRow> for Click {
    fn from(row: ClickRow) -> Self {
        Click {
            id: row.id,
            link_id: row.link_id,
            clicked_at: row.clicked_at,
            ip_address: row.ip_address,
            user_agent: row.user_agent,
            referrer: row.referrer,
            country: row.country,
            city: row.city,
            device_type: row.device_type,
            browser: row.browser,
            operating_system: row.operating_system,
        }
    }
}

/// PostgreSQL repository for the append-only click event log.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn append(&self, new_click: NewClick) -> Result<Click, AppError> {
        let row: ClickRow = sqlx::query_as(&format!(
            "INSERT INTO link_clicks \
             (link_id, clicked_at, ip_address, user_agent, referrer, \
              country, city, device_type, browser, operating_system) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {CLICK_COLUMNS}"
        ))
        .bind(new_click.link_id)
        .bind(new_click.clicked_at)
        .bind(&new_click.ip_address)
        .bind(&new_click.user_agent)
        .bind(&new_click.referrer)
        .bind(&new_click.country)
        .bind(&new_click.city)
        .bind(&new_click.device_type)
        .bind(&new_click.browser)
        .bind(&new_click.operating_system)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if let Some(db) = e.as_database_error() {
                if db.is_foreign_key_violation() {
                    return AppError::bad_request(
                        "Link does not exist",
                        json!({ "link_id": new_click.link_id }),
                    );
                }
            }
            AppError::from(e)
        })?;

        Ok(row.into())
    }

    async fn find_by_link(&self, link_id: i64) -> Result<Vec<Click>, AppError> {
        let rows: Vec<ClickRow> = sqlx::query_as(&format!(
            "SELECT {CLICK_COLUMNS} FROM link_clicks \
             WHERE link_id = $1 \
             ORDER BY clicked_at DESC"
        ))
        .bind(link_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Click::from).collect())
    }

    async fn find_by_links(&self, link_ids: &[i64]) -> Result<Vec<Click>, AppError> {
        if link_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<ClickRow> = sqlx::query_as(&format!(
            "SELECT {CLICK_COLUMNS} FROM link_clicks \
             WHERE link_id = ANY($1) \
             ORDER BY clicked_at DESC"
        ))
        .bind(link_ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Click::from).collect())
    }
}
