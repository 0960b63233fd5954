//! PostgreSQL implementation of the stores.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::models::{EventRow, SubmissionRow, SummaryRow, event_from_row, summary_from_row};
use super::{EventQuery, EventStore, SortOrder, SubmissionStore, SummaryStore};
use crate::config::AdminConfig;
use crate::domain::{Event, NewSubmission, NewSummary, PeriodType, Submission, Summary};
use crate::error::AdminError;

const SUBMISSION_COLUMNS: &str = "id, couple_names, couple_instagram, wedding_date, \
     wedding_location, vendor_instagrams, favorite_detail, photo_urls, terms_accepted, \
     status, created_at";

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool from configuration and optionally applies
    /// the embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Store`] if the database is unreachable or a
    /// migration fails.
    pub async fn connect(config: &AdminConfig) -> Result<Self, AdminError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;

        if config.run_migrations {
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .map_err(|e| AdminError::Store(format!("migration failed: {e}")))?;
            tracing::info!("database migrations applied");
        }

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl EventStore for PostgresStore {
    async fn query_events(&self, query: &EventQuery) -> Result<Vec<Event>, AdminError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT id, event_name, user_id, screen_name, event_data, created_at \
             FROM analytics_events WHERE TRUE",
        );
        if !query.names.is_empty() {
            qb.push(" AND event_name = ANY(")
                .push_bind(query.names.clone())
                .push(")");
        }
        if let Some(window) = query.window {
            qb.push(" AND created_at >= ").push_bind(window.start);
            if let Some(end) = window.end {
                qb.push(" AND created_at < ").push_bind(end);
            }
        }
        qb.push(match query.order {
            SortOrder::OldestFirst => " ORDER BY created_at ASC",
            SortOrder::NewestFirst => " ORDER BY created_at DESC",
        });
        if let Some(limit) = query.limit {
            qb.push(" LIMIT ").push_bind(limit);
        }

        let rows = qb
            .build_query_as::<EventRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(event_from_row).collect())
    }
}

#[async_trait]
impl SubmissionStore for PostgresStore {
    async fn insert_submission(
        &self,
        submission: NewSubmission,
    ) -> Result<Submission, AdminError> {
        let sql = format!(
            "INSERT INTO submissions (couple_names, couple_instagram, wedding_date, \
             wedding_location, vendor_instagrams, favorite_detail, photo_urls, terms_accepted, \
             status) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending') \
             RETURNING {SUBMISSION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, SubmissionRow>(&sql)
            .bind(submission.couple_names)
            .bind(submission.couple_instagram)
            .bind(submission.wedding_date)
            .bind(submission.wedding_location)
            .bind(submission.vendor_instagrams)
            .bind(submission.favorite_detail)
            .bind(submission.photo_urls)
            .bind(submission.terms_accepted)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    async fn list_submissions(&self, limit: Option<i64>) -> Result<Vec<Submission>, AdminError> {
        let sql = format!(
            "SELECT {SUBMISSION_COLUMNS} FROM submissions ORDER BY created_at DESC LIMIT $1"
        );
        // LIMIT NULL means no limit in PostgreSQL.
        let rows = sqlx::query_as::<_, SubmissionRow>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Submission::from).collect())
    }
}

#[async_trait]
impl SummaryStore for PostgresStore {
    async fn insert_summary(&self, summary: NewSummary) -> Result<Summary, AdminError> {
        let row = sqlx::query_as::<_, SummaryRow>(
            "INSERT INTO analytics_summaries \
             (period_type, period_start, period_end, summary_text, key_metrics) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, period_type, period_start, period_end, summary_text, key_metrics, created_at",
        )
        .bind(summary.period_type.as_str())
        .bind(summary.period_start)
        .bind(summary.period_end)
        .bind(&summary.summary_text)
        .bind(&summary.key_metrics)
        .fetch_one(&self.pool)
        .await?;

        summary_from_row(row)
    }

    async fn latest_summary(
        &self,
        period_type: PeriodType,
        since: NaiveDate,
    ) -> Result<Option<Summary>, AdminError> {
        let row = sqlx::query_as::<_, SummaryRow>(
            "SELECT id, period_type, period_start, period_end, summary_text, key_metrics, created_at \
             FROM analytics_summaries WHERE period_type = $1 AND period_start >= $2 \
             ORDER BY created_at DESC LIMIT 1",
        )
        .bind(period_type.as_str())
        .bind(since)
        .fetch_optional(&self.pool)
        .await?;

        row.map(summary_from_row).transpose()
    }
}
