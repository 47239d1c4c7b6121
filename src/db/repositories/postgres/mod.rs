//! Postgres repository implementation using Diesel.
//!
//! This module implements the repository traits against a Postgres database.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Automatic retry for transient failures
//! - Connection health monitoring
//! - Automatic migration execution
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
//! - `PG_MAX_RETRIES`: Maximum retry attempts for transient failures (default: 3)
//! - `PG_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 100)

use async_trait::async_trait;
use chrono::{Days, NaiveDate, NaiveTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::task;

use crate::api::{AircraftId, BookingId, DefectId, MemberId, StaffId};
use crate::db::repository::{
    BookingRepository, DefectRepository, DirectoryRepository, ErrorContext, FullRepository,
    MemberRepository, RepositoryError, RepositoryResult,
};
use crate::models::booking::{Booking, BookingStatus, NewBooking, UpdateBooking};
use crate::models::resource::{
    Aircraft, AircraftDefect, DefectStatus, Member, NewDefect, NewMember, Staff, UpdateMember,
};

mod models;
mod schema;

use models::*;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
    /// Maximum number of retry attempts for transient failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds (doubles with each retry)
    pub retry_delay_ms: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let max_pool_size = std::env::var("PG_POOL_MAX")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        let min_pool_size = std::env::var("PG_POOL_MIN")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(1);

        let connection_timeout_sec = std::env::var("PG_CONN_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let idle_timeout_sec = std::env::var("PG_IDLE_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(600);

        let max_retries = std::env::var("PG_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(3);

        let retry_delay_ms = std::env::var("PG_RETRY_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(100);

        Ok(Self {
            database_url,
            max_pool_size,
            min_pool_size,
            connection_timeout_sec,
            idle_timeout_sec,
            max_retries,
            retry_delay_ms,
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Pool health statistics.
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    /// Number of connections currently in use
    pub connections_in_use: u32,
    /// Number of idle connections
    pub idle_connections: u32,
    /// Total number of connections in the pool
    pub total_connections: u32,
    /// Maximum pool size
    pub max_size: u32,
    /// Total successful queries executed
    pub total_queries: u64,
    /// Total failed queries
    pub failed_queries: u64,
    /// Total retried operations
    pub retried_operations: u64,
}

/// Diesel-backed repository for Postgres.
///
/// This repository implementation provides:
/// - Connection pooling with configurable limits
/// - Automatic retry for transient failures
/// - Health monitoring and statistics
/// - Automatic schema migrations
#[derive(Clone)]
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
    // Metrics counters
    total_queries: std::sync::Arc<AtomicU64>,
    failed_queries: std::sync::Arc<AtomicU64>,
    retried_operations: std::sync::Arc<AtomicU64>,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true) // Validate connections before use
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        // Run migrations once during initialization
        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }

        Ok(Self {
            pool,
            config,
            total_queries: std::sync::Arc::new(AtomicU64::new(0)),
            failed_queries: std::sync::Arc::new(AtomicU64::new(0)),
            retried_operations: std::sync::Arc::new(AtomicU64::new(0)),
        })
    }

    /// Run pending database migrations.
    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;

        Ok(())
    }

    /// Execute a database operation with automatic retry for transient failures.
    ///
    /// Retries up to `max_retries` times when a retryable error occurs
    /// (connection errors, timeouts, serialization failures).
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        let pool = self.pool.clone();
        let max_retries = self.config.max_retries;
        let retry_delay_ms = self.config.retry_delay_ms;
        let total_queries = self.total_queries.clone();
        let failed_queries = self.failed_queries.clone();
        let retried_operations = self.retried_operations.clone();

        task::spawn_blocking(move || {
            let mut last_error = None;
            let mut retry_delay = Duration::from_millis(retry_delay_ms);

            for attempt in 0..=max_retries {
                if attempt > 0 {
                    retried_operations.fetch_add(1, Ordering::Relaxed);
                    std::thread::sleep(retry_delay);
                    retry_delay *= 2; // Exponential backoff
                }

                // Get connection
                let mut conn = match pool.get() {
                    Ok(c) => c,
                    Err(e) => {
                        let err = RepositoryError::connection_with_context(
                            e.to_string(),
                            ErrorContext::new("get_connection")
                                .with_details(format!("attempt={}", attempt + 1))
                                .retryable(),
                        );
                        if attempt < max_retries {
                            last_error = Some(err);
                            continue;
                        }
                        failed_queries.fetch_add(1, Ordering::Relaxed);
                        return Err(err);
                    }
                };

                // Execute the operation
                total_queries.fetch_add(1, Ordering::Relaxed);
                match f.clone()(&mut conn) {
                    Ok(result) => return Ok(result),
                    Err(e) if e.is_retryable() && attempt < max_retries => {
                        last_error = Some(e);
                        continue;
                    }
                    Err(e) => {
                        failed_queries.fetch_add(1, Ordering::Relaxed);
                        return Err(e);
                    }
                }
            }

            failed_queries.fetch_add(1, Ordering::Relaxed);
            Err(last_error.unwrap_or_else(|| {
                RepositoryError::internal("Max retries exceeded with no error captured")
            }))
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }

    /// Get pool health statistics.
    pub fn get_pool_stats(&self) -> PoolStats {
        let state = self.pool.state();
        PoolStats {
            connections_in_use: state.connections - state.idle_connections,
            idle_connections: state.idle_connections,
            total_connections: state.connections,
            max_size: self.config.max_pool_size,
            total_queries: self.total_queries.load(Ordering::Relaxed),
            failed_queries: self.failed_queries.load(Ordering::Relaxed),
            retried_operations: self.retried_operations.load(Ordering::Relaxed),
        }
    }

    fn booking_not_found(id: BookingId) -> RepositoryError {
        RepositoryError::not_found_with_context(
            "booking not found",
            ErrorContext::default()
                .with_entity("booking")
                .with_entity_id(id),
        )
    }
}

#[async_trait]
impl BookingRepository for PostgresRepository {
    async fn list_bookings(&self) -> RepositoryResult<Vec<Booking>> {
        let rows: Vec<BookingRow> = self
            .with_conn(|conn| {
                schema::bookings::table
                    .order((
                        schema::bookings::start_at.asc(),
                        schema::bookings::id.asc(),
                    ))
                    .select(BookingRow::as_select())
                    .load(conn)
                    .map_err(RepositoryError::from)
            })
            .await?;
        rows.into_iter().map(BookingRow::into_domain).collect()
    }

    async fn bookings_on_day(&self, day: NaiveDate) -> RepositoryResult<Vec<Booking>> {
        let day_start = day.and_time(NaiveTime::MIN).and_utc();
        let day_end = day
            .checked_add_days(Days::new(1))
            .ok_or_else(|| RepositoryError::validation("Day out of range"))?
            .and_time(NaiveTime::MIN)
            .and_utc();

        let rows: Vec<BookingRow> = self
            .with_conn(move |conn| {
                schema::bookings::table
                    .filter(schema::bookings::start_at.ge(day_start))
                    .filter(schema::bookings::start_at.lt(day_end))
                    .order((
                        schema::bookings::start_at.asc(),
                        schema::bookings::id.asc(),
                    ))
                    .select(BookingRow::as_select())
                    .load(conn)
                    .map_err(RepositoryError::from)
            })
            .await?;
        rows.into_iter().map(BookingRow::into_domain).collect()
    }

    async fn get_booking(&self, id: BookingId) -> RepositoryResult<Booking> {
        let row: Option<BookingRow> = self
            .with_conn(move |conn| {
                schema::bookings::table
                    .find(id.value())
                    .select(BookingRow::as_select())
                    .first(conn)
                    .optional()
                    .map_err(RepositoryError::from)
            })
            .await?;
        row.ok_or_else(|| Self::booking_not_found(id))?.into_domain()
    }

    async fn insert_booking(&self, new: NewBooking) -> RepositoryResult<Booking> {
        let row = NewBookingRow::from_domain(&new);
        let inserted: BookingRow = self
            .with_conn(move |conn| {
                diesel::insert_into(schema::bookings::table)
                    .values(&row)
                    .returning(BookingRow::as_returning())
                    .get_result(conn)
                    .map_err(RepositoryError::from)
            })
            .await?;
        inserted.into_domain()
    }

    async fn update_booking(
        &self,
        id: BookingId,
        update: UpdateBooking,
    ) -> RepositoryResult<Booking> {
        let updated: Option<BookingRow> = self
            .with_conn(move |conn| {
                diesel::update(schema::bookings::table.find(id.value()))
                    .set((
                        schema::bookings::start_at.eq(update.start),
                        schema::bookings::end_at.eq(update.end),
                        schema::bookings::maintenance.eq(update.maintenance),
                        schema::bookings::instructor_id
                            .eq(update.instructor_id.map(|v| v.value())),
                        schema::bookings::member_id.eq(update.member_id.map(|v| v.value())),
                        schema::bookings::aircraft_id.eq(update.aircraft_id.map(|v| v.value())),
                        schema::bookings::comments.eq(update.comments.clone()),
                        schema::bookings::flight_type
                            .eq(update.flight_type.map(|t| t.as_str().to_string())),
                        schema::bookings::updated_at.eq(Utc::now()),
                    ))
                    .returning(BookingRow::as_returning())
                    .get_result(conn)
                    .optional()
                    .map_err(RepositoryError::from)
            })
            .await?;
        updated
            .ok_or_else(|| Self::booking_not_found(id))?
            .into_domain()
    }

    async fn set_booking_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> RepositoryResult<Booking> {
        let updated: Option<BookingRow> = self
            .with_conn(move |conn| {
                diesel::update(schema::bookings::table.find(id.value()))
                    .set((
                        schema::bookings::status.eq(status.as_str()),
                        schema::bookings::updated_at.eq(Utc::now()),
                    ))
                    .returning(BookingRow::as_returning())
                    .get_result(conn)
                    .optional()
                    .map_err(RepositoryError::from)
            })
            .await?;
        updated
            .ok_or_else(|| Self::booking_not_found(id))?
            .into_domain()
    }
}

#[async_trait]
impl DirectoryRepository for PostgresRepository {
    async fn list_staff(&self) -> RepositoryResult<Vec<Staff>> {
        let rows: Vec<StaffRow> = self
            .with_conn(|conn| {
                schema::staff::table
                    .order(schema::staff::name.asc())
                    .select(StaffRow::as_select())
                    .load(conn)
                    .map_err(RepositoryError::from)
            })
            .await?;
        rows.into_iter().map(StaffRow::into_domain).collect()
    }

    async fn get_staff(&self, id: StaffId) -> RepositoryResult<Staff> {
        let row: Option<StaffRow> = self
            .with_conn(move |conn| {
                schema::staff::table
                    .find(id.value())
                    .select(StaffRow::as_select())
                    .first(conn)
                    .optional()
                    .map_err(RepositoryError::from)
            })
            .await?;
        row.ok_or_else(|| {
            RepositoryError::not_found_with_context(
                "staff not found",
                ErrorContext::default()
                    .with_entity("staff")
                    .with_entity_id(id),
            )
        })?
        .into_domain()
    }

    async fn list_aircraft(&self) -> RepositoryResult<Vec<Aircraft>> {
        let rows: Vec<AircraftRow> = self
            .with_conn(|conn| {
                schema::aircraft::table
                    .order((
                        schema::aircraft::model.asc(),
                        schema::aircraft::registration.asc(),
                    ))
                    .select(AircraftRow::as_select())
                    .load(conn)
                    .map_err(RepositoryError::from)
            })
            .await?;
        rows.into_iter().map(AircraftRow::into_domain).collect()
    }

    async fn get_aircraft(&self, id: AircraftId) -> RepositoryResult<Aircraft> {
        let row: Option<AircraftRow> = self
            .with_conn(move |conn| {
                schema::aircraft::table
                    .find(id.value())
                    .select(AircraftRow::as_select())
                    .first(conn)
                    .optional()
                    .map_err(RepositoryError::from)
            })
            .await?;
        row.ok_or_else(|| {
            RepositoryError::not_found_with_context(
                "aircraft not found",
                ErrorContext::default()
                    .with_entity("aircraft")
                    .with_entity_id(id),
            )
        })?
        .into_domain()
    }
}

#[async_trait]
impl MemberRepository for PostgresRepository {
    async fn list_members(&self) -> RepositoryResult<Vec<Member>> {
        let rows: Vec<MemberRow> = self
            .with_conn(|conn| {
                schema::members::table
                    .order(schema::members::name.asc())
                    .select(MemberRow::as_select())
                    .load(conn)
                    .map_err(RepositoryError::from)
            })
            .await?;
        rows.into_iter().map(MemberRow::into_domain).collect()
    }

    async fn get_member(&self, id: MemberId) -> RepositoryResult<Member> {
        let row: Option<MemberRow> = self
            .with_conn(move |conn| {
                schema::members::table
                    .find(id.value())
                    .select(MemberRow::as_select())
                    .first(conn)
                    .optional()
                    .map_err(RepositoryError::from)
            })
            .await?;
        row.ok_or_else(|| {
            RepositoryError::not_found_with_context(
                "member not found",
                ErrorContext::default()
                    .with_entity("member")
                    .with_entity_id(id),
            )
        })?
        .into_domain()
    }

    async fn search_members(&self, query: &str, limit: usize) -> RepositoryResult<Vec<Member>> {
        let pattern = format!("%{}%", query.replace('%', "\\%").replace('_', "\\_"));
        let rows: Vec<MemberRow> = self
            .with_conn(move |conn| {
                schema::members::table
                    .filter(schema::members::name.ilike(pattern.clone()))
                    .order(schema::members::name.asc())
                    .limit(limit as i64)
                    .select(MemberRow::as_select())
                    .load(conn)
                    .map_err(RepositoryError::from)
            })
            .await?;
        rows.into_iter().map(MemberRow::into_domain).collect()
    }

    async fn insert_member(&self, new: NewMember) -> RepositoryResult<Member> {
        let row = NewMemberRow::from_domain(&new);
        let inserted: MemberRow = self
            .with_conn(move |conn| {
                diesel::insert_into(schema::members::table)
                    .values(&row)
                    .returning(MemberRow::as_returning())
                    .get_result(conn)
                    .map_err(RepositoryError::from)
            })
            .await?;
        inserted.into_domain()
    }

    async fn update_member(
        &self,
        id: MemberId,
        update: UpdateMember,
    ) -> RepositoryResult<Member> {
        let updated: Option<MemberRow> = self
            .with_conn(move |conn| {
                diesel::update(schema::members::table.find(id.value()))
                    .set((
                        schema::members::name.eq(update.name.clone()),
                        schema::members::email.eq(update.email.clone()),
                        schema::members::phone.eq(update.phone.clone()),
                        schema::members::status.eq(update.status.as_str()),
                    ))
                    .returning(MemberRow::as_returning())
                    .get_result(conn)
                    .optional()
                    .map_err(RepositoryError::from)
            })
            .await?;
        updated
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    "member not found",
                    ErrorContext::default()
                        .with_entity("member")
                        .with_entity_id(id),
                )
            })?
            .into_domain()
    }
}

#[async_trait]
impl DefectRepository for PostgresRepository {
    async fn list_defects(&self) -> RepositoryResult<Vec<AircraftDefect>> {
        let rows: Vec<DefectRow> = self
            .with_conn(|conn| {
                schema::aircraft_defects::table
                    .order(schema::aircraft_defects::reported_at.desc())
                    .select(DefectRow::as_select())
                    .load(conn)
                    .map_err(RepositoryError::from)
            })
            .await?;
        rows.into_iter().map(DefectRow::into_domain).collect()
    }

    async fn defects_for_aircraft(
        &self,
        aircraft_id: AircraftId,
    ) -> RepositoryResult<Vec<AircraftDefect>> {
        let rows: Vec<DefectRow> = self
            .with_conn(move |conn| {
                schema::aircraft_defects::table
                    .filter(schema::aircraft_defects::aircraft_id.eq(aircraft_id.value()))
                    .order(schema::aircraft_defects::reported_at.desc())
                    .select(DefectRow::as_select())
                    .load(conn)
                    .map_err(RepositoryError::from)
            })
            .await?;
        rows.into_iter().map(DefectRow::into_domain).collect()
    }

    async fn insert_defect(&self, new: NewDefect) -> RepositoryResult<AircraftDefect> {
        let row = NewDefectRow {
            id: uuid::Uuid::new_v4(),
            aircraft_id: new.aircraft_id.value(),
            description: new.description,
            reported_by: new.reported_by,
            status: DefectStatus::Open.as_str().to_string(),
        };
        let inserted: DefectRow = self
            .with_conn(move |conn| {
                diesel::insert_into(schema::aircraft_defects::table)
                    .values(&row)
                    .returning(DefectRow::as_returning())
                    .get_result(conn)
                    .map_err(RepositoryError::from)
            })
            .await?;
        inserted.into_domain()
    }

    async fn set_defect_status(
        &self,
        id: DefectId,
        status: DefectStatus,
    ) -> RepositoryResult<AircraftDefect> {
        let updated: Option<DefectRow> = self
            .with_conn(move |conn| {
                diesel::update(schema::aircraft_defects::table.find(id.value()))
                    .set(schema::aircraft_defects::status.eq(status.as_str()))
                    .returning(DefectRow::as_returning())
                    .get_result(conn)
                    .optional()
                    .map_err(RepositoryError::from)
            })
            .await?;
        updated
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    "defect not found",
                    ErrorContext::default()
                        .with_entity("defect")
                        .with_entity_id(id),
                )
            })?
            .into_domain()
    }
}

#[async_trait]
impl FullRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(RepositoryError::from)
        })
        .await
    }
}
