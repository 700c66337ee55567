use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::{info, warn};
use tracing::log::LevelFilter;
use tera::Tera;

use crate::config::Config;
use crate::domain::models::user::{User, ROLE_ADMIN};
use crate::error::AppError;
use crate::state::{AppState, Repositories};
use crate::infra::email::{email_notifier::{EmailNotifier, PAYMENT_TEMPLATE, REGISTRATION_TEMPLATE}, http_email_service::HttpEmailService};
use crate::infra::repositories::{
    postgres_catalog_repo::{PostgresCategoryRepo, PostgresLocationRepo},
    postgres_event_repo::PostgresEventRepo, postgres_rating_repo::PostgresRatingRepo,
    postgres_registration_repo::PostgresRegistrationRepo, postgres_session_repo::PostgresSessionRepo,
    postgres_user_repo::PostgresUserRepo,
    sqlite_catalog_repo::{SqliteCategoryRepo, SqliteLocationRepo},
    sqlite_event_repo::SqliteEventRepo, sqlite_rating_repo::SqliteRatingRepo,
    sqlite_registration_repo::SqliteRegistrationRepo, sqlite_session_repo::SqliteSessionRepo,
    sqlite_user_repo::SqliteUserRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let repos = connect_repositories(&config.database_url).await;

    let email_service = Arc::new(HttpEmailService::new(
        config.mail_service_url.clone(),
        config.mail_service_token.clone(),
        config.mail_from.clone(),
    ));
    let notifier = Arc::new(EmailNotifier::new(email_service, Arc::new(load_templates())));

    let state = AppState::new(config.clone(), repos, notifier);

    if let Err(e) = seed_admin(&state).await {
        warn!("Failed to seed admin account: {}", e);
    }

    state
}

pub fn load_templates() -> Tera {
    let mut tera = Tera::default();
    tera.add_raw_template(REGISTRATION_TEMPLATE, include_str!("../templates/registration_confirmation.html"))
        .expect("Failed to load registration confirmation template");
    tera.add_raw_template(PAYMENT_TEMPLATE, include_str!("../templates/payment_confirmation.html"))
        .expect("Failed to load payment confirmation template");
    tera
}

/// Picks the storage backend from the URL scheme, then migrates it.
pub async fn connect_repositories(database_url: &str) -> Repositories {
    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;
        postgres_repositories(pool)
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;
        sqlite_repositories(pool)
    }
}

pub fn sqlite_repositories(pool: SqlitePool) -> Repositories {
    Repositories {
        user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
        event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
        session_repo: Arc::new(SqliteSessionRepo::new(pool.clone())),
        registration_repo: Arc::new(SqliteRegistrationRepo::new(pool.clone())),
        rating_repo: Arc::new(SqliteRatingRepo::new(pool.clone())),
        category_repo: Arc::new(SqliteCategoryRepo::new(pool.clone())),
        location_repo: Arc::new(SqliteLocationRepo::new(pool)),
    }
}

pub fn postgres_repositories(pool: PgPool) -> Repositories {
    Repositories {
        user_repo: Arc::new(PostgresUserRepo::new(pool.clone())),
        event_repo: Arc::new(PostgresEventRepo::new(pool.clone())),
        session_repo: Arc::new(PostgresSessionRepo::new(pool.clone())),
        registration_repo: Arc::new(PostgresRegistrationRepo::new(pool.clone())),
        rating_repo: Arc::new(PostgresRatingRepo::new(pool.clone())),
        category_repo: Arc::new(PostgresCategoryRepo::new(pool.clone())),
        location_repo: Arc::new(PostgresLocationRepo::new(pool)),
    }
}

/// Creates the configured admin account once; an existing username is left untouched.
pub async fn seed_admin(state: &AppState) -> Result<(), AppError> {
    let (Some(username), Some(password)) = (&state.config.admin_username, &state.config.admin_password) else {
        return Ok(());
    };

    if state.user_repo.find_by_username(username).await?.is_some() {
        return Ok(());
    }

    let hash = state.auth_service.hash_password(password)?;
    let mut admin = User::new(username.clone(), hash);
    admin.role = ROLE_ADMIN.to_string();
    state.user_repo.create(&admin).await?;

    info!("Seeded admin account '{}'", username);
    Ok(())
}

pub async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

pub async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
