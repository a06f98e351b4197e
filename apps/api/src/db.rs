use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the tables and indexes used by the store. Idempotent; safe to
/// run at every startup. Nothing is ever dropped here.
pub async fn init_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            profile_id UUID PRIMARY KEY,
            domain TEXT NOT NULL,
            full_name TEXT NOT NULL,
            email TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL,
            data JSONB NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS job_descriptions (
            jd_id UUID PRIMARY KEY,
            domain TEXT NOT NULL,
            company TEXT NOT NULL,
            title TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL,
            jd_text TEXT NOT NULL,
            skills JSONB NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    for index in [
        "CREATE INDEX IF NOT EXISTS idx_profiles_domain ON profiles(domain)",
        "CREATE INDEX IF NOT EXISTS idx_profiles_email ON profiles(email)",
        "CREATE INDEX IF NOT EXISTS idx_jds_domain ON job_descriptions(domain)",
        "CREATE INDEX IF NOT EXISTS idx_jds_updated ON job_descriptions(updated_at)",
    ] {
        sqlx::query(index).execute(pool).await?;
    }

    info!("Database schema ready");
    Ok(())
}
