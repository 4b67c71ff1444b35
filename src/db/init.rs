use sqlx::sqlite::SqliteQueryResult;

pub async fn create_portfolio_transactions(
    connection: &sqlx::Pool<sqlx::Sqlite>,
) -> Result<SqliteQueryResult, sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS portfolio_transactions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            ticker TEXT NOT NULL,
            shares REAL NOT NULL,
            price REAL NOT NULL,
            transaction_date TEXT,
            account_type TEXT NOT NULL DEFAULT 'general',
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(connection)
    .await
}

pub async fn create_dividend_forecasts(
    connection: &sqlx::Pool<sqlx::Sqlite>,
) -> Result<SqliteQueryResult, sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS dividend_forecasts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            ticker TEXT NOT NULL,
            company_name TEXT,
            dividend_per_share REAL NOT NULL DEFAULT 0,
            rights_month INTEGER,
            payment_month INTEGER,
            announced_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(connection)
    .await
}

pub async fn init_schema(connection: &sqlx::Pool<sqlx::Sqlite>) -> Result<(), sqlx::Error> {
    create_portfolio_transactions(connection).await?;
    create_dividend_forecasts(connection).await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_portfolio_transactions_user ON portfolio_transactions(user_id)",
    )
    .execute(connection)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_dividend_forecasts_ticker ON dividend_forecasts(ticker)",
    )
    .execute(connection)
    .await?;

    Ok(())
}
