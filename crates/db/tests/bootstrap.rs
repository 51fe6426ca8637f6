use sqlx::PgPool;

/// Connect, migrate, verify schema.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    graphene_db::health_check(&pool).await.unwrap();

    let statuses: Vec<(i16, String)> =
        sqlx::query_as("SELECT id, name FROM alert_statuses ORDER BY id")
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(
        statuses,
        vec![
            (1, "new".to_string()),
            (2, "acknowledged".to_string()),
            (3, "resolved".to_string()),
        ]
    );
}

/// Every table carries the columns the models map.
#[sqlx::test(migrations = "./migrations")]
async fn test_tables_exist(pool: PgPool) {
    for table in ["patients", "pressure_datasets", "pressure_frames", "alerts"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}
