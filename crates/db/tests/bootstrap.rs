use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify the workflow tables.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    arte_educa_db::health_check(&pool).await.unwrap();

    let tables = ["projetos", "termos_compromisso", "declaracoes_cre", "escolas"];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// The `conteudo` column must accept and return JSONB.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_jsonb_round_trip(pool: PgPool) {
    let result: (serde_json::Value,) =
        sqlx::query_as("SELECT '{\"identificacao\": {\"cre\": \"Goiânia\"}}'::jsonb")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(result.0["identificacao"]["cre"], "Goiânia");
}
