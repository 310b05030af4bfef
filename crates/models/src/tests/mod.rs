
/// Database tests need a reachable PostgreSQL; `SKIP_DB_TESTS` or a missing
/// `DATABASE_URL` turns them into no-ops.
pub(crate) fn db_tests_enabled() -> bool {
    let _ = dotenvy::dotenv();
    std::env::var("SKIP_DB_TESTS").is_err() && std::env::var("DATABASE_URL").is_ok()
}
