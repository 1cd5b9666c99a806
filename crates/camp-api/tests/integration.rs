// Single integration test binary; modules below share `common`.
//
// Tests marked `#[ignore]` need PostgreSQL at `TEST_DATABASE_URL`:
//     cargo test -p camp-api --test integration -- --ignored

mod auth_tests;
mod common;
mod household_tests;
