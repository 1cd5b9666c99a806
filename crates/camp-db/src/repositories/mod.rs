// All repository functions are generic over `E: Executor<'e, Database = Postgres>`
// so they accept both a `&PgPool` (direct query) and a `&mut Transaction` (atomic operations).

pub mod camp;
pub mod child;
pub mod pregnant_woman;
pub mod setting;
pub mod stats;
pub mod token;
pub mod user;
