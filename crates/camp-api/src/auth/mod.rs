pub mod cookies;
pub mod jwt;
pub mod middleware;
pub mod ownership;
pub mod password;
pub mod refresh_token;
pub mod routes;
pub mod service;
pub mod validation;

pub use middleware::{AdminUser, AuthUser};
pub use ownership::{HouseholdRecord, HouseholdRequester, ensure_household_member};
pub use routes::routes;
