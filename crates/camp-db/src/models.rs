use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Camp model - a physical registration/distribution location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Camp {
    pub id: i32,
    pub name: String,
    pub location: String,
}

/// Child record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    pub id: i32,
    pub full_name: String,
    /// Unique identity number of the child
    pub id_number: String,
    /// ISO `YYYY-MM-DD`
    pub date_of_birth: String,
    pub gender: String,
    pub health_status: String,
    pub father_name: String,
    pub father_id: String,
    pub mother_name: String,
    pub mother_id: String,
    pub is_breastfeeding: bool,
    pub health_notes: Option<String>,
    pub camp_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Insert/update payload for `children`, already validated and normalized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChild {
    pub full_name: String,
    pub id_number: String,
    pub date_of_birth: String,
    pub gender: String,
    pub health_status: String,
    pub father_name: String,
    pub father_id: String,
    pub mother_name: String,
    pub mother_id: String,
    pub is_breastfeeding: bool,
    pub health_notes: Option<String>,
    pub camp_id: Option<i32>,
}

impl From<Child> for NewChild {
    fn from(child: Child) -> Self {
        Self {
            full_name: child.full_name,
            id_number: child.id_number,
            date_of_birth: child.date_of_birth,
            gender: child.gender,
            health_status: child.health_status,
            father_name: child.father_name,
            father_id: child.father_id,
            mother_name: child.mother_name,
            mother_id: child.mother_id,
            is_breastfeeding: child.is_breastfeeding,
            health_notes: child.health_notes,
            camp_id: child.camp_id,
        }
    }
}

/// Pregnant woman record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PregnantWoman {
    pub id: i32,
    pub full_name: String,
    pub id_number: String,
    pub health_status: String,
    /// Month of pregnancy, 1 through 9
    pub pregnancy_month: i32,
    pub spouse_name: String,
    pub spouse_id: String,
    pub health_notes: Option<String>,
    pub camp_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Insert/update payload for `pregnant_women`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPregnantWoman {
    pub full_name: String,
    pub id_number: String,
    pub health_status: String,
    pub pregnancy_month: i32,
    pub spouse_name: String,
    pub spouse_id: String,
    pub health_notes: Option<String>,
    pub camp_id: Option<i32>,
}

impl From<PregnantWoman> for NewPregnantWoman {
    fn from(woman: PregnantWoman) -> Self {
        Self {
            full_name: woman.full_name,
            id_number: woman.id_number,
            health_status: woman.health_status,
            pregnancy_month: woman.pregnancy_month,
            spouse_name: woman.spouse_name,
            spouse_id: woman.spouse_id,
            health_notes: woman.health_notes,
            camp_id: woman.camp_id,
        }
    }
}

/// Role stored in the `user_role` Postgres enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

impl UserRole {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// User account as exposed by the API (never carries the password hash)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: Uuid,
    pub username: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User row including the bcrypt hash, for login only
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserCredentials {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserCredentials> for UserAccount {
    fn from(credentials: UserCredentials) -> Self {
        Self {
            id: credentials.id,
            username: credentials.username,
            role: credentials.role,
            created_at: credentials.created_at,
            updated_at: credentials.updated_at,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RefreshTokenRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// A single `system_settings` row
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct SettingEntry {
    pub key: String,
    pub value: String,
}

/// Scalar totals for the dashboard
#[derive(Debug, Clone, Copy, Default, sqlx::FromRow)]
pub struct DashboardTotals {
    pub total_children: i64,
    pub total_pregnant_women: i64,
    pub total_camps: i64,
    pub total_mothers: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct GenderCount {
    pub gender: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MonthCount {
    pub month: i32,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}
