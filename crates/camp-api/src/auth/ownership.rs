//! Household ownership checks for self-service edits.
//!
//! Public edit and delete routes carry no token. Instead the caller presents
//! an identity number (`requesterId`) that must match one of the two owner
//! fields of the record: a parent of the child, or the woman or her husband.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use camp_db::models::{Child, NewChild, NewPregnantWoman, PregnantWoman};
use serde::Deserialize;

use crate::{error::ApiError, normalization::normalize_id_number};

pub const NOT_HOUSEHOLD_MEMBER: &str = "You can only modify records belonging to your household";

/// A record owned by a household through two identity numbers
pub trait HouseholdRecord {
    fn owner_ids(&self) -> [&str; 2];
}

impl HouseholdRecord for Child {
    fn owner_ids(&self) -> [&str; 2] {
        [&self.father_id, &self.mother_id]
    }
}

impl HouseholdRecord for NewChild {
    fn owner_ids(&self) -> [&str; 2] {
        [&self.father_id, &self.mother_id]
    }
}

impl HouseholdRecord for PregnantWoman {
    fn owner_ids(&self) -> [&str; 2] {
        [&self.id_number, &self.spouse_id]
    }
}

impl HouseholdRecord for NewPregnantWoman {
    fn owner_ids(&self) -> [&str; 2] {
        [&self.id_number, &self.spouse_id]
    }
}

/// Ok when `requester` equals either owner field after normalization
pub fn ensure_household_member<R>(record: &R, requester: &HouseholdRequester) -> Result<(), ApiError>
where
    R: HouseholdRecord + ?Sized,
{
    let is_member = record
        .owner_ids()
        .iter()
        .map(|id| normalize_id_number(id))
        .any(|id| !id.is_empty() && id == requester.0);

    if is_member {
        Ok(())
    } else {
        Err(ApiError::Forbidden(NOT_HOUSEHOLD_MEMBER.to_string()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequesterQuery {
    requester_id: Option<String>,
}

/// Normalized `requesterId` query parameter; 400 when missing or blank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HouseholdRequester(pub String);

impl HouseholdRequester {
    pub fn new(raw: &str) -> Result<Self, ApiError> {
        let id = normalize_id_number(raw);
        if id.is_empty() {
            return Err(ApiError::invalid_field("requesterId", "requesterId is required"));
        }
        Ok(Self(id))
    }
}

impl<S> FromRequestParts<S> for HouseholdRequester
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<RequesterQuery>::try_from_uri(&parts.uri)
            .map_err(|_| ApiError::Validation("Invalid query string".to_string()))?;

        Self::new(query.requester_id.as_deref().unwrap_or_default())
    }
}
