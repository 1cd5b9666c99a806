use serde::Deserialize;
use validator::Validate;

use crate::validation::non_blank;

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateCamp {
    #[validate(custom(function = "non_blank"))]
    pub name: String,
    #[validate(custom(function = "non_blank"))]
    pub location: String,
}

/// Partial update; absent fields keep their stored value
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateCamp {
    #[validate(custom(function = "non_blank"))]
    pub name: Option<String>,
    #[validate(custom(function = "non_blank"))]
    pub location: Option<String>,
}
