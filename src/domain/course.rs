//! Course domain model

use crate::error::Result;
use crate::validation::{self, COURSE_RULES};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// Course entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials_needed: Option<String>,
    pub user_id: i64,
}

/// Validated input for creating or updating a course
///
/// On update, `None` optional fields keep the stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseInput {
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: i64,
}

impl CourseInput {
    /// Validate a raw request payload and extract the course fields.
    pub fn from_payload(payload: &Value) -> Result<Self> {
        COURSE_RULES.check(payload)?;
        Ok(Self {
            title: validation::required_text(payload, "title")?,
            description: validation::required_text(payload, "description")?,
            estimated_time: validation::optional_text(payload, "estimatedTime"),
            materials_needed: validation::optional_text(payload, "materialsNeeded"),
            user_id: validation::required_integer(payload, "userId")?,
        })
    }

    /// Build the entity this input produces under the given id
    pub fn into_course(self, id: i64) -> Course {
        Course {
            id,
            title: self.title,
            description: self.description,
            estimated_time: self.estimated_time,
            materials_needed: self.materials_needed,
            user_id: self.user_id,
        }
    }
}
