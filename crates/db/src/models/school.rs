//! School record model and insert DTO.

use schoolhub_core::school::NewSchool;
use schoolhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `schools` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct School {
    pub id: DbId,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: i64,
    /// Public path of the uploaded image, e.g. `/schoolImages/<name>`.
    pub image: Option<String>,
    pub email_id: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a school.
#[derive(Debug, Clone)]
pub struct CreateSchool {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: i64,
    pub image: Option<String>,
    pub email_id: String,
}

impl CreateSchool {
    pub fn new(school: NewSchool, image: Option<String>) -> Self {
        Self {
            name: school.name,
            address: school.address,
            city: school.city,
            state: school.state,
            contact: school.contact,
            image,
            email_id: school.email_id,
        }
    }
}
