use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public account data. Credentials never leave the users table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub age: Option<i64>,
    pub sex: String,
    pub diet_type: String,
    pub smoking_history: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial profile update. `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub phone: Option<String>,
    pub address: Option<String>,
    pub age: Option<i64>,
    pub sex: Option<String>,
    pub diet_type: Option<String>,
    pub smoking_history: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.phone.is_none()
            && self.address.is_none()
            && self.age.is_none()
            && self.sex.is_none()
            && self.diet_type.is_none()
            && self.smoking_history.is_none()
    }
}
