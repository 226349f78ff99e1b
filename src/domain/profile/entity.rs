use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Per-user profile record. Owned by the profile service; read here only to
/// resolve the caller before post mutations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Profile {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user: Uuid,
    pub handle: String,
    pub date: DateTime<Utc>,
}

impl Profile {
    pub fn new(user: Uuid, handle: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            user,
            handle: handle.into(),
            date: Utc::now(),
        }
    }
}
