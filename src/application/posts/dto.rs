use crate::domain::post::value_objects::optional_field;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Body of `POST /` and `POST /comment/{id}`. Every field is optional on the
/// wire so that a missing `text` surfaces as a validation message.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PostInput {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl PostInput {
    /// Fills a missing or blank `name`/`avatar` from the caller's identity.
    pub fn or_identity(self, name: Option<&str>, avatar: Option<&str>) -> Self {
        Self {
            name: optional_field(self.name).or_else(|| name.map(str::to_string)),
            avatar: optional_field(self.avatar).or_else(|| avatar.map(str::to_string)),
            ..self
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DeletePostResponse {
    pub success: bool,
}
