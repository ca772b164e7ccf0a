use serde::{Deserialize, Serialize};

/// Response of `POST /api/video/{id}/like`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LikeResponse {
    pub success: bool,
    #[serde(default)]
    pub like_count: u64,
}

/// Error body the site returns alongside non-success statuses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Form fields posted when a waiver is signed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WaiverSubmission {
    pub legal_name: String,
    /// Serialized as the checkbox value `"on"`.
    #[serde(with = "checkbox")]
    pub agreement: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_email: Option<String>,
}

/// Result of a waiver post, as far as the client can tell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaiverOutcome {
    /// The server accepted the post (2xx or a redirect onwards)
    Accepted,
    /// The server answered but refused the submission
    Rejected { status_code: u16 },
}

mod checkbox {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(checked: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *checked { "on" } else { "" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(value == "on")
    }
}
