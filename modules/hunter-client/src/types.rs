use serde::{Deserialize, Serialize};

/// Envelope every Hunter v2 endpoint wraps its payload in.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// Payload of GET /v2/email-finder.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailFinderData {
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    /// Finder confidence score, 0-100.
    #[serde(default)]
    pub score: Option<u32>,
    #[serde(default)]
    pub verification: Option<Verification>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Verification {
    #[serde(default)]
    pub status: Option<String>,
}

impl EmailFinderData {
    /// Hunter marks a finder hit verified when its own verification ran
    /// and came back "valid".
    pub fn is_verified(&self) -> bool {
        self.verification
            .as_ref()
            .and_then(|v| v.status.as_deref())
            == Some("valid")
    }
}

/// Payload of GET /v2/domain-search.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DomainSearchData {
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub emails: Vec<DomainContact>,
}

/// One person in a domain-search result.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DomainContact {
    /// Hunter calls the address field "value" on this endpoint.
    #[serde(rename = "value")]
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    /// Pattern confidence, 0-100.
    #[serde(default)]
    pub confidence: Option<u32>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub seniority: Option<String>,
}

/// Payload of GET /v2/email-verifier.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerifierData {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub score: Option<u32>,
}

impl VerifierData {
    pub fn is_deliverable(&self) -> bool {
        self.status.as_deref() == Some("valid")
    }
}
