use serde::{Deserialize, Serialize};

/// Search envelope: `data` is a list of person records.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<PersonData>,
}

/// Enrich envelope: `data` is a single person record.
#[derive(Debug, Deserialize)]
pub struct EnrichResponse {
    pub data: Option<PersonData>,
}

/// PDL mixes plain strings and typed objects in the `emails` array.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum EmailEntry {
    Plain(String),
    Typed {
        address: Option<String>,
        #[serde(rename = "type")]
        kind: Option<String>,
    },
}

impl EmailEntry {
    pub fn address(&self) -> Option<&str> {
        match self {
            EmailEntry::Plain(s) => Some(s.as_str()),
            EmailEntry::Typed { address, .. } => address.as_deref(),
        }
    }

    fn is_current_professional(&self) -> bool {
        matches!(self, EmailEntry::Typed { kind: Some(k), .. } if k == "current_professional")
    }
}

/// A person record from /v5/person/search or /v5/person/enrich.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PersonData {
    #[serde(default)]
    pub work_email: Option<String>,
    #[serde(default)]
    pub emails: Vec<EmailEntry>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub job_company_name: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub mobile_phone: Option<String>,
}

impl PersonData {
    /// Pick the most useful address: work_email, then the
    /// current_professional entry, then the first entry of any kind.
    pub fn best_email(&self) -> Option<String> {
        if let Some(work) = &self.work_email {
            return Some(work.clone());
        }
        if let Some(current) = self
            .emails
            .iter()
            .find(|e| e.is_current_professional())
            .and_then(|e| e.address())
        {
            return Some(current.to_string());
        }
        self.emails
            .first()
            .and_then(|e| e.address())
            .map(|s| s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_email_prefers_work_email() {
        let person: PersonData = serde_json::from_str(
            r#"{"work_email":"w@acme.com","emails":["p@gmail.com"]}"#,
        )
        .unwrap();
        assert_eq!(person.best_email().as_deref(), Some("w@acme.com"));
    }

    #[test]
    fn best_email_prefers_current_professional_entry() {
        let person: PersonData = serde_json::from_str(
            r#"{"emails":[
                {"address":"old@gmail.com","type":"personal"},
                {"address":"now@acme.com","type":"current_professional"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(person.best_email().as_deref(), Some("now@acme.com"));
    }

    #[test]
    fn best_email_falls_back_to_first_entry() {
        let person: PersonData =
            serde_json::from_str(r#"{"emails":["only@acme.com"]}"#).unwrap();
        assert_eq!(person.best_email().as_deref(), Some("only@acme.com"));

        let person: PersonData = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(person.best_email(), None);
    }
}
