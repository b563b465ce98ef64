pub mod error;
pub mod types;

pub use error::{HunterError, Result};
pub use types::{DomainContact, DomainSearchData, EmailFinderData, VerifierData};

use types::ApiResponse;

const BASE_URL: &str = "https://api.hunter.io/v2";

pub struct HunterClient {
    client: reqwest::Client,
    api_key: String,
}

impl HunterClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }

    /// Find a decision-maker email at a domain. Returns `None` when Hunter
    /// has no address for the domain (404).
    pub async fn find_email(&self, domain: &str) -> Result<Option<EmailFinderData>> {
        let url = format!("{BASE_URL}/email-finder");
        let resp = self
            .client
            .get(&url)
            .query(&[("domain", domain), ("api_key", &self.api_key)])
            .send()
            .await?;

        let status = resp.status();
        if status.as_u16() == 404 {
            return Ok(None);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(HunterError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let api_resp: ApiResponse<EmailFinderData> = resp.json().await?;
        if api_resp.data.email.is_none() {
            return Ok(None);
        }
        tracing::debug!(domain, "Hunter email-finder hit");
        Ok(Some(api_resp.data))
    }

    /// List everyone Hunter knows at a domain, most confident first.
    pub async fn domain_search(&self, domain: &str, limit: u32) -> Result<DomainSearchData> {
        let url = format!("{BASE_URL}/domain-search");
        let limit = limit.to_string();
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("domain", domain),
                ("api_key", &self.api_key),
                ("limit", &limit),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(HunterError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let api_resp: ApiResponse<DomainSearchData> = resp.json().await?;
        tracing::debug!(
            domain,
            contacts = api_resp.data.emails.len(),
            "Hunter domain-search complete"
        );
        Ok(api_resp.data)
    }

    /// Check whether an address is deliverable.
    pub async fn verify_email(&self, email: &str) -> Result<VerifierData> {
        let url = format!("{BASE_URL}/email-verifier");
        let resp = self
            .client
            .get(&url)
            .query(&[("email", email), ("api_key", &self.api_key)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(HunterError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let api_resp: ApiResponse<VerifierData> = resp.json().await?;
        Ok(api_resp.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_finder_verified_requires_valid_status() {
        let data: EmailFinderData = serde_json::from_str(
            r#"{"email":"a@acme.com","first_name":"Ada","verification":{"status":"valid"}}"#,
        )
        .unwrap();
        assert!(data.is_verified());

        let data: EmailFinderData =
            serde_json::from_str(r#"{"email":"a@acme.com","verification":{"status":"risky"}}"#)
                .unwrap();
        assert!(!data.is_verified());

        let data: EmailFinderData = serde_json::from_str(r#"{"email":"a@acme.com"}"#).unwrap();
        assert!(!data.is_verified());
    }

    #[test]
    fn domain_contact_reads_value_field() {
        let contact: DomainContact = serde_json::from_str(
            r#"{"value":"b@acme.com","position":"VP Sales","confidence":87}"#,
        )
        .unwrap();
        assert_eq!(contact.email, "b@acme.com");
        assert_eq!(contact.position.as_deref(), Some("VP Sales"));
        assert_eq!(contact.confidence, Some(87));
    }

    #[test]
    fn verifier_deliverable_only_when_valid() {
        let data: VerifierData = serde_json::from_str(r#"{"status":"valid","score":98}"#).unwrap();
        assert!(data.is_deliverable());
        let data: VerifierData = serde_json::from_str(r#"{"status":"invalid"}"#).unwrap();
        assert!(!data.is_deliverable());
    }
}
