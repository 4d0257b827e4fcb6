//! Companies House company lookup.
//!
//! Boundary client for the questionnaire's company search box. Only
//! active companies are returned; queries shorter than two characters
//! short-circuit to an empty result.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{ReportError, Result};

/// Default Companies House API base URL
pub const COMPANIES_HOUSE_URL: &str = "https://api.company-information.service.gov.uk";

const RESULTS_PER_PAGE: u32 = 5;

/// A matched company, shaped for the questionnaire UI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyMatch {
    pub name: String,
    pub number: String,
    pub address: String,
    pub sic_codes: Vec<String>,
    pub incorporated_date: Option<String>,
}

/// Client for the Companies House search API.
#[derive(Debug, Clone)]
pub struct CompanyLookup {
    http: Client,
    api_key: String,
    base_url: String,
}

impl CompanyLookup {
    /// Create a lookup client with an API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: COMPANIES_HOUSE_URL.to_string(),
        })
    }

    /// Point the client at a different server (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Search for active companies by name.
    pub fn search(&self, query: &str) -> Result<Vec<CompanyMatch>> {
        if query.len() < 2 {
            return Ok(Vec::new());
        }

        let url = format!("{}/search/companies", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", query),
                ("items_per_page", &RESULTS_PER_PAGE.to_string()),
            ])
            // Companies House uses the API key as a basic-auth username.
            .basic_auth(&self.api_key, Some(""))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_else(|_| "unknown error".to_string());
            return Err(ReportError::Provider {
                provider: "Companies House",
                status: status.as_u16(),
                message,
            });
        }

        let data: SearchResponse = response.json()?;

        Ok(data
            .items
            .into_iter()
            .filter(|item| item.company_status == "active")
            .map(|item| CompanyMatch {
                name: item.company_name,
                number: item.company_number,
                address: format_address(item.registered_office_address.as_ref()),
                sic_codes: item.sic_codes,
                incorporated_date: item.date_of_creation,
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    company_name: String,
    company_number: String,
    #[serde(default)]
    company_status: String,
    registered_office_address: Option<Address>,
    #[serde(default)]
    sic_codes: Vec<String>,
    date_of_creation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Address {
    address_line_1: Option<String>,
    address_line_2: Option<String>,
    locality: Option<String>,
    region: Option<String>,
    postal_code: Option<String>,
}

fn format_address(address: Option<&Address>) -> String {
    let Some(address) = address else {
        return String::new();
    };

    [
        address.address_line_1.as_deref(),
        address.address_line_2.as_deref(),
        address.locality.as_deref(),
        address.region.as_deref(),
        address.postal_code.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_query_short_circuits() {
        let lookup = CompanyLookup::new("key").unwrap();
        assert!(lookup.search("a").unwrap().is_empty());
        assert!(lookup.search("").unwrap().is_empty());
    }

    #[test]
    fn test_format_address() {
        let address = Address {
            address_line_1: Some("1 Main Street".to_string()),
            address_line_2: None,
            locality: Some("London".to_string()),
            region: None,
            postal_code: Some("EC1A 1AA".to_string()),
        };
        assert_eq!(
            format_address(Some(&address)),
            "1 Main Street, London, EC1A 1AA"
        );
        assert_eq!(format_address(None), "");
    }

    #[test]
    fn test_response_parsing_filters_inactive() {
        let payload = r#"{
            "items": [
                {"company_name": "ACME LTD", "company_number": "01234567", "company_status": "active"},
                {"company_name": "GONE LTD", "company_number": "07654321", "company_status": "dissolved"}
            ],
            "total_results": 2
        }"#;

        let data: SearchResponse = serde_json::from_str(payload).unwrap();
        let active: Vec<_> = data
            .items
            .into_iter()
            .filter(|i| i.company_status == "active")
            .collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].company_name, "ACME LTD");
    }
}
