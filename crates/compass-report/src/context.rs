//! Report context built from a submitted questionnaire.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::catalog::{
    frameworks_for_industry, industry_by_id, workload_by_id, Framework, IndustryProfile, Workload,
};
use crate::error::{ReportError, Result};

/// Raw questionnaire submission, as posted by the UI.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Questionnaire {
    pub company: CompanyInfo,

    /// Free-form answers keyed by question id.
    #[serde(default)]
    pub answers: HashMap<String, Value>,

    /// Selected E5 workload ids.
    #[serde(default)]
    pub selected_workloads: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    pub name: String,
    /// Industry id from the catalog.
    pub industry: String,
    #[serde(default)]
    pub employee_count: String,
    #[serde(default)]
    pub revenue_band: Option<String>,
}

/// Everything the prompt builders need about one company.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub company_name: String,
    pub industry: &'static IndustryProfile,
    pub employee_count: String,
    pub revenue_band: String,
    pub current_license: String,
    pub licensed_users: String,
    pub per_user_cost: String,
    pub addon_licenses: Vec<String>,
    pub security_tools: Vec<String>,
    pub security_vendors: String,
    pub selected_workloads: Vec<&'static Workload>,
    pub relevant_frameworks: Vec<&'static Framework>,
    pub evaluation_drivers: Vec<String>,
    pub presentation_audience: Vec<String>,
    pub security_incident: String,
    pub cyber_insurance: String,
    pub compliance_frameworks: Vec<String>,
    pub e5_quoted_price: String,
    pub agreement_type: String,
    pub contract_term: String,
}

impl ReportContext {
    /// Build a context from a questionnaire submission.
    ///
    /// Unknown workload ids are silently dropped; an unknown industry
    /// is an error because every prompt leans on the industry profile.
    pub fn from_questionnaire(q: &Questionnaire) -> Result<Self> {
        let industry = industry_by_id(&q.company.industry)
            .ok_or_else(|| ReportError::UnknownIndustry(q.company.industry.clone()))?;

        let selected_workloads = q
            .selected_workloads
            .iter()
            .filter_map(|id| workload_by_id(id))
            .collect();

        Ok(Self {
            company_name: q.company.name.clone(),
            industry,
            employee_count: q.company.employee_count.clone(),
            revenue_band: q
                .company
                .revenue_band
                .clone()
                .unwrap_or_else(|| "not disclosed".to_string()),
            current_license: str_answer(&q.answers, "current-license", "E3"),
            licensed_users: str_answer(&q.answers, "licensed-users", "unknown"),
            per_user_cost: str_answer(&q.answers, "per-user-cost", ""),
            addon_licenses: list_answer(&q.answers, "addon-licenses"),
            security_tools: list_answer(&q.answers, "current-security-tools"),
            security_vendors: str_answer(&q.answers, "security-vendor-names", ""),
            selected_workloads,
            relevant_frameworks: frameworks_for_industry(&q.company.industry),
            evaluation_drivers: list_answer(&q.answers, "evaluation-drivers"),
            presentation_audience: list_answer(&q.answers, "presentation-audience"),
            security_incident: str_answer(&q.answers, "security-incident", "unknown"),
            cyber_insurance: str_answer(&q.answers, "cyber-insurance", "unknown"),
            compliance_frameworks: list_answer(&q.answers, "compliance-frameworks"),
            e5_quoted_price: str_answer(&q.answers, "e5-quoted-price", ""),
            agreement_type: str_answer(&q.answers, "agreement-type", ""),
            contract_term: str_answer(&q.answers, "contract-term", ""),
        })
    }
}

fn str_answer(answers: &HashMap<String, Value>, key: &str, default: &str) -> String {
    answers
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

fn list_answer(answers: &HashMap<String, Value>, key: &str) -> Vec<String> {
    answers
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_questionnaire() -> Questionnaire {
        serde_json::from_str(
            r#"{
                "company": {
                    "name": "Acme Ltd",
                    "industry": "legal",
                    "employeeCount": "250-500"
                },
                "answers": {
                    "current-license": "E3",
                    "licensed-users": "320",
                    "addon-licenses": ["entra-id-p2"],
                    "security-incident": "yes-contained"
                },
                "selectedWorkloads": ["defender-endpoint-p2", "not-a-workload"]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_context_from_questionnaire() {
        let ctx = ReportContext::from_questionnaire(&sample_questionnaire()).unwrap();

        assert_eq!(ctx.company_name, "Acme Ltd");
        assert_eq!(ctx.industry.name, "Legal Services");
        assert_eq!(ctx.licensed_users, "320");
        assert_eq!(ctx.revenue_band, "not disclosed");
        assert_eq!(ctx.addon_licenses, vec!["entra-id-p2".to_string()]);
        // Unknown workload ids are dropped.
        assert_eq!(ctx.selected_workloads.len(), 1);
        assert_eq!(ctx.selected_workloads[0].id, "defender-endpoint-p2");
        // Frameworks come from the industry catalog.
        assert!(!ctx.relevant_frameworks.is_empty());
    }

    #[test]
    fn test_unknown_industry_is_an_error() {
        let mut q = sample_questionnaire();
        q.company.industry = "space-mining".to_string();

        assert!(matches!(
            ReportContext::from_questionnaire(&q),
            Err(ReportError::UnknownIndustry(_))
        ));
    }

    #[test]
    fn test_missing_answers_use_defaults() {
        let mut q = sample_questionnaire();
        q.answers.clear();
        let ctx = ReportContext::from_questionnaire(&q).unwrap();

        assert_eq!(ctx.current_license, "E3");
        assert_eq!(ctx.licensed_users, "unknown");
        assert!(ctx.security_tools.is_empty());
    }
}
