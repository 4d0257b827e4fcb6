//! Per-section generation fan-out.
//!
//! Sections are generated in parallel and independently: one failed
//! provider call degrades that section to a placeholder instead of
//! failing the report. Costs are aggregated across sections.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use compass_content::{ReportDocument, Section};

use crate::client::{AiClient, GenerationRequest};
use crate::context::ReportContext;
use crate::model::ModelId;
use crate::section::SectionKind;

/// Body used when a section's generation call fails.
const FAILED_SECTION_PLACEHOLDER: &str =
    "[This section could not be generated. Please regenerate the report.]";

/// One generated section with usage accounting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionResult {
    pub id: String,
    pub title: String,
    pub content: String,
    pub model: String,
    pub cost_usd: f64,
    pub duration_ms: u64,
}

/// A complete generated report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedReport {
    pub sections: Vec<SectionResult>,
    pub total_cost_usd: f64,
    pub generated_at: String,
}

impl GeneratedReport {
    /// Convert to the renderer input shape.
    pub fn to_document(&self, company_name: &str, industry: &str) -> ReportDocument {
        ReportDocument {
            company_name: company_name.to_string(),
            industry: industry.to_string(),
            sections: self
                .sections
                .iter()
                .map(|s| Section::new(&s.id, &s.title, &s.content))
                .collect(),
            generated_at: self.generated_at.clone(),
        }
    }
}

/// Drives section generation against an [`AiClient`].
pub struct Orchestrator {
    client: AiClient,
    model: ModelId,
}

impl Orchestrator {
    /// Create an orchestrator using the client's default model.
    pub fn new(client: AiClient) -> Self {
        let model = client.default_model();
        Self { client, model }
    }

    /// Override the model for every section.
    pub fn with_model(mut self, model: ModelId) -> Self {
        self.model = model;
        self
    }

    /// Generate the requested sections, in parallel.
    ///
    /// Results come back in request order regardless of completion
    /// order. Per-section failures are tolerated: the section carries
    /// a placeholder body and zero cost.
    pub fn generate_report(&self, ctx: &ReportContext, kinds: &[SectionKind]) -> GeneratedReport {
        let results: Vec<SectionResult> = std::thread::scope(|scope| {
            let handles: Vec<_> = kinds
                .iter()
                .map(|kind| scope.spawn(move || self.generate_section(ctx, *kind)))
                .collect();

            handles
                .into_iter()
                .zip(kinds)
                .map(|(handle, kind)| match handle.join() {
                    Ok(result) => result,
                    // A panicked worker degrades like a failed call.
                    Err(_) => Self::placeholder_result(*kind),
                })
                .collect()
        });

        let total_cost_usd = results.iter().map(|s| s.cost_usd).sum();
        info!(
            sections = results.len(),
            total_cost_usd, "report generation finished"
        );

        GeneratedReport {
            sections: results,
            total_cost_usd,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn generate_section(&self, ctx: &ReportContext, kind: SectionKind) -> SectionResult {
        let parts = kind.prompt(ctx);
        let budget = kind.budget();
        let request = GenerationRequest {
            system: Some(parts.system),
            prompt: parts.user,
            max_tokens: budget.max_tokens,
            temperature: budget.temperature,
        };

        match self.client.generate(self.model, &request) {
            Ok(response) => {
                info!(
                    section = kind.id(),
                    cost_usd = response.cost_usd,
                    duration_ms = response.duration_ms as u64,
                    "section generated"
                );
                SectionResult {
                    id: kind.id().to_string(),
                    title: kind.title().to_string(),
                    content: response.text,
                    model: response.model,
                    cost_usd: response.cost_usd,
                    duration_ms: response.duration_ms as u64,
                }
            }
            Err(err) => {
                warn!(section = kind.id(), error = %err, "section generation failed");
                Self::placeholder_result(kind)
            }
        }
    }

    fn placeholder_result(kind: SectionKind) -> SectionResult {
        SectionResult {
            id: kind.id().to_string(),
            title: kind.title().to_string(),
            content: FAILED_SECTION_PLACEHOLDER.to_string(),
            model: "placeholder".to_string(),
            cost_usd: 0.0,
            duration_ms: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AiConfig;
    use crate::context::Questionnaire;

    fn sample_context() -> ReportContext {
        let q: Questionnaire = serde_json::from_str(
            r#"{
                "company": {"name": "Acme Ltd", "industry": "retail", "employeeCount": "100-250"},
                "answers": {},
                "selectedWorkloads": ["defender-endpoint-p2"]
            }"#,
        )
        .unwrap();
        ReportContext::from_questionnaire(&q).unwrap()
    }

    #[test]
    fn test_failed_sections_degrade_to_placeholders() {
        // No API keys configured: every section fails fast and the
        // report still comes back complete.
        let client = AiClient::new(AiConfig::default()).unwrap();
        let orchestrator = Orchestrator::new(client);

        let kinds = [SectionKind::ExecutiveSummary, SectionKind::TcoComparison];
        let report = orchestrator.generate_report(&sample_context(), &kinds);

        assert_eq!(report.sections.len(), 2);
        assert_eq!(report.sections[0].id, "executive-summary");
        assert_eq!(report.sections[1].id, "tco-comparison");
        for section in &report.sections {
            assert_eq!(section.content, FAILED_SECTION_PLACEHOLDER);
            assert_eq!(section.model, "placeholder");
        }
        assert_eq!(report.total_cost_usd, 0.0);
        assert!(!report.generated_at.is_empty());
    }

    #[test]
    fn test_to_document_keeps_order_and_titles() {
        let report = GeneratedReport {
            sections: vec![
                SectionResult {
                    id: "executive-summary".to_string(),
                    title: "1. Executive Summary".to_string(),
                    content: "Summary body.".to_string(),
                    model: "gemini-2.0-flash".to_string(),
                    cost_usd: 0.001,
                    duration_ms: 1200,
                },
                SectionResult {
                    id: "roi-projection".to_string(),
                    title: "9. ROI Projection".to_string(),
                    content: "ROI body.".to_string(),
                    model: "gemini-2.0-flash".to_string(),
                    cost_usd: 0.002,
                    duration_ms: 900,
                },
            ],
            total_cost_usd: 0.003,
            generated_at: "2026-01-05T12:00:00+00:00".to_string(),
        };

        let doc = report.to_document("Acme Ltd", "Retail & E-commerce");
        assert_eq!(doc.company_name, "Acme Ltd");
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[0].title, "1. Executive Summary");
        assert_eq!(doc.sections[1].content, "ROI body.");
        assert_eq!(doc.generated_at, report.generated_at);
    }

    #[test]
    fn test_report_round_trips_through_json() {
        let report = GeneratedReport {
            sections: vec![],
            total_cost_usd: 0.0,
            generated_at: "2026-01-05T12:00:00+00:00".to_string(),
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"totalCostUsd\""));
        let back: GeneratedReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.generated_at, report.generated_at);
    }
}
