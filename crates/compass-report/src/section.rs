//! The closed set of report sections.
//!
//! Each section carries its id, pre-numbered title, generation budget
//! and prompt builder. Adding a section is an enum variant plus the
//! match arms the compiler then demands.

use std::fmt::Write;

use crate::context::ReportContext;
use crate::error::{ReportError, Result};

/// One of the nine report sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    ExecutiveSummary,
    RiskQuantification,
    VendorConsolidation,
    BreachCaseStudies,
    TcoComparison,
    FrameworkGapAnalysis,
    PeerBenchmarking,
    InvestmentRoadmap,
    RoiProjection,
}

/// Token and temperature budget for one generation call.
#[derive(Debug, Clone, Copy)]
pub struct GenerationBudget {
    pub max_tokens: u32,
    pub temperature: f32,
}

/// System and user prompt for one section.
#[derive(Debug, Clone)]
pub struct PromptParts {
    pub system: String,
    pub user: String,
}

const SYSTEM_PROMPT: &str = "You are an expert Microsoft 365 licensing consultant writing a \
professional business case document. Your output will be used in a board-level report. Write in \
a formal but accessible UK English style. Be specific, data-driven, and persuasive without being \
salesy.\n\
CRITICAL INSTRUCTION ON CITATIONS:\n\
- Every factual claim MUST include a source citation in the format [Source: Name, URL, Date].\n\
- Use only real, verifiable sources. If you cannot cite a specific source, write \"Industry \
estimates suggest...\" and note it as an approximation.\n\
- Do NOT fabricate URLs, company names, or statistics.\n\
- All monetary values should be in GBP.";

impl SectionKind {
    /// Every section, in report order.
    pub fn all() -> [SectionKind; 9] {
        [
            Self::ExecutiveSummary,
            Self::RiskQuantification,
            Self::VendorConsolidation,
            Self::BreachCaseStudies,
            Self::TcoComparison,
            Self::FrameworkGapAnalysis,
            Self::PeerBenchmarking,
            Self::InvestmentRoadmap,
            Self::RoiProjection,
        ]
    }

    /// Stable slug used in payloads and file names.
    pub fn id(&self) -> &'static str {
        match self {
            Self::ExecutiveSummary => "executive-summary",
            Self::RiskQuantification => "risk-quantification",
            Self::VendorConsolidation => "vendor-consolidation",
            Self::BreachCaseStudies => "breach-case-studies",
            Self::TcoComparison => "tco-comparison",
            Self::FrameworkGapAnalysis => "framework-gap-analysis",
            Self::PeerBenchmarking => "peer-benchmarking",
            Self::InvestmentRoadmap => "investment-roadmap",
            Self::RoiProjection => "roi-projection",
        }
    }

    /// Pre-numbered display title, as it appears in the report.
    pub fn title(&self) -> &'static str {
        match self {
            Self::ExecutiveSummary => "1. Executive Summary",
            Self::RiskQuantification => "2. Risk Quantification",
            Self::VendorConsolidation => "3. Vendor Consolidation",
            Self::BreachCaseStudies => "4. Breach Case Studies",
            Self::TcoComparison => "5. TCO Comparison",
            Self::FrameworkGapAnalysis => "6. Framework Gap Analysis",
            Self::PeerBenchmarking => "7. Peer Benchmarking",
            Self::InvestmentRoadmap => "8. Investment Roadmap",
            Self::RoiProjection => "9. ROI Projection",
        }
    }

    /// Resolve a slug to a section.
    pub fn from_id(id: &str) -> Result<Self> {
        Self::all()
            .into_iter()
            .find(|s| s.id() == id)
            .ok_or_else(|| ReportError::UnknownSection(id.to_string()))
    }

    /// Generation budget for this section. Financially precise
    /// sections run cooler than narrative ones.
    pub fn budget(&self) -> GenerationBudget {
        match self {
            Self::ExecutiveSummary => GenerationBudget {
                max_tokens: 2048,
                temperature: 0.7,
            },
            Self::RiskQuantification => GenerationBudget {
                max_tokens: 3072,
                temperature: 0.6,
            },
            Self::VendorConsolidation => GenerationBudget {
                max_tokens: 2048,
                temperature: 0.6,
            },
            Self::BreachCaseStudies => GenerationBudget {
                max_tokens: 3072,
                temperature: 0.5,
            },
            Self::TcoComparison => GenerationBudget {
                max_tokens: 2048,
                temperature: 0.4,
            },
            Self::FrameworkGapAnalysis => GenerationBudget {
                max_tokens: 3072,
                temperature: 0.5,
            },
            Self::PeerBenchmarking => GenerationBudget {
                max_tokens: 1536,
                temperature: 0.6,
            },
            Self::InvestmentRoadmap => GenerationBudget {
                max_tokens: 2048,
                temperature: 0.6,
            },
            Self::RoiProjection => GenerationBudget {
                max_tokens: 2048,
                temperature: 0.4,
            },
        }
    }

    /// Build the prompt for this section.
    pub fn prompt(&self, ctx: &ReportContext) -> PromptParts {
        let brief = match self {
            Self::ExecutiveSummary => format!(
                "Write an executive summary (400-600 words) for a business case recommending \
                 {} upgrade from Microsoft 365 {} to E5. Open with the strategic imperative, \
                 summarise the key financial argument, highlight the 3-4 most relevant E5 \
                 capabilities for this company, reference the industry threat landscape with \
                 specific data points, and close with a clear recommendation. Target audience: {}.",
                ctx.company_name,
                ctx.current_license,
                join_or(&ctx.presentation_audience, "senior leadership"),
            ),
            Self::RiskQuantification => format!(
                "Quantify the cyber risk exposure for {} as a {} organisation. Use the average \
                 breach cost for the industry ({}) and the common breach types ({}) to build an \
                 annualised loss expectancy argument, then map each selected E5 workload to the \
                 risks it mitigates.",
                ctx.company_name,
                ctx.industry.name,
                ctx.industry.average_breach_cost_gbp,
                ctx.industry.common_breach_types.join(", "),
            ),
            Self::VendorConsolidation => format!(
                "Analyse the vendor consolidation opportunity for {}. Current external security \
                 tools: {}. Specific vendors: {}. For each tool category E5 can replace, state \
                 the typical standalone cost and the consolidation saving.",
                ctx.company_name,
                join_or(&ctx.security_tools, "none - relying on Microsoft built-in"),
                or_unspecified(&ctx.security_vendors),
            ),
            Self::BreachCaseStudies => format!(
                "Present 2-3 real, citable breach case studies from the {} sector relevant to \
                 {}. For each: what happened, the cost, and which E5 capability would have \
                 reduced the impact. Only use well-documented public incidents.",
                ctx.industry.name, ctx.company_name,
            ),
            Self::TcoComparison => format!(
                "Build a total cost of ownership comparison for {} between the current {} \
                 licence ({} users, current per-user cost: {}) plus add-ons ({}) plus external \
                 security tooling, and a consolidated E5 estate (quoted price: {}). Present the \
                 comparison as a markdown table and state the net position.",
                ctx.company_name,
                ctx.current_license,
                ctx.licensed_users,
                or_unspecified(&ctx.per_user_cost),
                join_or(&ctx.addon_licenses, "none"),
                or_unspecified(&ctx.e5_quoted_price),
            ),
            Self::FrameworkGapAnalysis => format!(
                "Map the compliance frameworks relevant to {} ({}) against E5 capabilities. \
                 Declared in-scope frameworks: {}. Regulatory context: {}. For each framework, \
                 identify the control gaps E5 closes.",
                ctx.company_name,
                join_framework_names(ctx),
                join_or(&ctx.compliance_frameworks, "none declared"),
                ctx.industry.regulatory_pressure,
            ),
            Self::PeerBenchmarking => format!(
                "Benchmark {} ({} employees, {} band) against {} sector peers on security \
                 maturity and Microsoft licensing posture. Keep it short and data-backed.",
                ctx.company_name, ctx.employee_count, ctx.revenue_band, ctx.industry.name,
            ),
            Self::InvestmentRoadmap => format!(
                "Propose a phased 6-12 month E5 deployment roadmap for {} covering the selected \
                 workloads: {}. Agreement type: {}. Contract term: {}. Phase by risk reduction \
                 per unit of effort.",
                ctx.company_name,
                join_workload_names(ctx),
                or_unspecified(&ctx.agreement_type),
                or_unspecified(&ctx.contract_term),
            ),
            Self::RoiProjection => format!(
                "Project the three-year return on investment for {} moving to E5: consolidation \
                 savings, breach-risk reduction (industry average breach cost {}), cyber \
                 insurance posture ({}), and productivity effects. Show the payback period.",
                ctx.company_name,
                ctx.industry.average_breach_cost_gbp,
                ctx.cyber_insurance,
            ),
        };

        let mut user = brief;
        let _ = write!(user, "\n\n{}", context_block(ctx));

        PromptParts {
            system: SYSTEM_PROMPT.to_string(),
            user,
        }
    }
}

/// The shared company context appended to every section prompt.
fn context_block(ctx: &ReportContext) -> String {
    let mut block = String::from("COMPANY CONTEXT:\n");
    let _ = writeln!(block, "- Company: {}", ctx.company_name);
    let _ = writeln!(
        block,
        "- Industry: {} (risk level: {})",
        ctx.industry.name,
        ctx.industry.risk_level.as_str()
    );
    let _ = writeln!(
        block,
        "- Size: {} licensed users, {} employee range",
        ctx.licensed_users, ctx.employee_count
    );
    let _ = writeln!(block, "- Current license: {}", ctx.current_license);
    let _ = writeln!(
        block,
        "- Security incidents (24 months): {}",
        ctx.security_incident
    );
    let _ = writeln!(block, "- Cyber insurance: {}", ctx.cyber_insurance);
    let _ = writeln!(
        block,
        "- Evaluation drivers: {}",
        join_or(&ctx.evaluation_drivers, "not stated")
    );

    block.push_str("\nSELECTED E5 WORKLOADS:\n");
    for workload in &ctx.selected_workloads {
        let _ = writeln!(block, "- {}: {}", workload.name, workload.business_value);
    }

    block
}

fn join_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}

fn or_unspecified(value: &str) -> String {
    if value.is_empty() {
        "not disclosed".to_string()
    } else {
        value.to_string()
    }
}

fn join_workload_names(ctx: &ReportContext) -> String {
    if ctx.selected_workloads.is_empty() {
        return "full E5 security suite".to_string();
    }
    ctx.selected_workloads
        .iter()
        .map(|w| w.name)
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_framework_names(ctx: &ReportContext) -> String {
    ctx.relevant_frameworks
        .iter()
        .map(|f| f.short_name)
        .collect::<Vec<_>>()
        .join(", ")
}
