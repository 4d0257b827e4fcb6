//! Static product catalogs: industry profiles, E5 workloads and
//! compliance frameworks.
//!
//! These feed the report context and prompt builders. Lookup is by
//! stable id, matching the ids the questionnaire UI submits.

/// Industry risk banding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// An industry profile with its threat and compliance posture.
#[derive(Debug, Clone, Copy)]
pub struct IndustryProfile {
    pub id: &'static str,
    pub name: &'static str,
    pub risk_level: RiskLevel,
    pub regulatory_pressure: &'static str,
    pub average_breach_cost_gbp: &'static str,
    pub common_breach_types: &'static [&'static str],
}

pub const INDUSTRIES: &[IndustryProfile] = &[
    IndustryProfile {
        id: "financial-services",
        name: "Financial Services",
        risk_level: RiskLevel::High,
        regulatory_pressure:
            "FCA, PRA, DORA compliance. Heavy regulatory scrutiny with significant fines for data breaches.",
        average_breach_cost_gbp: "£4.5M",
        common_breach_types: &["phishing", "credential-theft", "insider-threat", "ransomware"],
    },
    IndustryProfile {
        id: "healthcare",
        name: "Healthcare",
        risk_level: RiskLevel::High,
        regulatory_pressure:
            "NHS DSPT requirements, ICO enforcement for patient data breaches, NIS2 essential services.",
        average_breach_cost_gbp: "£3.8M",
        common_breach_types: &["ransomware", "phishing", "data-exfiltration"],
    },
    IndustryProfile {
        id: "legal",
        name: "Legal Services",
        risk_level: RiskLevel::High,
        regulatory_pressure:
            "SRA requirements for client data protection. High-value target due to sensitive legal documents.",
        average_breach_cost_gbp: "£3.2M",
        common_breach_types: &["phishing", "data-exfiltration", "business-email-compromise"],
    },
    IndustryProfile {
        id: "retail",
        name: "Retail & E-commerce",
        risk_level: RiskLevel::Medium,
        regulatory_pressure:
            "PCI DSS for payment data, ICO enforcement for customer data, GDPR.",
        average_breach_cost_gbp: "£2.5M",
        common_breach_types: &["ransomware", "payment-card-theft", "supply-chain-attack"],
    },
    IndustryProfile {
        id: "manufacturing",
        name: "Manufacturing",
        risk_level: RiskLevel::Medium,
        regulatory_pressure:
            "NIS2 for critical manufacturing, IP protection obligations, supply chain assurance demands.",
        average_breach_cost_gbp: "£2.8M",
        common_breach_types: &["ransomware", "ip-theft", "supply-chain-attack"],
    },
    IndustryProfile {
        id: "professional-services",
        name: "Professional Services",
        risk_level: RiskLevel::Medium,
        regulatory_pressure:
            "Client confidentiality obligations, GDPR, increasing client security questionnaires.",
        average_breach_cost_gbp: "£2.3M",
        common_breach_types: &["phishing", "business-email-compromise", "credential-theft"],
    },
];

/// Find an industry profile by id.
pub fn industry_by_id(id: &str) -> Option<&'static IndustryProfile> {
    INDUSTRIES.iter().find(|i| i.id == id)
}

/// An E5 workload the customer can select for evaluation.
#[derive(Debug, Clone, Copy)]
pub struct Workload {
    pub id: &'static str,
    pub name: &'static str,
    pub business_value: &'static str,
}

pub const WORKLOADS: &[Workload] = &[
    Workload {
        id: "defender-endpoint-p2",
        name: "Microsoft Defender for Endpoint P2",
        business_value:
            "Replaces standalone EDR tools (CrowdStrike, SentinelOne) - typical cost £5-8/user/month.",
    },
    Workload {
        id: "defender-office-p2",
        name: "Microsoft Defender for Office 365 P2",
        business_value:
            "Replaces email security gateways (Proofpoint, Mimecast) - typical cost £3-5/user/month.",
    },
    Workload {
        id: "defender-identity",
        name: "Microsoft Defender for Identity",
        business_value:
            "Detects lateral movement and identity-based attacks that bypass perimeter security.",
    },
    Workload {
        id: "entra-id-p2",
        name: "Microsoft Entra ID P2",
        business_value:
            "Risk-based conditional access and identity governance; replaces standalone PAM/IGA point tools.",
    },
    Workload {
        id: "purview-dlp",
        name: "Microsoft Purview Data Loss Prevention",
        business_value:
            "Unified DLP across email, endpoints and cloud apps; replaces standalone DLP suites.",
    },
    Workload {
        id: "purview-insider-risk",
        name: "Microsoft Purview Insider Risk Management",
        business_value:
            "Detects data theft and policy violations by departing or negligent employees.",
    },
    Workload {
        id: "sentinel-integration",
        name: "Microsoft Sentinel Integration",
        business_value:
            "First-party signal ingestion discounts; reduces SIEM ingestion cost versus third-party sources.",
    },
    Workload {
        id: "intune-endpoint-privilege",
        name: "Intune Endpoint Privilege Management",
        business_value:
            "Removes standing local admin rights without a separate privilege management vendor.",
    },
];

/// Find a workload by id.
pub fn workload_by_id(id: &str) -> Option<&'static Workload> {
    WORKLOADS.iter().find(|w| w.id == id)
}

/// A compliance framework relevant to one or more industries.
#[derive(Debug, Clone, Copy)]
pub struct Framework {
    pub id: &'static str,
    pub name: &'static str,
    pub short_name: &'static str,
    /// Industry ids, or `"all"` for every industry.
    pub relevant_industries: &'static [&'static str],
}

pub const FRAMEWORKS: &[Framework] = &[
    Framework {
        id: "cyber-essentials",
        name: "Cyber Essentials",
        short_name: "CE",
        relevant_industries: &["all"],
    },
    Framework {
        id: "cyber-essentials-plus",
        name: "Cyber Essentials Plus",
        short_name: "CE+",
        relevant_industries: &["all"],
    },
    Framework {
        id: "iso-27001",
        name: "ISO/IEC 27001",
        short_name: "ISO 27001",
        relevant_industries: &["all"],
    },
    Framework {
        id: "dora",
        name: "Digital Operational Resilience Act",
        short_name: "DORA",
        relevant_industries: &["financial-services"],
    },
    Framework {
        id: "nis2",
        name: "NIS2 Directive",
        short_name: "NIS2",
        relevant_industries: &["healthcare", "manufacturing"],
    },
    Framework {
        id: "nist-csf",
        name: "NIST Cybersecurity Framework",
        short_name: "NIST CSF",
        relevant_industries: &["financial-services", "healthcare", "retail", "manufacturing"],
    },
];

/// Frameworks applicable to an industry, in catalog order.
pub fn frameworks_for_industry(industry_id: &str) -> Vec<&'static Framework> {
    FRAMEWORKS
        .iter()
        .filter(|f| {
            f.relevant_industries.contains(&"all")
                || f.relevant_industries.contains(&industry_id)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_industry_lookup() {
        let industry = industry_by_id("healthcare").unwrap();
        assert_eq!(industry.name, "Healthcare");
        assert_eq!(industry.risk_level, RiskLevel::High);

        assert!(industry_by_id("space-mining").is_none());
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let mut ids: Vec<&str> = INDUSTRIES.iter().map(|i| i.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), INDUSTRIES.len());

        let mut ids: Vec<&str> = WORKLOADS.iter().map(|w| w.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), WORKLOADS.len());
    }

    #[test]
    fn test_frameworks_for_industry() {
        let frameworks = frameworks_for_industry("financial-services");
        let ids: Vec<&str> = frameworks.iter().map(|f| f.id).collect();
        assert!(ids.contains(&"cyber-essentials"));
        assert!(ids.contains(&"dora"));
        assert!(!ids.contains(&"nis2"));
    }
}
