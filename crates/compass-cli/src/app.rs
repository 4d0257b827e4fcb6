//! CLI application logic.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use compass_content::ReportDocument;
use compass_pptx::DeckTheme;
use compass_report::{
    download_filename, generate_deck, generate_document, AiClient, AiConfig, CompanyLookup,
    ModelId, Orchestrator, Questionnaire, ReportContext, SectionKind,
};

/// Which artifacts to export
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ExportFormat {
    /// PDF report only
    Pdf,
    /// PPTX deck only
    Pptx,
    /// Both artifacts
    #[default]
    Both,
}

#[derive(Parser)]
#[command(name = "compass")]
#[command(author, version, about = "AI-generated Microsoft 365 E5 business cases", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate report sections from a questionnaire file
    Generate {
        /// Questionnaire JSON file
        questionnaire: PathBuf,

        /// Output report document file
        #[arg(short, long, default_value = "report.json")]
        output: PathBuf,

        /// Model id (see `compass models`)
        #[arg(long)]
        model: Option<String>,

        /// Section id(s) to generate (defaults to all sections)
        #[arg(long = "section")]
        sections: Vec<String>,
    },

    /// Export a report document to PDF and/or PPTX
    Export {
        /// Report document JSON file (output of `generate`)
        report: PathBuf,

        /// Which artifacts to produce
        #[arg(short, long, value_enum, default_value = "both")]
        format: ExportFormat,

        /// Output directory
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Deck theme TOML file
        #[arg(long)]
        theme: Option<PathBuf>,
    },

    /// Search Companies House for a company
    Lookup {
        /// Company name query
        query: String,
    },

    /// List the available report sections
    Sections,

    /// List the available AI models
    Models,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            questionnaire,
            output,
            model,
            sections,
        } => cmd_generate(&questionnaire, &output, model.as_deref(), &sections),
        Commands::Export {
            report,
            format,
            output,
            theme,
        } => cmd_export(&report, format, &output, theme.as_deref()),
        Commands::Lookup { query } => cmd_lookup(&query),
        Commands::Sections => {
            for kind in SectionKind::all() {
                println!("{:<24} {}", kind.id(), kind.title());
            }
            Ok(())
        }
        Commands::Models => {
            for model in ModelId::all() {
                let spec = model.spec();
                println!(
                    "{:<16} {} ({})",
                    model.id(),
                    spec.display_name,
                    spec.provider.name()
                );
            }
            Ok(())
        }
    }
}

fn cmd_generate(
    questionnaire: &Path,
    output: &Path,
    model: Option<&str>,
    sections: &[String],
) -> Result<()> {
    let raw = fs::read_to_string(questionnaire)
        .with_context(|| format!("failed to read {}", questionnaire.display()))?;
    let q: Questionnaire =
        serde_json::from_str(&raw).context("failed to parse questionnaire JSON")?;
    let ctx = ReportContext::from_questionnaire(&q)?;

    let kinds = resolve_sections(sections)?;

    let client = AiClient::new(AiConfig::from_env())?;
    let mut orchestrator = Orchestrator::new(client);
    if let Some(id) = model {
        orchestrator = orchestrator.with_model(ModelId::from_id(id)?);
    }

    let report = orchestrator.generate_report(&ctx, &kinds);
    let doc = report.to_document(&ctx.company_name, ctx.industry.name);

    fs::write(output, serde_json::to_string_pretty(&doc)?)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "Generated {} section(s) for {} (total cost ${:.4})",
        report.sections.len(),
        ctx.company_name,
        report.total_cost_usd
    );
    println!("Report written to {}", output.display());
    Ok(())
}

fn cmd_export(
    report: &Path,
    format: ExportFormat,
    output: &Path,
    theme: Option<&Path>,
) -> Result<()> {
    let raw = fs::read_to_string(report)
        .with_context(|| format!("failed to read {}", report.display()))?;
    let doc: ReportDocument =
        serde_json::from_str(&raw).context("failed to parse report document JSON")?;

    let theme = match theme {
        Some(path) => DeckTheme::from_file(path)
            .with_context(|| format!("failed to load theme {}", path.display()))?,
        None => DeckTheme::default(),
    };

    fs::create_dir_all(output)
        .with_context(|| format!("failed to create {}", output.display()))?;

    if matches!(format, ExportFormat::Pdf | ExportFormat::Both) {
        let bytes = generate_document(&doc)?;
        let path = output.join(download_filename(&doc.company_name, "pdf"));
        fs::write(&path, bytes)?;
        println!("Wrote {}", path.display());
    }

    if matches!(format, ExportFormat::Pptx | ExportFormat::Both) {
        let bytes = generate_deck(&doc, &theme)?;
        let path = output.join(download_filename(&doc.company_name, "pptx"));
        fs::write(&path, bytes)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

fn cmd_lookup(query: &str) -> Result<()> {
    let Ok(api_key) = std::env::var("COMPANIES_HOUSE_API_KEY") else {
        bail!("COMPANIES_HOUSE_API_KEY is not set; company lookup is unavailable");
    };

    let lookup = CompanyLookup::new(api_key)?;
    let matches = lookup.search(query)?;

    if matches.is_empty() {
        println!("No active companies found for \"{}\"", query);
        return Ok(());
    }

    for company in matches {
        println!("{} ({})", company.name, company.number);
        if !company.address.is_empty() {
            println!("  {}", company.address);
        }
        if !company.sic_codes.is_empty() {
            println!("  SIC: {}", company.sic_codes.join(", "));
        }
    }
    Ok(())
}

/// Resolve section id arguments, defaulting to the full report.
fn resolve_sections(ids: &[String]) -> Result<Vec<SectionKind>> {
    if ids.is_empty() {
        return Ok(SectionKind::all().to_vec());
    }
    ids.iter()
        .map(|id| SectionKind::from_id(id).map_err(Into::into))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use compass_content::Section;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_resolve_sections_defaults_to_all() {
        let kinds = resolve_sections(&[]).unwrap();
        assert_eq!(kinds.len(), 9);
    }

    #[test]
    fn test_resolve_sections_rejects_unknown() {
        let result = resolve_sections(&["appendix".to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_export_writes_both_artifacts() {
        let dir = tempfile::tempdir().unwrap();

        let doc = ReportDocument {
            company_name: "Acme Ltd".to_string(),
            industry: "Retail & E-commerce".to_string(),
            sections: vec![Section::new(
                "executive-summary",
                "1. Executive Summary",
                "## Overview\n- a point\n\nBody. [Source: IBM, https://ibm.com]",
            )],
            generated_at: "2026-01-05T12:00:00Z".to_string(),
        };
        let report_path = dir.path().join("report.json");
        fs::write(&report_path, serde_json::to_string(&doc).unwrap()).unwrap();

        let out_dir = dir.path().join("out");
        cmd_export(&report_path, ExportFormat::Both, &out_dir, None).unwrap();

        assert!(out_dir.join("E5-Business-Case-Acme-Ltd.pdf").exists());
        assert!(out_dir.join("E5-Business-Case-Acme-Ltd.pptx").exists());
    }
}
