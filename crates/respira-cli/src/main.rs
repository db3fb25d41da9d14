//! Respira CLI

mod report;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use respira_core::{BinarySymptom, InferenceEngine, KnowledgeBase, PatientProfile};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use report::{DiagnosisReport, ReportFormat};

#[derive(Parser)]
#[command(name = "respira")]
#[command(about = "Respiratory disease ranking from reported symptoms")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Knowledge base JSON file (defaults to the built-in table)
    #[arg(short, long, global = true)]
    knowledge_base: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the hard-coded verification patient and print the top 4
    Verify,

    /// Rank diseases for a patient profile
    Diagnose(DiagnoseArgs),

    /// List symptom keys used by the knowledge base
    Symptoms,

    /// List diseases with rule counts and maximum scores
    Diseases,
}

#[derive(Args)]
struct DiagnoseArgs {
    /// Patient profile JSON file; symptom flags below are applied on top
    #[arg(short, long)]
    profile: Option<PathBuf>,

    /// Fever level (none, low, high)
    #[arg(long)]
    fever: Option<String>,

    /// Cough type (none, dry, wet, blood)
    #[arg(long)]
    cough: Option<String>,

    #[arg(long)]
    shortness_of_breath: bool,

    #[arg(long)]
    wheezing: bool,

    #[arg(long)]
    chest_pain: bool,

    #[arg(long)]
    fatigue: bool,

    #[arg(long)]
    loss_taste_smell: bool,

    #[arg(long)]
    smoking_history: bool,

    /// Patient age (display only)
    #[arg(long)]
    age: Option<u32>,

    /// Patient gender (display only)
    #[arg(long)]
    gender: Option<String>,

    /// Show only the N best matches
    #[arg(short, long)]
    top: Option<usize>,

    /// Include matched and penalized rules
    #[arg(short, long)]
    explain: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: ReportFormat,
}

impl DiagnoseArgs {
    fn build_profile(&self) -> anyhow::Result<PatientProfile> {
        let mut profile = match &self.profile {
            Some(path) => read_profile(path)?,
            None => PatientProfile::new(),
        };

        if let Some(fever) = &self.fever {
            profile = profile.with_fever(fever.as_str());
        }
        if let Some(cough) = &self.cough {
            profile = profile.with_cough(cough.as_str());
        }
        if let Some(age) = self.age {
            profile = profile.with_age(age);
        }
        if let Some(gender) = &self.gender {
            profile = profile.with_gender(gender.as_str());
        }

        let flags = [
            (BinarySymptom::ShortnessOfBreath, self.shortness_of_breath),
            (BinarySymptom::Wheezing, self.wheezing),
            (BinarySymptom::ChestPain, self.chest_pain),
            (BinarySymptom::Fatigue, self.fatigue),
            (BinarySymptom::LossTasteSmell, self.loss_taste_smell),
            (BinarySymptom::SmokingHistory, self.smoking_history),
        ];
        for (symptom, on) in flags {
            if on {
                profile = profile.with_symptom(symptom);
            }
        }

        Ok(profile)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let kb = load_knowledge_base(cli.knowledge_base.as_deref())?;

    match cli.command {
        Commands::Verify => cmd_verify(&kb),
        Commands::Diagnose(args) => cmd_diagnose(&kb, &args)?,
        Commands::Symptoms => cmd_symptoms(&kb),
        Commands::Diseases => cmd_diseases(&kb),
    }

    Ok(())
}

fn load_knowledge_base(path: Option<&Path>) -> anyhow::Result<KnowledgeBase> {
    let kb = match path {
        Some(path) => KnowledgeBase::load(path)
            .with_context(|| format!("Failed to load knowledge base: {}", path.display()))?,
        None => KnowledgeBase::reference(),
    };
    debug!(diseases = kb.len(), fingerprint = %kb.fingerprint(), "Knowledge base ready");
    Ok(kb)
}

fn read_profile(path: &Path) -> anyhow::Result<PatientProfile> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile: {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Profile is not a JSON object: {}", path.display()))
}

/// The fixed patient used as a smoke test.
fn verification_profile() -> PatientProfile {
    PatientProfile::new()
        .with_fever("high")
        .with_cough("dry")
        .with_symptom(BinarySymptom::ShortnessOfBreath)
        .with_symptom(BinarySymptom::Fatigue)
        .with_symptom(BinarySymptom::LossTasteSmell)
}

fn cmd_verify(kb: &KnowledgeBase) {
    let engine = InferenceEngine::new(kb);

    println!("Running verification test case (hard-coded patient):");
    for result in engine.diagnose(&verification_profile()).iter().take(4) {
        println!(" - {}: {:.1}% match", result.disease, result.percent);
    }
}

fn cmd_diagnose(kb: &KnowledgeBase, args: &DiagnoseArgs) -> anyhow::Result<()> {
    let profile = args.build_profile()?;
    let engine = InferenceEngine::new(kb);

    let present: Vec<String> = engine.present_set(&profile).iter().map(String::from).collect();
    let results = engine.diagnose_with_explanation(&profile);
    if let Some(best) = results.first() {
        info!("Best match: {} ({:.1}%)", best.disease, best.percent);
    }

    let report = DiagnosisReport::new(kb, present, results, args.top, args.explain);
    println!("{}", report.render(args.format)?);
    Ok(())
}

fn cmd_symptoms(kb: &KnowledgeBase) {
    for key in kb.symptom_keys() {
        println!("{}", key);
    }
}

fn cmd_diseases(kb: &KnowledgeBase) {
    println!("{:<24} {:>5} {:>9}", "Disease", "Rules", "Max score");
    for disease in kb.diseases() {
        println!(
            "{:<24} {:>5} {:>9.2}",
            disease.name,
            disease.rules.len(),
            disease.max_positive_score()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_build_profile() {
        let cli = Cli::parse_from([
            "respira",
            "diagnose",
            "--fever",
            "high",
            "--cough",
            "dry",
            "--fatigue",
            "--loss-taste-smell",
            "--top",
            "2",
        ]);
        let Commands::Diagnose(args) = cli.command else {
            panic!("expected diagnose");
        };
        let profile = args.build_profile().unwrap();

        assert_eq!(profile.fever.as_deref(), Some("high"));
        assert!(profile.fatigue);
        assert!(profile.loss_taste_smell);
        assert!(!profile.wheezing);
        assert_eq!(args.top, Some(2));
        assert_eq!(args.format, ReportFormat::Text);
    }

    #[test]
    fn test_verification_profile_ranks_covid_first() {
        let kb = KnowledgeBase::reference();
        let results = InferenceEngine::new(&kb).diagnose(&verification_profile());

        assert_eq!(results[0].disease, "COVID-19");
        assert!(results[0].percent >= 70.0);
    }
}
