use clap::{Parser, Subcommand};
use std::path::PathBuf;
use triage_core::{
    resolve_rules_path, AssessmentInput, AssessmentResult, CoreConfig, RuleSet, SymptomEngine,
};

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Symptom triage CLI (demo only, not medical advice)")]
struct Cli {
    /// Rules file (defaults to TRIAGE_RULES_PATH, then the shipped rules)
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess symptoms
    Assess {
        /// Age in years
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=120))]
        age: u32,
        /// Sex (optional, not used for scoring)
        #[arg(long)]
        sex: Option<String>,
        /// Symptoms, comma-separated; may be repeated
        #[arg(long = "symptoms", short = 's')]
        symptoms: Vec<String>,
        /// Duration of symptoms in days
        #[arg(long)]
        duration_days: Option<u32>,
        /// Extra notes
        #[arg(long, default_value = "")]
        notes: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the canonical tokens for a piece of text
    Normalise {
        /// Text to normalise
        text: String,
    },
    /// Load and validate a rules file
    CheckRules,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use 'triage --help' for commands");
        return Ok(());
    };

    let rules_override = cli
        .rules
        .or_else(|| std::env::var("TRIAGE_RULES_PATH").ok().map(PathBuf::from));
    let cfg = CoreConfig::new(resolve_rules_path(rules_override)?)?;

    let engine = SymptomEngine::from_config(&cfg)?;

    match command {
        Commands::Assess {
            age,
            sex,
            symptoms,
            duration_days,
            notes,
            json,
        } => {
            let input = AssessmentInput {
                age,
                sex,
                symptoms: split_symptoms(&symptoms),
                duration_days,
                notes,
            };
            let result = engine.assess(&input);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_report(&result);
            }
        }
        Commands::Normalise { text } => {
            println!("{}", engine.rules().normalise(&text).join(" "));
        }
        Commands::CheckRules => {
            println!("Rules OK: {}", cfg.rules_path().display());
            println!("{}", rules_summary(engine.rules()));
        }
    }

    Ok(())
}

/// Splits comma-separated symptom entries, dropping blanks.
fn split_symptoms(entries: &[String]) -> Vec<String> {
    entries
        .iter()
        .flat_map(|entry| entry.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn rules_summary(rules: &RuleSet) -> String {
    format!(
        "conditions: {}, red flags: {}, synonyms: {}, stopwords: {}",
        rules.conditions().len(),
        rules.red_flags().len(),
        rules.keyword_normalization().len(),
        rules.stopwords().len()
    )
}

fn print_report(result: &AssessmentResult) {
    println!("Triage level: {}", result.triage_level);
    if !result.triage_reason.is_empty() {
        println!("Reasons:");
        for reason in &result.triage_reason {
            println!("  - {reason}");
        }
    }

    println!("Likely conditions (heuristic ranking):");
    if result.likely_conditions.is_empty() {
        println!("  No clear match. Consider consulting a clinician.");
    } else {
        for item in &result.likely_conditions {
            println!("  - {} (score: {})", item.condition, item.score);
        }
    }

    println!("Advice:");
    for advice in &result.advice {
        println!("  - {advice}");
    }
}
