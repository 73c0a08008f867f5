//! CLI tool for card brand classification.
//!
//! # Usage
//!
//! ```bash
//! # Classify a card number
//! cardclass 4111111111111111
//!
//! # Prompt for the number on stdin
//! cardclass
//!
//! # Checksum-gated policy, JSON output
//! cardclass --policy checksum-gated --output json "4111 1111 1111 1111"
//!
//! # Custom rule table
//! cardclass --rules brands.json 5067000000000000
//!
//! # List the active rule table
//! cardclass --list-brands
//! ```

use card_classifier::mask::mask_digits;
use card_classifier::{
    CardClassifier, ClassificationResult, ClassifierConfig, Normalization, ResultPolicy, RuleSet,
};
use clap::{Parser, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cardclass")]
#[command(author, version, about = "Identify a payment card's brand and verify its checksum")]
struct Cli {
    /// Card number to classify (spaces and dashes allowed). Prompts if omitted.
    card_number: Option<String>,

    /// Order of brand matching and checksum verification
    #[arg(short, long, default_value = "match-first")]
    policy: PolicyArg,

    /// Skip the 13-19 digit length guard
    #[arg(long)]
    no_length_guard: bool,

    /// Strip every non-digit instead of only spaces and dashes
    #[arg(long)]
    lenient: bool,

    /// JSON rule table replacing the built-in brands
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// List brand rules in evaluation order and exit
    #[arg(long)]
    list_brands: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    output: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    MatchFirst,
    ChecksumGated,
}

impl From<PolicyArg> for ResultPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::MatchFirst => ResultPolicy::MatchFirst,
            PolicyArg::ChecksumGated => ResultPolicy::ChecksumGated,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let rules = match &cli.rules {
        Some(path) => match RuleSet::from_json_file(path) {
            Ok(rules) => rules,
            Err(e) => {
                eprintln!("Error: failed to load rules from {}: {}", path.display(), e);
                return ExitCode::from(2);
            }
        },
        None => RuleSet::default(),
    };

    if cli.list_brands {
        cmd_brands(&rules);
        return ExitCode::SUCCESS;
    }

    let mut config = ClassifierConfig::default().with_policy(cli.policy.into());
    if cli.no_length_guard {
        config = config.without_length_guard();
    }
    if cli.lenient {
        config = config.with_normalization(Normalization::DigitsOnly);
    }
    let classifier = CardClassifier::new(rules, config);

    let input = match cli.card_number {
        Some(number) => Some(number),
        None => prompt(),
    };

    let result = classifier.classify_input(input.as_deref());
    print_result(&result, cli.output);

    if result.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Reads one line from stdin. `None` on EOF or read failure.
fn prompt() -> Option<String> {
    println!("Enter the card number to identify its brand:");
    print!("> ");
    if io::stdout().flush().is_err() {
        return None;
    }

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
    }
}

fn print_result(result: &ClassificationResult, output: OutputFormat) {
    match output {
        OutputFormat::Text => {
            println!("Valid: {}", if result.valid { "yes" } else { "no" });
            if let Some(brand) = &result.brand {
                println!("Brand: {}", brand);
            }
            if let Some(number) = &result.normalized_number {
                println!("Masked: {}", mask_digits(number));
            }
            if let Some(message) = &result.message {
                println!("Error: {}", message);
            }
        }
        OutputFormat::Json => match serde_json::to_string_pretty(&masked(result)) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error: {}", e),
        },
    }
}

/// Copy of the result safe to print: the number keeps only its last four digits.
fn masked(result: &ClassificationResult) -> ClassificationResult {
    let mut masked = result.clone();
    masked.normalized_number = result.normalized_number.as_deref().map(mask_digits);
    masked
}

fn cmd_brands(rules: &RuleSet) {
    for (i, rule) in rules.iter().enumerate() {
        println!("{:>2}. {:<18} {}", i + 1, rule.name(), rule.pattern());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_output_is_masked() {
        let result = CardClassifier::default().classify("4111111111111112");
        let json = serde_json::to_string(&masked(&result)).unwrap();
        assert!(!json.contains("4111111111111112"));
        assert!(json.contains("****-****-****-1112"));
        assert!(json.contains("\"brand\":\"Visa\""));
    }

    #[test]
    fn test_masking_keeps_verdict() {
        let result = CardClassifier::default().classify("371449635398431");
        let safe = masked(&result);
        assert_eq!(safe.valid, result.valid);
        assert_eq!(safe.brand, result.brand);
        assert_eq!(safe.normalized_number.as_deref(), Some("****-****-***8431"));

        let result = CardClassifier::default().classify("");
        assert_eq!(masked(&result).normalized_number, None);
    }
}
