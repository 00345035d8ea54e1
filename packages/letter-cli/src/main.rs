// Operator CLI: crawl company facts, check drafts, generate letters

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use fact_extraction::{CrawlConfig, FactCrawler, FactExtractionResult, HttpFetcher};
use quality_gate::{
    DetailedScore, EventPosition, Evaluation, GenerationAttempt, Mode, QualityResult,
    RetryConfig, RetryOrchestrator, ValidateOptions,
};

#[derive(Parser)]
#[command(name = "letter")]
#[command(about = "Crawl company facts, then check or generate sales letters")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl a company site and print the extracted facts as JSON
    Facts {
        /// Base URL of the company site
        url: String,

        /// Maximum pages sent to the extractor
        #[arg(long, default_value_t = 8)]
        max_pages: usize,
    },

    /// Validate and score a drafted letter
    Check {
        /// File containing the letter body
        file: PathBuf,

        #[command(flatten)]
        gate: GateArgs,
    },

    /// Generate a letter with the retry loop
    Generate {
        /// File containing the drafting prompt
        #[arg(long)]
        prompt_file: PathBuf,

        /// Crawl this company site first and use its facts as evidence
        #[arg(long)]
        url: Option<String>,

        /// Attempts including the first
        #[arg(long, default_value_t = 2)]
        max_attempts: usize,

        #[command(flatten)]
        gate: GateArgs,
    },
}

/// Options shared by the commands that evaluate a letter.
#[derive(clap::Args)]
struct GateArgs {
    #[arg(long, value_enum, default_value_t = ModeArg::Complete)]
    mode: ModeArg,

    /// JSON file with facts from a previous `facts` run
    #[arg(long)]
    facts: Option<PathBuf>,

    /// Evidence the letter may cite for figures (repeatable)
    #[arg(long = "proof-point")]
    proof_points: Vec<String>,

    /// The recipient's recent news is known
    #[arg(long)]
    recent_news: bool,

    /// Sender's position in event mode
    #[arg(long, value_enum)]
    event_position: Option<PositionArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Draft,
    Complete,
    Event,
    Consulting,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Draft => Mode::Draft,
            ModeArg::Complete => Mode::Complete,
            ModeArg::Event => Mode::Event,
            ModeArg::Consulting => Mode::Consulting,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PositionArg {
    Exhibitor,
    Visitor,
}

impl From<PositionArg> for EventPosition {
    fn from(position: PositionArg) -> Self {
        match position {
            PositionArg::Exhibitor => EventPosition::Exhibitor,
            PositionArg::Visitor => EventPosition::Visitor,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Facts { url, max_pages } => {
            let crawl_config = CrawlConfig::default().with_max_pages(max_pages);
            match crawl(&config, &url, crawl_config).await? {
                Some(result) => println!("{}", serde_json::to_string_pretty(&result)?),
                None => eprintln!("{}", "No usable facts found".yellow()),
            }
        }
        Commands::Check { file, gate } => {
            let body = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let evidence = gate.evidence(None)?;
            let evaluation = gate.evaluation(evidence.as_ref());
            let (validation, score) = evaluation.evaluate(&body);
            print_evaluation(&validation, &score);
        }
        Commands::Generate {
            prompt_file,
            url,
            max_attempts,
            gate,
        } => {
            let prompt = std::fs::read_to_string(&prompt_file)
                .with_context(|| format!("Failed to read {}", prompt_file.display()))?;
            let crawled = match url {
                Some(url) => crawl(&config, &url, CrawlConfig::default()).await?,
                None => None,
            };
            let evidence = gate.evidence(crawled)?;
            let evaluation = gate.evaluation(evidence.as_ref());
            let prompt = match &evidence {
                Some(result) => with_evidence(&prompt, result),
                None => prompt,
            };

            let drafter = config.openai()?;
            let orchestrator = RetryOrchestrator::new(drafter, evaluation)
                .with_config(RetryConfig::default().with_max_attempts(max_attempts));
            let outcome = orchestrator
                .generate(&prompt)
                .await
                .context("Letter generation failed")?;

            for attempt in &outcome.attempts {
                print_attempt(attempt);
            }
            println!();
            println!(
                "{} attempt {} ({})",
                "Selected".bright_green().bold(),
                outcome.selected.attempt_index + 1,
                if outcome.accepted { "accepted" } else { "best effort" }
            );
            println!();
            println!("{}", outcome.selected.draft_text);
        }
    }

    Ok(())
}

async fn crawl(
    config: &Config,
    url: &str,
    crawl_config: CrawlConfig,
) -> Result<Option<FactExtractionResult>> {
    let extractor = Arc::new(config.openai()?);
    let fetcher = HttpFetcher::new(&crawl_config.user_agent).context("Failed to build HTTP client")?;
    let crawler = FactCrawler::new(fetcher, extractor).with_config(crawl_config);

    tracing::info!(url = %url, "Crawling company site");
    Ok(crawler.extract_facts(url).await)
}

impl GateArgs {
    /// Facts to write and check against: a fresh crawl wins over `--facts`.
    fn evidence(&self, crawled: Option<FactExtractionResult>) -> Result<Option<FactExtractionResult>> {
        if crawled.is_some() {
            return Ok(crawled);
        }
        let Some(path) = &self.facts else {
            return Ok(None);
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let saved = serde_json::from_str(&raw).context("Facts file is not a facts result")?;
        Ok(Some(saved))
    }

    fn evaluation(&self, evidence: Option<&FactExtractionResult>) -> Evaluation {
        let mut options = ValidateOptions::for_mode(self.mode.into())
            .with_recent_news(self.recent_news)
            .with_proof_points(!self.proof_points.is_empty());
        if let Some(position) = self.event_position {
            options = options.with_event_position(position.into());
        }

        let evaluation = Evaluation::new(options).with_proof_points(self.proof_points.clone());
        match evidence {
            Some(result) => evaluation.with_extraction(result),
            None => evaluation,
        }
    }
}

/// Append the crawled facts and the primary source URLs to the drafting
/// prompt, so the drafter can quote what the gate checks the opening for.
fn with_evidence(prompt: &str, evidence: &FactExtractionResult) -> String {
    if evidence.facts.is_empty() {
        return prompt.to_string();
    }

    let mut out = format!("{}\n\n【企業の事実】冒頭ではこの中から引用してください。", prompt.trim_end());
    for fact in &evidence.facts {
        out.push_str(&format!("\n- {}（{}）", fact.content, fact.source_url));
    }

    let primary: Vec<&str> = evidence.primary_sources().map(|s| s.url.as_str()).collect();
    if !primary.is_empty() {
        out.push_str("\n\n【主な出典】本文には出典表記を書かないでください。");
        for url in primary {
            out.push_str(&format!("\n- {}", url));
        }
    }
    out
}

fn print_evaluation(validation: &QualityResult, score: &DetailedScore) {
    if validation.ok {
        println!("{}", "✓ Validation passed".bright_green().bold());
    } else {
        println!("{}", "✗ Validation failed".bright_red().bold());
        for reason in &validation.reasons {
            println!("  - {}", reason);
        }
    }

    println!();
    println!("{} {}/100", "Score".bright_cyan().bold(), score.total);
    for (axis, points) in &score.breakdown {
        println!("  {:<24} {:>4}", axis, points);
    }

    if !score.suggestions.is_empty() {
        println!();
        println!("{}", "Suggestions".bright_yellow().bold());
        for suggestion in &score.suggestions {
            println!("  - {}", suggestion);
        }
    }
}

fn print_attempt(attempt: &GenerationAttempt) {
    println!(
        "{} {}: score {}, {}",
        "Attempt".bright_cyan(),
        attempt.attempt_index + 1,
        attempt.score.total,
        if attempt.validation.ok {
            "valid".green()
        } else {
            "invalid".red()
        }
    );
    for reason in &attempt.validation.reasons {
        println!("  - {}", reason);
    }
}
