use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use support_triage::config::AppConfig;
use support_triage::error::AppError;
use support_triage::telemetry;
use support_triage::workflows::triage::{
    read_csv_tickets, read_ticket_text, ticket_text_from_bytes, RuleConfig, TriagePipeline,
};
use tracing::info;

use crate::demo::run_demo;
use crate::output::{render_text, summaries_json, summary_json, OutputFormat};

#[derive(Parser, Debug)]
#[command(
    name = "support-triage",
    about = "Classify, route, and draft replies for customer support tickets",
    version
)]
struct Cli {
    /// YAML rule file (overrides TRIAGE_RULES_PATH; defaults to the built-in rules)
    #[arg(long, global = true)]
    rules: Option<PathBuf>,
    /// Output format for triage results
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Triage a single ticket from --text, --file, or stdin
    Process(ProcessArgs),
    /// Triage every row of a CSV export (columns: content, optional id)
    Batch(BatchArgs),
    /// Run the built-in sample tickets (default command)
    Demo,
}

#[derive(Args, Debug)]
struct ProcessArgs {
    /// Ticket text
    #[arg(long, conflicts_with = "file")]
    text: Option<String>,
    /// File holding the ticket text
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// CSV file with a content column
    #[arg(long)]
    csv: PathBuf,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let rules_path = cli.rules.or(config.rules_path);
    let pipeline = TriagePipeline::new(load_rules(rules_path.as_deref())?)?;
    let rules_source = rules_path
        .as_deref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "standard".to_string());
    info!(?config.environment, rules = %rules_source, "support triage ready");

    match cli.command.unwrap_or(Command::Demo) {
        Command::Process(args) => run_process(&pipeline, args, cli.format),
        Command::Batch(args) => run_batch(&pipeline, args, cli.format),
        Command::Demo => run_demo(&pipeline, cli.format),
    }
}

fn load_rules(path: Option<&Path>) -> Result<RuleConfig, AppError> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading triage rules");
            Ok(RuleConfig::load(path)?)
        }
        None => Ok(RuleConfig::standard()),
    }
}

fn ticket_input(args: ProcessArgs) -> Result<String, AppError> {
    match (args.text, args.file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => Ok(ticket_text_from_bytes(fs::read(path)?)?),
        (None, None) => Ok(read_ticket_text(io::stdin().lock())?),
    }
}

fn run_process(
    pipeline: &TriagePipeline,
    args: ProcessArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let text = ticket_input(args)?;
    let result = pipeline.process(&text)?;

    match format {
        OutputFormat::Text => println!("{}", render_text(&result)),
        OutputFormat::Json => println!("{}", summary_json(&result)?),
    }
    Ok(())
}

fn run_batch(
    pipeline: &TriagePipeline,
    args: BatchArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let tickets = read_csv_tickets(File::open(&args.csv)?)?;
    info!(path = %args.csv.display(), tickets = tickets.len(), "triaging CSV batch");
    let results = pipeline.process_tickets(tickets)?;

    match format {
        OutputFormat::Json => println!("{}", summaries_json(&results)?),
        OutputFormat::Text => {
            for result in &results {
                println!("{}\n", render_text(result));
            }
            let escalated = results
                .iter()
                .filter(|result| result.escalation().escalation_needed)
                .count();
            println!("{} tickets triaged, {} escalated", results.len(), escalated);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from([
            "support-triage",
            "process",
            "--text",
            "My invoice is wrong",
            "--format",
            "json",
            "--rules",
            "rules.yaml",
        ])
        .expect("arguments parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.rules, Some(PathBuf::from("rules.yaml")));
        match cli.command {
            Some(Command::Process(args)) => {
                assert_eq!(args.text.as_deref(), Some("My invoice is wrong"))
            }
            other => panic!("expected process command, got {other:?}"),
        }
    }

    #[test]
    fn text_and_file_are_exclusive() {
        let parsed = Cli::try_parse_from([
            "support-triage",
            "process",
            "--text",
            "hello",
            "--file",
            "ticket.txt",
        ]);

        assert!(parsed.is_err());
    }

    #[test]
    fn inline_text_wins_as_ticket_input() {
        let args = ProcessArgs {
            text: Some("Login is broken".to_string()),
            file: None,
        };

        assert_eq!(ticket_input(args).expect("input read"), "Login is broken");
    }

    #[test]
    fn non_utf8_ticket_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(&[0x66, 0x6f, 0xff]).expect("fixture written");

        let err = ticket_input(ProcessArgs {
            text: None,
            file: Some(file.path().to_path_buf()),
        })
        .expect_err("invalid utf8 rejected");

        assert!(matches!(err, AppError::Triage(_)));
    }
}
