//! Insight CLI - Command-line interface for hrv-insight
//!
//! Commands:
//! - analyze: Turn sample records into an insight report
//! - validate: Validate sample records against hrv.sample.v1
//! - schema: Print schema information

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use hrv_insight::schema::{RawSample, SampleAdapter, SCHEMA_VERSION};
use hrv_insight::report::{ReportEncoder, REPORT_VERSION};
use hrv_insight::types::InsightReport;
use hrv_insight::ENGINE_VERSION;

/// Insight - On-device trend and stress inference for HRV time series
#[derive(Parser)]
#[command(name = "insight")]
#[command(author = "Wellspring Health")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Analyze HRV samples for trend and stress insights", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn sample records into an insight report
    Analyze {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        output_format: OutputFormat,

        /// Producer instance id for provenance tracking
        #[arg(long)]
        instance_id: Option<String>,
    },

    /// Validate sample records against hrv.sample.v1
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print schema information
    Schema {
        /// Schema to print (input or output)
        #[arg(value_enum)]
        schema_type: SchemaType,

        /// Output as JSON schema
        #[arg(long)]
        json_schema: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one record per line)
    Ndjson,
    /// JSON array of records
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

#[derive(Clone, ValueEnum)]
enum SchemaType {
    /// Input schema (hrv.sample.v1)
    Input,
    /// Output schema (hrv.insight.v1)
    Output,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), InsightCliError> {
    match cli.command {
        Commands::Analyze {
            input,
            output,
            input_format,
            output_format,
            instance_id,
        } => cmd_analyze(&input, &output, input_format, output_format, instance_id),

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),

        Commands::Schema {
            schema_type,
            json_schema,
        } => cmd_schema(schema_type, json_schema),
    }
}

fn cmd_analyze(
    input: &PathBuf,
    output: &PathBuf,
    input_format: InputFormat,
    output_format: OutputFormat,
    instance_id: Option<String>,
) -> Result<(), InsightCliError> {
    let records = read_records(input, &input_format)?;

    if records.is_empty() {
        return Err(InsightCliError::NoRecords);
    }

    let samples = SampleAdapter::to_samples(&records)?;

    let encoder = match instance_id {
        Some(id) => ReportEncoder::with_instance_id(id),
        None => ReportEncoder::new(),
    };
    let report = encoder.encode(&samples)?;

    let output_data = format_output(&report, &output_format)?;

    if output.to_string_lossy() == "-" {
        println!("{}", output_data);
    } else {
        fs::write(output, output_data)?;
    }

    Ok(())
}

fn cmd_validate(
    input: &PathBuf,
    input_format: InputFormat,
    json: bool,
) -> Result<(), InsightCliError> {
    let records = read_records(input, &input_format)?;
    let failures = SampleAdapter::validate_records(&records);

    let report = ValidationReport {
        total_records: records.len(),
        valid_records: records.len() - failures.len(),
        invalid_records: failures.len(),
        errors: failures
            .iter()
            .map(|f| ValidationErrorDetail {
                index: f.index,
                source_name: f.source_name.clone(),
                error: f.error.as_ref().map(|e| e.to_string()).unwrap_or_default(),
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total records:   {}", report.total_records);
        println!("Valid records:   {}", report.valid_records);
        println!("Invalid records: {}", report.invalid_records);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!(
                    "  - Record {} ({}): {}",
                    err.index,
                    err.source_name.as_deref().unwrap_or("unknown source"),
                    err.error
                );
            }
        }
    }

    if report.invalid_records > 0 {
        Err(InsightCliError::ValidationFailed(report.invalid_records))
    } else {
        Ok(())
    }
}

fn cmd_schema(schema_type: SchemaType, json_schema: bool) -> Result<(), InsightCliError> {
    match schema_type {
        SchemaType::Input => {
            if json_schema {
                println!("{}", get_input_json_schema());
            } else {
                println!("Input Schema: {}", SCHEMA_VERSION);
                println!();
                println!("One record per HRV sample:");
                println!();
                println!("- date: Calendar date, YYYY-MM-DD (required)");
                println!("- value: HRV in milliseconds (required, finite)");
                println!("- schema_version: {} (optional, checked when present)", SCHEMA_VERSION);
                println!("- source_name: Originating source, e.g. \"Apple Health\" (optional)");
                println!();
                println!("Records may arrive in any order; analysis sorts by date.");
            }
        }
        SchemaType::Output => {
            if json_schema {
                println!("{}", get_output_json_schema());
            } else {
                println!("Output Schema: {}", REPORT_VERSION);
                println!();
                println!("Insight report contains:");
                println!();
                println!("- report_version: Schema version ({})", REPORT_VERSION);
                println!("- producer: {{ name, version, instance_id }}");
                println!("- computed_at_utc: RFC 3339 timestamp");
                println!("- window: {{ sample_count, start_date, end_date }}");
                println!("- trend: {{ trend, change_pct, recent_avg_ms }}");
                println!("- stress: {{ is_stressed, level }}");
            }
        }
    }

    Ok(())
}

// Helper functions

fn read_records(
    input: &PathBuf,
    input_format: &InputFormat,
) -> Result<Vec<RawSample>, InsightCliError> {
    let input_data = if input.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            return Err(InsightCliError::NoInput);
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    let records = match input_format {
        InputFormat::Ndjson => SampleAdapter::parse_ndjson(&input_data)?,
        InputFormat::Json => SampleAdapter::parse_array(&input_data)?,
    };

    Ok(records)
}

fn format_output(
    report: &InsightReport,
    format: &OutputFormat,
) -> Result<String, InsightCliError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(report)?),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(report)?),
    }
}

fn get_input_json_schema() -> String {
    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "https://wellspring.health/schemas/hrv.sample.v1.json",
        "title": "hrv.sample.v1",
        "description": "hrv-insight sample record schema",
        "type": "object",
        "required": ["date", "value"],
        "properties": {
            "schema_version": {
                "type": "string",
                "const": "hrv.sample.v1"
            },
            "date": { "type": "string", "format": "date" },
            "value": { "type": "number" },
            "source_name": { "type": "string" }
        }
    })
    .to_string()
}

fn get_output_json_schema() -> String {
    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "https://wellspring.health/schemas/hrv.insight.v1.json",
        "title": "hrv.insight.v1",
        "description": "hrv-insight report schema",
        "type": "object",
        "required": ["report_version", "producer", "computed_at_utc", "window", "trend", "stress"],
        "properties": {
            "report_version": { "type": "string" },
            "producer": {
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "version": { "type": "string" },
                    "instance_id": { "type": "string" }
                }
            },
            "computed_at_utc": { "type": "string" },
            "window": {
                "type": "object",
                "properties": {
                    "sample_count": { "type": "integer" },
                    "start_date": { "type": "string", "format": "date" },
                    "end_date": { "type": "string", "format": "date" }
                }
            },
            "trend": {
                "type": "object",
                "properties": {
                    "trend": { "type": "string", "enum": ["improving", "declining", "neutral"] },
                    "change_pct": { "type": "number" },
                    "recent_avg_ms": { "type": "number" }
                }
            },
            "stress": {
                "type": "object",
                "properties": {
                    "is_stressed": { "type": "boolean" },
                    "level": { "type": "string" }
                }
            }
        }
    })
    .to_string()
}

// Error types

#[derive(Debug)]
enum InsightCliError {
    Io(io::Error),
    Analysis(hrv_insight::AnalysisError),
    Json(serde_json::Error),
    NoRecords,
    NoInput,
    ValidationFailed(usize),
}

impl From<io::Error> for InsightCliError {
    fn from(e: io::Error) -> Self {
        InsightCliError::Io(e)
    }
}

impl From<hrv_insight::AnalysisError> for InsightCliError {
    fn from(e: hrv_insight::AnalysisError) -> Self {
        InsightCliError::Analysis(e)
    }
}

impl From<serde_json::Error> for InsightCliError {
    fn from(e: serde_json::Error) -> Self {
        InsightCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<InsightCliError> for CliError {
    fn from(e: InsightCliError) -> Self {
        match e {
            InsightCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            InsightCliError::Analysis(e) => CliError {
                code: "ANALYSIS_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Ensure input matches the hrv.sample.v1 schema".to_string()),
            },
            InsightCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            InsightCliError::NoRecords => CliError {
                code: "NO_RECORDS".to_string(),
                message: "No sample records found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            InsightCliError::NoInput => CliError {
                code: "NO_INPUT".to_string(),
                message: "Stdin is a terminal".to_string(),
                hint: Some("Pipe sample records in, or pass --input <file>".to_string()),
            },
            InsightCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} records failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    total_records: usize,
    valid_records: usize,
    invalid_records: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(serde::Serialize)]
struct ValidationErrorDetail {
    index: usize,
    source_name: Option<String>,
    error: String,
}
