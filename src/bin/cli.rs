//! replog CLI
//!
//! Command-line client for a running replog API server:
//! - Log workouts
//! - List, update and delete records
//! - Show dashboard statistics
//! - Export records as CSV

use anyhow::{bail, Context};
use chrono::{Duration, Local};
use clap::{Parser, Subcommand, ValueEnum};
use replog::storage::{ExerciseRecord, RecordTimestamp};
use serde_json::{Map, Value};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "replog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Personal exercise log")]
#[command(long_about = "replog records workouts and summarizes your training.\nLog push-ups, squats or anything else, then check weekly load and monthly rollups.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:5000", global = true)]
    pub api_url: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log a workout
    Log {
        /// Exercise identifier (push-up, squat, ...)
        exercise: String,
        /// Repetitions
        #[arg(short, long)]
        reps: Option<u64>,
        /// Duration in seconds
        #[arg(short, long)]
        duration: Option<f64>,
        /// Timestamp (default: now). Supports: "now", "yesterday", ISO 8601
        #[arg(short, long)]
        time: Option<String>,
        /// Extra fields in key=value format
        #[arg(short = 'F', long = "field")]
        fields: Vec<String>,
    },

    /// Show the newest records
    Recent,

    /// List all records with their index
    List,

    /// Show statistics (default: last 30 days)
    Stats {
        /// First day, YYYY-MM-DD
        #[arg(long, requires = "end")]
        start: Option<String>,
        /// Last day, YYYY-MM-DD
        #[arg(long, requires = "start")]
        end: Option<String>,
    },

    /// Update fields of the record at INDEX
    Update {
        /// Record index (see `list`)
        index: i64,
        #[arg(long)]
        exercise: Option<String>,
        #[arg(short, long)]
        reps: Option<u64>,
        #[arg(short, long)]
        duration: Option<f64>,
        #[arg(short, long)]
        time: Option<String>,
    },

    /// Delete the record at INDEX
    Delete {
        /// Record index (see `list`)
        index: i64,
    },

    /// Export all records as CSV
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let api = |path: &str| format!("{}{}", cli.api_url.trim_end_matches('/'), path);

    match cli.command {
        Commands::Log {
            exercise,
            reps,
            duration,
            time,
            fields,
        } => {
            let mut record = ExerciseRecord::new(exercise).datetime(resolve_time(time.as_deref())?);
            if let Some(reps) = reps {
                record = record.reps(reps);
            }
            if let Some(duration) = duration {
                record = record.duration(duration);
            }
            for field in &fields {
                let (key, value) = parse_field(field)?;
                record = record.field(key, value);
            }

            let response = client
                .post(api("/api/v1/records"))
                .json(&record)
                .send()
                .await
                .with_context(|| connect_hint(&cli.api_url))?;
            let ack = expect_success(response).await?;

            println!(
                "Logged {} at {} (index {})",
                record.exercise_name(),
                record.datetime_str().unwrap_or("-"),
                ack["index"].as_u64().unwrap_or(0)
            );
        }

        Commands::Recent => {
            let response = client
                .get(api("/api/v1/records/recent"))
                .send()
                .await
                .with_context(|| connect_hint(&cli.api_url))?;
            let records = expect_success(response).await?;

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
                OutputFormat::Table => print_records(&records, false),
            }
        }

        Commands::List => {
            let response = client
                .get(api("/api/v1/records"))
                .send()
                .await
                .with_context(|| connect_hint(&cli.api_url))?;
            let records = expect_success(response).await?;

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
                OutputFormat::Table => print_records(&records, true),
            }
        }

        Commands::Stats { start, end } => {
            let mut request = client.get(api("/api/v1/stats"));
            if let (Some(start), Some(end)) = (&start, &end) {
                request = request.query(&[("start", start), ("end", end)]);
            }

            let response = request
                .send()
                .await
                .with_context(|| connect_hint(&cli.api_url))?;
            let stats = expect_success(response).await?;

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
                OutputFormat::Table => print_stats(&stats),
            }
        }

        Commands::Update {
            index,
            exercise,
            reps,
            duration,
            time,
        } => {
            let mut body = Map::new();
            body.insert("index".to_string(), index.into());
            if let Some(exercise) = exercise {
                body.insert("exercise".to_string(), exercise.into());
            }
            if let Some(reps) = reps {
                body.insert("reps".to_string(), reps.into());
            }
            if let Some(duration) = duration {
                body.insert("duration".to_string(), duration.into());
            }
            if let Some(time) = time {
                body.insert("datetime".to_string(), resolve_time(Some(&time))?.into());
            }
            if body.len() == 1 {
                bail!("Nothing to update. Pass at least one of --exercise, --reps, --duration, --time");
            }

            let response = client
                .post(api("/api/v1/records/update"))
                .json(&body)
                .send()
                .await
                .with_context(|| connect_hint(&cli.api_url))?;
            expect_success(response).await?;

            println!("Updated record {}", index);
        }

        Commands::Delete { index } => {
            let response = client
                .post(api("/api/v1/records/delete"))
                .json(&serde_json::json!({ "index": index }))
                .send()
                .await
                .with_context(|| connect_hint(&cli.api_url))?;
            expect_success(response).await?;

            println!("Deleted record {}", index);
        }

        Commands::Export { output } => {
            let response = client
                .get(api("/api/v1/export"))
                .send()
                .await
                .with_context(|| connect_hint(&cli.api_url))?;

            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                bail!("Export failed ({}): {}", status, text);
            }

            let data = response.bytes().await?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &data)
                        .with_context(|| format!("Cannot write {:?}", path))?;
                    println!("Exported to {:?}", path);
                }
                None => {
                    print!("{}", String::from_utf8_lossy(&data));
                }
            }
        }

        Commands::Config { output } => {
            let config = replog::config::generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn connect_hint(api_url: &str) -> String {
    format!(
        "Cannot connect to replog API at {}. Make sure the server is running: cargo run --bin replog",
        api_url
    )
}

/// Turn a non-2xx response into an error carrying the server's message
async fn expect_success(response: reqwest::Response) -> anyhow::Result<Value> {
    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);

    if status.is_success() {
        return Ok(body);
    }

    let message = body["error"]["message"]
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string());
    bail!("Request failed ({}): {}", status, message)
}

/// Resolve `--time` into a datetime string with the local offset
fn resolve_time(time: Option<&str>) -> anyhow::Result<String> {
    let format = "%Y-%m-%dT%H:%M:%S%:z";
    match time {
        None | Some("now") => Ok(Local::now().format(format).to_string()),
        Some("yesterday") => Ok((Local::now() - Duration::days(1)).format(format).to_string()),
        Some(s) => {
            if RecordTimestamp::parse(s).is_none() {
                bail!("Invalid timestamp format: {}", s);
            }
            Ok(s.to_string())
        }
    }
}

/// Parse `key=value`; the value is JSON when it parses as such, else a string
fn parse_field(field: &str) -> anyhow::Result<(String, Value)> {
    let Some((key, raw)) = field.split_once('=') else {
        bail!("Invalid field '{}', expected key=value", field);
    };
    let key = key.trim();
    if key.is_empty() || key == "index" {
        bail!("Invalid field name '{}'", key);
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn print_records(records: &Value, with_index: bool) {
    let rows = match records.as_array() {
        Some(rows) if !rows.is_empty() => rows,
        _ => {
            println!("No records yet.");
            println!();
            println!("Log your first workout with:");
            println!("  replog-cli log push-up --reps 20");
            return;
        }
    };

    if with_index {
        print!("{:<6} ", "Index");
    }
    println!("{:<26} {:<12} {:>6} {:>9}", "Time", "Exercise", "Reps", "Duration");
    println!("{}", "-".repeat(if with_index { 63 } else { 56 }));

    for row in rows {
        if with_index {
            print!("{:<6} ", cell(&row["index"]));
        }
        println!(
            "{:<26} {:<12} {:>6} {:>9}",
            cell(&row["datetime"]),
            cell(&row["exercise"]),
            cell(&row["reps"]),
            cell(&row["duration"])
        );
    }
}

fn print_stats(stats: &Value) {
    let total_seconds = stats["total_duration"].as_f64().unwrap_or(0.0).max(0.0) as u64;
    println!("Workouts: {}", stats["total_count"].as_u64().unwrap_or(0));
    println!("Duration: {}", format_duration(total_seconds));

    let labels = stats["week_labels"].as_array().cloned().unwrap_or_default();
    if !labels.is_empty() {
        println!();
        println!("{:<10} {:>10}", "Week", "Seconds");
        println!("{}", "-".repeat(21));
        for (label, seconds) in labels.iter().zip(stats["weekly_durations"].as_array().into_iter().flatten()) {
            println!("{:<10} {:>10}", cell(label), cell(seconds));
        }
    }

    let exercises = stats["exercise_labels"].as_array().cloned().unwrap_or_default();
    if !exercises.is_empty() {
        println!();
        println!("{:<16} {:>6}", "Exercise", "Count");
        println!("{}", "-".repeat(23));
        for (label, count) in exercises.iter().zip(stats["exercise_counts"].as_array().into_iter().flatten()) {
            println!("{:<16} {:>6}", cell(label), cell(count));
        }
    }

    let months = stats["monthly_summary"].as_array().cloned().unwrap_or_default();
    if !months.is_empty() {
        println!();
        println!(
            "{:<8} {:>8} {:>8} {:>8} {:>9}",
            "Month", "Push-up", "Squat", "Reps", "Kcal"
        );
        println!("{}", "-".repeat(45));
        for month in &months {
            println!(
                "{:<8} {:>8} {:>8} {:>8} {:>9.1}",
                cell(&month["month"]),
                cell(&month["push-up"]),
                cell(&month["squat"]),
                cell(&month["total_reps"]),
                month["calories"].as_f64().unwrap_or(0.0)
            );
        }
    }
}
