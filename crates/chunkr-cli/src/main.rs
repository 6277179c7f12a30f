//! `chunkr` command-line client.
//!
//! ```bash
//! chunkr health
//! chunkr run ./invoice.pdf
//! chunkr create https://example.com/report.pdf --ocr all
//! chunkr poll <task-id> --timeout 600
//! chunkr list --status Failed --days 3
//! ```
//!
//! The API key comes from `--api-key`, else the file named by
//! `CHUNKR_API_KEY_FILE`, else `CHUNKR_API_KEY`; a `.env` file in the working
//! directory is loaded first. Results are printed to stdout as JSON, logs go
//! to stderr.

mod source;

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use chunkr::{
    ChunkProcessing, ChunkrClient, ClientConfig, GetJobOptions, JobOptions, JobStatus,
    ListJobsQuery, OcrStrategy, Pipeline, PollOptions, UpdateJobInput, DEFAULT_RECENT_DAYS,
};

#[derive(Parser, Debug)]
#[command(name = "chunkr", version, about = "Client for the Chunkr document processing API")]
struct Cli {
    /// API base URL.
    #[arg(long, global = true, env = "CHUNKR_API_URL")]
    api_url: Option<String>,

    /// API key. Falls back to the file named by CHUNKR_API_KEY_FILE, then
    /// to CHUNKR_API_KEY.
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the service is reachable.
    Health,

    /// Submit a document and print the created task.
    Create {
        /// URL or local path of the document.
        file: String,

        #[command(flatten)]
        job: JobArgs,
    },

    /// Show a task.
    Get {
        task_id: String,

        /// Include chunks and metadata if the task has succeeded.
        #[arg(long)]
        include_chunks: bool,

        /// Return asset URLs as base64 payloads.
        #[arg(long)]
        base64_urls: bool,
    },

    /// List tasks.
    List {
        #[arg(long)]
        page: Option<u32>,

        #[arg(long)]
        limit: Option<u32>,

        /// Keep only tasks in this status (Starting, Processing, Succeeded, Failed, Cancelled).
        #[arg(long)]
        status: Option<JobStatus>,

        /// Only tasks created within this many days.
        #[arg(long, num_args = 0..=1, default_missing_value = "7")]
        days: Option<i64>,

        #[arg(long)]
        include_chunks: bool,
    },

    /// Wait for a task to finish and print it with its results.
    Poll {
        task_id: String,

        #[command(flatten)]
        poll: PollArgs,
    },

    /// Submit a document, wait for it and print its chunks.
    Run {
        /// URL or local path of the document.
        file: String,

        #[command(flatten)]
        job: JobArgs,

        #[command(flatten)]
        poll: PollArgs,
    },

    /// Cancel a task that has not finished yet.
    Cancel { task_id: String },

    /// Change the expiry of a task.
    Update {
        task_id: String,

        /// Seconds until the task and its results expire.
        #[arg(long)]
        expires_in: i64,
    },

    /// Delete a task.
    Delete { task_id: String },
}

#[derive(clap::Args, Debug)]
struct JobArgs {
    /// File name sent with the document; defaults to the last path segment.
    #[arg(long)]
    name: Option<String>,

    #[arg(long, value_enum)]
    ocr: Option<OcrArg>,

    #[arg(long, value_enum)]
    pipeline: Option<PipelineArg>,

    #[arg(long)]
    high_resolution: bool,

    /// Target chunk length in words.
    #[arg(long)]
    target_length: Option<u32>,

    /// Seconds until the task expires.
    #[arg(long)]
    expires_in: Option<i64>,
}

#[derive(clap::Args, Debug)]
struct PollArgs {
    /// Milliseconds between status checks.
    #[arg(long, default_value_t = 1000)]
    interval: u64,

    /// Seconds before giving up.
    #[arg(long, default_value_t = 900)]
    timeout: u64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OcrArg {
    Auto,
    All,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PipelineArg {
    Azure,
    Chunkr,
}

impl JobArgs {
    fn file_name(&self, file: &str) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| source::default_file_name(file))
    }

    /// Only flags that were given end up in the options; the rest fall
    /// back to the client defaults.
    fn options(&self) -> JobOptions {
        JobOptions {
            expires_in: self.expires_in,
            ocr_strategy: self.ocr.map(|ocr| match ocr {
                OcrArg::Auto => OcrStrategy::Auto,
                OcrArg::All => OcrStrategy::All,
            }),
            high_resolution: self.high_resolution.then_some(true),
            pipeline: self.pipeline.map(|pipeline| match pipeline {
                PipelineArg::Azure => Pipeline::Azure,
                PipelineArg::Chunkr => Pipeline::Chunkr,
            }),
            chunk_processing: self.target_length.map(|target_length| ChunkProcessing {
                ignore_headers_and_footers: Some(true),
                target_length: Some(target_length),
            }),
            ..Default::default()
        }
    }
}

impl PollArgs {
    fn options(&self) -> PollOptions {
        PollOptions::default()
            .with_interval(Duration::from_millis(self.interval))
            .with_timeout(Duration::from_secs(self.timeout))
    }
}

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (text, json) = match format {
        LogFormat::Text => (
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            ),
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(text)
        .with(json)
        .init();
}

fn build_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env_with_key(cli.api_key.as_deref())?;
    if let Some(api_url) = &cli.api_url {
        config = config.with_api_url(api_url.clone());
    }
    Ok(config)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn log_progress(status: JobStatus, job_id: &str) {
    info!(job_id, %status, "task status");
}

async fn run(cli: Cli) -> Result<()> {
    let client = ChunkrClient::new(&build_config(&cli)?)?;

    match cli.command {
        Command::Health => print_json(&client.check_health().await?)?,

        Command::Create { file, job } => {
            let document = source::resolve(&file)?;
            let task = client
                .create_job_from_source(document, &job.file_name(&file), job.options())
                .await?;
            print_json(&task)?;
        }

        Command::Get {
            task_id,
            include_chunks,
            base64_urls,
        } => {
            let options = GetJobOptions {
                include_result: include_chunks.then_some(true),
                base64_urls: base64_urls.then_some(true),
            };
            print_json(&client.get_job(&task_id, &options).await?)?;
        }

        Command::List {
            page,
            limit,
            status,
            days,
            include_chunks,
        } => {
            let query = ListJobsQuery {
                page,
                limit,
                include_chunks: include_chunks.then_some(true),
                ..Default::default()
            };
            let mut tasks = match days {
                Some(days) => client.recent_jobs(days, &query).await?,
                None => client.list_jobs(&query).await?,
            };
            if let Some(status) = status {
                tasks.retain(|task| task.status == status);
            }
            print_json(&tasks)?;
        }

        Command::Poll { task_id, poll } => {
            let task = client
                .poll_job_with_progress(&task_id, &poll.options(), &log_progress)
                .await?;
            print_json(&task)?;
        }

        Command::Run { file, job, poll } => {
            let document = source::resolve(&file)?;
            let result = client
                .run_document_flow_with(document, &job.file_name(&file), job.options(), &poll.options())
                .await?;
            print_json(&result)?;
        }

        Command::Cancel { task_id } => print_json(&client.cancel_job(&task_id).await?)?,

        Command::Update {
            task_id,
            expires_in,
        } => {
            let update = UpdateJobInput {
                expires_in: Some(expires_in),
                ..Default::default()
            };
            print_json(&client.update_job(&task_id, &update).await?)?;
        }

        Command::Delete { task_id } => {
            client.delete_job(&task_id).await?;
            print_json(&json!({ "task_id": task_id, "deleted": true }))?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.log_format);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
