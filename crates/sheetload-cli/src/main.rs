//! sheetload CLI - provision a spreadsheet and bulk-load CSV data into it

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use sheetload::prelude::*;
use sheetload::CsvReader;
use sheetload_google::{GoogleClient, GoogleConfig, ShareTarget};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sheetload")]
#[command(
    author,
    version,
    about = "Provision Google spreadsheets and load CSV data into them"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy a template, move and share the copy, then apply a batch to it
    Provision {
        /// Drive id of the template spreadsheet
        #[arg(long)]
        template: String,

        /// Name of the new spreadsheet
        #[arg(long)]
        title: String,

        /// Drive folder to move the new spreadsheet into
        #[arg(long)]
        folder: Option<String>,

        /// Share with a user: email or email:role (reader, commenter, writer)
        #[arg(long = "share", value_name = "EMAIL[:ROLE]")]
        share: Vec<ShareTarget>,

        #[command(flatten)]
        batch: BatchArgs,

        #[command(flatten)]
        auth: AuthArgs,
    },

    /// Apply a batch to an existing spreadsheet
    Apply {
        /// Spreadsheet id
        #[arg(long)]
        spreadsheet: String,

        #[command(flatten)]
        batch: BatchArgs,

        #[command(flatten)]
        auth: AuthArgs,
    },

    /// Check a batch file without touching any spreadsheet
    Validate {
        /// Batch file (JSON)
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Show the range a CSV file would cover when written at a cell
    EndCell {
        /// Anchor cell (e.g. B2)
        start: String,

        /// CSV file
        data: PathBuf,

        /// Sheet name to qualify the range with
        #[arg(short, long, default_value = "Sheet1")]
        sheet: String,

        /// Field delimiter (default: comma)
        #[arg(short, long, default_value = ",")]
        delimiter: char,
    },
}

#[derive(Args)]
struct BatchArgs {
    /// Batch file (JSON); data paths are relative to its directory
    #[arg(short, long)]
    config: PathBuf,

    /// Field delimiter for every data file (default: comma)
    #[arg(short, long, default_value = ",")]
    delimiter: char,
}

#[derive(Args)]
struct AuthArgs {
    /// OAuth access token with spreadsheets and drive scopes
    #[arg(long, env = "SHEETLOAD_ACCESS_TOKEN", hide_env_values = true)]
    token: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Provision {
            template,
            title,
            folder,
            share,
            batch,
            auth,
        } => provision(&template, &title, folder.as_deref(), &share, &batch, &auth).await,
        Commands::Apply {
            spreadsheet,
            batch,
            auth,
        } => apply(&spreadsheet, &batch, &auth).await,
        Commands::Validate { config } => validate_batch(&config),
        Commands::EndCell {
            start,
            data,
            sheet,
            delimiter,
        } => end_cell(&start, &data, &sheet, delimiter),
    }
}

async fn provision(
    template: &str,
    title: &str,
    folder: Option<&str>,
    share: &[ShareTarget],
    batch: &BatchArgs,
    auth: &AuthArgs,
) -> Result<()> {
    // Validate before creating anything
    let operations = load_batch(&batch.config)?;
    let client = connect(auth)?;

    let file = client
        .copy_file(template, title)
        .await
        .with_context(|| format!("Failed to copy template '{}'", template))?;
    eprintln!("Created '{}' ({})", file.name, file.id);

    if let Some(folder) = folder {
        client
            .move_file(&file.id, folder)
            .await
            .with_context(|| format!("Failed to move '{}' into folder '{}'", file.id, folder))?;
        eprintln!("Moved into folder {}", folder);
    }

    for target in share {
        client
            .share_file(&file.id, target)
            .await
            .with_context(|| format!("Failed to share with {}", target.email))?;
        eprintln!("Shared with {} ({})", target.email, target.role);
    }

    run_batch(&client, &file.id, &operations, batch).await?;

    if let Some(link) = &file.web_view_link {
        println!("{}", link);
    } else {
        println!("{}", file.id);
    }
    Ok(())
}

async fn apply(spreadsheet: &str, batch: &BatchArgs, auth: &AuthArgs) -> Result<()> {
    let operations = load_batch(&batch.config)?;
    let client = connect(auth)?;
    run_batch(&client, spreadsheet, &operations, batch).await
}

fn validate_batch(config: &Path) -> Result<()> {
    let operations = load_batch(config)?;
    for (i, op) in operations.iter().enumerate() {
        println!("#{}\t{}", i + 1, op);
    }
    eprintln!("{} operations OK", operations.len());
    Ok(())
}

fn end_cell(start: &str, data: &Path, sheet: &str, delimiter: char) -> Result<()> {
    let options = csv_options(delimiter)?;
    let table = CsvReader::read_file(data, &options)
        .with_context(|| format!("Failed to read '{}'", data.display()))?;
    let start = CellRef::parse(start)?;

    if table.is_empty() {
        bail!("'{}' has no data", data.display());
    }

    let range = WriteRange::for_data(sheet, start, &table)?;
    println!("{}", range);
    eprintln!(
        "{} rows x {} columns{}",
        range.row_count(),
        range.col_count(),
        if table.is_ragged() { " (ragged)" } else { "" }
    );
    Ok(())
}

fn load_batch(config: &Path) -> Result<Vec<Operation>> {
    let batch = BatchConfig::from_path(config)?;
    batch
        .validate()
        .with_context(|| format!("Invalid batch '{}'", config.display()))
}

fn connect(auth: &AuthArgs) -> Result<GoogleClient> {
    GoogleClient::new(GoogleConfig::with_token(auth.token.clone()))
        .context("Failed to create Google API client")
}

fn csv_options(delimiter: char) -> Result<CsvReadOptions> {
    if !delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character, got '{}'", delimiter);
    }
    Ok(CsvReadOptions {
        delimiter: delimiter as u8,
        ..Default::default()
    })
}

async fn run_batch(
    client: &GoogleClient,
    spreadsheet_id: &str,
    operations: &[Operation],
    batch: &BatchArgs,
) -> Result<()> {
    let base_dir = batch
        .config
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let source = FsSource::with_base_dir(base_dir);
    let sheet = client.spreadsheet(spreadsheet_id);

    let report = Dispatcher::new(&sheet, &source)
        .with_csv_options(csv_options(batch.delimiter)?)
        .run(operations)
        .await
        .with_context(|| format!("Failed to read sheets of '{}'", spreadsheet_id))?;

    print_report(&report);
    let report = report.into_result().context("Batch aborted")?;

    eprintln!(
        "{} applied, {} skipped",
        report.applied_count(),
        report.skipped_count()
    );
    Ok(())
}

fn print_report(report: &BatchReport) {
    for outcome in &report.outcomes {
        match &outcome.status {
            OutcomeStatus::Applied(applied) => eprintln!(
                "#{} {}: wrote {} rows to {}{}",
                outcome.number,
                outcome.sheet_name,
                applied.rows,
                applied.range,
                if applied.cleared { " (cleared)" } else { "" }
            ),
            OutcomeStatus::Skipped(reason) => eprintln!(
                "#{} {}: Warning: skipped, {}",
                outcome.number, outcome.sheet_name, reason
            ),
            OutcomeStatus::Failed(err) => {
                eprintln!("#{} {}: failed: {}", outcome.number, outcome.sheet_name, err)
            }
        }
    }

    if report.not_attempted() > 0 {
        eprintln!("{} operations not attempted", report.not_attempted());
    }
}
