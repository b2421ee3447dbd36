use anyhow::{Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use profile_pdf::navigation::decode_query;
use profile_pdf::{validate, ContactRecord, ProfileRenderer, RenderConfig, Route};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "profilepdf",
    about = "Validate contact details and render them into a profile PDF",
    version,
    author
)]
struct Cli {
    /// Log what the core library is doing to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a record and print any field errors
    Validate {
        #[command(flatten)]
        record: RecordArgs,
    },

    /// Render a record into a profile PDF
    Render {
        #[command(flatten)]
        record: RecordArgs,

        /// Output file path (defaults to the suggested file name)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// strftime pattern for the "Generated on" line
        #[arg(long)]
        date_format: Option<String>,

        /// Print the text layout instead of writing a PDF
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the preview URL that carries a record
    Encode {
        #[command(flatten)]
        record: RecordArgs,
    },

    /// Print the record carried by a preview or form URL as JSON
    Decode {
        /// URL, query string or bare `data=` pair
        input: String,
    },
}

/// A record given either field by field or as a JSON document.
#[derive(Args)]
struct RecordArgs {
    /// Full name
    #[arg(long, default_value = "")]
    name: String,

    /// Email address
    #[arg(long, default_value = "")]
    email: String,

    /// Phone number
    #[arg(long, default_value = "")]
    phone: String,

    /// Position or job title
    #[arg(long, default_value = "")]
    position: String,

    /// Free-form description
    #[arg(long, default_value = "")]
    description: String,

    /// The whole record as JSON, instead of the field flags
    #[arg(
        long,
        conflicts_with_all = ["name", "email", "phone", "position", "description"]
    )]
    data: Option<String>,
}

impl RecordArgs {
    fn into_record(self) -> Result<ContactRecord> {
        if let Some(json) = self.data {
            return serde_json::from_str(&json).context("Invalid --data record");
        }
        Ok(ContactRecord {
            name: self.name,
            email: self.email,
            phone: self.phone,
            position: self.position,
            description: self.description,
        })
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "profile_pdf=debug,profilepdf=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Prints one line per invalid field; returns whether the record passed.
fn report(record: &ContactRecord) -> bool {
    let errors = validate(record);
    for (field, message) in errors.iter() {
        eprintln!("{field}: {message}");
    }
    errors.is_empty()
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Validate { record } => {
            let record = record.into_record()?;
            if !report(&record) {
                return Ok(ExitCode::FAILURE);
            }
            println!("Record is valid");
        }

        Commands::Render {
            record,
            output,
            date_format,
            dry_run,
        } => {
            let record = record.into_record()?;
            if !report(&record) {
                return Ok(ExitCode::FAILURE);
            }

            let mut config = RenderConfig::default();
            if let Some(format) = date_format {
                config = config.with_date_format(format);
            }
            config.check()?;
            let renderer = ProfileRenderer::new(config);

            if dry_run {
                let layout = renderer.trace_on(&record, Local::now().date_naive())?;
                print!("{layout}");
                return Ok(ExitCode::SUCCESS);
            }

            let document = renderer.render(&record).await?;
            let path = output.unwrap_or_else(|| PathBuf::from(&document.file_name));
            debug!(path = %path.display(), "Writing profile document");
            std::fs::write(&path, &document.bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;

            info!(pages = document.page_count, "Profile rendered");
            println!("PDF saved to {}", path.display());
        }

        Commands::Encode { record } => {
            let record = record.into_record()?;
            println!("{}", Route::Preview(record).to_url());
        }

        Commands::Decode { input } => {
            let record = decode_query(&input).context("Could not decode record")?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}
