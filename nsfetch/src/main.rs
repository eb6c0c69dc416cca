//! nsfetch command line.
//!
//! ```bash
//! nsfetch init                                         # store credentials
//! nsfetch get --type customer --limit 10              # list records
//! nsfetch get 42 --type customer --fields companyName  # fetch one record
//! nsfetch create --type so --data '{"entity": {"id": "7"}}'
//! nsfetch update --type customer --id 42 --data '{"email": "a@b.test"}'
//! nsfetch delete --type customer --id 42
//! nsfetch bulk --type customer --bulk-file customers.json
//! nsfetch import --type customer --csv-file customers.csv --map-file map.json
//! ```

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::debug;
use nsfetch::import::{ConflictPolicy, TransformOptions};
use nsfetch::{
    default_context, default_signer, write_config, Config, Context, DefaultCredentialProvider,
    Dispatcher, Error, ImportJob, ImportSource, Operation, ProvideCredential, RecordEndpoint,
    Result,
};

const DEFAULT_LIMIT: u64 = 1000;

#[derive(Parser)]
#[command(name = "nsfetch", version)]
#[command(about = "Signed NetSuite REST record operations and bulk import", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Record type, or one of the aliases so, po, inv
    #[arg(long = "type", global = true)]
    record_type: Option<String>,

    #[command(flatten)]
    import: ImportArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Prompt for credentials and store them in the config file
    Init,

    /// Fetch one record or list records (default)
    Get(GetArgs),

    /// Create a record
    Create {
        /// Record body as JSON
        #[arg(long)]
        data: Option<String>,

        /// Create every record of a JSON file instead
        #[arg(long)]
        bulk_file: Option<String>,
    },

    /// Patch a record
    Update {
        /// Numeric record id
        #[arg(value_name = "ID")]
        record_id: Option<String>,

        #[arg(long)]
        id: Option<String>,

        /// Fields to change as JSON
        #[arg(long)]
        data: Option<String>,
    },

    /// Delete a record
    Delete {
        /// Numeric record id
        #[arg(value_name = "ID")]
        record_id: Option<String>,

        #[arg(long)]
        id: Option<String>,
    },

    /// Create every record of a JSON file holding one object or an array
    Bulk {
        #[arg(long)]
        bulk_file: Option<String>,
    },

    /// Create one record per row of a CSV or spreadsheet file
    Import,
}

#[derive(Args)]
struct GetArgs {
    /// Numeric record id
    #[arg(value_name = "ID")]
    record_id: Option<String>,

    #[arg(long)]
    id: Option<String>,

    /// Fields to return for a single record, comma separated
    #[arg(long, value_delimiter = ',')]
    fields: Vec<String>,

    /// Page size when listing
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    limit: u64,

    /// Page offset when listing
    #[arg(long, default_value_t = 0)]
    offset: u64,
}

impl Default for GetArgs {
    fn default() -> Self {
        Self {
            record_id: None,
            id: None,
            fields: Vec::new(),
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

#[derive(Args)]
struct ImportArgs {
    /// Import rows from a CSV file
    #[arg(long, global = true)]
    csv_file: Option<String>,

    /// Import rows from the first worksheet of a spreadsheet
    #[arg(long, global = true)]
    excel_file: Option<String>,

    /// JSON file mapping headers to field ids
    #[arg(long, global = true)]
    map_file: Option<String>,

    /// JSON file mapping headers to raw value substitutions
    #[arg(long, global = true)]
    value_map_file: Option<String>,

    /// Treat dots in headers as nested field paths
    #[arg(long, global = true)]
    nested_headers: bool,

    /// What to do when a field path runs through a plain value
    #[arg(long, global = true, value_enum, default_value_t = OnConflict::Overwrite)]
    on_conflict: OnConflict,
}

#[derive(Clone, Copy, ValueEnum)]
enum OnConflict {
    Overwrite,
    Reject,
}

impl From<OnConflict> for ConflictPolicy {
    fn from(v: OnConflict) -> Self {
        match v {
            OnConflict::Overwrite => ConflictPolicy::Overwrite,
            OnConflict::Reject => ConflictPolicy::Reject,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!("command failed: {err:?}");
            match err.response() {
                Some(resp) => eprintln!("HTTP {} {}", resp.status.as_u16(), resp.body),
                None => eprintln!("Error: {err}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let ctx = default_context();
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Get(GetArgs::default()));
    if matches!(command, Commands::Init) {
        return init(&ctx);
    }

    let record_type = cli
        .record_type
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| Error::request_invalid("missing or invalid --type"))?;

    let source = ImportSource::from_flags(cli.import.csv_file, cli.import.excel_file)?;
    let op = match source {
        Some(source) => {
            ImportJob::new(source)
                .with_map_file(cli.import.map_file)
                .with_value_map_file(cli.import.value_map_file)
                .with_options(TransformOptions {
                    nested_headers: cli.import.nested_headers,
                    on_conflict: cli.import.on_conflict.into(),
                })
                .load(&ctx)
                .await?
        }
        None => record_operation(&ctx, command).await?,
    };

    let cred = DefaultCredentialProvider::new()
        .provide_credential(&ctx)
        .await?
        .ok_or_else(|| Error::config_invalid("no credentials found, run `nsfetch init` first"))?;
    cred.check()?;

    let endpoint = RecordEndpoint::new(&cred, &record_type);
    let dispatcher = Dispatcher::new(default_signer(ctx, cred));
    let out = op.execute(&dispatcher, &endpoint).await?;

    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

async fn record_operation(ctx: &Context, command: Commands) -> Result<Operation> {
    match command {
        Commands::Get(args) => Operation::get(
            args.id,
            args.record_id,
            args.fields,
            args.limit,
            args.offset,
        ),
        Commands::Create {
            bulk_file: Some(path),
            ..
        } => Operation::bulk(&ctx.file_read(&path).await?),
        Commands::Create { data, .. } => Operation::create(data.as_deref()),
        Commands::Update {
            record_id,
            id,
            data,
        } => Operation::update(id, record_id, data.as_deref()),
        Commands::Delete { record_id, id } => Operation::delete(id, record_id),
        Commands::Bulk { bulk_file } => {
            let path = bulk_file
                .ok_or_else(|| Error::request_invalid("--bulk-file <path> is required for bulk"))?;
            Operation::bulk(&ctx.file_read(&path).await?)
        }
        Commands::Import => Err(Error::request_invalid(
            "--csv-file or --excel-file is required for import",
        )),
        Commands::Init => unreachable!("init never reaches record operations"),
    }
}

fn init(ctx: &Context) -> Result<()> {
    let path = Config::file_path(ctx)
        .ok_or_else(|| Error::config_invalid("can't locate the home directory"))?;

    let config = Config::new()
        .with_consumer_key(prompt("Consumer Key: ")?)
        .with_consumer_secret(prompt("Consumer Secret: ")?)
        .with_token(prompt("Token: ")?)
        .with_token_secret(prompt("Token Secret: ")?)
        .with_realm(prompt("Realm (Account ID): ")?);

    write_config(&path, &config)?;
    println!("Credentials saved to {path}");
    Ok(())
}

fn prompt(question: &str) -> Result<String> {
    let mut stdout = io::stdout();
    stdout.write_all(question.as_bytes())?;
    stdout.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().to_string())
}
