use cabinet_cutlist::app::failure::exit_with;
use cabinet_cutlist::app::summary;
use cabinet_cutlist::core::ConfigProvider;
use cabinet_cutlist::domain::model::CsvDialect;
use cabinet_cutlist::utils::{logger, validation::Validate};
use cabinet_cutlist::{CutListEngine, CutListPipeline, LocalStorage, TomlConfig};
use clap::Parser;

#[derive(Parser)]
#[command(name = "cutlist-job")]
#[command(about = "Run a cut-list job described by a TOML file")]
struct Args {
    /// Path to the TOML job file
    #[arg(short, long, default_value = "cutlist.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override output.output_path from the job file
    #[arg(long)]
    output_path: Option<String>,

    /// Override output.dialect from the job file
    #[arg(long, value_enum)]
    dialect: Option<CsvDialect>,

    /// Show the per-cabinet breakdown without writing files
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting cut-list job");
    tracing::info!("📁 Loading job from: {}", args.config);

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load job file '{}'", args.config);
            exit_with(e);
        }
    };

    if let Some(output_path) = &args.output_path {
        config.output.output_path = output_path.clone();
        tracing::info!("🔧 Output path overridden to: {}", output_path);
    }
    if let Some(dialect) = args.dialect {
        config.output.dialect = dialect;
        tracing::info!("🔧 CSV dialect overridden to: {:?}", dialect);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Job validation failed: {}", e);
        exit_with(e);
    }

    display_job_summary(&config, &args);

    let storage = LocalStorage::new(".".to_string());
    let pipeline = CutListPipeline::new(storage, config);
    let engine = CutListEngine::new(pipeline);

    if args.dry_run {
        let result = engine.preview().await.unwrap_or_else(|e| exit_with(e));
        print!("{}", summary::format_traces(&result));
        println!();
        print!("{}", summary::format_groups(&result));
        return;
    }

    let written = engine.run().await.unwrap_or_else(|e| exit_with(e));
    if written.is_empty() {
        println!("No panels to export; no file written.");
    } else {
        println!("✅ Cut-list job completed");
        for path in &written {
            println!("📁 {}", path);
        }
    }
}

fn display_job_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Job Summary:");
    println!("  Job: {}", config.job.name);
    if let Some(description) = &config.job.description {
        println!("  Description: {}", description);
    }
    if let Some(path) = config.input_path() {
        println!("  Input: {}", path);
    }
    println!("  Inline cabinets: {}", config.cabinets.len());
    println!("  Output: {}", config.output_path());
    let formats: Vec<&str> = config.output_formats().iter().map(|f| f.as_str()).collect();
    println!("  Formats: {}", formats.join(", "));
    println!("  CSV dialect: {:?}", config.csv_dialect());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
