use anyhow::Context;
use cabinet_cutlist::app::failure::exit_with;
use cabinet_cutlist::app::summary;
use cabinet_cutlist::config::InputKind;
use cabinet_cutlist::core::ConfigProvider;
use cabinet_cutlist::utils::error::Result;
use cabinet_cutlist::utils::{logger, validation::Validate};
use cabinet_cutlist::{CliConfig, CutListEngine, CutListPipeline, LocalStorage, TomlConfig};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting cabinet-cutlist");
    tracing::debug!("CLI config: {:?}", config);

    let kind = match config.validate().and_then(|_| config.input_kind()) {
        Ok(kind) => kind,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            exit_with(e);
        }
    };

    let dry_run = config.dry_run;
    let outcome = match kind {
        InputKind::CabinetList => execute(config, dry_run).await,
        InputKind::Job => {
            // Output settings come from the job file, not the CLI defaults.
            tracing::info!("📁 Loading job from: {}", config.input);
            match load_job(&config.input) {
                Ok(job) => execute(job, dry_run).await,
                Err(e) => Err(e),
            }
        }
    };

    if let Err(e) = outcome {
        exit_with(e);
    }

    std::io::Write::flush(&mut std::io::stdout()).context("failed to flush stdout")?;
    Ok(())
}

fn load_job(path: &str) -> Result<TomlConfig> {
    let job = TomlConfig::from_file(path)?;
    job.validate()?;
    tracing::info!("📋 Job: {}", job.job.name);
    Ok(job)
}

async fn execute<C: ConfigProvider>(config: C, dry_run: bool) -> Result<()> {
    let storage = LocalStorage::new(".".to_string());
    let engine = CutListEngine::new(CutListPipeline::new(storage, config));

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - no files will be written");
        let result = engine.preview().await?;
        print!("{}", summary::format_traces(&result));
        println!();
        print!("{}", summary::format_groups(&result));
        return Ok(());
    }

    let written = engine.run().await?;
    if written.is_empty() {
        println!("No panels to export; no file written.");
    } else {
        println!("✅ Cut-list generated");
        for path in &written {
            println!("📁 {}", path);
        }
    }
    Ok(())
}
