//! Command handlers

use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use unim_app::app::{self, FileStatus, ProgressCallback};
use unim_app::config::Config;
use unim_app::repository::open_dataset_repo_at;
use unim_domain::service::QueryState;
use unim_infra::tariff_xlsx::scan_data_dir;
use unim_types::{ContainerSize, OutputFormat, Result, TripType};

use crate::cli::{Cli, Commands};
use crate::output::{output_origins, output_query};

pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref db) = cli.db {
        config.db_path = db.clone();
    }

    let output_format = cli.format.unwrap_or(config.output_format);

    match &cli.command {
        Commands::Convert { data_dir, output } => {
            let data_dir = data_dir.clone().unwrap_or_else(|| config.data_dir.clone());
            let db_path = output.clone().unwrap_or_else(|| config.db_path.clone());
            cmd_convert(&cli, data_dir, db_path, output_format)
        }

        Commands::Query {
            origins,
            trip,
            region,
            sub_area,
            size,
            limit,
            all,
        } => cmd_query(
            &config,
            origins.clone(),
            *trip,
            region.clone(),
            sub_area.clone(),
            *size,
            *limit,
            *all,
            output_format,
        ),

        Commands::Origins { trip } => cmd_origins(&config, *trip, output_format),

        Commands::Config {
            show,
            set_data_dir,
            set_db_path,
            set_output,
            set_page_size,
            reset,
        } => cmd_config(
            *show,
            set_data_dir.clone(),
            set_db_path.clone(),
            *set_output,
            *set_page_size,
            *reset,
        ),
    }
}

fn cmd_convert(
    cli: &Cli,
    data_dir: PathBuf,
    db_path: PathBuf,
    output_format: OutputFormat,
) -> Result<()> {
    // Count first so the bar has a length; the service rescans internally
    let files = scan_data_dir(&data_dir)?;

    if cli.verbose {
        eprintln!(
            "Found {} workbooks under {}",
            files.len(),
            data_dir.display()
        );
    }

    // Setup progress bar
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
            )
            .unwrap()
            .progress_chars("#>-"),
    );

    let repo = open_dataset_repo_at(db_path.clone());
    let bar = pb.clone();
    let progress: ProgressCallback = Box::new(move |file_name: &str| {
        bar.set_message(file_name.to_string());
        bar.inc(1);
    });

    let (_, summary) = app::convert_directory(&data_dir, &repo, Some(progress))?;
    pb.finish_and_clear();

    for outcome in &summary.outcomes {
        match &outcome.status {
            FileStatus::Skipped => eprintln!(
                "경고: 파일명에 '편도'/'왕복' 구분이 없어 건너뜀: {}",
                outcome.file_name
            ),
            FileStatus::Failed { message } => {
                eprintln!("Failed to read {}: {}", outcome.file_name, message);
            }
            FileStatus::Converted { trip_type, sheets } => {
                println!("{}: {} ({} sheets)", outcome.file_name, trip_type, sheets);
            }
        }
    }

    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("\nConversion Complete");
    println!("===================");
    println!("Files:      {}", summary.files_found);
    println!("Converted:  {}", summary.converted);
    println!("Skipped:    {}", summary.skipped);
    println!("Failed:     {}", summary.failed);
    println!(
        "Origins:    편도 {} / 왕복 {}",
        summary.one_way_origins, summary.round_trip_origins
    );
    println!("Rows:       {}", summary.total_rows);
    println!(
        "Duration:   {:.1}s",
        (summary.completed_at - summary.started_at).num_milliseconds() as f64 / 1000.0
    );
    println!("Saved to:   {}", db_path.display());

    Ok(())
}

fn cmd_query(
    config: &Config,
    origins: Vec<String>,
    trip: TripType,
    region: Option<String>,
    sub_area: Option<String>,
    size: ContainerSize,
    limit: Option<usize>,
    all: bool,
    output_format: OutputFormat,
) -> Result<()> {
    let repo = open_dataset_repo_at(config.db_path.clone());

    let mut state = QueryState::new(trip).with_page_size(limit.unwrap_or(config.page_size));
    state.set_origins(origins);
    if let Some(region) = region {
        state.set_region(region);
    }
    if let Some(sub_area) = sub_area {
        state.set_sub_area(sub_area);
    }
    state.set_size(size);
    if all {
        state.visible_count = usize::MAX;
    }

    let result = app::run_query(&repo, &state)?;
    output_query(output_format, &result, size)
}

fn cmd_origins(config: &Config, trip: TripType, output_format: OutputFormat) -> Result<()> {
    let repo = open_dataset_repo_at(config.db_path.clone());
    let origins = app::list_origins(&repo, trip)?;
    output_origins(output_format, trip.label(), &origins)
}

fn cmd_config(
    show: bool,
    set_data_dir: Option<PathBuf>,
    set_db_path: Option<PathBuf>,
    set_output: Option<OutputFormat>,
    set_page_size: Option<usize>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(data_dir) = set_data_dir {
        config.data_dir = data_dir;
        modified = true;
    }

    if let Some(db_path) = set_db_path {
        config.db_path = db_path;
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(page_size) = set_page_size {
        config.page_size = page_size.max(1);
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
