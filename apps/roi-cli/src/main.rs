use clap::{Args, Parser, Subcommand};
use roi_app::{
    AppError, AppResult, ProjectionOptions, ProjectionResponse, projection_service, query,
};
use roi_engine::{CostParameters, InHouseModel, RoiResult};
use roi_input::{
    ApplicationRequest, AutoRoiRequest, ManualRoiRequest, RoiInput, YearKey, load_scenario,
};
use roi_results::ProjectionStore;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_ARCHIVE_DIR: &str = ".roi/projections";

#[derive(Parser)]
#[command(name = "roi-cli")]
#[command(about = "Issuing ROI calculator - in-house vs. issuing-as-a-service projections", long_about = None)]
struct Cli {
    /// Directory of the projection archive
    #[arg(long, global = true, default_value = DEFAULT_ARCHIVE_DIR)]
    archive: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project with automatic card growth
    Auto {
        /// Projection horizon in years
        #[arg(long)]
        years: i64,
        /// Card count reached by the final year
        #[arg(long)]
        cards: i64,
        /// Card count in year one
        #[arg(long)]
        start: i64,
        /// Yearly growth multiplier (e.g. 1.5)
        #[arg(long)]
        growth: f64,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Project with an explicit card count per year
    Manual {
        /// Year and card count as YEAR=CARDS (repeatable)
        #[arg(long = "year", value_parser = parse_year_entry, required = true)]
        years: Vec<(i64, i64)>,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Project a tagged scenario file (YAML or JSON)
    File {
        /// Path to the scenario file
        scenario_path: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Estimate an application form (JSON body)
    Estimate {
        /// Path to the application JSON file
        application_path: PathBuf,
        /// Cost parameter overrides (YAML)
        #[arg(long)]
        params: Option<PathBuf>,
    },
    /// List archived projections
    List,
    /// Show an archived projection
    Show {
        /// Projection ID
        projection_id: String,
        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export one series of an archived projection as CSV
    Export {
        /// Projection ID
        projection_id: String,
        /// Series name (e.g. incomes, costs.iaas, roi.in_house)
        series: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Card type: Virtual, Physical or Both
    #[arg(long, default_value = "Virtual")]
    card_type: String,
    /// Selected feature (repeatable)
    #[arg(long = "feature")]
    features: Vec<String>,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct OutputArgs {
    /// Cost parameter overrides (YAML)
    #[arg(long)]
    params: Option<PathBuf>,
    /// In-house comparison model: build or none
    #[arg(long, default_value = "build")]
    in_house: InHouseModel,
    /// Archive the projection
    #[arg(long)]
    save: bool,
    /// Print the raw `roiData` JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> AppResult<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Auto {
            years,
            cards,
            start,
            growth,
            common,
        } => {
            let request = AutoRoiRequest {
                years,
                cards_number: cards,
                card_type: common.card_type,
                features: common.features,
                starting_number: start,
                expected_cards_growth_rate: growth,
            };
            let options = projection_options(&common.output)?;
            let store = archive(&cli.archive, options.save)?;
            let response = projection_service::run_auto(&request, &options, store.as_ref())?;
            print_response(&response, &common.output)
        }
        Commands::Manual { years, common } => {
            let request = ManualRoiRequest {
                explicit_cards_number: years
                    .into_iter()
                    .map(|(year, cards)| (YearKey::Number(year), cards))
                    .collect::<BTreeMap<_, _>>(),
                card_type: common.card_type,
                features: common.features,
            };
            let options = projection_options(&common.output)?;
            let store = archive(&cli.archive, options.save)?;
            let response = projection_service::run_manual(&request, &options, store.as_ref())?;
            print_response(&response, &common.output)
        }
        Commands::File {
            scenario_path,
            output,
        } => cmd_file(&cli.archive, &scenario_path, &output),
        Commands::Estimate {
            application_path,
            params,
        } => cmd_estimate(&application_path, params.as_deref()),
        Commands::List => cmd_list(&cli.archive),
        Commands::Show {
            projection_id,
            json,
        } => cmd_show(&cli.archive, &projection_id, json),
        Commands::Export {
            projection_id,
            series,
            output,
        } => cmd_export(&cli.archive, &projection_id, &series, output.as_deref()),
    }
}

fn parse_year_entry(entry: &str) -> Result<(i64, i64), String> {
    let (year, cards) = entry
        .split_once('=')
        .ok_or_else(|| format!("expected YEAR=CARDS, got '{entry}'"))?;
    let year = year
        .trim()
        .parse()
        .map_err(|e| format!("invalid year '{year}': {e}"))?;
    let cards = cards
        .trim()
        .parse()
        .map_err(|e| format!("invalid card count '{cards}': {e}"))?;
    Ok((year, cards))
}

fn projection_options(output: &OutputArgs) -> AppResult<ProjectionOptions> {
    let params = cost_parameters(output.params.as_deref())?;
    debug!(in_house = %output.in_house, save = output.save, "projection options");
    Ok(ProjectionOptions {
        params,
        in_house: output.in_house,
        save: output.save,
    })
}

fn cost_parameters(path: Option<&Path>) -> AppResult<CostParameters> {
    match path {
        Some(path) => {
            info!("Loading cost parameters from {}", path.display());
            projection_service::load_parameters(path)
        }
        None => Ok(CostParameters::default()),
    }
}

fn archive(dir: &Path, needed: bool) -> AppResult<Option<ProjectionStore>> {
    if !needed {
        return Ok(None);
    }
    Ok(Some(open_archive(dir)?))
}

fn open_archive(dir: &Path) -> AppResult<ProjectionStore> {
    ProjectionStore::new(dir.to_path_buf()).map_err(AppError::from)
}

fn cmd_file(archive_dir: &Path, scenario_path: &Path, output: &OutputArgs) -> AppResult<()> {
    let input: RoiInput = load_scenario(scenario_path)?;
    println!(
        "Projecting {} scenario: {}",
        input.kind(),
        scenario_path.display()
    );
    let options = projection_options(output)?;
    let store = archive(archive_dir, options.save)?;
    let response = projection_service::run_input(&input, &options, store.as_ref())?;
    print_response(&response, output)
}

fn cmd_estimate(application_path: &Path, params: Option<&Path>) -> AppResult<()> {
    let content = std::fs::read_to_string(application_path)?;
    let request: ApplicationRequest = serde_json::from_str(&content)
        .map_err(|e| AppError::Input(format!("invalid application JSON: {e}")))?;
    let params = cost_parameters(params)?;
    let estimate = projection_service::estimate_application(&request, &params)?;
    let json = serde_json::to_string_pretty(&roi_results::ApplicationResponse::from(estimate))
        .map_err(|e| AppError::Results(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

fn print_response(response: &ProjectionResponse, output: &OutputArgs) -> AppResult<()> {
    if output.json {
        let body = roi_results::RoiResponse::from(response.result.clone());
        let text =
            serde_json::to_string_pretty(&body).map_err(|e| AppError::Results(e.to_string()))?;
        println!("{}", text);
        return Ok(());
    }

    print_table(&response.result);
    print_summary(&response.result);
    if response.saved {
        println!("✓ Archived as {}", response.projection_id);
    } else if output.save {
        eprintln!("✗ Could not archive {}", response.projection_id);
    }
    Ok(())
}

fn print_table(result: &RoiResult) {
    println!(
        "{:>5} {:>16} {:>16} {:>16} {:>16} {:>16} {:>10} {:>10}",
        "year",
        "income",
        "cost in-house",
        "cost iaas",
        "net in-house",
        "net iaas",
        "roi in-h",
        "roi iaas"
    );
    for i in 0..result.len() {
        println!(
            "{:>5} {:>16.2} {:>16.2} {:>16.2} {:>16.2} {:>16.2} {:>10} {:>10}",
            result.years[i],
            result.incomes[i],
            result.costs.in_house[i],
            result.costs.iaas[i],
            result.net.in_house[i],
            result.net.iaas[i],
            format_pct(result.roi.in_house[i]),
            format_pct(result.roi.iaas[i]),
        );
    }
}

fn format_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}%", v),
        None => "-".to_string(),
    }
}

fn format_year(year: Option<u32>) -> String {
    year.map(|y| y.to_string())
        .unwrap_or_else(|| "never".to_string())
}

fn print_summary(result: &RoiResult) {
    let summary = query::summarize(result);
    println!("\nSummary:");
    println!(
        "  Breakeven (IaaS):     {}",
        format_year(summary.breakeven_year_iaas)
    );
    println!(
        "  Breakeven (in-house): {}",
        format_year(summary.breakeven_year_in_house)
    );
    println!(
        "  Final ROI:            iaas {}  in-house {}",
        format_pct(summary.final_roi_iaas),
        format_pct(summary.final_roi_in_house)
    );
    println!(
        "  IaaS savings vs in-house: {:.2}",
        summary.total_savings_vs_in_house
    );
}

fn cmd_list(archive_dir: &Path) -> AppResult<()> {
    let store = open_archive(archive_dir)?;
    let manifests = projection_service::list_projections(&store)?;

    if manifests.is_empty() {
        println!("No archived projections in {}", archive_dir.display());
    } else {
        println!("Archived projections:");
        for manifest in manifests {
            println!(
                "  {} ({:?}, in-house={}, {})",
                manifest.projection_id,
                manifest.kind,
                manifest.in_house_model,
                manifest.created_at
            );
        }
    }
    Ok(())
}

fn cmd_show(archive_dir: &Path, projection_id: &str, json: bool) -> AppResult<()> {
    let store = open_archive(archive_dir)?;
    let (manifest, result) = projection_service::load_projection(&store, projection_id)?;

    if json {
        let text = serde_json::to_string_pretty(&roi_results::RoiResponse::from(result))
            .map_err(|e| AppError::Results(e.to_string()))?;
        println!("{}", text);
        return Ok(());
    }

    println!("Projection: {}", manifest.projection_id);
    println!("  Kind: {:?}", manifest.kind);
    println!("  Created: {}", manifest.created_at);
    println!("  Parameters: {}", manifest.parameters_version);
    println!("  In-house model: {}\n", manifest.in_house_model);
    print_table(&result);
    print_summary(&result);
    Ok(())
}

fn cmd_export(
    archive_dir: &Path,
    projection_id: &str,
    series_name: &str,
    output: Option<&Path>,
) -> AppResult<()> {
    let store = open_archive(archive_dir)?;
    let (_manifest, result) = projection_service::load_projection(&store, projection_id)?;
    let series = query::extract_series(&result, series_name)?;

    let mut csv = String::from("year,value\n");
    for (year, value) in &series {
        csv.push_str(&format!("{},{}\n", year, value));
    }

    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!(
            "✓ Exported {} data points to {}",
            series.len(),
            path.display()
        );
    } else {
        print!("{}", csv);
    }

    Ok(())
}
