//! ALife Phylo CLI: summarise standard-format artificial-life phylogenies.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use alife_phylo_core::config::{AnalysisConfig, AnalysisResult, AttrValue, ExtantPolicy, TaxonId};
use alife_phylo_core::output::write_output;
use alife_phylo_core::phases::lineage::describe_lineage;
use alife_phylo_core::pipeline;
use alife_phylo_core::query::extract_asexual_lineage;

#[derive(Parser)]
#[command(
    name = "alife-phylo",
    about = "ALife Phylo - Summarise and query artificial-life phylogenies"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise a phylogeny file and write a JSON report
    Summarize {
        /// Path to a standard-format phylogeny (.csv or .json)
        path: PathBuf,

        /// Output JSON file path
        #[arg(short, long)]
        output: Option<String>,

        /// Also select taxa alive at this time
        #[arg(long)]
        time: Option<f64>,

        /// Comma-separated trait attributes describing lineage state
        #[arg(long)]
        traits: Option<String>,

        /// Comma-separated mutation-count attributes to accumulate
        #[arg(long)]
        mutations: Option<String>,

        /// Leave the root out of mutation accumulation
        #[arg(long)]
        skip_root: bool,

        /// Destruction value that marks a taxon as never destroyed
        #[arg(long, default_value = "none")]
        not_destroyed: String,

        /// Show per-phase timing breakdown
        #[arg(long)]
        verbose: bool,

        /// Suppress all output except errors
        #[arg(long)]
        quiet: bool,
    },
    /// Extract the lineage of one taxon and print its metrics
    Lineage {
        /// Path to a standard-format phylogeny (.csv or .json)
        path: PathBuf,

        /// Id of the taxon whose lineage to extract
        #[arg(long)]
        taxon: String,

        /// Comma-separated trait attributes describing lineage state
        #[arg(long)]
        traits: Option<String>,

        /// Comma-separated mutation-count attributes to accumulate
        #[arg(long)]
        mutations: Option<String>,

        /// Leave the root out of mutation accumulation
        #[arg(long)]
        skip_root: bool,
    },
}

fn split_list(list: Option<String>) -> Vec<String> {
    list.map(|l| {
        l.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

fn init_logging(verbose: bool) {
    let level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Summarize {
            path,
            output,
            time,
            traits,
            mutations,
            skip_root,
            not_destroyed,
            verbose,
            quiet,
        } => {
            init_logging(verbose);

            let input_path = path.canonicalize().unwrap_or(path);
            let stem = input_path
                .file_stem()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "phylogeny".to_string());

            let output_path = output.unwrap_or_else(|| format!("{stem}.phylo.json"));

            let config = AnalysisConfig {
                input_path: input_path.to_string_lossy().to_string(),
                output_path: Some(output_path.clone()),
                extant: ExtantPolicy {
                    not_destroyed_value: AttrValue::parse_cell(&not_destroyed),
                    ..Default::default()
                },
                query_time: time,
                trait_attributes: split_list(traits),
                mutation_attributes: split_list(mutations),
                skip_root,
                verbose,
                quiet,
            };

            if quiet {
                run_quiet(&config, &output_path);
            } else {
                run_with_progress(&config, &output_path, verbose);
            }
        }
        Commands::Lineage {
            path,
            taxon,
            traits,
            mutations,
            skip_root,
        } => {
            init_logging(false);

            let config = AnalysisConfig {
                input_path: path.to_string_lossy().to_string(),
                trait_attributes: split_list(traits),
                mutation_attributes: split_list(mutations),
                skip_root,
                ..Default::default()
            };
            run_lineage(&config, &TaxonId::parse(&taxon));
        }
    }
}

fn run_quiet(config: &AnalysisConfig, output_path: &str) {
    match pipeline::run_pipeline(config, None) {
        Ok(result) => {
            if let Err(e) = write_output(&result, output_path) {
                eprintln!("Error writing output: {e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Analysis failed: {e}");
            std::process::exit(1);
        }
    }
}

fn stat(result: &AnalysisResult, key: &str) -> serde_json::Value {
    result
        .stats
        .get(key)
        .cloned()
        .unwrap_or(serde_json::Value::Null)
}

fn run_with_progress(config: &AnalysisConfig, output_path: &str, verbose: bool) {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message("Initialising...");
    pb.enable_steady_tick(std::time::Duration::from_millis(80));

    let progress: pipeline::ProgressCallback = {
        let pb = pb.clone();
        Box::new(move |_name, label| {
            pb.set_message(label.to_string());
        })
    };

    let start = Instant::now();
    let result = match pipeline::run_pipeline(config, Some(progress)) {
        Ok(r) => r,
        Err(e) => {
            pb.finish_and_clear();
            eprintln!("Analysis failed: {e}");
            std::process::exit(1);
        }
    };
    pb.finish_and_clear();

    // Summary
    println!(
        "\n{}  Phylogeny Summary: {}",
        style("✓").green().bold(),
        style(
            Path::new(&config.input_path)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default()
        )
        .bold()
    );
    println!("  {:<14} {}", "Taxa:", stat(&result, "taxa"));
    println!("  {:<14} {}", "Roots:", stat(&result, "roots"));
    println!("  {:<14} {}", "Leaves:", stat(&result, "leaves"));
    println!(
        "  {:<14} {}",
        "Components:",
        stat(&result, "independent_phylogenies")
    );
    println!("  {:<14} {}", "Extant:", stat(&result, "extant"));
    println!(
        "  {:<14} {}",
        "Asexual:",
        if result.structure.asexual { "yes" } else { "no" }
    );
    if let Some(lod) = &result.lod {
        println!("  {:<14} {}", "LOD length:", lod.length);
    }
    if let Some(id) = result.mrca.as_ref().and_then(|m| m.id.as_ref()) {
        println!("  {:<14} {}", "MRCA:", id);
    }

    let duration = start.elapsed();
    println!(
        "  {:<14} {:.1}ms",
        "Duration:",
        duration.as_secs_f64() * 1000.0
    );

    if verbose {
        if let Some(serde_json::Value::Object(timings)) = result.metadata.get("phase_timings") {
            println!("\n  Phase Timings:");
            for (phase, secs) in timings {
                if let Some(val) = secs.as_f64() {
                    println!("    {:<14} {:.1}ms", phase, val * 1000.0);
                }
            }
        }
    }

    if let Err(e) = write_output(&result, output_path) {
        eprintln!("Error writing output: {e}");
        std::process::exit(1);
    }

    println!(
        "\n  {} {}",
        style("Output written to:").green(),
        output_path
    );
}

fn run_lineage(config: &AnalysisConfig, taxon: &TaxonId) {
    let phylogeny = match alife_phylo_core::load_phylogeny(&config.input_path) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to load phylogeny: {e}");
            std::process::exit(1);
        }
    };
    let output = match extract_asexual_lineage(&phylogeny, taxon)
        .and_then(|lineage| describe_lineage(config, &lineage))
    {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Lineage extraction failed: {e}");
            std::process::exit(1);
        }
    };

    let path: Vec<String> = output.taxa.iter().map(|id| id.to_string()).collect();
    println!(
        "\n{}  Lineage of {}",
        style("✓").green().bold(),
        style(taxon).bold()
    );
    println!("  {:<14} {}", "Taxa:", path.join(" -> "));
    println!("  {:<14} {}", "Length:", output.length);
    if let Some(n) = output.state_changes {
        println!("  {:<14} {}", "States:", n);
    }
    if let Some(n) = output.unique_states {
        println!("  {:<14} {}", "Unique:", n);
    }
    for (attribute, total) in &output.mutation_accumulation {
        println!("  {:<14} {}", format!("{attribute}:"), total);
    }
}
