use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};
use engine::{CatalogVariant, RecommendationEngine, RuleEvaluation};
use rayon::prelude::*;
use serde::Serialize;
use soil_model::{parser, Recommendation, SoilProfile, SoilType, Suitability};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// SoilRecs - Crop Recommendation Engine
#[derive(Parser)]
#[command(name = "soil-recs")]
#[command(about = "Rule-based crop recommendations from soil measurements", long_about = None)]
struct Cli {
    /// Crop catalog to evaluate: basic (6 crops) or extended (12 crops)
    #[arg(short, long, global = true, default_value = "extended")]
    catalog: CatalogVariant,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get crop recommendations for one soil profile
    Recommend {
        /// Soil type: clay, sandy, loam, silt, peat or chalky
        #[arg(long)]
        soil_type: String,

        /// Moisture percentage (0-100)
        #[arg(long, allow_negative_numbers = true)]
        moisture: f64,

        /// Organic content percentage (0-10)
        #[arg(long, allow_negative_numbers = true)]
        organic_content: f64,

        /// Soil pH (4-10)
        #[arg(long, allow_negative_numbers = true)]
        ph: f64,

        /// Show how every crop rule evaluated (included in --json output)
        #[arg(long)]
        explain: bool,

        /// Reject measurements outside their physical ranges
        #[arg(long)]
        strict: bool,

        /// Print recommendations as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the crops in the catalog
    Crops,

    /// Evaluate every profile in a file (soilType,moisture,organicContent,ph per line)
    Batch {
        /// Path to the profile file
        #[arg(long)]
        file: PathBuf,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "10000")]
        requests: usize,

        /// Number of concurrent workers
        #[arg(long, default_value = "4")]
        concurrent: usize,
    },
}

#[derive(Serialize)]
struct ExplainedResult {
    recommendations: Vec<Recommendation>,
    evaluations: Vec<RuleEvaluation>,
}

#[derive(Serialize)]
struct BatchResult<'a> {
    profile: &'a SoilProfile,
    recommendations: Vec<Recommendation>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let engine = RecommendationEngine::new(cli.catalog);

    match cli.command {
        Commands::Recommend {
            soil_type,
            moisture,
            organic_content,
            ph,
            explain,
            strict,
            json,
        } => {
            let profile = SoilProfile::new(soil_type, moisture, organic_content, ph);
            handle_recommend(engine, &profile, explain, strict, json)?
        }
        Commands::Crops => handle_crops(engine),
        Commands::Batch { file, json } => handle_batch(engine, file, json)?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(engine, requests, concurrent).await?,
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    engine: RecommendationEngine,
    profile: &SoilProfile,
    explain: bool,
    strict: bool,
    json: bool,
) -> Result<()> {
    if strict {
        profile.validate().context("Invalid soil profile")?;
    }

    let recommendations = engine.recommend(profile);

    if json {
        let output = if explain {
            serde_json::to_string_pretty(&ExplainedResult {
                recommendations,
                evaluations: engine.evaluate(profile),
            })?
        } else {
            serde_json::to_string_pretty(&recommendations)?
        };
        println!("{}", output);
        return Ok(());
    }

    print_profile(profile);
    print_recommendations(&recommendations);

    if explain {
        println!();
        println!("{}", "Rule evaluation:".bold().blue());
        for evaluation in engine.evaluate(profile) {
            match evaluation.suitability {
                Some(suitability) => println!(
                    "  {} {} ({})",
                    "✓".green(),
                    evaluation.name,
                    colorize(suitability)
                ),
                None => println!("  {} {}", "✗".red(), evaluation.name.dimmed()),
            }
        }
    }
    Ok(())
}

/// Handle the 'crops' command
fn handle_crops(engine: RecommendationEngine) {
    println!(
        "{}",
        format!("{} catalog ({} crops):", engine.variant(), engine.rules().len())
            .bold()
            .blue()
    );
    for (i, rule) in engine.rules().iter().enumerate() {
        println!("{}. {}", (i + 1).to_string().green(), rule.name.bold());
        println!("   {}", rule.description);
        println!("   Benefits: {}", rule.benefits.join(", "));
    }
}

/// Handle the 'batch' command
fn handle_batch(engine: RecommendationEngine, file: PathBuf, json: bool) -> Result<()> {
    let start = Instant::now();
    let profiles = parser::parse_profiles(&file)
        .with_context(|| format!("Failed to load profiles from {}", file.display()))?;
    tracing::info!("Loaded {} profiles in {:?}", profiles.len(), start.elapsed());

    // The engine is pure, so profiles can be evaluated in any order
    let results: Vec<BatchResult> = profiles
        .par_iter()
        .map(|profile| BatchResult {
            profile,
            recommendations: engine.recommend(profile),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    for (i, result) in results.iter().enumerate() {
        println!("{}", format!("Profile #{}", i + 1).bold());
        print_profile(result.profile);
        print_recommendations(&result.recommendations);
        println!();
    }
    tracing::info!("Evaluated {} profiles in {:?}", results.len(), start.elapsed());
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    engine: RecommendationEngine,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    anyhow::ensure!(requests > 0, "requests must be greater than zero");
    let concurrent = concurrent.clamp(1, requests);

    // Random profiles across the whole input domain, including peat/chalky
    let profiles: Vec<SoilProfile> = (0..requests).map(|_| random_profile()).collect();

    let total_start = Instant::now();
    let chunk_size = requests.div_ceil(concurrent);
    let mut handles = vec![];
    for chunk in profiles.chunks(chunk_size) {
        let chunk = chunk.to_vec();
        handles.push(tokio::task::spawn_blocking(move || {
            chunk
                .iter()
                .map(|profile| {
                    let start = Instant::now();
                    let recs = engine.recommend(profile);
                    (start.elapsed(), recs.len())
                })
                .collect::<Vec<(Duration, usize)>>()
        }));
    }

    let mut timings = Vec::with_capacity(requests);
    let mut total_matches = 0;
    for handle in handles {
        for (elapsed, matches) in handle.await.context("Benchmark worker panicked")? {
            timings.push(elapsed);
            total_matches += matches;
        }
    }
    let wall_time = total_start.elapsed();

    timings.sort();
    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    let p50 = timings[timings.len() / 2];
    let p95 = timings[((timings.len() as f64 * 0.95) as usize).min(timings.len() - 1)];
    let p99 = timings[((timings.len() as f64 * 0.99) as usize).min(timings.len() - 1)];
    let throughput = requests as f64 / wall_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Catalog: {}", engine.variant());
    println!("Requests: {} across {} workers", requests, concurrent);
    println!(
        "Average recommendations per profile: {:.2}",
        total_matches as f64 / requests as f64
    );
    println!("Wall time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

fn random_profile() -> SoilProfile {
    let soil_type: SoilType = SoilType::KNOWN[rand::random::<u32>() as usize % SoilType::KNOWN.len()].clone();
    SoilProfile::new(
        soil_type,
        rand::random::<f64>() * 100.0,
        rand::random::<f64>() * 10.0,
        4.0 + rand::random::<f64>() * 6.0,
    )
}

fn colorize(suitability: Suitability) -> ColoredString {
    match suitability {
        Suitability::Excellent => suitability.as_str().green().bold(),
        Suitability::Good => suitability.as_str().yellow(),
        Suitability::Fair => suitability.as_str().red(),
    }
}

fn print_profile(profile: &SoilProfile) {
    println!(
        "{} soil: {}, moisture {}%, organic content {}%, pH {}",
        "•".cyan(),
        profile.soil_type,
        profile.moisture,
        profile.organic_content,
        profile.ph
    );
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[Recommendation]) {
    if recommendations.is_empty() {
        println!(
            "{}",
            "No crops match these conditions. Try adjusting moisture, organic content or pH."
                .yellow()
        );
        return;
    }

    println!("{}", "Crop Recommendations:".bold().blue());
    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} [{}]",
            (i + 1).to_string().green(),
            rec.name.bold(),
            colorize(rec.suitability)
        );
        println!("   {}", rec.description);
        println!("   Benefits: {}", rec.benefits.join(", "));
    }
}
