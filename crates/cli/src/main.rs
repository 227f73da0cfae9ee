use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use llm_client::LlmClient;
use menu_data::{parser, DietaryTag, Menu};
use pipeline::{heuristic, DiningHallRanking};
use server::DiningRecommender;

/// DineRecs - Dining Hall Recommendation Engine
#[derive(Parser)]
#[command(name = "dine-recs")]
#[command(about = "Dining hall recommendations from dietary preferences and fitness goals", long_about = None)]
struct Cli {
    /// Path to the menu JSON file
    #[arg(short, long, default_value = "data/sample_menu.json")]
    menu: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank dining halls for a user profile
    Recommend {
        /// Path to the user profile JSON file
        #[arg(long, default_value = "data/sample_profile.json")]
        profile: PathBuf,

        /// Show only the top N halls
        #[arg(long)]
        top: Option<usize>,

        /// Also print the LLM (or fallback) recommendation summary
        #[arg(long)]
        summary: bool,
    },

    /// Estimate calories for a single meal
    Calories {
        /// Meal name
        #[arg(long)]
        meal: String,

        /// Dietary restriction tag (repeatable)
        #[arg(long = "restriction")]
        restrictions: Vec<String>,
    },

    /// Inspect the menu file
    Menu,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Recommend {
            profile,
            top,
            summary,
        } => {
            let menu = load_menu(&cli.menu)?;
            handle_recommend(menu, profile, top, summary).await?
        }
        Commands::Calories { meal, restrictions } => handle_calories(meal, restrictions).await?,
        Commands::Menu => {
            let menu = load_menu(&cli.menu)?;
            handle_menu(&menu)
        }
    }

    Ok(())
}

fn load_menu(path: &PathBuf) -> Result<Menu> {
    parser::load_menu(path)
        .with_context(|| format!("Failed to load menu from {}", path.display()))
}

/// Handle the 'recommend' command
async fn handle_recommend(
    menu: Menu,
    profile_path: PathBuf,
    top: Option<usize>,
    summary: bool,
) -> Result<()> {
    let profile = parser::load_profile(&profile_path)
        .with_context(|| format!("Failed to load profile from {}", profile_path.display()))?;

    let llm = Arc::new(LlmClient::from_env()?);
    if !llm.is_configured() {
        println!(
            "{}",
            "No LLM API key configured; calorie estimates use the local heuristic".yellow()
        );
    }
    let recommender = DiningRecommender::new(llm);

    let start = Instant::now();
    if summary {
        let recommendation = recommender.recommend(&menu, &profile).await;
        print_rankings(&recommendation.ranked_halls, top);
        println!("\n{}", "Recommendation".bold().blue());
        println!("{}", recommendation.summary);
    } else {
        let rankings = recommender.rank(&menu, &profile).await;
        print_rankings(&rankings, top);
    }

    println!(
        "\n{} Ranked {} halls in {:?}",
        "✓".green(),
        menu.hall_count(),
        start.elapsed()
    );
    Ok(())
}

/// Handle the 'calories' command
async fn handle_calories(meal: String, restrictions: Vec<String>) -> Result<()> {
    let llm = LlmClient::from_env()?;

    match llm.estimate_calories(&meal, &restrictions).await {
        Ok(calories) => {
            println!(
                "{} {} is about {} calories",
                "✓".green(),
                meal.bold(),
                calories
            );
        }
        Err(e) => {
            println!(
                "{} Gateway estimate failed ({e}); using the local heuristic",
                "!".yellow()
            );
            let tags: BTreeSet<DietaryTag> =
                restrictions.iter().map(|t| DietaryTag::new(t)).collect();
            let calories = heuristic::estimate(&meal, &tags);
            println!(
                "{} {} is roughly {} calories (local heuristic)",
                "✓".green(),
                meal.bold(),
                calories
            );
        }
    }
    Ok(())
}

/// Handle the 'menu' command
fn handle_menu(menu: &Menu) {
    println!("{}", "Menu Overview".bold().blue());
    println!("{} halls, {} meals", menu.hall_count(), menu.meal_count());

    for hall in &menu.halls {
        println!("\n{} ({} meals)", hall.name.bold(), hall.meals.len());
        for meal in &hall.meals {
            let tags = meal
                .dietary_tags
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            if tags.is_empty() {
                println!("  - {}", meal.name);
            } else {
                println!("  - {} [{}]", meal.name, tags);
            }
        }
    }
}

/// Helper function to format and print rankings
fn print_rankings(rankings: &[DiningHallRanking], top: Option<usize>) {
    println!("{}", "Dining Hall Rankings".bold().blue());

    let shown = top.unwrap_or(rankings.len());
    for (i, ranking) in rankings.iter().take(shown).enumerate() {
        println!(
            "{}. {} (score {:.1})",
            (i + 1).to_string().green(),
            ranking.dining_hall.bold(),
            ranking.score
        );
        for meal in &ranking.suggested_meals {
            println!(
                "   - {} ({} cal, score {:.1})",
                meal.meal_name, meal.calories, meal.score
            );
        }
    }
}
