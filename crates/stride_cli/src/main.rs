use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use stride_core::energy::{Difficulty, TimeEnergyModel};
use stride_core::{sentiment, StrideConfig, StrideError};
use stride_engine::{MockDecomposer, Planner};
use stride_insight::{InsightEngine, InsightSummary};
use stride_store::{GamificationState, JsonFileStore, ProgressLedger};

#[derive(Parser, Debug)]
#[command(name = "stride", author, version, about = "Energy-aware task companion", long_about = None)]
struct Cli {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "stride.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a step plan from free-text tasks and record it
    Plan {
        /// Free-text task description ("clean desk, email Sam")
        tasks: String,
        /// Your current energy tag, stored with the entry
        #[arg(long, default_value = "medium")]
        energy: String,
        /// Task difficulty for slot suggestion (hard/medium/easy)
        #[arg(long, default_value = "medium")]
        difficulty: String,
    },
    /// List plan history
    History {
        /// Only the last N entries
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show one history entry
    Show { id: u64 },
    /// Mark a history entry completed (awards XP)
    Complete { id: u64 },
    /// Search history by query text
    Search { query: String },
    /// Entries from the last N days
    Recent {
        #[arg(long, default_value_t = 7)]
        days: i64,
    },
    /// Derived insights over the full history
    Insights,
    /// Award raw XP
    Award { amount: i64 },
    /// Current XP, level, and streak
    Stats,
    /// Delete all history
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = StrideConfig::load_or_default(&cli.config);

    let ledger = Arc::new(
        ProgressLedger::open(Arc::new(JsonFileStore::new(config.data.history_path()))).await,
    );
    let gamification =
        GamificationState::open(Arc::new(JsonFileStore::new(config.data.gamification_path())))
            .await;

    match cli.command {
        Command::Plan {
            tasks,
            energy,
            difficulty,
        } => {
            let polarity = sentiment::polarity(&tasks);
            let model = TimeEnergyModel::from_config(&config.energy);
            // The decomposer seam is wired to the deterministic mock here;
            // an LLM-backed implementation plugs in without touching the core.
            let planner = Planner::new(Arc::new(MockDecomposer), ledger.clone(), model);

            let generated = planner
                .generate_plan(
                    &tasks,
                    &energy,
                    polarity,
                    Difficulty::parse_str(&difficulty),
                    Local::now(),
                )
                .await?;

            println!("Mood: {}", generated.mood.as_str());
            println!(
                "Suggested time: {} — {}",
                generated.suggested_time.format("%I:%M %p"),
                generated.reason
            );
            for task_plan in &generated.plan {
                println!("\n{}", task_plan.task);
                for (i, step) in task_plan.steps.iter().enumerate() {
                    println!("  {}. {}", i + 1, step);
                }
            }

            let award = gamification.add_xp(config.rewards.xp_per_plan).await?;
            println!("\n+{} XP (total {}, level {})", config.rewards.xp_per_plan, award.xp, award.level);
            if award.leveled_up {
                println!("Level up! You're now level {}.", award.level);
            }
        }
        Command::History { limit } => {
            let entries = ledger.get_all(limit).await;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        Command::Show { id } => match ledger.get_by_id(id).await {
            Some(entry) => println!("{}", serde_json::to_string_pretty(&entry)?),
            None => return Err(StrideError::NotFound(id).into()),
        },
        Command::Complete { id } => {
            if !ledger.mark_completed(id).await? {
                return Err(StrideError::NotFound(id).into());
            }
            let award = gamification.add_xp(config.rewards.xp_per_completion).await?;
            info!("Entry {} completed", id);
            println!(
                "Entry {} marked as completed. +{} XP (total {}, level {}, streak {}).",
                id,
                config.rewards.xp_per_completion,
                award.xp,
                award.level,
                gamification.stats().await.streak
            );
            if award.leveled_up {
                println!("Level up! You're now level {}.", award.level);
            }
        }
        Command::Search { query } => {
            let hits = ledger.search(&query).await;
            println!("{}", serde_json::to_string_pretty(&hits)?);
        }
        Command::Recent { days } => {
            let entries = ledger.recent(days).await;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        Command::Insights => {
            let entries = ledger.get_all(None).await;
            match InsightEngine::summarize(&entries) {
                InsightSummary::InsufficientData { message } => println!("{}", message),
                InsightSummary::Report(report) => {
                    for line in &report.insights {
                        println!("{}", line);
                    }
                }
            }
        }
        Command::Award { amount } => {
            let award = gamification.add_xp(amount).await?;
            println!(
                "XP: {} (level {}{})",
                award.xp,
                award.level,
                if award.leveled_up { ", leveled up!" } else { "" }
            );
        }
        Command::Stats => {
            let stats = gamification.stats().await;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Command::Clear => {
            ledger.clear().await?;
            println!("History cleared.");
        }
    }

    Ok(())
}
