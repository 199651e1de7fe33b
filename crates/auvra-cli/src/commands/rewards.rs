use auvra_core::rewards::{gradient_stops, GradientStop, MilestoneStatus, RewardView};
use auvra_core::{Config, CoreError, MilestoneTrack, RewardBook};
use clap::{Args, Subcommand};
use serde::Serialize;

#[derive(Args)]
pub struct BookArgs {
    /// Current streak in days (defaults to rewards.current_streak_days)
    #[arg(long)]
    streak: Option<u32>,
    /// Reward id to treat as claimed (repeatable)
    #[arg(long = "claimed")]
    claimed: Vec<String>,
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
pub enum RewardsAction {
    /// List rewards grouped by tier
    List {
        #[command(flatten)]
        book: BookArgs,
    },
    /// Show one reward's state, tier and progress
    Classify {
        /// Reward id
        id: String,
        #[command(flatten)]
        book: BookArgs,
    },
    /// Show the milestone track for the streak
    Milestones {
        #[command(flatten)]
        book: BookArgs,
    },
}

#[derive(Serialize)]
struct Classified {
    #[serde(flatten)]
    view: RewardView,
    gradient_stops: Vec<GradientStop>,
}

#[derive(Serialize)]
struct MilestoneReport {
    streak_days: u32,
    days_until_next: Option<u32>,
    milestones: Vec<MilestoneStatus>,
}

fn build_book(args: &BookArgs, config: &Config) -> auvra_core::error::Result<RewardBook> {
    let mut book = RewardBook::from_config(&config.rewards)?;
    if let Some(days) = args.streak {
        book.set_streak(days);
    }
    for id in &args.claimed {
        book.claim(id);
    }
    Ok(book)
}

fn bar(fraction: f64) -> String {
    const WIDTH: usize = 20;
    let filled = (fraction.clamp(0.0, 1.0) * WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(WIDTH - filled))
}

pub fn run(action: RewardsAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        RewardsAction::List { book: args } => {
            let book = build_book(&args, config)?;
            let groups = book.grouped();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&groups)?);
                return Ok(());
            }
            println!("{}", auvra_core::presentation::streak_label(book.current_streak_days()));
            for group in groups {
                println!();
                println!("{}", group.tier);
                for view in group.rewards {
                    println!(
                        "  {:<3} {} {:<32} {:<12} {} {}",
                        view.id,
                        view.icon,
                        view.title,
                        view.state.as_str(),
                        bar(view.progress),
                        view.streak_label
                    );
                }
            }
        }
        RewardsAction::Classify { id, book: args } => {
            let book = build_book(&args, config)?;
            let reward = book.catalog().get(&id).map_err(CoreError::from)?;
            let view = book.view(reward);
            let stops = gradient_stops(view.progress);
            if args.json {
                let classified = Classified {
                    view,
                    gradient_stops: stops,
                };
                println!("{}", serde_json::to_string_pretty(&classified)?);
                return Ok(());
            }
            println!("{} {}", view.icon, view.title);
            println!("  state:    {}", view.state.as_str());
            println!("  tier:     {}", view.tier);
            println!("  progress: {} {:.0}%", bar(view.progress), view.progress * 100.0);
            println!("  requires: {}", view.streak_label);
            if let Some(action) = &view.action_label {
                println!("  action:   {action}");
            }
            let colors: Vec<&str> = stops.iter().map(|s| s.color).collect();
            println!("  gradient: {}", colors.join(" "));
        }
        RewardsAction::Milestones { book: args } => {
            let book = build_book(&args, config)?;
            let streak = book.current_streak_days();
            let track = MilestoneTrack::default();
            let report = MilestoneReport {
                streak_days: streak,
                days_until_next: track.days_until_next(streak),
                milestones: track.statuses(streak),
            };
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }
            for status in &report.milestones {
                let mark = match (status.is_active, status.is_reached) {
                    (true, _) => "*",
                    (false, true) => "+",
                    (false, false) => " ",
                };
                println!("  {mark} {:<6} {}", status.name, status.day_label);
            }
            if let Some(days) = report.days_until_next {
                println!("{days} days to the next milestone");
            }
        }
    }
    Ok(())
}
