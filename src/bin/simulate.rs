//! Loot and skill balance simulator CLI.
//!
//! Run Monte Carlo simulations to analyze drop rates and skill pacing.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                      # Default: 1000 runs to level 30
//!   cargo run --bin simulate -- -n 100 -l 15      # 100 runs to level 15
//!   cargo run --bin simulate -- --seed 42         # Reproducible run

use std::env;
use std::path::PathBuf;
use windfall::items::LootTables;
use windfall::simulator::{run_simulation, SimConfig};
use windfall::skills::SkillGraph;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              WINDFALL BALANCE SIMULATOR                       ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Max Level:      {}", config.max_level);
    println!("  Drops / Level:  {}", config.drops_per_level);
    println!("  Buy Skills:     {}", config.buy_skills);
    if let Some(path) = &config.tables_path {
        println!("  Tables:         {}", path.display());
    }
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let tables = match &config.tables_path {
        Some(path) => LootTables::load_or_default(path),
        None => LootTables::default(),
    };
    let graph = match SkillGraph::try_standard() {
        Ok(graph) => graph,
        Err(e) => {
            log::error!("Skill catalog is invalid: {}", e);
            std::process::exit(1);
        }
    };

    let report = match run_simulation(&config, &graph, &tables) {
        Ok(report) => report,
        Err(e) => {
            log::error!("Simulation failed: {}", e);
            std::process::exit(1);
        }
    };

    println!("{}", report.to_text());

    // Optionally save JSON report
    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, json) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => log::error!("Failed to write JSON report {}: {}", filename, e),
        }
    }
}

/// Start from the preset named anywhere on the command line, then apply
/// every other flag on top of it, whatever the order.
fn parse_args(args: &[String]) -> SimConfig {
    let mut config = preset(args);

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-l" | "--levels" => {
                if i + 1 < args.len() {
                    config.max_level = args[i + 1].parse().unwrap_or(30);
                    i += 1;
                }
            }
            "-d" | "--drops" => {
                if i + 1 < args.len() {
                    config.drops_per_level = args[i + 1].parse().unwrap_or(10);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--tables" => {
                if i + 1 < args.len() {
                    config.tables_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--no-skills" => {
                config.buy_skills = false;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn preset(args: &[String]) -> SimConfig {
    if args.iter().any(|a| a == "--loot") {
        SimConfig::loot_analysis()
    } else if args.iter().any(|a| a == "--quick") {
        SimConfig::quick()
    } else {
        SimConfig::default()
    }
}

fn print_help() {
    println!("Windfall Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of simulation runs (default: 1000)");
    println!("    -l, --levels <L>    Player level each run climbs to (default: 30)");
    println!("    -d, --drops <D>     Drop events per level (default: 10)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    --tables <FILE>     Load loot tables from a RON file");
    println!("    --no-skills         Never spend skill points (baseline rates)");
    println!("    -v, --verbose       Log every run");
    println!("    --json              Save JSON report");
    println!("    --quick             Quick test (100 runs to level 15)");
    println!("    --loot              Loot analysis (50 drops per level)");
    println!("    -h, --help          Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                          # Default run");
    println!("    cargo run --bin simulate -- -n 100 -l 15          # 100 runs to level 15");
    println!("    cargo run --bin simulate -- --seed 42             # Reproducible");
    println!("    cargo run --bin simulate -- --tables data/loot_tables.ron");
    println!("    cargo run --bin simulate -- --no-skills --quick   # Baseline check");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("simulate")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_flags_before_preset_survive() {
        let config = parse_args(&args(&["--no-skills", "--quick", "--seed", "7"]));
        assert!(!config.buy_skills);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.num_runs, SimConfig::quick().num_runs);
        assert_eq!(config.max_level, SimConfig::quick().max_level);
    }

    #[test]
    fn test_seed_before_quick_is_kept() {
        let config = parse_args(&args(&["--seed", "7", "--quick"]));
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_explicit_runs_override_loot_preset() {
        let config = parse_args(&args(&["-n", "20", "--loot"]));
        assert_eq!(config.num_runs, 20);
        assert_eq!(config.drops_per_level, SimConfig::loot_analysis().drops_per_level);
    }

    #[test]
    fn test_defaults_without_flags() {
        let config = parse_args(&args(&[]));
        assert_eq!(config.num_runs, SimConfig::default().num_runs);
        assert!(config.buy_skills);
        assert_eq!(config.verbosity, 0);
    }
}
