use chartfetch::fetch::DEFAULT_TIMEOUT_SECS;
use chartfetch::{yearly_top_songs, Config, Fetcher, Source};
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut cmdline_config = Config::new();
    let mut save_defaults = false;
    let mut json = false;
    let mut positional: Vec<String> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            "--json" => json = true,
            "--save-defaults" => save_defaults = true,
            "--show-saved-defaults" => {
                show_saved_defaults();
                process::exit(0);
            }
            "--timeout" => {
                i += 1;
                match args.get(i).and_then(|v| v.parse::<u64>().ok()) {
                    Some(secs) => cmdline_config.timeout_secs = Some(secs),
                    None => {
                        eprintln!("--timeout requires a number of seconds");
                        process::exit(1);
                    }
                }
            }
            other if other.starts_with("--") => {
                eprintln!("Unknown option: {}", other);
                print_help();
                process::exit(1);
            }
            other => positional.push(other.to_string()),
        }
        i += 1;
    }

    // The optional chart-type positional counts as a command-line
    // setting, so --save-defaults picks it up too.
    if let Some(chart_type) = positional.get(2) {
        cmdline_config.chart_type = Some(chart_type.clone());
    }

    let saved_config = Config::load().unwrap_or_default();
    let mut config = saved_config;
    config.merge(&cmdline_config);

    if save_defaults {
        match config.save() {
            Ok(()) => {
                if let Ok(path) = Config::get_config_path() {
                    println!("Defaults saved to {:?}", path);
                }
                config.print("Saved configuration");
                process::exit(0);
            }
            Err(err) => {
                eprintln!("Failed to save defaults: {}", err);
                process::exit(1);
            }
        }
    }

    if positional.len() < 2 {
        print_help();
        process::exit(1);
    }

    let source = match Source::parse(&positional[0]) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };
    let year = &positional[1];

    let fetcher = Fetcher::new(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
    let entries = match yearly_top_songs(&fetcher, source, year, config.chart_type.as_deref()) {
        Ok(entries) => entries,
        Err(err) => {
            eprintln!("error ({}): {}", err.kind(), err);
            process::exit(1);
        }
    };

    if json {
        match serde_json::to_string_pretty(&entries) {
            Ok(out) => println!("{}", out),
            Err(err) => {
                eprintln!("failed to serialize: {}", err);
                process::exit(1);
            }
        }
        return;
    }

    if entries.is_empty() {
        println!("No entries.");
        return;
    }
    for entry in &entries {
        let detail = match (entry.total_points, entry.best_us) {
            (Some(points), _) => format!(
                "{} pts, peak {}, {} weeks",
                points,
                entry.highest_position.unwrap_or(0),
                entry.appearances
            ),
            (None, Some(best)) => format!("best US {}, {} snapshots", best, entry.appearances),
            (None, None) => format!("{} appearances", entry.appearances),
        };
        println!(
            "{:>3}. {} — {} ({})",
            entry.order, entry.title, entry.artist, detail
        );
    }
}

fn show_saved_defaults() {
    match Config::get_config_path() {
        Ok(path) if path.exists() => match Config::load() {
            Ok(saved) => saved.print("Saved defaults"),
            Err(err) => {
                eprintln!("Failed to read saved defaults: {}", err);
                process::exit(1);
            }
        },
        _ => {
            println!("No saved defaults file found.");
            println!("Use --save-defaults to create one.");
        }
    }
}

fn print_help() {
    println!("Aggregate a year of chart snapshots into a top-50 ranking.");
    println!();
    println!("Usage: yearly <source> <year> [chart-type] [options]");
    println!();
    println!("Sources:");
    println!("  archive   points scoring over weekly charts (1970+)");
    println!("  kworb     best-US-position over daily snapshots (2022+)");
    println!("  shazam    current chart only; no history exists");
    println!();
    println!("Options:");
    println!("  --json                  print JSON instead of text");
    println!("  --timeout <secs>        HTTP timeout (default {})", DEFAULT_TIMEOUT_SECS);
    println!("  --save-defaults         save timeout/chart-type as defaults and exit");
    println!("  --show-saved-defaults   print the saved defaults file and exit");
}
