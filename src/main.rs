use std::env;
use std::fs;
use std::process;

use chartcheck::CheckOptions;

const USAGE: &str = "Usage: chartcheck [--lanes N] [--max-entries N] check <chart.yaml>
       chartcheck split <chart.yaml> [output.yaml]
       chartcheck bar <chart.yaml> <tick>";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let mut options = CheckOptions::default();
    let mut rest: Vec<&String> = Vec::new();

    // Parse flags
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--lanes" => options.lanes_count = parse_number(iter.next(), "--lanes"),
            "--max-entries" => options.max_report_entries = parse_number(iter.next(), "--max-entries"),
            _ => rest.push(arg),
        }
    }

    if rest.len() < 2 {
        usage_exit();
    }

    let command = rest[0].as_str();
    let input_path = rest[1];
    let source = match fs::read_to_string(input_path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", input_path, e);
            process::exit(1);
        }
    };

    match command {
        "check" => {
            let report = match chartcheck::check_source(&source, &options) {
                Ok(report) => report,
                Err(e) => {
                    eprintln!("Check error: {}", e);
                    process::exit(1);
                }
            };
            print!("{}", report);
            if !report.is_clean() {
                process::exit(2);
            }
        }
        "split" => {
            let yaml = match chartcheck::split_source(&source) {
                Ok(yaml) => yaml,
                Err(e) => {
                    eprintln!("Split error: {}", e);
                    process::exit(1);
                }
            };
            match rest.get(2) {
                Some(path) => {
                    if let Err(e) = fs::write(path, &yaml) {
                        eprintln!("Error writing to '{}': {}", path, e);
                        process::exit(1);
                    }
                    eprintln!("Wrote split chart to {}", path);
                }
                None => print!("{}", yaml),
            }
        }
        "bar" => {
            let tick: u32 = parse_number(rest.get(2).copied(), "tick");
            match chartcheck::locate_tick(&source, tick) {
                Ok(pos) => println!("Bar {} (tick {})", pos.bar_index + 1, pos.tick_offset),
                Err(e) => {
                    eprintln!("Lookup error: {}", e);
                    process::exit(1);
                }
            }
        }
        _ => usage_exit(),
    }
}

fn parse_number<T: std::str::FromStr>(value: Option<&String>, name: &str) -> T {
    match value.and_then(|v| v.parse().ok()) {
        Some(n) => n,
        None => {
            eprintln!("Expected a number for {}", name);
            process::exit(1);
        }
    }
}

fn usage_exit() -> ! {
    eprintln!("{}", USAGE);
    process::exit(1);
}
