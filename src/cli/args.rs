use std::path::PathBuf;

pub struct Args {
    pub catalog: Option<PathBuf>,
    pub data: Option<PathBuf>,
    pub seed: Option<u64>,
    pub system: Option<String>,
    pub planet: Option<String>,
    pub custom: Option<String>,
}

pub fn parse() -> Args {
    let mut args = Args {
        catalog: None,
        data: None,
        seed: None,
        system: None,
        planet: None,
        custom: None,
    };
    let mut iter = std::env::args().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--catalog" | "-c" => {
                args.catalog = Some(require_value(&mut iter, "--catalog").into());
            }
            "--data" | "-d" => {
                args.data = Some(require_value(&mut iter, "--data").into());
            }
            "--seed" | "-s" => {
                args.seed = Some(
                    require_value(&mut iter, "--seed")
                        .parse::<u64>()
                        .expect("seed must be a valid integer"),
                );
            }
            "--system" => args.system = Some(require_value(&mut iter, "--system")),
            "--planet" => args.planet = Some(require_value(&mut iter, "--planet")),
            "--custom" => args.custom = Some(require_value(&mut iter, "--custom")),
            "--help" | "-h" => {
                println!("Usage: starnav [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --catalog <PATH>  Catalog JSON file (embedded dataset if omitted)");
                println!("  -d, --data <PATH>     Store file for locations and waypoints");
                println!("  -s, --seed <INT>      Seed for waypoint id generation");
                println!("      --system <ID>     Open this system at startup");
                println!("      --planet <ID>     Pre-select this planet (with --system)");
                println!("      --custom <ID>     Pre-select this waypoint (with --system)");
                println!("  -h, --help            Print help");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                std::process::exit(1);
            }
        }
    }

    args
}

fn require_value(iter: &mut impl Iterator<Item = String>, flag: &str) -> String {
    match iter.next() {
        Some(value) => value,
        None => {
            eprintln!("Error: {} requires a value", flag);
            std::process::exit(1);
        }
    }
}
