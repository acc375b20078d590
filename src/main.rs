//! Pooled Random CLI
//!
//! Command-line interface for demonstrating the dual-pool generator:
//! seeds from the OS entropy source and emits bytes from either stream.

use std::path::PathBuf;

use clap::Parser;
use pooled_random::{Generator, GeneratorConfig, OsSource};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "pooled-random", version, about = "Dual-pool CSPRNG demo")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of random bytes to emit.
    #[arg(long, default_value_t = 32)]
    bytes: usize,

    /// Emit from the hardened secure stream instead of the fast one.
    #[arg(long)]
    secure: bool,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    if args.bytes == 0 {
        eprintln!("--bytes must be at least 1");
        std::process::exit(1);
    }

    info!("Pooled Random v{}", pooled_random::VERSION);

    let config = match &args.config {
        Some(path) => match GeneratorConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config: {}", e);
                std::process::exit(1);
            }
        },
        None => GeneratorConfig::default(),
    };

    let mut generator = Generator::new(config);
    let mut source = OsSource::new();

    info!("Seeding from OS entropy source...");
    let mut rounds = 0u32;
    while !generator.insecure_ready() {
        if let Err(e) = generator.seed_from(&mut source, config.reseed_bytes as usize) {
            eprintln!("Failed to read OS entropy: {}", e);
            std::process::exit(1);
        }
        rounds += 1;
    }
    info!("Seeded in {} rounds", rounds);

    let mut output = vec![0u8; args.bytes];
    let result = if args.secure {
        generator.secure_bytes(&mut output)
    } else {
        generator.insecure_bytes(&mut output)
    };
    if let Err(e) = result {
        eprintln!("Generation failed: {}", e);
        std::process::exit(1);
    }

    println!(
        "{}",
        output
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<String>()
    );

    info!(
        stream = if args.secure { "secure" } else { "insecure" },
        bytes = args.bytes,
        "Done"
    );
}
