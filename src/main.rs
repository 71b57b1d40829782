//! zod-prisma-gen - emit Zod schemas from a Prisma DMMF
//!
//! This binary reads a JSON request `{ "dmmf": ..., "options": ... }` from a
//! file or stdin and writes the generated TypeScript files below the output
//! directory. Nothing is written unless generation succeeds as a whole.

use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "ZOD_PRISMA_GEN_LOG";

#[derive(Parser)]
#[command(name = "zod-prisma-gen", version, about = "Generate Zod schemas from a Prisma DMMF")]
struct Args {
    /// Request file; stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = "generated/zod")]
    output: PathBuf,

    /// List the files that would be written without writing them
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("zod-prisma-gen: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let buf = match &args.input {
        Some(path) => fs::read(path)?,
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };

    let files = zod_prisma_gen::generate_from_bytes(&buf)?;

    if args.dry_run {
        for file in &files {
            println!("{}", args.output.join(&file.name).display());
        }
        return Ok(());
    }

    for file in &files {
        let path = args.output.join(&file.name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &file.content)?;
        tracing::debug!(path = %path.display(), "wrote file");
    }
    tracing::info!(files = files.len(), output = %args.output.display(), "done");

    Ok(())
}
