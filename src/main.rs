use anyhow::Result;
use clap::Parser;
use llp::dispatch::{self, Algorithm};
use std::path::PathBuf;

/// Run one of the parallel LLP algorithm instances over an input file and
/// print the resulting integer array.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Algorithm name: Reduce, PrefixSum, BellmanFord, Johnson, FastComp,
    /// GaleShapley or Boruvka.
    algorithm: String,
    /// Input file in the format the chosen algorithm expects.
    input: PathBuf,
    /// Source vertex for BellmanFord.
    #[arg(long, default_value_t = 0)]
    source: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let algorithm: Algorithm = args.algorithm.parse()?;
    match dispatch::run(algorithm, &args.input, args.source)? {
        Some(result) => {
            let rendered: Vec<String> = result.iter().map(ToString::to_string).collect();
            println!("{}", rendered.join(" "));
        }
        // Detection is a result, not an error.
        None => println!("no result: negative cycle detected"),
    }
    Ok(())
}
