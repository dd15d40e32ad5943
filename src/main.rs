//! Demo CLI: replays a CSV command stream against one order book and
//! writes the final-state dump. Outside the matching core's tested
//! surface — this is the "external collaborator" the library expects.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use limit_order_book::{ingest, OrderBookBuilder};

#[derive(Parser, Debug)]
#[command(author, version, about = "Replay a PLACE/DELETE command stream against a limit order book")]
struct Cli {
    /// CSV command stream (header + PLACE/DELETE rows)
    #[arg(long)]
    input: PathBuf,

    /// Where to write the final-state dump
    #[arg(long)]
    output: PathBuf,

    /// Symbol label for the book (not part of matching)
    #[arg(long, default_value = "SYMBOL")]
    symbol: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let commands = ingest::read_commands(&cli.input)?;
    let mut book = OrderBookBuilder::new(cli.symbol).build();

    let mut trades_emitted = 0usize;
    let started = Instant::now();
    for command in &commands {
        match *command {
            ingest::Command::Place { id, side, price, volume } => {
                trades_emitted += book.place_order(id, 0, side, price, volume).len();
            }
            ingest::Command::Delete { id } => book.delete_order(id),
        }
    }
    let elapsed = started.elapsed();
    let ops_per_sec = commands.len() as f64 / elapsed.as_secs_f64();

    tracing::info!(
        commands = commands.len(),
        trades = trades_emitted,
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        ops_per_sec,
        best_buy = book.best_buy(),
        best_sell = book.best_sell(),
        "replay complete"
    );

    ingest::write_book_dump(&cli.output, &book)?;
    Ok(())
}
