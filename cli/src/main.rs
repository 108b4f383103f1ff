//! walletgraph CLI: build wallet interaction graphs from the terminal.
//!
//! Usage:
//! ```bash
//! # Print a wallet's interaction graph as JSON
//! walletgraph graph --address 0x742d35Cc6634C0532925a3b844Bc454e4438f44e --api-key KEY
//!
//! # Same wallet through a local name alias, pretty-printed to a file
//! walletgraph graph --address alice.eth --alias alice.eth=0x742d... \
//!     --pretty --out graph.json
//!
//! # Who does this wallet transact with most?
//! walletgraph counterparties --address 0x742d... --top 10
//!
//! # List supported explorer profiles
//! walletgraph providers
//! ```

use std::env;
use std::fs;
use std::process;
use std::sync::Arc;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use walletgraph_core::error::HistoryError;
use walletgraph_core::progress::{ProgressEvent, ProgressSink};
use walletgraph_core::resolver::StaticResolver;
use walletgraph_core::summary::Direction;
use walletgraph_core::types::Address;
use walletgraph_scan::client::HttpScanClient;
use walletgraph_scan::fetcher::HistoryFetcher;
use walletgraph_scan::providers;
use walletgraph_scan::query::{counterparty_summaries, interaction_graph};

#[tokio::main]
async fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "graph" => cmd_graph(&args[2..]).await,
        "counterparties" => cmd_counterparties(&args[2..]).await,
        "providers" => {
            cmd_providers();
            Ok(())
        }
        "version" | "--version" | "-V" => {
            println!("walletgraph {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn print_usage() {
    println!("walletgraph {}", env!("CARGO_PKG_VERSION"));
    println!("Build wallet interaction graphs from explorer transaction history\n");
    println!("USAGE:");
    println!("    walletgraph <COMMAND>\n");
    println!("COMMANDS:");
    println!("    graph           Fetch a wallet's history and print the interaction graph");
    println!("    counterparties  Summarize who a wallet transacts with most");
    println!("    providers       List supported explorer profiles");
    println!("    version         Print version");
    println!("    help            Print this help\n");
    println!("GRAPH / COUNTERPARTIES FLAGS:");
    println!("    --address <ADDR|NAME.eth>  Wallet address or resolvable name  [required]");
    println!("    --provider <NAME>          Explorer profile (default: base)");
    println!("    --api-key <KEY>            Explorer API key  [env: WALLETGRAPH_API_KEY]");
    println!("    --page-size <N>            Records requested per page (default: 100)");
    println!("    --alias <NAME=ADDR>        Local name mapping, repeatable");
    println!("    --progress                 Print progress events to stderr\n");
    println!("GRAPH FLAGS:");
    println!("    --out <FILE>               Write the JSON to a file instead of stdout");
    println!("    --pretty                   Pretty-print the JSON\n");
    println!("COUNTERPARTIES FLAGS:");
    println!("    --top <N>                  Show only the N busiest counterparties");
}

async fn cmd_graph(args: &[String]) -> Result<(), String> {
    let (fetcher, input, resolver) = prepare_query(args);

    let graph = match interaction_graph(&fetcher, &input, Some(&resolver)).await {
        Ok(graph) => graph,
        Err(e) => query_error(e),
    };

    let json = if has_flag(args, "--pretty") {
        serde_json::to_string_pretty(&graph)
    } else {
        serde_json::to_string(&graph)
    }
    .map_err(|e| e.to_string())?;

    match parse_flag(args, "--out") {
        Some(path) => {
            fs::write(&path, json + "\n").map_err(|e| format!("cannot write {path}: {e}"))?;
            println!("Wrote graph to {path}");
        }
        None => println!("{json}"),
    }

    Ok(())
}

async fn cmd_counterparties(args: &[String]) -> Result<(), String> {
    let (fetcher, input, resolver) = prepare_query(args);

    let (central, mut summaries) = match counterparty_summaries(&fetcher, &input, Some(&resolver)).await
    {
        Ok(result) => result,
        Err(e) => query_error(e),
    };

    if let Some(top) = parse_flag(args, "--top") {
        let top: usize = top
            .parse()
            .unwrap_or_else(|_| usage_error("--top must be a non-negative integer"));
        summaries.truncate(top);
    }

    if summaries.is_empty() {
        println!("No counterparty transactions found for {central}");
        return Ok(());
    }

    println!("Counterparties of {} ({} shown):\n", central.short(), summaries.len());
    println!("  {:<42} {:>5} {:>5} {:>9}", "ADDRESS", "TXS", "SENT", "RECEIVED");
    for summary in &summaries {
        let sent = summary
            .transactions
            .iter()
            .filter(|r| Direction::of(r, &central) == Direction::Sent)
            .count();
        println!(
            "  {:<42} {:>5} {:>5} {:>9}",
            summary.address,
            summary.count(),
            sent,
            summary.count() - sent,
        );
    }

    Ok(())
}

fn cmd_providers() {
    println!("Supported explorer profiles:\n");
    for (name, url) in providers::SUPPORTED {
        println!("  {name:<9} {url}");
    }
    println!("\nAll profiles speak the same txlist dialect; select one with --provider.");
}

// ─── Query setup ──────────────────────────────────────────────────────────────

/// Parse the flags shared by `graph` and `counterparties` and build the
/// fetcher. Exits with a usage error on any invalid flag.
fn prepare_query(args: &[String]) -> (HistoryFetcher<HttpScanClient>, String, StaticResolver) {
    let input =
        parse_flag(args, "--address").unwrap_or_else(|| usage_error("--address is required"));

    let provider = parse_flag(args, "--provider").unwrap_or_else(|| "base".to_string());
    let base_url = providers::by_name(&provider).unwrap_or_else(|| {
        let names: Vec<&str> = providers::SUPPORTED.iter().map(|(n, _)| *n).collect();
        usage_error(format!(
            "unknown provider '{provider}' (supported: {})",
            names.join(", ")
        ))
    });

    let api_key = parse_flag(args, "--api-key")
        .or_else(|| env::var("WALLETGRAPH_API_KEY").ok())
        .unwrap_or_else(|| usage_error("an API key is required: pass --api-key or set WALLETGRAPH_API_KEY"));

    let mut resolver = StaticResolver::new();
    for spec in parse_multi_flag(args, "--alias") {
        let (name, raw) = spec
            .split_once('=')
            .unwrap_or_else(|| usage_error(format!("--alias expects NAME=ADDRESS, got '{spec}'")));
        let address =
            Address::parse(raw).unwrap_or_else(|e| usage_error(format!("--alias {name}: {e}")));
        resolver = resolver.with(name, address);
    }

    let mut fetcher = HistoryFetcher::new(HttpScanClient::default_for(base_url, api_key));
    if let Some(raw) = parse_flag(args, "--page-size") {
        let page_size = match raw.parse::<usize>() {
            Ok(n) if n > 0 => n,
            _ => usage_error("--page-size must be a positive integer"),
        };
        fetcher = fetcher.with_page_size(page_size);
    }
    if has_flag(args, "--progress") {
        fetcher = fetcher.with_sink(Arc::new(StderrSink));
    }

    (fetcher, input, resolver)
}

/// The original UI's log panel, relocated to stderr.
struct StderrSink;

impl ProgressSink for StderrSink {
    fn publish(&self, event: ProgressEvent) {
        eprintln!("[{}] {}", event.timestamp.format("%H:%M:%S"), event.message);
    }
}

// ─── Exit paths ───────────────────────────────────────────────────────────────

fn usage_error(msg: impl AsRef<str>) -> ! {
    eprintln!("Error: {}", msg.as_ref());
    eprintln!("Run 'walletgraph help' for usage.");
    process::exit(2)
}

/// Bad input exits 2 like any other usage error; a failed fetch exits 1.
fn query_error(e: HistoryError) -> ! {
    eprintln!("Error: {e}");
    process::exit(if e.is_pre_fetch() { 2 } else { 1 })
}

// ─── Logging ──────────────────────────────────────────────────────────────────

/// Honors RUST_LOG; logs go to stderr so stdout stays parseable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

// ─── Flag parsing ─────────────────────────────────────────────────────────────

fn parse_flag(args: &[String], flag: &str) -> Option<String> {
    let pos = args.iter().position(|a| a == flag)?;
    args.get(pos + 1).cloned()
}

fn parse_multi_flag(args: &[String], flag: &str) -> Vec<String> {
    args.iter()
        .enumerate()
        .filter(|(_, a)| *a == flag)
        .filter_map(|(i, _)| args.get(i + 1).cloned())
        .collect()
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}
