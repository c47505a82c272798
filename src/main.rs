use std::{env, io::Read, process::ExitCode, time::Instant};

use card_text_similarity::{
    search::card_query_text, CardSimilarityIndex, InMemoryRepository, SimilarityConfig,
};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_CARDS_PATH: &str = "AllCards.json";
const EXPLAIN_TERMS: usize = 5;

enum Query {
    Card(String),
    Text(String),
}

struct Args {
    cards_path: String,
    config_path: Option<String>,
    query: Option<Query>,
    limit: Option<usize>,
    explain: bool,
}

fn usage() {
    eprintln!("Usage: cardsim [--cards PATH] [--config PATH] [--card NAME | --text TEXT | TEXT] [-n N] [--explain]");
    eprintln!("If no query is given, stdin is read as query text. Output format: <score>\t<card name>");
    eprintln!("Log level: RUST_LOG (default info), written to stderr");
}

/// `Ok(None)` means help was requested
fn parse_args() -> Result<Option<Args>, String> {
    let mut parsed = Args {
        cards_path: DEFAULT_CARDS_PATH.to_string(),
        config_path: None,
        query: None,
        limit: None,
        explain: false,
    };
    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str() {
            "--cards" => {
                parsed.cards_path = args.next().ok_or("--cards requires a path")?;
            }
            "--config" => {
                parsed.config_path = Some(args.next().ok_or("--config requires a path")?);
            }
            "--card" => {
                let name = args.next().ok_or("--card requires a card name")?;
                parsed.query = Some(Query::Card(name));
            }
            "--text" => {
                let text = args.next().ok_or("--text requires a string")?;
                parsed.query = Some(Query::Text(text));
            }
            "-n" | "--limit" => {
                let v = args.next().ok_or("-n requires a number")?;
                match v.parse::<usize>() {
                    Ok(n) if n > 0 => parsed.limit = Some(n),
                    _ => return Err(format!("-n needs a positive integer, got {v:?}")),
                }
            }
            "--explain" => parsed.explain = true,
            "-h" | "--help" => return Ok(None),
            other => {
                if parsed.query.is_none() {
                    parsed.query = Some(Query::Text(other.to_string()));
                } else {
                    warn!(arg = other, "extra argument ignored");
                }
            }
        }
    }
    Ok(Some(parsed))
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let program_start = Instant::now();

    let config = match &args.config_path {
        Some(path) => SimilarityConfig::from_path(path)?,
        None => SimilarityConfig::default(),
    };

    let load_start = Instant::now();
    let repository = InMemoryRepository::from_json_path(&args.cards_path)?;
    let load_ms = load_start.elapsed().as_secs_f64() * 1000.0;

    let index_start = Instant::now();
    let index = CardSimilarityIndex::build(&repository, &config)?;
    let index_ms = index_start.elapsed().as_secs_f64() * 1000.0;
    info!(load_ms, index_ms, "index built");

    let query = match args.query {
        Some(query) => query,
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Query::Text(text)
        }
    };
    let n = args.limit.unwrap_or(index.top_n());

    let query_start = Instant::now();
    let (hits, query_text) = match &query {
        Query::Card(name) => {
            let text = card_query_text(&repository, name)?;
            (index.by_text(&text, n)?, text)
        }
        Query::Text(text) => {
            if text.trim().is_empty() {
                return Err("empty query".into());
            }
            (index.by_text(text, n)?, text.clone())
        }
    };
    info!(
        query_ms = query_start.elapsed().as_secs_f64() * 1000.0,
        hits = hits.len(),
        "query done"
    );

    for hit in &hits {
        println!("{:.6}\t{}", hit.score, hit.name);
        if args.explain {
            let shared = index.explain(&query_text, &hit.name, EXPLAIN_TERMS);
            let terms: Vec<String> = shared
                .iter()
                .map(|(term, weight)| format!("{term}={weight:.4}"))
                .collect();
            println!("\t{}", terms.join(" "));
        }
    }

    info!(total_ms = program_start.elapsed().as_secs_f64() * 1000.0, "done");
    Ok(())
}

fn main() -> ExitCode {
    init_logging();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            usage();
            return ExitCode::SUCCESS;
        }
        Err(msg) => {
            error!("{msg}");
            usage();
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
