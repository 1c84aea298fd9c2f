use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use linku_core::{HttpSource, LexicalCache, Resolver};
use linku_types::{LanguageCatalog, WordEntry};
use tokio::signal;
use tracing_subscriber::EnvFilter;

mod render;
mod session;
mod settings;

use self::session::Session;

/// Look up toki pona words in the Linku dictionary
#[derive(Parser)]
#[command(name = "linku", version)]
struct Cli {
    /// JSON config file; environment variables are used when absent
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Definition language, checked against the language catalog
    /// (defaults to the configured one)
    #[arg(short, long, global = true)]
    lang: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the definition of one word
    #[command(alias = "n")]
    Nimi {
        word: String,
        /// Show etymology, commentary and related words
        #[arg(short, long)]
        expand: bool,
    },
    /// List words starting with a prefix
    Prefix {
        prefix: String,
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// List the available definition languages
    #[command(alias = "toki")]
    Languages,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    run(Cli::parse()).await
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = settings::load_config(cli.config.as_deref())?;

    let source = Arc::new(HttpSource::new(config.source.clone()));
    let cache = Arc::new(LexicalCache::open(&config.cache, &config.default_language, source).await?);
    let resolver = Resolver::new(cache.clone(), config.cache.sandbox_fallback);
    let session = Session::new(resolver, &config.default_language);

    let result = tokio::select! {
        result = execute(&session, cli.lang.as_deref(), cli.command) => result,
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
            Ok(())
        }
    };

    cache.close().await;
    result
}

async fn execute(session: &Session, lang: Option<&str>, command: Command) -> anyhow::Result<()> {
    let language = session.select_language(lang).await?;

    match command {
        Command::Nimi { word, expand } => {
            let entry = session.lookup_word(&word, &language).await?;
            print_word(&word, entry.as_ref(), &language, expand)
        }
        Command::Prefix { prefix, limit } => {
            let hits = session.lookup_by_prefix(&prefix, &language).await?;
            let mut words: Vec<_> = hits.into_iter().collect();
            words.sort_by(|(a, _), (b, _)| a.cmp(b));

            for (key, value) in words.into_iter().take(limit) {
                print_word(&key, Some(&WordEntry::new(key.as_str(), value)), &language, false)?;
                println!();
            }
            Ok(())
        }
        Command::Languages => {
            let catalog = session.resolver().catalog().await?;
            print_languages(&catalog);
            Ok(())
        }
    }
}

fn print_word(
    word: &str,
    entry: Option<&WordEntry>,
    language: &str,
    expand: bool,
) -> anyhow::Result<()> {
    let Some(entry) = entry else {
        println!("{}", render::not_found(word));
        return Ok(());
    };

    let details = entry.details()?;
    if expand {
        println!("{}", render::extended(&details, language));
    } else {
        println!("{}", render::compact(&details, language));
    }
    Ok(())
}

fn print_languages(catalog: &LanguageCatalog) {
    for (code, info) in catalog.iter() {
        println!("{}", render::language_line(code, info));
    }
}
