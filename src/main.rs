use std::io::{self, Write};

use clap::Parser;
use docsearch::cli::{Cli, Commands};
use docsearch::commands;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "DOCSEARCH_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Search { query, args, tags }) => {
            let results = commands::search(&query, &args)?;
            let mut out = io::stdout().lock();
            commands::write_results(&mut out, &query, &results, tags)?;
            out.flush()?;
            Ok(())
        }
        Some(Commands::List { index }) => {
            let entries = commands::list(index)?;
            if entries.is_empty() {
                println!("No entries found.");
            } else {
                for entry in &entries {
                    println!("{}: {}", entry.tag, entry.title);
                }
            }
            Ok(())
        }
        Some(Commands::Resolve {
            query,
            start,
            end,
            args,
        }) => {
            let resolution = commands::resolve(&query, start, end, &args)?;
            println!("Line: {}..{}", resolution.line.start, resolution.line.end);
            println!("Row: {}", resolution.line.row);
            match (resolution.tag, resolution.target) {
                (Some(tag), Some(target)) => {
                    println!("Tag: {tag}");
                    println!("Target: {}", target.location);
                }
                _ => println!("No entry at selection"),
            }
            Ok(())
        }
        Some(Commands::Interactive { args }) => {
            let context = commands::open(&args)?;
            let stdin = io::stdin().lock();
            let mut stdout = io::stdout().lock();
            docsearch::repl::run(stdin, &mut stdout, context.widget())?;
            Ok(())
        }
        Some(Commands::Convert { input, output }) => {
            let count = commands::convert(&input, &output)?;
            println!("Converted {count} entries to {}", output.display());
            Ok(())
        }
        #[cfg(feature = "mcp")]
        Some(Commands::Serve { index }) => {
            tokio::runtime::Runtime::new()?.block_on(docsearch::mcp::serve(index))
        }
        None => {
            Cli::parse_from(["docsearch", "--help"]);
            Ok(())
        }
    }
}
