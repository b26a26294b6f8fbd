use btriev::cli::{self, CliError};
use clap::{Parser as ClapParser, Subcommand};
use std::fs;
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "btriev")]
#[command(about = "btriev - A boolean query language for tag-based record retrieval")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a query against a JSON dataset
    Query {
        /// The btriev query to evaluate
        query: String,

        /// Path to the JSON dataset (reads from stdin if not provided)
        #[arg(short, long)]
        dataset: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Validate query syntax without a dataset
    Check {
        /// The btriev query to validate
        query: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Query {
            query,
            dataset,
            pretty,
        } => run_query(query, dataset, pretty),
        Commands::Check { query } => match cli::check_syntax(&query) {
            Ok(()) => {
                println!("Syntax is valid");
                Ok(())
            }
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_query(query: String, dataset: Option<String>, pretty: bool) -> Result<(), CliError> {
    let dataset_json = match dataset {
        Some(path) => fs::read_to_string(path).map_err(CliError::Io)?,
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(CliError::Io)?;
            buffer
        }
        None => return Err(CliError::NoDataset),
    };

    let data_ids = cli::execute_query(&query, &dataset_json)?;

    let json = if pretty {
        serde_json::to_string_pretty(&data_ids)
    } else {
        serde_json::to_string(&data_ids)
    }
    .map_err(CliError::Json)?;
    println!("{}", json);

    Ok(())
}
