use clap::{Args, Parser as ClapParser, Subcommand};
use query_walker::cli::{self, CliError, WalkCommandOptions};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "qwalk")]
#[command(about = "qwalk - walk WHERE-clause trees and show what handlers receive")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the handler callback stream for a tree as JSON
    Trace {
        #[command(flatten)]
        walk: WalkArgs,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Translate a tree back to WHERE-clause text
    Sql {
        #[command(flatten)]
        walk: WalkArgs,
    },

    /// List the tag names accepted in tree JSON
    Tags,
}

#[derive(Args)]
struct WalkArgs {
    /// JSON tree (reads from stdin if not provided)
    #[arg(short, long)]
    input: Option<String>,

    /// Maximum nesting depth before the tree is rejected
    #[arg(long, env = "QWALK_MAX_DEPTH")]
    max_depth: Option<usize>,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Trace { walk, pretty } => run_trace(walk, pretty),
        Commands::Sql { walk } => run_sql(walk),
        Commands::Tags => {
            print!("{}", cli::list_tags());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn read_options(walk: WalkArgs, pretty: bool) -> Result<WalkCommandOptions, CliError> {
    let input = match walk.input {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    Ok(WalkCommandOptions {
        input,
        pretty,
        max_depth: walk.max_depth,
    })
}

fn run_trace(walk: WalkArgs, pretty: bool) -> Result<(), CliError> {
    let options = read_options(walk, pretty)?;
    let events = cli::execute_trace(&options)?;
    let json = if options.pretty {
        serde_json::to_string_pretty(&events)?
    } else {
        serde_json::to_string(&events)?
    };
    println!("{}", json);
    Ok(())
}

fn run_sql(walk: WalkArgs) -> Result<(), CliError> {
    let options = read_options(walk, false)?;
    println!("{}", cli::execute_sql(&options)?);
    Ok(())
}
