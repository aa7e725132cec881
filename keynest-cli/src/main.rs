use clap::{Parser, Subcommand};

use keynest_cli::{run_check, run_to_json, run_to_sheet};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a spreadsheet into one nested JSON file per column.
    ToJson {
        /// The input sheet (CSV with a `key` column)
        #[arg(short, long)]
        input: String,
        /// Directory to write one `<column>.json` per locale column
        #[arg(short, long)]
        output: String,
    },

    /// Convert a directory of JSON files into one spreadsheet.
    ToSheet {
        /// Directory containing `*.json` locale files
        #[arg(short, long)]
        input: String,
        /// The output sheet (CSV) to write
        #[arg(short, long)]
        output: String,
    },

    /// Validate a spreadsheet without writing anything.
    Check {
        /// The input sheet (CSV with a `key` column)
        #[arg(short, long)]
        input: String,
    },
}

fn main() {
    let args = Args::parse();

    let outcome = match args.commands {
        Commands::ToJson { input, output } => run_to_json(&input, &output),
        Commands::ToSheet { input, output } => run_to_sheet(&input, &output),
        Commands::Check { input } => run_check(&input),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
