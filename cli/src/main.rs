mod generate;
mod parse_response;
mod prompt;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pantry")]
#[command(about = "Pantry recipe tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a saved model response file and print the structured recipe as JSON
    Parse {
        /// Path to the raw response text
        file: PathBuf,
    },
    /// Show the prompt style and text a button state would use
    Prompt {
        /// Button state (number of previous generations)
        #[arg(long, default_value_t = 0)]
        button_state: u32,
        /// Ingredient name (repeatable)
        #[arg(long = "ingredient", required = true)]
        ingredients: Vec<String>,
    },
    /// Generate a recipe (set PANTRY_AI_PROVIDER=fake to run offline)
    Generate {
        /// Button state (number of previous generations)
        #[arg(long, default_value_t = 0)]
        button_state: u32,
        /// Ingredient name (repeatable)
        #[arg(long = "ingredient", required = true)]
        ingredients: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { file } => {
            parse_response::parse_response(&file)?;
        }
        Commands::Prompt {
            button_state,
            ingredients,
        } => {
            prompt::preview_prompt(button_state, &ingredients)?;
        }
        Commands::Generate {
            button_state,
            ingredients,
        } => {
            generate::generate(button_state, &ingredients).await?;
        }
    }

    Ok(())
}
