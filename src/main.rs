use clap::{Args, Parser, Subcommand};
use hevy_organizer::{
    Config, DEFAULT_PAGE_SIZE, MalformedPolicy, fetch_and_organize, write_flat_csv,
};
use std::error::Error;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "hevy-organizer",
    about = "Organize Hevy workouts into dated folders of summaries and CSV files"
)]
struct Cli {
    /// API key; falls back to HEVY_API_KEY env var
    #[arg(long, env = "HEVY_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Override the API base URL
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Args)]
struct PageArgs {
    /// Page to fetch, starting at 1
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Workouts per page (1-10)
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Write one folder per workout with a summary and an exercises CSV
    Organize {
        #[command(flatten)]
        paging: PageArgs,
        /// Directory receiving the workout folders
        #[arg(long, env = "HEVY_OUTPUT_DIR", default_value = "output")]
        output_dir: PathBuf,
        /// Skip workouts without a start time instead of failing
        #[arg(long)]
        skip_malformed: bool,
    },
    /// Write all sets of the fetched workouts into a single CSV file
    Export {
        #[command(flatten)]
        paging: PageArgs,
        /// Output CSV file
        #[arg(long, default_value = "exercises.csv")]
        output: PathBuf,
    },
    /// Print the raw JSON page returned by the API
    Fetch {
        #[command(flatten)]
        paging: PageArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = Config::new(cli.api_key)?;
    if let Some(url) = cli.base_url {
        config = config.with_base_url(url);
    }

    match cli.command {
        Commands::Organize {
            paging,
            output_dir,
            skip_malformed,
        } => {
            let policy = if skip_malformed {
                MalformedPolicy::Skip
            } else {
                MalformedPolicy::Fail
            };
            let config = config
                .with_page(paging.page, paging.page_size)
                .with_output_dir(output_dir)
                .with_malformed_policy(policy);
            let output = fetch_and_organize(&config).await?;
            println!("Workouts organized in: {}", output.display());
        }
        Commands::Export { paging, output } => {
            let page = config
                .client()?
                .fetch_workouts_page(paging.page, paging.page_size)
                .await?;
            write_flat_csv(&page.workouts, &output)?;
            println!("Exercises written to {}", output.display());
        }
        Commands::Fetch { paging } => {
            let payload = config
                .client()?
                .fetch_workouts_page_raw(paging.page, paging.page_size)
                .await?;
            println!("{payload}");
        }
    }

    Ok(())
}
