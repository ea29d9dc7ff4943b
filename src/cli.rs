use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the session JSON file (profile, activity, goal, routine, restrictions)
    #[arg(short, long)]
    pub session_file: String,

    /// Path to a food catalog CSV; defaults to the built-in table
    #[arg(short, long)]
    pub catalog_file: Option<String>,

    /// Seed for item selection, for reproducible plans
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
