use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

use nutridigital::catalog::Catalog;
use nutridigital::cli::parse_args;
use nutridigital::generator::generate_plan;
use nutridigital::session::SessionState;

fn main() -> Result<()> {
    env_logger::init();

    let cli_args = parse_args();

    let catalog = match &cli_args.catalog_file {
        Some(path) => Catalog::from_csv_path(Path::new(path))
            .with_context(|| format!("Failed to load food catalog from '{}'", path))?,
        None => Catalog::builtin()?,
    };
    log::info!("Food catalog loaded: {} items", catalog.len());

    let session_content = std::fs::read_to_string(&cli_args.session_file)
        .with_context(|| format!("Failed to read session file '{}'", cli_args.session_file))?;
    let session: SessionState = serde_json::from_str(&session_content)
        .with_context(|| format!("Failed to parse session file '{}'", cli_args.session_file))?;

    if let Some(routine) = &session.routine {
        if !routine.validate() {
            log::warn!("routine contains times that are not valid 24-hour HH:MM");
        }
    }

    let mut rng: StdRng = match cli_args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let plan = generate_plan(&session, &catalog, &mut rng)
        .context("Failed to generate diet plan")?;

    let output = if cli_args.pretty {
        serde_json::to_string_pretty(&plan)?
    } else {
        serde_json::to_string(&plan)?
    };
    println!("{}", output);

    Ok(())
}
