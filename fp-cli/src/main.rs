//! Feeding point CLI - list, locate, refill and export community feeding points.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "fp-cli",
    version,
    about = "Community pet feeding point toolkit"
)]
struct Cli {
    #[command(flatten)]
    backend: fp_cmd::BackendArgs,

    #[command(subcommand)]
    command: fp_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    fp_cmd::run(cli.backend, cli.command).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use fp_cmd::Command;

    #[test]
    fn parses_nearby_with_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "fp-cli", "--local", "points.db", "nearby", "--lat", "-23.55", "--lon", "-46.63", "-n", "3",
        ])
        .unwrap();
        assert_eq!(cli.backend.local.as_deref(), Some(std::path::Path::new("points.db")));
        assert_eq!(
            cli.command,
            Command::Nearby { lat: -23.55, lon: -46.63, limit: 3 }
        );
    }

    #[test]
    fn rejects_unknown_status() {
        assert!(Cli::try_parse_from(["fp-cli", "list", "--status", "empty"]).is_err());
        let cli = Cli::try_parse_from(["fp-cli", "list", "--status", "needs_food"]).unwrap();
        assert_eq!(
            cli.command,
            Command::List { status: Some(fp_cmd::StationStatus::NeedsFood) }
        );
    }
}
