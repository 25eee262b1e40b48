//! Auto-played demo campaign against the embedded (or a supplied) content file.

use clap::Parser;
use dental_quest::{
    create_player, default_chapters, run_campaign, AutoPilot, BattleEngineError, BattleRng,
    ContentTables, PlayerTraits, TraitRating,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// Auto-played Dental Quest campaign
#[derive(Debug, Parser)]
#[command(name = "dental-quest")]
#[command(about = "Plays the dental quest story with an autopilot", long_about = None)]
#[command(version)]
struct DemoConfig {
    /// RON content file to use instead of the embedded tables
    #[arg(long)]
    content: Option<PathBuf>,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Player name; a random fallback name is picked when empty
    #[arg(long, default_value = "")]
    name: String,

    /// Print the campaign report as JSON instead of narration
    #[arg(long)]
    json: bool,
}

fn rng_for(seed: Option<u64>, stream: u64) -> BattleRng {
    match seed {
        Some(seed) => BattleRng::seeded(seed.wrapping_add(stream)),
        None => BattleRng::new_random(),
    }
}

fn run(config: DemoConfig) -> Result<(), BattleEngineError> {
    let content = match &config.content {
        Some(path) => ContentTables::load(path)?,
        None => ContentTables::embedded()?,
    };

    let mut rng = rng_for(config.seed, 0);
    let mut pilot = AutoPilot::new(rng_for(config.seed, 1));

    let traits = PlayerTraits::new(TraitRating::Good, TraitRating::Meh, TraitRating::Bad);
    let player = create_player(&config.name, traits, &content, &mut rng)?;
    tracing::info!(player = %player.name, seed = ?config.seed, "starting campaign");

    let report = run_campaign(player, &default_chapters(), &mut pilot, &content, &mut rng)?;

    if config.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| BattleEngineError::Content(e.to_string()))?;
        println!("{}", json);
        return Ok(());
    }

    for (index, battle) in report.battles.iter().enumerate() {
        println!("\n--BATTLE {}--", index + 1);
        for line in &battle.narration {
            println!("{}", line);
        }
    }
    println!("----------");
    if report.completed {
        println!(
            "{} saved the kingdom at level {} with {}/{}hp.",
            report.player.name, report.player.level, report.player.health, report.player.max_health
        );
    } else {
        println!("{} has fallen. The kingdom's teeth rot on.", report.player.name);
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(DemoConfig::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "campaign aborted");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_definition_is_consistent() {
        DemoConfig::command().debug_assert();
    }

    #[test]
    fn test_defaults_and_flags() {
        let config = DemoConfig::try_parse_from(["dental-quest"]).unwrap();
        assert_eq!(config.content, None);
        assert_eq!(config.seed, None);
        assert_eq!(config.name, "");
        assert!(!config.json);

        let config = DemoConfig::try_parse_from([
            "dental-quest",
            "--seed",
            "42",
            "--name",
            "Ryan",
            "--content",
            "data/content.ron",
            "--json",
        ])
        .unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.name, "Ryan");
        assert_eq!(config.content, Some(PathBuf::from("data/content.ron")));
        assert!(config.json);
    }

    #[test]
    fn test_bad_seed_is_rejected() {
        assert!(DemoConfig::try_parse_from(["dental-quest", "--seed", "soon"]).is_err());
    }
}
