//! tickloop - Terminal Render Loop
//!
//! Renders a panel on a fixed cadence until the quit key or Ctrl+C.

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgMatches, Command};
use tickloop::config::Overrides;
use tickloop::{Application, Scene, Settings};

fn cli() -> Command {
    let command = Command::new("tickloop")
        .version(tickloop::VERSION)
        .about("A tiny terminal render loop")
        .long_about(
            "tickloop redraws a bordered panel on a fixed interval. The 'ticks' scene shows a \
             counter incremented once per interval; the 'hello' scene shows a static greeting. \
             Press the quit key (default 'q', case-insensitive) or Ctrl+C to exit.",
        )
        .arg(
            Arg::new("scene")
                .long("scene")
                .short('s')
                .help("What to draw: 'ticks' or 'hello'")
                .value_parser(["ticks", "counter", "hello", "greeting"]),
        )
        .arg(
            Arg::new("interval")
                .long("interval")
                .short('i')
                .value_name("MS")
                .help("Milliseconds between renders")
                .value_parser(value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("quit-key")
                .long("quit-key")
                .short('q')
                .value_name("CHAR")
                .help("Key that quits the loop (case-insensitive)")
                .value_parser(value_parser!(char)),
        );

    #[cfg(feature = "config")]
    let command = command.arg(
        Arg::new("config")
            .long("config")
            .short('c')
            .value_name("PATH")
            .help("Read settings from a TOML file")
            .value_parser(value_parser!(std::path::PathBuf)),
    );

    command
}

fn overrides(matches: &ArgMatches) -> Result<Overrides> {
    let scene = matches
        .get_one::<String>("scene")
        .map(|name| name.parse::<Scene>())
        .transpose()?;

    Ok(Overrides {
        refresh_interval_ms: matches.get_one::<u64>("interval").copied(),
        quit_key: matches.get_one::<char>("quit-key").copied(),
        scene,
    })
}

#[cfg(feature = "config")]
fn base_settings(matches: &ArgMatches) -> Result<Settings> {
    let settings = match matches.get_one::<std::path::PathBuf>("config") {
        Some(path) => Settings::load(path)?,
        None => Settings::load_default()?,
    };
    Ok(settings)
}

#[cfg(not(feature = "config"))]
fn base_settings(_matches: &ArgMatches) -> Result<Settings> {
    Ok(Settings::default())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging for development
    env_logger::init();

    let matches = cli().get_matches();
    let settings = base_settings(&matches)?.apply(overrides(&matches)?);
    log::info!("starting with {:?}", settings);

    let app = Application::new(settings).context("invalid settings")?;

    match app.run().await {
        Ok(report) => {
            log::info!(
                "quit after {} ticks ({} renders)",
                report.ticks,
                report.renders
            );
            Ok(())
        }
        Err(err) if err.is_interrupt() => {
            log::info!("{}", err);
            Ok(())
        }
        Err(err) => Err(err).context("render loop failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constant() {
        assert!(!tickloop::VERSION.is_empty());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn test_no_arguments_keeps_defaults() {
        let matches = cli().try_get_matches_from(["tickloop"]).unwrap();
        assert_eq!(overrides(&matches).unwrap(), Overrides::default());
    }

    #[test]
    fn test_flags_become_overrides() {
        let matches = cli()
            .try_get_matches_from(["tickloop", "--scene", "hello", "-i", "250", "-q", "x"])
            .unwrap();
        let parsed = overrides(&matches).unwrap();

        assert_eq!(parsed.scene, Some(Scene::Greeting));
        assert_eq!(parsed.refresh_interval_ms, Some(250));
        assert_eq!(parsed.quit_key, Some('x'));
    }

    #[test]
    fn test_zero_interval_rejected_by_parser() {
        assert!(cli()
            .try_get_matches_from(["tickloop", "--interval", "0"])
            .is_err());
    }
}
