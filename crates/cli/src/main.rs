// FILE: crates/cli/src/main.rs

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};

mod commands;

fn build_cli() -> Command {
    Command::new("leadsync")
        .version(env!("CARGO_PKG_VERSION"))
        .author("LeadSync Contributors")
        .about("Keeps a Notion leads database and a Trello board in sync")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Path to the config file (defaults to the user config directory)")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log at debug level")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("run")
                .about("Run one reconciliation pass in both directions")
                .arg(
                    Arg::new("dry-run")
                        .short('n')
                        .long("dry-run")
                        .help("Read both sides but only log the changes")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the run report as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("watch")
                .about("Run reconciliation periodically until interrupted")
                .arg(
                    Arg::new("interval")
                        .short('i')
                        .long("interval")
                        .value_name("SECONDS")
                        .help("Seconds between runs (overrides sync.interval_seconds)")
                        .value_parser(clap::value_parser!(u64).range(10..=86_400)),
                )
                .arg(
                    Arg::new("dry-run")
                        .short('n')
                        .long("dry-run")
                        .help("Read both sides but only log the changes")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("check").about("Validate the configuration and show the status map"))
        .subcommand(
            Command::new("init")
                .about("Write a commented default config file")
                .arg(
                    Arg::new("force")
                        .short('f')
                        .long("force")
                        .help("Overwrite an existing config file")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let matches = build_cli().get_matches();

    let manager = commands::config_manager(matches.get_one::<String>("config").map(String::as_str))?;

    if let Some(("init", sub_matches)) = matches.subcommand() {
        init_logging("info", matches.get_flag("verbose"));
        return commands::init_config(&manager, sub_matches.get_flag("force"));
    }

    let config = manager
        .load_with_env_overrides()
        .with_context(|| format!("Failed to load config from {}", manager.config_path().display()))?;
    init_logging(&config.app.log_level.to_string(), matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("run", sub_matches)) => commands::run_once(
            &config,
            sub_matches.get_flag("dry-run"),
            sub_matches.get_flag("json"),
        ),
        Some(("watch", sub_matches)) => commands::watch(
            &config,
            sub_matches.get_one::<u64>("interval").copied(),
            sub_matches.get_flag("dry-run"),
        ),
        Some(("check", _)) => commands::check_config(&manager, &config),
        _ => {
            build_cli().print_help()?;
            Ok(())
        }
    }
}

fn init_logging(level: &str, verbose: bool) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_run_flags() {
        let matches = build_cli()
            .try_get_matches_from(["leadsync", "--config", "/tmp/x.toml", "run", "--dry-run"])
            .unwrap();
        assert_eq!(
            matches.get_one::<String>("config").map(String::as_str),
            Some("/tmp/x.toml")
        );
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "run");
        assert!(sub.get_flag("dry-run"));
        assert!(!sub.get_flag("json"));
    }

    #[test]
    fn test_watch_interval_range() {
        assert!(build_cli()
            .try_get_matches_from(["leadsync", "watch", "--interval", "5"])
            .is_err());

        let matches = build_cli()
            .try_get_matches_from(["leadsync", "watch", "-i", "60"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(sub.get_one::<u64>("interval"), Some(&60));
    }

    #[test]
    fn test_global_verbose_after_subcommand() {
        let matches = build_cli()
            .try_get_matches_from(["leadsync", "check", "--verbose"])
            .unwrap();
        assert!(matches.get_flag("verbose"));
    }
}
