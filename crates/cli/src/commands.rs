// FILE: crates/cli/src/commands.rs

use anyhow::{anyhow, Context, Result};
use console::style;
use leadsync_config::{Config, ConfigManager, HttpConfig, NotionConfig, SyncConfig, TrelloConfig};
use leadsync_connectors::{
    NotionRecordStore, NotionSchema, NotionSettings, StatusKind, TrelloBoardStore, TrelloSettings,
};
use leadsync_core::{ListId, Status};
use leadsync_network::ClientConfig;
use leadsync_resilience::RetryPolicy;
use leadsync_sync_engine::{
    BoardStore, DryRunBoardStore, DryRunRecordStore, PassReport, RecordStore, StatusMap,
    SyncEngine, SyncOptions, SyncReport,
};
use std::path::PathBuf;
use std::time::Duration;

/// Opens the config file given on the command line, or the default one
pub fn config_manager(path: Option<&str>) -> Result<ConfigManager> {
    match path {
        Some(path) => ConfigManager::with_file(PathBuf::from(path))
            .with_context(|| format!("Invalid config path '{}'", path)),
        None => ConfigManager::new().context("Failed to locate the config directory"),
    }
}

/// Write the default config file
pub fn init_config(manager: &ConfigManager, force: bool) -> Result<()> {
    let created = manager
        .initialize(force)
        .context("Failed to write config file")?;

    if created {
        println!(
            "{} Config written to {}",
            style("✓").green().bold(),
            manager.config_path().display()
        );
        println!("  Fill in the [notion], [trello] and [[sync.status_map]] entries, or set them in .env");
    } else {
        println!(
            "Config already exists at {} (use --force to overwrite)",
            manager.config_path().display()
        );
    }
    Ok(())
}

/// Validate the config and print the status map
pub fn check_config(manager: &ConfigManager, config: &Config) -> Result<()> {
    println!("\n{}", style("Configuration").bold().cyan());
    println!("File: {}", manager.config_path().display());

    if let Err(errors) = config.check_runnable() {
        for error in &errors {
            println!("  {} {}", style("✗").red().bold(), error);
        }
        return Err(anyhow!("{} configuration problem(s) found", errors.len()));
    }

    let map = build_status_map(&config.sync)?;
    notion_settings(&config.notion)?;

    println!(
        "Grace window: {}s | Watch interval: {}s",
        config.sync.grace_seconds, config.sync.interval_seconds
    );
    println!("\n{}", style("Status map").bold());
    for (status, list) in map.iter() {
        println!("  {:<20} ↔ {}", status, list);
    }
    println!("\n{} Configuration is valid", style("✓").green().bold());
    Ok(())
}

/// One reconciliation run against the configured stores
pub fn run_once(config: &Config, dry_run: bool, json: bool) -> Result<()> {
    let (records, board) = connect(config)?;

    let result = if dry_run {
        let engine = build_engine(
            DryRunRecordStore::new(records),
            DryRunBoardStore::new(board),
            config,
        )?;
        engine.run()
    } else {
        build_engine(records, board, config)?.run()
    };
    let report = result.context("Sync run failed")?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to encode report")?
        );
    } else {
        print_report(&report, dry_run);
    }
    Ok(())
}

/// Periodic runs until the process is stopped
pub fn watch(config: &Config, interval: Option<u64>, dry_run: bool) -> Result<()> {
    let interval = Duration::from_secs(interval.unwrap_or(config.sync.interval_seconds));
    let (records, board) = connect(config)?;

    println!(
        "{} Watching every {}s{} (Ctrl+C to stop)",
        style("▶").green().bold(),
        interval.as_secs(),
        if dry_run { ", dry run" } else { "" }
    );

    if dry_run {
        let engine = build_engine(
            DryRunRecordStore::new(records),
            DryRunBoardStore::new(board),
            config,
        )?;
        watch_loop(&engine, interval, |_| true);
    } else {
        let engine = build_engine(records, board, config)?;
        watch_loop(&engine, interval, |_| true);
    }
    Ok(())
}

/// Runs `engine` back to back, sleeping `interval` between runs
///
/// A failed run is logged and the loop continues. `keep_going` is asked
/// before every run with the number of runs completed so far.
pub fn watch_loop<R, B, F>(engine: &SyncEngine<R, B>, interval: Duration, mut keep_going: F) -> usize
where
    R: RecordStore,
    B: BoardStore,
    F: FnMut(usize) -> bool,
{
    let mut completed = 0;
    while keep_going(completed) {
        if completed > 0 {
            std::thread::sleep(interval);
        }
        match engine.run() {
            Ok(report) => {
                log::info!("Run {} finished: {}", report.run_id, report);
                if report.has_failures() {
                    log::warn!("Run {} had failures; they will be retried next run", report.run_id);
                }
            }
            Err(e) => log::error!("Sync run failed: {}", e),
        }
        completed += 1;
    }
    completed
}

/// Builds the engine from config around the given stores
pub fn build_engine<R, B>(records: R, board: B, config: &Config) -> Result<SyncEngine<R, B>>
where
    R: RecordStore,
    B: BoardStore,
{
    let map = build_status_map(&config.sync)?;
    let options = SyncOptions::with_grace_seconds(config.sync.grace_seconds);
    Ok(SyncEngine::new(records, board, map, options))
}

/// Converts the configured pairs into the engine's status map
pub fn build_status_map(sync: &SyncConfig) -> Result<StatusMap> {
    let pairs = sync
        .status_map
        .iter()
        .map(|m| (Status::from(m.status.trim()), ListId::from(m.list_id.trim())));
    StatusMap::new(pairs).context("Invalid status map")
}

fn connect(config: &Config) -> Result<(NotionRecordStore, TrelloBoardStore)> {
    if let Err(errors) = config.check_runnable() {
        let details = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("\n  ");
        return Err(anyhow!("Configuration is incomplete:\n  {}", details));
    }

    let http = client_config(&config.http);
    let records = NotionRecordStore::new(notion_settings(&config.notion)?, http.clone())
        .context("Failed to set up Notion connector")?;
    let board = TrelloBoardStore::new(trello_settings(&config.trello), http)
        .context("Failed to set up Trello connector")?;
    Ok((records, board))
}

fn client_config(http: &HttpConfig) -> ClientConfig {
    let policy = RetryPolicy::new(http.max_attempts)
        .with_initial_delay(Duration::from_millis(http.initial_backoff_ms))
        .with_max_delay(Duration::from_millis(http.max_backoff_ms));

    ClientConfig::default()
        .with_timeout(Duration::from_secs(http.timeout_seconds))
        .with_retry_policy(policy)
}

fn notion_settings(notion: &NotionConfig) -> Result<NotionSettings> {
    let status_kind: StatusKind = notion
        .status_kind
        .parse()
        .context("Invalid notion.status_kind")?;

    Ok(NotionSettings {
        token: notion.token.clone(),
        database_id: notion.database_id.clone(),
        api_version: notion.api_version.clone(),
        schema: NotionSchema {
            name_property: notion.name_property.clone(),
            status_property: notion.status_property.clone(),
            status_kind,
            link_property: notion.link_property.clone(),
        },
    })
}

fn trello_settings(trello: &TrelloConfig) -> TrelloSettings {
    TrelloSettings {
        key: trello.key.clone(),
        token: trello.token.clone(),
        board_id: trello.board_id.clone(),
    }
}

fn print_report(report: &SyncReport, dry_run: bool) {
    let title = if dry_run { "Dry run" } else { "Sync run" };
    println!(
        "\n{} {} ({} ms)",
        style(title).bold().cyan(),
        report.run_id,
        report.elapsed().num_milliseconds()
    );
    println!(
        "Records: {} | Board items: {}",
        report.records_seen, report.items_seen
    );
    print_pass("Board → records", &report.board_to_records);
    print_pass("Records → board", &report.records_to_board);

    if report.has_failures() {
        println!(
            "\n{} Some changes failed; see the log. They will be retried on the next run.",
            style("!").yellow().bold()
        );
    } else {
        println!(
            "\n{} {} change(s) {}",
            style("✓").green().bold(),
            report.mutations(),
            if dry_run { "planned" } else { "applied" }
        );
    }
}

fn print_pass(label: &str, pass: &PassReport) {
    println!("\n{}", style(label).bold());
    let rows = [
        ("created", pass.created),
        ("linked", pass.linked),
        ("moved", pass.moved),
        ("status updated", pass.status_updated),
        ("in sync", pass.skipped_in_sync),
        ("kept (other side newer)", pass.skipped_kept),
        ("unclassified", pass.skipped_unclassified),
        ("unmapped", pass.skipped_unmapped),
        ("missing on board", pass.skipped_missing),
        ("ambiguous link", pass.skipped_ambiguous),
        ("failed", pass.failures),
    ];
    for (name, count) in rows.iter().filter(|(_, count)| *count > 0) {
        println!("  {:<24} {}", name, count);
    }
    if pass.mutations() == 0 && pass.failures == 0 {
        println!("  nothing to do ({} examined)", pass.examined);
    }
}
