use crate::auth::acquire_token;
use crate::cli::{resolve_target, GaleScenarioCli};
use crate::definition::{Cell, SuiteDefinition};
use crate::report::print_suite_summary;
use anyhow::Context;
use chrono::Utc;
use gale_generator::{HttpLoadGenerator, LoadGenerator, LoadSpec};
use gale_report_model::{results_file_name, write_run_records, RunCategory, RunRecord};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

/// Orchestrator states. One `step` performs the work of the current state and
/// moves to the next, so a suite can be driven (and tested) one transition at
/// a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteState {
    Idle,
    SelectCell,
    Executing,
    Recorded,
    Cooldown,
    Done,
}

/// A suite in flight: a flat cell list, an index cursor, and the state
/// machine over them.
///
/// Exactly one generator invocation is ever in flight; each one is awaited to
/// completion before the cursor moves, so measurements are never confounded
/// by co-scheduled load.
pub struct SuiteRun<'a> {
    cells: Vec<Cell>,
    cursor: usize,
    state: SuiteState,
    category: RunCategory,
    base_url: String,
    token: Option<String>,
    cooldown: Duration,
    results_path: Option<PathBuf>,
    records: Vec<RunRecord>,
    pending: Option<gale_report_model::MetricsSnapshot>,
    generator: &'a dyn LoadGenerator,
}

impl<'a> SuiteRun<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        cells: Vec<Cell>,
        category: RunCategory,
        base_url: String,
        token: Option<String>,
        cooldown: Duration,
        results_path: Option<PathBuf>,
        generator: &'a dyn LoadGenerator,
    ) -> Self {
        Self {
            cells,
            cursor: 0,
            state: SuiteState::Idle,
            category,
            base_url,
            token,
            cooldown,
            results_path,
            records: Vec::new(),
            pending: None,
            generator,
        }
    }

    pub fn state(&self) -> SuiteState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == SuiteState::Done
    }

    /// Cells already passed, whether recorded or skipped.
    pub fn completed(&self) -> usize {
        self.cursor.min(self.cells.len())
    }

    pub fn records(&self) -> &[RunRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<RunRecord> {
        self.records
    }

    fn load_spec(&self, cell: &Cell) -> LoadSpec {
        let mut headers = Vec::new();
        if cell.endpoint.body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        if cell.endpoint.requires_auth {
            if let Some(token) = &self.token {
                headers.push(("authorization".to_string(), format!("Token {token}")));
            }
        }

        LoadSpec {
            url: format!("{}{}", self.base_url, cell.endpoint.path),
            method: cell.endpoint.method.clone(),
            headers,
            body: cell.endpoint.body.map(|generate| generate()),
            connections: cell.scenario.connections,
            duration: Duration::from_secs(cell.scenario.duration_s),
            pipelining: None,
        }
    }

    /// After the cursor has advanced: cool down before the next cell, but not
    /// after the last one.
    fn after_cell_state(&self) -> SuiteState {
        if self.cursor >= self.cells.len() {
            SuiteState::SelectCell
        } else {
            SuiteState::Cooldown
        }
    }

    /// Perform one state transition.
    pub async fn step(&mut self) -> anyhow::Result<()> {
        match self.state {
            SuiteState::Idle => {
                self.state = SuiteState::SelectCell;
            }
            SuiteState::SelectCell => {
                if self.cursor >= self.cells.len() {
                    self.state = SuiteState::Done;
                } else {
                    self.state = SuiteState::Executing;
                }
            }
            SuiteState::Executing => {
                let cell = self.cells[self.cursor].clone();

                if cell.endpoint.requires_auth && self.token.is_none() {
                    log::warn!(
                        "Skipping {} at {} connections: endpoint requires auth and no token is held",
                        cell.endpoint.name,
                        cell.scenario.connections
                    );
                    self.cursor += 1;
                    self.state = SuiteState::SelectCell;
                    return Ok(());
                }

                log::info!(
                    "Executing {} against {} ({} connections for {}s)",
                    cell.scenario.name,
                    cell.endpoint.name,
                    cell.scenario.connections,
                    cell.scenario.duration_s
                );

                match self.generator.generate(&self.load_spec(&cell)).await {
                    Ok(snapshot) => {
                        self.pending = Some(snapshot);
                        self.state = SuiteState::Recorded;
                    }
                    Err(e) => {
                        log::error!(
                            "Skipping {} at {} connections after generator failure: {e}",
                            cell.endpoint.name,
                            cell.scenario.connections
                        );
                        self.cursor += 1;
                        self.state = self.after_cell_state();
                    }
                }
            }
            SuiteState::Recorded => {
                if let Some(metrics) = self.pending.take() {
                    let cell = &self.cells[self.cursor];
                    self.records.push(RunRecord {
                        scenario: cell.scenario.name.clone(),
                        endpoint: cell.endpoint.name.clone(),
                        connections: cell.scenario.connections,
                        duration_s: cell.scenario.duration_s,
                        category: self.category,
                        requires_auth: cell.endpoint.requires_auth,
                        metrics,
                    });

                    if let Some(path) = &self.results_path {
                        write_run_records(path, &self.records)
                            .with_context(|| format!("Failed to persist {}", path.display()))?;
                    }
                }
                self.cursor += 1;
                self.state = self.after_cell_state();
            }
            SuiteState::Cooldown => {
                log::debug!("Cooling down for {:?}", self.cooldown);
                tokio::time::sleep(self.cooldown).await;
                self.state = SuiteState::SelectCell;
            }
            SuiteState::Done => {}
        }

        Ok(())
    }
}

/// Drive a suite with an explicit CLI configuration and generator.
///
/// Owns the runtime so suite binaries stay synchronous. Acquires a token only
/// when the matrix needs one; bootstrap failure downgrades auth-required
/// cells to skips instead of failing the suite.
pub fn run_with(
    suite: &SuiteDefinition,
    cli: &GaleScenarioCli,
    generator: &dyn LoadGenerator,
) -> anyhow::Result<Vec<RunRecord>> {
    log::info!("Running suite: {}", suite.name);

    let runtime = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;
    let base_url = resolve_target(cli);

    let mut suite = suite.clone();
    if let Some(duration) = cli.duration {
        for scenario in &mut suite.scenarios {
            scenario.duration_s = duration;
        }
    }
    if let Some(cooldown) = cli.cooldown {
        suite.cooldown = Duration::from_secs(cooldown);
    }

    std::fs::create_dir_all(&cli.results_dir).with_context(|| {
        format!(
            "Failed to create results directory {}",
            cli.results_dir.display()
        )
    })?;
    let results_path = cli
        .results_dir
        .join(results_file_name(suite.category, Utc::now()));

    let token = if suite.requires_auth() {
        let client = reqwest::Client::new();
        match runtime.block_on(acquire_token(&client, &base_url)) {
            Ok(token) => Some(token),
            Err(e) => {
                log::warn!("Auth bootstrap failed, auth-required cells will be skipped: {e}");
                None
            }
        }
    } else {
        None
    };

    let cells = suite.cells();
    let progress = if cli.no_progress {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(cells.len() as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{wide_bar:.cyan/blue}] {pos}/{len} cells",
            )
            .expect("Failed to set progress style")
            .progress_chars("#>-"),
        );
        pb
    };

    let mut suite_run = SuiteRun::new(
        cells,
        suite.category,
        base_url,
        token,
        suite.cooldown,
        Some(results_path),
        generator,
    );

    runtime.block_on(async {
        while !suite_run.is_done() {
            suite_run.step().await?;
            progress.set_position(suite_run.completed() as u64);
        }
        Ok::<_, anyhow::Error>(())
    })?;
    progress.finish_and_clear();

    let records = suite_run.into_records();
    print_suite_summary(&suite.name, &records);

    Ok(records)
}

/// Entry point for suite binaries: parse the CLI, initialise logging, and
/// drive the suite with the bundled HTTP generator.
pub fn run(suite: &SuiteDefinition) -> anyhow::Result<Vec<RunRecord>> {
    let cli = crate::init::init();
    let generator = HttpLoadGenerator::new()?;
    run_with(suite, &cli, &generator)
}
