// src/runner.rs
use std::{
    error::Error, path::PathBuf, thread,
    sync::{ mpsc, Arc, atomic::{ AtomicUsize, Ordering }}
};

use serde::Serialize;

use crate::{
    assemble::parse_game_file,
    catalog::{self, Event},
    config::options::{ExtractOptions, RunOptions},
    error::{GameError, Location, ParseError},
    model::{Diagnostic, GameInfo, ParsedGame},
    progress::Progress,
    store::Sink,
};

/// A game that could not be parsed; nothing of it was committed.
#[derive(Clone, Debug, Serialize)]
pub struct Failure {
    pub file: PathBuf,
    pub error: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct GameDiagnostic {
    pub file: PathBuf,
    #[serde(flatten)]
    pub diagnostic: Diagnostic,
}

/// Summary of what was committed.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RunReport {
    pub events: usize,
    pub games: usize,
    pub failures: Vec<Failure>,
    pub diagnostics: Vec<GameDiagnostic>,
}

/// Discover events under `opts.data_root` and commit every parseable game to
/// `sink`, event by event. Games are parsed in parallel but committed in
/// catalog order, so ids are the same on every run.
pub fn run(
    opts: &RunOptions,
    sink: &mut dyn Sink,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunReport, Box<dyn Error>> {
    let events = catalog::discover(&opts.data_root, opts.event.as_deref())?;
    if events.is_empty() {
        logw!("No events under {}", opts.data_root.display());
    }

    let mut report = RunReport::default();
    for event in events {
        let progress = progress.as_deref_mut().map(|p| p as &mut dyn Progress);
        run_event(&event, opts, sink, progress, &mut report);
    }

    logf!(
        "Committed {} game(s) from {} event(s); {} failed",
        report.games,
        report.events,
        report.failures.len()
    );
    Ok(report)
}

fn run_event(
    event: &Event,
    opts: &RunOptions,
    sink: &mut dyn Sink,
    mut progress: Option<&mut dyn Progress>,
    report: &mut RunReport,
) {
    logf!("Processing {} ({} game file(s))", event.name, event.games.len());
    if let Some(p) = progress.as_deref_mut() {
        p.begin(event.games.len());
        p.log(&format!("Processing: {}", event.name));
    }

    let results = parse_games(
        &event.games,
        &opts.extract,
        opts.workers,
        progress.as_deref_mut().map(|p| p as &mut dyn Progress),
    );

    let event_id = sink.begin_event(&event.name);
    let mut dates: Vec<String> = Vec::new();
    for (info, result) in event.games.iter().zip(results) {
        match result {
            Ok(game) => {
                if let Some(d) = &game.header.date {
                    dates.push(d.clone());
                }
                report.diagnostics.extend(game.diagnostics.iter().map(|d| GameDiagnostic {
                    file: info.file.clone(),
                    diagnostic: d.clone(),
                }));
                sink.add_game(event_id, info, &game);
                report.games += 1;
            }
            Err(e) => {
                loge!("{}: {}", info.file.display(), e);
                report.failures.push(Failure { file: info.file.clone(), error: e.to_string() });
            }
        }
    }

    let summary = catalog::event_summary(&event.name, dates.iter().map(String::as_str));
    sink.end_event(event_id, &summary);
    report.events += 1;

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
}

/// Parse `games` on a pool of `workers` threads. Results come back in input
/// order.
pub fn parse_games(
    games: &[GameInfo],
    extract: &ExtractOptions,
    workers: usize,
    mut progress: Option<&mut dyn Progress>,
) -> Vec<Result<ParsedGame, GameError>> {
    type Done = (usize, Result<ParsedGame, GameError>);

    let games_arc = Arc::new(games.to_vec());
    let extract = Arc::new(extract.clone());
    let counter = Arc::new(AtomicUsize::new(0));
    let (res_tx, res_rx) = mpsc::channel::<Done>();

    let workers = workers.min(games.len()).max(1);
    for _ in 0..workers {
        let games = Arc::clone(&games_arc);
        let extract = Arc::clone(&extract);
        let idx = Arc::clone(&counter);
        let tx = res_tx.clone();

        thread::spawn(move || {
            loop {
                let i = idx.fetch_add(1, Ordering::Relaxed);
                if i >= games.len() {
                    break;
                }
                let info = &games[i];
                logd!("Parsing {}", info.file.display());
                let result = parse_game_file(&info.file, &extract)
                    .map_err(|e| e.within(&info.event, &game_label(info)));
                if tx.send((i, result)).is_err() {
                    break;
                }
            }
        });
    }
    drop(res_tx); // main thread is sole receiver now

    let mut slots: Vec<Option<Result<ParsedGame, GameError>>> = (0..games.len()).map(|_| None).collect();
    for (i, result) in res_rx.iter() {
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(i);
        }
        slots[i] = Some(result);
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(i, r)| {
            r.unwrap_or_else(|| {
                Err(GameError::new(Location::default(), ParseError::Abandoned)
                    .within(&games[i].event, &game_label(&games[i])))
            })
        })
        .collect()
}

/* ---------------- helpers ---------------- */

fn game_label(info: &GameInfo) -> String {
    let stem = info
        .file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}/{}", info.session, stem)
}
