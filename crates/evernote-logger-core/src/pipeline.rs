//! Daily log pipeline: search, merge, link, group, render, publish.

use chrono::TimeZone;
use log::info;

use crate::config::LoggerConfig;
use crate::error::{LoggerError, Result};
use crate::group::{group_by_notebook, single_group, NotebookGroup};
use crate::link::attach_view_links;
use crate::merge::merge_notes;
use crate::model::{CreatedNote, Notebook};
use crate::render::{publish_title, LogDocument};
use crate::service::NoteService;
use crate::window::DayWindow;

/// Command line switches that shape one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogOptions {
    /// Show `YYYY/MM/DD HH:MM` instead of `HH:MM`
    pub full_timestamp: bool,
    /// Emit one `<h2>` section per notebook
    pub group_by_notebook: bool,
    /// Render only, never create a note
    pub dry_run: bool,
}

/// Everything produced for one day
#[derive(Debug, Clone)]
pub struct DailyLog {
    pub window: DayWindow,
    pub day_label: String,
    pub groups: Vec<NotebookGroup>,
    /// ENML body
    pub document: String,
    pub title: String,
}

impl DailyLog {
    pub fn note_count(&self) -> usize {
        self.groups.iter().map(|g| g.notes.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Publication {
    DryRun,
    Created(CreatedNote),
}

/// Resolve the notebook the log is published into.
pub fn resolve_target_notebook<S: NoteService>(
    service: &S,
    config: &LoggerConfig,
) -> Result<Notebook> {
    service
        .get_notebook_by_name(&config.notebook)
        .map_err(LoggerError::service)?
        .ok_or_else(|| LoggerError::NotebookNotFound(config.notebook.clone()))
}

/// Query, merge and render the log for `window` without writing anything.
pub fn build_daily_log<S: NoteService, Tz: TimeZone>(
    service: &S,
    config: &LoggerConfig,
    window: &DayWindow,
    options: &LogOptions,
    tz: &Tz,
) -> Result<DailyLog> {
    let day_label = config.day_label(window)?.to_string();

    // Search from the previous day; merge_notes re-checks the local date.
    let since = window.previous_day();
    let created = service
        .search_created_since(since)
        .map_err(LoggerError::service)?;
    let updated = service
        .search_updated_since(since)
        .map_err(LoggerError::service)?;

    let mut notes = merge_notes(window, tz, &created, &updated)?;
    attach_view_links(service.session(), &mut notes)?;

    let groups = if options.group_by_notebook {
        let notebooks = service.list_notebooks().map_err(LoggerError::service)?;
        group_by_notebook(notes, &notebooks)?
    } else {
        single_group(notes)
    };

    let document = LogDocument {
        window,
        day_label: &day_label,
        headlines: &config.headlines,
        groups: &groups,
        full_timestamp: options.full_timestamp,
    }
    .render();

    Ok(DailyLog {
        window: window.clone(),
        day_label,
        groups,
        document,
        title: publish_title(window),
    })
}

/// Create the log note unless this is a dry run.
pub fn publish<S: NoteService>(
    service: &S,
    target: &Notebook,
    log: &DailyLog,
    dry_run: bool,
) -> Result<Publication> {
    if dry_run {
        info!("Dry run, skipping note creation");
        return Ok(Publication::DryRun);
    }

    let created = service
        .create_note(&log.title, &log.document, &target.guid)
        .map_err(LoggerError::service)?;
    info!("Created note [{}] ({})", created.title, created.guid);
    Ok(Publication::Created(created))
}

/// Full run against an already connected service.
pub fn run<S: NoteService, Tz: TimeZone>(
    service: &S,
    config: &LoggerConfig,
    window: &DayWindow,
    options: &LogOptions,
    tz: &Tz,
) -> Result<(DailyLog, Publication)> {
    let target = resolve_target_notebook(service, config)?;
    info!("Target notebook [{}] ({})", target.name, target.guid);

    let log = build_daily_log(service, config, window, options, tz)?;
    info!("{} notes for {}", log.note_count(), window.ymd());

    let publication = publish(service, &target, &log, options.dry_run)?;
    Ok((log, publication))
}
