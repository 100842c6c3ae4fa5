use crate::cli::CommonArgs;
use crate::config::{parse_threshold_list, Settings};
use crate::git::DateSource;
use anyhow::Context;
use chrono::{Local, NaiveDate};
use log::{debug, warn};
use std::path::PathBuf;

use super::intensity::{Shading, ShadingMode, DEFAULT_NORMALIZED_LEVELS};
use super::output::{
    day_output, map_output, output_calendar, output_day, output_json, output_ndjson, output_scan,
    scan_output,
};
use super::ActivityMap;

/// Everything a run needs, resolved from flags and the settings file.
pub struct Session {
    pub root: PathBuf,
    pub source: Box<dyn DateSource>,
    /// Fixed "today" from `--today`; otherwise the local date at each build.
    pub today: Option<NaiveDate>,
    pub shading: Shading,
    pub show_progress: bool,
}

impl Session {
    pub fn prepare(common: &CommonArgs, quiet: bool) -> anyhow::Result<Self> {
        let settings_path = common.config.clone().or_else(Settings::default_path);
        let settings = settings_path
            .as_deref()
            .map(Settings::load_or_default)
            .unwrap_or_default();

        let root = match (&common.root, &settings.local_repo_base) {
            (Some(root), _) => root.clone(),
            (None, Some(stored)) => PathBuf::from(stored),
            (None, None) => anyhow::bail!(
                "No repository folder configured; pass --root <DIR> or run `commitmap config set-root <DIR>`"
            ),
        };

        if common.root.is_some() && !common.no_save && root.is_dir() {
            if let Some(path) = &settings_path {
                match Settings::remember_root(path, &root) {
                    Ok(true) => debug!("remembered {} in {}", root.display(), path.display()),
                    Ok(false) => {}
                    Err(e) => warn!("not saving settings to {}: {e}", path.display()),
                }
            }
        }

        let shading = resolve_shading(common, &settings)?;

        Ok(Self {
            root,
            source: common.source.build(),
            today: common.today,
            shading,
            show_progress: !quiet && !common.no_progress,
        })
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn build_map(&self) -> ActivityMap {
        ActivityMap::build(
            &self.root,
            self.source.as_ref(),
            self.today(),
            self.shading.clone(),
            self.show_progress,
        )
    }
}

fn resolve_shading(common: &CommonArgs, settings: &Settings) -> anyhow::Result<Shading> {
    let mode = common
        .shading
        .or(settings.heatmap_shading)
        .unwrap_or_default();
    match mode {
        ShadingMode::Normalized => Ok(Shading::Normalized {
            levels: DEFAULT_NORMALIZED_LEVELS,
        }),
        ShadingMode::Fixed => {
            let thresholds = match &common.thresholds {
                Some(list) => parse_threshold_list(list).context("Invalid --thresholds")?,
                None => settings
                    .thresholds()
                    .context("Invalid heatmap_thresholds in settings")?,
            };
            Ok(Shading::Fixed(thresholds))
        }
    }
}

pub fn exec_map(common: &CommonArgs, json: bool, ndjson: bool, interactive: bool) -> anyhow::Result<()> {
    let session = Session::prepare(common, json || ndjson || interactive)?;
    let map = session.build_map();

    if interactive {
        return crate::tui::run(map, || session.build_map()).context("Terminal UI failed");
    }

    if json {
        output_json(&map_output(&map))
    } else if ndjson {
        output_ndjson(&map)
    } else {
        output_calendar(&map)
    }
}

pub fn exec_day(common: &CommonArgs, date: NaiveDate, json: bool) -> anyhow::Result<()> {
    let session = Session::prepare(common, json)?;
    let map = session.build_map();
    let drill = super::DrillDown::Day(map.table.breakdown(date));

    if json {
        output_json(&day_output(&drill))
    } else {
        output_day(&drill)
    }
}

pub fn exec_cell(common: &CommonArgs, row: usize, column: usize, json: bool) -> anyhow::Result<()> {
    let session = Session::prepare(common, json)?;
    let map = session.build_map();
    let drill = map.resolve(row, column);

    if json {
        output_json(&day_output(&drill))
    } else {
        output_day(&drill)
    }
}

pub fn exec_scan(common: &CommonArgs, json: bool) -> anyhow::Result<()> {
    let session = Session::prepare(common, json)?;
    let map = session.build_map();

    if json {
        output_json(&scan_output(&map))
    } else {
        output_scan(&map)
    }
}
