//! CSV table readers for the archive's four file kinds.
//!
//! Column conventions follow the rig's export format exactly:
//! - `xyz.csv` carries 18 named columns `pt1_X` .. `pt6_Z`; an empty
//!   cell marks a dropped marker sample
//! - `force.csv` is headerless; the first three columns are fore-aft,
//!   lateral and normal, extra columns are ignored
//! - `time.csv` is keyed by `Hop` with `Onset`, `First Touch` and
//!   `Recovery` columns in milliseconds
//! - `data.csv` is the phase metadata table; the sight label for a hop
//!   comes from its "Landing" phase row

use std::collections::HashMap;
use std::path::Path;

use contracts::{
    ContractError, EventTiming, ForceFrame, LandmarkFrame, Point3, SightLabel, LANDMARK_COUNT,
};

/// Coordinate suffixes in on-disk column order.
const AXES: [&str; 3] = ["X", "Y", "Z"];

fn table_error(path: &Path, message: impl Into<String>) -> ContractError {
    ContractError::table_parse(path.display().to_string(), message)
}

/// Read a landmark trajectory table.
///
/// An empty or whitespace-only cell makes the whole point `None` for
/// that frame; a non-empty cell that is not a number is a parse error.
pub fn read_landmarks(path: &Path) -> Result<Vec<LandmarkFrame>, ContractError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| table_error(path, e.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|e| table_error(path, e.to_string()))?
        .clone();

    // Map each pt<i>_<axis> column name to its position once.
    let mut columns = [[0usize; 3]; LANDMARK_COUNT];
    for (point, slots) in columns.iter_mut().enumerate() {
        for (axis, slot) in AXES.iter().zip(slots.iter_mut()) {
            let name = format!("pt{}_{axis}", point + 1);
            *slot = headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| table_error(path, format!("missing column '{name}'")))?;
        }
    }

    let mut frames = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| table_error(path, e.to_string()))?;
        let mut frame = LandmarkFrame::default();

        for (point, slots) in columns.iter().enumerate() {
            let mut coords = [0.0f64; 3];
            let mut present = true;

            for (value, &col) in coords.iter_mut().zip(slots.iter()) {
                let cell = record.get(col).unwrap_or("").trim();
                if cell.is_empty() {
                    present = false;
                    break;
                }
                *value = cell.parse().map_err(|_| {
                    table_error(path, format!("row {row}: bad number '{cell}'"))
                })?;
            }

            frame.points[point] =
                present.then(|| Point3::new(coords[0], coords[1], coords[2]));
        }

        frames.push(frame);
    }

    Ok(frames)
}

/// Read a headerless force-plate table.
pub fn read_force(path: &Path) -> Result<Vec<ForceFrame>, ContractError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| table_error(path, e.to_string()))?;

    let mut frames = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| table_error(path, e.to_string()))?;
        if record.len() < 3 {
            return Err(table_error(
                path,
                format!("row {row}: expected at least 3 columns, got {}", record.len()),
            ));
        }

        let mut axes = [0.0f64; 3];
        for (value, cell) in axes.iter_mut().zip(record.iter().take(3)) {
            *value = cell.trim().parse().map_err(|_| {
                table_error(path, format!("row {row}: bad number '{}'", cell.trim()))
            })?;
        }

        frames.push(ForceFrame::new(axes[0], axes[1], axes[2]));
    }

    Ok(frames)
}

/// Read a subject's timing table into a hop-number map.
pub fn read_timing_table(path: &Path) -> Result<HashMap<u32, EventTiming>, ContractError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| table_error(path, e.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|e| table_error(path, e.to_string()))?
        .clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| table_error(path, format!("missing column '{name}'")))
    };

    let hop_col = column("Hop")?;
    let onset_col = column("Onset")?;
    let touch_col = column("First Touch")?;
    let recovery_col = column("Recovery")?;

    let mut timings = HashMap::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| table_error(path, e.to_string()))?;
        let cell = |col: usize| record.get(col).unwrap_or("").trim().to_string();

        let hop: u32 = cell(hop_col)
            .parse()
            .map_err(|_| table_error(path, format!("row {row}: bad hop number")))?;
        let parse_ms = |col: usize, name: &str| -> Result<f64, ContractError> {
            cell(col).parse().map_err(|_| {
                table_error(path, format!("row {row}: bad '{name}' value"))
            })
        };

        timings.insert(
            hop,
            EventTiming {
                onset_ms: parse_ms(onset_col, "Onset")?,
                first_touch_ms: parse_ms(touch_col, "First Touch")?,
                recovery_ms: parse_ms(recovery_col, "Recovery")?,
            },
        );
    }

    Ok(timings)
}

/// Read the phase metadata table into a (subject, hop) label map.
///
/// Only "Landing" phase rows carry the label; rows with an unparseable
/// hop number are skipped rather than failing the whole table.
pub fn read_sight_labels(
    path: &Path,
) -> Result<HashMap<(String, u32), SightLabel>, ContractError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| table_error(path, e.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|e| table_error(path, e.to_string()))?
        .clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| table_error(path, format!("missing column '{name}'")))
    };

    let id_col = column("ID")?;
    let hop_col = column("Hop")?;
    let phase_col = column("Hop Phase")?;
    let sight_col = column("Sight")?;

    let mut labels = HashMap::new();
    for record in reader.records() {
        let record = record.map_err(|e| table_error(path, e.to_string()))?;
        let cell = |col: usize| record.get(col).unwrap_or("").trim();

        if cell(phase_col) != "Landing" {
            continue;
        }
        let Ok(hop) = cell(hop_col).parse::<u32>() else {
            continue;
        };

        labels.insert(
            (cell(id_col).to_string(), hop),
            SightLabel::parse(cell(sight_col)),
        );
    }

    Ok(labels)
}
