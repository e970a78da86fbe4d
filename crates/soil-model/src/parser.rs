//! Parser for soil profile files.
//!
//! Format, one profile per line:
//!
//! ```text
//! # comment
//! soilType,moisture,organicContent,ph   <- optional header
//! loam,70,4,6.5
//! clay, 95, 1.2, 6.0
//! ```
//!
//! Blank lines and `#` comments are skipped. Fields are trimmed before
//! parsing, but the soil type is otherwise kept verbatim so unknown or
//! oddly-cased values reach the engine exactly as written.

use crate::error::{Result, SoilModelError};
use crate::types::SoilProfile;
use rayon::prelude::*;
use std::path::Path;

const FIELD_COUNT: usize = 4;
const HEADER_FIRST_FIELD: &str = "soilType";

/// Read and parse a profile file
pub fn parse_profiles(path: &Path) -> Result<Vec<SoilProfile>> {
    let content = std::fs::read_to_string(path)?;
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    parse_profiles_str(&content, &file)
}

/// Parse profile lines from an in-memory string.
///
/// Lines are parsed in parallel; the result keeps file order. On failure the
/// error for the earliest bad line is returned.
pub fn parse_profiles_str(content: &str, file: &str) -> Result<Vec<SoilProfile>> {
    let lines: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .collect();

    // Only the first content line may be a header
    let skip = match lines.first() {
        Some((_, line)) if is_header(line) => 1,
        _ => 0,
    };

    let parsed: Vec<Result<SoilProfile>> = lines[skip..]
        .par_iter()
        .map(|&(line_no, line)| parse_profile_line(line, line_no, file))
        .collect();

    parsed.into_iter().collect()
}

/// A header names `soilType` first and has a non-numeric second field, so a
/// data row for a soil literally called `soilType` is still parsed.
fn is_header(line: &str) -> bool {
    let mut fields = line.split(',').map(str::trim);
    fields.next() == Some(HEADER_FIRST_FIELD)
        && fields.next().is_some_and(|field| field.parse::<f64>().is_err())
}

/// Parse one `soilType,moisture,organicContent,ph` line
pub fn parse_profile_line(line: &str, line_no: usize, file: &str) -> Result<SoilProfile> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() != FIELD_COUNT {
        return Err(SoilModelError::FieldCountMismatch {
            expected: FIELD_COUNT,
            found: parts.len(),
            line: line_no,
        });
    }

    if parts[0].is_empty() {
        return Err(SoilModelError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: "Missing soilType".to_string(),
        });
    }

    let moisture = parse_number(parts[1], "moisture", line_no, file)?;
    let organic_content = parse_number(parts[2], "organicContent", line_no, file)?;
    let ph = parse_number(parts[3], "ph", line_no, file)?;

    Ok(SoilProfile::new(parts[0], moisture, organic_content, ph))
}

fn parse_number(value: &str, field: &str, line_no: usize, file: &str) -> Result<f64> {
    value.parse::<f64>().map_err(|_| SoilModelError::ParseError {
        file: file.to_string(),
        line: line_no,
        reason: format!("Invalid {}: {:?}", field, value),
    })
}
