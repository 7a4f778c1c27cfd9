//! Calendar command implementation
//!
//! Prints or writes the weekly content-ideas calendar.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

/// One post idea per weekday, Monday first.
pub const WEEKLY_IDEAS: [&str; 7] = [
    "Monday: Service highlight",
    "Tuesday: Customer testimonial",
    "Wednesday: Educational tip",
    "Thursday: Before/after transformation",
    "Friday: Weekend special offer",
    "Saturday: Team spotlight",
    "Sunday: Industry news",
];

/// The calendar as a pretty-printed JSON array of strings.
pub fn calendar_json() -> Result<String> {
    Ok(serde_json::to_string_pretty(&WEEKLY_IDEAS)?)
}

/// Run the calendar command
///
/// With `out`, the JSON array is written to that file; otherwise the ideas
/// are printed.
pub fn run(out: Option<&str>, json_output: bool) -> Result<ExitCode> {
    let json = calendar_json()?;

    if let Some(out) = out {
        let path = Path::new(out);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(path, &json).with_context(|| format!("Failed to write {}", out))?;
        if !json_output {
            println!("{} {}", "Wrote:".green().bold(), out);
        }
        return Ok(ExitCode::SUCCESS);
    }

    if json_output {
        println!("{}", json);
    } else {
        println!("{}", "Weekly content ideas".cyan().bold());
        for idea in WEEKLY_IDEAS {
            println!("  {} {}", "+".green(), idea);
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_calendar_json_shape() {
        let parsed: Vec<String> = serde_json::from_str(&calendar_json().unwrap()).unwrap();
        assert_eq!(parsed.len(), 7);
        assert_eq!(parsed[0], "Monday: Service highlight");
        assert_eq!(parsed[6], "Sunday: Industry news");
    }

    #[test]
    fn test_run_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("content_calendar.json");
        run(Some(out.to_str().unwrap()), true).unwrap();
        let written = std::fs::read_to_string(&out).unwrap();
        assert_eq!(written, calendar_json().unwrap());
    }
}
