//! Validate command implementation
//!
//! Checks a request file against the documented bounds without rendering.

use anyhow::{Context, Result};
use colored::Colorize;
use postcraft_spec::{validate_request, GraphicRequest, ValidationResult};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{
    error_codes, print_json, JsonError, JsonWarning, ValidateOutput,
};

/// Run the validate command
///
/// # Returns
/// Exit code: 0 if valid (warnings allowed), 1 if invalid
pub fn run(request_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(request_path)
    } else {
        run_human(request_path)
    }
}

fn run_human(request_path: &str) -> Result<ExitCode> {
    println!("{} {}", "Validating:".cyan().bold(), request_path);

    let request = GraphicRequest::from_json_file(Path::new(request_path))
        .with_context(|| format!("Failed to load request file: {}", request_path))?;
    let result = validate_request(&request);

    print_validation(&result);

    if result.is_ok() {
        println!("{} request is valid", "OK".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{} {} error(s)",
            "FAILED".red().bold(),
            result.errors.len()
        );
        Ok(ExitCode::from(1))
    }
}

fn run_json(request_path: &str) -> Result<ExitCode> {
    let output = match GraphicRequest::from_json_file(Path::new(request_path)) {
        Ok(request) => validation_output(&validate_request(&request)),
        Err(e) => ValidateOutput {
            success: false,
            errors: vec![JsonError::new(error_codes::INPUT, e.to_string())],
            warnings: Vec::new(),
        },
    };
    print_json(&output)?;
    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Convert a validation result to its JSON form.
pub fn validation_output(result: &ValidationResult) -> ValidateOutput {
    ValidateOutput {
        success: result.is_ok(),
        errors: result.errors.iter().map(JsonError::from).collect(),
        warnings: result.warnings.iter().map(JsonWarning::from).collect(),
    }
}

/// Print errors and warnings in human-readable form.
pub fn print_validation(result: &ValidationResult) {
    for error in &result.errors {
        println!("  {} {}", "x".red(), error);
    }
    for warning in &result.warnings {
        println!("  {} {}", "!".yellow(), warning);
    }
}
