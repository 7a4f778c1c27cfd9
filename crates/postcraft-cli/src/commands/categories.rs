//! Categories command implementation
//!
//! Lists the supported business categories with their palettes and stock
//! background paths.

use anyhow::Result;
use colored::Colorize;
use postcraft_backend_graphic::palette::{profiles, CategoryProfile};
use std::process::ExitCode;

use super::json_output::{print_json, CategoryInfo};

/// Run the categories command
pub fn run(json_output: bool) -> Result<ExitCode> {
    let infos: Vec<CategoryInfo> = profiles().iter().map(category_info).collect();

    if json_output {
        print_json(&infos)?;
        return Ok(ExitCode::SUCCESS);
    }

    for info in &infos {
        println!("{}", info.name.cyan().bold());
        println!("  primary   {}", hex(info.primary));
        println!("  secondary {}", hex(info.secondary));
        println!("  accent    {}", hex(info.accent));
        for path in &info.backgrounds {
            println!("  {} {}", "-".dimmed(), path);
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// JSON row for one category profile.
pub fn category_info(profile: &CategoryProfile) -> CategoryInfo {
    CategoryInfo {
        name: profile.category.to_string(),
        primary: profile.palette.primary,
        secondary: profile.palette.secondary,
        accent: profile.palette.accent,
        backgrounds: profile.backgrounds.iter().map(|p| p.to_string()).collect(),
    }
}

fn hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_category_info_rows() {
        let infos: Vec<CategoryInfo> = profiles().iter().map(category_info).collect();
        let names: Vec<&str> = infos.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Plumbing", "Cleaning", "Landscaping", "HVAC", "Electrical"]
        );
        assert_eq!(infos[3].primary, [180, 30, 30]);
        assert_eq!(infos[3].backgrounds[0], "backgrounds/hvac_1.jpg");
    }

    #[test]
    fn test_hex() {
        assert_eq!(hex([255, 140, 0]), "#ff8c00");
    }
}
