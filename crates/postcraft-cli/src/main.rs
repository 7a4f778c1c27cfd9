//! Postcraft CLI - Command-line interface for social-media graphic generation
//!
//! This binary renders category-branded graphics, validates request files,
//! and lists the supported categories and the weekly content calendar.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use postcraft_cli::commands;
use postcraft_cli::commands::render::RenderArgs;
use postcraft_cli::logging;

/// Postcraft - Social Media Graphics for Local Services
#[derive(Parser)]
#[command(name = "postcraft")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a graphic to a PNG file
    Render {
        /// Request JSON file; flags below override its fields
        #[arg(short, long)]
        request: Option<PathBuf>,

        /// Business category (Plumbing, Cleaning, Landscaping, HVAC, Electrical)
        #[arg(short, long)]
        category: Option<String>,

        /// Template style (modern, minimal, bold)
        #[arg(short, long)]
        style: Option<String>,

        /// Headline text
        #[arg(long)]
        headline: Option<String>,

        /// Description text
        #[arg(long)]
        description: Option<String>,

        /// Phone number for the call-to-action
        #[arg(long)]
        phone: Option<String>,

        /// Hashtag (repeatable)
        #[arg(long = "hashtag")]
        hashtags: Vec<String>,

        /// Background mode
        #[arg(long, value_parser = ["flat", "photo"])]
        background: Option<String>,

        /// Ask the image-generation service for the background
        #[arg(long)]
        generate_background: bool,

        /// Composer config JSON file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Seed for background selection
        #[arg(long)]
        seed: Option<u32>,

        /// Output PNG path (default: output/<category>_post.png)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Validate a request file without rendering
    Validate {
        /// Path to the request JSON file
        #[arg(short, long)]
        request: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List categories with their palettes and backgrounds
    Categories {
        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print or export the weekly content-ideas calendar
    Calendar {
        /// Write the calendar JSON to this file
        #[arg(short, long)]
        out: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Render {
            request,
            category,
            style,
            headline,
            description,
            phone,
            hashtags,
            background,
            generate_background,
            config,
            seed,
            out,
            json,
        } => commands::render::run(&RenderArgs {
            request,
            category,
            style,
            headline,
            description,
            phone,
            hashtags,
            background,
            generate_background,
            config,
            seed,
            out,
            json,
        }),
        Commands::Validate { request, json } => commands::validate::run(&request, json),
        Commands::Categories { json } => commands::categories::run(json),
        Commands::Calendar { out, json } => commands::calendar::run(out.as_deref(), json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
