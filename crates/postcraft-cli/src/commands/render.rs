//! Render command implementation
//!
//! Builds a request from a JSON file and/or flags, renders it and writes a
//! PNG file.

use anyhow::{Context, Result};
use colored::Colorize;
use postcraft_backend_graphic::{
    ComposerConfig, ContentProvider, GraphicComposer, PngConfig, SourceSelector,
};
use postcraft_spec::{
    validate_request, BackendError, BackgroundMode, GraphicRequest, TemplateStyle,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use super::json_output::{
    error_codes, print_json, JsonError, JsonWarning, RenderOutput, RenderResult,
};
use super::validate::print_validation;

/// Phone number used when none is given.
pub const DEFAULT_PHONE: &str = "(555) 123-4567";

/// Inputs for the render command.
#[derive(Debug, Clone, Default)]
pub struct RenderArgs {
    /// Request JSON file; flags override its fields.
    pub request: Option<PathBuf>,
    pub category: Option<String>,
    pub style: Option<String>,
    pub headline: Option<String>,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub hashtags: Vec<String>,
    pub background: Option<String>,
    pub generate_background: bool,
    /// ComposerConfig JSON file.
    pub config: Option<PathBuf>,
    /// Forces a seeded background pick.
    pub seed: Option<u32>,
    pub out: Option<PathBuf>,
    pub json: bool,
}

/// Headline used when none is given.
pub fn fallback_headline(category: &str) -> String {
    format!("Professional {} Services", category)
}

/// Description used when none is given.
pub fn fallback_description(category: &str) -> String {
    format!(
        "Expert {} solutions for your home or business. Quality work guaranteed! Contact us today.",
        category
    )
}

/// Default output path for a category.
pub fn default_output_path(category: &str) -> PathBuf {
    PathBuf::from("output").join(format!("{}_post.png", category))
}

/// Merge the request file (if any) with the flags.
pub fn build_request(args: &RenderArgs) -> Result<GraphicRequest> {
    let mut request = match &args.request {
        Some(path) => GraphicRequest::from_json_file(path)
            .with_context(|| format!("Failed to load request file: {}", path.display()))?,
        None => GraphicRequest::new(
            "Plumbing",
            TemplateStyle::Modern,
            String::new(),
            String::new(),
            DEFAULT_PHONE,
        ),
    };

    if let Some(category) = &args.category {
        request.category = category.clone();
    }
    if let Some(style) = &args.style {
        request.template_style = TemplateStyle::from_name(style);
    }
    if let Some(headline) = &args.headline {
        request.headline = headline.clone();
    }
    if let Some(description) = &args.description {
        request.description = description.clone();
    }
    if let Some(phone) = &args.phone {
        request.phone_number = phone.clone();
    }
    if !args.hashtags.is_empty() {
        request.hashtags = args.hashtags.clone();
    }
    if let Some(background) = &args.background {
        request.background = match background.as_str() {
            "photo" => BackgroundMode::Photo,
            _ => BackgroundMode::Flat,
        };
    }
    if args.generate_background {
        request.generate_background = true;
    }

    if request.headline.trim().is_empty() {
        request.headline = fallback_headline(&request.category);
    }
    if request.description.trim().is_empty() {
        request.description = fallback_description(&request.category);
    }

    Ok(request)
}

/// Load the composer config and apply `--seed`.
pub fn load_config(path: Option<&Path>, seed: Option<u32>) -> Result<ComposerConfig> {
    let mut config = match path {
        Some(path) => ComposerConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => ComposerConfig::default(),
    };
    if let Some(seed) = seed {
        config.selector = SourceSelector::Seeded(seed);
    }
    Ok(config)
}

#[cfg(feature = "remote")]
fn image_provider(config: &ComposerConfig) -> Option<Arc<dyn ContentProvider>> {
    use postcraft_backend_graphic::{HttpImageProvider, DEFAULT_IMAGE_ENDPOINT};

    let token = std::env::var("POSTCRAFT_API_TOKEN").ok()?;
    let endpoint = std::env::var("POSTCRAFT_IMAGE_ENDPOINT")
        .unwrap_or_else(|_| DEFAULT_IMAGE_ENDPOINT.to_string());
    log::debug!("image generation endpoint: {}", endpoint);
    Some(Arc::new(
        HttpImageProvider::new(endpoint, token).with_timeout(config.provider_timeout()),
    ))
}

#[cfg(not(feature = "remote"))]
fn image_provider(_config: &ComposerConfig) -> Option<Arc<dyn ContentProvider>> {
    None
}

/// Run the render command
///
/// # Returns
/// Exit code: 0 on success, 1 if the request is invalid
pub fn run(args: &RenderArgs) -> Result<ExitCode> {
    if args.json {
        run_json(args)
    } else {
        run_human(args)
    }
}

fn composer_for(args: &RenderArgs) -> Result<GraphicComposer> {
    let config = load_config(args.config.as_deref(), args.seed)?;
    let provider = image_provider(&config);
    let composer = GraphicComposer::new(config);
    Ok(match provider {
        Some(provider) => composer.with_provider(provider),
        None => composer,
    })
}

fn run_human(args: &RenderArgs) -> Result<ExitCode> {
    let request = build_request(args)?;
    let out = args
        .out
        .clone()
        .unwrap_or_else(|| default_output_path(&request.category));

    println!(
        "{} {} / {}",
        "Rendering:".cyan().bold(),
        request.category,
        request.template_style
    );

    let validation = validate_request(&request);
    print_validation(&validation);
    if !validation.is_ok() {
        println!("{} request is invalid", "FAILED".red().bold());
        return Ok(ExitCode::from(1));
    }

    let composer = composer_for(args)?;
    let graphic = composer
        .create_graphic(&request)
        .map_err(|e| anyhow::anyhow!("[{}] {}", e.code(), e.message()))?;
    for note in &graphic.notes {
        println!("  {} {}", "i".blue(), note);
    }

    let hash = graphic
        .save_png(&out, &PngConfig::default())
        .with_context(|| format!("Failed to write {}", out.display()))?;

    println!(
        "{} {} ({}x{})",
        "Wrote:".green().bold(),
        out.display(),
        graphic.width(),
        graphic.height()
    );
    println!("{} {}", "Hash:".dimmed(), hash);
    Ok(ExitCode::SUCCESS)
}

fn run_json(args: &RenderArgs) -> Result<ExitCode> {
    let output = render_json(args);
    print_json(&output)?;
    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn failure(code: &str, message: String, warnings: Vec<JsonWarning>) -> RenderOutput {
    RenderOutput {
        success: false,
        errors: vec![JsonError::new(code, message)],
        warnings,
        result: None,
    }
}

fn render_json(args: &RenderArgs) -> RenderOutput {
    let request = match build_request(args) {
        Ok(request) => request,
        Err(e) => return failure(error_codes::INPUT, format!("{:#}", e), Vec::new()),
    };

    let validation = validate_request(&request);
    let warnings: Vec<JsonWarning> = validation.warnings.iter().map(JsonWarning::from).collect();
    if !validation.is_ok() {
        return RenderOutput {
            success: false,
            errors: validation.errors.iter().map(JsonError::from).collect(),
            warnings,
            result: None,
        };
    }

    let composer = match composer_for(args) {
        Ok(composer) => composer,
        Err(e) => return failure(error_codes::INPUT, format!("{:#}", e), warnings),
    };
    let graphic = match composer.create_graphic(&request) {
        Ok(graphic) => graphic,
        Err(e) => return failure(e.code(), e.to_string(), warnings),
    };

    let out = args
        .out
        .clone()
        .unwrap_or_else(|| default_output_path(&request.category));
    let hash = match graphic.save_png(&out, &PngConfig::default()) {
        Ok(hash) => hash,
        Err(e) => return failure(error_codes::OUTPUT, e.to_string(), warnings),
    };

    RenderOutput {
        success: true,
        errors: Vec::new(),
        warnings,
        result: Some(RenderResult {
            category: request.category.clone(),
            style: graphic.style.to_string(),
            width: graphic.width(),
            height: graphic.height(),
            output: out.display().to_string(),
            hash,
            notes: graphic.notes.iter().map(|n| n.to_string()).collect(),
        }),
    }
}
