//! End-to-end composer tests.

use std::sync::Arc;
use std::time::Duration;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use postcraft_backend_graphic::{
    ComposerConfig, ContentProvider, FontLibrary, FontRole, GraphicComposer, PngConfig, ProviderError,
    RenderNote, SourceSelector, StaticProvider, TextPrompt,
};
use postcraft_spec::{
    BackgroundMode, Category, GraphicRequest, TemplateStyle, MAX_DESCRIPTION_CHARS,
    MAX_HEADLINE_CHARS,
};
use pretty_assertions::assert_eq;

fn composer(asset_root: &std::path::Path) -> GraphicComposer {
    GraphicComposer::new(ComposerConfig::deterministic(
        asset_root,
        SourceSelector::Fixed(0),
    ))
}

fn offline_composer() -> GraphicComposer {
    composer(std::path::Path::new("/nonexistent/postcraft-assets"))
}

fn emergency_plumbing(style: TemplateStyle) -> GraphicRequest {
    GraphicRequest::new(
        "Plumbing",
        style,
        "Emergency Plumbing",
        "Fast & reliable service",
        "(555) 123-4567",
    )
}

fn encode(img: RgbImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut bytes), format)
        .unwrap();
    bytes
}

#[test]
fn scenario_plumbing_modern_renders_800() {
    let graphic = offline_composer()
        .create_graphic(&emergency_plumbing(TemplateStyle::Modern))
        .unwrap();
    assert_eq!((graphic.width(), graphic.height()), (800, 800));
    assert_eq!(graphic.style, TemplateStyle::Modern);
    assert!(graphic.notes.is_empty());
    // Top row is the primary color, untouched by text.
    assert_eq!(graphic.canvas.get(0, 0).to_rgb8(), [0, 90, 180]);
}

#[test]
fn scenario_unknown_category_uses_plumbing_palette() {
    let mut request = emergency_plumbing(TemplateStyle::Modern);
    request.category = "UnknownType".to_string();
    let graphic = offline_composer().create_graphic(&request).unwrap();
    assert_eq!(graphic.palette, postcraft_backend_graphic::resolve_palette("Plumbing"));
    assert_eq!(graphic.canvas.get(0, 0).to_rgb8(), [0, 90, 180]);
}

#[test]
fn scenario_missing_photo_asset_falls_back_to_gradient() {
    let dir = tempfile::tempdir().unwrap();
    let request = emergency_plumbing(TemplateStyle::Bold).with_background(BackgroundMode::Photo);
    let graphic = composer(dir.path()).create_graphic(&request).unwrap();
    assert_eq!((graphic.width(), graphic.height()), (1080, 1080));
    assert_eq!(graphic.canvas.get(0, 0).to_rgb8(), [0, 90, 180]);
    // Missing stock assets are a silent fallback.
    assert!(graphic.notes.is_empty());
}

#[test]
fn scenario_huge_description_still_renders() {
    let description = "lorem ipsum dolor sit amet ".repeat(80);
    assert!(description.len() >= 2000);
    for style in TemplateStyle::ALL {
        let mut request = emergency_plumbing(style);
        request.description = description.clone();
        let graphic = offline_composer().create_graphic(&request).unwrap();
        assert_eq!(
            (graphic.width(), graphic.height()),
            postcraft_backend_graphic::template_for(style).canvas_size()
        );
    }
}

#[test]
fn every_category_and_style_renders() {
    let composer = offline_composer();
    for category in Category::ALL {
        for style in TemplateStyle::ALL {
            let request = GraphicRequest::new(
                category.as_str(),
                style,
                format!("Professional {} Services", category),
                format!(
                    "Expert {} solutions for your home or business. Quality work guaranteed! Contact us today.",
                    category
                ),
                "(555) 123-4567",
            )
            .with_hashtags(["local", "#trusted"]);
            let graphic = composer.create_graphic(&request).unwrap();
            assert_eq!(graphic.palette, postcraft_backend_graphic::resolve_palette(category.as_str()));
        }
    }
}

#[test]
fn inputs_at_documented_bounds_render() {
    let mut request = emergency_plumbing(TemplateStyle::Minimal);
    request.headline = "H".repeat(MAX_HEADLINE_CHARS);
    request.description = "word ".repeat(MAX_DESCRIPTION_CHARS / 5);
    request.phone_number = "☎ +1 (555) 123-4567 ext. 99".to_string();
    assert!(offline_composer().create_graphic(&request).is_ok());

    let mut empty = emergency_plumbing(TemplateStyle::Bold);
    empty.headline.clear();
    empty.description.clear();
    empty.phone_number.clear();
    assert!(offline_composer().create_graphic(&empty).is_ok());
}

#[test]
fn identical_requests_are_pixel_identical() {
    let dir = tempfile::tempdir().unwrap();
    let backgrounds = dir.path().join("backgrounds");
    std::fs::create_dir_all(&backgrounds).unwrap();
    for n in 1..=3 {
        let img = RgbImage::from_fn(320, 200, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, n * 60]));
        std::fs::write(
            backgrounds.join(format!("hvac_{}.jpg", n)),
            encode(img, ImageFormat::Jpeg),
        )
        .unwrap();
    }

    for selector in [SourceSelector::Fixed(2), SourceSelector::Seeded(99)] {
        let composer = GraphicComposer::new(ComposerConfig::deterministic(dir.path(), selector));
        let request = GraphicRequest::new(
            "HVAC",
            TemplateStyle::Modern,
            "Stay Cool This Summer",
            "AC tune-ups from $79",
            "555-0142",
        )
        .with_background(BackgroundMode::Photo);

        let first = composer.create_graphic(&request).unwrap();
        let second = composer.create_graphic(&request).unwrap();
        assert_eq!(first.canvas, second.canvas);

        let (_, hash1) = first.to_png(&PngConfig::default()).unwrap();
        let (_, hash2) = second.to_png(&PngConfig::default()).unwrap();
        assert_eq!(hash1, hash2);
    }
}

#[test]
fn photo_background_is_cover_fitted() {
    let dir = tempfile::tempdir().unwrap();
    let backgrounds = dir.path().join("backgrounds");
    std::fs::create_dir_all(&backgrounds).unwrap();
    let img = RgbImage::from_pixel(640, 360, Rgb([20, 160, 90]));
    std::fs::write(backgrounds.join("cleaning_1.jpg"), encode(img, ImageFormat::Png)).unwrap();

    let request = GraphicRequest::new("Cleaning", TemplateStyle::Modern, "Spotless", "", "555")
        .with_background(BackgroundMode::Photo);
    let graphic = composer(dir.path()).create_graphic(&request).unwrap();
    assert_eq!((graphic.width(), graphic.height()), (800, 800));
    assert_eq!(graphic.canvas.get(0, 0).to_rgb8(), [20, 160, 90]);
    assert!(graphic.notes.is_empty());
}

#[test]
fn generated_background_is_used() {
    let bytes = encode(RgbImage::from_pixel(64, 64, Rgb([250, 240, 10])), ImageFormat::Png);
    let provider: Arc<dyn ContentProvider> = Arc::new(StaticProvider::unavailable().with_image(bytes));
    let request = emergency_plumbing(TemplateStyle::Modern).with_generated_background(true);

    let graphic = offline_composer()
        .with_provider(provider)
        .create_graphic(&request)
        .unwrap();
    assert!(graphic.notes.is_empty());
    assert_eq!(graphic.canvas.get(0, 0).to_rgb8(), [250, 240, 10]);
}

#[test]
fn missing_provider_is_reported_and_falls_back() {
    let request = emergency_plumbing(TemplateStyle::Minimal).with_generated_background(true);
    let graphic = offline_composer().create_graphic(&request).unwrap();
    assert_eq!(graphic.notes.len(), 1);
    assert!(matches!(
        graphic.notes[0],
        RenderNote::GeneratedBackgroundUnavailable(_)
    ));
}

#[test]
fn provider_timeout_is_reported_and_falls_back() {
    let provider: Arc<dyn ContentProvider> = Arc::new(
        StaticProvider::unavailable()
            .with_image(vec![1, 2, 3])
            .with_delay(Duration::from_secs(3)),
    );
    let mut config = ComposerConfig::deterministic("/nonexistent", SourceSelector::Fixed(0));
    config.provider_timeout_ms = 50;
    let composer = GraphicComposer::new(config).with_provider(provider);

    let request = emergency_plumbing(TemplateStyle::Modern).with_generated_background(true);
    let start = std::time::Instant::now();
    let graphic = composer.create_graphic(&request).unwrap();
    assert!(start.elapsed() < Duration::from_secs(2));
    assert_eq!(
        graphic.notes,
        vec![RenderNote::GeneratedBackgroundUnavailable(
            ProviderError::Timeout(Duration::from_millis(50)).to_string()
        )]
    );
    assert_eq!(graphic.canvas.get(0, 0).to_rgb8(), [0, 90, 180]);
}

#[test]
fn failed_image_generation_is_reported() {
    let provider: Arc<dyn ContentProvider> = Arc::new(
        StaticProvider::unavailable()
            .with_image_error(ProviderError::Failed("quota exceeded".to_string())),
    );
    let request = emergency_plumbing(TemplateStyle::Modern).with_generated_background(true);
    let graphic = offline_composer()
        .with_provider(provider)
        .create_graphic(&request)
        .unwrap();
    assert_eq!(
        graphic.notes,
        vec![RenderNote::GeneratedBackgroundUnavailable(
            "Content provider failed: quota exceeded".to_string()
        )]
    );
    assert_eq!(graphic.canvas.get(0, 0).to_rgb8(), [0, 90, 180]);
}

#[test]
fn undecodable_generated_image_is_reported() {
    let provider: Arc<dyn ContentProvider> =
        Arc::new(StaticProvider::unavailable().with_image(b"<html>rate limited</html>".to_vec()));
    let request = emergency_plumbing(TemplateStyle::Bold).with_generated_background(true);
    let graphic = offline_composer()
        .with_provider(provider)
        .create_graphic(&request)
        .unwrap();
    assert!(matches!(graphic.notes[..], [RenderNote::BackgroundFallback(_)]));
}

#[test]
fn suggest_text_goes_through_provider() {
    let composer = offline_composer();
    assert!(matches!(
        composer.suggest_text(&TextPrompt::new("Plumbing")),
        Err(ProviderError::Unavailable(_))
    ));

    let text = postcraft_backend_graphic::GeneratedText {
        headline: "Leak Detection".to_string(),
        description: "Same-day visits".to_string(),
        hashtags: vec!["plumbing".to_string()],
    };
    let provider: Arc<dyn ContentProvider> = Arc::new(StaticProvider::unavailable().with_text(text.clone()));
    let composer = composer.with_provider(provider);
    assert_eq!(composer.suggest_text(&TextPrompt::new("Plumbing")).unwrap(), text);
}

#[test]
fn concurrent_renders_share_one_composer() {
    let composer = Arc::new(offline_composer().with_fonts(FontLibrary::builtin()));
    let handles: Vec<_> = TemplateStyle::ALL
        .into_iter()
        .map(|style| {
            let composer = Arc::clone(&composer);
            std::thread::spawn(move || {
                composer
                    .create_graphic(&emergency_plumbing(style))
                    .map(|g| (g.width(), g.height()))
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap().is_ok());
    }
}

#[test]
fn saved_png_decodes_to_canvas() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("output").join("Plumbing_post.png");
    let graphic = offline_composer()
        .create_graphic(&emergency_plumbing(TemplateStyle::Modern))
        .unwrap();
    let hash = graphic.save_png(&path, &PngConfig::default()).unwrap();
    assert_eq!(hash.len(), 64);

    let decoded = image::open(&path).unwrap().to_rgb8();
    assert_eq!(decoded, graphic.to_rgb_image());
}

#[test]
fn free_function_uses_default_composer() {
    let graphic =
        postcraft_backend_graphic::create_graphic(&emergency_plumbing(TemplateStyle::Bold)).unwrap();
    assert_eq!((graphic.width(), graphic.height()), (1080, 1080));
}

#[test]
fn system_fonts_render_long_text_in_every_style() {
    let system = FontLibrary::load(&ComposerConfig::default().font_dirs);
    if FontRole::ALL.iter().all(|role| system.face(*role).is_builtin()) {
        eprintln!("no system font found, skipping");
        return;
    }
    let vector = offline_composer().with_fonts(system);
    let builtin = offline_composer().with_fonts(FontLibrary::builtin());
    for style in TemplateStyle::ALL {
        let mut request = emergency_plumbing(style).with_hashtags(["plumber", "local"]);
        request.headline = "Same Day Drain Cleaning ".repeat(8).trim_end().to_string();
        request.description = "Licensed crew, upfront pricing, no mess left behind. "
            .repeat(10)
            .chars()
            .take(MAX_DESCRIPTION_CHARS)
            .collect();

        let drawn = vector.create_graphic(&request).unwrap();
        assert_eq!(
            (drawn.width(), drawn.height()),
            postcraft_backend_graphic::template_for(style).canvas_size()
        );
        assert_ne!(drawn.canvas, builtin.create_graphic(&request).unwrap().canvas);
    }
}
