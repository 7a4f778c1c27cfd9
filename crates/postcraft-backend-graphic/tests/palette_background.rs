//! Palette resolution and background provider properties.

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use postcraft_backend_graphic::palette::{profiles, resolve, ColorPalette, GRADIENT_NEUTRAL};
use postcraft_backend_graphic::{BackgroundProvider, BackgroundSource, SourceSelector};
use postcraft_spec::{BackgroundMode, Category};
use pretty_assertions::assert_eq;

#[test]
fn documented_palettes() {
    let expected = [
        ("Plumbing", [0, 90, 180], [0, 51, 102], [255, 140, 0]),
        ("Cleaning", [30, 110, 40], [200, 230, 201], [255, 193, 7]),
        ("Landscaping", [40, 120, 45], [139, 90, 43], [255, 167, 38]),
        ("HVAC", [180, 30, 30], [30, 60, 120], [66, 133, 244]),
        ("Electrical", [110, 25, 140], [40, 40, 40], [255, 214, 0]),
    ];
    for (name, primary, secondary, accent) in expected {
        assert_eq!(
            resolve(name),
            ColorPalette {
                primary,
                secondary,
                accent
            },
            "{}",
            name
        );
    }
}

#[test]
fn unrecognized_names_get_plumbing() {
    let plumbing = resolve("Plumbing");
    for name in ["UnknownType", "", "PLUMBING", "Hvac", " Cleaning", "Roofing", "🚰"] {
        assert_eq!(resolve(name), plumbing, "{:?}", name);
    }
}

#[test]
fn profiles_follow_category_order() {
    let order: Vec<Category> = profiles().iter().map(|p| p.category).collect();
    assert_eq!(order, Category::ALL.to_vec());
}

#[test]
fn background_matches_canvas_size_for_every_source() {
    let dir = tempfile::tempdir().unwrap();
    let backgrounds = dir.path().join("backgrounds");
    std::fs::create_dir_all(&backgrounds).unwrap();

    // Tall, wide and tiny sources.
    let fixtures = [(90, 400), (1920, 1080), (1, 1)];
    for (i, (w, h)) in fixtures.iter().enumerate() {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::from_pixel(*w, *h, Rgb([12, 34, 56])))
            .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        std::fs::write(backgrounds.join(format!("landscaping_{}.jpg", i + 1)), bytes).unwrap();
    }

    for index in 0..3 {
        let provider = BackgroundProvider::new(dir.path(), SourceSelector::Fixed(index));
        for size in [(800, 800), (1080, 1080), (333, 77)] {
            let resolved = provider
                .background("Landscaping", BackgroundMode::Photo, size)
                .unwrap();
            assert!(resolved.photo);
            assert_eq!((resolved.canvas.width, resolved.canvas.height), size);
        }
    }
}

#[test]
fn gradient_rows_hit_primary_and_neutral() {
    let provider = BackgroundProvider::default();
    for category in Category::ALL {
        let resolved = provider
            .background(category.as_str(), BackgroundMode::Flat, (800, 800))
            .unwrap();
        let primary = resolve(category.as_str()).primary;
        for x in [0, 399, 799] {
            assert_eq!(resolved.canvas.get(x, 0).to_rgb8(), primary);
            assert_eq!(resolved.canvas.get(x, 799).to_rgb8(), GRADIENT_NEUTRAL);
        }
    }
}

#[test]
fn gradient_matches_per_row_formula() {
    let provider = BackgroundProvider::default();
    let canvas = provider.fallback("HVAC", (4, 1080)).unwrap();
    let primary = [180.0, 30.0, 30.0];
    for y in (0..1080).step_by(37) {
        let t = y as f64 / 1079.0;
        let got = canvas.get(2, y).to_rgb8();
        for c in 0..3 {
            let want = (primary[c] * (1.0 - t) + 230.0 * t).round();
            assert!((got[c] as f64 - want).abs() <= 1.0, "row {} channel {}", y, c);
        }
    }
}

#[test]
fn missing_asset_yields_gradient_of_correct_size() {
    let provider = BackgroundProvider::new("/definitely/not/here", SourceSelector::Random);
    let resolved = provider
        .background("Electrical", BackgroundMode::Photo, (1080, 1080))
        .unwrap();
    assert!(!resolved.photo);
    assert!(resolved.fallback_reason.is_some());
    assert_eq!((resolved.canvas.width, resolved.canvas.height), (1080, 1080));
    assert_eq!(resolved.canvas.get(0, 0).to_rgb8(), [110, 25, 140]);
}

#[test]
fn seeded_selection_is_stable_per_category() {
    let provider = BackgroundProvider::new("assets", SourceSelector::Seeded(2024));
    for category in Category::ALL {
        let first = provider.select_source(category.as_str(), BackgroundMode::Photo);
        assert!(matches!(first, BackgroundSource::CachedImage(_)));
        for _ in 0..5 {
            assert_eq!(
                provider.select_source(category.as_str(), BackgroundMode::Photo),
                first
            );
        }
    }
}
