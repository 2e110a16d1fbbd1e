extern crate raster2d;

use raster2d::BlendMode;
use raster2d::Canvas;
use raster2d::CompositingMode;
use raster2d::FillingRule;
use raster2d::Point;
use raster2d::Rgba32;
use raster2d::Rgba8;
use raster2d::Shadow;
use raster2d::Shape;
use raster2d::Transform;

fn full(w: f64, h: f64) -> Shape {
    Shape::rectangle(0.0, 0.0, w, h)
}

fn approx(a: Rgba32, b: Rgba32) -> bool {
    (a.r - b.r).abs() < 1e-6 && (a.g - b.g).abs() < 1e-6 &&
        (a.b - b.b).abs() < 1e-6 && (a.a - b.a).abs() < 1e-6
}

#[test]
fn invalid_dimensions() {
    match Canvas::<Rgba8>::new(0, 10) {
        Err(raster2d::Error::InvalidDimensions { width: 0, height: 10 }) => {},
        other => panic!("unexpected {:?}", other.map(|c| c.width())),
    }
    assert!(Canvas::<Rgba8>::new(10, 0).is_err());
    assert!(Canvas::<Rgba8>::new(std::usize::MAX, 2).is_err());
    let c = Canvas::<Rgba8>::new(3, 2).unwrap();
    assert_eq!((c.width(), c.height()), (3, 2));
    assert_eq!(c.pixels().len(), 6);
    assert_eq!(c.get(3, 0), None);
    assert_eq!(c.coverage(0, 2), None);
}

#[test]
fn source_over_opaque() {
    let mut c = Canvas::<Rgba8>::new(4, 4).unwrap();
    c.clear(Rgba8::white());
    let red = Rgba8::new(255, 0, 0, 255);
    c.fill(&Shape::rectangle(1.0, 1.0, 3.0, 3.0), FillingRule::NonZero, red);
    assert_eq!(c.get(1, 1), Some(red));
    assert_eq!(c.get(2, 2), Some(red));
    assert_eq!(c.get(0, 0), Some(Rgba8::white()));
    assert_eq!(c.get(3, 3), Some(Rgba8::white()));
}

#[test]
fn global_opacity() {
    let mut c = Canvas::<Rgba8>::new(2, 2).unwrap();
    c.clear(Rgba8::white());
    c.set_opacity(0.0);
    c.fill(&full(2.0, 2.0), FillingRule::NonZero, Rgba8::black());
    assert!(c.pixels().iter().all(|&p| p == Rgba8::white()));

    c.set_opacity(0.5);
    c.fill(&full(2.0, 2.0), FillingRule::NonZero, Rgba8::black());
    assert_eq!(c.get(0, 0), Some(Rgba8::new(127, 127, 127, 255)));

    let mut f = Canvas::<Rgba32>::new(2, 2).unwrap();
    f.clear(Rgba32::new(1.0, 1.0, 1.0, 1.0));
    f.set_opacity(0.5);
    f.fill(&full(2.0, 2.0), FillingRule::NonZero, Rgba32::new(0.0, 0.0, 0.0, 1.0));
    assert_eq!(f.get(1, 1), Some(Rgba32::new(0.5, 0.5, 0.5, 1.0)));
}

#[test]
fn tiny_opacity_leaves_destination() {
    let blue = Rgba8::new(0, 0, 255, 255);
    let mut c = Canvas::<Rgba8>::new(4, 4).unwrap();
    c.clear(blue);
    c.set_compositing(CompositingMode::Copy);
    c.set_opacity(0.001);
    c.fill(&full(4.0, 4.0), FillingRule::NonZero, Rgba8::new(255, 0, 0, 255));
    assert!(c.pixels().iter().all(|&p| p == blue));

    c.set_compositing(CompositingMode::SourceIn);
    c.fill(&full(4.0, 4.0), FillingRule::NonZero, Rgba8::new(255, 0, 0, 255));
    assert_eq!(c.get(2, 2), Some(blue));
}

#[test]
fn large_antialias_is_clamped() {
    let mut c = Canvas::<Rgba8>::new(4, 4).unwrap();
    c.set_antialias(std::usize::MAX);
    assert_eq!(c.antialias(), raster2d::MAX_ANTIALIAS);
    c.clip(&Shape::rectangle(1.0, 1.0, 3.0, 3.0), FillingRule::NonZero);
    assert_eq!(c.coverage(1, 1), Some(1.0));
    assert_eq!(c.coverage(0, 0), Some(0.0));
}

#[test]
fn blend_modes() {
    let gray = Rgba32::new(0.5, 0.5, 0.5, 1.0);
    let src = Rgba32::new(0.5, 1.0, 0.0, 1.0);
    let cases = [
        (BlendMode::Normal, Rgba32::new(0.5, 1.0, 0.0, 1.0)),
        (BlendMode::Multiply, Rgba32::new(0.25, 0.5, 0.0, 1.0)),
        (BlendMode::Screen, Rgba32::new(0.75, 1.0, 0.5, 1.0)),
        (BlendMode::Darken, Rgba32::new(0.5, 0.5, 0.0, 1.0)),
        (BlendMode::Lighten, Rgba32::new(0.5, 1.0, 0.5, 1.0)),
        (BlendMode::Difference, Rgba32::new(0.0, 0.5, 0.5, 1.0)),
        (BlendMode::Exclusion, Rgba32::new(0.5, 0.5, 0.5, 1.0)),
    ];
    for &(mode, expect) in &cases {
        let mut c = Canvas::<Rgba32>::new(1, 1).unwrap();
        c.clear(gray);
        c.set_blend_mode(mode);
        c.fill(&full(1.0, 1.0), FillingRule::NonZero, src);
        let got = c.get(0, 0).unwrap();
        assert!(approx(got, expect), "{:?}: {:?}", mode, got);
    }
}

#[test]
fn compositing_modes() {
    let white = Rgba32::new(1.0, 1.0, 1.0, 1.0);
    let half_red = Rgba32::new(1.0, 0.0, 0.0, 0.5);
    let cases = [
        (CompositingMode::Copy, half_red),
        (CompositingMode::Clear, Rgba32::default()),
        (CompositingMode::DestinationOut, Rgba32::new(1.0, 1.0, 1.0, 0.5)),
        (CompositingMode::DestinationOver, white),
        (CompositingMode::SourceAtop, Rgba32::new(1.0, 0.5, 0.5, 1.0)),
        (CompositingMode::SourceIn, half_red),
    ];
    for &(comp, expect) in &cases {
        let mut c = Canvas::<Rgba32>::new(1, 1).unwrap();
        c.clear(white);
        c.set_compositing(comp);
        c.fill(&full(1.0, 1.0), FillingRule::NonZero, half_red);
        let got = c.get(0, 0).unwrap();
        assert!(approx(got, expect), "{:?}: {:?}", comp, got);
    }
}

#[test]
fn clip_limits_fill() {
    let mut c = Canvas::<Rgba8>::new(6, 6).unwrap();
    c.set_antialias(2);
    c.clip(&Shape::rectangle(0.0, 0.0, 1.5, 6.0), FillingRule::NonZero);
    assert_eq!(c.coverage(0, 3), Some(1.0));
    assert_eq!(c.coverage(1, 3), Some(0.5));
    assert_eq!(c.coverage(2, 3), Some(0.0));

    let blue = Rgba8::new(0, 0, 255, 255);
    c.fill(&full(6.0, 6.0), FillingRule::NonZero, blue);
    assert_eq!(c.get(0, 0), Some(blue));
    assert_eq!(c.get(1, 0).map(|p| p.a), Some(128));
    assert_eq!(c.get(4, 4), Some(Rgba8::default()));

    c.reset_clip();
    c.fill(&full(6.0, 6.0), FillingRule::NonZero, blue);
    assert_eq!(c.get(4, 4), Some(blue));
}

#[test]
fn transform_applies_to_fill() {
    let mut c = Canvas::<Rgba8>::new(8, 8).unwrap();
    let mut t = Transform::new();
    t.scale(2.0, 2.0);
    t.translate(4.0, 0.0);
    c.set_transform(t);
    c.fill(&Shape::rectangle(0.0, 0.0, 1.0, 1.0), FillingRule::NonZero, Rgba8::white());
    let lit : Vec<(usize, usize)> = (0 .. 64)
        .filter(|i| c.pixels()[*i] == Rgba8::white())
        .map(|i| (i % 8, i / 8))
        .collect();
    assert_eq!(lit, vec![(4, 0), (5, 0), (4, 1), (5, 1)]);
}

#[test]
fn shadow_under_fill() {
    let mut c = Canvas::<Rgba8>::new(6, 6).unwrap();
    c.set_shadow(Some(Shadow { color: Rgba8::black(), dx: 2, dy: 1 }));
    let red = Rgba8::new(255, 0, 0, 255);
    c.fill(&Shape::rectangle(0.0, 0.0, 2.0, 2.0), FillingRule::NonZero, red);
    assert_eq!(c.get(0, 0), Some(red));
    assert_eq!(c.get(1, 1), Some(red));
    assert_eq!(c.get(2, 1), Some(Rgba8::black()));
    assert_eq!(c.get(3, 2), Some(Rgba8::black()));
    assert_eq!(c.get(2, 0), Some(Rgba8::default()));
    assert_eq!(c.get(4, 4), Some(Rgba8::default()));

    // Shader runs for the shadow layer and again for the direct draw
    let mut calls = 0;
    c.set_shadow(Some(Shadow { color: Rgba8::black(), dx: 0, dy: 3 }));
    c.rasterize(Point::new(4.0, 0.0), Point::new(6.0, 0.0), Point::new(4.0, 2.0), |_| {
        calls += 1;
        Ok(red)
    }).unwrap();
    assert_eq!(calls, 6);
    assert_eq!(c.get(4, 3), Some(Rgba8::black()));
    assert_eq!(c.get(4, 0), Some(red));
}

#[test]
fn triangles_respect_clip_and_opacity() {
    let mut c = Canvas::<Rgba32>::new(4, 4).unwrap();
    c.clip(&Shape::rectangle(0.0, 0.0, 2.0, 4.0), FillingRule::NonZero);
    c.set_opacity(0.5);
    let mut calls = 0;
    c.rasterize(Point::new(0.0, 0.0), Point::new(16.0, 0.0), Point::new(0.0, 16.0), |_| {
        calls += 1;
        Ok(Rgba32::new(1.0, 0.0, 0.0, 1.0))
    }).unwrap();
    assert_eq!(calls, 8);
    assert_eq!(c.get(0, 0), Some(Rgba32::new(1.0, 0.0, 0.0, 0.5)));
    assert_eq!(c.get(3, 0), Some(Rgba32::default()));

    let err = c.rasterize(Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(0.0, 4.0),
                          |_| Err("no".into()));
    assert!(err.is_err());
}

#[test]
fn surface_access() {
    let mut c = Canvas::<Rgba8>::new(2, 2).unwrap();
    let green = Rgba8::new(0, 255, 0, 255);
    c.with_surface(|surface, blender| {
        let cur = surface.cursor(1, 1).unwrap();
        blender.blend_at(surface, &cur, green, 1.0);
        assert!(surface.cursor(2, 0).is_none());
    });
    assert_eq!(c.get(1, 1), Some(green));
}

#[test]
fn write_and_compare_png() {
    let dir = std::path::Path::new("tests").join("tmp");
    std::fs::create_dir_all(&dir).unwrap();
    let file = dir.join("canvas_star.png");

    let mut c = Canvas::<Rgba8>::new(40, 40).unwrap();
    c.clear(Rgba8::white());
    c.set_antialias(4);
    let pts : Vec<(f64, f64)> = (0 .. 5)
        .map(|k| {
            let a = 2.0 * std::f64::consts::PI * k as f64 / 5.0;
            (20.0 + 15.0 * a.sin(), 20.0 - 15.0 * a.cos())
        })
        .collect();
    let star = Shape::polygon(&[pts[0], pts[2], pts[4], pts[1], pts[3]]);
    c.fill(&star, FillingRule::EvenOdd, Rgba8::new(0, 0, 128, 255));
    raster2d::write_png(c.pixels(), c.width(), c.height(), &file).unwrap();

    let (pixels, w, h) = raster2d::read_png(&file).unwrap();
    assert_eq!((w, h), (40, 40));
    assert_eq!(pixels, c.pixels().to_vec());
    assert!(raster2d::img_diff(&file, &file).unwrap());
}
