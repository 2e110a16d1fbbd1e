extern crate raster2d;

use raster2d::Blender;
use raster2d::Point;
use raster2d::RenderingBuffer;
use raster2d::Rgba32;
use raster2d::Rgba8;
use raster2d::Vertex;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Number of shader calls per pixel for a list of triangles
fn shaded(w: usize, h: usize, tris: &[[Point; 3]]) -> Vec<u32> {
    let mut buf = RenderingBuffer::<Rgba8>::new(w, h);
    let mut hits = vec![0u32; w * h];
    for t in tris {
        raster2d::rasterize(&mut buf.surface(), &Blender::default(), t[0], t[1], t[2], |v: Point| {
            let (x, y) = (v.x.round() as usize, v.y.round() as usize);
            hits[y * w + x] += 1;
            Ok(Rgba8::white())
        }).unwrap();
    }
    hits
}

#[test]
fn lattice_sampling() {
    let hits = shaded(4, 4, &[[pt(0.0, 0.0), pt(4.0, 0.0), pt(0.0, 4.0)]]);
    for y in 0 .. 4 {
        for x in 0 .. 4 {
            let expect = if x + y < 4 { 1 } else { 0 };
            assert_eq!(hits[y * 4 + x], expect, "pixel {},{}", x, y);
        }
    }
}

#[test]
fn winding_order_does_not_matter() {
    let a = shaded(8, 8, &[[pt(0.5, 0.5), pt(7.2, 1.7), pt(2.3, 6.9)]]);
    let b = shaded(8, 8, &[[pt(2.3, 6.9), pt(7.2, 1.7), pt(0.5, 0.5)]]);
    assert_eq!(a, b);
    assert!(a.iter().any(|&n| n == 1));
}

#[test]
fn shared_edges_cover_once() {
    let (a, b, c, d, e) = (pt(0.0, 0.0), pt(8.0, 0.0), pt(8.0, 8.0), pt(0.0, 8.0), pt(4.0, 8.0));
    let hits = shaded(8, 8, &[[a, b, e], [b, c, e], [a, e, d]]);
    assert!(hits.iter().all(|&n| n == 1), "{:?}", hits);
}

#[test]
fn mesh_with_fractional_vertices_covers_once() {
    let p = [pt(0.0, 0.0), pt(3.3, 0.0), pt(6.0, 0.0),
             pt(0.0, 2.7), pt(2.9, 3.1), pt(6.0, 2.2),
             pt(0.0, 6.0), pt(3.6, 6.0), pt(6.0, 6.0)];
    let quad = |i: usize, j: usize, k: usize, l: usize| vec![[p[i], p[j], p[l]], [p[j], p[k], p[l]]];
    let mut tris = vec![];
    tris.extend(quad(0, 1, 4, 3));
    tris.extend(quad(1, 2, 5, 4));
    tris.extend(quad(3, 4, 7, 6));
    tris.extend(quad(4, 5, 8, 7));
    let hits = shaded(6, 6, &tris);
    assert!(hits.iter().all(|&n| n == 1), "{:?}", hits);
}

#[test]
fn degenerate_and_offscreen() {
    let nothing = [
        [pt(0.0, 0.0), pt(2.0, 2.0), pt(4.0, 4.0)],
        [pt(1.0, 1.0), pt(1.0, 1.0), pt(3.0, 2.0)],
        [pt(-9.0, -9.0), pt(-4.0, -9.0), pt(-9.0, -4.0)],
        [pt(5.0, 0.0), pt(9.0, 0.0), pt(5.0, 3.0)],
        [pt(0.0, 0.0), pt(std::f64::NAN, 1.0), pt(2.0, 2.0)],
        [pt(0.0, 0.0), pt(std::f64::INFINITY, 1.0), pt(2.0, 2.0)],
    ];
    let hits = shaded(4, 4, &nothing);
    assert!(hits.iter().all(|&n| n == 0));
}

#[test]
fn partially_offscreen() {
    let hits = shaded(4, 4, &[[pt(-8.0, -8.0), pt(12.0, -8.0), pt(-8.0, 12.0)]]);
    // x + y < 4 inside the viewport
    for y in 0 .. 4 {
        for x in 0 .. 4 {
            let expect = if x + y < 4 { 1 } else { 0 };
            assert_eq!(hits[y * 4 + x], expect);
        }
    }
}

#[test]
fn attributes_interpolate() {
    let mut buf = RenderingBuffer::<Rgba32>::new(8, 8);
    let v0 = Vertex::new(0.0, 0.0, 0.0);
    let v1 = Vertex::new(8.0, 0.0, 1.0);
    let v2 = Vertex::new(0.0, 8.0, 0.0);
    raster2d::rasterize(&mut buf.surface(), &Blender::default(), v0, v1, v2, |v: Vertex<f64>| {
        let g = v.attribute as f32;
        Ok(Rgba32::new(g, g, g, 1.0))
    }).unwrap();
    for &(x, y) in &[(0, 0), (3, 2), (5, 1), (1, 6)] {
        let px = buf.pixels[y * 8 + x];
        assert!((px.r - x as f32 / 8.0).abs() < 1e-6, "{},{}: {:?}", x, y, px);
        assert_eq!(px.a, 1.0);
    }
    assert_eq!(buf.pixels[7 * 8 + 7], Rgba32::default());
}

#[test]
fn shader_error_stops_triangle() {
    let mut buf = RenderingBuffer::<Rgba8>::new(4, 4);
    let red = Rgba8::new(255, 0, 0, 255);
    let mut calls = 0;
    let res = raster2d::rasterize(&mut buf.surface(), &Blender::default(),
                                  pt(0.0, 0.0), pt(4.0, 0.0), pt(0.0, 4.0), |_| {
        calls += 1;
        if calls == 1 { Ok(red) } else { Err("out of texture".into()) }
    });
    match res {
        Err(raster2d::Error::Shader(e)) => assert_eq!(e.to_string(), "out of texture"),
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(calls, 2);
    assert_eq!(buf.pixels[0], red);
    assert_eq!(buf.pixels[1], Rgba8::default());
}

#[test]
fn clip_skips_shader() {
    let mut buf = RenderingBuffer::<Rgba8>::new(4, 4);
    for (i, c) in buf.clip.iter_mut().enumerate() {
        if i % 4 >= 2 {
            *c = 0.0;
        }
    }
    let mut calls = 0;
    raster2d::rasterize(&mut buf.surface(), &Blender::default(),
                        pt(0.0, 0.0), pt(16.0, 0.0), pt(0.0, 16.0), |_| {
        calls += 1;
        Ok(Rgba8::white())
    }).unwrap();
    assert_eq!(calls, 8);
    assert_eq!(buf.pixels[0], Rgba8::white());
    assert_eq!(buf.pixels[3], Rgba8::default());

    // A shader failing only on clipped pixels never fails
    let res = raster2d::rasterize(&mut buf.surface(), &Blender::default(),
                                  pt(0.0, 0.0), pt(16.0, 0.0), pt(0.0, 16.0), |v: Point| {
        if v.x >= 2.0 { Err("clipped".into()) } else { Ok(Rgba8::white()) }
    });
    assert!(res.is_ok());
}
