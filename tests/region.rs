extern crate raster2d;

use raster2d::FillingRule;
use raster2d::Path;
use raster2d::Point;
use raster2d::Region;
use raster2d::Shape;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn rect(x1: f64, y1: f64, x2: f64, y2: f64) -> Region {
    Region::from_shape(&Shape::rectangle(x1, y1, x2, y2), FillingRule::NonZero)
}

fn circle(cx: f64, cy: f64, r: f64) -> Shape {
    let k = 0.5522847498 * r;
    let mut p = Path::new();
    p.move_to(cx + r, cy);
    p.cubic_to(cx + r, cy + k, cx + k, cy + r, cx, cy + r);
    p.cubic_to(cx - k, cy + r, cx - r, cy + k, cx - r, cy);
    p.cubic_to(cx - r, cy - k, cx - k, cy - r, cx, cy - r);
    p.cubic_to(cx + k, cy - r, cx + r, cy - k, cx + r, cy);
    p.close_polygon();
    p.finish()
}

fn star() -> Shape {
    let pts : Vec<(f64, f64)> = (0 .. 5)
        .map(|k| {
            let a = 2.0 * std::f64::consts::PI * k as f64 / 5.0;
            (20.0 + 10.0 * a.sin(), 20.0 - 10.0 * a.cos())
        })
        .collect();
    Shape::polygon(&[pts[0], pts[2], pts[4], pts[1], pts[3]])
}

fn nested_squares() -> Shape {
    let mut s = Shape::rectangle(0.0, 0.0, 4.0, 4.0);
    s.components.extend(Shape::rectangle(1.0, 1.0, 3.0, 3.0).components);
    s
}

#[test]
fn overlapping_rectangles() {
    let a = rect(0.0, 0.0, 2.0, 2.0);
    let b = rect(1.0, 1.0, 3.0, 3.0);

    let i = a.intersect(&b);
    assert_eq!(i.solids().len(), 1);
    assert!((i.area() - 1.0).abs() < 1e-9);
    assert!(i.approx_eq(&rect(1.0, 1.0, 2.0, 2.0)));

    let u = a.union(&b);
    assert_eq!(u.solids().len(), 1);
    assert!((u.area() - 7.0).abs() < 1e-9);
    assert!(u.contains(pt(0.5, 0.5)));
    assert!(u.contains(pt(2.5, 2.5)));
    assert!(!u.contains(pt(2.5, 0.5)));
    let uu = u.union(&u);
    assert_eq!(uu.solids().len(), 1);
    assert!((uu.area() - 7.0).abs() < 1e-9);
    assert!(uu.approx_eq(&u));

    let d = a.subtract(&b);
    assert!((d.area() - 3.0).abs() < 1e-9);
    assert!(d.contains(pt(0.5, 0.5)));
    assert!(!d.contains(pt(1.5, 1.5)));

    let x = a.xor(&b);
    assert!((x.area() - 6.0).abs() < 1e-9);
    assert!(!x.contains(pt(1.5, 1.5)));
}

#[test]
fn disjoint_rectangles() {
    let a = rect(0.0, 0.0, 1.0, 1.0);
    let b = rect(5.0, 0.0, 6.0, 2.0);
    assert!(a.intersect(&b).is_empty());
    let u = a.union(&b);
    assert_eq!(u.solids().len(), 2);
    assert!((u.area() - 3.0).abs() < 1e-9);
    assert!(a.subtract(&b).approx_eq(&a));
}

#[test]
fn solids_are_sorted_top_to_bottom() {
    let mut s = Shape::rectangle(0.0, 10.0, 1.0, 11.0);
    s.components.extend(Shape::rectangle(5.0, 0.0, 6.0, 1.0).components);
    s.components.extend(Shape::rectangle(0.0, 0.0, 1.0, 1.0).components);
    let r = Region::from_shape(&s, FillingRule::NonZero);
    let corners : Vec<(f64, f64)> = r.solids().iter()
        .map(|s| {
            let b = s.bounds().unwrap();
            (b.x1, b.y1)
        })
        .collect();
    assert_eq!(corners, vec![(0.0, 0.0), (5.0, 0.0), (0.0, 10.0)]);
}

#[test]
fn self_operations() {
    let a = rect(0.0, 0.0, 3.0, 2.0);
    assert!(a.union(&a).approx_eq(&a));
    assert!(a.intersect(&a).approx_eq(&a));
    assert!((a.union(&a).area() - 6.0).abs() < 1e-9);
    assert!(a.subtract(&a).is_empty());
    assert!(a.xor(&a).is_empty());
    assert!(a.approx_eq(&a));
}

#[test]
fn empty_operands() {
    let e = Region::new();
    let a = rect(0.0, 0.0, 1.0, 1.0);
    assert!(e.is_empty());
    assert_eq!(e.area(), 0.0);
    assert!(e.union(&a).approx_eq(&a));
    assert!(e.intersect(&a).is_empty());
    assert!(a.subtract(&e).approx_eq(&a));
    assert!(Region::from_shape(&Shape::new(), FillingRule::NonZero).is_empty());
}

#[test]
fn nested_squares_by_rule() {
    let nz = Region::from_shape(&nested_squares(), FillingRule::NonZero);
    assert_eq!(nz.solids().len(), 1);
    assert!(nz.solids()[0].holes.is_empty());
    assert!((nz.area() - 16.0).abs() < 1e-9);
    assert!(nz.contains(pt(2.0, 2.0)));

    let eo = Region::from_shape(&nested_squares(), FillingRule::EvenOdd);
    assert_eq!(eo.solids().len(), 1);
    assert_eq!(eo.solids()[0].holes.len(), 1);
    assert!(eo.solids()[0].holes[0].is_hole());
    assert!((eo.area() - 12.0).abs() < 1e-9);
    assert!(!eo.contains(pt(2.0, 2.0)));
    assert!(eo.contains(pt(0.5, 2.0)));

    // The hole comes back after the outer loop
    assert_eq!(eo.to_shape().components.len(), 2);
    let again = Region::from_shape(&eo.to_shape(), FillingRule::NonZero);
    assert!(again.approx_eq(&eo));
}

#[test]
fn subtract_makes_hole() {
    let outer = rect(0.0, 0.0, 4.0, 4.0);
    let inner = rect(1.0, 1.0, 3.0, 3.0);
    let d = outer.subtract(&inner);
    assert_eq!(d.solids().len(), 1);
    assert_eq!(d.solids()[0].holes.len(), 1);
    assert!((d.area() - 12.0).abs() < 1e-9);
    assert!(d.union(&inner).approx_eq(&outer));
}

#[test]
fn hole_goes_to_smallest_outer() {
    // Square ring with an island inside its hole
    let mut s = Shape::rectangle(0.0, 0.0, 10.0, 10.0);
    let mut hole = Shape::rectangle(2.0, 2.0, 8.0, 8.0);
    hole.components[0].reverse();
    s.components.extend(hole.components);
    s.components.extend(Shape::rectangle(4.0, 4.0, 6.0, 6.0).components);
    let mut inner_hole = Shape::rectangle(4.5, 4.5, 5.5, 5.5);
    inner_hole.components[0].reverse();
    s.components.extend(inner_hole.components);

    let r = Region::from_shape(&s, FillingRule::NonZero);
    assert_eq!(r.solids().len(), 2);
    for solid in r.solids() {
        assert_eq!(solid.holes.len(), 1);
        let outer = solid.area;
        let hole = solid.holes[0].area;
        if outer > 50.0 {
            assert!((hole + 36.0).abs() < 1e-9);
        } else {
            assert!((hole + 1.0).abs() < 1e-9);
        }
    }
    assert!((r.area() - (100.0 - 36.0 + 4.0 - 1.0)).abs() < 1e-9);
}

#[test]
fn pentagram_by_rule() {
    let nz = Region::from_shape(&star(), FillingRule::NonZero);
    assert_eq!(nz.solids().len(), 1);
    assert!(nz.solids()[0].holes.is_empty());
    assert!((nz.area() - 112.25699414489634).abs() < 1e-3);
    assert!(nz.contains(pt(20.0, 20.0)));

    // Spikes and the inner pentagon only touch at corners, so the result
    // is either five spikes or the outline with a pentagon hole
    let eo = Region::from_shape(&star(), FillingRule::EvenOdd);
    assert!((eo.area() - 77.56767521667436).abs() < 1e-3);
    assert!(!eo.contains(pt(20.0, 20.0)));
    assert!(eo.contains(pt(20.0, 12.0)));

    let pentagon = nz.subtract(&eo);
    assert!((pentagon.area() - 34.68931892822198).abs() < 1e-3);
}

#[test]
fn circles_inclusion_exclusion() {
    let a = Region::from_shape(&circle(20.0, 20.0, 10.0), FillingRule::NonZero);
    let b = Region::from_shape(&circle(30.0, 20.0, 10.0), FillingRule::NonZero);
    let pi_r2 = std::f64::consts::PI * 100.0;
    assert!((a.area() - pi_r2).abs() < 0.5);
    assert!((b.area() - a.area()).abs() < 1e-3);

    let u = a.union(&b);
    let i = a.intersect(&b);
    assert_eq!(u.solids().len(), 1);
    assert_eq!(i.solids().len(), 1);
    assert!((u.area() + i.area() - a.area() - b.area()).abs() < 1e-3);
    assert!(i.contains(pt(25.0, 20.0)));
    assert!(!i.contains(pt(12.0, 20.0)));
    assert!(u.contains(pt(12.0, 20.0)));
    assert!(u.contains(pt(38.0, 20.0)));
    let uu = u.union(&u);
    assert_eq!(uu.solids().len(), 1);
    assert!((uu.area() - u.area()).abs() < 1e-3);
    assert!(uu.contains(pt(25.0, 20.0)));

    let x = a.xor(&b);
    assert!((x.area() - (u.area() - i.area())).abs() < 1e-3);
}
