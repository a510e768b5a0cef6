use super::*;
use crate::foundation::core::{PhysicalSize, Point};

fn square(half: f64) -> BezPath {
    let mut p = BezPath::new();
    p.move_to((-half, -half));
    p.line_to((half, -half));
    p.line_to((half, half));
    p.line_to((-half, half));
    p.close_path();
    p
}

#[test]
fn stamp_fills_inside_and_leaves_outside() {
    let mut buf = RasterBuffer::new(PhysicalSize::new(32, 32), Rgba8::BLACK).unwrap();
    let mut s = Stamper::new();
    let tr = stamp_transform(Point::new(16.0, 16.0), 0.0, 1.0);
    s.stamp(&mut buf, &square(4.0), tr, Rgba8::rgb(255, 0, 0))
        .unwrap();

    assert_eq!(buf.pixel(16, 16), Some([255, 0, 0, 255]));
    assert_eq!(buf.pixel(0, 0), Some([0, 0, 0, 255]));
    assert_eq!(buf.pixel(25, 16), Some([0, 0, 0, 255]));
}

#[test]
fn stamp_blends_over_existing_content() {
    let mut buf = RasterBuffer::new(PhysicalSize::new(16, 16), Rgba8::rgb(0, 0, 255)).unwrap();
    let mut s = Stamper::new();
    let tr = stamp_transform(Point::new(8.0, 8.0), 0.0, 1.0);
    s.stamp(&mut buf, &square(3.0), tr, Rgba8::rgba(255, 0, 0, 128))
        .unwrap();

    let px = buf.pixel(8, 8).unwrap();
    assert_eq!(px[3], 255);
    assert!(px[0] > 100 && px[2] > 100, "{px:?}");
}

#[test]
fn position_is_scaled_to_physical_pixels() {
    let mut buf = RasterBuffer::new(PhysicalSize::new(40, 40), Rgba8::BLACK).unwrap();
    let mut s = Stamper::new();
    let tr = stamp_transform(Point::new(10.0, 10.0), 0.0, 2.0);
    s.stamp(&mut buf, &square(2.0), tr, Rgba8::rgb(0, 255, 0))
        .unwrap();

    assert_eq!(buf.pixel(20, 20), Some([0, 255, 0, 255]));
    assert_eq!(buf.pixel(10, 10), Some([0, 0, 0, 255]));
    // Only the position is scaled: the outline keeps its half-size of 2 pixels.
    assert_eq!(buf.pixel(21, 20), Some([0, 255, 0, 255]));
    assert_eq!(buf.pixel(23, 20), Some([0, 0, 0, 255]));
    assert_eq!(buf.pixel(20, 23), Some([0, 0, 0, 255]));
}

#[test]
fn transform_rotates_about_the_object_position() {
    let tr = stamp_transform(Point::new(5.0, 5.0), std::f64::consts::FRAC_PI_2, 1.0);
    let p = tr * Point::new(1.0, 0.0);
    assert!((p.x - 5.0).abs() < 1e-9 && (p.y - 6.0).abs() < 1e-9, "{p:?}");
}

#[test]
fn transform_keeps_outline_size_on_high_dpi() {
    let tr = stamp_transform(Point::new(10.0, 10.0), 0.0, 2.0);
    let p = tr * Point::new(20.0, 0.0);
    assert!((p.x - 40.0).abs() < 1e-9 && (p.y - 20.0).abs() < 1e-9, "{p:?}");
}

#[test]
fn scratch_is_reused_until_size_changes() {
    let mut s = Stamper::new();
    let mut a = RasterBuffer::new(PhysicalSize::new(8, 8), Rgba8::BLACK).unwrap();
    let tr = stamp_transform(Point::new(4.0, 4.0), 0.0, 1.0);
    s.stamp(&mut a, &square(1.0), tr, Rgba8::rgb(1, 1, 1)).unwrap();
    assert_eq!(s.cached_size(), Some(PhysicalSize::new(8, 8)));

    let mut b = RasterBuffer::new(PhysicalSize::new(12, 6), Rgba8::BLACK).unwrap();
    s.stamp(&mut b, &square(1.0), tr, Rgba8::rgb(1, 1, 1)).unwrap();
    assert_eq!(s.cached_size(), Some(PhysicalSize::new(12, 6)));

    s.release();
    assert_eq!(s.cached_size(), None);
}
