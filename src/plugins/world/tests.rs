use std::io::Write;

use bevy::prelude::*;

use super::{load_collision_field, CollisionField, ObstacleMask};
use crate::common::error::MaskError;

fn field_with_block() -> CollisionField {
    let mut mask = ObstacleMask::open(100, 100);
    mask.fill_rect(40, 40, 10, 10);
    CollisionField::new(mask)
}

#[test]
fn solid_pixels_are_occupied() {
    let field = field_with_block();
    assert!(field.occupied(40, 40));
    assert!(field.occupied(49, 49));
    assert!(!field.occupied(50, 50));
    assert!(!field.occupied(39, 45));
}

#[test]
fn out_of_bounds_is_never_occupied() {
    let mut mask = ObstacleMask::open(10, 10);
    mask.fill_rect(0, 0, 10, 10);
    let mut field = CollisionField::new(mask);

    for offset in [IVec2::ZERO, IVec2::new(5, 5), IVec2::new(-20, 3)] {
        field.set_offset(offset);
        for (x, y) in [(-1, 0), (0, -1), (10, 0), (0, 10), (i64::MAX / 2, 0), (-1000, -1000)] {
            let sx = x + i64::from(offset.x);
            let sy = y + i64::from(offset.y);
            let inside = (0..10).contains(&sx) && (0..10).contains(&sy);
            assert_eq!(field.occupied(x, y), inside, "({x},{y}) offset {offset}");
        }
    }
}

#[test]
fn offset_shifts_the_sample() {
    let mut field = field_with_block();
    field.set_offset(IVec2::new(30, 30));
    assert!(field.occupied(10, 10));
    assert!(!field.occupied(40, 40));
}

#[test]
fn world_queries_ignore_the_offset() {
    let mut field = field_with_block();
    field.set_offset(IVec2::new(17, 3));
    assert!(field.occupied_world(Vec2::new(45.5, 41.2)));
    assert!(!field.occupied_world(Vec2::new(55.0, 41.0)));
}

#[test]
fn field_without_mask_is_walkable() {
    let field = CollisionField::walkable();
    assert!(!field.has_mask());
    assert!(!field.occupied(0, 0));
    assert!(!field.occupied_world(Vec2::new(1000.0, 1000.0)));
}

#[test]
fn fill_rect_clips_to_the_mask() {
    let mut mask = ObstacleMask::open(8, 8);
    mask.fill_rect(-4, 6, 20, 20);
    assert!(mask.is_obstacle(0, 6));
    assert!(mask.is_obstacle(7, 7));
    assert!(!mask.is_obstacle(7, 5));
}

#[test]
fn alpha_length_must_match_size() {
    let err = ObstacleMask::from_alpha(4, 4, vec![0; 15]).unwrap_err();
    assert!(matches!(err, MaskError::SizeMismatch { expected: 16, actual: 15, .. }));
}

#[test]
fn decodes_png_alpha() {
    let mut img = image::RgbaImage::new(3, 2);
    img.put_pixel(1, 0, image::Rgba([0, 0, 0, 1]));
    img.put_pixel(2, 1, image::Rgba([255, 255, 255, 200]));

    let mut bytes = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();

    let mask = ObstacleMask::from_png_bytes(&bytes).unwrap();
    assert_eq!((mask.width(), mask.height()), (3, 2));
    assert!(!mask.is_obstacle(0, 0));
    assert!(mask.is_obstacle(1, 0));
    assert!(mask.is_obstacle(2, 1));
}

#[test]
fn unreadable_mask_degrades_to_walkable() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"definitely not a png").unwrap();

    let field = load_collision_field(&file.path().display().to_string());
    assert!(!field.has_mask());

    let field = load_collision_field("no/such/mask.png");
    assert!(!field.has_mask());
}
