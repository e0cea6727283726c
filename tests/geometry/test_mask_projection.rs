// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Selection-to-mask projection across display/true size combinations

use thumbnail_studio::{
    geometry::{DisplayRect, GeometryError, ImageDimensions},
    mask::{project, project_rect, EDIT, PRESERVE},
};

fn dims(w: u32, h: u32) -> ImageDimensions {
    ImageDimensions::new(w, h)
}

#[test]
fn test_mask_always_matches_true_size() {
    let displays = [dims(640, 360), dims(100, 100), dims(333, 250)];
    let trues = [dims(1024, 576), dims(200, 50), dims(4000, 3000)];
    let selection = DisplayRect::new(20.0, 10.0, 60.0, 40.0);

    for display in displays {
        for true_size in trues {
            let mask = project(&selection, display, true_size).unwrap();
            assert_eq!(mask.dimensions(), true_size);
            assert_eq!(mask.edit_pixel_count(), mask.region().area());
        }
    }
}

#[test]
fn test_identity_scale_keeps_selection() {
    let selection = DisplayRect::new(3.0, 4.0, 10.0, 12.0);
    let region = project_rect(&selection, dims(64, 64), dims(64, 64)).unwrap();
    assert_eq!((region.x, region.y, region.width, region.height), (3, 4, 10, 12));
}

#[test]
fn test_mask_is_strictly_binary() {
    let selection = DisplayRect::new(0.5, 0.5, 7.3, 2.2);
    let mask = project(&selection, dims(30, 30), dims(97, 61)).unwrap();
    assert!(mask
        .as_image()
        .pixels()
        .all(|p| p.0[0] == EDIT || p.0[0] == PRESERVE));
}

#[test]
fn test_projection_is_repeatable() {
    let selection = DisplayRect::new(12.25, 7.75, 40.5, 19.5);
    let a = project(&selection, dims(300, 200), dims(1024, 683)).unwrap();
    let b = project(&selection, dims(300, 200), dims(1024, 683)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_png().unwrap(), b.to_png().unwrap());
}

#[test]
fn test_dragging_backwards_gives_same_mask() {
    let forward = DisplayRect::new(10.0, 10.0, 20.0, 20.0);
    let backward = DisplayRect::new(30.0, 30.0, -20.0, -20.0);
    assert_eq!(
        project(&forward, dims(100, 100), dims(400, 400)).unwrap(),
        project(&backward, dims(100, 100), dims(400, 400)).unwrap()
    );
}

#[test]
fn test_unrendered_canvas_is_rejected() {
    let selection = DisplayRect::new(0.0, 0.0, 10.0, 10.0);
    assert!(matches!(
        project(&selection, dims(0, 0), dims(100, 100)),
        Err(GeometryError::UnresolvedCanvas { .. })
    ));
}
