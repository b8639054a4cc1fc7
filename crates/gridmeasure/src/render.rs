use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use crate::{
    controller::UiEffect,
    indexer::ContourIndex,
    types::{Centroid, Contour},
};

/// Pen width used for contour outlines
const OUTLINE_WIDTH: u32 = 2;

fn as_point([x, y]: [i32; 2]) -> (f32, f32) {
    (x as f32, y as f32)
}

fn outline_mut(canvas: &mut RgbImage, contour: &Contour, color: Rgb<u8>) {
    let points = &contour.points;
    for (i, &start) in points.iter().enumerate() {
        let end = points[(i + 1) % points.len()];
        draw_line_segment_mut(canvas, as_point(start), as_point(end), color);
        draw_filled_rect_mut(
            canvas,
            Rect::at(start[0], start[1]).of_size(OUTLINE_WIDTH, OUTLINE_WIDTH),
            color,
        );
    }
}

/// Copy of `base` with one contour outlined in the pen colour
pub fn highlight_contour(base: &RgbImage, contour: &Contour, color: Rgb<u8>) -> RgbImage {
    let mut canvas = base.clone();
    outline_mut(&mut canvas, contour, color);
    canvas
}

/// Copy of `base` with every indexed hole outlined
pub fn outline_all(base: &RgbImage, index: &ContourIndex, color: Rgb<u8>) -> RgbImage {
    let mut canvas = base.clone();
    for (_, contour) in index.iter() {
        outline_mut(&mut canvas, contour, color);
    }
    canvas
}

/// Copy of `base` with a 1px segment joining a measured pair
pub fn draw_measurement(base: &RgbImage, from: Centroid, to: Centroid, color: Rgb<u8>) -> RgbImage {
    let mut canvas = base.clone();
    draw_line_segment_mut(
        &mut canvas,
        as_point([from.x, from.y]),
        as_point([to.x, to.y]),
        color,
    );
    canvas
}

/// The frame the shell should show after `effect`, or `None` to keep the
/// current one
pub fn render_effect(
    base: &RgbImage,
    index: &ContourIndex,
    effect: &UiEffect,
    color: Rgb<u8>,
) -> Option<RgbImage> {
    match effect {
        UiEffect::HighlightContour { centroid } => index
            .get(centroid)
            .map(|contour| highlight_contour(base, contour, color)),
        UiEffect::DrawLine { from, to, .. } => Some(draw_measurement(base, *from, *to, color)),
        UiEffect::Cleared => Some(base.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEN: Rgb<u8> = Rgb([255, 255, 0]);

    fn blank() -> RgbImage {
        RgbImage::from_pixel(20, 20, Rgb([0, 0, 0]))
    }

    #[test]
    fn test_measurement_line_touches_endpoints() {
        let frame = draw_measurement(&blank(), Centroid::new(2, 2), Centroid::new(2, 15), PEN);
        assert_eq!(*frame.get_pixel(2, 2), PEN);
        assert_eq!(*frame.get_pixel(2, 9), PEN);
        assert_eq!(*frame.get_pixel(10, 10), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_highlight_leaves_base_untouched() {
        let base = blank();
        let contour = Contour::new(vec![[5, 5], [10, 5], [10, 10], [5, 10]]);
        let frame = highlight_contour(&base, &contour, PEN);

        assert_eq!(*frame.get_pixel(7, 5), PEN);
        assert_eq!(*frame.get_pixel(5, 7), PEN);
        assert_eq!(*frame.get_pixel(7, 7), Rgb([0, 0, 0]));
        assert!(base.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }

    #[test]
    fn test_render_effect_dispatch() {
        let base = blank();
        let contour = Contour::new(vec![[5, 5], [9, 5], [9, 9], [5, 9]]);
        let index = ContourIndex::from_contours(vec![contour], 100.0);
        let centroid = Centroid::new(7, 7);

        assert!(render_effect(&base, &index, &UiEffect::HighlightContour { centroid }, PEN).is_some());
        assert_eq!(render_effect(&base, &index, &UiEffect::Cleared, PEN), Some(base.clone()));
        assert!(render_effect(&base, &index, &UiEffect::Ignored, PEN).is_none());
        assert!(render_effect(
            &base,
            &index,
            &UiEffect::HighlightContour { centroid: Centroid::new(0, 0) },
            PEN
        )
        .is_none());
    }
}
