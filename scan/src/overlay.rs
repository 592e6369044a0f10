//! Viewfinder overlay geometry: a dimming mask around a reading window plus
//! four rounded corner brackets marking it.
//!
//! Output is purely declarative draw geometry. The host recomputes it when
//! the view geometry changes, never per camera frame. The reading window is
//! configurable; passing the full view bounds makes the mask degenerate to
//! nothing while the brackets frame the whole view.

use std::f32::consts::{FRAC_PI_2, PI};

use egui::{Pos2, Rect, pos2};

/// Segments used to flatten each quarter-circle corner arc into a polyline.
const ARC_SEGMENTS: usize = 8;

/// Styling knobs for the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    /// Length of each bracket leg, in points.
    pub corner_length: f32,
    /// Stroke width of the brackets; also sets the outward offset.
    pub stroke_width: f32,
    /// Desired corner radius; clamped against the window and leg length.
    pub corner_radius: f32,
    /// Opacity of the dimming mask, 0.0 to 1.0.
    pub mask_opacity: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            corner_length: 20.0,
            stroke_width: 6.0,
            corner_radius: 15.0,
            mask_opacity: 0.6,
        }
    }
}

/// Computed overlay geometry for one (bounds, window) pair.
#[derive(Debug, Clone)]
pub struct OverlayGeometry {
    /// The reading window, clipped to the bounds.
    pub window: Rect,
    /// Dimming mask as side bands tiling bounds-minus-window exactly.
    /// Empty when the window covers the full bounds.
    pub dim_bands: Vec<Rect>,
    /// Corner brackets as polylines: upper-left, upper-right, lower-right,
    /// lower-left. Each is leg, quarter arc, leg.
    pub brackets: [Vec<Pos2>; 4],
    /// Stroke width to paint the brackets with.
    pub stroke_width: f32,
    /// The corner radius after clamping.
    pub corner_radius: f32,
}

impl OverlayGeometry {
    /// Compute the overlay for a view of `bounds` with a `window` reading
    /// area.
    ///
    /// The window is clipped to the bounds. The corner radius clamps to the
    /// leg length and to half the window's shorter side, so degenerate
    /// windows collapse to zero-radius brackets instead of inverting.
    pub fn compute(bounds: Rect, window: Rect, config: &OverlayConfig) -> Self {
        let window = clip_window(bounds, window);

        let short_side = window.width().min(window.height());
        let corner_length = config.corner_length.clamp(0.0, short_side / 2.0);
        // corner_length is already capped at half the short side.
        let corner_radius = config.corner_radius.clamp(0.0, corner_length);
        let stroke_width = config.stroke_width.max(0.0);

        // Anchors sit half a stroke outside the window so the stroke hugs
        // its edge; the sign pair points inward along each axis.
        let offset = stroke_width / 2.0;
        let corners = [
            (pos2(window.min.x - offset, window.min.y - offset), 1.0, 1.0),
            (pos2(window.max.x + offset, window.min.y - offset), -1.0, 1.0),
            (pos2(window.max.x + offset, window.max.y + offset), -1.0, -1.0),
            (pos2(window.min.x - offset, window.max.y + offset), 1.0, -1.0),
        ];
        let brackets =
            corners.map(|(anchor, sx, sy)| bracket(anchor, sx, sy, corner_length, corner_radius));

        Self {
            window,
            dim_bands: dim_bands(bounds, window),
            brackets,
            stroke_width,
            corner_radius,
        }
    }
}

/// Clip the window to the bounds, collapsing an empty intersection to a
/// zero-size window instead of a negative rect.
fn clip_window(bounds: Rect, window: Rect) -> Rect {
    let clipped = window.intersect(bounds);
    if clipped.is_positive() {
        clipped
    } else {
        Rect::from_min_size(clipped.min.clamp(bounds.min, bounds.max), egui::Vec2::ZERO)
    }
}

/// The even-odd mask (bounds minus window) expressed as up to four side
/// bands: full-width top and bottom, plus left and right at window height.
fn dim_bands(bounds: Rect, window: Rect) -> Vec<Rect> {
    let candidates = [
        Rect::from_min_max(bounds.min, pos2(bounds.max.x, window.min.y)),
        Rect::from_min_max(pos2(bounds.min.x, window.max.y), bounds.max),
        Rect::from_min_max(pos2(bounds.min.x, window.min.y), pos2(window.min.x, window.max.y)),
        Rect::from_min_max(pos2(window.max.x, window.min.y), pos2(bounds.max.x, window.max.y)),
    ];
    candidates
        .into_iter()
        .filter(|band| band.is_positive())
        .collect()
}

/// One corner bracket: a leg along the window edge, a quarter arc through
/// the corner, and the other leg. `sx`/`sy` mirror the upper-left shape into
/// the other three corners.
fn bracket(anchor: Pos2, sx: f32, sy: f32, length: f32, radius: f32) -> Vec<Pos2> {
    let local = |u: f32, v: f32| pos2(anchor.x + sx * u, anchor.y + sy * v);

    let mut points = Vec::with_capacity(ARC_SEGMENTS + 3);
    points.push(local(0.0, length));
    if radius > 0.0 {
        for i in 0..=ARC_SEGMENTS {
            let phi = PI + (i as f32 / ARC_SEGMENTS as f32) * FRAC_PI_2;
            points.push(local(radius + radius * phi.cos(), radius + radius * phi.sin()));
        }
    } else {
        points.push(local(0.0, 0.0));
    }
    points.push(local(length, 0.0));
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Rect {
        Rect::from_min_max(pos2(0.0, 0.0), pos2(400.0, 300.0))
    }

    fn band_area(geometry: &OverlayGeometry) -> f32 {
        geometry.dim_bands.iter().map(|b| b.area()).sum()
    }

    #[test]
    fn test_full_bounds_window_has_no_mask() {
        let geometry = OverlayGeometry::compute(bounds(), bounds(), &OverlayConfig::default());
        assert!(geometry.dim_bands.is_empty(), "pass-through window dims nothing");
        assert_eq!(geometry.window, bounds());
    }

    #[test]
    fn test_mask_bands_tile_bounds_minus_window() {
        let window = Rect::from_min_max(pos2(100.0, 80.0), pos2(300.0, 220.0));
        let geometry = OverlayGeometry::compute(bounds(), window, &OverlayConfig::default());

        let expected = bounds().area() - window.area();
        assert!(
            (band_area(&geometry) - expected).abs() < 0.5,
            "bands must cover exactly the area outside the window"
        );
        for band in &geometry.dim_bands {
            assert!(
                !band.intersects(window.shrink(0.1)),
                "no band may dim the reading window"
            );
        }
    }

    #[test]
    fn test_corner_radius_clamps_to_half_short_side() {
        let window = Rect::from_min_max(pos2(0.0, 0.0), pos2(8.0, 300.0));
        let config = OverlayConfig {
            corner_radius: 15.0,
            ..OverlayConfig::default()
        };
        let geometry = OverlayGeometry::compute(bounds(), window, &config);
        assert!(
            geometry.corner_radius <= 4.0,
            "radius must not exceed half the short side, got {}",
            geometry.corner_radius
        );
    }

    #[test]
    fn test_zero_area_window_does_not_panic() {
        let window = Rect::from_min_size(pos2(200.0, 150.0), egui::Vec2::ZERO);
        let geometry = OverlayGeometry::compute(bounds(), window, &OverlayConfig::default());

        assert_eq!(geometry.corner_radius, 0.0, "degenerate window clamps radius to zero");
        assert!(
            (band_area(&geometry) - bounds().area()).abs() < 0.5,
            "a zero-area window dims the whole view"
        );
        for points in &geometry.brackets {
            assert!(points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        }
    }

    #[test]
    fn test_window_outside_bounds_is_clipped() {
        let window = Rect::from_min_max(pos2(1000.0, 1000.0), pos2(1100.0, 1100.0));
        let geometry = OverlayGeometry::compute(bounds(), window, &OverlayConfig::default());
        assert_eq!(geometry.window.size(), egui::Vec2::ZERO);
        assert!(bounds().contains(geometry.window.min));
    }

    #[test]
    fn test_bracket_anchors_sit_half_a_stroke_outside() {
        let window = Rect::from_min_max(pos2(100.0, 100.0), pos2(300.0, 200.0));
        let config = OverlayConfig {
            corner_radius: 0.0,
            ..OverlayConfig::default()
        };
        let geometry = OverlayGeometry::compute(bounds(), window, &config);

        // With a zero radius the middle point of the upper-left bracket is
        // the anchor itself.
        let upper_left = &geometry.brackets[0];
        assert_eq!(upper_left[1], pos2(97.0, 97.0), "anchor is window.min minus half stroke");
        assert_eq!(upper_left[0], pos2(97.0, 97.0 + 20.0), "leg runs down the window edge");
        assert_eq!(upper_left[2], pos2(97.0 + 20.0, 97.0), "leg runs along the window edge");
    }

    #[test]
    fn test_bracket_arc_intrusion_is_bounded() {
        let window = Rect::from_min_max(pos2(100.0, 100.0), pos2(300.0, 200.0));
        let geometry = OverlayGeometry::compute(bounds(), window, &OverlayConfig::default());

        for (i, points) in geometry.brackets.iter().enumerate() {
            assert!(points.len() > 3, "bracket {i} should carry arc points");
        }
        // A rounded corner cuts the sharp corner, so the arc dips past the
        // window edge, but never deeper than its sagitta.
        let inset = window.shrink(geometry.corner_radius);
        assert!(
            geometry.brackets[0].iter().all(|p| !inset.contains(*p)),
            "no point reaches past the corner radius"
        );
        let max_intrusion =
            geometry.corner_radius * (1.0 - std::f32::consts::FRAC_1_SQRT_2);
        for p in &geometry.brackets[0] {
            let depth = (p.x - window.min.x).min(p.y - window.min.y);
            assert!(
                depth <= max_intrusion + 0.01,
                "arc cuts no deeper than its sagitta, got {depth}"
            );
        }
    }
}
