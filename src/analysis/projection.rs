//! Web-Mercator projection and viewport math.
//!
//! Projected coordinates keep longitude on x and put the Mercator y in
//! "degree-like" units, so both axes share a scale and shapes keep the
//! proportions a slippy map would show.

use geo::{Coord, Rect, coord};

use crate::config::map::ViewportConfig;

/// Latitude where the Mercator square ends.
pub const MAX_LATITUDE: f64 = 85.051_128_78;

/// Zoom level at which the whole world (360° of longitude) spans the map width.
const WORLD_ZOOM: f64 = 2.0;

pub fn project(lon: f64, lat: f64) -> Coord<f64> {
    let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let y = (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln().to_degrees();
    coord! { x: lon, y: y }
}

/// Visible longitude span at `zoom`; halves with every level.
pub fn lon_span_at_zoom(zoom: f64) -> f64 {
    360.0 / 2f64.powf(zoom - WORLD_ZOOM)
}

fn centered(center: Coord<f64>, w: f64, h: f64) -> Rect<f64> {
    Rect::new(
        coord! { x: center.x - w / 2.0, y: center.y - h / 2.0 },
        coord! { x: center.x + w / 2.0, y: center.y + h / 2.0 },
    )
}

/// Projected bounds of a viewport centered on (`center_lat`, `center_lon`).
/// `aspect` is the map's height divided by its width.
pub fn viewport_bounds(viewport: &ViewportConfig, aspect: f64) -> Rect<f64> {
    let center = project(viewport.center_lon, viewport.center_lat);
    let w = lon_span_at_zoom(viewport.zoom);
    centered(center, w, w * aspect)
}

/// Bounds showing all of `target` plus `padding_pct` of its extent on every
/// side, widened along one axis until height/width equals `aspect`.
pub fn fit_bounds(target: &Rect<f64>, padding_pct: f64, aspect: f64) -> Rect<f64> {
    let mut w = (target.width() * (1.0 + 2.0 * padding_pct)).max(f64::EPSILON);
    let mut h = (target.height() * (1.0 + 2.0 * padding_pct)).max(f64::EPSILON);
    if h / w > aspect {
        w = h / aspect;
    } else {
        h = w * aspect;
    }
    centered(target.center(), w, h)
}

/// Smallest rectangle covering both.
pub fn union(a: &Rect<f64>, b: &Rect<f64>) -> Rect<f64> {
    Rect::new(
        coord! { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
        coord! { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn covers(outer: &Rect<f64>, inner: &Rect<f64>) -> bool {
        outer.min().x <= inner.min().x
            && outer.min().y <= inner.min().y
            && outer.max().x >= inner.max().x
            && outer.max().y >= inner.max().y
    }

    #[test]
    fn test_equator_and_longitude_passthrough() {
        assert_eq!(project(12.0, 0.0), coord! { x: 12.0, y: 0.0 });
        let p = project(-73.9, 40.7);
        assert_eq!(p.x, -73.9);
        // Mercator stretches latitude away from the equator
        assert!(p.y > 40.7 && p.y < 50.0);
    }

    #[test]
    fn test_mercator_square() {
        // The projected world is square: y at the max latitude is 180
        assert!((project(0.0, 90.0).y - 180.0).abs() < 1e-6);
    }

    #[test]
    fn test_initial_viewport_spans_world() {
        let viewport = ViewportConfig {
            center_lat: 20.0,
            center_lon: 0.0,
            zoom: 2.0,
            fit_padding_pct: 0.1,
        };
        let bounds = viewport_bounds(&viewport, 0.5);
        assert!((bounds.width() - 360.0).abs() < 1e-9);
        assert!((bounds.height() - 180.0).abs() < 1e-9);
        assert!(bounds.center().x.abs() < 1e-9);
        assert!((bounds.center().y - project(0.0, 20.0).y).abs() < 1e-9);
        assert!((lon_span_at_zoom(3.0) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_bounds_contains_target() {
        let target = Rect::new(project(-5.7, 50.0), project(1.7, 58.6));
        let fitted = fit_bounds(&target, 0.1, 0.5);
        assert!(covers(&fitted, &target));
        assert!((fitted.height() / fitted.width() - 0.5).abs() < 1e-9);
        assert_eq!(fitted.center(), target.center());
    }

    #[test]
    fn test_fit_bounds_pads_wide_target() {
        // 10 x 2 box, already wider than the aspect asks for
        let target = Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 2.0 });
        let fitted = fit_bounds(&target, 0.1, 0.1);
        assert!((fitted.width() - 12.0).abs() < 1e-9);
        assert!((fitted.height() - 2.4).abs() < 1e-9);
    }

    #[test]
    fn test_union() {
        let a = Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 1.0 });
        let b = Rect::new(coord! { x: 5.0, y: -2.0 }, coord! { x: 6.0, y: 0.5 });
        let u = union(&a, &b);
        assert_eq!(u.min(), coord! { x: 0.0, y: -2.0 });
        assert_eq!(u.max(), coord! { x: 6.0, y: 1.0 });
    }
}
