use proptest::prelude::*;

use sun_position::geometry::Geometry;
use sun_position::graphics::{Canvas, WHITE};
use sun_position::math::{distance, project_on_path, top_view_angle};
use sun_position::scene::Scene;
use sun_position::{HouseOrientation, SunState};

const EPS: f64 = 1e-6;

proptest! {
    #[test]
    fn side_view_stays_on_the_path(altitude in -90.0f64..=90.0) {
        let g = Geometry::default();
        let p = project_on_path(g.side.path_center, g.path_radius, altitude);
        prop_assert!((distance(p, g.side.path_center) - g.path_radius).abs() < EPS);
        // Nothing on the arc is higher than the zenith
        let top = project_on_path(g.side.path_center, g.path_radius, 90.0);
        prop_assert!(p[1] >= top[1] - EPS);
    }

    #[test]
    fn top_view_is_periodic(azimuth in 0.0f64..360.0, direction in 0.0f64..360.0) {
        let g = Geometry::default();
        let house = HouseOrientation(direction);
        let a = project_on_path(g.top.path_center, g.path_radius, top_view_angle(azimuth, house));
        let b = project_on_path(g.top.path_center, g.path_radius, top_view_angle(azimuth + 360.0, house));
        prop_assert!(distance(a, b) < EPS);
    }

    #[test]
    fn south_marker_ignores_the_sun(
        first in 0.0f64..360.0,
        second in 0.0f64..360.0,
        direction in 0.0f64..360.0,
    ) {
        let scene = Scene::new(Geometry::default(), HouseOrientation(direction));
        let mut canvas = Canvas::new(500, 700, WHITE);
        let a = scene.render(&SunState { altitude: 30.0, azimuth: first }, &mut canvas);
        let b = scene.render(&SunState { altitude: 30.0, azimuth: second }, &mut canvas);
        prop_assert_eq!(a.south_marker, b.south_marker);
    }
}

#[test]
fn zenith_due_south_for_reference_house() {
    let g = Geometry::default();
    let scene = Scene::new(g, HouseOrientation(165.0));
    let mut canvas = Canvas::new(g.width, g.height, WHITE);
    let placed = scene.render(
        &SunState {
            altitude: 90.0,
            azimuth: 180.0,
        },
        &mut canvas,
    );
    let [cx, cy] = g.side.path_center;
    assert!(distance(placed.side_sun, [cx, cy - g.path_radius]) < EPS);
    assert!((placed.top_angle - 15.0).abs() < EPS);
}

#[test]
fn horizon_is_level_with_path_center() {
    let g = Geometry::default();
    let p = project_on_path(g.side.path_center, g.path_radius, 0.0);
    assert!((p[1] - g.side.path_center[1]).abs() < EPS);
    assert!(p[0] < g.side.path_center[0]);
}
