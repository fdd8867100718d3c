use crate::geometry::{Geometry, ViewGeometry};
use crate::graphics::{Canvas, BLACK, GRAY, ORANGE};
use crate::math::{format_angle, project_on_path, ray_segments, south_marker_angle, top_view_angle};
use crate::state::{HouseOrientation, SunState};

const STROKE: usize = 2;

/// Where the moving parts of the last frame were placed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Sun center in the elevation view
    pub side_sun: [f64; 2],
    /// Sun center in the plan view
    pub top_sun: [f64; 2],
    /// Angle fed to the plan view projection
    pub top_angle: f64,
    /// South marker anchor in the plan view
    pub south_marker: [f64; 2],
}

/// Draws both diagram panels for a given sun position
pub struct Scene {
    geometry: Geometry,
    orientation: HouseOrientation,
}

impl Scene {
    pub fn new(geometry: Geometry, orientation: HouseOrientation) -> Self {
        Scene {
            geometry,
            orientation,
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Composes a full frame: elevation view first, then plan view
    pub fn render(&self, sun: &SunState, canvas: &mut Canvas) -> Placement {
        let g = &self.geometry;
        canvas.clear();

        // Side view
        self.draw_house_side(canvas);
        let side_sun = project_on_path(g.side.path_center, g.path_radius, sun.altitude);
        self.draw_sun(canvas, side_sun);
        canvas.draw_line(side_sun, g.side.path_center, GRAY, STROKE);
        self.draw_angle_text(canvas, &g.side, sun.altitude);

        // Top view
        self.draw_house_top(canvas);
        let top_angle = top_view_angle(sun.azimuth, self.orientation);
        let top_sun = project_on_path(g.top.path_center, g.path_radius, top_angle);
        self.draw_sun(canvas, top_sun);
        canvas.draw_line(top_sun, g.top.path_center, GRAY, STROKE);
        self.draw_angle_text(canvas, &g.top, sun.azimuth);
        let south_marker = self.south_marker();
        canvas.draw_text([south_marker[0] + 10.0, south_marker[1] - 10.0], "S", GRAY);

        Placement {
            side_sun,
            top_sun,
            top_angle,
            south_marker,
        }
    }

    /// South reference point in the plan view, fixed by the house orientation
    pub fn south_marker(&self) -> [f64; 2] {
        let g = &self.geometry;
        project_on_path(
            g.top.path_center,
            g.path_radius,
            south_marker_angle(self.orientation),
        )
    }

    /// Square walls with a triangular roof
    fn draw_house_side(&self, canvas: &mut Canvas) {
        let g = &self.geometry;
        let [x, y] = g.side.house_origin;
        let size = g.house_size;
        canvas.stroke_rect([x, y], [size, size], BLACK, STROKE);
        canvas.stroke_polygon(
            &[
                [x, y],
                [x + size, y],
                [(g.width / 2) as f64, y - g.roof_height],
            ],
            BLACK,
            STROKE,
        );
    }

    /// Two roof panels seen from above
    fn draw_house_top(&self, canvas: &mut Canvas) {
        let g = &self.geometry;
        let [x, y] = g.top.house_origin;
        let half = g.house_size / 2.0;
        canvas.stroke_rect([x, y], [half, g.house_size], BLACK, STROKE);
        canvas.stroke_rect([x + half - 2.0, y], [half, g.house_size], BLACK, STROKE);
    }

    fn draw_sun(&self, canvas: &mut Canvas, center: [f64; 2]) {
        let g = &self.geometry;
        canvas.fill_circle(center, g.sun_radius, ORANGE);
        for [start, end] in ray_segments(center, g.sun_radius, g.ray_length) {
            canvas.draw_line(start, end, ORANGE, STROKE);
        }
    }

    fn draw_angle_text(&self, canvas: &mut Canvas, view: &ViewGeometry, angle: f64) {
        let g = &self.geometry;
        let [x, y] = view.house_origin;
        let position = [x - (g.house_size / 2.0).floor() + 20.0, y - 30.0];
        canvas.draw_text(position, format_angle(angle), GRAY);
    }
}
