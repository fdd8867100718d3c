/// Reference canvas width in pixels
pub const CANVAS_WIDTH: usize = 500;
/// Reference canvas height in pixels, both panels stacked
pub const CANVAS_HEIGHT: usize = 700;

const HOUSE_SIZE: usize = 90;
const ROOF_HEIGHT: usize = 18;
const SUN_RADIUS: f64 = 15.0;
const RAY_LENGTH: f64 = 5.0;
const SUN_PATH_RADIUS: f64 = 200.0;

/// Fixed placement of one diagram panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewGeometry {
    /// Center of the circular sun path
    pub path_center: [f64; 2],
    /// Top-left corner of the house outline
    pub house_origin: [f64; 2],
}

/// Sizes and positions shared by both panels, computed once at startup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub width: usize,
    pub height: usize,
    pub house_size: f64,
    pub roof_height: f64,
    pub sun_radius: f64,
    pub ray_length: f64,
    pub path_radius: f64,
    /// Elevation view, driven by altitude
    pub side: ViewGeometry,
    /// Plan view, driven by azimuth relative to the house
    pub top: ViewGeometry,
}

impl Geometry {
    pub fn new(width: usize, height: usize) -> Self {
        // Integer placement keeps outlines on whole pixels
        let house_x = width.saturating_sub(HOUSE_SIZE) / 2;
        let house_y_side = height.saturating_sub(HOUSE_SIZE + 30);
        let house_y_top = (height / 2).saturating_sub(HOUSE_SIZE / 2 + 80);
        let center_x = (width / 2) as f64;

        Geometry {
            width,
            height,
            house_size: HOUSE_SIZE as f64,
            roof_height: ROOF_HEIGHT as f64,
            sun_radius: SUN_RADIUS,
            ray_length: RAY_LENGTH,
            path_radius: SUN_PATH_RADIUS,
            side: ViewGeometry {
                path_center: [center_x, house_y_side as f64],
                house_origin: [house_x as f64, house_y_side as f64],
            },
            top: ViewGeometry {
                path_center: [center_x, (house_y_top + HOUSE_SIZE / 2) as f64],
                house_origin: [house_x as f64, house_y_top as f64],
            },
        }
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry::new(CANVAS_WIDTH, CANVAS_HEIGHT)
    }
}
