use std::f64::consts::PI;

/// Latitude limit of the Web Mercator square; poles are clipped to it.
pub const MERCATOR_MAX_LAT_DEG: f64 = 85.051_128_78;

/// Spherical Mercator projection into container pixels.
///
/// `scale` is the radius of the projected sphere in pixels and `translate`
/// the pixel position of (0°, 0°).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Mercator {
    pub scale: f64,
    pub translate: [f64; 2],
}

impl Mercator {
    pub const fn new(scale: f64, translate: [f64; 2]) -> Self {
        Self { scale, translate }
    }

    /// Projects longitude/latitude degrees to pixels (y grows downwards).
    pub fn project(&self, lon_deg: f64, lat_deg: f64) -> [f64; 2] {
        let lambda = lon_deg.to_radians();
        let phi = lat_deg
            .clamp(-MERCATOR_MAX_LAT_DEG, MERCATOR_MAX_LAT_DEG)
            .to_radians();
        let y = ((PI / 4.0) + (phi / 2.0)).tan().ln();
        [
            self.translate[0] + self.scale * lambda,
            self.translate[1] - self.scale * y,
        ]
    }

    /// Inverse of [`Mercator::project`].
    pub fn invert(&self, x: f64, y: f64) -> [f64; 2] {
        let lambda = (x - self.translate[0]) / self.scale;
        let t = (self.translate[1] - y) / self.scale;
        let phi = 2.0 * t.exp().atan() - PI / 2.0;
        [lambda.to_degrees(), phi.to_degrees()]
    }

    /// Horizontal pixel width of one full turn around the globe.
    pub fn world_width(&self) -> f64 {
        self.scale * 2.0 * PI
    }
}
