//! Pointer to normalized device coordinate mapping

/// A pointer position in normalized device coordinates
///
/// `x` runs from -1 (left edge) to 1 (right edge), `y` from -1 (bottom) to
/// 1 (top).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ndc {
    pub x: f32,
    pub y: f32,
}

impl Ndc {
    pub const CENTER: Ndc = Ndc { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Map window-space pointer coordinates to NDC
///
/// `ndc_x = (x / width) * 2 - 1`, `ndc_y = -(y / height) * 2 + 1`.
pub fn map(client_x: f64, client_y: f64, width: f64, height: f64) -> Ndc {
    Ndc {
        x: ((client_x / width) * 2.0 - 1.0) as f32,
        y: (-(client_y / height) * 2.0 + 1.0) as f32,
    }
}

/// Current size of the render surface in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    /// Each side is clamped to at least one pixel so mapping stays finite
    /// while the window is minimised.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Map a pointer position inside this viewport to NDC
    pub fn to_ndc(&self, x: f64, y: f64) -> Ndc {
        map(x, y, self.width as f64, self.height as f64)
    }
}

/// Last known pointer positions
///
/// `click` is captured once per pick attempt; `movement` follows every
/// pointer move and drives live drag tracking.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerState {
    pub click: Ndc,
    pub movement: Ndc,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_corners_map_to_ndc_extremes() {
        let viewport = Viewport::new(1200, 800);
        assert_eq!(viewport.to_ndc(0.0, 0.0), Ndc::new(-1.0, 1.0));
        assert_eq!(viewport.to_ndc(1200.0, 800.0), Ndc::new(1.0, -1.0));
        assert_eq!(viewport.to_ndc(600.0, 400.0), Ndc::CENTER);
    }

    #[test]
    fn test_points_inside_viewport_stay_in_range() {
        let mut rng = rand::rng();
        for _ in 0..1000 {
            let width = rng.random_range(1..4000u32);
            let height = rng.random_range(1..4000u32);
            let viewport = Viewport::new(width, height);
            let x = rng.random_range(0.0..=width as f64);
            let y = rng.random_range(0.0..=height as f64);

            let ndc = viewport.to_ndc(x, y);
            assert!((-1.0..=1.0).contains(&ndc.x), "x out of range: {ndc:?}");
            assert!((-1.0..=1.0).contains(&ndc.y), "y out of range: {ndc:?}");
        }
    }

    #[test]
    fn test_mapping_follows_live_viewport_size() {
        let before = Viewport::new(800, 600).to_ndc(400.0, 300.0);
        let after = Viewport::new(1600, 600).to_ndc(400.0, 300.0);
        assert_eq!(before, Ndc::CENTER);
        assert_eq!(after, Ndc::new(-0.5, 0.0));
    }

    #[test]
    fn test_zero_sized_viewport_is_clamped() {
        let viewport = Viewport::new(0, 0);
        assert_eq!((viewport.width(), viewport.height()), (1, 1));
        let ndc = viewport.to_ndc(0.0, 0.0);
        assert!(ndc.x.is_finite() && ndc.y.is_finite());
    }
}
