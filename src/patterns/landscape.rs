//! Layered landscape: sky, sun and mountain ridges painted back to front.

use rand::Rng;

use crate::basics::{PointD, PI};
use crate::comp_op::CompOp;
use crate::ellipse::Ellipse;
use crate::params::ArtParams;
use crate::path_storage::PathStorage;
use crate::surface::{DrawingSurface, Paint};

use super::{hsl, Pattern};

pub const SKY_HUE: f64 = 200.0;
/// Horizontal distance between profile samples, in pixels.
pub const PROFILE_STEP: f64 = 5.0;

/// One mountain silhouette. The profile runs left to right across the
/// whole surface; the polygon is closed along the bottom edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Ridge {
    pub profile: Vec<PointD>,
    pub hue: f64,
    pub lightness: f64,
}

#[derive(Debug, Clone)]
pub struct Landscape {
    pub width: f64,
    pub height: f64,
    pub sun_center: PointD,
    pub sun_radius: f64,
    /// Back to front.
    pub ridges: Vec<Ridge>,
    params: ArtParams,
}

/// Lightness of ridge `index` out of `layers`; the farthest is lightest.
pub fn ridge_lightness(index: u32, layers: u32) -> f64 {
    70.0 - 45.0 * (index + 1) as f64 / (layers + 1) as f64
}

pub fn build<R: Rng>(width: f64, height: f64, params: &ArtParams, rng: &mut R) -> Landscape {
    let frequency = 0.01 * params.curvature as f64;
    let jitter = params.complexity as f64;
    let samples = (width / PROFILE_STEP).ceil().max(0.0) as usize;

    let ridges = (0..params.layers)
        .map(|i| {
            let depth = (i + 1) as f64 / (params.layers + 1) as f64;
            let base = height * (0.4 + 0.45 * depth);
            let amplitude = height * 0.12 * (1.0 - depth * 0.5);
            let phase = rng.gen::<f64>() * 2.0 * PI;
            let profile = (0..=samples)
                .map(|s| {
                    let x = (s as f64 * PROFILE_STEP).min(width);
                    let noise = (rng.gen::<f64>() - 0.5) * jitter;
                    PointD::new(x, base + (x * frequency + phase).sin() * amplitude + noise)
                })
                .collect();
            Ridge {
                profile,
                hue: 140.0 - 20.0 * i as f64,
                lightness: ridge_lightness(i, params.layers),
            }
        })
        .collect();

    Landscape {
        width,
        height,
        sun_center: PointD::new(width * 0.8, height * 0.2),
        sun_radius: width.min(height) * 0.08,
        ridges,
        params: *params,
    }
}

impl Landscape {
    fn paint_sky(&self, surface: &mut DrawingSurface) {
        let p = &self.params;
        let sky = Paint::linear(
            0.0,
            0.0,
            0.0,
            self.height,
            &[(0.0, hsl(p, SKY_HUE, 60.0)), (1.0, hsl(p, SKY_HUE, 85.0))],
        );
        surface.fill_rect(0.0, 0.0, self.width, self.height, &sky);
    }

    fn paint_sun(&self, surface: &mut DrawingSurface) {
        let c = self.sun_center;
        let glow = Paint::radial(
            c.x,
            c.y,
            0.0,
            self.sun_radius,
            &[(0.0, hsl(&self.params, 55.0, 90.0)), (1.0, hsl(&self.params, 40.0, 60.0))],
        );
        let mut disc = Ellipse::circle(c.x, c.y, self.sun_radius);
        surface.fill_path(&mut disc, &glow, CompOp::SrcOver);
    }
}

impl Pattern for Landscape {
    fn primitive_count(&self) -> usize {
        2 + self.ridges.len()
    }

    fn paint(&self, surface: &mut DrawingSurface) {
        self.paint_sky(surface);
        self.paint_sun(surface);
        let mut path = PathStorage::new();
        for ridge in &self.ridges {
            path.remove_all();
            let mut outline: Vec<(f64, f64)> = ridge.profile.iter().map(|p| (p.x, p.y)).collect();
            outline.push((self.width, self.height));
            outline.push((0.0, self.height));
            path.add_polygon(&outline);
            let fill = Paint::Solid(hsl(&self.params, ridge.hue, ridge.lightness));
            surface.fill_path(&mut path, &fill, CompOp::SrcOver);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn landscape(layers: u32, seed: u64) -> Landscape {
        let params = ArtParams {
            layers,
            ..ArtParams::default()
        };
        build(400.0, 300.0, &params, &mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_layer_count() {
        for layers in 0..=5 {
            assert_eq!(landscape(layers, 1).ridges.len() as u32, layers);
        }
    }

    #[test]
    fn test_back_layers_lighter() {
        let l = landscape(4, 2);
        assert!(l.ridges.windows(2).all(|w| w[0].lightness > w[1].lightness));
        // Nearer ridges sit lower on average.
        let mean = |r: &Ridge| r.profile.iter().map(|p| p.y).sum::<f64>() / r.profile.len() as f64;
        assert!(mean(&l.ridges[0]) < mean(&l.ridges[3]));
    }

    #[test]
    fn test_profile_spans_width() {
        let l = landscape(3, 3);
        for r in &l.ridges {
            assert_eq!(r.profile.first().map(|p| p.x), Some(0.0));
            assert_eq!(r.profile.last().map(|p| p.x), Some(400.0));
            assert_eq!(r.profile.len(), 81);
            assert!(r.profile.windows(2).all(|w| (w[1].x - w[0].x - PROFILE_STEP).abs() < 1e-9));
        }
    }

    #[test]
    fn test_sun_placement() {
        let l = landscape(1, 0);
        assert_eq!(l.sun_center, PointD::new(320.0, 60.0));
        assert!((l.sun_radius - 24.0).abs() < 1e-12);
    }

    #[test]
    fn test_seeded_reproducibly() {
        assert_eq!(landscape(3, 9).ridges, landscape(3, 9).ridges);
        assert_ne!(landscape(3, 9).ridges, landscape(3, 10).ridges);
    }

    #[test]
    fn test_paint_sky_gradient_and_full_cover() {
        let l = landscape(2, 5);
        let mut s = DrawingSurface::new(400, 300).unwrap();
        l.paint(&mut s);
        assert_eq!(s.painted_pixels(), 400 * 300);
        let top = s.pixel(10, 0);
        assert_eq!(top.a, 255);
        // Sky above the sun is bluish, the bottom row is ridge.
        assert!(top.b > top.r);
        let bottom = s.pixel(10, 299);
        assert!(bottom.g > bottom.r);
    }
}
