//! Fractal tree.
//!
//! Branches grow from the bottom centre. Each branch spawns two children at
//! its tip, shorter by the branch factor and turned by `±π / symmetry`.
//! The tree is grown from an explicit work stack and stops at branches
//! shorter than one pixel or at `MAX_DEPTH` levels, whichever comes first.

use log::warn;

use crate::basics::{PointD, PI};
use crate::params::ArtParams;
use crate::path_storage::PathStorage;
use crate::surface::{DrawingSurface, StrokeStyle};

use super::{hsl, Pattern};

/// Levels of branching, trunk included.
pub const MAX_DEPTH: u32 = 18;

/// Length ratio between a branch and its children.
pub fn branch_factor(complexity: u32) -> f64 {
    0.8 - complexity as f64 / 20.0
}

/// Stroke width of a branch of `length` pixels.
pub fn branch_width(complexity: u32, length: f64) -> f64 {
    (complexity as f64 / 10.0 * (length / 200.0)).max(1.0)
}

/// Hue in [0, 360) of a branch pointing at `angle` radians.
pub fn branch_hue(angle: f64) -> f64 {
    (angle / (2.0 * PI) * 360.0).rem_euclid(360.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Branch {
    pub start: PointD,
    pub end: PointD,
    pub length: f64,
    pub width: f64,
    pub hue: f64,
    pub depth: u32,
}

#[derive(Debug, Clone)]
pub struct FractalTree {
    pub branches: Vec<Branch>,
    /// Whether the depth cap cut off branches still longer than a pixel.
    pub truncated: bool,
    params: ArtParams,
}

pub fn build(width: f64, height: f64, params: &ArtParams) -> FractalTree {
    let factor = branch_factor(params.complexity);
    let spread = PI / params.symmetry as f64;

    let mut branches = Vec::new();
    let mut truncated = false;
    // (x, y, length, angle, depth)
    let mut stack = vec![(width / 2.0, height, height / 5.0, -PI / 2.0, 0u32)];

    while let Some((x, y, length, angle, depth)) = stack.pop() {
        if length < 1.0 {
            continue;
        }
        if depth >= MAX_DEPTH {
            truncated = true;
            continue;
        }
        let end = PointD::new(x + angle.cos() * length, y + angle.sin() * length);
        branches.push(Branch {
            start: PointD::new(x, y),
            end,
            length,
            width: branch_width(params.complexity, length),
            hue: branch_hue(angle),
            depth,
        });
        // Pushed in reverse so the left child is grown first.
        let child = length * factor;
        stack.push((end.x, end.y, child, angle + spread, depth + 1));
        stack.push((end.x, end.y, child, angle - spread, depth + 1));
    }

    if truncated {
        warn!(
            "fractal tree truncated at {} levels (complexity {})",
            MAX_DEPTH, params.complexity
        );
    }
    FractalTree {
        branches,
        truncated,
        params: *params,
    }
}

impl Pattern for FractalTree {
    fn primitive_count(&self) -> usize {
        self.branches.len()
    }

    fn paint(&self, surface: &mut DrawingSurface) {
        let mut path = PathStorage::new();
        for b in &self.branches {
            path.remove_all();
            path.move_to(b.start.x, b.start.y);
            path.line_to(b.end.x, b.end.y);
            let style = StrokeStyle::new(b.width, hsl(&self.params, b.hue, 50.0));
            surface.stroke_path(&mut path, &style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(complexity: u32, symmetry: u32) -> ArtParams {
        ArtParams {
            complexity,
            symmetry,
            ..ArtParams::default()
        }
    }

    #[test]
    fn test_branch_factor_range() {
        for c in 1..=10 {
            let f = branch_factor(c);
            assert!(f > 0.0 && f <= 0.76, "complexity {} -> {}", c, f);
        }
        assert!((branch_factor(1) - 0.75).abs() < 1e-12);
        assert!((branch_factor(10) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_trunk() {
        let tree = build(800.0, 600.0, &params(5, 6));
        let trunk = tree.branches[0];
        assert_eq!(trunk.start, PointD::new(400.0, 600.0));
        assert!((trunk.length - 120.0).abs() < 1e-12);
        assert!((trunk.end.x - 400.0).abs() < 1e-9);
        assert!((trunk.end.y - 480.0).abs() < 1e-9);
        assert!((trunk.hue - 270.0).abs() < 1e-9);
        assert_eq!(trunk.width, 1.0);
    }

    #[test]
    fn test_terminates_and_lengths_shrink() {
        for c in 1..=10 {
            let tree = build(800.0, 600.0, &params(c, 6));
            assert!(!tree.truncated);
            assert!(tree.branches.iter().all(|b| b.length >= 1.0));
            let f = branch_factor(c);
            for b in &tree.branches {
                let expected = 120.0 * f.powi(b.depth as i32);
                assert!((b.length - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_branch_count_is_full_binary_tree() {
        // Factor 0.3: 120, 36, 10.8, 3.24, 0.97 -> four levels.
        let tree = build(800.0, 600.0, &params(10, 6));
        assert_eq!(tree.branches.len(), 1 + 2 + 4 + 8);
    }

    #[test]
    fn test_depth_cap_bounds_the_tree() {
        // Complexity 0 gives factor 0.8, which needs more than 18 levels.
        let tree = build(800.0, 600.0, &params(0, 6));
        assert!(tree.truncated);
        assert!(tree.branches.iter().all(|b| b.depth < MAX_DEPTH));
        assert_eq!(tree.branches.len(), (1 << MAX_DEPTH) - 1);
    }

    #[test]
    fn test_preorder_left_first() {
        let tree = build(800.0, 600.0, &params(10, 4));
        let first_child = tree.branches[1];
        assert_eq!(first_child.depth, 1);
        // Angle -π/2 - π/4 points up and to the left.
        assert!(first_child.end.x < first_child.start.x);
    }

    #[test]
    fn test_hue_normalized() {
        assert!((branch_hue(-PI / 2.0) - 270.0).abs() < 1e-9);
        assert!((branch_hue(0.0)).abs() < 1e-9);
        assert!((branch_hue(5.0 * PI) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_width_formula() {
        assert_eq!(branch_width(5, 120.0), 1.0);
        assert!((branch_width(10, 400.0) - 2.0).abs() < 1e-12);
    }
}
