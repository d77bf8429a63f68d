//! Deterministic demo scene: a row of LOD objects and a viewpoint flying past.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use vista_config::DemoConfig;

/// Coverage fractions levels are drawn from, most detailed first.
const COVERAGES: [f32; 6] = [0.6, 0.3, 0.12, 0.05, 0.02, 0.008];

/// Simulated frame length in seconds.
pub const FRAME_SECONDS: f32 = 1.0 / 60.0;

/// One object of the scene before it is registered anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub position: Vec3,
    pub size: f32,
    pub coverages: Vec<f32>,
}

/// Lay out `object_count` objects along +X with random sizes and level counts.
///
/// Some objects get six levels so the level cap is exercised.
pub fn build_scene(demo: &DemoConfig, seed: u64) -> Vec<SceneObject> {
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
    (0..demo.object_count)
        .map(|i| {
            let levels = rng.gen_range(1..=COVERAGES.len());
            SceneObject {
                position: Vec3::new(i as f32 * demo.spacing, 0.0, rng.gen_range(-5.0..5.0)),
                size: rng.gen_range(0.5..4.0),
                coverages: COVERAGES[..levels].to_vec(),
            }
        })
        .collect()
}

/// Viewpoint for frame `tick` (1-based), or `None` during a blackout.
pub fn viewpoint_at(demo: &DemoConfig, tick: u32) -> Option<Vec3> {
    if demo.blackout_ticks.contains(&tick) {
        return None;
    }
    let travelled = demo.viewpoint_speed * FRAME_SECONDS * tick as f32;
    Some(Vec3::new(-demo.spacing + travelled, 2.0, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_is_deterministic() {
        let demo = DemoConfig::default();
        assert_eq!(build_scene(&demo, 7), build_scene(&demo, 7));
    }

    #[test]
    fn test_scene_layout() {
        let demo = DemoConfig {
            object_count: 4,
            spacing: 10.0,
            ..Default::default()
        };
        let scene = build_scene(&demo, 1);
        assert_eq!(scene.len(), 4);
        assert_eq!(scene[3].position.x, 30.0);
        for object in &scene {
            assert!(!object.coverages.is_empty());
            assert!(object.size >= 0.5 && object.size < 4.0);
        }
    }

    #[test]
    fn test_blackout_has_no_viewpoint() {
        let demo = DemoConfig {
            blackout_ticks: vec![2],
            ..Default::default()
        };
        assert!(viewpoint_at(&demo, 1).is_some());
        assert!(viewpoint_at(&demo, 2).is_none());
    }

    #[test]
    fn test_viewpoint_moves_forward() {
        let demo = DemoConfig::default();
        let a = viewpoint_at(&demo, 1).unwrap();
        let b = viewpoint_at(&demo, 60).unwrap();
        assert!(b.x > a.x);
        assert!((b.x - a.x - demo.viewpoint_speed * 59.0 / 60.0).abs() < 1e-3);
    }
}
