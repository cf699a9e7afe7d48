//! Obstacle collision resolution
//!
//! Tests a 3D point (the disc) against heterogeneous obstacle volumes:
//! plain AABBs for box scenery, shrunk AABBs for bushes and rocks, an
//! expanded AABB for portals, and a trunk-cylinder + foliage-cone pair
//! for trees. Ground-layer terrain never collides.
//!
//! Obstacles are evaluated in list order and the first positive hit wins.
//! This is carried over from the original course format as a documented
//! behavior, not a physical priority: overlapping volumes are masked by
//! iteration order, not by distance.

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Whether a portal throws the session outward or returns it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortalKind {
    /// Navigates to `target_url` carrying encoded player/disc state
    Exit,
    /// Navigates straight back to the stored return reference
    Entry,
}

/// Portal behavior attached to a portal obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalSpec {
    pub kind: PortalKind,
    /// Destination for exit portals
    pub target_url: Option<String>,
    /// Return token carried by entry portals
    pub return_ref: Option<String>,
}

/// Closed set of obstacle shapes. The vocabulary is fixed by the course
/// format, so shape dispatch is a pattern match rather than a registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Terrain shading only (fairway/rough/path/water/sand); never collides
    GroundLayer,
    /// Box scenery: plain AABB
    Scenery { half_extents: Vec3 },
    /// Trunk cylinder topped by an inverted-cone foliage volume.
    /// Dimensions are pre-scaled; the point is rotated into local space.
    Tree {
        trunk_radius: f32,
        trunk_height: f32,
        foliage_radius: f32,
        foliage_height: f32,
    },
    /// AABB shrunk to 40% footprint, only solid near the ground
    Bush { half_extents: Vec3 },
    /// AABB shrunk to 70% footprint, solid at any height
    Rock { half_extents: Vec3 },
    /// AABB expanded by a fixed margin; hits flag `is_portal`
    Portal { half_extents: Vec3, spec: PortalSpec },
}

/// A placed course obstacle. Immutable during play except visibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Hitbox center
    pub position: Vec3,
    /// Euler rotation in radians (only trees use it for collision)
    pub rotation: Vec3,
    pub visible: bool,
}

impl Obstacle {
    pub fn new(id: u32, kind: ObstacleKind, position: Vec3) -> Self {
        Self {
            id,
            kind,
            position,
            rotation: Vec3::ZERO,
            visible: true,
        }
    }

    pub fn is_portal(&self) -> bool {
        matches!(self.kind, ObstacleKind::Portal { .. })
    }

    pub fn portal_spec(&self) -> Option<&PortalSpec> {
        match &self.kind {
            ObstacleKind::Portal { spec, .. } => Some(spec),
            _ => None,
        }
    }
}

/// Result of a resolution pass. Ephemeral; produced and consumed in one tick.
#[derive(Debug, Clone)]
pub struct CollisionHit {
    pub collided: bool,
    pub point: Vec3,
    /// Index of the hit obstacle in the tested slice
    pub obstacle: Option<usize>,
    pub is_portal: bool,
}

impl CollisionHit {
    pub fn miss(point: Vec3) -> Self {
        Self {
            collided: false,
            point,
            obstacle: None,
            is_portal: false,
        }
    }
}

/// Test a point against the obstacle list, first hit in list order wins
pub fn resolve(point: Vec3, obstacles: &[Obstacle]) -> CollisionHit {
    for (index, obstacle) in obstacles.iter().enumerate() {
        if !obstacle.visible {
            continue;
        }
        let hit = match &obstacle.kind {
            ObstacleKind::GroundLayer => false,
            ObstacleKind::Scenery { half_extents } => {
                point_in_aabb(point, obstacle.position, *half_extents)
            }
            ObstacleKind::Portal { half_extents, .. } => point_in_aabb(
                point,
                obstacle.position,
                *half_extents + Vec3::splat(PORTAL_MARGIN),
            ),
            ObstacleKind::Bush { half_extents } => {
                point.y < BUSH_MAX_HEIGHT
                    && point_in_shrunk_aabb(
                        point,
                        obstacle.position,
                        *half_extents,
                        BUSH_FOOTPRINT_SCALE,
                    )
            }
            ObstacleKind::Rock { half_extents } => point_in_shrunk_aabb(
                point,
                obstacle.position,
                *half_extents,
                ROCK_FOOTPRINT_SCALE,
            ),
            ObstacleKind::Tree {
                trunk_radius,
                trunk_height,
                foliage_radius,
                foliage_height,
            } => point_in_tree(
                point,
                obstacle,
                *trunk_radius,
                *trunk_height,
                *foliage_radius,
                *foliage_height,
            ),
        };
        if hit {
            return CollisionHit {
                collided: true,
                point,
                obstacle: Some(index),
                is_portal: obstacle.is_portal(),
            };
        }
    }
    CollisionHit::miss(point)
}

/// Plain AABB containment about a center
fn point_in_aabb(point: Vec3, center: Vec3, half: Vec3) -> bool {
    let d = point - center;
    d.x.abs() <= half.x && d.y.abs() <= half.y && d.z.abs() <= half.z
}

/// AABB with the xz footprint shrunk about its center, full height kept
fn point_in_shrunk_aabb(point: Vec3, center: Vec3, half: Vec3, footprint: f32) -> bool {
    let shrunk = Vec3::new(half.x * footprint, half.y, half.z * footprint);
    point_in_aabb(point, center, shrunk)
}

/// Trunk cylinder or foliage cone hit, in obstacle-local space.
/// The trunk spans local height [0, trunk_height]; foliage sits on top,
/// its radius shrinking linearly from base to tip.
fn point_in_tree(
    point: Vec3,
    obstacle: &Obstacle,
    trunk_radius: f32,
    trunk_height: f32,
    foliage_radius: f32,
    foliage_height: f32,
) -> bool {
    let rot = Quat::from_euler(
        EulerRot::XYZ,
        obstacle.rotation.x,
        obstacle.rotation.y,
        obstacle.rotation.z,
    );
    let local = rot.inverse() * (point - obstacle.position);
    let radial = (local.x * local.x + local.z * local.z).sqrt();

    // Trunk cylinder
    if local.y >= 0.0 && local.y <= trunk_height && radial <= trunk_radius {
        return true;
    }

    // Foliage cone (inverted: widest at the base)
    if foliage_height > 0.0 {
        let foliage_y = local.y - trunk_height;
        if foliage_y >= 0.0 && foliage_y <= foliage_height {
            let t = foliage_y / foliage_height;
            let radius_at = foliage_radius * (1.0 - t);
            if radial <= radius_at {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rock(id: u32, position: Vec3, half: Vec3) -> Obstacle {
        Obstacle::new(id, ObstacleKind::Rock { half_extents: half }, position)
    }

    fn tree(id: u32, position: Vec3) -> Obstacle {
        Obstacle::new(
            id,
            ObstacleKind::Tree {
                trunk_radius: 0.2,
                trunk_height: 1.5,
                foliage_radius: 1.0,
                foliage_height: 2.0,
            },
            position,
        )
    }

    fn portal(id: u32, position: Vec3) -> Obstacle {
        Obstacle::new(
            id,
            ObstacleKind::Portal {
                half_extents: Vec3::new(0.6, 1.0, 0.15),
                spec: PortalSpec {
                    kind: PortalKind::Exit,
                    target_url: Some("https://next.example/".into()),
                    return_ref: None,
                },
            },
            position,
        )
    }

    #[test]
    fn rock_shrink_rule_boundary() {
        let obstacles = [rock(1, Vec3::ZERO, Vec3::splat(1.0))];

        // Center always hits
        assert!(resolve(Vec3::ZERO, &obstacles).collided);
        // 69% of the half-extent: inside the 70% footprint
        assert!(resolve(Vec3::new(0.69, 0.0, 0.0), &obstacles).collided);
        // 71%: outside
        assert!(!resolve(Vec3::new(0.71, 0.0, 0.0), &obstacles).collided);
        // Full height is kept: only the footprint shrinks
        assert!(resolve(Vec3::new(0.0, 0.99, 0.0), &obstacles).collided);
    }

    #[test]
    fn bush_only_collides_near_ground() {
        let bush = Obstacle::new(
            2,
            ObstacleKind::Bush { half_extents: Vec3::new(1.0, 0.5, 1.0) },
            Vec3::ZERO,
        );
        let obstacles = [bush];

        assert!(resolve(Vec3::new(0.1, 0.1, 0.1), &obstacles).collided);
        // Above the low threshold the bush is fly-through
        assert!(!resolve(Vec3::new(0.1, 0.35, 0.1), &obstacles).collided);
        // 40% footprint: half extent 1.0 shrinks to 0.4
        assert!(!resolve(Vec3::new(0.5, 0.1, 0.0), &obstacles).collided);
        assert!(resolve(Vec3::new(0.35, 0.1, 0.0), &obstacles).collided);
    }

    #[test]
    fn portal_aabb_expanded_by_margin() {
        let obstacles = [portal(3, Vec3::ZERO)];

        // Outside the raw box but within the 0.5 margin
        let hit = resolve(Vec3::new(1.0, 0.0, 0.0), &obstacles);
        assert!(hit.collided);
        assert!(hit.is_portal);
        // Beyond margin
        assert!(!resolve(Vec3::new(1.2, 0.0, 0.0), &obstacles).collided);
    }

    #[test]
    fn tree_trunk_and_foliage_volumes() {
        let obstacles = [tree(4, Vec3::ZERO)];

        // Inside trunk
        assert!(resolve(Vec3::new(0.1, 0.5, 0.0), &obstacles).collided);
        // Beside trunk, below foliage
        assert!(!resolve(Vec3::new(0.5, 0.5, 0.0), &obstacles).collided);
        // Foliage base is wide (radius 1.0 at y=1.5)
        assert!(resolve(Vec3::new(0.9, 1.6, 0.0), &obstacles).collided);
        // Near the tip the cone has shrunk (radius 0.1 at y=3.3)
        assert!(!resolve(Vec3::new(0.5, 3.3, 0.0), &obstacles).collided);
        assert!(resolve(Vec3::new(0.05, 3.3, 0.0), &obstacles).collided);
        // Above the tip
        assert!(!resolve(Vec3::new(0.0, 3.6, 0.0), &obstacles).collided);
    }

    #[test]
    fn rotated_tree_tests_in_local_space() {
        let mut leaning = tree(5, Vec3::ZERO);
        // Lean 90° about z: the trunk now extends along -x
        leaning.rotation = Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2);
        let obstacles = [leaning];

        assert!(resolve(Vec3::new(-1.0, 0.0, 0.0), &obstacles).collided);
        assert!(!resolve(Vec3::new(0.0, 1.0, 0.0), &obstacles).collided);
    }

    #[test]
    fn ground_layers_never_collide() {
        let fairway = Obstacle::new(6, ObstacleKind::GroundLayer, Vec3::ZERO);
        assert!(!resolve(Vec3::ZERO, &[fairway]).collided);
    }

    #[test]
    fn invisible_obstacles_are_skipped() {
        let mut hidden = rock(7, Vec3::ZERO, Vec3::splat(1.0));
        hidden.visible = false;
        assert!(!resolve(Vec3::ZERO, &[hidden]).collided);
    }

    #[test]
    fn first_match_in_list_order_wins() {
        // A portal fully inside a rock's shrunk box is masked by order
        let obstacles = [rock(1, Vec3::ZERO, Vec3::splat(2.0)), portal(2, Vec3::ZERO)];
        let hit = resolve(Vec3::ZERO, &obstacles);
        assert!(hit.collided);
        assert_eq!(hit.obstacle, Some(0));
        assert!(!hit.is_portal);

        let reversed = [portal(2, Vec3::ZERO), rock(1, Vec3::ZERO, Vec3::splat(2.0))];
        assert!(resolve(Vec3::ZERO, &reversed).is_portal);
    }

    #[test]
    fn miss_reports_not_collided() {
        let hit = resolve(Vec3::splat(50.0), &[rock(1, Vec3::ZERO, Vec3::ONE)]);
        assert!(!hit.collided);
        assert!(hit.obstacle.is_none());
        assert!(!hit.is_portal);
    }
}
