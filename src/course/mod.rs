//! Course and hole model
//!
//! A course is an ordered list of holes plus the terrain obstacle list
//! built from the on-disk descriptor format. Terrain loads once per
//! course and is immutable during play except for visibility flags.

pub mod persistence;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::sim::collision::{Obstacle, ObstacleKind, PortalKind, PortalSpec};

/// `{x, y, z}` object form used throughout the course JSON
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Xyz {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Xyz> for Vec3 {
    fn from(v: Xyz) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

impl From<Vec3> for Xyz {
    fn from(v: Vec3) -> Self {
        Xyz { x: v.x, y: v.y, z: v.z }
    }
}

fn unit_xyz() -> Xyz {
    Xyz { x: 1.0, y: 1.0, z: 1.0 }
}

/// One placed terrain entry as authored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainDescriptor {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub position: Xyz,
    #[serde(default)]
    pub rotation: Xyz,
    #[serde(default = "unit_xyz")]
    pub scale: Xyz,
    #[serde(default)]
    pub properties: Value,
    #[serde(default, rename = "visualProperties")]
    pub visual_properties: Value,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One scoring unit of the course
#[derive(Debug, Clone)]
pub struct Hole {
    pub tee: Vec3,
    pub target: Vec3,
    pub par: u32,
}

/// Serialized hole form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoleDef {
    pub tee: Xyz,
    pub target: Xyz,
    pub par: u32,
}

/// On-disk course format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseFile {
    pub name: String,
    pub holes: Vec<HoleDef>,
    pub terrain: Vec<TerrainDescriptor>,
}

/// Runtime course: holes advance monotonically, terrain stays put
#[derive(Debug, Clone)]
pub struct Course {
    pub name: String,
    pub holes: Vec<Hole>,
    /// Current hole index
    pub current: usize,
    pub obstacles: Vec<Obstacle>,
}

impl Course {
    /// Build a playable course from the on-disk format. Unknown terrain
    /// types are skipped with a warning; a course without holes gets a
    /// single placeholder so the simulation stays consistent.
    pub fn from_file(file: &CourseFile) -> Self {
        let mut holes: Vec<Hole> = file
            .holes
            .iter()
            .map(|h| Hole {
                tee: h.tee.into(),
                target: h.target.into(),
                par: h.par,
            })
            .collect();
        if holes.is_empty() {
            log::warn!("Course '{}' has no holes; using a placeholder", file.name);
            holes.push(Hole {
                tee: Vec3::ZERO,
                target: Vec3::new(0.0, 0.0, -15.0),
                par: 3,
            });
        }

        let obstacles = file
            .terrain
            .iter()
            .filter_map(obstacle_from_descriptor)
            .collect();

        Self {
            name: file.name.clone(),
            holes,
            current: 0,
            obstacles,
        }
    }

    pub fn current_hole(&self) -> &Hole {
        &self.holes[self.current]
    }

    pub fn has_next_hole(&self) -> bool {
        self.current + 1 < self.holes.len()
    }

    /// Move to the next hole; false once the course is exhausted
    pub fn advance_hole(&mut self) -> bool {
        if self.has_next_hole() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Back to the first hole (new session)
    pub fn reset(&mut self) {
        self.current = 0;
    }

    /// Small built-in course for the demo binary and tests
    pub fn demo() -> Self {
        let mk = |x: f32, z: f32| Xyz { x, y: 0.0, z };
        Course::from_file(&CourseFile {
            name: "Backyard Links".into(),
            holes: vec![
                HoleDef { tee: mk(0.0, 0.0), target: mk(0.0, 20.0), par: 3 },
                HoleDef { tee: mk(5.0, 22.0), target: mk(24.0, 28.0), par: 4 },
            ],
            terrain: vec![
                descriptor(1, "fairway", mk(0.0, 10.0), mk(8.0, 30.0)),
                descriptor(2, "tree", mk(-3.0, 8.0), Xyz { x: 1.0, y: 1.2, z: 1.0 }),
                descriptor(3, "rock", mk(2.5, 14.0), unit_xyz()),
                descriptor(4, "bush", mk(-1.5, 17.0), unit_xyz()),
                descriptor(5, "tree", mk(14.0, 31.0), unit_xyz()),
            ],
        })
    }
}

fn descriptor(id: u32, kind: &str, position: Xyz, scale: Xyz) -> TerrainDescriptor {
    TerrainDescriptor {
        id,
        kind: kind.into(),
        position,
        rotation: Xyz::default(),
        scale,
        properties: Value::Null,
        visual_properties: Value::Null,
        tags: Vec::new(),
    }
}

/// Ground-layer types: terrain shading only, never collide
const GROUND_LAYERS: [&str; 5] = ["fairway", "rough", "path", "water", "sand"];
/// Box scenery types sharing the plain AABB hitbox
const BOX_SCENERY: [&str; 4] = ["sign", "bench", "crate", "fence"];

/// Map a descriptor to a collidable obstacle. Descriptor positions are
/// ground anchors; AABB hitboxes are lifted so the box sits on them.
/// Unknown types are non-fatal.
pub fn obstacle_from_descriptor(d: &TerrainDescriptor) -> Option<Obstacle> {
    let position: Vec3 = d.position.into();
    let scale: Vec3 = d.scale.into();
    let kind = d.kind.as_str();

    let (kind, position) = if GROUND_LAYERS.contains(&kind) {
        (ObstacleKind::GroundLayer, position)
    } else if BOX_SCENERY.contains(&kind) {
        let half = scale * 0.5;
        (ObstacleKind::Scenery { half_extents: half }, position + Vec3::Y * half.y)
    } else {
        match kind {
            "tree" => {
                // Radii follow the xz scale, heights the y scale
                let xz = (scale.x + scale.z) * 0.5;
                (
                    ObstacleKind::Tree {
                        trunk_radius: 0.15 * xz,
                        trunk_height: 1.2 * scale.y,
                        foliage_radius: 0.8 * xz,
                        foliage_height: 1.6 * scale.y,
                    },
                    position,
                )
            }
            "bush" => {
                let half = Vec3::new(0.5, 0.4, 0.5) * scale;
                (ObstacleKind::Bush { half_extents: half }, position + Vec3::Y * half.y)
            }
            "rock" => {
                let half = Vec3::new(0.5, 0.35, 0.5) * scale;
                (ObstacleKind::Rock { half_extents: half }, position + Vec3::Y * half.y)
            }
            "portal" => {
                let half = Vec3::new(0.6, 1.0, 0.15) * scale;
                (
                    ObstacleKind::Portal {
                        half_extents: half,
                        spec: portal_spec_from_properties(&d.properties),
                    },
                    position + Vec3::Y * half.y,
                )
            }
            other => {
                log::warn!("Unknown terrain type '{other}' (id {}); skipping", d.id);
                return None;
            }
        }
    };

    let mut obstacle = Obstacle::new(d.id, kind, position);
    obstacle.rotation = d.rotation.into();
    Some(obstacle)
}

/// Portal behavior from the descriptor's free-form properties
fn portal_spec_from_properties(properties: &Value) -> PortalSpec {
    let str_prop = |key: &str| {
        properties
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    let kind = match str_prop("portal_kind").as_deref() {
        Some("entry") => PortalKind::Entry,
        _ => PortalKind::Exit,
    };
    PortalSpec {
        kind,
        target_url: str_prop("target_url"),
        return_ref: str_prop("ref"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_terrain_type_is_skipped() {
        let d = descriptor(1, "flamingo", Xyz::default(), unit_xyz());
        assert!(obstacle_from_descriptor(&d).is_none());
    }

    #[test]
    fn ground_layers_parse_but_never_collide() {
        let d = descriptor(1, "water", Xyz::default(), unit_xyz());
        let obstacle = obstacle_from_descriptor(&d).unwrap();
        assert_eq!(obstacle.kind, ObstacleKind::GroundLayer);
    }

    #[test]
    fn portal_properties_parse() {
        let raw = json!({
            "id": 9,
            "type": "portal",
            "position": {"x": 1.0, "y": 0.0, "z": 2.0},
            "properties": {
                "portal_kind": "exit",
                "target_url": "https://next.example/",
                "ref": "https://prev.example/"
            }
        });
        let d: TerrainDescriptor = serde_json::from_value(raw).unwrap();
        let obstacle = obstacle_from_descriptor(&d).unwrap();
        let spec = obstacle.portal_spec().unwrap();
        assert_eq!(spec.kind, PortalKind::Exit);
        assert_eq!(spec.target_url.as_deref(), Some("https://next.example/"));
        assert_eq!(spec.return_ref.as_deref(), Some("https://prev.example/"));
    }

    #[test]
    fn descriptor_defaults_fill_in() {
        let raw = json!({
            "id": 2,
            "type": "rock",
            "position": {"x": 0.0, "y": 0.0, "z": 0.0}
        });
        let d: TerrainDescriptor = serde_json::from_value(raw).unwrap();
        assert_eq!(d.scale, unit_xyz());
        assert!(d.tags.is_empty());
        assert!(obstacle_from_descriptor(&d).is_some());
    }

    #[test]
    fn empty_course_gets_placeholder_hole() {
        let course = Course::from_file(&CourseFile {
            name: "Empty".into(),
            holes: vec![],
            terrain: vec![],
        });
        assert_eq!(course.holes.len(), 1);
        assert!(!course.has_next_hole());
    }

    #[test]
    fn hole_progression_is_monotonic() {
        let mut course = Course::demo();
        assert_eq!(course.current, 0);
        assert!(course.advance_hole());
        assert!(!course.advance_hole());
        assert_eq!(course.current, 1);
        course.reset();
        assert_eq!(course.current, 0);
    }

    #[test]
    fn course_file_round_trips_through_json() {
        let json = serde_json::to_string(&CourseFile {
            name: "RT".into(),
            holes: vec![HoleDef {
                tee: Xyz::default(),
                target: Xyz { x: 0.0, y: 0.0, z: 10.0 },
                par: 3,
            }],
            terrain: vec![descriptor(1, "tree", Xyz::default(), unit_xyz())],
        })
        .unwrap();
        let back: CourseFile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, "RT");
        assert_eq!(back.terrain[0].kind, "tree");
    }
}
