use std::collections::VecDeque;

use crate::foundation::core::DVec3;
use crate::foundation::error::{ChaseError, ChaseResult};
use crate::pose::entity::EntityState;

/// Presentation color, `#rrggbb` on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb8(pub [u8; 3]);

impl TryFrom<String> for Rgb8 {
    type Error = ChaseError;

    fn try_from(s: String) -> ChaseResult<Self> {
        let hex = s
            .strip_prefix('#')
            .filter(|h| h.len() == 6 && h.is_ascii())
            .ok_or_else(|| ChaseError::configuration(format!("invalid color '{s}'")))?;
        let mut out = [0u8; 3];
        for (i, c) in out.iter_mut().enumerate() {
            *c = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
                .map_err(|_| ChaseError::configuration(format!("invalid color '{s}'")))?;
        }
        Ok(Self(out))
    }
}

impl From<Rgb8> for String {
    fn from(c: Rgb8) -> Self {
        let [r, g, b] = c.0;
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }
}

/// Authored look of one vehicle.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CraftSpec {
    pub name: String,
    pub scale: f64,
    pub hull_color: Rgb8,
    pub accent_color: Rgb8,
    pub engine_color: Rgb8,
    pub engine_size: f64,
    pub trail_width: f64,
    pub trail_length: usize,
    /// Trail emitter position in the craft's local (unscaled) frame.
    pub trail_offset: DVec3,
}

impl CraftSpec {
    pub fn specter() -> Self {
        Self {
            name: "Specter".to_owned(),
            scale: 1.3,
            hull_color: Rgb8::new(0x5e, 0xf4, 0xff),
            accent_color: Rgb8::new(0x75, 0xd5, 0xff),
            engine_color: Rgb8::new(0x89, 0xfa, 0xff),
            engine_size: 1.6,
            trail_width: 0.6,
            trail_length: 24,
            trail_offset: DVec3::new(0.0, 0.0, 0.8),
        }
    }

    pub fn valkyrie() -> Self {
        Self {
            name: "Valkyrie".to_owned(),
            scale: 1.6,
            hull_color: Rgb8::new(0xff, 0x65, 0x36),
            accent_color: Rgb8::new(0xff, 0xaf, 0x6d),
            engine_color: Rgb8::new(0xff, 0xdd, 0x93),
            engine_size: 1.9,
            trail_width: 0.8,
            trail_length: 32,
            trail_offset: DVec3::new(0.0, 0.0, 1.0),
        }
    }
}

/// Both vehicles' looks.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CraftPair {
    pub target: CraftSpec,
    pub chaser: CraftSpec,
}

impl Default for CraftPair {
    fn default() -> Self {
        Self {
            target: CraftSpec::specter(),
            chaser: CraftSpec::valkyrie(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hull {
    pub color: Rgb8,
    pub accent: Rgb8,
}

/// Engine flare state for one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EngineGlow {
    pub scale: DVec3,
    pub emissive: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Engine {
    pub size: f64,
    pub color: Rgb8,
}

impl Engine {
    /// Flare pulse at `elapsed` seconds. A pure function of time.
    pub fn glow(&self, elapsed: f64) -> EngineGlow {
        let pulse = 1.0 + (elapsed * 12.0).sin() * 0.1;
        EngineGlow {
            scale: DVec3::new(self.size * pulse, self.size * pulse, pulse),
            emissive: 1.4 + (elapsed * 20.0).sin() * 0.4,
        }
    }
}

/// Fixed-capacity history of emitter positions, newest first.
#[derive(Clone, Debug, PartialEq)]
pub struct Trail {
    pub width: f64,
    capacity: usize,
    points: VecDeque<DVec3>,
}

impl Trail {
    pub fn new(width: f64, capacity: usize) -> Self {
        Self {
            width,
            capacity,
            points: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, p: DVec3) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_back();
        }
        self.points.push_front(p);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn head(&self) -> Option<DVec3> {
        self.points.front().copied()
    }

    /// Points from newest to oldest.
    pub fn points(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.points.iter().copied()
    }

    /// Ribbon width at history slot `i`, tapering linearly to zero past the oldest slot.
    pub fn width_at(&self, i: usize) -> f64 {
        if i >= self.capacity {
            return 0.0;
        }
        self.width * (1.0 - i as f64 / self.capacity as f64)
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

/// A vehicle: value-owned hull, engine and trail hanging off one pose.
#[derive(Clone, Debug, PartialEq)]
pub struct Craft {
    pub name: String,
    pub scale: f64,
    pub hull: Hull,
    pub engine: Engine,
    pub trail: Trail,
    trail_offset: DVec3,
    glow: EngineGlow,
}

impl Craft {
    pub fn from_spec(spec: &CraftSpec) -> ChaseResult<Self> {
        if !(spec.scale.is_finite() && spec.scale > 0.0) {
            return Err(ChaseError::configuration(format!(
                "craft '{}' scale must be > 0",
                spec.name
            )));
        }
        if !(spec.engine_size.is_finite() && spec.engine_size >= 0.0) {
            return Err(ChaseError::configuration(format!(
                "craft '{}' engine_size must be >= 0",
                spec.name
            )));
        }
        if !spec.trail_offset.is_finite() || !spec.trail_width.is_finite() {
            return Err(ChaseError::configuration(format!(
                "craft '{}' trail parameters must be finite",
                spec.name
            )));
        }
        let engine = Engine {
            size: spec.engine_size,
            color: spec.engine_color,
        };
        Ok(Self {
            name: spec.name.clone(),
            scale: spec.scale,
            hull: Hull {
                color: spec.hull_color,
                accent: spec.accent_color,
            },
            engine,
            trail: Trail::new(spec.trail_width, spec.trail_length),
            trail_offset: spec.trail_offset,
            glow: engine.glow(0.0),
        })
    }

    /// World position of the trail emitter for `pose`.
    pub fn emitter_position(&self, pose: &EntityState) -> DVec3 {
        pose.position + pose.orientation * (self.trail_offset * self.scale)
    }

    /// Follow `pose` for one frame: pulse the engine and extend the trail.
    pub fn update(&mut self, pose: &EntityState, elapsed: f64) -> EngineGlow {
        self.glow = self.engine.glow(elapsed);
        let emitter = self.emitter_position(pose);
        self.trail.push(emitter);
        self.glow
    }

    pub fn glow(&self) -> EngineGlow {
        self.glow
    }

    pub fn reset(&mut self) {
        self.trail.clear();
        self.glow = self.engine.glow(0.0);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pose/craft.rs"]
mod tests;
