use crate::foundation::core::{DQuat, DVec3, UP};
use crate::foundation::error::{ChaseError, ChaseResult};
use crate::foundation::math::{exp_blend, lerp, look_at_rotation};
use crate::pose::entity::EntityState;

/// Framing parameters of the chase camera.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RigConfig {
    /// Rig anchor before the first frame.
    pub initial_position: DVec3,
    /// How far behind the chaser, along its heading, the camera hangs.
    pub trail_distance: f64,
    /// Camera height above the chaser at progress 0.
    pub rise_start: f64,
    /// Camera height above the chaser at progress 1.
    pub rise_end: f64,
    /// Share of the chaser in the look-at focus (0 looks at the target only).
    pub focus_bias: f64,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            initial_position: DVec3::new(0.0, 3.4, 12.0),
            trail_distance: 6.0,
            rise_start: 2.2,
            rise_end: 5.4,
            focus_bias: 0.25,
        }
    }
}

impl RigConfig {
    pub fn validate(&self) -> ChaseResult<()> {
        let finite = self.initial_position.is_finite()
            && self.trail_distance.is_finite()
            && self.rise_start.is_finite()
            && self.rise_end.is_finite();
        if !finite {
            return Err(ChaseError::configuration("rig parameters must be finite"));
        }
        if !(0.0..=1.0).contains(&self.focus_bias) {
            return Err(ChaseError::configuration(
                "rig focus_bias must be in [0, 1]",
            ));
        }
        Ok(())
    }
}

/// Smoothed anchor the camera position is slaved to.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RigState {
    pub position: DVec3,
}

/// Camera transform handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraPose {
    pub position: DVec3,
    pub orientation: DQuat,
    pub focus: DVec3,
}

/// Chase-cam controller: damped dolly, undamped look-at.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraRig {
    cfg: RigConfig,
    follow_rate: f64,
    state: RigState,
    camera: CameraPose,
}

impl CameraRig {
    pub fn new(cfg: RigConfig, follow_rate: f64) -> Self {
        let state = RigState {
            position: cfg.initial_position,
        };
        Self {
            cfg,
            follow_rate,
            state,
            camera: CameraPose {
                position: state.position,
                orientation: DQuat::IDENTITY,
                focus: state.position + DVec3::NEG_Z,
            },
        }
    }

    pub fn state(&self) -> RigState {
        self.state
    }

    pub fn camera(&self) -> CameraPose {
        self.camera
    }

    pub fn config(&self) -> &RigConfig {
        &self.cfg
    }

    /// Look-at point, weighted toward the target.
    pub fn focus(&self, target: DVec3, chaser: DVec3) -> DVec3 {
        target.lerp(chaser, self.cfg.focus_bias)
    }

    /// Where the rig wants to be this frame: behind the chaser along `heading`, raised by an
    /// amount that grows with progress.
    pub fn desired_position(&self, chaser: DVec3, heading: DVec3, eased: f64) -> DVec3 {
        let rise = lerp(self.cfg.rise_start, self.cfg.rise_end, eased.clamp(0.0, 1.0));
        chaser - heading * self.cfg.trail_distance + UP * rise
    }

    /// Advance one frame. `chaser_heading` is the chaser's unit tangent when defined; otherwise
    /// the chaser's current nose direction is used.
    pub fn update(
        &mut self,
        target: &EntityState,
        chaser: &EntityState,
        chaser_heading: Option<DVec3>,
        eased: f64,
        dt: f64,
    ) -> CameraPose {
        let heading = chaser_heading.unwrap_or_else(|| chaser.forward());
        let desired = self.desired_position(chaser.position, heading, eased);
        let blend = exp_blend(self.follow_rate, dt);
        self.state.position = self.state.position.lerp(desired, blend);

        let focus = self.focus(target.position, chaser.position);
        // Rig sitting on the focus point: keep last frame's view direction.
        let orientation = look_at_rotation(self.state.position, focus, UP)
            .unwrap_or(self.camera.orientation);

        self.camera = CameraPose {
            position: self.state.position,
            orientation,
            focus,
        };
        self.camera
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.cfg, self.follow_rate);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/rig/camera.rs"]
mod tests;
