//! Deterministic chase-sequence engine.
//!
//! A lead vehicle and its pursuer fly along authored Catmull-Rom paths while a damped chase camera
//! frames them over a procedural backdrop. The public API is scene-oriented:
//!
//! - Describe the sequence with a [`SceneConfig`] (every field defaulted, JSON-loadable)
//! - Build a [`ChaseScene`]
//! - Step it with [`ChaseScene::advance`] or stream a fixed-rate run into a [`FrameSink`]
//!
//! All per-frame damping is expressed as per-second rates, so a sequence stepped at 30 fps and one
//! stepped at 120 fps settle on the same terminal pose.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod ambient;
pub(crate) mod curve;
pub(crate) mod output;
pub(crate) mod pose;
pub(crate) mod rig;
pub(crate) mod scene;
pub(crate) mod timing;

pub use crate::foundation::core::{DMat3, DQuat, DVec3, FORWARD, Fps, FrameIndex, UP};
pub use crate::foundation::error::{ChaseError, ChaseResult};
pub use crate::foundation::math::{
    damp_rotation, exp_blend, hsl_to_rgb, lerp, look_at_rotation, rate_from_frame_fraction,
    shortest_arc,
};

pub use crate::ambient::nebula::{NebulaCloud, NebulaConfig, NebulaPoint};
pub use crate::ambient::stars::{Star, StarConfig, StarField};
pub use crate::ambient::streaks::{Streak, StreakConfig, StreakField, StreakInstance};
pub use crate::curve::paths::{ChasePaths, PathSet, PathSpec};
pub use crate::curve::spline::{ControlPointSet, CurveKind, Spline, build_spline};
pub use crate::output::sink::{FrameSink, InMemorySink, JsonLinesSink, SinkConfig};
pub use crate::pose::craft::{
    Craft, CraftPair, CraftSpec, Engine, EngineGlow, Hull, Rgb8, Trail,
};
pub use crate::pose::entity::{
    ChaserSchedule, ChaserSolver, CurveSample, EntityState, TargetSolver,
};
pub use crate::rig::camera::{CameraPose, CameraRig, RigConfig, RigState};
pub use crate::scene::config::{DampingConfig, REFERENCE_FPS, SceneConfig};
pub use crate::scene::driver::{ChaseScene, FrameSnapshot, MAX_RUN_FRAMES, RunStats};
pub use crate::timing::clock::SceneClock;
pub use crate::timing::ease::{Ease, smoothstep};
pub use crate::timing::timeline::{Timeline, normalized_time, progress};
