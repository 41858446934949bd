use crate::ambient::nebula::NebulaCloud;
use crate::ambient::stars::StarField;
use crate::ambient::streaks::StreakField;
use crate::curve::paths::ChasePaths;
use crate::foundation::core::{DQuat, Fps, FrameIndex};
use crate::foundation::error::{ChaseError, ChaseResult};
use crate::output::sink::{FrameSink, SinkConfig};
use crate::pose::craft::{Craft, EngineGlow};
use crate::pose::entity::{ChaserSolver, EntityState, TargetSolver};
use crate::rig::camera::{CameraPose, CameraRig};
use crate::scene::config::SceneConfig;
use crate::timing::clock::SceneClock;
use crate::timing::timeline::Timeline;

/// Most frames `run` or `seek` will step through in one call: a day of footage at 240 fps.
pub const MAX_RUN_FRAMES: u64 = 24 * 60 * 60 * 240;

/// Everything a renderer needs for one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FrameSnapshot {
    /// Frames stepped before this one since construction or the last reset.
    pub frame: u64,
    pub elapsed: f64,
    /// Eased progress in `[0, 1]`; also the target's curve parameter.
    pub progress: f64,
    pub chaser_param: f64,
    pub target: EntityState,
    pub chaser: EntityState,
    pub camera: CameraPose,
    pub target_engine: EngineGlow,
    pub chaser_engine: EngineGlow,
    pub nebula_rotation: DQuat,
    /// Streaks recycled during this frame.
    pub streaks_recycled: usize,
}

/// Offline run statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunStats {
    /// Frames pushed to the sink.
    pub frames: u64,
    /// Scene time after the last frame.
    pub elapsed: f64,
    /// Streak recycles across the whole run.
    pub streaks_recycled: u64,
}

/// A built chase sequence: curves, both vehicles, the camera rig and the ambient fields.
///
/// The scene owns all of its state. Callers drive it with [`ChaseScene::advance`] once per
/// rendered frame, or hand it a [`FrameSink`] via [`ChaseScene::run`].
#[derive(Clone, Debug)]
pub struct ChaseScene {
    cfg: SceneConfig,
    paths: ChasePaths,
    timeline: Timeline,
    clock: SceneClock,
    frame: u64,

    target_solver: TargetSolver,
    chaser_solver: ChaserSolver,
    target: EntityState,
    chaser: EntityState,
    rig: CameraRig,

    nebula: NebulaCloud,
    streaks: StreakField,
    stars: StarField,

    target_craft: Craft,
    chaser_craft: Craft,
}

impl ChaseScene {
    #[tracing::instrument(skip(cfg), fields(duration = cfg.duration, seed = cfg.seed))]
    pub fn new(cfg: SceneConfig) -> ChaseResult<Self> {
        cfg.validate()?;
        let paths = cfg.paths.build()?;
        let timeline = Timeline::new(cfg.duration, cfg.pacing)?;
        let target_craft = Craft::from_spec(&cfg.crafts.target)?;
        let chaser_craft = Craft::from_spec(&cfg.crafts.chaser)?;

        let target_solver = TargetSolver::new(cfg.damping.target_align);
        let chaser_solver = ChaserSolver::new(
            cfg.chaser,
            cfg.damping.chaser_align,
            cfg.damping.chaser_pursuit,
        );
        let rig = CameraRig::new(cfg.rig, cfg.damping.rig_follow);

        let nebula = NebulaCloud::scatter(&paths.ambient, &cfg.nebula, cfg.seed);
        let streaks = StreakField::new(cfg.streaks, cfg.seed);
        let stars = StarField::generate(&cfg.stars, cfg.seed);

        let (target, chaser) = initial_poses(&paths, &chaser_solver);
        tracing::debug!(
            nebula = nebula.points().len(),
            streaks = streaks.streaks().len(),
            stars = stars.len(),
            "scene built"
        );

        Ok(Self {
            cfg,
            paths,
            timeline,
            clock: SceneClock::new(),
            frame: 0,
            target_solver,
            chaser_solver,
            target,
            chaser,
            rig,
            nebula,
            streaks,
            stars,
            target_craft,
            chaser_craft,
        })
    }

    /// Step the scene by `dt` seconds and describe the resulting frame.
    ///
    /// Update order is fixed: clock, progress, target, chaser, rig, nebula, streaks, crafts.
    pub fn advance(&mut self, dt: f64) -> FrameSnapshot {
        let dt = self.clock.advance(dt);
        self.step(dt)
    }

    /// Step the scene forward to the absolute time `elapsed`. Earlier times step by zero.
    pub fn advance_to(&mut self, elapsed: f64) -> FrameSnapshot {
        let dt = self.clock.advance_to(elapsed);
        self.step(dt)
    }

    fn step(&mut self, dt: f64) -> FrameSnapshot {
        let elapsed = self.clock.elapsed();
        let progress = self.timeline.progress(elapsed);

        self.target_solver
            .solve(&mut self.target, &self.paths.target, progress, dt);
        let chaser_sample = self.chaser_solver.solve(
            &mut self.chaser,
            &self.paths.chaser,
            progress,
            dt,
            self.target.position,
        );
        let camera = self.rig.update(
            &self.target,
            &self.chaser,
            chaser_sample.heading,
            progress,
            dt,
        );

        self.nebula.advance(dt);
        let streaks_recycled = self.streaks.advance(dt);

        let target_engine = self.target_craft.update(&self.target, elapsed);
        let chaser_engine = self.chaser_craft.update(&self.chaser, elapsed);

        let snapshot = FrameSnapshot {
            frame: self.frame,
            elapsed,
            progress,
            chaser_param: chaser_sample.param,
            target: self.target,
            chaser: self.chaser,
            camera,
            target_engine,
            chaser_engine,
            nebula_rotation: self.nebula.rotation(),
            streaks_recycled,
        };
        self.frame += 1;
        snapshot
    }

    /// Rewind to the state right after construction.
    pub fn reset(&mut self) {
        self.clock.reset();
        self.frame = 0;
        let (target, chaser) = initial_poses(&self.paths, &self.chaser_solver);
        self.target = target;
        self.chaser = chaser;
        self.rig.reset();
        self.nebula.reset();
        self.streaks.reset();
        self.target_craft.reset();
        self.chaser_craft.reset();
    }

    /// Rewind, then simulate from frame 0 to the first frame at or past `at` seconds at a fixed
    /// `fps`. Returns that frame.
    pub fn seek(&mut self, fps: Fps, at: f64) -> ChaseResult<FrameSnapshot> {
        if !(at.is_finite() && at >= 0.0) {
            return Err(ChaseError::configuration(format!(
                "seek time must be finite and >= 0 (got {at})"
            )));
        }
        let last = last_frame(fps, at)?;
        self.reset();
        let mut snapshot = self.advance(0.0);
        for f in 1..=last {
            snapshot = self.advance_to(fps.frames_to_secs(f));
        }
        Ok(snapshot)
    }

    /// Rewind and push frames `0..=ceil((duration + hold) * fps)` to `sink`, frame `f` landing at
    /// `f / fps` seconds. Frame 0 advances by zero so it shows the initial pose.
    #[tracing::instrument(skip(self, fps, sink), fields(fps = fps.as_f64()))]
    pub fn run(&mut self, fps: Fps, hold: f64, sink: &mut dyn FrameSink) -> ChaseResult<RunStats> {
        if !(hold.is_finite() && hold >= 0.0) {
            return Err(ChaseError::configuration(format!(
                "hold must be finite and >= 0 (got {hold})"
            )));
        }
        let last = last_frame(fps, self.timeline.duration() + hold)?;
        let frame_count = last.checked_add(1).ok_or_else(|| {
            ChaseError::configuration(format!("frame count overflows at {} fps", fps.as_f64()))
        })?;
        self.reset();

        sink.begin(SinkConfig {
            fps,
            duration: self.timeline.duration(),
            hold,
            frame_count,
        })?;

        let mut stats = RunStats::default();
        for f in 0..=last {
            let snapshot = self.advance_to(fps.frames_to_secs(f));
            sink.push_frame(FrameIndex(f), &snapshot)?;
            stats.frames += 1;
            stats.streaks_recycled += snapshot.streaks_recycled as u64;
        }
        sink.end()?;

        stats.elapsed = self.clock.elapsed();
        tracing::info!(
            frames = stats.frames,
            elapsed = stats.elapsed,
            recycled = stats.streaks_recycled,
            "run finished"
        );
        Ok(stats)
    }

    pub fn config(&self) -> &SceneConfig {
        &self.cfg
    }

    pub fn paths(&self) -> &ChasePaths {
        &self.paths
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn clock(&self) -> &SceneClock {
        &self.clock
    }

    pub fn target(&self) -> &EntityState {
        &self.target
    }

    pub fn chaser(&self) -> &EntityState {
        &self.chaser
    }

    pub fn camera(&self) -> CameraPose {
        self.rig.camera()
    }

    pub fn nebula(&self) -> &NebulaCloud {
        &self.nebula
    }

    pub fn streaks(&self) -> &StreakField {
        &self.streaks
    }

    pub fn stars(&self) -> &StarField {
        &self.stars
    }

    pub fn target_craft(&self) -> &Craft {
        &self.target_craft
    }

    pub fn chaser_craft(&self) -> &Craft {
        &self.chaser_craft
    }
}

/// Index of the last frame covering `secs`, bounded by [`MAX_RUN_FRAMES`].
fn last_frame(fps: Fps, secs: f64) -> ChaseResult<u64> {
    let last = fps.secs_to_frames_ceil(secs);
    if last >= MAX_RUN_FRAMES {
        return Err(ChaseError::configuration(format!(
            "{secs}s at {} fps exceeds the {MAX_RUN_FRAMES} frame limit",
            fps.as_f64()
        )));
    }
    Ok(last)
}

fn initial_poses(paths: &ChasePaths, chaser: &ChaserSolver) -> (EntityState, EntityState) {
    (
        EntityState::at(paths.target.point_at(0.0)),
        EntityState::at(paths.chaser.point_at(chaser.schedule.sample_param(0.0))),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/scene/driver.rs"]
mod tests;
