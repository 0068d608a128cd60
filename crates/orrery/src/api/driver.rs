use log::debug;
use rand::Rng;

use crate::api::config::OrreryConfig;
use crate::assets::registry::Prototype;
use crate::core::scene::Scene;
use crate::core::time::{FrameTime, SceneClock};
use crate::input::queue::{InputEvent, InputQueue, PointerState};
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::instance::DrawInstance;
use crate::renderer::traits::{FrameView, RenderSink};
use crate::systems::camera_mode::{CameraMode, CameraRig};
use crate::systems::compose::{compose_scene, ComposeError};
use crate::systems::orbit::SpeedTable;
use crate::systems::picking::{pick, HoverState, Pick, Ray};
use crate::systems::render::build_draw_list;
use crate::systems::update::propagate;

/// Owns the composed scene and runs one frame per host refresh:
/// update (skipped while paused), pick, render, camera.
pub struct FrameDriver {
    scene: Scene,
    clock: SceneClock,
    input: InputQueue,
    pointer: PointerState,
    rig: CameraRig,
    speeds: SpeedTable,
    hover: HoverState,
    last_pick: Option<Pick>,
    draw_list: Vec<DrawInstance>,
    paused: bool,
    last_frame: FrameTime,
}

impl FrameDriver {
    /// Wrap an already composed scene. `speeds` must be the table its orbit
    /// behaviors were built with.
    pub fn new(config: &OrreryConfig, scene: Scene, speeds: SpeedTable, aspect: f32) -> Self {
        let camera = PerspectiveCamera::new(&config.camera, aspect);
        Self {
            scene,
            clock: SceneClock::new(config.time_scale),
            input: InputQueue::new(),
            pointer: PointerState::new(),
            rig: CameraRig::new(camera, config.sweep, config.focus, config.controls),
            speeds,
            hover: HoverState::default(),
            last_pick: None,
            draw_list: Vec::new(),
            paused: false,
            last_frame: FrameTime::default(),
        }
    }

    /// Compose the scene from loaded prototypes and wrap it.
    pub fn compose<R: Rng + ?Sized>(
        config: &OrreryConfig,
        prototypes: &[Prototype],
        aspect: f32,
        rng: &mut R,
    ) -> Result<Self, ComposeError> {
        let speeds = SpeedTable::new();
        let scene = compose_scene(config, prototypes, &speeds, rng)?;
        Ok(Self::new(config, scene, speeds, aspect))
    }

    /// Queue an input event for the next frame.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame at the host timestamp (milliseconds).
    pub fn frame(&mut self, timestamp_ms: f64, sink: &mut impl RenderSink) -> FrameTime {
        let frame = self.clock.tick(timestamp_ms);
        let events = self.input.drain();
        self.pointer.apply(&events);

        self.update_stage(frame.time);
        self.pick_stage();
        self.render_stage(sink);
        self.camera_stage(frame);

        self.last_frame = frame;
        frame
    }

    fn update_stage(&mut self, time: f32) {
        if !self.paused {
            propagate(self.scene.root_mut(), time);
        }
    }

    /// Recomputed every frame, whether or not the pointer moved.
    fn pick_stage(&mut self) {
        self.last_pick = self
            .pointer
            .ndc
            .and_then(|ndc| Ray::from_ndc(self.rig.camera(), ndc))
            .and_then(|ray| pick(self.scene.root(), &ray));
        self.hover.update(self.last_pick.as_ref(), self.pointer.ndc);
    }

    fn render_stage(&mut self, sink: &mut impl RenderSink) {
        build_draw_list(&self.scene, &mut self.draw_list);
        sink.render(&FrameView {
            camera: self.rig.camera().uniform(),
            draw_list: &self.draw_list,
            scene: &self.scene,
            hover: &self.hover,
        });
    }

    /// Advance the current mode, then let a click start a focus flight
    /// that begins moving on the next frame.
    fn camera_stage(&mut self, frame: FrameTime) {
        self.rig.advance(frame.time, frame.dt, &self.pointer);
        if self.pointer.clicked {
            match &self.last_pick {
                Some(hit) => {
                    self.rig.focus_on(hit);
                }
                None => debug!("click hit no named entity"),
            }
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Flip the pause flag and return the new state.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.rig.set_aspect(aspect);
    }

    /// Handle to the shared speed table; writes apply from the next frame.
    pub fn speeds(&self) -> &SpeedTable {
        &self.speeds
    }

    pub fn hover(&self) -> &HoverState {
        &self.hover
    }

    pub fn last_pick(&self) -> Option<&Pick> {
        self.last_pick.as_ref()
    }

    pub fn mode(&self) -> &CameraMode {
        self.rig.mode()
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        self.rig.camera()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn last_frame(&self) -> FrameTime {
        self.last_frame
    }
}
