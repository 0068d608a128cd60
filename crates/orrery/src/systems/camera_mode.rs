//! Who drives the camera: the scripted sweep, a click-to-focus flight,
//! or the user through orbit controls.
//!
//! Scripted -> Transitioning -> UserControlled, one way. The sweep never
//! resumes once a named entity has been clicked.

use glam::{Vec2, Vec3};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::extensions::easing::Easing;
use crate::extensions::orbit_controls::{ControlsConfig, OrbitControls};
use crate::extensions::tween::Tween;
use crate::input::queue::PointerState;
use crate::renderer::camera::PerspectiveCamera;
use crate::systems::picking::Pick;

/// The automatic circling viewpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Horizontal radius of the sweep.
    pub radius: f32,
    /// Angular rate in radians per unit of scene time.
    pub rate: f32,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self { radius: 5.0, rate: 0.75 }
    }
}

impl SweepConfig {
    /// Camera position at scene time `t`. Height bobs with the same phase.
    pub fn position(&self, t: f32) -> Vec3 {
        let phase = t * self.rate;
        Vec3::new(phase.cos() * self.radius, phase.cos(), phase.sin() * self.radius)
    }
}

/// The click-to-focus flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    /// Final distance from the clicked entity.
    pub distance: f32,
    /// Flight time in wall seconds.
    pub duration: f32,
    pub easing: Easing,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            distance: 3.0,
            duration: 2.0,
            easing: Easing::QuadOut,
        }
    }
}

/// An in-flight focus transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTransition {
    pub tween: Tween,
    /// Entity position captured at click time; the camera aims here every frame.
    pub look_at: Vec3,
    /// The tween has delivered its final value; hand off on the next advance.
    settled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraMode {
    Scripted,
    Transitioning(CameraTransition),
    UserControlled,
}

impl CameraMode {
    pub fn name(&self) -> &'static str {
        match self {
            CameraMode::Scripted => "scripted",
            CameraMode::Transitioning(_) => "transitioning",
            CameraMode::UserControlled => "user_controlled",
        }
    }
}

/// Camera plus the state machine that moves it.
#[derive(Debug, Clone)]
pub struct CameraRig {
    camera: PerspectiveCamera,
    mode: CameraMode,
    controls: OrbitControls,
    sweep: SweepConfig,
    focus: FocusConfig,
}

impl CameraRig {
    pub fn new(camera: PerspectiveCamera, sweep: SweepConfig, focus: FocusConfig, controls: ControlsConfig) -> Self {
        Self {
            camera,
            mode: CameraMode::Scripted,
            controls: OrbitControls::new(controls),
            sweep,
            focus,
        }
    }

    pub fn mode(&self) -> &CameraMode {
        &self.mode
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.camera.set_aspect(aspect);
    }

    /// Start a flight toward a clicked entity. Only the scripted mode reacts;
    /// returns whether a transition started.
    pub fn focus_on(&mut self, pick: &Pick) -> bool {
        if self.mode != CameraMode::Scripted {
            debug!("ignoring click on '{}' while {}", pick.entity_name, self.mode.name());
            return false;
        }

        let entity = pick.world_position;
        let away = (self.camera.position - entity).try_normalize().unwrap_or(Vec3::Z);
        let target = entity + away * self.focus.distance;
        debug!("focusing '{}': {:?} -> {:?}", pick.entity_name, self.camera.position, target);

        self.mode = CameraMode::Transitioning(CameraTransition {
            tween: Tween::new(self.camera.position, target, self.focus.duration, self.focus.easing),
            look_at: entity,
            settled: false,
        });
        true
    }

    /// Move the camera for this frame. `time` is scene time, `dt` wall seconds.
    pub fn advance(&mut self, time: f32, dt: f32, pointer: &PointerState) {
        match &mut self.mode {
            CameraMode::Scripted => {
                self.camera.position = self.sweep.position(time);
                self.camera.look_at(Vec3::ZERO);
            }
            CameraMode::Transitioning(transition) if transition.settled => {
                self.controls.sync(self.camera.position, transition.look_at);
                self.mode = CameraMode::UserControlled;
                debug!("camera handed to user controls");
                self.apply_controls(pointer);
            }
            CameraMode::Transitioning(transition) => {
                self.camera.position = transition.tween.advance(dt);
                self.camera.look_at(transition.look_at);
                transition.settled = transition.tween.is_complete();
            }
            CameraMode::UserControlled => self.apply_controls(pointer),
        }
    }

    fn apply_controls(&mut self, pointer: &PointerState) {
        if pointer.drag_delta != Vec2::ZERO {
            self.controls.drag(pointer.drag_delta.x, pointer.drag_delta.y);
        }
        if pointer.wheel != 0.0 {
            self.controls.wheel(pointer.wheel);
        }
        self.camera.position = self.controls.update();
        self.camera.look_at(self.controls.target);
    }
}
