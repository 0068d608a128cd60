use log::{error, info};

use orrery::systems::rng::entropy_rng;
use orrery::systems::render::static_geometry_json;
use orrery::{
    compose_when_ready, AssetLoadTracker, AssetManifest, CameraUniform, DrawBuffer, DrawInstance,
    FrameDriver, InputEvent, LoadStatus, MeshHandle, OrreryConfig, SpeedTable,
};

/// Owns everything the browser talks to.
///
/// Lives in a `thread_local!` in `lib.rs`. Until every prototype has
/// loaded there is no scene: ticks and input are dropped.
pub struct WebRunner {
    config: OrreryConfig,
    tracker: AssetLoadTracker,
    speeds: SpeedTable,
    driver: Option<FrameDriver>,
    buffer: DrawBuffer,
    aspect: f32,
    paused: bool,
    /// Last pointer position seen before the scene existed, replayed into it.
    pending_pointer: Option<InputEvent>,
    /// Serialized static geometry, set once after composition.
    static_geometry: Option<String>,
}

impl WebRunner {
    /// Parse the scene config and asset manifest.
    pub fn new(config_json: &str, manifest_json: &str, aspect: f32) -> Result<Self, String> {
        let config = OrreryConfig::from_json(config_json).map_err(|e| format!("config: {}", e))?;
        let manifest = AssetManifest::from_json(manifest_json).map_err(|e| format!("manifest: {}", e))?;
        let tracker = AssetLoadTracker::from_manifest(&manifest).map_err(|e| e.to_string())?;
        info!(
            "orrery: waiting for {} prototypes, {} bodies configured",
            manifest.prototypes.len(),
            config.bodies.len()
        );
        Ok(Self {
            config,
            tracker,
            speeds: SpeedTable::new(),
            driver: None,
            buffer: DrawBuffer::new(),
            aspect,
            paused: false,
            pending_pointer: None,
            static_geometry: None,
        })
    }

    /// Record a loaded prototype. Composes the scene when it was the last
    /// one; returns whether the scene is ready.
    pub fn prototype_loaded(&mut self, name: &str, mesh: u32, bounding_radius: f32) -> Result<bool, String> {
        let status = self
            .tracker
            .mark_loaded(name, MeshHandle(mesh), bounding_radius)
            .map_err(|e| e.to_string())?;
        if let LoadStatus::Pending { remaining } = status {
            info!("orrery: '{}' loaded, {} to go", name, remaining);
            return Ok(false);
        }

        let mut rng = entropy_rng();
        let scene = compose_when_ready(&self.config, &mut self.tracker, &self.speeds, &mut rng)
            .map_err(|e| e.to_string())?;
        if let Some(scene) = scene {
            self.static_geometry = Some(static_geometry_json(&scene).map_err(|e| e.to_string())?);
            let mut driver = FrameDriver::new(&self.config, scene, self.speeds.clone(), self.aspect);
            driver.set_paused(self.paused);
            if let Some(event) = self.pending_pointer.take() {
                driver.push_input(event);
            }
            self.driver = Some(driver);
        }
        Ok(self.driver.is_some())
    }

    /// Record a failed load. The scene will never compose.
    pub fn asset_failed(&mut self, name: &str, reason: &str) -> String {
        let err = self.tracker.mark_failed(name, reason);
        error!("orrery: {}", err);
        err.to_string()
    }

    /// Run one frame at the host timestamp (ms).
    pub fn tick(&mut self, timestamp_ms: f64) {
        if let Some(driver) = self.driver.as_mut() {
            driver.frame(timestamp_ms, &mut self.buffer);
        }
    }

    /// Before composition only the latest pointer move is kept.
    pub fn push_input(&mut self, event: InputEvent) {
        match self.driver.as_mut() {
            Some(driver) => driver.push_input(event),
            None => {
                if let InputEvent::PointerMove { .. } = event {
                    self.pending_pointer = Some(event);
                }
            }
        }
    }

    /// Speed overrides may arrive before the scene exists; the table is shared.
    pub fn set_speed(&mut self, name: &str, speed: f32) {
        self.speeds.set(name, speed);
    }

    pub fn clear_speed(&mut self, name: &str) {
        self.speeds.remove(name);
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        if let Some(driver) = self.driver.as_mut() {
            driver.set_paused(self.paused);
        }
        self.paused
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        if let Some(driver) = self.driver.as_mut() {
            driver.set_aspect(aspect);
        }
    }

    pub fn is_ready(&self) -> bool {
        self.driver.is_some()
    }

    // ---- Pointer accessors for zero-copy reads from JS ----

    pub fn camera_ptr(&self) -> *const f32 {
        self.buffer.camera_ptr()
    }

    pub fn camera_floats(&self) -> u32 {
        CameraUniform::FLOATS as u32
    }

    pub fn draw_ptr(&self) -> *const f32 {
        self.buffer.instances_ptr()
    }

    pub fn draw_count(&self) -> u32 {
        self.buffer.instance_count()
    }

    pub fn draw_stride_floats(&self) -> u32 {
        DrawInstance::FLOATS as u32
    }

    // ---- UI accessors ----

    pub fn hover_label(&self) -> Option<String> {
        self.driver.as_ref().and_then(|d| d.hover().label.clone())
    }

    pub fn camera_mode(&self) -> &'static str {
        self.driver.as_ref().map_or("loading", |d| d.mode().name())
    }

    pub fn static_geometry(&self) -> Option<String> {
        self.static_geometry.clone()
    }
}
