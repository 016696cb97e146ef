//! Authoritative orb scene: ordered orbs, camera, lights and the
//! post-processing chain.
//!
//! Orbs render in insertion order unless [`Scene::sort_by_depth`] is
//! called. All per-frame mutation happens in [`Scene::update`], which the
//! engine calls before every draw.

pub mod asset;
pub mod binding;
pub mod layout;
mod orb;

use std::sync::Arc;

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHashMap;

pub use asset::{AssetState, AssetVisual, RemoteAsset};
pub use binding::{BalanceSnapshot, ValueBinding};
pub use layout::{LayoutKind, LayoutPolicy};
pub use orb::{OrbId, OrbInstance, OrbOverrides, Transform};

use crate::animation::{AgentState, AnimationParams, FrameInput, Pulse, StyleSwitch};
use crate::camera::{Camera, PointLight, SceneUniform};
use crate::engine::command::OrbCommand;
use crate::input::picking;
use crate::options::Options;
use crate::renderer::postprocess::chain::{PostChain, PostPass};
use crate::shader::{BuiltinStyle, ShaderRegistry};
use crate::util::color::{CORNSILK, GOLD, VIOLET};
use crate::util::frame_clock::FrameClock;
use crate::util::math::clamp01;

/// Where the agent orb sits, clear of every layout ring.
const AGENT_POSITION: Vec3 = Vec3::new(0.0, 3.8, 0.0);
/// Agent orb size relative to bank orbs.
const AGENT_SCALE: f32 = 0.7;

// ---------------------------------------------------------------------------
// Label anchors
// ---------------------------------------------------------------------------

/// Screen-space anchor for an orb's text label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelAnchor<'a> {
    /// Orb the label belongs to.
    pub id: OrbId,
    /// Label text.
    pub label: &'a str,
    /// Pixel position (origin top-left) just above the orb.
    pub position: Vec2,
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// The orb scene.
pub struct Scene {
    registry: Arc<ShaderRegistry>,
    orbs: Vec<OrbInstance>,
    next_id: u32,
    camera: Camera,
    lights: Vec<PointLight>,
    ambient: f32,
    post_chain: PostChain,
    options: Options,
    layout: LayoutKind,
    params: AnimationParams,
    clock: FrameClock,
    pointer: Option<Vec2>,
    audio_level: f32,
    selected: Option<OrbId>,
    hovered: Option<OrbId>,
    agent: Option<OrbId>,
    snapshots: FxHashMap<String, BalanceSnapshot>,
    assets: FxHashMap<OrbId, RemoteAsset>,
    rng: StdRng,
}

impl Scene {
    /// Empty scene configured by `options`, with OS-seeded phase offsets.
    pub fn new(registry: Arc<ShaderRegistry>, options: &Options) -> Self {
        Self::with_rng(registry, options, StdRng::from_rng(&mut rand::rng()))
    }

    /// Empty scene whose phase offsets come from `seed`.
    pub fn with_seed(registry: Arc<ShaderRegistry>, options: &Options, seed: u64) -> Self {
        Self::with_rng(registry, options, StdRng::seed_from_u64(seed))
    }

    fn with_rng(registry: Arc<ShaderRegistry>, options: &Options, rng: StdRng) -> Self {
        Self {
            registry,
            orbs: Vec::new(),
            next_id: 0,
            camera: options.camera.camera(16.0 / 9.0),
            lights: default_lights(),
            ambient: options.style.ambient.clamp(0.0, 1.0),
            post_chain: PostChain::from_options(&options.post_processing),
            options: options.clone(),
            layout: options.layout.kind,
            params: options.animation.params(),
            clock: FrameClock::new(),
            pointer: None,
            audio_level: 0.0,
            selected: None,
            hovered: None,
            agent: None,
            snapshots: FxHashMap::default(),
            assets: FxHashMap::default(),
            rng,
        }
    }

    /// The seven bank orbs (bound to balance snapshots by id), laid out
    /// with the configured layout, plus the agent orb.
    pub fn bank_scene(registry: Arc<ShaderRegistry>, options: &Options) -> Self {
        let mut scene = Self::new(registry, options);
        scene.populate_banks();
        scene
    }

    fn populate_banks(&mut self) {
        let binding = ValueBinding::CapitalRatio {
            max_balance: self.options.style.max_balance,
        };
        for style in BuiltinStyle::BANKS {
            let _ = self.add_orb(
                style.id(),
                style.id(),
                &OrbOverrides {
                    binding: Some(binding),
                    ..OrbOverrides::default()
                },
            );
        }
        let _ = self.add_agent_orb("agent", self.options.style.agent_state);
        self.apply_layout();
    }

    // -- Orbs --

    /// Add an orb drawing `style_id`. Unknown ids use the default program.
    pub fn add_orb(
        &mut self,
        label: impl Into<String>,
        style_id: &str,
        overrides: &OrbOverrides,
    ) -> OrbId {
        let id = OrbId(self.next_id);
        self.next_id += 1;
        let anim = &self.options.animation;
        let mut orb = OrbInstance::new(
            id,
            label,
            &self.registry,
            style_id,
            overrides,
            &mut self.rng,
        )
        .with_pulse(Pulse::new(anim.pulse_decay, anim.pulse_epsilon));
        orb.apply_snapshot(self.snapshots.get(orb.label()));
        log::debug!("added {id} '{}' ({})", orb.label(), orb.program().id);
        self.orbs.push(orb);
        id
    }

    /// Add the agent orb, driven by a style switch starting in `state`.
    /// Replaces any previous agent orb.
    pub fn add_agent_orb(&mut self, label: impl Into<String>, state: AgentState) -> OrbId {
        if let Some(old) = self.agent.take() {
            let _ = self.remove(old);
        }
        let id = self.add_orb(
            label,
            BuiltinStyle::LiquidMagnetic.id(),
            &OrbOverrides {
                position: Some(AGENT_POSITION),
                scale: Some(AGENT_SCALE),
                ..OrbOverrides::default()
            },
        );
        let switch = StyleSwitch::new(state, self.options.style.agent_lerp_rate);
        if let Some(index) = self.index_of(id) {
            let orb = self.orbs.remove(index);
            self.orbs.insert(index, orb.with_agent(switch));
        }
        self.agent = Some(id);
        id
    }

    /// Remove an orb. Returns whether it existed.
    pub fn remove(&mut self, id: OrbId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let _ = self.orbs.remove(index);
        let _ = self.assets.remove(&id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        if self.agent == Some(id) {
            self.agent = None;
        }
        true
    }

    fn index_of(&self, id: OrbId) -> Option<usize> {
        self.orbs.iter().position(|o| o.id() == id)
    }

    /// Orbs in render order.
    pub fn orbs(&self) -> &[OrbInstance] {
        &self.orbs
    }

    /// One orb.
    pub fn orb(&self, id: OrbId) -> Option<&OrbInstance> {
        self.orbs.iter().find(|o| o.id() == id)
    }

    /// One orb, mutably.
    pub fn orb_mut(&mut self, id: OrbId) -> Option<&mut OrbInstance> {
        self.orbs.iter_mut().find(|o| o.id() == id)
    }

    /// First orb with `label`.
    pub fn find(&self, label: &str) -> Option<OrbId> {
        self.orbs.iter().find(|o| o.label() == label).map(OrbInstance::id)
    }

    /// Number of orbs.
    pub fn len(&self) -> usize {
        self.orbs.len()
    }

    /// Whether the scene has no orbs.
    pub fn is_empty(&self) -> bool {
        self.orbs.is_empty()
    }

    /// Shared program registry.
    pub fn registry(&self) -> &Arc<ShaderRegistry> {
        &self.registry
    }

    // -- Selection, hover, pulse --

    /// Select `id` (or clear with `None`). Unknown ids clear.
    pub fn select(&mut self, id: Option<OrbId>) {
        let id = id.filter(|id| self.orb(*id).is_some());
        self.selected = id;
        for orb in &mut self.orbs {
            orb.set_selected(Some(orb.id()) == id);
        }
    }

    /// Selected orb.
    pub fn selected(&self) -> Option<OrbId> {
        self.selected
    }

    /// Select the orb after the current selection, wrapping around.
    pub fn select_next(&mut self) {
        if self.orbs.is_empty() {
            return;
        }
        let next = self
            .selected
            .and_then(|id| self.index_of(id))
            .map_or(0, |i| (i + 1) % self.orbs.len());
        let id = self.orbs[next].id();
        self.select(Some(id));
    }

    /// Mark `id` as hovered (or nothing with `None`).
    pub fn hover(&mut self, id: Option<OrbId>) {
        self.hovered = id;
        for orb in &mut self.orbs {
            orb.set_hovered(Some(orb.id()) == id);
        }
    }

    /// Hovered orb.
    pub fn hovered(&self) -> Option<OrbId> {
        self.hovered
    }

    /// Fire a pulse on `id`. Returns whether the orb exists.
    pub fn pulse(&mut self, id: OrbId) -> bool {
        let Some(orb) = self.orb_mut(id) else {
            return false;
        };
        orb.pulse();
        true
    }

    /// Last pointer position in NDC; `None` until the pointer enters the
    /// viewport and after it leaves.
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Track the pointer (NDC, clamped to `[-1, 1]`). Non-finite positions
    /// count as outside the viewport.
    pub fn set_pointer(&mut self, ndc: Vec2) {
        self.pointer = ndc
            .is_finite()
            .then(|| ndc.clamp(Vec2::NEG_ONE, Vec2::ONE));
    }

    /// Forget the pointer; nothing is hovered until it moves again.
    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    /// Audio level fed to every orb's `audio_level` uniform.
    pub fn audio_level(&self) -> f32 {
        self.audio_level
    }

    /// Set the audio level (clamped to `[0, 1]`, NaN reads as silence).
    pub fn set_audio_level(&mut self, level: f32) {
        self.audio_level = clamp01(level);
    }

    /// Orb under `ndc`, nearest first.
    pub fn pick(&self, ndc: Vec2) -> Option<OrbId> {
        picking::pick(
            &self.camera,
            ndc,
            self.orbs
                .iter()
                .map(|o| (o.id(), o.position(), o.pick_radius())),
        )
    }

    // -- Agent --

    /// Agent orb, if any.
    pub fn agent(&self) -> Option<OrbId> {
        self.agent
    }

    /// Retarget the agent orb.
    pub fn set_agent_state(&mut self, state: AgentState) {
        if let Some(switch) = self.agent_switch_mut() {
            switch.set_state(state);
        }
    }

    /// Agent's target state.
    pub fn agent_state(&self) -> Option<AgentState> {
        self.agent
            .and_then(|id| self.orb(id))
            .and_then(OrbInstance::agent)
            .map(StyleSwitch::state)
    }

    fn agent_switch_mut(&mut self) -> Option<&mut StyleSwitch> {
        let id = self.agent?;
        self.orb_mut(id).and_then(OrbInstance::agent_mut)
    }

    // -- Remote assets --

    /// Back `id` with a remote asset; the orb is drawn procedurally until
    /// the asset is ready.
    pub fn attach_asset(&mut self, id: OrbId, asset: RemoteAsset) {
        let _ = self.assets.insert(id, asset);
    }

    /// Back `id` with a remote asset at `url`, retried up to the configured
    /// attempt budget. The orb's own program is the fallback. Returns
    /// whether the orb exists.
    pub fn attach_remote_asset(&mut self, id: OrbId, url: &str) -> bool {
        let Some(orb) = self.orb(id) else {
            return false;
        };
        let asset = RemoteAsset::new(
            url,
            orb.program().id.as_str(),
            self.options.style.asset_max_attempts,
        );
        self.attach_asset(id, asset);
        true
    }

    /// Asset backing `id`.
    pub fn asset_mut(&mut self, id: OrbId) -> Option<&mut RemoteAsset> {
        self.assets.get_mut(&id)
    }

    /// Whether `id` is drawn by the procedural pipeline this frame.
    pub fn draws_procedurally(&self, id: OrbId) -> bool {
        self.assets
            .get(&id)
            .is_none_or(|a| matches!(a.visual(), AssetVisual::Fallback(_)))
    }

    // -- Layout --

    /// Current layout family.
    pub fn layout(&self) -> LayoutKind {
        self.layout
    }

    /// Switch layout family and re-place orbs.
    pub fn set_layout(&mut self, kind: LayoutKind) {
        self.layout = kind;
        self.apply_layout();
    }

    /// Place every non-pinned orb with the current layout.
    pub fn apply_layout(&mut self) {
        let policy = self.options.layout.policy(self.layout);
        self.apply_policy(&policy);
    }

    /// Place every non-pinned orb with `policy`, in scene order.
    pub fn apply_policy(&mut self, policy: &LayoutPolicy) {
        let labels: Vec<&str> = self
            .orbs
            .iter()
            .filter(|o| !o.is_pinned())
            .map(OrbInstance::label)
            .collect();
        let positions = policy.positions(&labels);
        log::debug!("{:?} layout for {} orbs", policy.kind(), positions.len());
        for (orb, position) in self
            .orbs
            .iter_mut()
            .filter(|o| !o.is_pinned())
            .zip(positions)
        {
            orb.set_position(position);
        }
    }

    /// Reorder orbs back-to-front from the camera. The only reorder.
    pub fn sort_by_depth(&mut self) {
        let camera = &self.camera;
        self.orbs.sort_by(|a, b| {
            camera
                .depth_of(b.position())
                .total_cmp(&camera.depth_of(a.position()))
        });
    }

    // -- Business values --

    /// Replace the balance snapshots and rebind every orb by label. Legacy
    /// bank ids are mapped to their current built-in id first.
    pub fn apply_snapshots(&mut self, snapshots: impl IntoIterator<Item = BalanceSnapshot>) {
        self.snapshots = snapshots
            .into_iter()
            .map(|s| {
                let key = s
                    .id
                    .parse::<BuiltinStyle>()
                    .map_or_else(|_| s.id.clone(), |style| style.id().to_owned());
                (key, s)
            })
            .collect();
        for orb in &mut self.orbs {
            orb.apply_snapshot(self.snapshots.get(orb.label()));
        }
    }

    // -- Per frame --

    /// Advance the scene clock by `delta` and update every orb.
    pub fn advance(&mut self, delta: f32) {
        let elapsed = self.clock.advance(delta);
        let frame = self.frame_input(elapsed, self.clock.delta());
        self.update(&frame);
    }

    /// Sample wall time and update every orb.
    pub fn tick(&mut self) {
        let elapsed = self.clock.tick();
        let frame = self.frame_input(elapsed, self.clock.delta());
        self.update(&frame);
    }

    /// Frame input at `elapsed` with the scene's pointer and audio level.
    pub fn frame_input(&self, elapsed: f32, delta: f32) -> FrameInput {
        FrameInput {
            elapsed,
            delta,
            pointer: self.pointer.map(|p| p.to_array()),
            audio_level: self.audio_level,
        }
    }

    /// Update hover from `frame.pointer`, then every orb. All orbs finish
    /// before anything is drawn.
    pub fn update(&mut self, frame: &FrameInput) {
        let hovered = frame
            .pointer
            .and_then(|ndc| self.pick(Vec2::from_array(ndc)));
        if hovered != self.hovered {
            self.hover(hovered);
        }
        for orb in &mut self.orbs {
            orb.update(frame, &self.params);
        }
    }

    /// Frame clock.
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Restart: clock to zero, pulses and hover cleared, selection dropped.
    pub fn restart(&mut self) {
        self.clock.restart();
        self.select(None);
        self.hovered = None;
        for orb in &mut self.orbs {
            orb.reset_transient();
        }
        log::info!("scene restarted");
    }

    // -- Camera, lights, post --

    /// Camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable camera.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Track a viewport aspect ratio.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.camera.aspect = aspect;
        }
    }

    /// Point lights.
    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    /// Replace the point lights (at most [`MAX_LIGHTS`](crate::camera::MAX_LIGHTS) are uploaded).
    pub fn set_lights(&mut self, lights: Vec<PointLight>) {
        self.lights = lights;
    }

    /// Per-frame scene uniform.
    pub fn scene_uniform(&self) -> SceneUniform {
        SceneUniform::new(&self.camera, &self.lights, self.ambient)
    }

    /// Post-processing chain.
    pub fn post_chain(&self) -> &PostChain {
        &self.post_chain
    }

    /// Mutable post-processing chain.
    pub fn post_chain_mut(&mut self) -> &mut PostChain {
        &mut self.post_chain
    }

    /// Label anchors for a `size` pixel viewport, in render order. Orbs
    /// behind the camera get none.
    pub fn label_anchors(&self, size: (u32, u32)) -> Vec<LabelAnchor<'_>> {
        self.orbs
            .iter()
            .filter_map(|orb| {
                let top = orb.position() + Vec3::Y * (orb.transform().scale + 0.3);
                self.camera
                    .project_to_screen(top, size)
                    .map(|position| LabelAnchor {
                        id: orb.id(),
                        label: orb.label(),
                        position,
                    })
            })
            .collect()
    }

    // -- Commands --

    /// Apply one command.
    pub fn execute(&mut self, command: OrbCommand) {
        match command {
            OrbCommand::PointerMoved { ndc } => self.set_pointer(ndc),
            OrbCommand::PointerLeft => {
                self.clear_pointer();
                self.hover(None);
            }
            OrbCommand::SetAudioLevel(level) => self.set_audio_level(level),
            OrbCommand::Click { ndc } => {
                self.set_pointer(ndc);
                match self.pointer.and_then(|p| self.pick(p)) {
                    Some(id) => {
                        self.select(Some(id));
                        let _ = self.pulse(id);
                    }
                    None => self.select(None),
                }
            }
            OrbCommand::Select(id) => self.select(Some(id)),
            OrbCommand::SelectNext => self.select_next(),
            OrbCommand::ClearSelection => self.select(None),
            OrbCommand::PulseSelected => {
                if let Some(id) = self.selected {
                    let _ = self.pulse(id);
                }
            }
            OrbCommand::Pulse(id) => {
                if !self.pulse(id) {
                    log::warn!("pulse for unknown {id}");
                }
            }
            OrbCommand::SetAgentState(state) => self.set_agent_state(state),
            OrbCommand::CycleAgentState => {
                if let Some(state) = self.agent_state() {
                    self.set_agent_state(state.next());
                }
            }
            OrbCommand::CycleLayout => self.set_layout(self.layout.next()),
            OrbCommand::ToggleBloom => {
                let _ = self.post_chain.toggle(PostPass::Bloom);
            }
            OrbCommand::ToggleChromatic => {
                let _ = self.post_chain.toggle(PostPass::ChromaticAberration);
            }
            OrbCommand::ToggleVignette => {
                let _ = self.post_chain.toggle(PostPass::Vignette);
            }
            OrbCommand::Restart => self.restart(),
        }
    }
}

/// Key, fill and rim lights.
fn default_lights() -> Vec<PointLight> {
    vec![
        PointLight {
            position: Vec3::new(5.0, 5.0, 8.0),
            color: CORNSILK,
            intensity: 1.0,
        },
        PointLight {
            position: Vec3::new(-6.0, 2.0, 4.0),
            color: VIOLET,
            intensity: 0.6,
        },
        PointLight {
            position: Vec3::new(0.0, -4.0, -6.0),
            color: GOLD,
            intensity: 0.8,
        },
    ]
}
