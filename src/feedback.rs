//! Collision sound feedback
//!
//! The physics engine reports boundary contacts; `CollisionFeedback` answers
//! each one by playing the bundled collision sound. Playback is
//! fire-and-forget. A sound asset that cannot be resolved disables the
//! feedback instead of failing.

use crate::settings::Settings;
use crate::sim::{BoundaryContact, BoundaryContactListener};

/// Handle to a loaded sound asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundId(pub usize);

/// Audio backend
pub trait SoundPlayer {
    /// Resolve a bundled asset. `None` if it does not exist.
    fn load(&mut self, asset: &str) -> Option<SoundId>;
    /// Start playing; never waits for completion
    fn play(&mut self, sound: SoundId, volume: f32);
}

/// Plays the collision sound on every boundary contact
pub struct CollisionFeedback<P> {
    player: P,
    sound: Option<SoundId>,
    volume: f32,
    muted: bool,
}

impl<P: SoundPlayer> CollisionFeedback<P> {
    pub fn new(mut player: P, settings: &Settings) -> Self {
        let sound = settings.collision_sound.as_deref().and_then(|asset| {
            let id = player.load(asset);
            if id.is_none() {
                log::warn!("Sound asset {:?} not found - collision sound disabled", asset);
            }
            id
        });

        Self {
            player,
            sound,
            volume: settings.volume.clamp(0.0, 1.0),
            muted: settings.muted,
        }
    }

    /// Whether contacts will make any sound
    pub fn is_enabled(&self) -> bool {
        self.sound.is_some() && !self.muted && self.volume > 0.0
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn player(&self) -> &P {
        &self.player
    }
}

impl<P: SoundPlayer> BoundaryContactListener for CollisionFeedback<P> {
    fn on_boundary_contact(&mut self, contact: BoundaryContact) {
        if !self.is_enabled() {
            return;
        }
        let Some(sound) = self.sound else { return };

        log::trace!("Boundary contact on {:?} at {:?}", contact.edge, contact.point);
        self.player.play(sound, self.volume);
    }
}

/// Native player: resolves assets on disk and logs playback
#[cfg(not(target_arch = "wasm32"))]
pub struct AssetPlayer {
    root: std::path::PathBuf,
    assets: Vec<std::path::PathBuf>,
}

#[cfg(not(target_arch = "wasm32"))]
impl AssetPlayer {
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self {
            root: root.into(),
            assets: Vec::new(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl SoundPlayer for AssetPlayer {
    fn load(&mut self, asset: &str) -> Option<SoundId> {
        let path = self.root.join(asset);
        if !path.is_file() {
            return None;
        }
        self.assets.push(path);
        Some(SoundId(self.assets.len() - 1))
    }

    fn play(&mut self, sound: SoundId, volume: f32) {
        if let Some(path) = self.assets.get(sound.0) {
            log::info!("Playing {} at volume {:.2}", path.display(), volume);
        }
    }
}

/// Browser player backed by `<audio>` elements
#[cfg(target_arch = "wasm32")]
#[derive(Default)]
pub struct DomAudioPlayer {
    elements: Vec<web_sys::HtmlAudioElement>,
}

#[cfg(target_arch = "wasm32")]
impl SoundPlayer for DomAudioPlayer {
    fn load(&mut self, asset: &str) -> Option<SoundId> {
        let element = web_sys::HtmlAudioElement::new_with_src(asset).ok()?;
        element.set_preload("auto");
        self.elements.push(element);
        Some(SoundId(self.elements.len() - 1))
    }

    fn play(&mut self, sound: SoundId, volume: f32) {
        let Some(element) = self.elements.get(sound.0) else { return };
        element.set_volume(volume as f64);
        element.set_current_time(0.0);
        // Autoplay policies may reject until the first user gesture
        let _ = element.play();
    }
}
