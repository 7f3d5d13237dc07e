use std::collections::BTreeMap;

use crate::{
    assets::refs::AssetRef,
    audio::manifest::AudioTrack,
    composition::model::{Block, Composition, SceneDef, ShellStyle, Theme, TransitionSpec},
    foundation::core::{Canvas, Fps},
    foundation::error::{ReelError, ReelResult},
};

/// Fluent builder for [`Composition`]; `build` validates the result.
pub struct CompositionBuilder {
    fps: Fps,
    canvas: Canvas,
    theme: Theme,
    assets: BTreeMap<String, AssetRef>,
    scenes: Vec<SceneDef>,
    transitions: Vec<TransitionSpec>,
    audio: Vec<AudioTrack>,
}

impl CompositionBuilder {
    /// Empty composition with the default theme.
    pub fn new(fps: Fps, canvas: Canvas) -> Self {
        Self {
            fps,
            canvas,
            theme: Theme::default(),
            assets: BTreeMap::new(),
            scenes: Vec::new(),
            transitions: Vec::new(),
            audio: Vec::new(),
        }
    }

    /// Replace the theme.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Register an asset; keys must be unique.
    pub fn asset(mut self, key: impl Into<String>, asset: AssetRef) -> ReelResult<Self> {
        let key = key.into();
        if self.assets.contains_key(&key) {
            return Err(ReelError::validation(format!(
                "duplicate asset key '{key}'"
            )));
        }
        self.assets.insert(key, asset);
        Ok(self)
    }

    /// Register an image asset.
    pub fn image_asset(
        self,
        key: impl Into<String>,
        source: impl Into<String>,
    ) -> ReelResult<Self> {
        self.asset(key, AssetRef::image(source))
    }

    /// Register an audio asset.
    pub fn audio_asset(
        self,
        key: impl Into<String>,
        source: impl Into<String>,
    ) -> ReelResult<Self> {
        self.asset(key, AssetRef::audio(source))
    }

    /// Append a scene.
    pub fn scene(mut self, scene: SceneDef) -> Self {
        self.scenes.push(scene);
        self
    }

    /// Append the transition into the next scene.
    pub fn transition(mut self, transition: TransitionSpec) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Append an audio track.
    pub fn audio(mut self, track: AudioTrack) -> Self {
        self.audio.push(track);
        self
    }

    /// Assemble and validate.
    pub fn build(self) -> ReelResult<Composition> {
        let comp = Composition {
            fps: self.fps,
            canvas: self.canvas,
            theme: self.theme,
            assets: self.assets,
            scenes: self.scenes,
            transitions: self.transitions,
            audio: self.audio,
        };
        comp.validate()?;
        Ok(comp)
    }
}

/// Fluent builder for [`SceneDef`].
pub struct SceneBuilder {
    id: String,
    duration_frames: u64,
    shell: ShellStyle,
    blocks: Vec<Block>,
}

impl SceneBuilder {
    /// Scene with the default shell and no blocks.
    pub fn new(id: impl Into<String>, duration_frames: u64) -> Self {
        Self {
            id: id.into(),
            duration_frames,
            shell: ShellStyle::default(),
            blocks: Vec::new(),
        }
    }

    /// Replace the shell style.
    pub fn shell(mut self, shell: ShellStyle) -> Self {
        self.shell = shell;
        self
    }

    /// Fade the scene out over its last `frames` frames.
    pub fn exit_frames(mut self, frames: u64) -> Self {
        self.shell.exit_frames = frames;
        self
    }

    /// Append a block.
    pub fn block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Finish the scene.
    pub fn build(self) -> SceneDef {
        SceneDef {
            id: self.id,
            duration_frames: self.duration_frames,
            shell: self.shell,
            blocks: self.blocks,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/dsl.rs"]
mod tests;
