use crate::{
    animation::ease::Ease,
    animation::interpolate::tween,
    composition::model::Composition,
    foundation::core::{Fps, FrameIndex, FrameRange},
    foundation::error::{ReelError, ReelResult},
};

/// Default output sample rate for audio manifests.
pub const MIX_SAMPLE_RATE: u32 = 48_000;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Static audio track placed on the timeline.
pub struct AudioTrack {
    /// Audio asset key.
    pub asset: String,
    /// First timeline frame of the track.
    #[serde(default)]
    pub start_frame: u64,
    /// Track length; `None` plays to the end of the timeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_frames: Option<u64>,
    /// Linear gain, `>= 0`.
    #[serde(default = "default_volume")]
    pub volume: f64,
    /// Fade-in length in frames.
    #[serde(default)]
    pub fade_in_frames: u64,
    /// Fade-out length in frames.
    #[serde(default)]
    pub fade_out_frames: u64,
}

fn default_volume() -> f64 {
    1.0
}

impl AudioTrack {
    /// Full-volume track for `asset` starting at frame 0.
    pub fn new(asset: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            start_frame: 0,
            duration_frames: None,
            volume: default_volume(),
            fade_in_frames: 0,
            fade_out_frames: 0,
        }
    }

    pub(crate) fn validate(&self) -> ReelResult<()> {
        if self.asset.trim().is_empty() {
            return Err(ReelError::validation("audio track asset must be non-empty"));
        }
        if !self.volume.is_finite() || self.volume < 0.0 {
            return Err(ReelError::validation(format!(
                "audio track '{}' volume must be finite and >= 0",
                self.asset
            )));
        }
        if self.duration_frames == Some(0) {
            return Err(ReelError::validation(format!(
                "audio track '{}' duration_frames must be > 0",
                self.asset
            )));
        }
        Ok(())
    }

    /// Timeline frames the track covers, clipped to `timeline_frames`.
    pub fn range(&self, timeline_frames: u64) -> Option<FrameRange> {
        let end = match self.duration_frames {
            Some(d) => self.start_frame.saturating_add(d).min(timeline_frames),
            None => timeline_frames,
        };
        (self.start_frame < end).then_some(FrameRange {
            start: FrameIndex(self.start_frame),
            end: FrameIndex(end),
        })
    }

    /// Gain at `frame` after the fade envelope; 0 outside the track.
    pub fn volume_at(&self, frame: FrameIndex, timeline_frames: u64) -> f64 {
        let Some(range) = self.range(timeline_frames) else {
            return 0.0;
        };
        if !range.contains(frame) {
            return 0.0;
        }
        let f = frame.0 as f64;
        let start = range.start.0 as f64;
        let end = range.end.0 as f64;
        let fade_in = if self.fade_in_frames == 0 {
            1.0
        } else {
            let len = self.fade_in_frames as f64;
            tween(f, (start, start + len), (0.0, 1.0), Ease::Linear)
        };
        let fade_out = if self.fade_out_frames == 0 {
            1.0
        } else {
            let len = self.fade_out_frames as f64;
            tween(f + 1.0, (end - len, end), (1.0, 0.0), Ease::Linear)
        };
        self.volume * fade_in.min(fade_out)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One track mapped into timeline sample space.
pub struct AudioSegment {
    /// Asset key.
    pub asset: String,
    /// Relative source path.
    pub source: String,
    /// First timeline sample.
    pub timeline_start_sample: u64,
    /// End timeline sample (exclusive).
    pub timeline_end_sample: u64,
    /// Linear gain.
    pub volume: f64,
    /// Fade-in length in samples.
    pub fade_in_samples: u64,
    /// Fade-out length in samples.
    pub fade_out_samples: u64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Audio plan for the whole timeline, handed to the host mixer.
pub struct AudioManifest {
    /// Output sample rate.
    pub sample_rate: u32,
    /// Output channel count.
    pub channels: u16,
    /// Timeline length in samples.
    pub total_samples: u64,
    /// Scheduled tracks.
    pub segments: Vec<AudioSegment>,
}

/// Convert a frame delta to samples, rounding the rational fps to the nearest sample.
pub fn frame_to_sample(frame_delta: u64, fps: Fps, sample_rate: u32) -> u64 {
    let num = u128::from(frame_delta) * u128::from(sample_rate) * u128::from(fps.den);
    let den = u128::from(fps.num);
    ((num + (den / 2)) / den) as u64
}

/// Map every audio track of `comp` into timeline sample ranges.
pub fn build_audio_manifest(comp: &Composition, sample_rate: u32) -> ReelResult<AudioManifest> {
    if sample_rate == 0 {
        return Err(ReelError::validation("audio sample_rate must be > 0"));
    }
    let total = comp.duration_frames()?;
    let to_sample = |frames: u64| frame_to_sample(frames, comp.fps, sample_rate);

    let mut segments = Vec::with_capacity(comp.audio.len());
    for track in &comp.audio {
        let Some(range) = track.range(total) else {
            tracing::debug!(asset = %track.asset, "audio track starts after the timeline ends");
            continue;
        };
        let source = comp
            .assets
            .get(&track.asset)
            .map(|a| a.source.clone())
            .ok_or_else(|| {
                ReelError::validation(format!(
                    "audio track references missing asset key '{}'",
                    track.asset
                ))
            })?;
        segments.push(AudioSegment {
            asset: track.asset.clone(),
            source,
            timeline_start_sample: to_sample(range.start.0),
            timeline_end_sample: to_sample(range.end.0),
            volume: track.volume,
            fade_in_samples: to_sample(track.fade_in_frames.min(range.len_frames())),
            fade_out_samples: to_sample(track.fade_out_frames.min(range.len_frames())),
        });
    }

    Ok(AudioManifest {
        sample_rate,
        channels: 2,
        total_samples: to_sample(total),
        segments,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/audio/manifest.rs"]
mod tests;
