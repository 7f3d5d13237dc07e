use super::*;
use crate::composition::dsl::{CompositionBuilder, SceneBuilder};
use crate::composition::model::TransitionSpec;
use crate::foundation::core::Canvas;

fn fps() -> Fps {
    Fps::new(30, 1).unwrap()
}

fn comp_with(track: AudioTrack) -> Composition {
    CompositionBuilder::new(
        fps(),
        Canvas {
            width: 640,
            height: 360,
        },
    )
    .audio_asset("voice", "audio/voice.mp3")
    .unwrap()
    .scene(SceneBuilder::new("a", 60).build())
    .scene(SceneBuilder::new("b", 60).build())
    .transition(TransitionSpec::new("fade", 10))
    .audio(track)
    .build()
    .unwrap()
}

#[test]
fn frame_to_sample_uses_rational_fps() {
    let ntsc = Fps::new(30_000, 1001).unwrap();
    assert_eq!(frame_to_sample(0, ntsc, 48_000), 0);
    assert_eq!(frame_to_sample(1, ntsc, 48_000), 1602);
    assert_eq!(frame_to_sample(30, fps(), 48_000), 48_000);
}

#[test]
fn open_ended_track_runs_to_timeline_end() {
    let track = AudioTrack::new("voice");
    assert_eq!(
        track.range(110),
        Some(FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(110)
        })
    );
    let late = AudioTrack {
        start_frame: 200,
        ..AudioTrack::new("voice")
    };
    assert_eq!(late.range(110), None);
}

#[test]
fn volume_envelope_fades_both_ends() {
    let track = AudioTrack {
        volume: 0.8,
        fade_in_frames: 10,
        fade_out_frames: 10,
        ..AudioTrack::new("voice")
    };
    assert_eq!(track.volume_at(FrameIndex(0), 100), 0.0);
    assert!((track.volume_at(FrameIndex(5), 100) - 0.4).abs() < 1e-12);
    assert!((track.volume_at(FrameIndex(50), 100) - 0.8).abs() < 1e-12);
    assert_eq!(track.volume_at(FrameIndex(99), 100), 0.0);
    assert_eq!(track.volume_at(FrameIndex(100), 100), 0.0);
}

#[test]
fn manifest_maps_tracks_to_samples() {
    let comp = comp_with(AudioTrack {
        start_frame: 15,
        fade_out_frames: 30,
        ..AudioTrack::new("voice")
    });
    let m = build_audio_manifest(&comp, MIX_SAMPLE_RATE).unwrap();
    assert_eq!(m.channels, 2);
    assert_eq!(m.total_samples, 110 * 1600);
    assert_eq!(m.segments.len(), 1);
    let seg = &m.segments[0];
    assert_eq!(seg.source, "audio/voice.mp3");
    assert_eq!(seg.timeline_start_sample, 15 * 1600);
    assert_eq!(seg.timeline_end_sample, 110 * 1600);
    assert_eq!(seg.fade_out_samples, 30 * 1600);
    assert_eq!(seg.fade_in_samples, 0);
}

#[test]
fn manifest_rejects_zero_sample_rate() {
    let comp = comp_with(AudioTrack::new("voice"));
    assert!(build_audio_manifest(&comp, 0).is_err());
}

#[test]
fn invalid_tracks_fail_validation() {
    let loud = AudioTrack {
        volume: f64::NAN,
        ..AudioTrack::new("voice")
    };
    assert!(loud.validate().is_err());
    let empty = AudioTrack {
        duration_frames: Some(0),
        ..AudioTrack::new("voice")
    };
    assert!(empty.validate().is_err());
}
