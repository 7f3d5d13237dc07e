use super::*;

#[test]
fn starts_accumulate_durations_minus_overlaps() {
    let t = SceneTiming::new(&[100, 80, 60], &[10, 20]).unwrap();
    assert_eq!(t.scene_range(0).unwrap().start, FrameIndex(0));
    assert_eq!(t.scene_range(1).unwrap().start, FrameIndex(90));
    assert_eq!(t.scene_range(2).unwrap().start, FrameIndex(150));
    assert_eq!(t.total_frames(), 210);
    assert_eq!(t.scene_range(2).unwrap().end, FrameIndex(210));
}

#[test]
fn uniform_overlap_total_matches_closed_form() {
    let d = [150, 180, 210, 180, 180, 150];
    let t = SceneTiming::new(&d, &[20; 5]).unwrap();
    assert_eq!(t.total_frames(), d.iter().sum::<u64>() - 5 * 20);
}

#[test]
fn local_frame_never_negative() {
    let t = SceneTiming::new(&[30, 30], &[5]).unwrap();
    assert_eq!(t.local_frame(1, FrameIndex(0)), Some(FrameIndex(0)));
    assert_eq!(t.local_frame(1, FrameIndex(25)), Some(FrameIndex(0)));
    assert_eq!(t.local_frame(1, FrameIndex(27)), Some(FrameIndex(2)));
    assert_eq!(t.local_frame(2, FrameIndex(27)), None);
}

#[test]
fn active_scenes_and_windows() {
    let t = SceneTiming::new(&[30, 30], &[5]).unwrap();
    assert_eq!(t.active_at(FrameIndex(24)), vec![0]);
    assert_eq!(t.active_at(FrameIndex(25)), vec![0, 1]);
    assert_eq!(t.active_at(FrameIndex(29)), vec![0, 1]);
    assert_eq!(t.active_at(FrameIndex(30)), vec![1]);

    assert_eq!(t.transition_at(FrameIndex(24)), None);
    assert_eq!(
        t.transition_at(FrameIndex(25)),
        Some(TransitionWindow {
            boundary: 0,
            offset: 0,
            duration: 5
        })
    );
    assert_eq!(t.transition_at(FrameIndex(29)).unwrap().offset, 4);
    assert_eq!(t.transition_at(FrameIndex(30)), None);
}

#[test]
fn zero_overlap_is_a_hard_cut() {
    let t = SceneTiming::new(&[10, 10], &[0]).unwrap();
    assert_eq!(t.total_frames(), 20);
    assert_eq!(t.active_at(FrameIndex(10)), vec![1]);
    assert_eq!(t.transition_at(FrameIndex(9)), None);
}

#[test]
fn rejects_bad_layouts() {
    assert!(SceneTiming::new(&[], &[]).is_err());
    assert!(SceneTiming::new(&[10, 10], &[]).is_err());
    assert!(SceneTiming::new(&[10, 0], &[0]).is_err());
    assert!(SceneTiming::new(&[10, 30], &[10]).is_err());
    assert!(SceneTiming::new(&[30, 10], &[10]).is_err());
    assert!(SceneTiming::new(&[30, 15, 30], &[8, 8]).is_err());
    assert!(SceneTiming::new(&[30, 16, 30], &[8, 8]).is_ok());
}

#[test]
fn oversized_timeline_is_a_validation_error() {
    let err = SceneTiming::new(&[u64::MAX / 2 + 10; 2], &[1]).unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
    assert!(err.to_string().contains("overflows"));

    let huge = 18_446_744_073_709_551_000;
    assert!(SceneTiming::new(&[huge, huge], &[5]).is_err());
    assert!(SceneTiming::new(&[huge, huge, huge], &[huge - 1, huge - 1]).is_err());

    let t = SceneTiming::new(&[u64::MAX], &[]).unwrap();
    assert_eq!(t.total_frames(), u64::MAX);
}
