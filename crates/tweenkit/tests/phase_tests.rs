//! Phase machine behavior observed through standalone tweens: exact
//! boundaries, overflow, repeats, auto-reverse, rewinding.

mod common;

use common::{point, point_tween, read_point, Recorder};
use tweenkit::{Direction, EventKind, EventMask, State};

#[test]
fn boundary_exactness_whole_duration_in_one_call() {
    let rec = Recorder::new();
    let obj = point(0.0, 0.0);
    let mut tween = point_tween(&obj, (10.0, 20.0), 1.0).on(EventMask::ANY, rec.hook("t"));

    let overflow = tween.advance(1.0);

    assert_eq!(overflow, 0.0);
    assert_eq!(tween.state(), State::Finished);
    assert_eq!(read_point(&obj), (10.0, 20.0), "exact target, no epsilon");
    assert_eq!(rec.count("t", EventKind::Begin), 1);
    assert_eq!(rec.count("t", EventKind::Start), 1);
    assert_eq!(rec.count("t", EventKind::End), 1);
    assert_eq!(rec.count("t", EventKind::Complete), 1);
}

#[test]
fn overflow_round_trip_re_enters_a_finished_tween() {
    let rec = Recorder::new();
    let obj = point(0.0, 0.0);
    let mut tween = point_tween(&obj, (10.0, 20.0), 1.0).on(EventMask::ANY, rec.hook("t"));

    let overflow = tween.advance(1.5);
    assert_eq!(overflow, 0.5);
    assert_eq!(tween.state(), State::Finished);

    // Rewind by the overflow: time flows back into the running window.
    let back = tween.advance(-0.5);
    assert_eq!(back, 0.0);
    assert_eq!(tween.state(), State::Run);
    assert_eq!(tween.current_time(), 0.5);
    assert_eq!(read_point(&obj), (5.0, 10.0), "exact midpoint");
    assert_eq!(rec.count("t", EventKind::BackBegin), 1);
    assert_eq!(rec.count("t", EventKind::BackStart), 1);
}

#[test]
fn time_conservation_without_boundary_crossings() {
    let split_obj = point(0.0, 0.0);
    let mut split = point_tween(&split_obj, (10.0, 20.0), 1.0);
    split.advance(0.3);
    split.advance(0.4);

    let whole_obj = point(0.0, 0.0);
    let mut whole = point_tween(&whole_obj, (10.0, 20.0), 1.0);
    whole.advance(0.7);

    let (sx, sy) = read_point(&split_obj);
    let (wx, wy) = read_point(&whole_obj);
    assert!((sx - wx).abs() < 1e-5 && (sy - wy).abs() < 1e-5);
    assert_eq!(split.state(), whole.state());
}

#[test]
fn determinism_across_identical_runs() {
    let run = || {
        let rec = Recorder::new();
        let obj = point(0.0, 0.0);
        let mut tween = point_tween(&obj, (10.0, 20.0), 1.0)
            .repeat_auto_reverse(1, 0.1)
            .expect("repeat")
            .on(EventMask::ANY, rec.hook("t"));
        for delta in [0.2, 0.9, -0.3, 0.5, 1.4] {
            tween.advance(delta);
        }
        (rec.all(), read_point(&obj))
    };
    assert_eq!(run(), run());
}

#[test]
fn auto_reverse_odd_repeat_ends_at_start_value() {
    let rec = Recorder::new();
    let obj = point(0.0, 0.0);
    let mut tween = point_tween(&obj, (10.0, 20.0), 1.0)
        .repeat_auto_reverse(1, 0.0)
        .expect("repeat")
        .on(EventMask::ANY, rec.hook("t"));

    assert_eq!(tween.full_duration(), 2.0);
    let overflow = tween.advance(2.0);

    assert_eq!(overflow, 0.0);
    assert_eq!(tween.state(), State::Finished);
    assert_eq!(read_point(&obj), (0.0, 0.0), "odd count rests at start");
    assert_eq!(rec.count("t", EventKind::Complete), 1);
    assert_eq!(rec.count("t", EventKind::BackStart), 1);
    assert_eq!(rec.count("t", EventKind::BackComplete), 1);
    assert_eq!(rec.count("t", EventKind::BackBegin), 0, "begin latch held");
}

#[test]
fn auto_reverse_even_repeat_ends_at_target_value() {
    let obj = point(0.0, 0.0);
    let mut tween = point_tween(&obj, (10.0, 20.0), 1.0)
        .repeat_auto_reverse(2, 0.0)
        .expect("repeat");

    assert_eq!(tween.full_duration(), 3.0);
    tween.advance(3.0);

    assert_eq!(tween.state(), State::Finished);
    assert_eq!(read_point(&obj), (10.0, 20.0), "even count rests at target");
}

#[test]
fn large_delta_crosses_every_repeat_iteration() {
    let rec = Recorder::new();
    let obj = point(0.0, 0.0);
    let mut tween = point_tween(&obj, (10.0, 20.0), 1.0)
        .repeat(2, 0.5)
        .expect("repeat")
        .on(EventMask::ANY, rec.hook("t"));

    assert_eq!(tween.full_duration(), 4.0);
    let overflow = tween.advance(5.0);

    assert_eq!(overflow, 1.0);
    assert_eq!(rec.count("t", EventKind::Begin), 1);
    assert_eq!(rec.count("t", EventKind::Start), 3, "one per iteration");
    assert_eq!(rec.count("t", EventKind::End), 3);
    assert_eq!(rec.count("t", EventKind::Complete), 1, "terminal only");
}

#[test]
fn large_delta_lands_at_the_exact_residual_time() {
    let obj = point(0.0, 0.0);
    let mut tween = point_tween(&obj, (10.0, 20.0), 1.0).repeat(2, 0.5).expect("repeat");

    tween.advance(2.2);

    // 1.0 first iteration + 0.5 repeat delay + 0.7 into the second.
    assert_eq!(tween.state(), State::Run);
    assert!((tween.current_time() - 0.7).abs() < 1e-5);
    let (x, _) = read_point(&obj);
    assert!((x - 7.0).abs() < 1e-4);
}

#[test]
fn negative_zero_delta_counts_as_reverse() {
    let rec = Recorder::new();
    let obj = point(0.0, 0.0);
    let mut tween = point_tween(&obj, (10.0, 20.0), 1.0).on(EventMask::ANY, rec.hook("t"));

    tween.advance(0.0);
    assert!(rec.all().is_empty(), "+0.0 stays inside the delay");

    tween.advance(-0.0);
    assert_eq!(tween.direction(), Direction::Reverse);
    assert_eq!(rec.count("t", EventKind::BackBegin), 1);
    assert_eq!(rec.count("t", EventKind::BackComplete), 1);
    assert_eq!(tween.state(), State::Finished);
    assert_eq!(read_point(&obj), (0.0, 0.0));
}

#[test]
fn auto_reverse_leg_overflow_returns_in_wall_clock_sign() {
    let obj = point(0.0, 0.0);
    let mut tween = point_tween(&obj, (10.0, 20.0), 1.0)
        .repeat_auto_reverse(1, 0.0)
        .expect("repeat");

    // Crosses into the reverse leg; nothing left over yet.
    assert_eq!(tween.advance(1.5), 0.0);
    assert_eq!(tween.state(), State::Run);
    assert!((tween.current_time() - 0.5).abs() < 1e-5);

    // The reverse leg consumes 0.5 of internal time; the caller still
    // gets the surplus back as positive wall-clock time.
    let overflow = tween.advance(0.7);
    assert!((overflow - 0.2).abs() < 1e-5);
    assert_eq!(tween.state(), State::Finished);
    assert_eq!(read_point(&obj), (0.0, 0.0), "odd count rests at start");
}

#[test]
fn far_rewind_past_the_window_only_tracks_the_clock() {
    let rec = Recorder::new();
    let obj = point(0.0, 0.0);
    let mut tween = point_tween(&obj, (10.0, 20.0), 1.0).on(EventMask::ANY, rec.hook("t"));

    tween.advance(2.0);
    assert_eq!(tween.state(), State::Finished);
    rec.clear();

    // Jumps clear over [0, duration); no replay, no events, no writes.
    tween.advance(-5.0);
    assert_eq!(tween.state(), State::Finished);
    assert!((tween.current_time() - -4.0).abs() < 1e-5);
    assert!(rec.all().is_empty());
    assert_eq!(read_point(&obj), (10.0, 20.0), "still at target");
}

#[test]
fn reset_is_idempotent_regardless_of_history() {
    let obj = point(0.0, 0.0);
    let mut tween = point_tween(&obj, (10.0, 20.0), 1.0)
        .delay(0.25)
        .expect("delay")
        .repeat(1, 0.0)
        .expect("repeat");

    let pristine = |t: &tweenkit::Tween| {
        t.state() == State::Start
            && t.current_time() == -0.25
            && t.direction() == Direction::Forward
            && !t.is_finished()
    };

    tween.advance(0.7); // mid-run
    tween.reset();
    assert!(pristine(&tween));

    tween.advance(10.0); // finished
    tween.reset();
    assert!(pristine(&tween));

    tween.cancel();
    tween.reset();
    assert!(pristine(&tween), "reset clears cancellation");
}

#[test]
fn paused_and_canceled_entities_are_inert() {
    let obj = point(0.0, 0.0);
    let mut tween = point_tween(&obj, (10.0, 20.0), 1.0);
    tween.advance(0.5);

    tween.pause();
    assert_eq!(tween.advance(0.25), 0.25, "delta returned unconsumed");
    assert_eq!(tween.current_time(), 0.5);

    tween.resume();
    tween.advance(0.25);
    assert_eq!(tween.current_time(), 0.75);

    tween.cancel();
    assert!(tween.is_finished());
    assert_eq!(tween.advance(0.25), 0.25);
    assert_eq!(tween.current_time(), 0.75);
}
