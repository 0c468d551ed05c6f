use super::*;
use crate::dom::MemoryDom;
use crate::util::scheduler::ManualScheduler;

fn setup(phrases: &[&str]) -> (MemoryDom, ManualScheduler, TypingAnimator<MemoryDom, ManualScheduler>) {
    let dom = MemoryDom::new();
    dom.append(&dom.body_element(), "span", Some("typing"), &[]);
    let scheduler = ManualScheduler::new();
    let config = TypingConfig { phrases: phrases.iter().map(|p| (*p).to_owned()).collect(), ..TypingConfig::default() };
    let animator = TypingAnimator::new(&dom, &scheduler, &config).unwrap();
    (dom, scheduler, animator)
}

fn shown(dom: &MemoryDom) -> String {
    dom.text(&dom.by_id("typing").unwrap())
}

#[test]
fn missing_target_is_setup_error() {
    let dom = MemoryDom::new();
    let err = TypingAnimator::new(&dom, &ManualScheduler::new(), &TypingConfig::default()).err();
    assert_eq!(err, Some(SetupError::MissingElement("typing".to_owned())));
}

#[test]
fn start_renders_first_frame_and_schedules_next() {
    let (dom, scheduler, animator) = setup(&["hi"]);
    animator.start();
    assert!(animator.is_running());
    assert_eq!(shown(&dom), "h");
    assert_eq!(scheduler.pending_timers(), 1);
}

#[test]
fn ticks_follow_typing_delays() {
    let (dom, scheduler, animator) = setup(&["hi", "yo"]);
    animator.start();

    let mut trace = vec![(shown(&dom), 0)];
    for _ in 0..4 {
        let delay = scheduler.run_next().unwrap();
        trace.push((shown(&dom), delay));
    }
    let expected = [("h", 0), ("hi", 140), ("h", 1500), ("", 80), ("y", 140)];
    let expected = expected.map(|(text, delay)| (text.to_owned(), delay));
    assert_eq!(trace, expected.to_vec());
    assert_eq!(animator.cursor().phrase_index, 1);
}

#[test]
fn stop_cancels_pending_tick() {
    let (dom, scheduler, animator) = setup(&["hello"]);
    animator.start();
    scheduler.run_next();
    animator.stop();

    assert!(!animator.is_running());
    assert_eq!(scheduler.pending_timers(), 0);
    scheduler.advance(10_000);
    assert_eq!(shown(&dom), "he");
}

#[test]
fn start_twice_does_not_double_schedule() {
    let (_, scheduler, animator) = setup(&["hello"]);
    animator.start();
    animator.start();
    assert_eq!(scheduler.pending_timers(), 1);
}

#[test]
fn dropping_animator_stops_the_loop() {
    let (dom, scheduler, animator) = setup(&["hello"]);
    animator.start();
    drop(animator);
    scheduler.advance(1_000);
    assert_eq!(shown(&dom), "h");
}
