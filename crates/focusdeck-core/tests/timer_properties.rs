//! Property tests for the timer engines.
//!
//! Drives the state machines with arbitrary operation sequences and checks
//! that the structural invariants hold after every step.

use focusdeck_core::timer::{
    CountdownSetting, CountdownTimer, PhaseDurations, PomodoroTimer, TimerPhase,
};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Op {
    Start,
    Pause,
    Toggle,
    Tick,
    Reset,
    Skip,
    Select(TimerPhase),
}

fn phase_strategy() -> impl Strategy<Value = TimerPhase> {
    prop_oneof![
        Just(TimerPhase::Work),
        Just(TimerPhase::ShortBreak),
        Just(TimerPhase::LongBreak),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => Just(Op::Start),
        1 => Just(Op::Pause),
        1 => Just(Op::Toggle),
        6 => Just(Op::Tick),
        1 => Just(Op::Reset),
        1 => Just(Op::Skip),
        1 => phase_strategy().prop_map(Op::Select),
    ]
}

proptest! {
    #[test]
    fn pomodoro_invariants_hold_for_any_sequence(
        ops in proptest::collection::vec(op_strategy(), 1..256),
        auto_advance in any::<bool>(),
        cadence in 1u64..6,
    ) {
        let durations = PhaseDurations {
            work_secs: 5,
            short_break_secs: 3,
            long_break_secs: 7,
        };
        let mut timer = PomodoroTimer::with_policy(durations, cadence, auto_advance);
        let mut last_count = 0;

        for op in ops {
            match op {
                Op::Start => {
                    timer.start();
                }
                Op::Pause => {
                    timer.pause();
                }
                Op::Toggle => {
                    timer.toggle();
                }
                Op::Tick => {
                    timer.tick();
                }
                Op::Reset => {
                    timer.reset();
                }
                Op::Skip => {
                    timer.skip();
                }
                Op::Select(phase) => {
                    let was_running = timer.is_running();
                    let before = (timer.phase(), timer.remaining_secs());
                    let event = timer.select_phase(phase);
                    if was_running {
                        // Rejected while running: state unchanged.
                        prop_assert!(event.is_none());
                        prop_assert_eq!((timer.phase(), timer.remaining_secs()), before);
                    }
                }
            }

            prop_assert!(timer.remaining_secs() <= timer.nominal_secs());
            // Running implies time left on the clock.
            prop_assert!(!timer.is_running() || timer.remaining_secs() > 0);
            // The completion counter never decreases.
            prop_assert!(timer.completed_work_sessions() >= last_count);
            last_count = timer.completed_work_sessions();
            prop_assert!(timer.progress_percent() <= 100);
        }
    }

    #[test]
    fn pomodoro_tick_while_paused_changes_nothing(
        setup in proptest::collection::vec(op_strategy(), 0..64),
    ) {
        let durations = PhaseDurations {
            work_secs: 5,
            short_break_secs: 3,
            long_break_secs: 7,
        };
        let mut timer = PomodoroTimer::new(durations);
        for op in setup {
            match op {
                Op::Start => { timer.start(); }
                Op::Pause => { timer.pause(); }
                Op::Toggle => { timer.toggle(); }
                Op::Tick => { timer.tick(); }
                Op::Reset => { timer.reset(); }
                Op::Skip => { timer.skip(); }
                Op::Select(phase) => { timer.select_phase(phase); }
            }
        }
        timer.pause();
        let before = (
            timer.phase(),
            timer.remaining_secs(),
            timer.completed_work_sessions(),
        );
        prop_assert!(timer.tick().is_none());
        let after = (
            timer.phase(),
            timer.remaining_secs(),
            timer.completed_work_sessions(),
        );
        prop_assert_eq!(before, after);
    }

    #[test]
    fn countdown_never_exceeds_initial(
        hours in 0u64..3,
        minutes in 0u64..60,
        ticks in 0usize..512,
    ) {
        let mut timer = CountdownTimer::new(CountdownSetting { hours, minutes });
        let initial = timer.initial_secs();
        timer.start();
        for _ in 0..ticks {
            timer.tick();
            prop_assert!(timer.remaining_secs() <= initial);
            prop_assert!(!timer.is_running() || timer.remaining_secs() > 0);
            prop_assert!(timer.progress_percent() <= 100);
        }
        if initial > 0 && ticks >= initial as usize {
            prop_assert_eq!(timer.remaining_secs(), 0);
            prop_assert!(!timer.is_running());
            prop_assert_eq!(timer.progress_percent(), 100);
        }
    }
}
