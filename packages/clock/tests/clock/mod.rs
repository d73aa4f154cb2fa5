use std::time::Duration;

use torrust_swarm_tracker_clock::clock::stopped::Stopped as _;
use torrust_swarm_tracker_clock::clock::Time;

use crate::CurrentClock;

#[test]
fn it_should_use_stopped_time_for_testing() {
    assert_eq!(CurrentClock::dbg_clock_type(), "Stopped".to_owned());

    let time = CurrentClock::now();
    std::thread::sleep(Duration::from_millis(50));
    let time_2 = CurrentClock::now();

    assert_eq!(time, time_2);
}

#[test]
fn it_should_let_tests_move_the_time_forward() {
    CurrentClock::local_set(&Duration::from_secs(1_000));

    CurrentClock::local_add(&Duration::from_secs(3_601)).unwrap();

    assert_eq!(CurrentClock::elapsed_since(&Duration::from_secs(1_000)), Duration::from_secs(3_601));
}
