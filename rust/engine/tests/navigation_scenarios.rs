// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end planning and step scenarios on small floor plans.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use approx::assert_relative_eq;
use mapnav_engine::{
    plan, EngineConfig, FloorPlan, MotionSample, NavigationSession, Point, PositionListener,
    Quadrant, RouteStrategy, StepDetector, StepOutcome, StepPhase, TurnInstruction,
};
use mapnav_floorplan::load_from_str;

const STEADY: [f64; 3] = [0.1, 0.1, 0.0];

fn sample(z: f64, heading: f64) -> MotionSample {
    MotionSample {
        linear_acceleration: [0.0, 2.0, z],
        rotation_rate: STEADY,
        heading,
    }
}

/// One high -> low -> settle pattern at the default tuning.
fn step_gesture(heading: f64) -> Vec<MotionSample> {
    vec![sample(5.0, heading), sample(-5.0, heading), sample(3.0, heading)]
}

fn spanning_wall() -> FloorPlan {
    load_from_str(r#"{ "paths": [[[5, -5], [5, 5]]] }"#).unwrap()
}

#[test]
fn open_floor_routes_directly() {
    let route = plan(Point::new(0.0, 0.0), Point::new(10.0, 0.0), &FloorPlan::default()).unwrap();
    assert_eq!(route.strategy(), RouteStrategy::Direct);
    assert_eq!(
        route.waypoints(),
        &[Point::new(0.0, 0.0), Point::new(10.0, 0.0)]
    );
}

#[test]
fn wall_between_user_and_destination_forces_detour() {
    let floor = spanning_wall();
    let user = Point::new(0.0, 0.0);
    let dest = Point::new(10.0, 0.0);
    let route = plan(user, dest, &floor).unwrap();

    assert_ne!(route.strategy(), RouteStrategy::Direct);
    assert!(route.len() > 2);
    assert_eq!(route.waypoints()[0], user);
    assert_eq!(route.destination(), Some(dest));
    // both corners are degenerate here, so the deflection branch goes round
    // the top end of the wall
    assert_eq!(route.strategy(), RouteStrategy::WallDeflection { verified: true });
    assert!(route.is_clear(&floor));
    for leg in route.legs() {
        assert!(floor.intersections(&leg).is_empty());
    }
}

#[test]
fn wall_with_offset_destination_takes_single_corner() {
    let floor = spanning_wall();
    let route = plan(Point::new(0.0, 0.0), Point::new(10.0, 8.0), &floor).unwrap();

    assert_eq!(route.strategy(), RouteStrategy::CornerVerticalFirst);
    assert_eq!(
        route.waypoints(),
        &[Point::new(0.0, 0.0), Point::new(0.0, 8.0), Point::new(10.0, 8.0)]
    );
    assert!(route.is_clear(&floor));
}

#[test]
fn planning_is_idempotent() {
    let floor = spanning_wall();
    let user = Point::new(0.0, 0.0);
    let dest = Point::new(10.0, 0.0);
    assert_eq!(plan(user, dest, &floor).unwrap(), plan(user, dest, &floor).unwrap());
}

#[test]
fn one_gesture_heading_north_is_one_step() {
    let floor = FloorPlan::default();
    let mut detector = StepDetector::default();

    let outcomes: Vec<StepOutcome> = step_gesture(10.0)
        .iter()
        .map(|s| detector.process(s, &floor, Point::new(0.0, 0.0)))
        .collect();

    let committed: Vec<_> = outcomes.iter().filter(|o| o.is_committed()).collect();
    assert_eq!(committed.len(), 1);
    assert_eq!(committed[0].event().unwrap().quadrant, Quadrant::North);

    let counters = detector.counters();
    assert_eq!(counters.steps, 1);
    assert_eq!(counters.north, 1);
    assert_eq!(counters.east, 0);

    let position = detector.position(Point::new(0.0, 0.0));
    assert_relative_eq!(position.x, 0.0);
    assert_relative_eq!(position.y, -1.0 / 0.66, epsilon = 1e-12);
}

#[test]
fn step_into_wall_is_rejected_then_next_step_counts() {
    let blocked = load_from_str(r#"{ "paths": [[[-1, -1], [1, -1]]] }"#).unwrap();
    let mut detector = StepDetector::default();
    let origin = Point::new(0.0, 0.0);

    let last = step_gesture(10.0)
        .iter()
        .map(|s| detector.process(s, &blocked, origin))
        .last()
        .unwrap();
    assert!(matches!(last, StepOutcome::Rejected(_)));
    assert_eq!(detector.counters().steps, 0);
    assert_eq!(detector.counters().north, 0);
    assert_eq!(detector.phase(), StepPhase::Idle);

    // same gesture with the wall gone
    let open = FloorPlan::default();
    let last = step_gesture(10.0)
        .iter()
        .map(|s| detector.process(s, &open, origin))
        .last()
        .unwrap();
    assert!(last.is_committed());
    assert_eq!(detector.counters().north, 1);
    assert_eq!(detector.counters().steps, 1);
}

#[test]
fn repeated_gestures_keep_counting() {
    let floor = FloorPlan::default();
    let mut detector = StepDetector::default();
    for _ in 0..3 {
        for s in step_gesture(100.0) {
            detector.process(&s, &floor, Point::new(0.0, 0.0));
        }
    }
    assert_eq!(detector.counters().east, 3);
    let (_, east) = detector.displacement();
    assert_relative_eq!(east, 3.0 * 0.66, epsilon = 1e-12);
}

#[derive(Clone, Default)]
struct Trail(Rc<RefCell<Vec<Point>>>);

impl PositionListener for Trail {
    fn position_changed(&mut self, position: Point) {
        self.0.borrow_mut().push(position);
    }
}

#[test]
fn session_walks_towards_landmark() {
    let floor = load_from_str(
        r#"{
            "paths": [[[5, -5], [5, 5]]],
            "landmarks": [{ "label": "Lab", "point": [0, -3] }]
        }"#,
    )
    .unwrap();
    let mut session = NavigationSession::new(Arc::new(floor), EngineConfig::default()).unwrap();
    let trail = Trail::default();
    session.add_listener(Box::new(trail.clone()));

    session.set_origin(Point::new(0.0, 0.0));
    session.set_destination_to_landmark("Lab").unwrap();
    assert_eq!(session.instruction().unwrap(), TurnInstruction::WalkForward);

    let mut last = None;
    for s in step_gesture(0.0) {
        last = Some(session.on_sample(&s).unwrap());
    }
    let update = last.clone().unwrap();

    assert!(update.outcome.is_committed());
    assert_eq!(update.status.steps, 1);
    assert_relative_eq!(update.status.displacement_north, 0.66, epsilon = 1e-12);
    assert_eq!(update.route.strategy(), RouteStrategy::Direct);
    assert_eq!(trail.0.borrow().len(), 1);
    assert_relative_eq!(trail.0.borrow()[0].y, -1.0 / 0.66, epsilon = 1e-12);

    // second step lands within a meter of the landmark
    for s in step_gesture(0.0) {
        last = Some(session.on_sample(&s).unwrap());
    }
    let update = last.unwrap();
    assert_eq!(update.instruction, TurnInstruction::Arrived);
    assert_eq!(update.instruction.to_string(), "Destination reached");
}

#[test]
fn new_origin_restarts_counting() {
    let mut session =
        NavigationSession::new(Arc::new(FloorPlan::default()), EngineConfig::default()).unwrap();
    for s in step_gesture(90.0) {
        session.on_sample(&s).unwrap();
    }
    assert_eq!(session.status().steps, 1);

    let position = session.set_origin(Point::new(4.0, 4.0));
    assert_eq!(position, Point::new(4.0, 4.0));
    assert_eq!(session.status().steps, 0);
}

#[test]
fn turn_instruction_names_side() {
    let mut session =
        NavigationSession::new(Arc::new(FloorPlan::default()), EngineConfig::default()).unwrap();
    session.set_origin(Point::new(0.0, 0.0));
    session.set_destination(Point::new(10.0, 0.0));

    // facing north with the destination due east
    session.on_sample(&sample(0.0, 0.0)).unwrap();
    assert_eq!(
        session.instruction().unwrap().to_string(),
        "Turn right 90.00 degrees"
    );

    session.on_sample(&sample(0.0, 180.0)).unwrap();
    assert_eq!(
        session.instruction().unwrap().to_string(),
        "Turn left 90.00 degrees"
    );
}
