use crate::construction::session::{
    ClickOutcome, ConstructionError, ConstructionSession, InteractionState, Mode,
};
use crate::construction::snap::CanvasConfig;
use crate::construction::types::{ConstructionScene, PrimitiveId};
use crate::geometry::{Circle, GeometryError, Line, Point, Primitive, PrimitiveKind};

fn seeded_session() -> ConstructionSession {
    ConstructionSession::default()
}

#[test]
fn test_seeded_scene_layout() {
    let session = seeded_session();
    let kinds: Vec<_> = session.scene.entries.iter().map(|e| e.kind()).collect();
    assert_eq!(kinds, vec![PrimitiveKind::Point, PrimitiveKind::Point, PrimitiveKind::Line]);
    assert_eq!(session.state, InteractionState::Idle);
    assert_eq!(session.scene.compass_radius, None);
}

#[test]
fn test_click_while_idle_is_ignored() {
    let mut session = seeded_session();
    assert_eq!(session.click([0.0, 0.0]), Ok(ClickOutcome::Ignored));
    assert!(session.scene.entries.iter().all(|e| !e.picked));
}

#[test]
fn test_compass_then_circle() {
    let mut session = seeded_session();

    session.select_mode(Mode::Compass);
    assert_eq!(session.state, InteractionState::CompassFirstPick);

    let outcome = session.click([0.0, 0.0]).expect("first pick");
    assert_eq!(
        outcome,
        ClickOutcome::Advanced(InteractionState::CompassSecondPick { first: PrimitiveId(0) })
    );
    assert!(session.scene.entries[0].picked, "Picked point should be flagged");

    let outcome = session.click([0.2, 0.0]).expect("second pick");
    match outcome {
        ClickOutcome::RadiusSet(r) => assert!((r - 0.2).abs() < 1e-12),
        other => panic!("Expected RadiusSet, got {:?}", other),
    }
    assert_eq!(session.state, InteractionState::Idle);
    assert!(session.scene.entries.iter().all(|e| !e.picked), "Picks should be cleared");

    session.select_mode(Mode::Circle);
    let outcome = session.click([0.2, 0.0]).expect("center pick");
    assert_eq!(outcome, ClickOutcome::Created(vec![PrimitiveId(3)]));
    assert_eq!(session.state, InteractionState::Idle);

    match &session.scene.entries[3].geometry {
        Primitive::Circle(c) => {
            assert_eq!(c.center, [0.2, 0.0]);
            assert!((c.radius - 0.2).abs() < 1e-12);
        }
        other => panic!("Expected circle, got {:?}", other),
    }
}

#[test]
fn test_circle_without_compass_radius() {
    let mut session = seeded_session();
    session.select_mode(Mode::Circle);
    assert_eq!(session.click([0.0, 0.0]), Err(ConstructionError::NoCompassRadius));
    assert_eq!(session.state, InteractionState::Idle);
    assert_eq!(session.scene.len(), 3);
}

#[test]
fn test_wrong_operand_type_does_not_advance() {
    let mut session = seeded_session();
    session.select_mode(Mode::Compass);

    // (0.6, 0) is only on the line
    assert_eq!(session.click([0.6, 0.0]), Ok(ClickOutcome::Ignored));
    assert_eq!(session.state, InteractionState::CompassFirstPick);

    // Empty canvas area
    assert_eq!(session.click([0.5, 0.5]), Ok(ClickOutcome::Ignored));
    assert_eq!(session.state, InteractionState::CompassFirstPick);

    // A lone point is not an intersection operand
    let mut scene = ConstructionScene::new();
    scene.add(Point::new(0.5, 0.5));
    let mut isolated = ConstructionSession::new(scene, CanvasConfig::default());
    isolated.select_mode(Mode::Intersection);
    assert_eq!(isolated.click([0.5, 0.5]), Ok(ClickOutcome::Ignored));
    assert_eq!(isolated.state, InteractionState::IntersectionFirstPick);
}

#[test]
fn test_line_through_two_points() {
    let mut session = seeded_session();
    session.select_mode(Mode::Line);
    session.click([0.0, 0.0]).expect("first pick");
    let outcome = session.click([0.2, 0.0]).expect("second pick");
    assert_eq!(outcome, ClickOutcome::Created(vec![PrimitiveId(3)]));
    assert_eq!(session.scene.entries[3].kind(), PrimitiveKind::Line);
}

#[test]
fn test_line_through_same_point_is_reported() {
    let mut session = seeded_session();
    session.select_mode(Mode::Line);
    session.click([0.0, 0.0]).expect("first pick");
    assert_eq!(
        session.click([0.0, 0.0]),
        Err(ConstructionError::Geometry(GeometryError::DegenerateLine))
    );
    assert_eq!(session.state, InteractionState::Idle);
    assert_eq!(session.scene.len(), 3);
}

#[test]
fn test_mode_switch_clears_picks() {
    let mut session = seeded_session();
    session.select_mode(Mode::Compass);
    session.click([0.0, 0.0]).expect("first pick");
    assert!(session.scene.entries[0].picked);

    assert_eq!(session.press_key('l'), Some(Mode::Line));
    assert_eq!(session.state, InteractionState::LineFirstPick);
    assert!(session.scene.entries.iter().all(|e| !e.picked));
    assert_eq!(session.scene.picks, [None, None]);

    // Unknown keys leave the state alone
    assert_eq!(session.press_key('x'), None);
    assert_eq!(session.state, InteractionState::LineFirstPick);
}

#[test]
fn test_intersect_circle_with_line() {
    let mut session = seeded_session();
    session.scene.compass_radius = Some(0.2);
    session.select_mode(Mode::Circle);
    session.click([0.0, 0.0]).expect("circle");

    session.select_mode(Mode::Intersection);
    // Top of the circle; the line y=0 is 0.2 away from here
    let outcome = session.click([0.0, 0.2]).expect("pick circle");
    assert_eq!(
        outcome,
        ClickOutcome::Advanced(InteractionState::IntersectionSecondPick { first: PrimitiveId(3) })
    );

    // Far along the line, away from the circle
    let outcome = session.click([0.6, 0.0]).expect("pick line");
    assert_eq!(outcome, ClickOutcome::Created(vec![PrimitiveId(4), PrimitiveId(5)]));

    let mut xs: Vec<f64> = [4, 5]
        .iter()
        .map(|&i| session.scene.point_at(PrimitiveId(i)).expect("point"))
        .map(|p| {
            assert!(p[1].abs() < 1e-9);
            p[0]
        })
        .collect();
    xs.sort_by(f64::total_cmp);
    assert!((xs[0] + 0.2).abs() < 1e-9);
    assert!((xs[1] - 0.2).abs() < 1e-9);
}

#[test]
fn test_intersect_parallel_lines_creates_nothing() {
    let mut scene = ConstructionScene::new();
    scene.add(Line::through([0.0, 0.0], [0.5, 0.0]).expect("line"));
    scene.add(Line::through([0.0, 0.5], [0.5, 0.5]).expect("line"));
    let mut session = ConstructionSession::new(scene, CanvasConfig::default());

    session.select_mode(Mode::Intersection);
    session.click([0.3, 0.0]).expect("first line");
    assert_eq!(session.click([0.3, 0.5]), Ok(ClickOutcome::Created(vec![])));
    assert_eq!(session.scene.len(), 2);
    assert_eq!(session.state, InteractionState::Idle);
}

#[test]
fn test_intersect_crossing_lines() {
    let mut scene = ConstructionScene::new();
    scene.add(Line::through([0.0, 0.0], [0.5, 0.5]).expect("line"));
    scene.add(Line::through([0.0, 0.5], [0.5, 0.0]).expect("line"));
    let mut session = ConstructionSession::new(scene, CanvasConfig::default());

    session.select_mode(Mode::Intersection);
    session.click([-0.5, -0.5]).expect("first line");
    let outcome = session.click([0.75, -0.25]).expect("second line");
    assert_eq!(outcome, ClickOutcome::Created(vec![PrimitiveId(2)]));

    let p = session.scene.point_at(PrimitiveId(2)).expect("point");
    assert!((p[0] - 0.25).abs() < 1e-9 && (p[1] - 0.25).abs() < 1e-9);
}

#[test]
fn test_nested_circles_are_reported() {
    let mut scene = ConstructionScene::new();
    scene.add(Circle::new([0.0, 0.0], 0.8).expect("circle"));
    scene.add(Circle::new([0.1, 0.0], 0.2).expect("circle"));
    let mut session = ConstructionSession::new(scene, CanvasConfig::default());

    session.select_mode(Mode::Intersection);
    session.click([0.0, 0.8]).expect("outer");
    assert_eq!(
        session.click([0.3, 0.0]),
        Err(ConstructionError::Geometry(GeometryError::NestedCircles))
    );
    assert_eq!(session.state, InteractionState::Idle);
    assert_eq!(session.scene.len(), 2);
    assert!(session.scene.entries.iter().all(|e| !e.picked));
}

#[test]
fn test_click_pixel_uses_canvas_mapping() {
    let mut session = seeded_session();
    session.select_mode(Mode::Compass);
    // Pixel (302, 298) snaps to the canvas center, i.e. the first seed point
    let outcome = session.click_pixel(302, 298).expect("pick");
    assert_eq!(
        outcome,
        ClickOutcome::Advanced(InteractionState::CompassSecondPick { first: PrimitiveId(0) })
    );
}
