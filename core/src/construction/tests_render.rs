use crate::construction::render::{draw_scene, Color, DrawKind, DrawList, Renderer};
use crate::construction::session::{ConstructionSession, Mode};
use crate::construction::types::ConstructionScene;
use crate::geometry::tessellation::CIRCLE_SEGMENTS;
use crate::geometry::{Circle, Line, Point};

#[test]
fn test_draw_order_groups_by_type() {
    let mut scene = ConstructionScene::new();
    scene.add(Point::new(0.1, 0.1));
    scene.add(Line::through([0.0, 0.0], [0.5, 0.2]).expect("line"));
    scene.add(Circle::new([0.0, 0.0], 0.5).expect("circle"));

    let list = DrawList::of_scene(&scene);
    let kinds: Vec<_> = list.commands.iter().map(|c| c.kind).collect();
    assert_eq!(kinds, vec![DrawKind::LineLoop, DrawKind::Lines, DrawKind::Points]);

    assert_eq!(list.commands[0].vertices.len(), CIRCLE_SEGMENTS);
    assert_eq!(list.commands[1].vertices.len(), 2);
    assert_eq!(list.commands[2].vertices, vec![[0.1, 0.1]]);
}

#[test]
fn test_insertion_order_within_group() {
    let mut scene = ConstructionScene::new();
    scene.add(Point::new(0.3, 0.0));
    scene.add(Circle::new([0.0, 0.0], 0.5).expect("circle"));
    scene.add(Point::new(0.6, 0.0));
    scene.add(Circle::new([0.2, 0.0], 0.1).expect("circle"));

    let list = DrawList::of_scene(&scene);
    assert_eq!(list.commands.len(), 4);
    assert_eq!(list.commands[0].vertices[0], [0.5, 0.0]);
    assert!((list.commands[1].vertices[0][0] - 0.3).abs() < 1e-12);
    assert_eq!(list.commands[2].vertices, vec![[0.3, 0.0]]);
    assert_eq!(list.commands[3].vertices, vec![[0.6, 0.0]]);
}

#[test]
fn test_colors_follow_kind_and_pick_state() {
    let mut session = ConstructionSession::default();
    session.select_mode(Mode::Line);
    session.click([0.0, 0.0]).expect("pick");

    let list = DrawList::of_scene(&session.scene);
    // Line first, then the two points in insertion order
    assert_eq!(list.commands[0].color, Color::LINE);
    assert_eq!(list.commands[1].color, Color::PICKED);
    assert_eq!(list.commands[2].color, Color::POINT);
}

#[test]
fn test_custom_renderer_receives_calls() {
    struct Counter {
        calls: usize,
        vertices: usize,
    }

    impl Renderer for Counter {
        fn draw(&mut self, _kind: DrawKind, _color: Color, vertices: &[[f64; 2]]) {
            self.calls += 1;
            self.vertices += vertices.len();
        }
    }

    let scene = ConstructionScene::seeded();
    let mut counter = Counter { calls: 0, vertices: 0 };
    draw_scene(&scene, &mut counter);
    assert_eq!(counter.calls, 3);
    assert_eq!(counter.vertices, 4);
}

#[test]
fn test_draw_list_serializes() {
    let list = DrawList::of_scene(&ConstructionScene::seeded());
    let json = serde_json::to_string(&list).expect("serialize");
    let back: DrawList = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, list);
}
