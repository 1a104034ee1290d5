use crate::config::LampConfig;
use crate::geometry::{ApproxEq, Matrix4, Point3, Vector3};
use crate::lamp::rig::JointSlot;
use crate::lamp::scene::{Behavior, LampScene, RenderState, SurfaceRenderer, Transform};
use crate::surface::SurfaceKind;
use nalgebra as na;

fn scene() -> LampScene {
    LampScene::build(&LampConfig::default())
}

fn assert_matrix_near(a: &Matrix4, b: &Matrix4, msg: &str) {
    assert!((a - b).abs().max() < 1e-9, "{}: {} vs {}", msg, a, b);
}

#[test]
fn test_build_layout() {
    let scene = scene();
    assert_eq!(scene.objects.len(), 10);
    assert_eq!(scene.lights().len(), 2);

    let floor = scene.object("floor").expect("floor");
    assert_eq!(floor.behavior, Behavior::Fixed);
    assert_eq!(floor.surface, SurfaceKind::Disc);

    let bulb = scene.object("bulb").expect("bulb");
    assert!(Point3::from(bulb.transform.translation).approx_eq(&Point3::new(0.0, 4.97, 0.0)));

    let spot = scene.bulb_light.spot.as_ref().expect("bulb is a spot light");
    assert!(spot.axis.approx_eq(&Vector3::y()));
    assert!((spot.cos_cutoff - 0.5).abs() < 1e-12);
    assert!(scene.ambient_light.is_directional());
}

#[test]
fn test_transform_inverse_is_exact() {
    let t = Transform {
        scale: Vector3::new(0.3, 0.15, 2.0),
        rotation_axis: Vector3::x_axis(),
        rotation_angle: 0.7,
        translation: Vector3::new(1.0, -2.0, 0.5),
    };
    assert_matrix_near(&(t.model() * t.inverse()), &Matrix4::identity(), "M * M^-1");
    assert_matrix_near(&(t.inverse() * t.model()), &Matrix4::identity(), "M^-1 * M");

    // Scale is applied before translation
    let p = t.model().transform_point(&Point3::origin());
    assert!(p.approx_eq(&Point3::new(1.0, -2.0, 0.5)));
}

#[test]
fn test_animate_moves_objects_with_rig() {
    let mut scene = scene();
    let eye_before = scene.camera.eye;
    let floor_before = scene.object("floor").expect("floor").transform.clone();

    for _ in 0..50 {
        scene.animate(0.01);
    }

    assert_eq!(scene.object("floor").expect("floor").transform, floor_before);
    assert!(!scene.camera.eye.approx_eq(&eye_before), "Camera should orbit");

    let lower = scene.object("lower_arm").expect("lower arm");
    let joint = scene.rig.joint(JointSlot::Lower);
    assert!((lower.transform.rotation_angle - joint.angle).abs() < 1e-12);
    assert!((joint.angle - 0.5).abs() < 1e-9);
    assert!(Point3::from(lower.transform.translation).approx_eq(&scene.rig.pivot(JointSlot::Lower)));

    let elbow = scene.object("elbow").expect("elbow");
    let expected = scene.rig.tip(JointSlot::Lower) + Vector3::new(0.0, 0.15, 0.0);
    assert!(Point3::from(elbow.transform.translation).approx_eq(&expected));

    let tip = scene.rig.tip(JointSlot::Shade);
    let light = scene.bulb_light.position;
    assert!(Point3::new(light.x, light.y, light.z).approx_eq(&tip));
    assert_eq!(light.w, 1.0);

    let axis = (tip - scene.rig.pivot(JointSlot::Shade)).normalize();
    let spot = scene.bulb_light.spot.as_ref().expect("spot");
    assert!(spot.axis.approx_eq(&axis));
}

#[test]
fn test_render_issues_one_call_per_object() {
    #[derive(Default)]
    struct Recorder {
        calls: Vec<(SurfaceKind, RenderState)>,
    }

    impl SurfaceRenderer for Recorder {
        fn draw_surface(&mut self, surface: SurfaceKind, state: &RenderState) {
            self.calls.push((surface, state.clone()));
        }
    }

    let scene = scene();
    let mut recorder = Recorder::default();
    scene.render(&mut recorder);

    assert_eq!(recorder.calls.len(), scene.objects.len());
    for ((surface, state), object) in recorder.calls.iter().zip(&scene.objects) {
        assert_eq!(*surface, object.surface);
        assert_eq!(state.lights.len(), 2);
        assert_eq!(state.eye, scene.camera.eye);
        assert_eq!(state.material, object.material);
        assert_matrix_near(&state.mvp, &(state.projection * state.view * state.model), &object.name);
        assert_matrix_near(&(state.model * state.model_inverse), &Matrix4::identity(), &object.name);
    }
}

#[test]
fn test_frame_snapshot_serializes() {
    let mut scene = scene();
    scene.animate(0.02);
    let frame = scene.frame();
    assert_eq!(frame.objects.len(), 10);
    assert_eq!(frame.objects[9].name, "bulb");

    let json = serde_json::to_value(&frame).expect("serialize");
    assert_eq!(json["objects"].as_array().map(|a| a.len()), Some(10));
    assert_eq!(json["lights"].as_array().map(|a| a.len()), Some(2));
}

#[test]
fn test_meshes_use_configured_level() {
    let config = LampConfig { tessellation_level: 6, ..LampConfig::default() };
    let scene = LampScene::build(&config);
    let meshes = scene.meshes();
    assert_eq!(meshes.len(), 4);
    for (kind, mesh) in &meshes {
        assert_eq!(mesh.strip_count, 6, "{:?}", kind);
        assert_eq!(mesh.vertex_count(), 6 * 14, "{:?}", kind);
    }
}

#[test]
fn test_arm_rotation_axis_follows_joint() {
    let mut scene = scene();
    scene.animate(0.1);
    let upper = scene.object("upper_arm").expect("upper arm");
    assert_eq!(upper.transform.rotation_axis, na::Vector3::x_axis());
    let lower = scene.object("lower_arm").expect("lower arm");
    assert_eq!(lower.transform.rotation_axis, na::Vector3::z_axis());
}
