//! End-to-end message delivery through a scene with transform components.

use std::cell::Cell;
use std::rc::Rc;

use scene_core::{
    Component, ComponentType, GetPosition, GetRotation, Message, MessageKind, ObjectId,
    SceneConfig, SceneError, SceneManager,
};
use scene_math::{Quat, Transform, Vec3};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn scene() -> SceneManager {
    init_tracing();
    SceneManager::with_config(SceneConfig::new("messaging-test"))
}

fn with_transform(scene: &mut SceneManager) -> ObjectId {
    let id = scene.create_object().id();
    let transform = Transform::IDENTITY.into_component();
    scene
        .deliver(&mut Message::attach_component(id, transform))
        .unwrap();
    id
}

#[test]
fn test_ids_are_distinct_and_increasing() {
    let mut scene = scene();
    let ids: Vec<ObjectId> = (0..32).map(|_| scene.create_object().id()).collect();
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(ids.first(), Some(&ObjectId(0)));
}

#[test]
fn test_find_unknown_id_fails() {
    let mut scene = scene();
    scene.create_object();
    assert_eq!(
        scene.find_by_id(ObjectId(1)).unwrap_err(),
        SceneError::ObjectNotFound(ObjectId(1))
    );
}

#[test]
fn test_attach_through_message() {
    let mut scene = scene();
    let id = scene.create_object().id();

    let mut attach = Message::attach_component(id, Transform::IDENTITY.into_component());
    assert_eq!(scene.deliver(&mut attach), Ok(true));
    assert!(attach.take_component().is_none());

    let object = scene.find_by_id(id).unwrap();
    assert!(object.has_component(ComponentType::Transform));
    assert_eq!(
        object.component(ComponentType::Transform).unwrap().owner(),
        Some(id)
    );
}

#[test]
fn test_set_then_get_position() {
    let mut scene = scene();
    let id = with_transform(&mut scene);

    let mut set = Message::set_position(id, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(scene.deliver(&mut set), Ok(false));

    let mut get = Message::get_position(id);
    scene.deliver(&mut get).unwrap();
    let position = get.get::<GetPosition>().unwrap().position;
    assert_eq!(position, Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn test_set_then_get_rotation() {
    let mut scene = scene();
    let id = scene.create_object().id();
    scene
        .find_by_id_mut(id)
        .unwrap()
        .attach(Transform::IDENTITY.into_component())
        .unwrap();

    let rotation = Quat::from_axis_angle(Vec3::Y, std::f32::consts::FRAC_PI_2);
    scene
        .deliver(&mut Message::set_rotation(id, rotation))
        .unwrap();

    let mut get = Message::get_rotation(id);
    scene.deliver(&mut get).unwrap();
    assert_eq!(get.get::<GetRotation>().unwrap().rotation, rotation);
}

#[test]
fn test_delivery_keeps_target_and_kind() {
    let seen = Rc::new(Cell::new(None::<(ObjectId, MessageKind)>));
    let mut scene = scene();
    let id = with_transform(&mut scene);

    let mut watcher = Component::new(ComponentType::Behaviour, ());
    let last = Rc::clone(&seen);
    watcher.register_handler(MessageKind::GetPosition, move |_, msg| {
        last.set(Some((msg.target(), msg.kind())));
    });
    scene.find_by_id_mut(id).unwrap().attach(watcher).unwrap();

    scene
        .deliver(&mut Message::set_position(id, Vec3::ONE))
        .unwrap();
    let mut get = Message::get_position(id);
    assert_eq!(scene.deliver(&mut get), Ok(false));

    assert_eq!(get.target(), id);
    assert_eq!(get.kind(), MessageKind::GetPosition);
    assert_eq!(get.get::<GetPosition>().unwrap().position, Vec3::ONE);
    assert_eq!(seen.get(), Some((id, MessageKind::GetPosition)));
}

#[test]
fn test_intercepted_and_broadcast_are_independent_of_components() {
    let mut scene = scene();
    let first = with_transform(&mut scene);
    let second = scene.create_object().id();
    assert_eq!((first, second), (ObjectId(0), ObjectId(1)));

    let has_transform = |scene: &SceneManager, id| {
        scene
            .find_by_id(id)
            .unwrap()
            .has_component(ComponentType::Transform)
    };
    assert!(has_transform(&scene, first));
    assert!(!has_transform(&scene, second));

    // Nothing on the second object handles position queries.
    let mut get = Message::get_position(second);
    assert_eq!(scene.deliver(&mut get), Ok(false));
    assert_eq!(get.get::<GetPosition>().unwrap().position, Vec3::ZERO);

    // The object itself still intercepts attachment.
    let behaviour = Component::new(ComponentType::Behaviour, ());
    let mut attach = Message::attach_component(second, behaviour);
    assert_eq!(scene.deliver(&mut attach), Ok(true));
    let object = scene.find_by_id(second).unwrap();
    assert!(object.has_component(ComponentType::Behaviour));
}

#[test]
fn test_duplicate_attach_keeps_original_and_returns_orphan() {
    let mut scene = scene();
    let id = scene.create_object().id();
    let first = Transform::from_position(Vec3::X).into_component();
    scene
        .deliver(&mut Message::attach_component(id, first))
        .unwrap();

    let duplicate = Transform::from_position(Vec3::Y).into_component();
    let mut second = Message::attach_component(id, duplicate);
    assert_eq!(
        scene.deliver(&mut second),
        Err(SceneError::DuplicateComponentType {
            object: id,
            component_type: ComponentType::Transform,
        })
    );

    let orphan = second
        .take_component()
        .expect("rejected component handed back");
    assert_eq!(orphan.owner(), None);

    let object = scene.find_by_id(id).unwrap();
    assert_eq!(object.component_count(), 1);
    assert_eq!(
        object
            .state::<Transform>(ComponentType::Transform)
            .map(|t| t.position),
        Some(Vec3::X)
    );
}

#[test]
fn test_orphan_can_be_attached_elsewhere() {
    let mut scene = scene();
    let missing = ObjectId(10);
    let transform = Transform::IDENTITY.into_component();
    let mut attach = Message::attach_component(missing, transform);
    assert_eq!(scene.deliver(&mut attach), Ok(false));

    let orphan = attach
        .take_component()
        .expect("undelivered component handed back");
    let object = scene.create_object();
    object.attach_component(orphan).unwrap();
    assert!(object.has_component(ComponentType::Transform));
}

#[test]
fn test_delivery_to_unknown_id_runs_no_handler() {
    let hits = Rc::new(Cell::new(0u32));
    let mut scene = scene();
    let id = scene.create_object().id();

    let mut spy = Transform::IDENTITY.into_component();
    let counter = Rc::clone(&hits);
    spy.on(move |_: &mut Transform, _: &mut GetPosition| {
        counter.set(counter.get() + 1);
    });
    scene.find_by_id_mut(id).unwrap().attach(spy).unwrap();

    let mut stray = Message::get_position(ObjectId(99));
    assert_eq!(scene.deliver(&mut stray), Ok(false));
    assert_eq!(hits.get(), 0);

    scene.deliver(&mut Message::get_position(id)).unwrap();
    assert_eq!(hits.get(), 1);
}

#[test]
fn test_every_component_sees_broadcast() {
    let seen = Rc::new(Cell::new(0u32));
    let mut scene = scene();
    let id = scene.create_object().id();

    let mut follower = Component::new(ComponentType::Behaviour, Vec3::ZERO);
    let counter = Rc::clone(&seen);
    follower.on(move |last: &mut Vec3, msg: &mut scene_core::SetPosition| {
        counter.set(counter.get() + 1);
        *last = msg.position;
    });

    let object = scene.find_by_id_mut(id).unwrap();
    object.attach(Transform::IDENTITY.into_component()).unwrap();
    object.attach(follower).unwrap();

    scene
        .deliver(&mut Message::set_position(id, Vec3::Z))
        .unwrap();

    let object = scene.find_by_id(id).unwrap();
    assert_eq!(seen.get(), 1);
    assert_eq!(
        object.state::<Vec3>(ComponentType::Behaviour),
        Some(&Vec3::Z)
    );
    assert_eq!(
        object
            .state::<Transform>(ComponentType::Transform)
            .map(|t| t.position),
        Some(Vec3::Z)
    );
}

#[test]
fn test_destroyed_object_stops_receiving() {
    let mut scene = scene();
    let id = with_transform(&mut scene);
    scene.destroy_object(id).unwrap();

    let mut get = Message::get_position(id);
    assert_eq!(scene.deliver(&mut get), Ok(false));
    assert_ne!(scene.create_object().id(), id);
}
