use super::*;

fn scene_with_two_objects() -> Scene {
    let mut scene = Scene::new("Demo");
    scene
        .insert_object(SceneObject::math_tex("eq_1", "F=ma"))
        .unwrap();
    scene
        .insert_object(SceneObject::math_tex("eq_2", "E=mc^2"))
        .unwrap();
    scene.push_step(AnimationStep::effect("Write", "eq_1")).unwrap();
    scene.push_step(AnimationStep::wait(2.0)).unwrap();
    scene.push_step(AnimationStep::effect("FadeIn", "eq_2")).unwrap();
    scene.push_step(AnimationStep::effect("FadeOut", "eq_1")).unwrap();
    scene
}

#[test]
fn duplicate_object_names_are_rejected() {
    let mut scene = scene_with_two_objects();
    let err = scene
        .insert_object(SceneObject::math_tex("eq_1", "x"))
        .unwrap_err();
    assert!(err.to_string().contains("duplicate object name"));
    assert_eq!(scene.object_count(), 2);
}

#[test]
fn invalid_identifiers_are_rejected() {
    let mut scene = Scene::new("Demo");
    assert!(scene.insert_object(SceneObject::math_tex("1eq", "x")).is_err());
    assert!(scene.insert_object(SceneObject::math_tex("", "x")).is_err());
    assert!(scene.insert_object(SceneObject::math_tex("a b", "x")).is_err());
    assert!(scene.set_name("not valid").is_err());
}

#[test]
fn rename_retargets_steps_and_keeps_order() {
    let mut scene = scene_with_two_objects();
    scene.rename_object("eq_1", "force_eq").unwrap();

    let names: Vec<&str> = scene.object_names().collect();
    assert_eq!(names, ["force_eq", "eq_2"]);
    assert_eq!(scene.steps()[0].target(), Some("force_eq"));
    assert_eq!(scene.steps()[3].target(), Some("force_eq"));
    assert!(scene.steps().iter().all(|s| match s.target() {
        Some(t) => scene.contains_object(t),
        None => s.kind == StepKind::Wait,
    }));
}

#[test]
fn rename_onto_existing_name_fails_without_changes() {
    let mut scene = scene_with_two_objects();
    let rev = scene.revision();
    assert!(scene.rename_object("eq_1", "eq_2").is_err());
    assert_eq!(scene.revision(), rev);
    assert_eq!(scene.steps()[0].target(), Some("eq_1"));
}

#[test]
fn remove_object_drops_its_steps_only() {
    let mut scene = scene_with_two_objects();
    scene.remove_object("eq_1").unwrap();

    let kinds: Vec<&str> = scene.steps().iter().map(|s| s.kind.name()).collect();
    assert_eq!(kinds, ["Wait", "FadeIn"]);
    assert!(scene.remove_object("eq_1").is_err());
}

#[test]
fn steps_must_target_live_objects() {
    let mut scene = scene_with_two_objects();
    assert!(scene.push_step(AnimationStep::add("ghost")).is_err());
    let mut wait = AnimationStep::wait(1.0);
    wait.target = Some("eq_1".into());
    assert!(scene.push_step(wait).is_err());
    assert!(scene.push_step(AnimationStep::wait(-1.0)).is_err());

    let err = scene
        .edit_step(0, |s| s.target = Some("ghost".into()))
        .unwrap_err();
    assert!(err.to_string().contains("missing object"));
    assert_eq!(scene.steps()[0].target(), Some("eq_1"));
}

#[test]
fn move_and_reorder_steps() {
    let mut scene = scene_with_two_objects();
    assert!(scene.move_step(0, 1));
    assert_eq!(scene.steps()[0].kind, StepKind::Wait);
    assert!(!scene.move_step(0, -1));
    assert!(!scene.move_step(3, 1));

    scene.reorder_step(3, 0).unwrap();
    let kinds: Vec<&str> = scene.steps().iter().map(|s| s.kind.name()).collect();
    assert_eq!(kinds, ["FadeOut", "Wait", "Write", "FadeIn"]);
    assert!(scene.reorder_step(0, 4).is_err());
}

#[test]
fn step_labels_match_list_captions() {
    let mut scene = scene_with_two_objects();
    scene.insert_step(0, AnimationStep::add("eq_2")).unwrap();
    assert_eq!(scene.step_label(0).unwrap(), "1. Add(eq_2)");
    assert_eq!(scene.step_label(1).unwrap(), "2. Write(eq_1) 1.0s");
    assert_eq!(scene.step_label(2).unwrap(), "3. Wait 2.0s");
    assert!(scene.step_label(9).is_none());
}

#[test]
fn setters_bump_revision_only_on_change() {
    let mut scene = scene_with_two_objects();
    let rev = scene.revision();
    assert!(!scene.set_content("eq_1", "F=ma").unwrap());
    assert!(!scene.set_color("eq_1", HexColor::WHITE).unwrap());
    assert!(!scene.set_background(HexColor::BLACK));
    assert_eq!(scene.revision(), rev);

    assert!(scene.set_font_size("eq_1", 72).unwrap());
    assert_eq!(scene.revision(), rev + 1);
    assert!(scene.set_font_size("eq_1", 0).is_err());
}

#[test]
fn next_name_skips_taken_names() {
    let mut scene = scene_with_two_objects();
    assert_eq!(scene.next_name("eq"), "eq_3");
    assert_eq!(scene.next_name("eq"), "eq_4");
    assert_eq!(scene.next_name("title"), "title_1");
}

#[test]
fn paste_copies_with_fresh_name_and_offset() {
    let mut scene = scene_with_two_objects();
    let template = scene
        .object("eq_2")
        .unwrap()
        .clone()
        .at(Point::new(10.0, 20.0));
    let name = scene.paste_object(&template, Vec2::new(5.0, 5.0)).unwrap();
    assert_eq!(name, "eq_3");
    let pasted = scene.object("eq_3").unwrap();
    assert_eq!(pasted.content, "E=mc^2");
    assert_eq!(pasted.position, Point::new(15.0, 25.0));
}

#[test]
fn project_json_preserves_order_and_validates() {
    let mut project = Project::new();
    project.add_scene(scene_with_two_objects()).unwrap();
    assert!(project.add_scene(Scene::new("Demo")).is_err());

    let json = project.to_json().unwrap();
    let back = Project::from_json(&json).unwrap();
    let scene = back.scene(0).unwrap();
    let names: Vec<&str> = scene.object_names().collect();
    assert_eq!(names, ["eq_1", "eq_2"]);
    assert_eq!(scene.steps().len(), 4);

    let dangling = r##"{"scenes":[{"name":"S","objects":[],"steps":[{"target":"x","kind":"Write"}]}]}"##;
    assert!(Project::from_json(dangling).is_err());
}

#[test]
fn step_equivalence_ignores_irrelevant_fields() {
    let a = AnimationStep::add("eq_1");
    let b = AnimationStep::add("eq_1").with_duration(3.0).with_easing("linear");
    assert!(a.equivalent(&b));

    let w1 = AnimationStep::wait(1.0);
    let w2 = AnimationStep::wait(1.004).with_easing("there_and_back");
    assert!(w1.equivalent(&w2));

    let e1 = AnimationStep::effect("Write", "eq_1");
    assert!(!e1.equivalent(&e1.clone().with_easing("linear")));
    assert!(!e1.equivalent(&e1.clone().with_duration(2.0)));
}

#[test]
fn empty_easing_reads_as_default() {
    let e = AnimationStep::effect("Write", "eq_1");
    assert!(e.equivalent(&e.clone().with_easing("")));
    assert_eq!(e.clone().with_easing("").effective_easing(), "smooth");
}

#[test]
fn arrange_objects_follows_given_order() {
    let mut scene = scene_with_two_objects();
    scene
        .insert_object(SceneObject::math_tex("eq_3", "c"))
        .unwrap();
    assert!(!scene.arrange_objects(["eq_1", "eq_2", "eq_3"]));

    let before = scene.revision();
    assert!(scene.arrange_objects(["eq_3", "eq_1"]));
    assert_eq!(scene.object_names().collect::<Vec<_>>(), ["eq_3", "eq_1", "eq_2"]);
    assert_eq!(scene.revision(), before + 1);
}

#[test]
fn set_step_target_requires_live_object() {
    let mut scene = scene_with_two_objects();
    scene.set_step_target(0, "eq_2").unwrap();
    assert_eq!(scene.steps()[0].target(), Some("eq_2"));
    assert!(scene.set_step_target(0, "ghost").is_err());
    assert!(scene.set_step_target(9, "eq_1").is_err());
}

#[test]
fn content_must_fit_one_raw_string_line() {
    let mut scene = scene_with_two_objects();
    for bad in [r#"\text{"hi"}"#, "a\nb", "a\r"] {
        assert!(scene.insert_object(SceneObject::math_tex("q", bad)).is_err(), "{bad:?}");
        assert!(scene.set_content("eq_1", bad).is_err(), "{bad:?}");
    }
    assert_eq!(scene.object("eq_1").unwrap().content, "F=ma");
    assert!(scene.set_content("eq_1", r"\text{it's} \{x\}").unwrap());

    let quoted = r##"{"scenes":[{"name":"S","objects":[{"name":"a","content":"\"x\""}]}]}"##;
    assert!(Project::from_json(quoted).is_err());
}

#[test]
fn font_size_has_a_floor() {
    let mut scene = scene_with_two_objects();
    let err = scene
        .insert_object(SceneObject::math_tex("tiny", "x").with_font_size(MIN_FONT_SIZE - 1))
        .unwrap_err();
    assert!(err.to_string().contains("at least 8"));
    assert!(scene.set_font_size("eq_1", 5).is_err());
    assert!(scene.set_font_size("eq_1", MIN_FONT_SIZE).unwrap());
}

#[test]
fn effect_and_easing_names_must_be_emittable() {
    let mut scene = scene_with_two_objects();
    let len = scene.steps().len();
    assert!(scene.push_step(AnimationStep::effect("Fade In", "eq_1")).is_err());
    assert!(scene.push_step(AnimationStep::effect("Wait", "eq_1")).is_err());
    assert!(scene.push_step(AnimationStep::effect("Add", "eq_1")).is_err());
    assert!(
        scene
            .push_step(AnimationStep::effect("FadeIn", "eq_1").with_easing("there and back"))
            .is_err()
    );
    assert!(scene.edit_step(0, |s| s.easing = "lambda t: t".into()).is_err());
    assert_eq!(scene.steps().len(), len);

    scene
        .push_step(
            AnimationStep::effect("FadeIn", "eq_1").with_easing("rate_functions.there_and_back"),
        )
        .unwrap();
}

#[test]
fn reserved_effect_names_do_not_reach_json() {
    let mut scene = Scene::new("S");
    scene
        .insert_object(SceneObject::math_tex("a", "x"))
        .unwrap();
    let mut step = AnimationStep::effect("Write", "a");
    step.kind = StepKind::Effect("Wait".into());
    assert!(scene.push_step(step).is_err());

    let mut project = Project::new();
    project.add_scene(scene).unwrap();
    assert!(Project::from_json(&project.to_json().unwrap()).is_ok());
}

#[test]
fn default_scene_project_is_valid() {
    let project = Project::with_default_scene();
    project.validate().unwrap();
    assert_eq!(project.scene(0).unwrap().name(), DEFAULT_SCENE_NAME);
    assert!(project.scene(0).unwrap().is_empty());
}
