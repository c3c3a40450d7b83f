use super::*;
use crate::scene::model::SceneObject;

fn opts(name: &str, bin: &str) -> PreviewOpts {
    let dir = std::env::temp_dir().join(format!(
        "mathcomposer_preview_{}_{}",
        name,
        std::process::id()
    ));
    PreviewOpts {
        manimgl_bin: bin.to_owned(),
        replay_path: dir.join("replay.py"),
        script_path: dir.join("preview_scene.py"),
    }
}

#[test]
fn missing_binary_is_a_preview_error() {
    let opts = opts("missing", "mathcomposer-no-such-manimgl");
    let mut scene = Scene::new("Demo");
    scene
        .insert_object(SceneObject::math_tex("eq_1", "x"))
        .unwrap();

    let err = ManimGlPreview::spawn(&scene, &opts).err().unwrap();
    assert!(err.to_string().starts_with("preview error:"));

    // The script is written before the launch attempt.
    let script = std::fs::read_to_string(&opts.script_path).unwrap();
    assert!(script.contains("class Demo(Scene):"));
    assert!(script.contains(&opts.replay_path.display().to_string()));
    assert!(!is_manimgl_on_path("mathcomposer-no-such-manimgl"));
}

#[cfg(unix)]
#[test]
fn wait_reports_exit_status() {
    let ok = ManimGlPreview::spawn(&Scene::new("Demo"), &opts("true", "true")).unwrap();
    assert_eq!(ok.scene(), "Demo");
    ok.wait().unwrap();

    let failing = ManimGlPreview::spawn(&Scene::new("Demo"), &opts("false", "false")).unwrap();
    let err = failing.wait().unwrap_err();
    assert!(err.to_string().contains("preview exited with status"));
}

#[cfg(unix)]
#[test]
fn stop_after_exit_is_harmless() {
    let mut preview = ManimGlPreview::spawn(&Scene::new("Demo"), &opts("stop", "true")).unwrap();
    preview.stop().unwrap();
    assert!(!preview.is_running());
    preview.stop().unwrap();
}
