use std::path::Path;

use crate::{
    codegen::dialect::Dialect,
    foundation::core::{
        DEFAULT_DURATION, DEFAULT_EASING, DEFAULT_FONT_SIZE, HexColor, ORIGIN_EPSILON,
        canvas_to_scene, durations_match,
    },
    scene::model::{Project, Scene, SceneObject, StepKind},
};

const CLASS_INDENT: &str = "    ";
const BODY_INDENT: &str = "        ";
const FRAME_BORDER: &str =
    "Rectangle(width=FRAME_WIDTH, height=FRAME_HEIGHT, stroke_color=WHITE, stroke_width=1)";

/// Options for full-script generation.
#[derive(Clone, Copy, Debug)]
pub struct ScriptOpts {
    /// Target dialect.
    pub dialect: Dialect,
    /// Emit the `import` preamble.
    pub include_import: bool,
}

impl ScriptOpts {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            include_import: true,
        }
    }
}

impl Default for ScriptOpts {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}

/// Options for the replay fragment pushed into a running preview.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReplayOpts {
    pub dialect: Dialect,
    /// Re-add the frame border rectangle after clearing.
    pub scene_border: bool,
}

/// Render one scene as a complete script: preamble, class wrapper and `construct` body.
#[tracing::instrument(skip(scene), fields(scene = scene.name()))]
pub fn generate_script(scene: &Scene, opts: &ScriptOpts) -> String {
    let mut lines = Vec::new();
    if opts.include_import {
        push_preamble(&mut lines, opts.dialect);
    }
    push_class(&mut lines, scene, opts.dialect);
    join_lines(lines)
}

/// Render every scene of a project into one document with a shared preamble.
pub fn generate_project_script(project: &Project, opts: &ScriptOpts) -> String {
    let mut lines = Vec::new();
    if opts.include_import {
        push_preamble(&mut lines, opts.dialect);
    }
    for (i, scene) in project.scenes().iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
            lines.push(String::new());
        }
        push_class(&mut lines, scene, opts.dialect);
    }
    join_lines(lines)
}

/// The `construct` body alone, unindented. Empty for an empty scene.
pub fn generate_body(scene: &Scene, dialect: Dialect) -> String {
    join_lines(body_lines(scene, dialect, ""))
}

/// Incremental fragment executed inside an already-running preview.
///
/// It clears the scene, resets the background and replays the body. No preamble, no class.
pub fn generate_replay(scene: &Scene, opts: &ReplayOpts) -> String {
    let mut lines = vec![
        "self.clear()".to_owned(),
        opts.dialect.background_directive(scene.background()),
    ];
    if opts.scene_border {
        lines.push(format!("self.add({FRAME_BORDER})"));
    }
    lines.extend(body_lines(scene, opts.dialect, ""));
    join_lines(lines)
}

/// ManimGL script for the live preview window.
///
/// On top of the regular script it locks the window to 16:9, draws the frame border and then
/// polls `replay_path`, executing the file each time its modification time advances.
pub fn generate_preview_script(scene: &Scene, replay_path: &Path) -> String {
    let dialect = Dialect::ManimGl;
    let mut lines = Vec::new();
    push_preamble(&mut lines, dialect);
    lines.push(format!("class {}(Scene):", scene.name()));
    lines.push(format!("{CLASS_INDENT}def construct(self):"));
    push_background(&mut lines, scene, dialect);

    let i = BODY_INDENT;
    lines.extend([
        format!("{i}if self.window:"),
        format!("{i}    self.window.fixed_aspect_ratio = 16 / 9"),
        format!("{i}_border = {FRAME_BORDER}"),
        format!("{i}self.add(_border)"),
        String::new(),
    ]);
    lines.extend(body_lines(scene, dialect, BODY_INDENT));
    lines.extend([
        String::new(),
        format!("{i}import os as _os, time as _time"),
        format!("{i}_rp = r\"{}\"", replay_path.display()),
        format!("{i}_lm = 0.0"),
        format!("{i}while not self.is_window_closing():"),
        format!("{i}    self.update_frame(dt=0)"),
        format!("{i}    try:"),
        format!("{i}        _mt = _os.path.getmtime(_rp)"),
        format!("{i}        if _mt > _lm:"),
        format!("{i}            _lm = _mt"),
        format!("{i}            exec(open(_rp).read())"),
        format!("{i}            self.update_frame(dt=0, force_draw=True)"),
        format!("{i}    except FileNotFoundError:"),
        format!("{i}        pass"),
        format!("{i}    _time.sleep(0.02)"),
    ]);
    join_lines(lines)
}

fn push_preamble(lines: &mut Vec<String>, dialect: Dialect) {
    lines.push(dialect.import_line().to_owned());
    lines.push(String::new());
    lines.push(String::new());
}

fn push_class(lines: &mut Vec<String>, scene: &Scene, dialect: Dialect) {
    lines.push(format!("class {}(Scene):", scene.name()));
    lines.push(format!("{CLASS_INDENT}def construct(self):"));
    push_background(lines, scene, dialect);

    let body = body_lines(scene, dialect, BODY_INDENT);
    if body.is_empty() {
        lines.push(format!("{BODY_INDENT}pass"));
    } else {
        lines.extend(body);
    }
}

fn push_background(lines: &mut Vec<String>, scene: &Scene, dialect: Dialect) {
    if scene.background() != HexColor::BLACK {
        lines.push(format!(
            "{BODY_INDENT}{}",
            dialect.background_directive(scene.background())
        ));
        lines.push(String::new());
    }
}

fn body_lines(scene: &Scene, dialect: Dialect, indent: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for obj in scene.objects() {
        push_object(&mut lines, obj, dialect, indent);
    }

    for step in scene.steps() {
        let target = step.target().unwrap_or_default();
        let line = match &step.kind {
            StepKind::Add => format!("self.add({target})"),
            StepKind::Wait if durations_match(step.duration, DEFAULT_DURATION) => {
                "self.wait()".to_owned()
            }
            StepKind::Wait => format!("self.wait({})", fmt_duration(step.duration)),
            StepKind::Effect(kind) => {
                let mut call = format!("self.play({}({target})", dialect.effect_name(kind));
                if !durations_match(step.duration, DEFAULT_DURATION) {
                    call.push_str(&format!(", run_time={}", fmt_duration(step.duration)));
                }
                if !step.easing.is_empty() && step.easing != DEFAULT_EASING {
                    call.push_str(&format!(", rate_func={}", step.easing));
                }
                call.push(')');
                call
            }
        };
        lines.push(format!("{indent}{line}"));
    }
    lines
}

fn push_object(lines: &mut Vec<String>, obj: &SceneObject, dialect: Dialect, indent: &str) {
    let name = &obj.name;
    lines.push(format!(
        "{indent}{name} = {}(r\"{}\")",
        dialect.math_tex_ctor(),
        obj.content
    ));

    if obj.color != HexColor::WHITE {
        lines.push(format!("{indent}{name}.set_color(\"{}\")", obj.color));
    }

    if obj.font_size != DEFAULT_FONT_SIZE {
        let factor = f64::from(obj.font_size) / f64::from(DEFAULT_FONT_SIZE);
        lines.push(format!("{indent}{name}.scale({})", fmt_scale(factor)));
    }

    let p = canvas_to_scene(obj.position);
    if p.x.abs() > ORIGIN_EPSILON || p.y.abs() > ORIGIN_EPSILON {
        lines.push(format!(
            "{indent}{name}.move_to(np.array([{}, {}, 0]))",
            fmt_coord(p.x),
            fmt_coord(p.y)
        ));
    }
}

fn join_lines(lines: Vec<String>) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Up to four decimals, trailing zeros trimmed (`1.5`, `0.75`, `1.0417`, `2`).
fn fmt_scale(v: f64) -> String {
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_owned()
}

/// Up to two decimals, at least one (`2.0`, `1.5`, `0.25`).
fn fmt_duration(v: f64) -> String {
    let s = format!("{v:.2}");
    match s.strip_suffix('0') {
        Some(trimmed) => trimmed.to_owned(),
        None => s,
    }
}

fn fmt_coord(v: f64) -> String {
    let s = format!("{v:.2}");
    if s == "-0.00" { "0.00".to_owned() } else { s }
}

#[cfg(test)]
#[path = "../../tests/unit/codegen/generator.rs"]
mod tests;
