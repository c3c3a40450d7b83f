use std::collections::{BTreeMap, HashMap};
use std::fmt;

use indexmap::IndexMap;

use crate::foundation::core::{
    DEFAULT_DURATION, DEFAULT_EASING, DEFAULT_FONT_SIZE, DEFAULT_SCENE_NAME, HexColor,
    MIN_FONT_SIZE, Point, Vec2, durations_match,
};
use crate::foundation::error::{ComposerError, ComposerResult};

/// What an object renders as. Only math-expression text exists today.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    #[default]
    MathTex,
}

/// One placeable entity on the canvas.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneObject {
    pub name: String,
    #[serde(default)]
    pub kind: ObjectKind,
    /// Markup source, e.g. a LaTeX math expression.
    pub content: String,
    #[serde(default)]
    pub color: HexColor,
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    /// Canvas-space position (Y grows downward).
    #[serde(default)]
    pub position: Point,
}

fn default_font_size() -> u32 {
    DEFAULT_FONT_SIZE
}

impl SceneObject {
    /// White, default-size math expression at the canvas origin.
    pub fn math_tex(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::MathTex,
            content: content.into(),
            color: HexColor::WHITE,
            font_size: DEFAULT_FONT_SIZE,
            position: Point::ORIGIN,
        }
    }

    pub fn with_color(mut self, color: HexColor) -> Self {
        self.color = color;
        self
    }

    pub fn with_font_size(mut self, font_size: u32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn at(mut self, position: Point) -> Self {
        self.position = position;
        self
    }
}

/// Action vocabulary of an [`AnimationStep`], in canonical (ManimGL) names.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StepKind {
    /// Add the target to the scene instantly.
    Add,
    /// Pause; has no target.
    Wait,
    /// A named transition played on the target (`FadeIn`, `Write`, `ShowCreation`, ...).
    Effect(String),
}

impl StepKind {
    pub fn name(&self) -> &str {
        match self {
            Self::Add => "Add",
            Self::Wait => "Wait",
            Self::Effect(name) => name,
        }
    }
}

impl From<&str> for StepKind {
    fn from(name: &str) -> Self {
        match name {
            "Add" => Self::Add,
            "Wait" => Self::Wait,
            other => Self::Effect(other.to_owned()),
        }
    }
}

impl From<String> for StepKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "Add" => Self::Add,
            "Wait" => Self::Wait,
            _ => Self::Effect(name),
        }
    }
}

impl From<StepKind> for String {
    fn from(kind: StepKind) -> Self {
        match kind {
            StepKind::Effect(name) => name,
            other => other.name().to_owned(),
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One ordered entry of a scene's action sequence.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationStep {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub kind: StepKind,
    /// Seconds; ignored for [`StepKind::Add`].
    #[serde(default = "default_duration")]
    pub duration: f64,
    /// Rate function name; only meaningful for [`StepKind::Effect`].
    #[serde(default = "default_easing")]
    pub easing: String,
}

fn default_duration() -> f64 {
    DEFAULT_DURATION
}

fn default_easing() -> String {
    DEFAULT_EASING.to_owned()
}

impl AnimationStep {
    /// Instant `self.add(target)`.
    pub fn add(target: impl Into<String>) -> Self {
        Self {
            target: Some(target.into()),
            kind: StepKind::Add,
            duration: 0.0,
            easing: String::new(),
        }
    }

    /// Pause for `duration` seconds.
    pub fn wait(duration: f64) -> Self {
        Self {
            target: None,
            kind: StepKind::Wait,
            duration,
            easing: String::new(),
        }
    }

    /// Play effect `kind` on `target` with the default run time and easing.
    pub fn effect(kind: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            target: Some(target.into()),
            kind: StepKind::Effect(kind.into()),
            duration: DEFAULT_DURATION,
            easing: default_easing(),
        }
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_easing(mut self, easing: impl Into<String>) -> Self {
        self.easing = easing.into();
        self
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Easing with an empty name read as the default.
    pub fn effective_easing(&self) -> &str {
        if self.easing.is_empty() {
            DEFAULT_EASING
        } else {
            &self.easing
        }
    }

    /// Same step for code-generation purposes: fields a kind ignores are not compared.
    pub fn equivalent(&self, other: &Self) -> bool {
        if self.kind != other.kind || self.target != other.target {
            return false;
        }
        match self.kind {
            StepKind::Add => true,
            StepKind::Wait => durations_match(self.duration, other.duration),
            StepKind::Effect(_) => {
                durations_match(self.duration, other.duration)
                    && self.effective_easing() == other.effective_easing()
            }
        }
    }
}

/// `true` for names usable as a variable or class name in generated code.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// `true` for `name` or `module.name` style references, as used by rate functions.
pub(crate) fn is_dotted_identifier(name: &str) -> bool {
    name.split('.').all(is_identifier)
}

/// Step kinds that are statements of their own and cannot be played as an effect.
const RESERVED_EFFECT_NAMES: [&str; 2] = ["Add", "Wait"];

/// `true` when `name` can be emitted as `self.play(<name>(target))` and read back as an effect.
pub(crate) fn is_effect_name(name: &str) -> bool {
    is_identifier(name) && !RESERVED_EFFECT_NAMES.contains(&name)
}

/// A named, ordered collection of objects and animation steps plus a background color.
///
/// The scene exclusively owns its objects and steps. Every mutation keeps two invariants:
/// object names are unique, and every step target names a live object (`Wait` has none).
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "SceneRepr", into = "SceneRepr")]
pub struct Scene {
    name: String,
    background: HexColor,
    objects: IndexMap<String, SceneObject>,
    steps: Vec<AnimationStep>,
    name_counters: BTreeMap<String, u32>,
    revision: u64,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct SceneRepr {
    name: String,
    #[serde(default = "black")]
    background: HexColor,
    #[serde(default)]
    objects: Vec<SceneObject>,
    #[serde(default)]
    steps: Vec<AnimationStep>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    name_counters: BTreeMap<String, u32>,
}

fn black() -> HexColor {
    HexColor::BLACK
}

impl TryFrom<SceneRepr> for Scene {
    type Error = ComposerError;

    fn try_from(repr: SceneRepr) -> Result<Self, Self::Error> {
        let mut scene = Scene::new(repr.name);
        scene.background = repr.background;
        scene.name_counters = repr.name_counters;
        for obj in repr.objects {
            scene.insert_object(obj)?;
        }
        scene.replace_steps(repr.steps)?;
        scene.validate()?;
        scene.revision = 0;
        Ok(scene)
    }
}

impl From<Scene> for SceneRepr {
    fn from(scene: Scene) -> Self {
        Self {
            name: scene.name,
            background: scene.background,
            objects: scene.objects.into_values().collect(),
            steps: scene.steps,
            name_counters: scene.name_counters,
        }
    }
}

impl Scene {
    /// Empty scene on a black background. The name is checked by [`Scene::validate`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            background: HexColor::BLACK,
            objects: IndexMap::new(),
            steps: Vec::new(),
            name_counters: BTreeMap::new(),
            revision: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the scene; returns `false` when the name is unchanged.
    pub fn set_name(&mut self, name: impl Into<String>) -> ComposerResult<bool> {
        let name = name.into();
        if !is_identifier(&name) {
            return Err(ComposerError::validation(format!(
                "scene name '{name}' is not a valid identifier"
            )));
        }
        if self.name == name {
            return Ok(false);
        }
        self.name = name;
        self.bump();
        Ok(true)
    }

    pub fn background(&self) -> HexColor {
        self.background
    }

    /// Returns `true` when the color actually changed.
    pub fn set_background(&mut self, color: HexColor) -> bool {
        if self.background == color {
            return false;
        }
        self.background = color;
        self.bump();
        true
    }

    /// Monotonic counter bumped by every applied mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision += 1;
    }

    /// `true` when the scene has neither objects nor steps.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty() && self.steps.is_empty()
    }

    // --- objects ---

    /// Objects in declaration order.
    pub fn objects(&self) -> impl ExactSizeIterator<Item = &SceneObject> {
        self.objects.values()
    }

    pub fn object_names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }

    pub fn object(&self, name: &str) -> Option<&SceneObject> {
        self.objects.get(name)
    }

    pub fn contains_object(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Append a new object at the end of the declaration order.
    pub fn insert_object(&mut self, obj: SceneObject) -> ComposerResult<()> {
        if !is_identifier(&obj.name) {
            return Err(ComposerError::validation(format!(
                "object name '{}' is not a valid identifier",
                obj.name
            )));
        }
        if self.objects.contains_key(&obj.name) {
            return Err(ComposerError::validation(format!(
                "duplicate object name '{}'",
                obj.name
            )));
        }
        check_font_size(&obj.name, obj.font_size)?;
        check_content(&obj.name, &obj.content)?;
        self.objects.insert(obj.name.clone(), obj);
        self.bump();
        Ok(())
    }

    /// Remove an object together with every step that targets it.
    pub fn remove_object(&mut self, name: &str) -> ComposerResult<SceneObject> {
        let obj = self
            .objects
            .shift_remove(name)
            .ok_or_else(|| unknown_object(name))?;
        self.steps.retain(|s| s.target() != Some(name));
        self.bump();
        Ok(obj)
    }

    /// Rename an object in place, retargeting every step that referenced the old name.
    pub fn rename_object(&mut self, old: &str, new: &str) -> ComposerResult<()> {
        if old == new {
            return Ok(());
        }
        if !is_identifier(new) {
            return Err(ComposerError::validation(format!(
                "object name '{new}' is not a valid identifier"
            )));
        }
        if self.objects.contains_key(new) {
            return Err(ComposerError::validation(format!(
                "cannot rename '{old}': '{new}' already exists"
            )));
        }
        let (index, _, mut obj) = self
            .objects
            .shift_remove_full(old)
            .ok_or_else(|| unknown_object(old))?;
        obj.name = new.to_owned();
        self.objects.shift_insert(index, new.to_owned(), obj);
        for step in &mut self.steps {
            if step.target() == Some(old) {
                step.target = Some(new.to_owned());
            }
        }
        self.bump();
        Ok(())
    }

    /// Replace an object's markup. Content must fit on one line of a raw string literal.
    pub fn set_content(&mut self, name: &str, content: &str) -> ComposerResult<bool> {
        check_content(name, content)?;
        let obj = self.objects.get_mut(name).ok_or_else(|| unknown_object(name))?;
        if obj.content == content {
            return Ok(false);
        }
        obj.content = content.to_owned();
        self.bump();
        Ok(true)
    }

    /// Recolor an object; `Ok(false)` when the color is unchanged.
    pub fn set_color(&mut self, name: &str, color: HexColor) -> ComposerResult<bool> {
        let obj = self.objects.get_mut(name).ok_or_else(|| unknown_object(name))?;
        if obj.color == color {
            return Ok(false);
        }
        obj.color = color;
        self.bump();
        Ok(true)
    }

    /// Set an object's font size; sizes below [`MIN_FONT_SIZE`] are rejected.
    pub fn set_font_size(&mut self, name: &str, font_size: u32) -> ComposerResult<bool> {
        check_font_size(name, font_size)?;
        let obj = self.objects.get_mut(name).ok_or_else(|| unknown_object(name))?;
        if obj.font_size == font_size {
            return Ok(false);
        }
        obj.font_size = font_size;
        self.bump();
        Ok(true)
    }

    /// Move an object to a canvas-space position.
    pub fn set_position(&mut self, name: &str, position: Point) -> ComposerResult<bool> {
        let obj = self.objects.get_mut(name).ok_or_else(|| unknown_object(name))?;
        if obj.position == position {
            return Ok(false);
        }
        obj.position = position;
        self.bump();
        Ok(true)
    }

    /// Put the named objects first, in the given order; unnamed objects keep their relative order.
    pub fn arrange_objects<'a>(&mut self, order: impl IntoIterator<Item = &'a str>) -> bool {
        let rank: HashMap<&str, usize> = order
            .into_iter()
            .enumerate()
            .map(|(i, name)| (name, i))
            .collect();
        let key = |name: &str| rank.get(name).copied().unwrap_or(usize::MAX);
        let sorted = self
            .objects
            .keys()
            .zip(self.objects.keys().skip(1))
            .all(|(a, b)| key(a.as_str()) <= key(b.as_str()));
        if sorted {
            return false;
        }
        self.objects
            .sort_by(|a, _, b, _| key(a.as_str()).cmp(&key(b.as_str())));
        self.bump();
        true
    }

    /// Allocate `<prefix>_<n>`, skipping names already taken.
    pub fn next_name(&mut self, prefix: &str) -> String {
        let counter = self.name_counters.entry(prefix.to_owned()).or_insert(0);
        loop {
            *counter += 1;
            let name = format!("{prefix}_{counter}");
            if !self.objects.contains_key(&name) {
                return name;
            }
        }
    }

    /// Insert a copy of `template` under a fresh name, shifted by `offset`.
    pub fn paste_object(&mut self, template: &SceneObject, offset: Vec2) -> ComposerResult<String> {
        let prefix = name_prefix(&template.name);
        let name = self.next_name(prefix);
        let obj = SceneObject {
            name: name.clone(),
            position: template.position + offset,
            ..template.clone()
        };
        self.insert_object(obj)?;
        Ok(name)
    }

    // --- animation steps ---

    pub fn steps(&self) -> &[AnimationStep] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&AnimationStep> {
        self.steps.get(index)
    }

    /// Append a step. Fails if the step breaks a step invariant.
    pub fn push_step(&mut self, step: AnimationStep) -> ComposerResult<()> {
        self.check_step(&step)?;
        self.steps.push(step);
        self.bump();
        Ok(())
    }

    /// Insert a step before `index` (`index == len` appends).
    pub fn insert_step(&mut self, index: usize, step: AnimationStep) -> ComposerResult<()> {
        if index > self.steps.len() {
            return Err(step_out_of_range(index, self.steps.len()));
        }
        self.check_step(&step)?;
        self.steps.insert(index, step);
        self.bump();
        Ok(())
    }

    /// Remove and return the step at `index`.
    pub fn remove_step(&mut self, index: usize) -> ComposerResult<AnimationStep> {
        if index >= self.steps.len() {
            return Err(step_out_of_range(index, self.steps.len()));
        }
        let step = self.steps.remove(index);
        self.bump();
        Ok(step)
    }

    /// Swap step `index` with its neighbour `delta` places away.
    ///
    /// Returns `false` and leaves the list untouched when either end is out of range.
    pub fn move_step(&mut self, index: usize, delta: isize) -> bool {
        let Some(dest) = index.checked_add_signed(delta) else {
            return false;
        };
        if index >= self.steps.len() || dest >= self.steps.len() || dest == index {
            return false;
        }
        self.steps.swap(index, dest);
        self.bump();
        true
    }

    /// Move step `from` so it ends up at position `to`, shifting the steps in between.
    pub fn reorder_step(&mut self, from: usize, to: usize) -> ComposerResult<()> {
        let len = self.steps.len();
        if from >= len {
            return Err(step_out_of_range(from, len));
        }
        if to >= len {
            return Err(step_out_of_range(to, len));
        }
        if from == to {
            return Ok(());
        }
        let step = self.steps.remove(from);
        self.steps.insert(to, step);
        self.bump();
        Ok(())
    }

    /// Edit one step in place; the edit is rolled back if it breaks a step invariant.
    pub fn edit_step(
        &mut self,
        index: usize,
        edit: impl FnOnce(&mut AnimationStep),
    ) -> ComposerResult<()> {
        let len = self.steps.len();
        let current = self
            .steps
            .get(index)
            .ok_or_else(|| step_out_of_range(index, len))?;
        let mut edited = current.clone();
        edit(&mut edited);
        if edited == *current {
            return Ok(());
        }
        self.check_step(&edited)?;
        self.steps[index] = edited;
        self.bump();
        Ok(())
    }

    /// Point a step at another live object.
    pub fn set_step_target(&mut self, index: usize, target: &str) -> ComposerResult<()> {
        self.edit_step(index, |step| step.target = Some(target.to_owned()))
    }

    /// Replace the whole step list; nothing changes if any step is invalid.
    pub fn replace_steps(&mut self, steps: Vec<AnimationStep>) -> ComposerResult<()> {
        for step in &steps {
            self.check_step(step)?;
        }
        self.steps = steps;
        self.bump();
        Ok(())
    }

    /// Caption for the animation list, e.g. `2. Write(eq_1) 1.0s`.
    pub fn step_label(&self, index: usize) -> Option<String> {
        let step = self.steps.get(index)?;
        let n = index + 1;
        let target = step.target().unwrap_or_default();
        Some(match &step.kind {
            StepKind::Add => format!("{n}. Add({target})"),
            StepKind::Wait => format!("{n}. Wait {:.1}s", step.duration),
            StepKind::Effect(kind) => format!("{n}. {kind}({target}) {:.1}s", step.duration),
        })
    }

    fn check_step(&self, step: &AnimationStep) -> ComposerResult<()> {
        if !step.duration.is_finite() || step.duration < 0.0 {
            return Err(ComposerError::validation(format!(
                "{} step duration must be a non-negative number",
                step.kind
            )));
        }
        if let StepKind::Effect(name) = &step.kind
            && !is_effect_name(name)
        {
            return Err(ComposerError::validation(format!(
                "'{name}' is not a valid effect name"
            )));
        }
        if !step.easing.is_empty() && !is_dotted_identifier(&step.easing) {
            return Err(ComposerError::validation(format!(
                "'{}' is not a valid rate function name",
                step.easing
            )));
        }
        match (&step.kind, step.target()) {
            (StepKind::Wait, None) => Ok(()),
            (StepKind::Wait, Some(_)) => {
                Err(ComposerError::validation("Wait steps have no target"))
            }
            (kind, None) => Err(ComposerError::validation(format!(
                "{kind} step needs a target object"
            ))),
            (kind, Some(target)) if !self.objects.contains_key(target) => {
                Err(ComposerError::validation(format!(
                    "{kind} step targets missing object '{target}'"
                )))
            }
            _ => Ok(()),
        }
    }

    /// Check every scene invariant.
    pub fn validate(&self) -> ComposerResult<()> {
        if !is_identifier(&self.name) {
            return Err(ComposerError::validation(format!(
                "scene name '{}' is not a valid identifier",
                self.name
            )));
        }
        for (key, obj) in &self.objects {
            if *key != obj.name {
                return Err(ComposerError::validation(format!(
                    "object '{}' is stored under key '{key}'",
                    obj.name
                )));
            }
            check_font_size(&obj.name, obj.font_size)?;
            check_content(&obj.name, &obj.content)?;
        }
        for step in &self.steps {
            self.check_step(step)?;
        }
        Ok(())
    }
}

fn name_prefix(name: &str) -> &str {
    match name.rsplit_once('_') {
        Some((prefix, suffix))
            if !prefix.is_empty() && !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) =>
        {
            prefix
        }
        _ => name,
    }
}

fn check_font_size(name: &str, font_size: u32) -> ComposerResult<()> {
    if font_size < MIN_FONT_SIZE {
        return Err(ComposerError::validation(format!(
            "object '{name}' font size must be at least {MIN_FONT_SIZE}, got {font_size}"
        )));
    }
    Ok(())
}

// Content is emitted inside `r"..."` on a single line.
fn check_content(name: &str, content: &str) -> ComposerResult<()> {
    if let Some(c) = content.chars().find(|&c| matches!(c, '"' | '\n' | '\r')) {
        return Err(ComposerError::validation(format!(
            "object '{name}' content may not contain {c:?}"
        )));
    }
    Ok(())
}

fn unknown_object(name: &str) -> ComposerError {
    ComposerError::validation(format!("unknown object '{name}'"))
}

fn step_out_of_range(index: usize, len: usize) -> ComposerError {
    ComposerError::validation(format!(
        "animation step index {index} out of range (len {len})"
    ))
}

/// Every scene of one document, in order.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Project {
    #[serde(default)]
    scenes: Vec<Scene>,
}

impl Project {
    /// Empty project with no scenes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Project holding one empty scene named [`DEFAULT_SCENE_NAME`].
    pub fn with_default_scene() -> Self {
        Self {
            scenes: vec![Scene::new(DEFAULT_SCENE_NAME)],
        }
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn scene(&self, index: usize) -> Option<&Scene> {
        self.scenes.get(index)
    }

    /// Mutable access; renames must go through [`Project::rename_scene`] to keep names unique.
    pub fn scene_mut(&mut self, index: usize) -> Option<&mut Scene> {
        self.scenes.get_mut(index)
    }

    /// Position of the scene named `name`.
    pub fn scene_index(&self, name: &str) -> Option<usize> {
        self.scenes.iter().position(|s| s.name() == name)
    }

    pub fn scene_by_name(&self, name: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.name() == name)
    }

    /// Append a scene; scene names double as class names and must be unique.
    pub fn add_scene(&mut self, scene: Scene) -> ComposerResult<usize> {
        scene.validate()?;
        if self.scene_index(scene.name()).is_some() {
            return Err(ComposerError::validation(format!(
                "duplicate scene name '{}'",
                scene.name()
            )));
        }
        self.scenes.push(scene);
        Ok(self.scenes.len() - 1)
    }

    /// Rename the scene at `index`, keeping scene names unique.
    pub fn rename_scene(&mut self, index: usize, name: &str) -> ComposerResult<bool> {
        if let Some(other) = self.scene_index(name)
            && other != index
        {
            return Err(ComposerError::validation(format!(
                "duplicate scene name '{name}'"
            )));
        }
        let scene = self.scenes.get_mut(index).ok_or_else(|| {
            ComposerError::validation(format!("scene index {index} out of range"))
        })?;
        scene.set_name(name)
    }

    /// Validate every scene and the uniqueness of scene names.
    pub fn validate(&self) -> ComposerResult<()> {
        for (i, scene) in self.scenes.iter().enumerate() {
            scene.validate()?;
            if self.scene_index(scene.name()) != Some(i) {
                return Err(ComposerError::validation(format!(
                    "duplicate scene name '{}'",
                    scene.name()
                )));
            }
        }
        Ok(())
    }

    /// Deserialize and validate a project document.
    pub fn from_json(s: &str) -> ComposerResult<Self> {
        let project: Self = serde_json::from_str(s)?;
        project.validate()?;
        Ok(project)
    }

    /// Pretty-printed JSON document.
    pub fn to_json(&self) -> ComposerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
