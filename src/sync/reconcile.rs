use std::collections::HashSet;

use crate::{
    foundation::core::{ORIGIN_EPSILON, Point, canvas_to_scene, positions_match, scene_to_canvas},
    foundation::error::ComposerResult,
    parse::parser::{ParsedObject, ParsedScene},
    scene::model::{AnimationStep, Project, Scene, SceneObject},
};

/// Object property touched by a sync.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectField {
    Content,
    Color,
    FontSize,
    Position,
}

/// One mutation applied to a live scene.
#[derive(Clone, Debug, PartialEq)]
pub enum SyncChange {
    SceneRenamed { from: String, to: String },
    BackgroundChanged,
    ObjectCreated(String),
    ObjectRemoved(String),
    ObjectUpdated { name: String, fields: Vec<ObjectField> },
    ObjectsReordered,
    StepsReplaced { count: usize },
    /// A parsed step named an object the code never declared.
    StepDropped { index: usize, target: String },
}

impl SyncChange {
    /// `true` for entries that record a dropped input rather than a mutation.
    pub fn is_diagnostic(&self) -> bool {
        matches!(self, Self::StepDropped { .. })
    }
}

/// What one scene reconciliation did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SyncReport {
    pub scene: String,
    pub changes: Vec<SyncChange>,
}

impl SyncReport {
    /// `true` when the live scene was left untouched.
    pub fn is_noop(&self) -> bool {
        self.changes.iter().all(SyncChange::is_diagnostic)
    }
}

/// What a whole-document reconciliation did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectSyncReport {
    /// One entry per live scene that was matched against parsed code.
    pub scenes: Vec<SyncReport>,
    /// Names of scenes created from code that matched nothing.
    pub added: Vec<String>,
    /// Names of parsed scenes that could not be applied.
    pub skipped: Vec<String>,
}

impl ProjectSyncReport {
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.scenes.iter().all(SyncReport::is_noop)
    }
}

/// Merge a parsed scene into a live one so that regenerating the live scene reproduces the
/// parsed code.
///
/// Objects are matched by name. Values within tolerance of the live ones are left alone, so
/// reconciling the same parse twice mutates nothing the second time.
#[tracing::instrument(skip(live, parsed), fields(scene = live.name()))]
pub fn reconcile_scene(live: &mut Scene, parsed: &ParsedScene) -> ComposerResult<SyncReport> {
    let mut changes = Vec::new();

    let from = live.name().to_owned();
    if live.set_name(&parsed.name)? {
        tracing::debug!(from = %from, to = %parsed.name, "scene renamed");
        changes.push(SyncChange::SceneRenamed {
            from,
            to: parsed.name.clone(),
        });
    }

    reconcile_body(live, parsed, &mut changes)?;
    Ok(SyncReport {
        scene: live.name().to_owned(),
        changes,
    })
}

/// Apply a parse result to a whole project.
///
/// `None` (text with no scene class) leaves every scene untouched. Parsed scenes match live
/// ones by name first; the rest pair up in order with the live scenes still unmatched, and
/// leftovers are appended. Live scenes absent from the parse are kept.
#[tracing::instrument(skip_all, fields(live = project.len()))]
pub fn reconcile_project(
    project: &mut Project,
    parsed: Option<&[ParsedScene]>,
) -> ComposerResult<ProjectSyncReport> {
    let mut report = ProjectSyncReport::default();
    let Some(parsed) = parsed else {
        tracing::debug!("no scene class in code; project unchanged");
        return Ok(report);
    };

    let mut claimed = vec![false; project.len()];
    let mut targets: Vec<Option<usize>> = vec![None; parsed.len()];
    for (pi, ps) in parsed.iter().enumerate() {
        if let Some(li) = project.scene_index(&ps.name)
            && !claimed[li]
        {
            claimed[li] = true;
            targets[pi] = Some(li);
        }
    }
    let mut free = (0..claimed.len()).filter(|&li| !claimed[li]);
    for pi in 0..parsed.len() {
        if targets[pi].is_some() {
            continue;
        }
        // A positional match may only take the name if no other scene holds it.
        let name = &parsed[pi].name;
        let name_taken = project.scene_index(name).is_some()
            || parsed[..pi]
                .iter()
                .zip(&targets)
                .any(|(other, t)| t.is_some() && other.name == *name);
        if name_taken {
            continue;
        }
        match free.next() {
            Some(li) => targets[pi] = Some(li),
            None => break,
        }
    }

    for (ps, target) in parsed.iter().zip(targets) {
        match target {
            Some(li) => {
                let from = project.scene(li).map(|s| s.name().to_owned());
                let mut changes = Vec::new();
                if project.rename_scene(li, &ps.name)?
                    && let Some(from) = from
                {
                    tracing::debug!(from = %from, to = %ps.name, "scene renamed");
                    changes.push(SyncChange::SceneRenamed {
                        from,
                        to: ps.name.clone(),
                    });
                }
                let Some(live) = project.scene_mut(li) else {
                    continue;
                };
                reconcile_body(live, ps, &mut changes)?;
                report.scenes.push(SyncReport {
                    scene: ps.name.clone(),
                    changes,
                });
            }
            None if project.scene_index(&ps.name).is_some() => {
                tracing::warn!(scene = %ps.name, "duplicate scene class in code; skipped");
                report.skipped.push(ps.name.clone());
            }
            None => {
                let mut scene = Scene::new(&ps.name);
                reconcile_body(&mut scene, ps, &mut Vec::new())?;
                project.add_scene(scene)?;
                tracing::debug!(scene = %ps.name, "scene created from code");
                report.added.push(ps.name.clone());
            }
        }
    }
    Ok(report)
}

fn reconcile_body(
    live: &mut Scene,
    parsed: &ParsedScene,
    changes: &mut Vec<SyncChange>,
) -> ComposerResult<()> {
    if live.set_background(parsed.background) {
        tracing::debug!(color = %parsed.background, "background changed");
        changes.push(SyncChange::BackgroundChanged);
    }

    let wanted: HashSet<&str> = parsed.objects.iter().map(|o| o.name.as_str()).collect();
    let stale: Vec<String> = live
        .object_names()
        .filter(|name| !wanted.contains(name))
        .map(str::to_owned)
        .collect();
    for name in stale {
        live.remove_object(&name)?;
        tracing::debug!(object = %name, "object removed");
        changes.push(SyncChange::ObjectRemoved(name));
    }

    for po in &parsed.objects {
        if live.contains_object(&po.name) {
            let fields = update_object(live, po)?;
            if !fields.is_empty() {
                tracing::debug!(object = %po.name, ?fields, "object updated");
                changes.push(SyncChange::ObjectUpdated {
                    name: po.name.clone(),
                    fields,
                });
            }
        } else {
            live.insert_object(
                SceneObject::math_tex(&po.name, &po.content)
                    .with_color(po.color)
                    .with_font_size(po.font_size)
                    .at(scene_to_canvas(po.position)),
            )?;
            tracing::debug!(object = %po.name, "object created");
            changes.push(SyncChange::ObjectCreated(po.name.clone()));
        }
    }

    if live.arrange_objects(parsed.objects.iter().map(|o| o.name.as_str())) {
        changes.push(SyncChange::ObjectsReordered);
    }

    let mut steps = Vec::with_capacity(parsed.steps.len());
    for (index, step) in parsed.steps.iter().enumerate() {
        match step.target() {
            Some(target) if !live.contains_object(target) => {
                tracing::debug!(index, target, "dropping step with undeclared target");
                changes.push(SyncChange::StepDropped {
                    index,
                    target: target.to_owned(),
                });
            }
            _ => steps.push(step.clone()),
        }
    }
    if !steps_equivalent(live.steps(), &steps) {
        let count = steps.len();
        live.replace_steps(steps)?;
        tracing::debug!(count, "steps replaced");
        changes.push(SyncChange::StepsReplaced { count });
    }
    Ok(())
}

fn update_object(live: &mut Scene, po: &ParsedObject) -> ComposerResult<Vec<ObjectField>> {
    let mut fields = Vec::new();
    if live.set_content(&po.name, &po.content)? {
        fields.push(ObjectField::Content);
    }
    if live.set_color(&po.name, po.color)? {
        fields.push(ObjectField::Color);
    }
    if live.set_font_size(&po.name, po.font_size)? {
        fields.push(ObjectField::FontSize);
    }
    let current = live.object(&po.name).map(|o| o.position);
    if let Some(current) = current
        && !position_equivalent(current, po.position)
        && live.set_position(&po.name, scene_to_canvas(po.position))?
    {
        fields.push(ObjectField::Position);
    }
    Ok(fields)
}

/// Compare a live canvas position with a parsed scene-space one.
///
/// Code without a `move_to` parses as the origin, and generation omits `move_to` for
/// positions inside the origin band, so both sides of that band count as equal.
fn position_equivalent(live_canvas: Point, parsed_scene: Point) -> bool {
    let near_origin = |p: Point| p.x.abs() <= ORIGIN_EPSILON && p.y.abs() <= ORIGIN_EPSILON;
    if near_origin(parsed_scene) && near_origin(canvas_to_scene(live_canvas)) {
        return true;
    }
    positions_match(live_canvas, scene_to_canvas(parsed_scene))
}

fn steps_equivalent(live: &[AnimationStep], parsed: &[AnimationStep]) -> bool {
    live.len() == parsed.len() && live.iter().zip(parsed).all(|(a, b)| a.equivalent(b))
}

#[cfg(test)]
#[path = "../../tests/unit/sync/reconcile.rs"]
mod tests;
