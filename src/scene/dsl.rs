use crate::{
    foundation::core::HexColor,
    foundation::error::ComposerResult,
    scene::model::{AnimationStep, Scene, SceneObject},
};

/// Builder for [`Scene`](crate::Scene).
pub struct SceneBuilder {
    name: String,
    background: HexColor,
    objects: Vec<SceneObject>,
    steps: Vec<AnimationStep>,
}

impl SceneBuilder {
    /// Create a builder for a scene named `name` (used as the generated class name).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            background: HexColor::BLACK,
            objects: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Set the scene background color.
    pub fn background(mut self, color: HexColor) -> Self {
        self.background = color;
        self
    }

    /// Append an object in declaration order.
    pub fn object(mut self, obj: SceneObject) -> Self {
        self.objects.push(obj);
        self
    }

    /// Append an animation step.
    pub fn step(mut self, step: AnimationStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Build and validate the final [`Scene`](crate::Scene).
    pub fn build(self) -> ComposerResult<Scene> {
        let mut scene = Scene::new(self.name);
        scene.set_background(self.background);
        for obj in self.objects {
            scene.insert_object(obj)?;
        }
        for step in self.steps {
            scene.push_step(step)?;
        }
        scene.validate()?;
        Ok(scene)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/dsl.rs"]
mod tests;
