//! Renderer-independent model of the orbit hierarchy
//!
//! Each body hangs off its own pivot. A pivot is rotated about +Y by
//! `elapsed * speed` while the body keeps a fixed offset of `distance` along the
//! pivot's local X axis, which yields a circular orbit. Pivots are parented either
//! to the scene root or to another body (the moon's pivot rides on the earth).

use bevy::math::Affine3A;
use bevy::prelude::*;

use crate::core::config::{BodyConfig, SceneConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PivotId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PivotParent {
    /// The sun's fixed anchor at the origin.
    Root,
    Body(BodyId),
}

#[derive(Clone, Debug)]
pub struct Pivot {
    pub parent: PivotParent,
    pub body: BodyId,
    /// Rotation about +Y (rad).
    pub angle: f32,
}

#[derive(Clone, Debug)]
pub struct Body {
    pub name: String,
    pub size: f32,
    pub distance: f32,
    pub speed: f32,
    pub spin_step: f32,
    /// Axial rotation about +Y (rad), advanced once per tick.
    pub spin: f32,
    /// Position relative to the owning pivot.
    pub offset: Vec3,
    pub pivot: PivotId,
    pub roughness: f32,
    pub emissive_strength: f32,
    pub texture: String,
}

/// The scene graph: a sun at the origin and bodies orbiting on nested pivots.
#[derive(Resource, Clone, Debug)]
pub struct SolarSystem {
    sun_size: f32,
    pivots: Vec<Pivot>,
    bodies: Vec<Body>,
    earth: BodyId,
    moon: BodyId,
}

impl SolarSystem {
    pub fn from_config(config: &SceneConfig) -> Self {
        let mut system = Self {
            sun_size: config.sun.size,
            pivots: Vec::new(),
            bodies: Vec::new(),
            earth: BodyId(0),
            moon: BodyId(0),
        };
        system.earth = system.add_body(PivotParent::Root, &config.earth);
        system.moon = system.add_body(PivotParent::Body(system.earth), &config.moon);
        system
    }

    /// Create a pivot under `parent` and a body on it.
    ///
    /// Parents always exist before their children, so iterating pivots in order
    /// visits the tree top-down.
    fn add_body(&mut self, parent: PivotParent, config: &BodyConfig) -> BodyId {
        let body = BodyId(self.bodies.len());
        let pivot = PivotId(self.pivots.len());
        self.pivots.push(Pivot {
            parent,
            body,
            angle: 0.0,
        });
        self.bodies.push(Body {
            name: config.name.clone(),
            size: config.size,
            distance: config.distance,
            speed: config.speed,
            spin_step: config.spin_step,
            spin: 0.0,
            offset: Vec3::X * config.distance,
            pivot,
            roughness: config.roughness,
            emissive_strength: config.emissive_strength,
            texture: config.texture.clone(),
        });
        body
    }

    pub fn sun_size(&self) -> f32 {
        self.sun_size
    }

    pub fn earth(&self) -> BodyId {
        self.earth
    }

    pub fn moon(&self) -> BodyId {
        self.moon
    }

    pub fn body(&self, id: BodyId) -> &Body {
        &self.bodies[id.0]
    }

    pub fn pivot(&self, id: PivotId) -> &Pivot {
        &self.pivots[id.0]
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies.iter().enumerate().map(|(i, body)| (BodyId(i), body))
    }

    pub fn pivots(&self) -> impl Iterator<Item = (PivotId, &Pivot)> {
        self.pivots.iter().enumerate().map(|(i, pivot)| (PivotId(i), pivot))
    }

    /// Advance one tick at `elapsed_secs` since the loop started.
    ///
    /// Pivot angles and offsets are absolute; spin accumulates per call.
    pub fn tick(&mut self, elapsed_secs: f32) {
        for pivot in &mut self.pivots {
            pivot.angle = elapsed_secs * self.bodies[pivot.body.0].speed;
        }
        for body in &mut self.bodies {
            body.offset = Vec3::X * body.distance;
            body.spin += body.spin_step;
        }
    }

    pub fn pivot_local(&self, id: PivotId) -> Transform {
        Transform::from_rotation(Quat::from_rotation_y(self.pivot(id).angle))
    }

    pub fn body_local(&self, id: BodyId) -> Transform {
        let body = self.body(id);
        Transform::from_translation(body.offset).with_rotation(Quat::from_rotation_y(body.spin))
    }

    fn pivot_world(&self, id: PivotId) -> Affine3A {
        let parent = match self.pivot(id).parent {
            PivotParent::Root => Affine3A::IDENTITY,
            PivotParent::Body(body) => self.body_world(body),
        };
        parent * self.pivot_local(id).compute_affine()
    }

    pub fn body_world(&self, id: BodyId) -> Affine3A {
        self.pivot_world(self.body(id).pivot) * self.body_local(id).compute_affine()
    }

    pub fn body_world_translation(&self, id: BodyId) -> Vec3 {
        Vec3::from(self.body_world(id).translation)
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::from_config(&SceneConfig::default())
    }
}
