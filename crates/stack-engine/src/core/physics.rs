use glam::Vec2;
use rapier2d::prelude::*;

use crate::api::types::EntityId;

/// Cosine of the steepest contact normal still counted as standing on something.
/// 0.7 is roughly 45 degrees off vertical.
pub const DEFAULT_GROUND_COS: f32 = 0.7;

/// Contacts further apart than this (world units) do not support a body.
const GROUND_CONTACT_SLOP: f32 = 1.0;

fn to_rapier(v: Vec2) -> Vector<Real> {
    vector![v.x, v.y]
}

fn from_rapier(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

/// Whether a body falls and gets pushed around, or stays where it was put.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Dynamic,
    /// The floor and other solids.
    Fixed,
}

/// Axis-aligned box collider centred on its body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderDesc {
    pub half_extents: Vec2,
}

impl ColliderDesc {
    /// Box matching a rect of the given full size.
    pub fn rect(size: Vec2) -> Self {
        Self { half_extents: size * 0.5 }
    }
}

/// Surface response of a collider.
#[derive(Debug, Clone, Copy)]
pub struct ColliderMaterial {
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
}

impl Default for ColliderMaterial {
    fn default() -> Self {
        Self {
            restitution: 0.0,
            friction: 0.5,
            density: 1.0,
        }
    }
}

/// Everything needed to create a body. `position` is the body centre,
/// not the entity anchor.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub body_type: BodyType,
    pub position: Vec2,
    pub fixed_rotation: bool,
    pub collider: ColliderDesc,
}

impl BodyDesc {
    pub fn dynamic(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Dynamic,
            position: Vec2::ZERO,
            fixed_rotation: false,
            collider,
        }
    }

    /// Static solid. Never rotates.
    pub fn fixed(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Fixed,
            position: Vec2::ZERO,
            fixed_rotation: true,
            collider,
        }
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    /// Keep the body upright whatever hits it.
    pub fn with_fixed_rotation(mut self, fixed: bool) -> Self {
        self.fixed_rotation = fixed;
        self
    }

    fn rigid_body(&self, owner: EntityId) -> RigidBody {
        let builder = match self.body_type {
            BodyType::Dynamic => RigidBodyBuilder::dynamic(),
            BodyType::Fixed => RigidBodyBuilder::fixed(),
        };
        let builder = if self.fixed_rotation {
            builder.lock_rotations()
        } else {
            builder
        };
        builder
            .translation(to_rapier(self.position))
            .user_data(owner.0 as u128)
            .build()
    }

    fn collider(&self, material: ColliderMaterial) -> Collider {
        let half = self.collider.half_extents;
        ColliderBuilder::cuboid(half.x, half.y)
            .restitution(material.restitution)
            .friction(material.friction)
            .density(material.density)
            .build()
    }
}

/// Body and collider handles kept on the owning entity.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

/// Rapier2D state for one scene.
/// Y points down, so positive gravity pulls bodies toward the floor.
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
    queries: QueryPipeline,
}

impl PhysicsWorld {
    /// Empty world stepping `dt` seconds at a time.
    pub fn new(gravity: Vec2, dt: f32) -> Self {
        let params = IntegrationParameters {
            dt,
            ..IntegrationParameters::default()
        };
        Self {
            gravity: to_rapier(gravity),
            params,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
            queries: QueryPipeline::new(),
        }
    }

    /// Insert a body with its box collider. `owner` goes into the body's `user_data`.
    pub fn create_body(
        &mut self,
        owner: EntityId,
        desc: &BodyDesc,
        material: ColliderMaterial,
    ) -> PhysicsBody {
        let body_handle = self.bodies.insert(desc.rigid_body(owner));
        let collider_handle = self.colliders.insert_with_parent(
            desc.collider(material),
            body_handle,
            &mut self.bodies,
        );
        PhysicsBody {
            body_handle,
            collider_handle,
        }
    }

    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            Some(&mut self.queries),
            &(),
            &(),
        );
    }

    pub fn set_velocity(&mut self, body: &PhysicsBody, vel: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_linvel(to_rapier(vel), true);
        }
    }

    /// Linear velocity, zero for a removed handle.
    pub fn velocity(&self, body: &PhysicsBody) -> Vec2 {
        self.bodies
            .get(body.body_handle)
            .map_or(Vec2::ZERO, |rb| from_rapier(rb.linvel()))
    }

    /// Teleport a body's centre. Wakes it so gravity resumes.
    pub fn set_translation(&mut self, body: &PhysicsBody, center: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_translation(to_rapier(center), true);
        }
    }

    /// Centre and rotation (radians) of a body.
    pub fn body_position(&self, body: &PhysicsBody) -> (Vec2, f32) {
        self.bodies.get(body.body_handle).map_or((Vec2::ZERO, 0.0), |rb| {
            let iso = rb.position();
            (from_rapier(&iso.translation.vector), iso.rotation.angle())
        })
    }

    /// Whether the body rests on another collider below it.
    ///
    /// A contact counts when its points are touching and the normal leaving
    /// the body points downward within `min_cos` of straight down.
    pub fn is_grounded(&self, body: &PhysicsBody, min_cos: f32) -> bool {
        let own = body.collider_handle;
        self.narrow_phase.contact_pairs_with(own).any(|pair| {
            if !pair.has_any_active_contact {
                return false;
            }
            // Manifold normals point from collider1 toward collider2.
            let sign = if pair.collider1 == own { 1.0 } else { -1.0 };
            pair.manifolds.iter().any(|manifold| {
                manifold.data.normal.y * sign >= min_cos
                    && manifold
                        .points
                        .iter()
                        .any(|p| p.dist <= GROUND_CONTACT_SLOP)
            })
        })
    }
}
