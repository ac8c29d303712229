//! Body registry and per-frame orchestration
//!
//! One `World` owns every body in the playfield plus the velocity store
//! and modifier sets, and exposes the whole external surface: spawn,
//! destroy, modifiers, impulses, radius animation, snapshot accessors
//! and `step_frame`. Bodies are kept in ascending-id order; ids are
//! allocated monotonically and never reused, so iteration order is
//! stable for the life of the world.

use glam::Vec2;

use super::body::{Body, BodyId, BodyKind, Modifier};
use super::boundary::{Playfield, apply_bounds};
use super::integrate::integrate;
use super::modifier::ModifierSet;
use super::solver::{ContactPair, solve};
use super::velocity::VelocityStore;
use crate::consts::DOT_RADIUS;
use crate::tuning::Tuning;

/// What one `step_frame` observed
#[derive(Debug, Clone, Default)]
pub struct StepReport {
    /// Every pair that overlapped this frame, ascending and deduplicated
    pub contacts: Vec<ContactPair>,
    /// Bodies whose radius collapsed onto the floor; candidates for
    /// destruction, reported every frame until the caller removes them
    pub defunct: Vec<BodyId>,
}

impl StepReport {
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty() && self.defunct.is_empty()
    }

    /// Iterate the partners `id` touched this frame
    pub fn touching(&self, id: BodyId) -> impl Iterator<Item = BodyId> + '_ {
        self.contacts.iter().filter_map(move |p| p.partner_of(id))
    }
}

/// The playfield and everything in it
#[derive(Debug, Clone)]
pub struct World {
    /// All bodies, ascending by id
    bodies: Vec<Body>,
    velocities: VelocityStore,
    modifiers: ModifierSet,
    playfield: Playfield,
    tuning: Tuning,
    /// Next id to hand out
    next_id: BodyId,
    /// Completed fixed steps since creation
    frame: u64,
}

impl World {
    pub fn new(playfield: Playfield, tuning: Tuning) -> Self {
        Self {
            bodies: Vec::new(),
            velocities: VelocityStore::new(),
            modifiers: ModifierSet::new(),
            playfield,
            tuning: tuning.sanitized(),
            next_id: 1,
            frame: 0,
        }
    }

    fn index_of(&self, id: BodyId) -> Option<usize> {
        self.bodies.binary_search_by_key(&id, |b| b.id).ok()
    }

    fn sanitize_pos(&self, pos: Vec2) -> Vec2 {
        if pos.is_finite() {
            pos
        } else {
            log::warn!("non-finite spawn position replaced with field center");
            self.playfield.center()
        }
    }

    fn sanitize_radius(&self, radius: f32) -> f32 {
        if radius.is_finite() && radius > 0.0 {
            radius.max(self.tuning.min_radius)
        } else {
            log::warn!("invalid spawn radius {radius} replaced with default");
            DOT_RADIUS
        }
    }

    /// Spawn a stationary body, returning its id
    pub fn spawn(&mut self, kind: BodyKind, pos: Vec2, radius: f32) -> BodyId {
        self.spawn_with_velocity(kind, pos, radius, Vec2::ZERO)
    }

    /// Spawn a body with an initial velocity
    ///
    /// Position and radius are sanitized on the way in. Static kinds
    /// ignore the velocity and never get a store entry.
    pub fn spawn_with_velocity(
        &mut self,
        kind: BodyKind,
        pos: Vec2,
        radius: f32,
        vel: Vec2,
    ) -> BodyId {
        let pos = self.sanitize_pos(pos);
        let radius = self.sanitize_radius(radius);
        let id = self.next_id;
        self.next_id += 1;
        self.bodies.push(Body::new(id, kind, pos, radius));
        if kind.is_movable() {
            let vel = if vel.is_finite() { vel } else { Vec2::ZERO };
            self.velocities.set(id, vel);
        }
        id
    }

    /// Remove a body and every trace of it; `false` if `id` is unknown
    pub fn destroy(&mut self, id: BodyId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                self.bodies.remove(index);
                self.velocities.remove(id);
                self.modifiers.clear_body(id);
                true
            }
            None => false,
        }
    }

    /// Flip one modifier flag; unknown ids are a no-op
    pub fn set_modifier(&mut self, id: BodyId, modifier: Modifier, enabled: bool) {
        if self.index_of(id).is_some() {
            self.modifiers.set(id, modifier, enabled);
        }
    }

    pub fn has_modifier(&self, id: BodyId, modifier: Modifier) -> bool {
        self.modifiers.has(id, modifier)
    }

    /// Add `delta` to a body's velocity (a throw or drag release)
    ///
    /// Scaled up for `Boosted` bodies. Frozen and static bodies, unknown
    /// ids and non-finite deltas are all no-ops.
    pub fn apply_impulse(&mut self, id: BodyId, delta: Vec2) {
        if !delta.is_finite() {
            log::warn!("body {id}: non-finite impulse dropped");
            return;
        }
        let Some(index) = self.index_of(id) else {
            return;
        };
        if !self.bodies[index].kind.is_movable() || self.modifiers.has(id, Modifier::Frozen) {
            return;
        }
        let scale = if self.modifiers.has(id, Modifier::Boosted) {
            self.tuning.boost_factor
        } else {
            1.0
        };
        self.velocities.set(id, self.velocities.get(id) + delta * scale);
    }

    /// Start easing a body's radius toward `target`
    ///
    /// A target at or below the radius floor shrinks the body out; it
    /// will be reported defunct once the animation lands.
    pub fn set_radius_target(&mut self, id: BodyId, target: f32) {
        if !target.is_finite() {
            log::warn!("body {id}: non-finite radius target dropped");
            return;
        }
        if let Some(index) = self.index_of(id) {
            self.bodies[index].target_radius = target.max(0.0);
        }
    }

    /// Advance the world by one time slice
    ///
    /// Integrator, then the solver passes, then the boundary clamp. The
    /// report carries this frame's contact pairs and defunct bodies.
    pub fn step_frame(&mut self, dt: f32) -> StepReport {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            log::warn!("invalid dt {dt} treated as zero");
            0.0
        };

        let mut defunct = Vec::new();
        integrate(
            &mut self.bodies,
            &mut self.velocities,
            &self.modifiers,
            &self.tuning,
            dt,
            &mut defunct,
        );
        let contacts = solve(
            &mut self.bodies,
            &mut self.velocities,
            &self.modifiers,
            &self.tuning,
        );
        apply_bounds(
            &mut self.bodies,
            &mut self.velocities,
            &self.modifiers,
            self.playfield,
        );

        self.frame += 1;
        StepReport { contacts, defunct }
    }

    // Snapshot accessors

    pub fn contains(&self, id: BodyId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.index_of(id).map(|i| &self.bodies[i])
    }

    pub fn position(&self, id: BodyId) -> Option<Vec2> {
        self.body(id).map(|b| b.pos)
    }

    pub fn radius(&self, id: BodyId) -> Option<f32> {
        self.body(id).map(|b| b.radius)
    }

    pub fn kind_of(&self, id: BodyId) -> Option<BodyKind> {
        self.body(id).map(|b| b.kind)
    }

    /// Current velocity; zero for static, stationary or unknown bodies
    pub fn velocity(&self, id: BodyId) -> Vec2 {
        self.velocities.get(id)
    }

    /// All bodies in ascending-id order
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Filtered view over one kind, in ascending-id order
    pub fn bodies_of_kind(&self, kind: BodyKind) -> impl Iterator<Item = &Body> + '_ {
        self.bodies.iter().filter(move |b| b.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn playfield(&self) -> Playfield {
        self.playfield
    }

    /// Resize the playfield; takes effect at the next boundary pass
    pub fn set_playfield(&mut self, field: Playfield) {
        self.playfield = field;
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn set_tuning(&mut self, tuning: Tuning) {
        self.tuning = tuning.sanitized();
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Reinsert a body captured from another world, keeping its id
    ///
    /// Callers must insert in ascending-id order. The id allocator
    /// resumes above the highest restored id.
    pub(crate) fn insert_restored(&mut self, body: Body, vel: Vec2, modifiers: &[Modifier]) {
        debug_assert!(
            self.bodies.last().is_none_or(|last| last.id < body.id),
            "restored bodies must arrive in ascending-id order"
        );
        let mut body = body;
        body.pos = self.sanitize_pos(body.pos);
        body.radius = self.sanitize_radius(body.radius);
        if !body.target_radius.is_finite() {
            body.target_radius = body.radius;
        }
        self.next_id = self.next_id.max(body.id + 1);
        if body.kind.is_movable() {
            let vel = if vel.is_finite() { vel } else { Vec2::ZERO };
            self.velocities.set(body.id, vel);
        }
        for modifier in modifiers {
            self.modifiers.set(body.id, *modifier, true);
        }
        self.bodies.push(body);
    }

    /// Modifiers currently set on `id`, for scene capture
    pub fn modifiers_of(&self, id: BodyId) -> Vec<Modifier> {
        [Modifier::NoFriction, Modifier::Boosted, Modifier::Frozen]
            .into_iter()
            .filter(|m| self.modifiers.has(id, *m))
            .collect()
    }
}
