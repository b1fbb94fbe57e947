//! Axis-separated collision resolution
//!
//! A body's displacement for the tick is its velocity. The resolver first
//! moves it fully along X, then along Y, each time against:
//! - the static collision map and the level edges, and
//! - every other dynamic body, pushing those the mover is allowed to push.
//!
//! A push recursively resolves the obstacle along the same axis by the
//! mover's penetration. The mover then ends flush against wherever the
//! obstacle came to rest. Bodies already in the push chain are skipped so
//! the recursion always terminates.

use crate::arena::CrateHandle;
use crate::body::{Contacts, RigidBody};
use crate::collision::CollisionMap;
use crate::geometry::{Aabb, Axis, EPSILON};
use bevy_math::Vec2;

/// Upper bound on re-running a pass after a push came up short
const MAX_PASS_ATTEMPTS: usize = 4;

/// Identifies a dynamic body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyId {
    Player,
    Crate(CrateHandle),
}

/// The set of dynamic bodies taking part in resolution
pub trait BodySet {
    /// Every body, in the order candidates are considered on ties
    fn ids(&self) -> Vec<BodyId>;

    fn body(&self, id: BodyId) -> Option<&RigidBody>;

    fn body_mut(&mut self, id: BodyId) -> Option<&mut RigidBody>;

    /// Whether `mover` may displace `obstacle`; otherwise it acts as a wall
    fn can_push(&self, mover: BodyId, obstacle: BodyId) -> bool;
}

/// Resolve one tick of movement for `id`
///
/// Updates position, zeroes velocity on blocked axes and returns the fresh
/// contact flags (also stored on the body).
pub fn resolve<B: BodySet + ?Sized>(
    id: BodyId,
    tiles: &CollisionMap,
    bodies: &mut B,
) -> Contacts {
    let Some(body) = bodies.body_mut(id) else {
        return Contacts::empty();
    };
    body.contacts = Contacts::empty();
    settle_into_bounds(body, tiles);
    let delta = body.velocity;

    let mut chain = vec![id];
    for axis in [Axis::X, Axis::Y] {
        let requested = axis.of(delta);
        let moved = move_along(id, axis, requested, tiles, bodies, &mut chain);
        if (moved - requested).abs() > EPSILON {
            if let Some(body) = bodies.body_mut(id) {
                *axis.of_mut(&mut body.velocity) = 0.0;
            }
        }
    }

    bodies
        .body(id)
        .map(|body| body.contacts)
        .unwrap_or_else(Contacts::empty)
}

/// Clamp a body into the level and move it out of any solid cells it starts in
///
/// The body goes to the nearest position that overlaps no solid cell. Such a
/// position is flush with cell edges or level edges on every axis it had to
/// move along, so only those offsets are searched. A body with nowhere to go
/// stays where it was clamped. Bodies larger than the level are pinned to the
/// origin on the oversized axis.
pub fn settle_into_bounds(body: &mut RigidBody, tiles: &CollisionMap) {
    clamp_to_bounds(body, tiles.bounds());
    if !tiles.overlaps_solid(&body.aabb()) {
        return;
    }

    let max = (tiles.bounds() - body.size).max(Vec2::ZERO);
    let origin = body.position;
    let xs = flush_offsets(origin.x, body.size.x, max.x, tiles.tile_size());
    let ys = flush_offsets(origin.y, body.size.y, max.y, tiles.tile_size());

    let mut best: Option<(f32, Vec2)> = None;
    for &x in &xs {
        let dx = (x - origin.x).powi(2);
        if best.is_some_and(|(distance, _)| dx >= distance) {
            break;
        }
        for &y in &ys {
            let distance = dx + (y - origin.y).powi(2);
            if best.is_some_and(|(nearest, _)| distance >= nearest) {
                break;
            }
            let candidate = Vec2::new(x, y);
            if !tiles.overlaps_solid(&Aabb::from_position_size(candidate, body.size)) {
                best = Some((distance, candidate));
            }
        }
    }

    if let Some((_, position)) = best {
        body.position = position;
    }
}

/// Offsets along one axis where a body of `extent` is flush with a grid line
/// or a level edge, nearest to `current` first
fn flush_offsets(current: f32, extent: f32, max: f32, tile_size: f32) -> Vec<f32> {
    let lines = ((max + extent) / tile_size).ceil().max(0.0) as i32;
    let mut offsets = vec![current, 0.0, max];
    for line in 0..=lines {
        let edge = line as f32 * tile_size;
        offsets.push(edge);
        offsets.push(edge - extent);
    }
    offsets.retain(|offset| (0.0..=max).contains(offset));
    offsets.sort_by(|a, b| (a - current).abs().total_cmp(&(b - current).abs()));
    offsets.dedup();
    offsets
}

fn clamp_to_bounds(body: &mut RigidBody, bounds: Vec2) {
    let max = (bounds - body.size).max(Vec2::ZERO);
    body.position = body.position.clamp(Vec2::ZERO, max);
}

/// Move `id` along `axis` by up to `amount`, pushing what it may push
///
/// Returns the displacement actually applied. A pass whose pushes came up
/// short is rolled back and replayed with the reduced travel, so bodies
/// pushed side by side never end up further along than the mover.
fn move_along<B: BodySet + ?Sized>(
    id: BodyId,
    axis: Axis,
    amount: f32,
    tiles: &CollisionMap,
    bodies: &mut B,
    chain: &mut Vec<BodyId>,
) -> f32 {
    if amount == 0.0 {
        return 0.0;
    }
    let Some(start) = bodies.body(id).map(RigidBody::aabb) else {
        return 0.0;
    };

    let sign = amount.signum();
    let mut travel = tiles.sweep(&start, axis, amount).abs();
    let mut blocked = travel < amount.abs() - EPSILON;

    let candidates = candidates_ahead(id, &start, axis, sign, travel, bodies, chain);
    if !candidates.is_empty() {
        for attempt in 0..MAX_PASS_ATTEMPTS {
            let snapshot = snapshot(bodies);
            let reached = push_through(id, &candidates, axis, sign, travel, tiles, bodies, chain);
            if reached >= travel - EPSILON || attempt + 1 == MAX_PASS_ATTEMPTS {
                blocked |= reached < travel - EPSILON;
                travel = reached;
                break;
            }
            restore(bodies, &snapshot);
            travel = reached;
            blocked = true;
        }
    }

    let moved = sign * travel;
    if let Some(body) = bodies.body_mut(id) {
        *axis.of_mut(&mut body.position) += moved;
        if blocked {
            body.contacts |= Contacts::blocked(axis, sign);
        }
    }
    moved
}

/// Bodies ahead of `start` along `axis` within `travel`, nearest first
///
/// Equal distances keep the enumeration order of [`BodySet::ids`].
fn candidates_ahead<B: BodySet + ?Sized>(
    id: BodyId,
    start: &Aabb,
    axis: Axis,
    sign: f32,
    travel: f32,
    bodies: &B,
    chain: &[BodyId],
) -> Vec<BodyId> {
    let mut found: Vec<(BodyId, f32)> = bodies
        .ids()
        .into_iter()
        .filter(|other| *other != id && !chain.contains(other))
        .filter_map(|other| {
            let aabb = bodies.body(other)?.aabb();
            if !start.spans_overlap(&aabb, axis.other()) {
                return None;
            }
            let gap = gap_along(start, &aabb, axis, sign)?;
            (gap < travel).then_some((other, gap))
        })
        .collect();
    found.sort_by(|a, b| a.1.total_cmp(&b.1));
    found.into_iter().map(|(other, _)| other).collect()
}

/// Free distance from `mover` to `obstacle` in direction `sign`, or `None`
/// when the obstacle is not ahead
fn gap_along(mover: &Aabb, obstacle: &Aabb, axis: Axis, sign: f32) -> Option<f32> {
    let gap = if sign > 0.0 {
        obstacle.min(axis) - mover.max(axis)
    } else {
        mover.min(axis) - obstacle.max(axis)
    };
    (gap >= -EPSILON).then_some(gap.max(0.0))
}

/// Walk the candidates, pushing each one the mover reaches; returns how far
/// the mover can travel
#[allow(clippy::too_many_arguments)]
fn push_through<B: BodySet + ?Sized>(
    id: BodyId,
    candidates: &[BodyId],
    axis: Axis,
    sign: f32,
    mut travel: f32,
    tiles: &CollisionMap,
    bodies: &mut B,
    chain: &mut Vec<BodyId>,
) -> f32 {
    let Some(start) = bodies.body(id).map(RigidBody::aabb) else {
        return 0.0;
    };

    for &other in candidates {
        let Some(gap) = bodies
            .body(other)
            .and_then(|body| gap_along(&start, &body.aabb(), axis, sign))
        else {
            continue;
        };
        if gap >= travel {
            continue;
        }

        let penetration = travel - gap;
        let pushed = if bodies.can_push(id, other) {
            chain.push(other);
            let moved = move_along(other, axis, sign * penetration, tiles, bodies, chain);
            chain.pop();
            moved.abs()
        } else {
            0.0
        };

        travel = travel.min(gap + pushed);
    }
    travel
}

type Snapshot = Vec<(BodyId, RigidBody)>;

fn snapshot<B: BodySet + ?Sized>(bodies: &B) -> Snapshot {
    bodies
        .ids()
        .into_iter()
        .filter_map(|id| bodies.body(id).map(|body| (id, *body)))
        .collect()
}

fn restore<B: BodySet + ?Sized>(bodies: &mut B, snapshot: &Snapshot) {
    for (id, saved) in snapshot {
        if let Some(body) = bodies.body_mut(*id) {
            *body = *saved;
        }
    }
}
