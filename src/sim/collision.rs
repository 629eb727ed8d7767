//! Collision detection and impulse response between polygon bodies
//!
//! Detection is a circle broad-phase followed by a vertex-on-edge search that
//! yields at most one contact per pair. Response is a single perfectly elastic
//! impulse along the contact axis that changes linear velocity only.

use glam::Vec2;

use super::body::Body;
use super::geometry::{dot, perp, point_on_segment};
use crate::consts::EPSILON;

/// A touching feature between two bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit edge normal, oriented from the first body toward the second
    pub axis: Vec2,
    /// World-space corner that landed on the edge
    pub point: Vec2,
}

/// Circle test on the circumscribing radii
pub fn broad_phase_overlap(a: &Body, b: &Body) -> bool {
    let distance = a.centre.distance(b.centre);
    distance <= (a.radius() + b.radius()) * (1.0 + EPSILON)
}

/// Find a corner of one body lying on an edge of the other
///
/// Edges of `a` are searched against corners of `b` first, then the roles
/// are swapped. The axis is always oriented from `a` toward `b`.
pub fn find_contact(a: &Body, b: &Body) -> Option<Contact> {
    let towards_b = b.centre - a.centre;
    corner_on_edge(a, b, towards_b).or_else(|| corner_on_edge(b, a, towards_b))
}

fn corner_on_edge(edges_of: &Body, corners_of: &Body, towards_b: Vec2) -> Option<Contact> {
    for i in 0..edges_of.corner_count() {
        let v0 = edges_of.vertex(i);
        let v1 = edges_of.vertex(i + 1);

        for j in 0..corners_of.corner_count() {
            let point = corners_of.vertex(j);
            if !point_on_segment(point, v0, v1) {
                continue;
            }

            let mut axis = perp(v0 - v1).normalize_or_zero();
            if dot(axis, towards_b) < 0.0 {
                axis = -axis;
            }
            return Some(Contact { axis, point });
        }
    }
    None
}

/// Apply the elastic impulse for a contact between `a` and `b`
///
/// Returns `false` (and changes nothing) when the bodies are not approaching
/// each other along the axis. Spin is left alone: the rotational terms only
/// damp the impulse magnitude.
pub fn resolve_contact(a: &mut Body, b: &mut Body, contact: &Contact) -> bool {
    let n = contact.axis;

    let t1 = perp(contact.point - a.centre);
    let t2 = perp(contact.point - b.centre);

    // Velocity of `a` relative to `b` at the contact point
    let approach = a.velocity_at(contact.point) - b.velocity_at(contact.point);
    let closing_speed = dot(n, approach);
    if closing_speed <= 0.0 {
        return false;
    }

    let t1_n = dot(t1, n);
    let t2_n = dot(t2, n);
    let denominator = dot(n, n) * (a.inverse_mass() + b.inverse_mass())
        + a.inverse_moment_of_inertia() * t1_n * t1_n
        + b.inverse_moment_of_inertia() * t2_n * t2_n;
    let j = if denominator.abs() <= f32::EPSILON {
        0.0
    } else {
        -2.0 * closing_speed / denominator
    };

    a.velocity += n * (j * a.inverse_mass());
    b.velocity -= n * (j * b.inverse_mass());

    a.collision = true;
    b.collision = true;
    true
}

/// Detect and resolve a collision between two bodies
///
/// Returns the contact when an impulse was applied.
pub fn collide(a: &mut Body, b: &mut Body) -> Option<Contact> {
    if !broad_phase_overlap(a, b) {
        return None;
    }
    let contact = find_contact(a, b)?;
    resolve_contact(a, b, &contact).then_some(contact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::SizeClass;
    use crate::sim::fixtures::{arrow_left, arrow_right, square};
    use proptest::prelude::*;

    fn closing_speed(a: &Body, b: &Body, contact: &Contact) -> f32 {
        dot(contact.axis, a.velocity_at(contact.point) - b.velocity_at(contact.point))
    }

    #[test]
    fn test_find_contact_corner_on_edge() {
        let a = arrow_right(Vec2::new(100.0, 100.0));
        let b = arrow_left(Vec2::new(108.0, 100.0));

        let contact = find_contact(&a, &b).expect("tip of b sits on the flat edge of a");
        assert!((contact.point - Vec2::new(96.0, 100.0)).length() < 1e-3);
        assert!((contact.axis - Vec2::X).length() < 1e-4);
    }

    #[test]
    fn test_find_contact_reversed_roles() {
        // Only a corner of `a` touches an edge of `b`
        let a = arrow_left(Vec2::new(100.0, 100.0));
        let b = square(SizeClass::Medium, Vec2::new(80.0, 100.0), 8.0);

        let contact = find_contact(&a, &b).expect("tip of a sits on the right edge of b");
        assert!((contact.point - Vec2::new(88.0, 100.0)).length() < 1e-3);
        // Oriented from a toward b
        assert!((contact.axis - Vec2::NEG_X).length() < 1e-4);
    }

    #[test]
    fn test_no_contact_when_overlap_is_deep() {
        // Concentric squares: no corner lies on any edge
        let a = square(SizeClass::Medium, Vec2::new(50.0, 50.0), 10.0);
        let b = square(SizeClass::Medium, Vec2::new(50.0, 50.0), 5.0);
        assert!(find_contact(&a, &b).is_none());
    }

    #[test]
    fn test_broad_phase_rejects_distant_bodies() {
        let mut a = arrow_right(Vec2::new(100.0, 100.0));
        let mut b = arrow_left(Vec2::new(125.0, 100.0));
        a.velocity = Vec2::new(10.0, 0.0);
        b.velocity = Vec2::new(-10.0, 0.0);

        assert!(!broad_phase_overlap(&a, &b));
        assert!(collide(&mut a, &mut b).is_none());
        assert_eq!(a.velocity, Vec2::new(10.0, 0.0));
        assert_eq!(b.velocity, Vec2::new(-10.0, 0.0));
        assert!(!a.collision && !b.collision);
    }

    #[test]
    fn test_head_on_collision_reverses_closing_velocity() {
        let mut a = arrow_right(Vec2::new(100.0, 100.0));
        let mut b = arrow_left(Vec2::new(108.0, 100.0));
        a.velocity = Vec2::new(10.0, 0.0);
        b.velocity = Vec2::new(-10.0, 0.0);

        let contact = collide(&mut a, &mut b).expect("bodies approach along the axis");

        assert!(a.collision && b.collision);
        assert!(a.velocity.x < 0.0);
        assert!(b.velocity.x > 0.0);
        // Perfectly elastic: the closing speed flips sign
        assert!((closing_speed(&a, &b, &contact) + 20.0).abs() < 1e-3);
        // Momentum is conserved
        let momentum_before = a.mass() * 10.0 - b.mass() * 10.0;
        let momentum_after = a.mass() * a.velocity.x + b.mass() * b.velocity.x;
        assert!((momentum_after - momentum_before).abs() < 1e-2);
    }

    #[test]
    fn test_separating_bodies_are_left_alone() {
        let mut a = arrow_right(Vec2::new(100.0, 100.0));
        let mut b = arrow_left(Vec2::new(108.0, 100.0));
        a.velocity = Vec2::new(-10.0, 0.0);
        b.velocity = Vec2::new(10.0, 0.0);

        assert!(collide(&mut a, &mut b).is_none());
        assert_eq!(a.velocity, Vec2::new(-10.0, 0.0));
        assert_eq!(b.velocity, Vec2::new(10.0, 0.0));
        assert!(!a.collision && !b.collision);
    }

    #[test]
    fn test_spin_is_not_changed_by_impulse() {
        let mut a = arrow_right(Vec2::new(100.0, 100.0));
        let mut b = arrow_left(Vec2::new(108.0, 100.0));
        a.velocity = Vec2::new(10.0, 0.0);
        a.spin = 0.5;

        assert!(collide(&mut a, &mut b).is_some());
        assert_eq!(a.spin, 0.5);
        assert_eq!(b.spin, 0.0);
    }

    #[test]
    fn test_massless_bodies_get_no_impulse() {
        let mut a = Body::default();
        let mut b = Body::default();
        a.velocity = Vec2::new(5.0, 0.0);
        let contact = Contact {
            axis: Vec2::X,
            point: Vec2::ZERO,
        };

        assert!(resolve_contact(&mut a, &mut b, &contact));
        assert_eq!(a.velocity, Vec2::new(5.0, 0.0));
        assert!(a.velocity.is_finite() && b.velocity.is_finite());
    }

    proptest! {
        #[test]
        fn prop_head_on_impulse_stops_approach(
            va in -40.0f32..40.0,
            vb in -40.0f32..40.0,
            vy in -20.0f32..20.0,
        ) {
            let mut a = arrow_right(Vec2::new(100.0, 100.0));
            let mut b = arrow_left(Vec2::new(108.0, 100.0));
            a.velocity = Vec2::new(va, vy);
            b.velocity = Vec2::new(vb, -vy);
            let contact = find_contact(&a, &b).unwrap();

            let before = closing_speed(&a, &b, &contact);
            let resolved = resolve_contact(&mut a, &mut b, &contact);
            let after = closing_speed(&a, &b, &contact);

            prop_assert_eq!(resolved, before > 0.0);
            prop_assert!(after <= 1e-3);
        }

        #[test]
        fn prop_off_axis_impulse_never_speeds_up_approach(
            lever in -8.0f32..8.0,
            va in 0.5f32..40.0,
            spin in -1.0f32..1.0,
        ) {
            let mut a = square(SizeClass::Medium, Vec2::new(100.0, 100.0), 10.0);
            let mut b = square(SizeClass::Medium, Vec2::new(120.0, 100.0), 10.0);
            a.velocity = Vec2::new(va, 0.0);
            a.spin = spin;
            let contact = Contact { axis: Vec2::X, point: Vec2::new(110.0, 100.0 + lever) };

            let before = closing_speed(&a, &b, &contact);
            if resolve_contact(&mut a, &mut b, &contact) {
                let after = closing_speed(&a, &b, &contact);
                prop_assert!(after <= before);
                prop_assert!(after >= -before - 1e-3);
            }
        }
    }
}
