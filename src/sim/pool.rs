//! Fixed-capacity body pool
//!
//! An unordered store with O(1) swap removal. The pool owns every body, runs
//! per-step integration and culling, then dispatches pairwise collisions.

use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::body::Body;
use super::collision::collide;
use crate::error::SimError;

/// How the integration pass treats dead bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CullPolicy {
    /// Scan from slot 0 and stop at the first dead body. Later slots are
    /// neither integrated nor culled that step.
    #[default]
    Compat,
    /// Visit every slot: cull every dead body, integrate every live one
    Sweep,
}

/// What one pool update did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub integrated: usize,
    pub culled: usize,
    pub contacts: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BodyPool {
    bodies: Vec<Body>,
    capacity: usize,
}

impl BodyPool {
    /// Allocate room for `capacity` bodies up front
    pub fn new(capacity: usize) -> Result<Self, SimError> {
        let mut bodies = Vec::new();
        bodies
            .try_reserve_exact(capacity)
            .map_err(|source| SimError::Allocation { capacity, source })?;

        log::debug!("Body pool allocated for {} bodies", capacity);
        Ok(Self { bodies, capacity })
    }

    /// Add a body; returns `false` (dropping the body) when the pool is full
    pub fn insert(&mut self, body: Body) -> bool {
        if self.is_full() {
            log::debug!("Body pool full ({}), spawn rejected", self.capacity);
            return false;
        }
        self.bodies.push(body);
        true
    }

    /// Remove slot `index`, moving the last body into its place
    pub fn remove(&mut self, index: usize) -> Option<Body> {
        if index >= self.bodies.len() {
            return None;
        }
        Some(self.bodies.swap_remove(index))
    }

    /// Advance every body by `dt`, cull the dead and resolve collisions
    pub fn update(&mut self, dt: f32, arena: &Arena, policy: CullPolicy) -> StepReport {
        let (integrated, culled) = match policy {
            CullPolicy::Compat => self.integrate_until_dead(dt, arena),
            CullPolicy::Sweep => self.integrate_all(dt, arena),
        };
        let contacts = self.collide_pairs();

        if culled > 0 || contacts > 0 {
            log::debug!(
                "Pool step: {} integrated, {} culled, {} contacts, {} remaining",
                integrated,
                culled,
                contacts,
                self.bodies.len()
            );
        }
        StepReport {
            integrated,
            culled,
            contacts,
        }
    }

    fn integrate_until_dead(&mut self, dt: f32, arena: &Arena) -> (usize, usize) {
        let mut integrated = 0;
        let mut culled = 0;
        let mut i = 0;

        while i < self.bodies.len() && self.bodies[i].is_alive() {
            self.bodies[i].integrate(dt, arena);
            integrated += 1;

            if self.bodies[i].is_alive() {
                i += 1;
            } else {
                // The swapped-in body now occupies slot i and is checked next
                self.bodies.swap_remove(i);
                culled += 1;
            }
        }

        if i < self.bodies.len() {
            log::trace!("Integration scan stopped at dead body in slot {}", i);
        }
        (integrated, culled)
    }

    fn integrate_all(&mut self, dt: f32, arena: &Arena) -> (usize, usize) {
        let mut integrated = 0;
        let mut culled = 0;
        let mut i = 0;

        while i < self.bodies.len() {
            if !self.bodies[i].is_alive() {
                self.bodies.swap_remove(i);
                culled += 1;
                continue;
            }
            self.bodies[i].integrate(dt, arena);
            integrated += 1;
            i += 1;
        }
        (integrated, culled)
    }

    /// Run collision detection and response over every unordered pair
    fn collide_pairs(&mut self) -> usize {
        let mut contacts = 0;
        for i in 0..self.bodies.len() {
            let (head, tail) = self.bodies.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                if collide(a, b).is_some() {
                    contacts += 1;
                }
            }
        }
        contacts
    }

    /// Visit every occupied slot, dead or alive, in slot order
    pub fn for_each<F: FnMut(&Body)>(&self, visitor: F) {
        self.bodies.iter().for_each(visitor);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Body> {
        self.bodies.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Body> {
        self.bodies.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.bodies.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of bodies with hitpoints left
    pub fn alive_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.is_alive()).count()
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
    }
}

impl<'a> IntoIterator for &'a BodyPool {
    type Item = &'a Body;
    type IntoIter = std::slice::Iter<'a, Body>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}
