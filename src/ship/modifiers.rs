//! LIFO modifier stack.
//!
//! Only the most recently added modifier applies. Older entries stay dormant
//! until everything above them is removed; they are never combined.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Adjusts a pilot skill read.
pub trait PilotSkillModifier {
    /// Modify `pilot_skill` in place.
    fn modify_pilot_skill(&self, pilot_skill: &mut i32);
}

impl<F: Fn(&mut i32)> PilotSkillModifier for F {
    fn modify_pilot_skill(&self, pilot_skill: &mut i32) {
        self(pilot_skill);
    }
}

/// Shared pilot skill modifier.
pub type SharedModifier = Rc<dyn PilotSkillModifier>;

/// Identifier of one entry on a modifier stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModifierId(pub u64);

/// Ordered modifiers where only the front is authoritative.
#[derive(Clone, Debug)]
pub struct ModifierStack<M> {
    /// Oldest first; the front is the last element.
    entries: Vec<(ModifierId, M)>,
    next_id: u64,
}

impl<M> Default for ModifierStack<M> {
    fn default() -> Self {
        Self { entries: Vec::new(), next_id: 0 }
    }
}

impl<M> ModifierStack<M> {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `modifier` in front. It becomes the one that applies.
    pub fn push(&mut self, modifier: M) -> ModifierId {
        let id = ModifierId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, modifier));
        id
    }

    /// Remove a modifier wherever it is in the stack.
    pub fn remove(&mut self, id: ModifierId) -> Option<M> {
        let pos = self.entries.iter().position(|(e, _)| *e == id)?;
        Some(self.entries.remove(pos).1)
    }

    /// The authoritative modifier, if any.
    #[must_use]
    pub fn front(&self) -> Option<&M> {
        self.entries.last().map(|(_, m)| m)
    }

    /// Id of the authoritative modifier, if any.
    #[must_use]
    pub fn front_id(&self) -> Option<ModifierId> {
        self.entries.last().map(|(id, _)| *id)
    }

    /// Number of modifiers, dormant ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the stack empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<M: PilotSkillModifier + ?Sized> ModifierStack<Rc<M>> {
    /// Apply the front modifier (only) to `raw`.
    #[must_use]
    pub fn apply(&self, raw: i32) -> i32 {
        let mut value = raw;
        if let Some(front) = self.front() {
            front.modify_pilot_skill(&mut value);
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_to(n: i32) -> SharedModifier {
        Rc::new(move |ps: &mut i32| *ps = n)
    }

    #[test]
    fn test_front_is_most_recent() {
        let mut stack: ModifierStack<SharedModifier> = ModifierStack::new();
        assert_eq!(stack.apply(4), 4);

        stack.push(set_to(1));
        stack.push(set_to(2));
        let m3 = stack.push(set_to(3));
        assert_eq!(stack.apply(4), 3);
        assert_eq!(stack.front_id(), Some(m3));
    }

    #[test]
    fn test_lifo_precedence_not_cumulative() {
        let mut stack: ModifierStack<SharedModifier> = ModifierStack::new();
        stack.push(Rc::new(|ps: &mut i32| *ps += 1));
        stack.push(Rc::new(|ps: &mut i32| *ps += 2));

        // +2 only, not +3.
        assert_eq!(stack.apply(4), 6);
    }

    #[test]
    fn test_remove_middle_keeps_front() {
        let mut stack: ModifierStack<SharedModifier> = ModifierStack::new();
        stack.push(set_to(1));
        let m2 = stack.push(set_to(2));
        let m3 = stack.push(set_to(3));

        assert!(stack.remove(m2).is_some());
        assert_eq!(stack.apply(0), 3);

        assert!(stack.remove(m3).is_some());
        assert_eq!(stack.apply(0), 1);

        assert!(stack.remove(m3).is_none());
        assert_eq!(stack.len(), 1);
    }
}
