use crate::state::{Combatant, CombatantId, Side};

/// Every combatant in one battle, in formation order.
///
/// Formation order matters: grenade splash hits the neighbours of the primary
/// target within its own side's ordering.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    combatants: Vec<Combatant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a combatant. Returns it back if the id is already taken.
    pub fn push(&mut self, combatant: Combatant) -> Result<(), Combatant> {
        if self.index_of(&combatant.id).is_some() {
            return Err(combatant);
        }
        self.combatants.push(combatant);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }

    pub fn index_of(&self, id: &CombatantId) -> Option<usize> {
        self.combatants.iter().position(|c| &c.id == id)
    }

    pub fn get(&self, id: &CombatantId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| &c.id == id)
    }

    pub fn get_mut(&mut self, id: &CombatantId) -> Option<&mut Combatant> {
        self.combatants.iter_mut().find(|c| &c.id == id)
    }

    pub fn at(&self, index: usize) -> Option<&Combatant> {
        self.combatants.get(index)
    }

    pub fn at_mut(&mut self, index: usize) -> Option<&mut Combatant> {
        self.combatants.get_mut(index)
    }

    /// Borrows two distinct combatants mutably at once.
    ///
    /// Returns `None` if the indices are equal or out of bounds.
    pub fn pair_mut(&mut self, a: usize, b: usize) -> Option<(&mut Combatant, &mut Combatant)> {
        if a == b || a >= self.combatants.len() || b >= self.combatants.len() {
            return None;
        }
        if a < b {
            let (left, right) = self.combatants.split_at_mut(b);
            Some((&mut left[a], &mut right[0]))
        } else {
            let (left, right) = self.combatants.split_at_mut(a);
            Some((&mut right[0], &mut left[b]))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Combatant> {
        self.combatants.iter_mut()
    }

    pub fn side(&self, side: Side) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter().filter(move |c| c.side == side)
    }

    /// True when `side` has at least one member and every member is down.
    pub fn is_wiped(&self, side: Side) -> bool {
        let mut members = self.side(side).peekable();
        members.peek().is_some() && members.all(|c| !c.is_alive())
    }

    /// Indices of the living members of `side`, in formation order.
    pub fn living_indices(&self, side: Side) -> Vec<usize> {
        self.combatants
            .iter()
            .enumerate()
            .filter(|(_, c)| c.side == side && c.is_alive())
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        let mut roster = Roster::new();
        roster.push(Combatant::new("p1", "A", Side::Player)).unwrap();
        roster.push(Combatant::new("e1", "B", Side::Enemy)).unwrap();
        roster.push(Combatant::new("e2", "C", Side::Enemy)).unwrap();
        roster
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut roster = roster();
        assert!(roster.push(Combatant::new("e1", "Dup", Side::Enemy)).is_err());
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn pair_mut_returns_requested_order() {
        let mut roster = roster();
        let (a, b) = roster.pair_mut(2, 0).unwrap();
        assert_eq!(a.id.as_str(), "e2");
        assert_eq!(b.id.as_str(), "p1");
        assert!(roster.pair_mut(1, 1).is_none());
    }

    #[test]
    fn wiped_requires_members() {
        let mut roster = roster();
        assert!(!roster.is_wiped(Side::Enemy));
        for c in roster.iter_mut().filter(|c| c.side == Side::Enemy) {
            c.hp = 0;
        }
        assert!(roster.is_wiped(Side::Enemy));
        assert!(!Roster::new().is_wiped(Side::Player));
    }
}
