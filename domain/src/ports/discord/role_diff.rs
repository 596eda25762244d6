use domain_shared::discord::RoleId;
use std::collections::BTreeSet;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RoleDiff {
    pub to_assign: BTreeSet<RoleId>,
    pub to_remove: BTreeSet<RoleId>,
}

impl RoleDiff {
    pub fn assign(&mut self, role_id: RoleId) {
        self.to_remove.remove(&role_id);
        self.to_assign.insert(role_id);
    }

    pub fn remove(&mut self, role_id: RoleId) {
        self.to_assign.remove(&role_id);
        self.to_remove.insert(role_id);
    }

    /// The Discord calls needed to apply the diff. Assignments come first, so
    /// a failed assignment leaves the member's other roles untouched.
    pub fn changes(&self) -> Vec<RoleChange> {
        self.to_assign
            .iter()
            .copied()
            .map(RoleChange::Assign)
            .chain(self.to_remove.iter().copied().map(RoleChange::Remove))
            .collect()
    }

    /// Returns the role set a member ends up with once the diff is applied.
    pub fn apply_to(&self, roles: &BTreeSet<RoleId>) -> BTreeSet<RoleId> {
        roles
            .difference(&self.to_remove)
            .chain(self.to_assign.iter())
            .copied()
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleChange {
    Assign(RoleId),
    Remove(RoleId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_overrides_previous_remove() {
        let mut diff = RoleDiff::default();
        diff.remove(RoleId(1));
        diff.assign(RoleId(1));

        assert_eq!(diff.to_assign, BTreeSet::from([RoleId(1)]));
        assert!(diff.to_remove.is_empty());
    }

    #[test]
    fn apply_to_removes_then_assigns() {
        let mut diff = RoleDiff::default();
        diff.remove(RoleId(1));
        diff.assign(RoleId(3));

        let roles = BTreeSet::from([RoleId(1), RoleId(2)]);

        assert_eq!(
            diff.apply_to(&roles),
            BTreeSet::from([RoleId(2), RoleId(3)])
        );
    }

    #[test]
    fn changes_assign_before_removing() {
        let mut diff = RoleDiff::default();
        diff.remove(RoleId(1));
        diff.remove(RoleId(2));
        diff.assign(RoleId(3));

        assert_eq!(
            diff.changes(),
            vec![
                RoleChange::Assign(RoleId(3)),
                RoleChange::Remove(RoleId(1)),
                RoleChange::Remove(RoleId(2)),
            ]
        );
    }
}
