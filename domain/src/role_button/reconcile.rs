use crate::ports::discord::RoleDiff;
use domain_shared::discord::RoleId;
use std::collections::BTreeSet;
use tracing::instrument;

/// Computes the role changes caused by clicking the button of `clicked`.
///
/// A held role is toggled off. Otherwise the role is added and every other
/// held member of `exclusive_group` is evicted. Callers pass an empty
/// `exclusive_group` when `clicked` is not exclusive.
#[instrument(level = "trace")]
pub fn reconcile(
    current: &BTreeSet<RoleId>,
    clicked: RoleId,
    exclusive_group: &BTreeSet<RoleId>,
) -> RoleDiff {
    let mut diff = RoleDiff::default();

    if current.contains(&clicked) {
        diff.remove(clicked);
        return diff;
    }

    for role_id in current.intersection(exclusive_group) {
        diff.remove(*role_id);
    }
    diff.assign(clicked);

    diff
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: RoleId = RoleId(1);
    const B: RoleId = RoleId(2);
    const C: RoleId = RoleId(3);
    const D: RoleId = RoleId(4);
    const UNIVERSE: [RoleId; 4] = [A, B, C, D];

    fn set(roles: &[RoleId]) -> BTreeSet<RoleId> {
        roles.iter().copied().collect()
    }

    fn subsets() -> Vec<BTreeSet<RoleId>> {
        (0..1u32 << UNIVERSE.len())
            .map(|mask| {
                UNIVERSE
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, role)| *role)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn click_on_exclusive_role_evicts_held_group_member() {
        let diff = reconcile(&set(&[A, B]), C, &set(&[A, C]));

        assert_eq!(diff.to_assign, set(&[C]));
        assert_eq!(diff.to_remove, set(&[A]));
        assert_eq!(diff.apply_to(&set(&[A, B])), set(&[B, C]));
    }

    #[test]
    fn click_on_held_role_toggles_it_off() {
        let diff = reconcile(&set(&[A]), A, &BTreeSet::new());

        assert!(diff.to_assign.is_empty());
        assert_eq!(diff.to_remove, set(&[A]));
    }

    #[test]
    fn click_on_non_exclusive_role_only_adds() {
        let diff = reconcile(&set(&[A, B]), D, &BTreeSet::new());

        assert_eq!(diff.to_assign, set(&[D]));
        assert!(diff.to_remove.is_empty());
    }

    #[test]
    fn held_role_is_only_ever_removed() {
        for current in subsets() {
            for group in subsets() {
                for clicked in current.iter().copied() {
                    let diff = reconcile(&current, clicked, &group);

                    assert!(diff.to_assign.is_empty());
                    assert_eq!(diff.to_remove, set(&[clicked]));
                }
            }
        }
    }

    #[test]
    fn unheld_role_is_added_and_group_is_left_with_at_most_clicked() {
        for current in subsets() {
            for group in subsets() {
                for clicked in UNIVERSE.iter().copied() {
                    if current.contains(&clicked) {
                        continue;
                    }

                    let diff = reconcile(&current, clicked, &group);
                    let expected_removed: BTreeSet<RoleId> =
                        current.intersection(&group).copied().collect();

                    assert_eq!(diff.to_assign, set(&[clicked]));
                    assert_eq!(diff.to_remove, expected_removed);

                    let after = diff.apply_to(&current);
                    assert!(after.intersection(&group).all(|role| *role == clicked));
                }
            }
        }
    }

    #[test]
    fn repeated_clicks_toggle_membership() {
        let group = set(&[A, B]);
        let mut roles = set(&[C]);

        for expected_held in [true, false, true] {
            roles = reconcile(&roles, A, &group).apply_to(&roles);
            assert_eq!(roles.contains(&A), expected_held);
            assert!(roles.contains(&C));
        }
    }
}
