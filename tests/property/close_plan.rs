//! Property-based tests for the close-plan invariants

use proptest::prelude::*;
use tabclear::census::TabCensus;
use tabclear::host::{TabId, TabSnapshot};
use tabclear::options::ClosePolicy;
use tabclear::policy::plan_close;

fn arb_policy() -> impl Strategy<Value = ClosePolicy> {
    prop_oneof![
        Just(ClosePolicy::None),
        Just(ClosePolicy::Active),
        Just(ClosePolicy::AllButActive),
        Just(ClosePolicy::All),
        Just(ClosePolicy::Exit),
    ]
}

/// A census with unique tab ids. The active tab id usually refers to one of
/// the focused tabs, but the census may also be empty or the id stale (the
/// tab closed between capture and planning).
fn arb_census() -> impl Strategy<Value = (TabCensus, TabId)> {
    (
        prop::collection::vec(any::<bool>(), 0..8),
        prop::collection::vec(any::<bool>(), 0..8),
        any::<prop::sample::Index>(),
        prop::bool::weighted(0.1),
    )
        .prop_map(|(focused_pinned, background_pinned, active_index, stale_active)| {
            let active = if focused_pinned.is_empty() {
                usize::MAX
            } else {
                active_index.index(focused_pinned.len())
            };
            let focused: Vec<TabSnapshot> = focused_pinned
                .iter()
                .enumerate()
                .map(|(i, &pinned)| TabSnapshot {
                    id: TabId(i as u32),
                    url: format!("https://example.com/{}", i),
                    pinned,
                    active: i == active,
                })
                .collect();
            let background: Vec<TabSnapshot> = background_pinned
                .iter()
                .enumerate()
                .map(|(i, &pinned)| TabSnapshot {
                    id: TabId(100 + i as u32),
                    url: format!("https://example.org/{}", i),
                    pinned,
                    active: false,
                })
                .collect();
            let active_id = if stale_active || focused.is_empty() {
                TabId(999)
            } else {
                focused[active].id
            };
            (TabCensus { focused, background }, active_id)
        })
}

/// Every planned closure refers to a tab from the census, with focused and
/// background batches drawn from their own window sets.
#[test]
fn test_plan_only_closes_census_tabs() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(arb_policy(), any::<bool>(), arb_census(), any::<bool>()),
            |(policy, close_pinned, (census, active_id), allows)| {
                let plan = plan_close(policy, close_pinned, &census, active_id, allows);

                for id in &plan.focused_tab_ids {
                    assert!(census.focused.iter().any(|t| t.id == *id));
                }
                for id in &plan.background_tab_ids {
                    assert!(census.background.iter().any(|t| t.id == *id));
                }
                Ok(())
            },
        )
        .unwrap();
}

/// Pinned tabs survive every policy except `exit`, unless the close-pinned
/// flag overrides the protection.
#[test]
fn test_pinned_tabs_protected() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(arb_policy(), arb_census(), any::<bool>()),
            |(policy, (census, active_id), allows)| {
                let plan = plan_close(policy, false, &census, active_id, allows);

                if policy != ClosePolicy::Exit {
                    let pinned_closed = census
                        .focused
                        .iter()
                        .chain(census.background.iter())
                        .filter(|t| t.pinned)
                        .any(|t| {
                            plan.focused_tab_ids.contains(&t.id)
                                || plan.background_tab_ids.contains(&t.id)
                        });
                    assert!(!pinned_closed, "{:?} closed a pinned tab", policy);
                }
                Ok(())
            },
        )
        .unwrap();
}

/// No placeholder tab on a platform that cannot host background tabs, and
/// never one under the `none` policy.
#[test]
fn test_temp_tab_requires_background_capable_platform() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(arb_policy(), any::<bool>(), arb_census()),
            |(policy, close_pinned, (census, active_id))| {
                let restricted = plan_close(policy, close_pinned, &census, active_id, false);
                assert!(restricted.temp_tab.is_none());

                if policy == ClosePolicy::None {
                    let plan = plan_close(policy, close_pinned, &census, active_id, true);
                    assert!(plan.is_noop());
                }
                Ok(())
            },
        )
        .unwrap();
}

/// `allButActive` never closes the active tab; `exit` always closes every
/// focused tab.
#[test]
fn test_active_tab_fate_per_policy() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(any::<bool>(), arb_census()),
            |(close_pinned, (census, active_id))| {
                let plan =
                    plan_close(ClosePolicy::AllButActive, close_pinned, &census, active_id, true);
                assert!(!plan.focused_tab_ids.contains(&active_id));

                let plan = plan_close(ClosePolicy::Exit, close_pinned, &census, active_id, true);
                assert_eq!(plan.focused_tab_ids.len(), census.focused.len());
                Ok(())
            },
        )
        .unwrap();
}
