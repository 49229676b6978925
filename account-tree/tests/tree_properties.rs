use account_tree::{
    build_forest, visible_rows, Account, AccountId, ExpansionState, Section, TreeError, TreeNode,
};
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

fn ativo_caixa_banco() -> Vec<Account> {
    vec![
        Account::synthetic(1, None, "1", "Ativo"),
        Account::analytical(2, Some(1), "1.1", "Caixa"),
        Account::analytical(3, Some(1), "1.2", "Banco"),
    ]
}

#[test]
fn single_root_with_two_ordered_children() {
    let forest = build_forest(&ativo_caixa_banco()).expect("build");
    assert_eq!(forest.roots.len(), 1);
    assert_eq!(forest.roots[0].id(), AccountId(1));
    let children: Vec<_> = forest.roots[0].children.iter().map(TreeNode::id).collect();
    assert_eq!(children, vec![AccountId(2), AccountId(3)]);

    let mut expansion = ExpansionState::new();
    let rows = visible_rows(&forest, &expansion, None);
    assert_eq!(rows.len(), 1);

    expansion.toggle(AccountId(1));
    let rows = visible_rows(&forest, &expansion, None);
    let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Ativo", "Caixa", "Banco"]);
}

#[test]
fn dangling_parent_stays_out_of_roots_but_is_shown_unlinked() {
    let mut accounts = ativo_caixa_banco();
    accounts.push(Account::analytical(5, Some(99), "5", "Sem pai"));
    let forest = build_forest(&accounts).expect("build");

    assert!(forest.roots.iter().all(|root| root.find(AccountId(5)).is_none()));
    assert_eq!(forest.orphans.len(), 1);

    let rows = visible_rows(&forest, &ExpansionState::new(), None);
    let unlinked: Vec<_> = rows
        .iter()
        .filter(|r| r.section == Section::Unlinked)
        .map(|r| r.id)
        .collect();
    assert_eq!(unlinked, vec![AccountId(5)]);
}

#[test]
fn selected_node_carries_its_children() {
    let forest = build_forest(&ativo_caixa_banco()).expect("build");
    let node = forest.find(AccountId(1)).expect("selected node");
    assert_eq!(node.children.len(), 2);
}

fn acyclic_accounts() -> impl Strategy<Value = Vec<Account>> {
    (0usize..40)
        .prop_flat_map(|n| {
            let parents: Vec<BoxedStrategy<Option<usize>>> = (0..n)
                .map(|i| {
                    if i == 0 {
                        Just(None).boxed()
                    } else {
                        prop::option::of(0..i).boxed()
                    }
                })
                .collect();
            (parents, prop::collection::vec(any::<bool>(), n))
        })
        .prop_map(|(parents, synthetic)| {
            parents
                .into_iter()
                .zip(synthetic)
                .enumerate()
                .map(|(i, (parent, is_synthetic))| {
                    let id = i as i64 + 1;
                    let parent = parent.map(|p| p as i64 + 1);
                    if is_synthetic {
                        Account::synthetic(id, parent, id.to_string(), format!("conta {id}"))
                    } else {
                        Account::analytical(id, parent, id.to_string(), format!("conta {id}"))
                    }
                })
                .collect::<Vec<_>>()
        })
        .prop_shuffle()
}

/// Parents drawn freely from 1..=40 while ids run 1..=n (n < 30): some parents
/// dangle, some point at the account itself, and loops of any length appear.
fn arbitrary_accounts() -> impl Strategy<Value = Vec<Account>> {
    prop::collection::vec(prop::option::of(1i64..=40), 0..30)
        .prop_map(|parents| {
            parents
                .into_iter()
                .enumerate()
                .map(|(i, parent)| {
                    let id = i as i64 + 1;
                    Account::synthetic(id, parent, id.to_string(), format!("conta {id}"))
                })
                .collect::<Vec<_>>()
        })
        .prop_shuffle()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Fate {
    Linked,
    Unlinked,
    LoopMember,
    BelowLoop,
}

/// Follows each parent chain by brute force to decide where an account must end up.
fn expected_fates(accounts: &[Account]) -> HashMap<AccountId, Fate> {
    let parents: HashMap<AccountId, Option<AccountId>> =
        accounts.iter().map(|a| (a.id, a.parent_id)).collect();
    accounts
        .iter()
        .map(|account| {
            let mut seen = HashSet::new();
            let mut current = account.id;
            let fate = loop {
                if !seen.insert(current) {
                    break if current == account.id {
                        Fate::LoopMember
                    } else {
                        Fate::BelowLoop
                    };
                }
                match parents[&current] {
                    None => break Fate::Linked,
                    Some(parent) if !parents.contains_key(&parent) => break Fate::Unlinked,
                    Some(parent) => current = parent,
                }
            };
            (account.id, fate)
        })
        .collect()
}

fn ids_with(
    accounts: &[Account],
    fates: &HashMap<AccountId, Fate>,
    fate: Fate,
) -> Vec<AccountId> {
    accounts
        .iter()
        .map(|a| a.id)
        .filter(|id| fates[id] == fate)
        .collect()
}

fn assert_children_in_input_order(node: &TreeNode, accounts: &[Account]) {
    let expected: Vec<AccountId> = accounts
        .iter()
        .filter(|a| a.parent_id == Some(node.id()))
        .map(|a| a.id)
        .collect();
    let actual: Vec<AccountId> = node.children.iter().map(TreeNode::id).collect();
    assert_eq!(actual, expected);
    for child in &node.children {
        assert_children_in_input_order(child, accounts);
    }
}

// Opens every node, including analytical accounts that happen to have children.
fn fully_expanded(accounts: &[Account]) -> ExpansionState {
    let mut expansion = ExpansionState::new();
    for account in accounts {
        expansion.set(account.id, true);
    }
    expansion
}

proptest! {
    #[test]
    fn every_record_lands_exactly_once(accounts in acyclic_accounts()) {
        let forest = build_forest(&accounts).expect("build");
        prop_assert_eq!(forest.len(), accounts.len());
        prop_assert!(forest.orphans.is_empty());
        for account in &accounts {
            prop_assert!(forest.find(account.id).is_some());
        }
    }

    #[test]
    fn siblings_keep_input_order(accounts in acyclic_accounts()) {
        let forest = build_forest(&accounts).expect("build");
        let expected_roots: Vec<AccountId> = accounts
            .iter()
            .filter(|a| a.parent_id.is_none())
            .map(|a| a.id)
            .collect();
        let roots: Vec<AccountId> = forest.roots.iter().map(TreeNode::id).collect();
        prop_assert_eq!(roots, expected_roots);
        for root in &forest.roots {
            assert_children_in_input_order(root, &accounts);
        }
    }

    #[test]
    fn double_toggle_restores_visible_rows(
        accounts in acyclic_accounts(),
        pick in any::<prop::sample::Index>(),
    ) {
        prop_assume!(!accounts.is_empty());
        let forest = build_forest(&accounts).expect("build");
        let mut expansion = fully_expanded(&accounts);
        let before = visible_rows(&forest, &expansion, None);

        let id = accounts[pick.index(accounts.len())].id;
        expansion.toggle(id);
        expansion.toggle(id);
        prop_assert_eq!(visible_rows(&forest, &expansion, None), before);
    }

    #[test]
    fn fully_expanded_tree_shows_every_account(accounts in acyclic_accounts()) {
        let forest = build_forest(&accounts).expect("build");
        let rows = visible_rows(&forest, &fully_expanded(&accounts), None);
        prop_assert_eq!(rows.len(), accounts.len());
    }

    #[test]
    fn arbitrary_parents_split_into_roots_orphans_or_a_cycle(accounts in arbitrary_accounts()) {
        let fates = expected_fates(&accounts);
        let members = ids_with(&accounts, &fates, Fate::LoopMember);
        let dependents = ids_with(&accounts, &fates, Fate::BelowLoop);

        match build_forest(&accounts) {
            Err(err) => {
                prop_assert!(!members.is_empty(), "unexpected error {}", err);
                prop_assert_eq!(err, TreeError::Cycle { members, dependents });
            }
            Ok(forest) => {
                prop_assert!(members.is_empty() && dependents.is_empty());
                prop_assert_eq!(forest.len(), accounts.len());

                let root_ids: Vec<AccountId> = forest.roots.iter().map(TreeNode::id).collect();
                let expected_roots: Vec<AccountId> = accounts
                    .iter()
                    .filter(|a| a.parent_id.is_none())
                    .map(|a| a.id)
                    .collect();
                prop_assert_eq!(root_ids, expected_roots);

                let orphan_ids: Vec<AccountId> = forest.orphans.iter().map(TreeNode::id).collect();
                let expected_orphans: Vec<AccountId> = accounts
                    .iter()
                    .filter(|a| a.parent_id.is_some_and(|p| !fates.contains_key(&p)))
                    .map(|a| a.id)
                    .collect();
                prop_assert_eq!(orphan_ids, expected_orphans);

                for account in &accounts {
                    let in_roots = forest.roots.iter().any(|r| r.find(account.id).is_some());
                    let in_orphans = forest.orphans.iter().any(|o| o.find(account.id).is_some());
                    match fates[&account.id] {
                        Fate::Linked => {
                            prop_assert!(in_roots && !in_orphans);
                        }
                        _ => {
                            prop_assert!(in_orphans && !in_roots);
                        }
                    }
                }
            }
        }
    }
}
