use crate::account::AccountId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("account {0} appears more than once in the list")]
    DuplicateId(AccountId),

    /// `members` sit on a parent loop; `dependents` hang below a loop and so
    /// never reach a root or an orphan either.
    #[error("{}", describe_cycle(.members, .dependents))]
    Cycle {
        members: Vec<AccountId>,
        dependents: Vec<AccountId>,
    },
}

fn describe_cycle(members: &[AccountId], dependents: &[AccountId]) -> String {
    let mut msg = format!("accounts {} form a parent cycle", join_ids(members));
    if !dependents.is_empty() {
        msg.push_str(&format!(
            "; accounts {} cannot reach a root through it",
            join_ids(dependents)
        ));
    }
    msg
}

fn join_ids(ids: &[AccountId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
