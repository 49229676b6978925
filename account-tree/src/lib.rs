//! Chart-of-accounts records, the forest built from them, and the row model
//! tree views render.

pub mod account;
pub mod error;
pub mod expansion;
pub mod forest;
pub mod generation;
pub mod listing;
pub mod rows;

pub use account::{Account, AccountId, AccountType};
pub use error::TreeError;
pub use expansion::ExpansionState;
pub use forest::{build_forest, Forest, TreeNode};
pub use generation::{LoadOutcome, RequestGeneration, RequestTicket};
pub use listing::{ListMeta, ListQuery, ListResponse, SortDirection};
pub use rows::{
    render_text, visible_rows, Chevron, Connector, NodeIcon, RowKey, Section, TreeRow,
};
