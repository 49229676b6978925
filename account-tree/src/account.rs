use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub i64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for AccountId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Synthetic,
    Analytical,
}

impl AccountType {
    pub fn label(self) -> &'static str {
        match self {
            AccountType::Synthetic => "synthetic",
            AccountType::Analytical => "analytical",
        }
    }
}

/// One chart-of-accounts record exactly as the API lists it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    #[serde(default, deserialize_with = "deserialize_parent")]
    pub parent_id: Option<AccountId>,
    pub account_code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
}

impl Account {
    pub fn synthetic(
        id: i64,
        parent_id: Option<i64>,
        account_code: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self::new(id, parent_id, account_code, name, AccountType::Synthetic)
    }

    pub fn analytical(
        id: i64,
        parent_id: Option<i64>,
        account_code: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self::new(id, parent_id, account_code, name, AccountType::Analytical)
    }

    fn new(
        id: i64,
        parent_id: Option<i64>,
        account_code: impl Into<String>,
        name: impl Into<String>,
        account_type: AccountType,
    ) -> Self {
        Self {
            id: AccountId(id),
            parent_id: parent_id.map(AccountId),
            account_code: account_code.into(),
            name: name.into(),
            account_type,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        self.account_type == AccountType::Synthetic
    }
}

// The API uses 0 as "no parent" in older exports.
fn deserialize_parent<'de, D>(deserializer: D) -> Result<Option<AccountId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(raw.filter(|v| *v != 0).map(AccountId))
}
