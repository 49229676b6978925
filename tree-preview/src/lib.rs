use account_tree::{
    build_forest, render_text, visible_rows, Account, AccountId, ExpansionState, Forest,
    ListResponse,
};
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Serialising the forest recurses once per level.
pub const MAX_JSON_DEPTH: usize = 256;

#[derive(Clone, Debug, Default)]
pub struct PreviewOptions {
    pub expand: Vec<AccountId>,
    pub expand_all: bool,
    pub selected: Option<AccountId>,
    pub json: bool,
}

pub fn load_accounts(path: &Path) -> Result<Vec<Account>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_accounts(&raw).with_context(|| format!("failed to decode {}", path.display()))
}

/// Chart-of-accounts exports come either straight from the listing endpoint
/// (`{data, meta}`) or as a bare array.
pub fn parse_accounts(raw: &str) -> Result<Vec<Account>> {
    match raw.trim_start().chars().next() {
        Some('[') => Ok(serde_json::from_str::<Vec<Account>>(raw)?),
        Some('{') => Ok(serde_json::from_str::<ListResponse<Account>>(raw)?.data),
        _ => bail!("expected a JSON object with a `data` list or a JSON array of accounts"),
    }
}

pub fn preview(accounts: &[Account], options: &PreviewOptions) -> Result<String> {
    let forest = build_forest(accounts).context("account list cannot form a tree")?;
    if options.json {
        let depth = forest.depth();
        if depth > MAX_JSON_DEPTH {
            bail!("forest is {depth} levels deep; JSON output supports at most {MAX_JSON_DEPTH}");
        }
        return Ok(serde_json::to_string_pretty(&forest)?);
    }

    let expansion = expansion_for(&forest, options);
    tracing::debug!(
        accounts = accounts.len(),
        expanded = expansion.expanded_count(),
        "rendering preview"
    );
    Ok(render_text(&visible_rows(&forest, &expansion, options.selected)))
}

fn expansion_for(forest: &Forest, options: &PreviewOptions) -> ExpansionState {
    let mut expansion = ExpansionState::new();
    if options.expand_all {
        expansion.expand_all(forest);
    }
    for id in &options.expand {
        if forest.find(*id).is_none() {
            tracing::warn!(account = %id, "--expand names an account that is not in the list");
        }
        expansion.set(*id, true);
    }
    expansion
}

pub fn demo_accounts() -> Vec<Account> {
    vec![
        Account::synthetic(1, None, "1", "Ativo"),
        Account::synthetic(2, Some(1), "1.1", "Ativo Circulante"),
        Account::analytical(3, Some(2), "1.1.1", "Caixa"),
        Account::analytical(4, Some(2), "1.1.2", "Banco"),
        Account::synthetic(5, Some(1), "1.2", "Ativo Imobilizado"),
        Account::synthetic(6, None, "2", "Passivo"),
        Account::analytical(7, Some(6), "2.1", "Fornecedores"),
        Account::synthetic(8, None, "3", "Receitas"),
        Account::analytical(9, Some(8), "3.1", "Mensalidades"),
        Account::analytical(10, Some(8), "3.2", "Doacoes"),
        Account::analytical(11, Some(99), "9.9", "Conta sem pai"),
    ]
}

pub fn run_demo() -> Result<String> {
    preview(
        &demo_accounts(),
        &PreviewOptions {
            expand_all: true,
            ..PreviewOptions::default()
        },
    )
}
