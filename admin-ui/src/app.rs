use crate::bridge;
use crate::components::account_detail::AccountDetail;
use crate::components::account_tree::AccountTree;
use crate::config::UiConfig;
use account_tree::{
    build_forest, Account, AccountId, ListQuery, LoadOutcome, RequestGeneration, TreeNode,
};
use leptos::*;
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn App() -> impl IntoView {
    let config = store_value(UiConfig::from_build_env());
    let requests = store_value(RequestGeneration::new());

    let accounts = create_rw_signal(None::<Vec<Account>>);
    let loading = create_rw_signal(false);
    let selected_id = create_rw_signal(None::<AccountId>);
    let selected = create_rw_signal(None::<TreeNode>);
    let error = create_rw_signal(None::<String>);
    let load_generation = create_rw_signal(0u64);

    let forest = create_memo(move |_| accounts.with(|list| list.as_deref().map(build_forest)));

    let load_accounts = move || {
        let Some(ticket) = requests.try_update_value(RequestGeneration::begin) else {
            return;
        };
        let config = config.get_value();
        loading.set(true);
        spawn_local(async move {
            let query = ListQuery::new().per_page(config.page_size);
            let result = bridge::fetch_accounts(&config, &query).await;
            let Some(outcome) = requests.try_update_value(|g| g.settle(ticket, result)) else {
                return;
            };
            match outcome {
                LoadOutcome::Stale => {
                    tracing::debug!("dropping stale chart-of-accounts response");
                }
                LoadOutcome::Loaded { data: page, generation } => {
                    tracing::info!(
                        count = page.data.len(),
                        total = page.meta.total,
                        generation,
                        "chart of accounts loaded"
                    );
                    if page.meta.has_more() {
                        tracing::warn!(
                            per_page = page.meta.per_page,
                            total = page.meta.total,
                            "chart of accounts spans more than one page; only the first is shown"
                        );
                    }
                    batch(|| {
                        loading.set(false);
                        selected_id.set(None);
                        selected.set(None);
                        accounts.set(Some(page.data));
                        load_generation.set(generation);
                        error.set(None);
                    });
                }
                LoadOutcome::Failed(e) => {
                    tracing::warn!(error = %e, "chart of accounts load failed");
                    loading.set(false);
                    error.set(Some(format!("Failed to load chart of accounts\n{e}")));
                }
            }
        });
    };

    load_accounts();

    let on_select = Callback::new(move |node: TreeNode| {
        selected_id.set(Some(node.id()));
        selected.set(Some(node));
    });

    view! {
      <div class="layout">
        <section class="panel">
          <h2>"Chart of Accounts"</h2>
          <button prop:disabled=move || loading.get() on:click=move |_| load_accounts()>
            "Refresh"
          </button>
          <Show when=move || loading.get() fallback=|| ()>
            <span class="meta">" loading..."</span>
          </Show>
          {move || {
              // A new generation remounts the tree, and with it a fresh
              // expansion state, even when the reloaded list is unchanged.
              load_generation.track();
              match forest.get() {
                  None => ().into_view(),
                  Some(Err(e)) => view! {
                    <pre class="error">{format!("Chart of accounts cannot be shown\n{e}")}</pre>
                  }
                  .into_view(),
                  Some(Ok(forest)) => view! {
                    <AccountTree forest=forest selected=selected_id on_select=on_select/>
                  }
                  .into_view(),
              }
          }}
        </section>

        <div>
          <AccountDetail node=selected/>
          <Show when=move || error.get().is_some() fallback=|| ()>
            <pre class="error">{move || error.get().unwrap_or_default()}</pre>
          </Show>
        </div>
      </div>
    }
}
