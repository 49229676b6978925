use account_tree::{
    visible_rows, AccountId, Chevron, ExpansionState, Forest, Section, TreeNode, TreeRow,
};
use leptos::*;

/// Expandable chart-of-accounts tree. Expansion state lives and dies with the
/// component, so remounting it after a reload starts from a fully collapsed tree.
#[component]
pub fn AccountTree(
    forest: Forest,
    #[prop(into)] selected: Signal<Option<AccountId>>,
    #[prop(into)] on_select: Callback<TreeNode>,
) -> impl IntoView {
    let forest = store_value(forest);
    let expansion = create_rw_signal(ExpansionState::new());

    let rows = create_memo(move |_| {
        let selected = selected.get();
        forest.with_value(|f| expansion.with(|e| visible_rows(f, e, selected)))
    });

    let on_toggle = Callback::new(move |id: AccountId| {
        expansion.update(|e| {
            let open = e.toggle(id);
            tracing::trace!(account = %id, open, "toggled account");
        });
    });
    let on_row = Callback::new(move |id: AccountId| {
        if let Some(node) = forest.with_value(|f| f.find(id).cloned()) {
            on_select.call(node);
        }
    });

    let linked = move || section_rows(rows.get(), Section::Linked);
    let unlinked = move || section_rows(rows.get(), Section::Unlinked);

    view! {
      <ul class="account-tree">
        <For
          each=linked
          key=TreeRow::key
          children=move |row| view! { <AccountRow row=row on_toggle=on_toggle on_select=on_row/> }
        />
      </ul>
      <Show when=move || !unlinked().is_empty() fallback=|| ()>
        <h3>"Unlinked accounts"</h3>
        <p class="meta">"These accounts point at a parent that is not in the list."</p>
        <ul class="account-tree unlinked">
          <For
            each=unlinked
            key=TreeRow::key
            children=move |row| view! { <AccountRow row=row on_toggle=on_toggle on_select=on_row/> }
          />
        </ul>
      </Show>
    }
}

fn section_rows(rows: Vec<TreeRow>, section: Section) -> Vec<TreeRow> {
    rows.into_iter().filter(|r| r.section == section).collect()
}

#[component]
fn AccountRow(
    row: TreeRow,
    on_toggle: Callback<AccountId>,
    on_select: Callback<AccountId>,
) -> impl IntoView {
    let id = row.id;
    let class = if row.selected { "selected" } else { "" };
    let style = format!("padding-left: {}rem", row.depth as f32 * 1.25);
    let chevron = row.chevron.map_or("", Chevron::glyph);
    let is_folder = row.icon.is_folder();

    view! {
      <li class=class style=style on:click=move |_| on_select.call(id)>
        <span class="connector">{row.connector.glyph()}</span>
        <span class="chevron">{chevron}</span>
        <span
          class="icon"
          on:click=move |ev: ev::MouseEvent| {
              if is_folder {
                  ev.stop_propagation();
                  on_toggle.call(id);
              }
          }
        >
          {row.icon.glyph()}
        </span>
        <span class="code">{row.account_code}</span>
        " "
        <span class="name">{row.name}</span>
      </li>
    }
}
