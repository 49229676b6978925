use account_tree::TreeNode;
use leptos::*;

#[component]
pub fn AccountDetail(#[prop(into)] node: Signal<Option<TreeNode>>) -> impl IntoView {
    view! {
      <section class="panel">
        <h2>"Account"</h2>
        {move || match node.get() {
            None => view! { <p class="meta">"Select an account to see its details."</p> }.into_view(),
            Some(node) => {
                let parent = node
                    .account
                    .parent_id
                    .map_or_else(|| "none".to_string(), |p| p.to_string());
                let descendants = node.subtree_len() - 1;
                let children = node
                    .children
                    .iter()
                    .map(|c| view! { <li>{format!("{} {}", c.account.account_code, c.account.name)}</li> })
                    .collect_view();
                view! {
                  <dl>
                    <dt>"Code"</dt>
                    <dd>{node.account.account_code.clone()}</dd>
                    <dt>"Name"</dt>
                    <dd>{node.account.name.clone()}</dd>
                    <dt>"Type"</dt>
                    <dd>{node.account.account_type.label()}</dd>
                    <dt>"Parent"</dt>
                    <dd>{parent}</dd>
                  </dl>
                  <h3>{format!("Children ({})", node.children.len())}</h3>
                  <p class="meta">{format!("{descendants} accounts below this one")}</p>
                  <ul>{children}</ul>
                }
                .into_view()
            }
        }}
      </section>
    }
}
