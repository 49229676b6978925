mod app;
mod bridge;
mod config;

pub mod components {
    pub mod account_detail;
    pub mod account_tree;
}

fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    leptos::mount_to_body(app::App);
}
