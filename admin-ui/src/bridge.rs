use crate::config::UiConfig;
use account_tree::{Account, ListQuery, ListResponse};
use serde::de::DeserializeOwned;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("window not available")]
    WindowUnavailable,
    #[error("request failed: {0}")]
    Request(String),
    #[error("server answered HTTP {0}")]
    Status(u16),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

fn js_err(value: JsValue) -> BridgeError {
    BridgeError::Request(
        value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}")),
    )
}

pub async fn get_json<R>(url: &str) -> Result<R, BridgeError>
where
    R: DeserializeOwned,
{
    let window = web_sys::window().ok_or(BridgeError::WindowUnavailable)?;

    let init = RequestInit::new();
    init.set_method("GET");
    init.set_mode(RequestMode::Cors);
    let request = Request::new_with_str_and_init(url, &init).map_err(js_err)?;
    request
        .headers()
        .set("Accept", "application/json")
        .map_err(js_err)?;

    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_err)?;
    let response: Response = value.dyn_into().map_err(js_err)?;
    if !response.ok() {
        return Err(BridgeError::Status(response.status()));
    }

    let body = JsFuture::from(response.json().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    serde_wasm_bindgen::from_value(body).map_err(|e| BridgeError::Decode(e.to_string()))
}

pub async fn fetch_accounts(
    config: &UiConfig,
    query: &ListQuery,
) -> Result<ListResponse<Account>, BridgeError> {
    let url = format!(
        "{}?{}",
        config.endpoint("chart-of-accounts"),
        query.to_query_string()
    );
    tracing::debug!(%url, "fetching chart of accounts");
    get_json(&url).await
}
