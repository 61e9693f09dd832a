use smart_ambulance_core::config::DEFAULT_SERVICE_URL;
use smart_ambulance_core::service::{
    decode_response, service_url, EmergencyPayload, EMERGENCY_PATH,
};
use smart_ambulance_core::{EmergencyRequest, EmergencyResult, RequestError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response, UrlSearchParams};

/// Service address: the page's `?api=` parameter, else the page origin.
pub fn service_base_url() -> String {
    let Some(window) = web_sys::window() else {
        return DEFAULT_SERVICE_URL.to_string();
    };
    let location = window.location();

    let from_query = location
        .search()
        .ok()
        .and_then(|search| UrlSearchParams::new_with_str(&search).ok())
        .and_then(|params| params.get("api"))
        .filter(|api| !api.trim().is_empty());

    from_query
        .or_else(|| location.origin().ok())
        .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string())
}

pub async fn find_nearest_hospital(
    base_url: &str,
    request: EmergencyRequest,
) -> Result<EmergencyResult, RequestError> {
    let window =
        web_sys::window().ok_or_else(|| RequestError::NetworkFailure("no window".to_string()))?;

    let body = serde_json::to_string(&EmergencyPayload::from(&request))
        .map_err(|error| RequestError::NetworkFailure(error.to_string()))?;

    let headers = Headers::new().map_err(js_failure)?;
    headers
        .set("Content-Type", "application/json")
        .map_err(js_failure)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_headers(&headers);
    opts.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(&service_url(base_url, EMERGENCY_PATH), &opts)
        .map_err(js_failure)?;

    let response_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_failure)?;
    let response = response_value.dyn_into::<Response>().map_err(js_failure)?;

    let text = JsFuture::from(response.text().map_err(js_failure)?)
        .await
        .map_err(js_failure)?;

    decode_response(response.status(), &text.as_string().unwrap_or_default())
}

fn js_failure(value: JsValue) -> RequestError {
    RequestError::NetworkFailure(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}
