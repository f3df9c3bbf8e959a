//! Calls to the spreadsheet endpoint.
//!
//! All three reads are plain CORS GETs distinguished by `action`. The submit
//! is a `no-cors` form POST: the endpoint answers with a redirect we cannot
//! read, so only transport errors are observable.

use contracts::domain::a001_issue_request::reference_data::MasterDataResponse;
use gloo_net::http::Request;
use web_sys::RequestMode;

pub async fn fetch_master_data(base_url: &str) -> Result<MasterDataResponse, String> {
    let response = Request::get(base_url)
        .query([("action", "getMasterData")])
        .mode(RequestMode::Cors)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    response
        .json::<MasterDataResponse>()
        .await
        .map_err(|e| e.to_string())
}

/// Fallback when master data is unavailable: a bare list of item names
pub async fn fetch_item_names(base_url: &str) -> Result<Vec<String>, String> {
    let response = Request::get(base_url)
        .mode(RequestMode::Cors)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    let names: Option<Vec<String>> = response.json().await.map_err(|e| e.to_string())?;
    Ok(names.unwrap_or_default())
}

/// The whole response body is the identifier
pub async fn fetch_next_indent_number(base_url: &str) -> Result<String, String> {
    let response = Request::get(base_url)
        .query([("action", "getNextIndentNumber")])
        .mode(RequestMode::Cors)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    let text = response.text().await.map_err(|e| e.to_string())?;
    let number = text.trim();
    if number.is_empty() {
        return Err("empty indent number".to_string());
    }
    Ok(number.to_string())
}

/// POST an `application/x-www-form-urlencoded` body built from the batch
pub async fn submit_batch(base_url: &str, form_body: String) -> Result<(), String> {
    Request::post(base_url)
        .mode(RequestMode::NoCors)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(form_body)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    Ok(())
}
