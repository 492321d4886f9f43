//! In-memory stand-in for the shortlink API.
//!
//! Covers the link and routing-rule routes with the same auth, workspace
//! scoping and error body (`{"message": ...}`) as the real service, so the
//! client can be exercised end-to-end over HTTP.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{get, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

pub const SHORT_DOMAIN: &str = "sho.rt";
const MAX_LIMIT: u32 = 100;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: String,
    pub key: String,
    pub url: String,
    pub short_link: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub clicks: u64,
    pub archived: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub source: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    pub workspace_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLink {
    pub url: String,
    pub key: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLink {
    pub url: Option<String>,
    pub key: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub archived: Option<bool>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    pub link_id: String,
    pub name: Option<String>,
    pub destination_url: String,
    pub priority: i32,
    pub enabled: bool,
    pub match_mode: String,
    pub conditions: Vec<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRule {
    pub destination_url: String,
    #[serde(default)]
    pub conditions: Vec<Value>,
    pub name: Option<String>,
    pub match_mode: Option<String>,
    pub priority: Option<i32>,
    pub enabled: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRule {
    pub destination_url: Option<String>,
    pub conditions: Option<Vec<Value>>,
    pub name: Option<String>,
    pub match_mode: Option<String>,
    pub priority: Option<i32>,
    pub enabled: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRules {
    pub rule_ids: Vec<String>,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrQuery {
    pub format: Option<String>,
    pub size: Option<u32>,
}

#[derive(Default)]
pub struct Store {
    links: Vec<Link>,
    rules: HashMap<String, Vec<Rule>>,
}

pub type Db = Arc<RwLock<Store>>;

type ApiError = (StatusCode, Json<Value>);
type ApiResult<T> = Result<T, ApiError>;

fn error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "message": message.into() })))
}

fn link_not_found() -> ApiError {
    error(StatusCode::NOT_FOUND, "Link not found")
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/link", get(list_links).post(create_link))
        .route(
            "/api/link/{id}",
            get(get_link).patch(update_link).delete(delete_link),
        )
        .route("/api/link/{id}/availability", get(key_availability))
        .route("/api/link/{id}/qrcode", get(qr_code))
        .route(
            "/api/link/{id}/rules",
            get(list_rules).post(create_rule).delete(delete_all_rules),
        )
        .route("/api/link/{id}/rules/reorder", put(reorder_rules))
        .route(
            "/api/link/{id}/rules/{rule_id}",
            get(get_rule).patch(update_rule).delete(delete_rule),
        )
        .layer(middleware::from_fn(require_api_key))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn require_api_key(request: Request, next: Next) -> Result<Response, ApiError> {
    let key = request
        .headers()
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let valid = ["sl_live_", "sl_test_"]
        .iter()
        .any(|prefix| key.len() > prefix.len() && key.starts_with(prefix));
    if !valid {
        return Err(error(StatusCode::UNAUTHORIZED, "Invalid API key"));
    }
    Ok(next.run(request).await)
}

fn workspace(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-workspace-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn visible(link: &Link, workspace_id: &Option<String>) -> bool {
    &link.workspace_id == workspace_id
}

// --- links ---

async fn list_links(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Value>> {
    let page = query.page.unwrap_or(1);
    if page == 0 {
        return Err(error(StatusCode::BAD_REQUEST, "page must be at least 1"));
    }
    let limit = query.limit.unwrap_or(10).clamp(1, MAX_LIMIT);
    let ws = workspace(&headers);

    let store = db.read().await;
    let matching: Vec<&Link> = store
        .links
        .iter()
        .filter(|l| visible(l, &ws))
        .filter(|l| match &query.search {
            Some(term) => l.url.contains(term.as_str()) || l.key.contains(term.as_str()),
            None => true,
        })
        .collect();

    let total = matching.len() as u64;
    let total_pages = total.div_ceil(limit as u64);
    let data: Vec<&Link> = matching
        .into_iter()
        .skip((page as usize - 1).saturating_mul(limit as usize))
        .take(limit as usize)
        .collect();

    Ok(Json(json!({
        "data": data,
        "pagination": {"page": page, "limit": limit, "total": total, "totalPages": total_pages}
    })))
}

async fn create_link(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<CreateLink>,
) -> ApiResult<(StatusCode, Json<Link>)> {
    if !(input.url.starts_with("http://") || input.url.starts_with("https://")) {
        return Err(error(
            StatusCode::BAD_REQUEST,
            "url must be an absolute http(s) URL",
        ));
    }

    let mut store = db.write().await;
    let key = match input.key {
        Some(key) => {
            if store.links.iter().any(|l| l.key == key) {
                return Err(error(
                    StatusCode::CONFLICT,
                    format!("Key \"{key}\" is already taken"),
                ));
            }
            key
        }
        None => Uuid::new_v4().simple().to_string()[..7].to_string(),
    };

    let now = Utc::now();
    let link = Link {
        id: format!("lnk_{}", Uuid::new_v4().simple()),
        short_link: format!("https://{SHORT_DOMAIN}/{key}"),
        key,
        url: input.url,
        title: input.title,
        description: input.description,
        tags: input.tags,
        clicks: 0,
        archived: false,
        expires_at: input.expires_at,
        source: headers
            .get("x-source")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        created_at: now,
        updated_at: now,
        workspace_id: workspace(&headers),
    };
    debug!(id = %link.id, key = %link.key, "link created");
    store.links.push(link.clone());
    Ok((StatusCode::CREATED, Json(link)))
}

async fn get_link(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Json<Link>> {
    let ws = workspace(&headers);
    let store = db.read().await;
    store
        .links
        .iter()
        .find(|l| l.id == id && visible(l, &ws))
        .cloned()
        .map(Json)
        .ok_or_else(link_not_found)
}

async fn update_link(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(input): Json<UpdateLink>,
) -> ApiResult<Json<Link>> {
    let ws = workspace(&headers);
    let mut store = db.write().await;
    if let Some(key) = &input.key {
        if store.links.iter().any(|l| &l.key == key && l.id != id) {
            return Err(error(
                StatusCode::CONFLICT,
                format!("Key \"{key}\" is already taken"),
            ));
        }
    }

    let link = store
        .links
        .iter_mut()
        .find(|l| l.id == id && visible(l, &ws))
        .ok_or_else(link_not_found)?;
    if let Some(url) = input.url {
        link.url = url;
    }
    if let Some(key) = input.key {
        link.short_link = format!("https://{SHORT_DOMAIN}/{key}");
        link.key = key;
    }
    if let Some(title) = input.title {
        link.title = Some(title);
    }
    if let Some(description) = input.description {
        link.description = Some(description);
    }
    if let Some(tags) = input.tags {
        link.tags = tags;
    }
    if let Some(archived) = input.archived {
        link.archived = archived;
    }
    if let Some(expires_at) = input.expires_at {
        link.expires_at = Some(expires_at);
    }
    link.updated_at = Utc::now();
    Ok(Json(link.clone()))
}

async fn delete_link(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let ws = workspace(&headers);
    let mut store = db.write().await;
    let index = store
        .links
        .iter()
        .position(|l| l.id == id && visible(l, &ws))
        .ok_or_else(link_not_found)?;
    store.links.remove(index);
    store.rules.remove(&id);
    Ok(Json(json!({ "success": true })))
}

async fn key_availability(State(db): State<Db>, Path(key): Path<String>) -> Json<Value> {
    let store = db.read().await;
    let available = !store.links.iter().any(|l| l.key == key);
    Json(json!({ "key": key, "available": available }))
}

async fn qr_code(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(query): Query<QrQuery>,
) -> ApiResult<Json<Value>> {
    let ws = workspace(&headers);
    let store = db.read().await;
    let link = store
        .links
        .iter()
        .find(|l| l.id == id && visible(l, &ws))
        .ok_or_else(link_not_found)?;

    let size = query.size.unwrap_or(300);
    let format = query.format.unwrap_or_else(|| "png".to_string());
    let data = match format.as_str() {
        "svg" => format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" data-content="{}"/>"#,
            link.short_link
        ),
        "png" => "data:image/png;base64,iVBORw0KGgo=".to_string(),
        other => {
            return Err(error(
                StatusCode::BAD_REQUEST,
                format!("unsupported format: {other}"),
            ))
        }
    };
    Ok(Json(json!({ "format": format, "data": data, "size": size })))
}

// --- rules ---

fn ensure_link(store: &Store, id: &str, ws: &Option<String>) -> ApiResult<()> {
    if store.links.iter().any(|l| l.id == id && visible(l, ws)) {
        Ok(())
    } else {
        Err(link_not_found())
    }
}

fn rule_not_found() -> ApiError {
    error(StatusCode::NOT_FOUND, "Rule not found")
}

async fn list_rules(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Rule>>> {
    let store = db.read().await;
    ensure_link(&store, &id, &workspace(&headers))?;
    let mut rules = store.rules.get(&id).cloned().unwrap_or_default();
    rules.sort_by_key(|r| r.priority);
    Ok(Json(rules))
}

async fn create_rule(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(input): Json<CreateRule>,
) -> ApiResult<(StatusCode, Json<Rule>)> {
    let mut store = db.write().await;
    ensure_link(&store, &id, &workspace(&headers))?;
    if input.conditions.is_empty() {
        return Err(error(
            StatusCode::BAD_REQUEST,
            "a rule needs at least one condition",
        ));
    }

    let rules = store.rules.entry(id.clone()).or_default();
    let now = Utc::now();
    let rule = Rule {
        id: format!("rul_{}", Uuid::new_v4().simple()),
        link_id: id,
        name: input.name,
        destination_url: input.destination_url,
        priority: input.priority.unwrap_or(rules.len() as i32),
        enabled: input.enabled.unwrap_or(true),
        match_mode: input.match_mode.unwrap_or_else(|| "all".to_string()),
        conditions: input.conditions,
        created_at: now,
        updated_at: now,
    };
    rules.push(rule.clone());
    Ok((StatusCode::CREATED, Json(rule)))
}

async fn get_rule(
    State(db): State<Db>,
    headers: HeaderMap,
    Path((id, rule_id)): Path<(String, String)>,
) -> ApiResult<Json<Rule>> {
    let store = db.read().await;
    ensure_link(&store, &id, &workspace(&headers))?;
    store
        .rules
        .get(&id)
        .and_then(|rules| rules.iter().find(|r| r.id == rule_id))
        .cloned()
        .map(Json)
        .ok_or_else(rule_not_found)
}

async fn update_rule(
    State(db): State<Db>,
    headers: HeaderMap,
    Path((id, rule_id)): Path<(String, String)>,
    Json(input): Json<UpdateRule>,
) -> ApiResult<Json<Rule>> {
    let mut store = db.write().await;
    ensure_link(&store, &id, &workspace(&headers))?;
    let rule = store
        .rules
        .get_mut(&id)
        .and_then(|rules| rules.iter_mut().find(|r| r.id == rule_id))
        .ok_or_else(rule_not_found)?;
    if let Some(destination_url) = input.destination_url {
        rule.destination_url = destination_url;
    }
    if let Some(conditions) = input.conditions {
        rule.conditions = conditions;
    }
    if let Some(name) = input.name {
        rule.name = Some(name);
    }
    if let Some(match_mode) = input.match_mode {
        rule.match_mode = match_mode;
    }
    if let Some(priority) = input.priority {
        rule.priority = priority;
    }
    if let Some(enabled) = input.enabled {
        rule.enabled = enabled;
    }
    rule.updated_at = Utc::now();
    Ok(Json(rule.clone()))
}

async fn delete_rule(
    State(db): State<Db>,
    headers: HeaderMap,
    Path((id, rule_id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    let mut store = db.write().await;
    ensure_link(&store, &id, &workspace(&headers))?;
    let rules = store.rules.get_mut(&id).ok_or_else(rule_not_found)?;
    let index = rules
        .iter()
        .position(|r| r.id == rule_id)
        .ok_or_else(rule_not_found)?;
    rules.remove(index);
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_all_rules(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let mut store = db.write().await;
    ensure_link(&store, &id, &workspace(&headers))?;
    store.rules.remove(&id);
    Ok(StatusCode::NO_CONTENT)
}

async fn reorder_rules(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(input): Json<ReorderRules>,
) -> ApiResult<Json<Vec<Rule>>> {
    let mut store = db.write().await;
    ensure_link(&store, &id, &workspace(&headers))?;
    let rules = store.rules.entry(id).or_default();
    if input.rule_ids.len() != rules.len()
        || !rules.iter().all(|r| input.rule_ids.contains(&r.id))
    {
        return Err(error(
            StatusCode::BAD_REQUEST,
            "ruleIds must list every rule of the link exactly once",
        ));
    }
    for rule in rules.iter_mut() {
        if let Some(position) = input.rule_ids.iter().position(|rid| rid == &rule.id) {
            rule.priority = position as i32;
        }
    }
    rules.sort_by_key(|r| r.priority);
    Ok(Json(rules.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_link() -> Link {
        let now = Utc::now();
        Link {
            id: "lnk_1".to_string(),
            key: "promo".to_string(),
            url: "https://example.com".to_string(),
            short_link: format!("https://{SHORT_DOMAIN}/promo"),
            title: None,
            description: None,
            tags: Vec::new(),
            clicks: 0,
            archived: false,
            expires_at: None,
            source: None,
            created_at: now,
            updated_at: now,
            workspace_id: Some("ws_1".to_string()),
        }
    }

    #[test]
    fn link_serializes_camel_case_without_workspace() {
        let json = serde_json::to_value(sample_link()).unwrap();
        assert_eq!(json["shortLink"], "https://sho.rt/promo");
        assert!(json.get("workspaceId").is_none());
        assert!(json.get("workspace_id").is_none());
    }

    #[test]
    fn create_link_requires_url() {
        let result: Result<CreateLink, _> = serde_json::from_str(r#"{"key":"promo"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn create_link_defaults_tags() {
        let input: CreateLink = serde_json::from_str(r#"{"url":"https://example.com"}"#).unwrap();
        assert!(input.tags.is_empty());
        assert!(input.key.is_none());
    }

    #[test]
    fn update_link_all_fields_optional() {
        let input: UpdateLink = serde_json::from_str("{}").unwrap();
        assert!(input.url.is_none());
        assert!(input.archived.is_none());
    }

    #[test]
    fn links_are_scoped_to_their_workspace() {
        let link = sample_link();
        assert!(visible(&link, &Some("ws_1".to_string())));
        assert!(!visible(&link, &None));
        assert!(!visible(&link, &Some("ws_2".to_string())));
    }
}
