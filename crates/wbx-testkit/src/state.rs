//! Request handling for the fake action API.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::sync::{Mutex, PoisonError};

use serde_json::{Value, json};

use crate::request::{RecordedRequest, parse_urlencoded};
use crate::{CSRF_TOKEN, LOGIN_TOKEN, SESSION_COOKIE};

#[derive(Debug)]
pub(crate) struct State {
    pub(crate) entities: BTreeMap<String, Value>,
    pub(crate) omit_login_token: bool,
    pub(crate) login_result: Option<String>,
    pub(crate) omit_session_cookie: bool,
    pub(crate) failing_creates: BTreeSet<usize>,
    pub(crate) error_on_unknown: bool,
    pub(crate) statuses: BTreeMap<String, u16>,
    pub(crate) next_id: u64,
    pub(crate) create_calls: usize,
    pub(crate) created: BTreeMap<usize, String>,
    pub(crate) requests: Vec<RecordedRequest>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            entities: BTreeMap::new(),
            omit_login_token: false,
            login_result: None,
            omit_session_cookie: false,
            failing_creates: BTreeSet::new(),
            error_on_unknown: false,
            statuses: BTreeMap::new(),
            next_id: 100,
            create_calls: 0,
            created: BTreeMap::new(),
            requests: Vec::new(),
        }
    }
}

struct Reply {
    status: u16,
    body: Value,
    set_cookie: bool,
}

impl Reply {
    const fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body,
            set_cookie: false,
        }
    }

    fn error(code: &str, info: &str) -> Self {
        Self::ok(json!({"error": {"code": code, "info": info, "*": "fake wikibase"}}))
    }
}

pub(crate) fn serve(mut request: tiny_http::Request, state: &Mutex<State>) {
    let recorded = record(&mut request);
    let reply = {
        let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
        state.requests.push(recorded.clone());
        handle(&recorded, &mut state)
    };

    let mut response = tiny_http::Response::from_string(reply.body.to_string())
        .with_status_code(reply.status)
        .with_header(header("Content-Type", "application/json; charset=utf-8"));
    if reply.set_cookie {
        response = response.with_header(header(
            "Set-Cookie",
            &format!("{SESSION_COOKIE}; Path=/; HttpOnly"),
        ));
    }
    let _ = request.respond(response);
}

fn header(name: &str, value: &str) -> tiny_http::Header {
    tiny_http::Header::from_bytes(name.as_bytes(), value.as_bytes())
        .unwrap_or_else(|()| panic!("invalid header {name}: {value}"))
}

fn record(request: &mut tiny_http::Request) -> RecordedRequest {
    let url = request.url().to_string();
    let (path, query) = url.split_once('?').unwrap_or((url.as_str(), ""));

    let mut params = BTreeMap::new();
    parse_urlencoded(query, &mut params);

    let mut body = String::new();
    if request.as_reader().read_to_string(&mut body).is_ok() {
        parse_urlencoded(&body, &mut params);
    }

    let cookie = request
        .headers()
        .iter()
        .find(|h| h.field.equiv("Cookie"))
        .map(|h| h.value.as_str().to_string());

    RecordedRequest {
        method: request.method().to_string(),
        path: path.to_string(),
        params,
        cookie,
    }
}

fn handle(request: &RecordedRequest, state: &mut State) -> Reply {
    let action = request.action().unwrap_or_default();
    if let Some(&status) = state.statuses.get(action) {
        return Reply {
            status,
            body: json!({}),
            set_cookie: false,
        };
    }

    match action {
        "query" if request.param("meta") == Some("tokens") => tokens(request, state),
        "login" => login(request, state),
        "wbgetentities" => get_entities(request, state),
        "wbeditentity" => edit_entity(request, state),
        other => Reply::error("badvalue", &format!("Unrecognized value for parameter \"action\": {other}.")),
    }
}

fn tokens(request: &RecordedRequest, state: &State) -> Reply {
    match request.param("type") {
        Some("login") if state.omit_login_token => {
            Reply::ok(json!({"batchcomplete": "", "query": {"tokens": {}}}))
        }
        Some("login") => Reply::ok(json!({"batchcomplete": "", "query": {"tokens": {"logintoken": LOGIN_TOKEN}}})),
        Some("csrf") => {
            let token = if request.has_session_cookie() { CSRF_TOKEN } else { "+\\" };
            Reply::ok(json!({"batchcomplete": "", "query": {"tokens": {"csrftoken": token}}}))
        }
        _ => Reply::error("badvalue", "Unrecognized value for parameter \"type\"."),
    }
}

fn login(request: &RecordedRequest, state: &State) -> Reply {
    if request.method != "POST" {
        return Reply::error("mustpostparams", "The following parameters were found in the query string, but must be in the POST body.");
    }
    if request.param("lgtoken") != Some(LOGIN_TOKEN) {
        return Reply::ok(json!({"login": {"result": "WrongToken"}}));
    }
    match state.login_result.as_deref() {
        Some(result) if result != "Success" => Reply::ok(json!({
            "login": {"result": result, "reason": "Incorrect username or password entered. Please try again."}
        })),
        _ => Reply {
            status: 200,
            body: json!({"login": {
                "result": "Success",
                "lguserid": 1,
                "lgusername": request.param("lgname").unwrap_or_default()
            }}),
            set_cookie: !state.omit_session_cookie,
        },
    }
}

fn get_entities(request: &RecordedRequest, state: &State) -> Reply {
    let ids: Vec<&str> = request
        .param("ids")
        .unwrap_or_default()
        .split('|')
        .filter(|id| !id.is_empty())
        .collect();
    let languages: Option<Vec<&str>> = request.param("languages").map(|l| l.split('|').collect());

    let mut entities = serde_json::Map::new();
    for id in ids {
        match state.entities.get(id) {
            Some(entity) => {
                let mut entity = entity.clone();
                if let Some(languages) = &languages {
                    restrict_languages(&mut entity, languages);
                }
                entities.insert(id.to_string(), entity);
            }
            None if state.error_on_unknown => {
                return Reply::error(
                    "no-such-entity",
                    &format!("Could not find an entity with the ID \"{id}\"."),
                );
            }
            None => {
                entities.insert(id.to_string(), json!({"id": id, "missing": ""}));
            }
        }
    }
    Reply::ok(json!({"entities": entities, "success": 1}))
}

fn restrict_languages(entity: &mut Value, languages: &[&str]) {
    for key in ["labels", "descriptions", "aliases"] {
        if let Some(Value::Object(terms)) = entity.get_mut(key) {
            terms.retain(|language, _| languages.contains(&language.as_str()));
        }
    }
}

fn edit_entity(request: &RecordedRequest, state: &mut State) -> Reply {
    if request.param("token") != Some(CSRF_TOKEN) || !request.has_session_cookie() {
        return Reply::error("badtoken", "Invalid CSRF token.");
    }
    if request.data_json().is_none() {
        return Reply::error("invalid-json", "Could not parse \"data\" as JSON.");
    }

    let call = state.create_calls;
    state.create_calls += 1;
    if state.failing_creates.contains(&call) {
        return Reply::error("failed-save", "The save has failed.");
    }

    let (prefix, kind) = match request.param("new") {
        Some("property") => ("P", "property"),
        Some("item") => ("Q", "item"),
        _ => return Reply::error("no-such-entity-type", "Unknown entity type."),
    };
    let id = format!("{prefix}{}", state.next_id);
    state.next_id += 1;
    state.created.insert(call, id.clone());

    Reply::ok(json!({"entity": {"id": id, "type": kind, "lastrevid": 1}, "success": 1}))
}
