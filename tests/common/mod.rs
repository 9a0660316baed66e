use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::{json, Value};
use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
}

impl TestEnv {
    pub fn new(api_url: &str) -> Self {
        Self::with_config(&format!(
            "api_url = \"{}\"\ncollection = \"notes-fixture\"\ntimeout_ms = 2000\n",
            api_url
        ))
    }

    pub fn with_config(config: &str) -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(home.join(".config/notesweep")).expect("create isolated config dir");
        fs::write(home.join(".config/notesweep/config.toml"), config).expect("write config");
        Self { _tmp: tmp, home }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("notesweep");
        cmd.env("HOME", &self.home)
            .env("NOTESWEEP_TOKEN", "fixture-token");
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }
}

/// Loopback stand-in for the remote document store. Serves the given query
/// pages (addressed by `start_cursor` = `"cursor-<N>"`, first page when
/// absent), accepts archive PATCHes, and logs every request line.
pub struct FixtureStore {
    pub url: String,
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl FixtureStore {
    pub fn request_lines(&self) -> Vec<String> {
        self.requests.lock().expect("request log").clone()
    }

    pub fn patched_ids(&self) -> Vec<String> {
        self.request_lines()
            .iter()
            .filter_map(|line| line.strip_prefix("PATCH /records/").map(str::to_string))
            .collect()
    }
}

pub fn spawn_store(pages: Vec<Value>, fail_patch_ids: &[&str]) -> FixtureStore {
    spawn(pages, fail_patch_ids, false)
}

/// Variant whose query endpoint always answers 500, for outage tests.
pub fn spawn_unavailable_store() -> FixtureStore {
    spawn(Vec::new(), &[], true)
}

fn spawn(pages: Vec<Value>, fail_patch_ids: &[&str], fail_queries: bool) -> FixtureStore {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind fixture listener");
    let url = format!("http://{}", listener.local_addr().expect("fixture addr"));
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);
    let fail: Vec<String> = fail_patch_ids.iter().map(|s| s.to_string()).collect();
    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(stream) = stream else { break };
            let _ = handle(stream, &pages, &fail, fail_queries, &log);
        }
    });
    FixtureStore { url, requests }
}

fn handle(
    mut stream: TcpStream,
    pages: &[Value],
    fail_patch_ids: &[String],
    fail_queries: bool,
    log: &Arc<Mutex<Vec<String>>>,
) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let path = parts.next().unwrap_or("").to_string();

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line)?;
        if line == "\r\n" || line == "\n" || line.is_empty() {
            break;
        }
        if let Some(v) = line.to_ascii_lowercase().strip_prefix("content-length:") {
            content_length = v.trim().parse().unwrap_or(0);
        }
    }
    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body)?;
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    log.lock().expect("request log").push(format!("{} {}", method, path));

    let (status, payload) = route(&method, &path, &body, pages, fail_patch_ids, fail_queries);
    let text = payload.to_string();
    write!(
        stream,
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        text.len(),
        text
    )
}

fn route(
    method: &str,
    path: &str,
    body: &Value,
    pages: &[Value],
    fail_patch_ids: &[String],
    fail_queries: bool,
) -> (&'static str, Value) {
    if method == "POST" && path.ends_with("/query") {
        if fail_queries {
            return (
                "500 Internal Server Error",
                json!({"message": "store offline"}),
            );
        }
        let index = body
            .get("start_cursor")
            .and_then(Value::as_str)
            .and_then(|c| c.trim_start_matches("cursor-").parse::<usize>().ok())
            .unwrap_or(0);
        let page = pages
            .get(index)
            .cloned()
            .unwrap_or_else(|| json!({"results": [], "has_more": false}));
        return ("200 OK", page);
    }
    if method == "PATCH" && path.starts_with("/records/") {
        let id = path.rsplit('/').next().unwrap_or("");
        if fail_patch_ids.iter().any(|f| f == id) {
            return (
                "500 Internal Server Error",
                json!({"message": "archival rejected"}),
            );
        }
        return ("200 OK", json!({"id": id, "archived": true}));
    }
    ("404 Not Found", json!({"message": "not found"}))
}

pub fn record(id: &str, title: &str, created: &str, body: &str) -> Value {
    json!({
        "id": id,
        "created_time": created,
        "url": format!("https://notes.example/{}", id),
        "properties": {
            "Name": {"title": [{"plain_text": title}]},
            "Body": {"rich_text": [{"plain_text": body}]}
        }
    })
}

pub fn page(results: Vec<Value>, next_cursor: Option<&str>) -> Value {
    match next_cursor {
        Some(cursor) => json!({
            "results": results,
            "has_more": true,
            "next_cursor": cursor
        }),
        None => json!({"results": results, "has_more": false}),
    }
}
