//! Command-line client for the pastebin API.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use pastebin_core::models::{Expiration, Language};
use pastebin_core::{DEFAULT_CLI_SERVER_URL, USER_HEADER};
use reqwest::Method;
use serde_json::Value;
use std::io::{self, Read};
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "pbin", about = "Pastebin CLI", version)]
struct Cli {
    /// Server URL (can also be set via PASTEBIN_SERVER env var)
    #[arg(short, long, env = "PASTEBIN_SERVER", global = true)]
    server: Option<String>,

    /// User id to act as (can also be set via PASTEBIN_USER env var)
    #[arg(short, long, env = "PASTEBIN_USER", global = true)]
    user: Option<String>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    json: bool,

    /// Print timing for API requests
    #[arg(long, global = true)]
    timing: bool,

    /// Request timeout in seconds
    #[arg(short = 't', long, default_value = "30")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Create a paste from a file or stdin
    New {
        #[arg(short, long)]
        file: Option<String>,
        /// Title (defaults to the file name)
        #[arg(short = 'T', long)]
        title: Option<String>,
        #[arg(short, long, value_parser = parse_language)]
        language: Option<String>,
        /// One of: never, 10m, 1h, 1d, 7d, 30d
        #[arg(short, long, value_parser = parse_expiration)]
        expires: Option<String>,
    },
    /// Print a paste's content
    Get { id: String },
    /// List recent public pastes
    List {
        #[arg(short, long, default_value = "1")]
        page: u32,
    },
    /// Search public pastes by title or content
    Search {
        query: String,
        #[arg(short, long, default_value = "1")]
        page: u32,
    },
    /// List your own pastes
    Mine,
    /// Delete one of your pastes
    Delete { id: String },
    /// Flip one of your pastes between public and private
    Toggle { id: String },
}

fn parse_language(raw: &str) -> Result<String, String> {
    raw.parse::<Language>()
        .map(|language| language.as_str().to_string())
        .map_err(|_| {
            let supported: Vec<&str> = Language::ALL.iter().map(|l| l.as_str()).collect();
            format!("unsupported language (expected one of: {})", supported.join(", "))
        })
}

fn parse_expiration(raw: &str) -> Result<String, String> {
    raw.parse::<Expiration>()
        .map(|expiration| expiration.code().to_string())
        .map_err(|_| {
            let codes: Vec<&str> = Expiration::ALL.iter().map(|e| e.code()).collect();
            format!("unsupported expiration (expected one of: {})", codes.join(", "))
        })
}

fn log_timing(timing: bool, label: &str, duration: Duration) {
    if timing {
        eprintln!(
            "[timing] {}: {:.1} ms",
            label,
            duration.as_secs_f64() * 1000.0
        );
    }
}

fn log_timing_parts(timing: bool, label: &str, request: Duration, parse: Option<Duration>) {
    if !timing {
        return;
    }
    if let Some(parse) = parse {
        let total = request + parse;
        eprintln!(
            "[timing] {}: request {:.1} ms, parse {:.1} ms, total {:.1} ms",
            label,
            request.as_secs_f64() * 1000.0,
            parse.as_secs_f64() * 1000.0,
            total.as_secs_f64() * 1000.0
        );
    } else {
        log_timing(timing, label, request);
    }
}

fn error_message_for_response(status: reqwest::StatusCode, body: &str) -> String {
    if body.trim().is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();
    }

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return value
            .get("error")
            .and_then(|v| v.as_str())
            .unwrap_or(body)
            .to_string();
    }

    body.to_string()
}

async fn ensure_success_or_exit(res: reqwest::Response, action: &str) -> reqwest::Response {
    let status = res.status();
    if status.is_success() {
        return res;
    }

    let body = match res.text().await {
        Ok(body) => body,
        Err(err) => format!("failed to read error response body: {}", err),
    };
    let message = error_message_for_response(status, &body);
    eprintln!("{} failed ({}): {}", action, status, message);
    std::process::exit(1);
}

fn exit_on_format_error(action: &str, rendered: Result<String, String>) -> String {
    match rendered {
        Ok(output) => output,
        Err(message) => {
            eprintln!("{} failed: {}", action, message);
            std::process::exit(1);
        }
    }
}

fn paste_id_and_title(paste: &Value) -> Option<(&str, &str)> {
    let id = paste.get("id").and_then(Value::as_str)?;
    let title = paste.get("title").and_then(Value::as_str)?;
    Some((id, title))
}

fn pretty(value: &Value) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|err| format!("response encoding error: {}", err))
}

fn format_summary_output(pastes: &[Value], json: bool) -> Result<String, String> {
    if json {
        return pretty(&Value::Array(pastes.to_vec()));
    }

    let mut rows = Vec::with_capacity(pastes.len());
    for (index, p) in pastes.iter().enumerate() {
        let Some((id, title)) = paste_id_and_title(p) else {
            return Err(format!(
                "response item {} missing 'id' or 'title' field",
                index
            ));
        };
        let views = p.get("views").and_then(Value::as_u64).unwrap_or(0);
        let visibility = match p.get("is_public").and_then(Value::as_bool) {
            Some(false) => "private",
            _ => "public",
        };
        rows.push(format!("{:<12} {:>6} {:<8} {}", id, views, visibility, title));
    }

    Ok(rows.join("\n"))
}

fn format_page_output(page: &Value, json: bool) -> Result<String, String> {
    if json {
        return pretty(page);
    }

    let pastes = page
        .get("pastes")
        .and_then(Value::as_array)
        .ok_or_else(|| "response missing 'pastes' field".to_string())?;
    let current = page.get("current_page").and_then(Value::as_u64).unwrap_or(1);
    let total_pages = page.get("total_pages").and_then(Value::as_u64).unwrap_or(0);
    let total = page.get("total").and_then(Value::as_u64).unwrap_or(0);

    let rows = format_summary_output(pastes, false)?;
    let footer = format!("Page {} of {} ({} total)", current, total_pages, total);
    if rows.is_empty() {
        Ok(footer)
    } else {
        Ok(format!("{}\n{}", rows, footer))
    }
}

fn format_get_output(paste: &Value, json: bool) -> Result<String, String> {
    if json {
        return pretty(paste);
    }

    paste
        .get("content")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| "response missing 'content' field".to_string())
}

fn format_created_output(paste: &Value, json: bool) -> Result<String, String> {
    if json {
        return pretty(paste);
    }

    let (id, title) = paste_id_and_title(paste)
        .ok_or_else(|| "response missing 'id' or 'title' field".to_string())?;
    match paste.get("expires_at").and_then(Value::as_str) {
        Some(expires_at) => Ok(format!("Created: {} ({}), expires {}", title, id, expires_at)),
        None => Ok(format!("Created: {} ({})", title, id)),
    }
}

fn format_delete_output(id: &str, response: &Value, json: bool) -> Result<String, String> {
    if json {
        return pretty(response);
    }

    Ok(format!("Deleted paste: {}", id))
}

fn format_toggle_output(paste: &Value, json: bool) -> Result<String, String> {
    if json {
        return pretty(paste);
    }

    let id = paste
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| "response missing 'id' field".to_string())?;
    let is_public = paste
        .get("is_public")
        .and_then(Value::as_bool)
        .ok_or_else(|| "response missing 'is_public' field".to_string())?;
    let visibility = if is_public { "public" } else { "private" };
    Ok(format!("Paste {} is now {}", id, visibility))
}

fn default_title(file: Option<&str>) -> String {
    file.and_then(|path| Path::new(path).file_name())
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "Untitled".to_string())
}

fn api_url(server: &str, segments: &[&str]) -> Result<reqwest::Url, String> {
    let mut url = reqwest::Url::parse(server)
        .map_err(|err| format!("Invalid server URL '{}': {}", server, err))?;
    let mut path = url
        .path_segments_mut()
        .map_err(|_| "Server URL cannot be used as an API base".to_string())?;
    path.pop_if_empty();
    for segment in segments {
        path.push(segment);
    }
    drop(path);
    Ok(url)
}

fn api_url_or_exit(server: &str, action: &str, segments: &[&str]) -> reqwest::Url {
    match api_url(server, segments) {
        Ok(url) => url,
        Err(message) => {
            eprintln!("{} failed: {}", action, message);
            std::process::exit(1);
        }
    }
}

fn normalize_server(server: String) -> String {
    if let Ok(mut url) = reqwest::Url::parse(&server) {
        let should_normalize_localhost =
            url.scheme().eq_ignore_ascii_case("http") && url.host_str() == Some("localhost");
        if should_normalize_localhost && url.set_host(Some("127.0.0.1")).is_err() {
            return server;
        }
        let mut normalized = url.to_string();
        while normalized.ends_with('/') {
            normalized.pop();
        }
        return normalized;
    }
    server
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn resolve_server(server: Option<String>) -> String {
    non_blank(server).unwrap_or_else(|| DEFAULT_CLI_SERVER_URL.to_string())
}

/// HTTP client bound to one server and, optionally, one user identity.
struct ApiClient {
    http: reqwest::Client,
    server: String,
    user: Option<String>,
    timing: bool,
}

impl ApiClient {
    fn request(&self, method: Method, action: &str, segments: &[&str]) -> reqwest::RequestBuilder {
        let endpoint = api_url_or_exit(&self.server, action, segments);
        let builder = self.http.request(method, endpoint);
        match &self.user {
            Some(user) => builder.header(USER_HEADER, user),
            None => builder,
        }
    }

    async fn send_json(
        &self,
        builder: reqwest::RequestBuilder,
        action: &str,
        label: &str,
    ) -> Result<Value, reqwest::Error> {
        let request_start = Instant::now();
        let res = builder.send().await?;
        let request_elapsed = request_start.elapsed();
        let res = ensure_success_or_exit(res, action).await;

        let parse_start = Instant::now();
        let value: Value = res.json().await?;
        let parse_elapsed = parse_start.elapsed();

        log_timing_parts(self.timing, label, request_elapsed, Some(parse_elapsed));
        Ok(value)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Cli {
        server,
        user,
        json,
        timing,
        timeout,
        command,
    } = Cli::parse();

    if let Commands::Completions { shell } = &command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let client = ApiClient {
        http: reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()?,
        server: normalize_server(resolve_server(server)),
        user: non_blank(user),
        timing,
    };

    match command {
        Commands::Completions { .. } => unreachable!("completions handled before client setup"),
        Commands::New {
            file,
            title,
            language,
            expires,
        } => {
            let content = if let Some(path) = file.as_deref() {
                std::fs::read_to_string(path)?
            } else {
                let mut buffer = String::new();
                io::stdin().read_to_string(&mut buffer)?;
                buffer
            };

            let mut body = serde_json::json!({
                "title": title.unwrap_or_else(|| default_title(file.as_deref())),
                "content": content,
            });
            if let Some(language) = language {
                body["language"] = language.into();
            }
            if let Some(expires) = expires {
                body["expiration"] = expires.into();
            }

            let request = client.request(Method::POST, "New", &["api", "paste"]).json(&body);
            let paste = client.send_json(request, "New", "new").await?;
            println!("{}", exit_on_format_error("New", format_created_output(&paste, json)));
        }
        Commands::Get { id } => {
            let request = client.request(Method::GET, "Get", &["api", "paste", id.as_str()]);
            let paste = client.send_json(request, "Get", "get").await?;
            println!("{}", exit_on_format_error("Get", format_get_output(&paste, json)));
        }
        Commands::List { page } => {
            let request = client
                .request(Method::GET, "List", &["api", "pastes"])
                .query(&[("page", page)]);
            let listing = client.send_json(request, "List", "list").await?;
            println!("{}", exit_on_format_error("List", format_page_output(&listing, json)));
        }
        Commands::Search { query, page } => {
            let request = client
                .request(Method::GET, "Search", &["api", "search"])
                .query(&[("q", query.as_str()), ("page", page.to_string().as_str())]);
            let results = client.send_json(request, "Search", "search").await?;
            println!("{}", exit_on_format_error("Search", format_page_output(&results, json)));
        }
        Commands::Mine => {
            let request = client.request(Method::GET, "Mine", &["api", "me", "pastes"]);
            let mine = client.send_json(request, "Mine", "mine").await?;
            let pastes = mine.as_array().cloned().unwrap_or_default();
            let output = exit_on_format_error("Mine", format_summary_output(&pastes, json));
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Commands::Delete { id } => {
            let request = client.request(Method::DELETE, "Delete", &["api", "paste", id.as_str()]);
            let response = client.send_json(request, "Delete", "delete").await?;
            println!(
                "{}",
                exit_on_format_error("Delete", format_delete_output(&id, &response, json))
            );
        }
        Commands::Toggle { id } => {
            let request = client.request(
                Method::POST,
                "Toggle",
                &["api", "paste", id.as_str(), "visibility"],
            );
            let paste = client.send_json(request, "Toggle", "toggle").await?;
            println!("{}", exit_on_format_error("Toggle", format_toggle_output(&paste, json)));
        }
    }

    Ok(())
}
