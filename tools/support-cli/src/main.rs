//! support-cli: support-engineering helpers behind one binary
//!
//! Usage:
//!   support-cli health-check [<url>...] [--timeout <ms>]
//!   support-cli parse-logs <file> [--error] [--cache] [--json]
//!   support-cli track-incident <id>
//!   support-cli incident-report <commands.jsonl>
//!
//! `health-check` without URLs only reports that the CLI itself is up.
//! Exit codes: 0 ok, 1 unhealthy probe or runtime failure, 2 usage error.

use std::env;
use std::fs;
use std::io;
use std::process;

use health_check::{summarize, Config, HealthCheckError, HealthChecker, ProbeResult};
use incident_tracker::{commands, IncidentStore, TrackerError};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: support-cli <command> [args]

Commands:
  health-check [<url>...] [--timeout <ms>]   Probe URLs concurrently (no URLs: self check)
  parse-logs <file> [--error] [--cache] [--json]
                                             Print log lines, 503 lines, or cache stats
  track-incident <id>                        Announce tracking of an incident id
  incident-report <commands.jsonl>           Replay incident commands, print Markdown report";

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("cannot read {path}: {source}")]
    Io { path: String, source: io::Error },

    #[error(transparent)]
    HealthCheck(#[from] HealthCheckError),

    #[error("{path}:{line}: {source}")]
    Incident {
        path: String,
        line: usize,
        source: TrackerError,
    },

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    HealthCheck {
        urls: Vec<String>,
        timeout_ms: Option<u64>,
    },
    ParseLogs {
        file: String,
        errors_only: bool,
        cache: bool,
        json: bool,
    },
    TrackIncident {
        id: u64,
    },
    IncidentReport {
        file: String,
    },
}

fn parse_args(args: &[String]) -> Result<Command, CliError> {
    let (name, rest) = args
        .split_first()
        .ok_or_else(|| CliError::usage("missing command"))?;

    match name.as_str() {
        "health-check" => {
            let mut urls = Vec::new();
            let mut timeout_ms = None;
            let mut iter = rest.iter();
            while let Some(arg) = iter.next() {
                if arg == "--timeout" {
                    let raw = iter
                        .next()
                        .ok_or_else(|| CliError::usage("--timeout needs a value in milliseconds"))?;
                    let ms = raw
                        .parse()
                        .map_err(|_| CliError::usage(format!("invalid --timeout value: {}", raw)))?;
                    timeout_ms = Some(ms);
                } else if arg.starts_with('-') {
                    return Err(CliError::usage(format!("unknown option: {}", arg)));
                } else {
                    urls.push(arg.clone());
                }
            }
            Ok(Command::HealthCheck { urls, timeout_ms })
        }
        "parse-logs" => {
            let mut file = None;
            let (mut errors_only, mut cache, mut json) = (false, false, false);
            for arg in rest {
                match arg.as_str() {
                    "--error" => errors_only = true,
                    "--cache" => cache = true,
                    "--json" => json = true,
                    a if a.starts_with('-') => {
                        return Err(CliError::usage(format!("unknown option: {}", a)))
                    }
                    a if file.is_none() => file = Some(a.to_string()),
                    a => return Err(CliError::usage(format!("unexpected argument: {}", a))),
                }
            }
            let file = file.ok_or_else(|| CliError::usage("parse-logs needs a <file>"))?;
            Ok(Command::ParseLogs {
                file,
                errors_only,
                cache,
                json,
            })
        }
        "track-incident" => match rest {
            [raw] => {
                let id = raw
                    .parse()
                    .map_err(|_| CliError::usage(format!("incident id must be an integer: {}", raw)))?;
                Ok(Command::TrackIncident { id })
            }
            _ => Err(CliError::usage("track-incident needs exactly one <id>")),
        },
        "incident-report" => match rest {
            [file] => Ok(Command::IncidentReport { file: file.clone() }),
            _ => Err(CliError::usage("incident-report needs exactly one <file>")),
        },
        other => Err(CliError::usage(format!("unknown command: {}", other))),
    }
}

fn read_file(path: &str) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_string(),
        source,
    })
}

fn format_probe(result: &ProbeResult) -> String {
    let tag = if result.healthy { "OK" } else { "FAIL" };
    let outcome = match (&result.status, &result.error) {
        (_, Some(err)) => err.clone(),
        (Some(status), None) => status.to_string(),
        (None, None) => "-".to_string(),
    };
    format!("[{}] {} {} ({}ms)", tag, result.url, outcome, result.response_time_ms)
}

/// `--timeout` wins outright; the environment is only consulted without it.
fn resolve_config(
    timeout_ms: Option<u64>,
    from_env: impl FnOnce() -> Result<Config, HealthCheckError>,
) -> Result<Config, CliError> {
    match timeout_ms {
        Some(ms) => Ok(Config::with_timeout_ms(ms)),
        None => Ok(from_env()?),
    }
}

async fn run_health_check(urls: &[String], timeout_ms: Option<u64>) -> Result<i32, CliError> {
    if urls.is_empty() {
        println!("API health check: OK");
        return Ok(0);
    }

    let config = resolve_config(timeout_ms, Config::from_env)?;
    let checker = HealthChecker::new(config)?;
    let results = checker.check(urls).await;

    for result in &results {
        println!("{}", format_probe(result));
    }
    let summary = summarize(&results);
    println!("{}/{} healthy", summary.healthy, summary.total);
    Ok(if summary.unhealthy > 0 { 1 } else { 0 })
}

fn render_parse_logs(content: &str, errors_only: bool, cache: bool, json: bool) -> Result<String, CliError> {
    if json {
        return Ok(serde_json::to_string_pretty(&log_scanner::scan(content))?);
    }

    let mut out: Vec<String> = Vec::new();
    if errors_only {
        out.extend(log_scanner::parse_origin_errors(content));
    } else if !cache {
        out.extend(log_scanner::split_lines(content).into_iter().map(str::to_string));
    }

    if cache {
        let stats = log_scanner::analyze_cache_performance(&log_scanner::split_lines(content));
        out.push(format!(
            "Cache hit rate: {:.2}% ({} hits, {} misses)",
            stats.hit_rate * 100.0,
            stats.hit_count,
            stats.miss_count
        ));
    }
    Ok(out.join("\n"))
}

fn run_parse_logs(file: &str, errors_only: bool, cache: bool, json: bool) -> Result<i32, CliError> {
    let content = read_file(file)?;
    let rendered = render_parse_logs(&content, errors_only, cache, json)?;
    if !rendered.is_empty() {
        println!("{}", rendered);
    }
    Ok(0)
}

/// Replay command lines into a fresh store; the first bad line aborts with `path:line`.
fn render_incident_report(path: &str, content: &str) -> Result<String, CliError> {
    let mut store = IncidentStore::new();

    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        commands::parse_line(trimmed)
            .and_then(|cmd| commands::execute(&mut store, &cmd))
            .map_err(|source| CliError::Incident {
                path: path.to_string(),
                line: idx + 1,
                source,
            })?;
    }

    Ok(store.generate_markdown_report())
}

fn run_incident_report(file: &str) -> Result<i32, CliError> {
    let content = read_file(file)?;
    println!("{}", render_incident_report(file, &content)?);
    Ok(0)
}

async fn run(command: Command) -> Result<i32, CliError> {
    match command {
        Command::HealthCheck { urls, timeout_ms } => run_health_check(&urls, timeout_ms).await,
        Command::ParseLogs {
            file,
            errors_only,
            cache,
            json,
        } => run_parse_logs(&file, errors_only, cache, json),
        Command::TrackIncident { id } => {
            println!("Tracking incident {}", id);
            Ok(0)
        }
        Command::IncidentReport { file } => run_incident_report(&file),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("support-cli: {}", e);
            eprintln!("{}", USAGE);
            process::exit(2);
        }
    };

    tracing::debug!(?command, "dispatching");
    match run(command).await {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("support-cli: {}", e);
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn health_check_without_urls() {
        assert_eq!(
            parse_args(&args(&["health-check"])).unwrap(),
            Command::HealthCheck {
                urls: vec![],
                timeout_ms: None
            }
        );
    }

    #[test]
    fn health_check_with_urls_and_timeout() {
        assert_eq!(
            parse_args(&args(&["health-check", "http://a", "--timeout", "250", "http://b"])).unwrap(),
            Command::HealthCheck {
                urls: args(&["http://a", "http://b"]),
                timeout_ms: Some(250)
            }
        );
        assert!(matches!(
            parse_args(&args(&["health-check", "--timeout", "soon"])),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn parse_logs_flags() {
        assert_eq!(
            parse_args(&args(&["parse-logs", "edge.log", "--error"])).unwrap(),
            Command::ParseLogs {
                file: "edge.log".into(),
                errors_only: true,
                cache: false,
                json: false
            }
        );
        assert!(parse_args(&args(&["parse-logs", "--error"])).is_err());
        assert!(parse_args(&args(&["parse-logs", "a.log", "b.log"])).is_err());
    }

    #[test]
    fn track_incident_requires_numeric_id() {
        assert_eq!(
            parse_args(&args(&["track-incident", "17"])).unwrap(),
            Command::TrackIncident { id: 17 }
        );
        assert!(parse_args(&args(&["track-incident", "INC-17"])).is_err());
        assert!(parse_args(&args(&["track-incident"])).is_err());
    }

    #[test]
    fn unknown_or_missing_command_is_usage_error() {
        assert!(matches!(parse_args(&args(&[])), Err(CliError::Usage(_))));
        assert!(matches!(parse_args(&args(&["deploy"])), Err(CliError::Usage(_))));
    }

    #[test]
    fn probe_lines_show_status_or_error() {
        let ok = ProbeResult::responded("http://a", 200, true, 12);
        assert_eq!(format_probe(&ok), "[OK] http://a 200 (12ms)");
        let timeout = ProbeResult::failed("http://b", 100, "Timeout");
        assert_eq!(format_probe(&timeout), "[FAIL] http://b Timeout (100ms)");
    }

    #[test]
    fn explicit_timeout_skips_env_config() {
        let config = resolve_config(Some(100), || {
            Err(HealthCheckError::config("HEALTH_CHECK_TIMEOUT_MS", "must be a whole number of milliseconds"))
        })
        .unwrap();
        assert_eq!(config.timeout_ms, 100);
    }

    #[test]
    fn env_config_used_without_timeout_flag() {
        let config = resolve_config(None, || Ok(Config::with_timeout_ms(750))).unwrap();
        assert_eq!(config.timeout_ms, 750);

        let err = resolve_config(None, || Err(HealthCheckError::config("HEALTH_CHECK_TIMEOUT_MS", "bad")))
            .unwrap_err();
        assert!(matches!(err, CliError::HealthCheck(_)));
    }

    const EDGE_LOG: &str = "\
GET /img/logo.png 200 HIT
GET /api/cart 503 MISS
GET /api/user 200 MISS
GET /healthz 200
";

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parse_logs_default_prints_every_line() {
        let file = write_temp(EDGE_LOG);
        let content = read_file(file.path().to_str().unwrap()).unwrap();
        let out = render_parse_logs(&content, false, false, false).unwrap();
        assert_eq!(out, EDGE_LOG.trim_end());
    }

    #[test]
    fn parse_logs_error_flag_keeps_only_503_lines() {
        let out = render_parse_logs(EDGE_LOG, true, false, false).unwrap();
        assert_eq!(out, "GET /api/cart 503 MISS");
    }

    #[test]
    fn parse_logs_cache_flag_alone_prints_only_summary() {
        let out = render_parse_logs(EDGE_LOG, false, true, false).unwrap();
        assert_eq!(out, "Cache hit rate: 33.33% (1 hits, 2 misses)");
    }

    #[test]
    fn parse_logs_json_is_full_scan_report() {
        let out = render_parse_logs(EDGE_LOG, true, true, true).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["total_lines"], 4);
        assert_eq!(json["origin_errors"], serde_json::json!(["GET /api/cart 503 MISS"]));
        assert_eq!(json["cache"]["hit_count"], 1);
        assert_eq!(json["cache"]["miss_count"], 2);
    }

    #[test]
    fn missing_log_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.log");
        let err = read_file(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }

    #[test]
    fn incident_report_skips_blank_lines() {
        let file = write_temp(concat!(
            r#"{"op":"create","title":"Cart 503s","severity":"high","affected_services":["cart"],"detected_at":"2025-03-02T08:00:00Z"}"#,
            "\n\n   \n",
            r#"{"op":"resolve","id":1,"rca":"Pool exhausted","resolved_at":"2025-03-02T09:30:00Z"}"#,
            "\n",
        ));
        let path = file.path().to_str().unwrap();
        let report = render_incident_report(path, &read_file(path).unwrap()).unwrap();
        assert!(report.contains("## Incident #1: Cart 503s"));
        assert!(report.contains("- **RCA:** Pool exhausted"));
        assert!(report.ends_with("**MTTR:** 1.50 hours"));
    }

    #[test]
    fn incident_report_first_bad_line_names_path_and_line() {
        let file = write_temp(concat!(
            r#"{"op":"create","title":"a","severity":"low"}"#,
            "\n\n",
            r#"{"op":"resolve","id":9,"rca":"n/a"}"#,
            "\n",
            "not json\n",
        ));
        let path = file.path().to_str().unwrap();
        let err = render_incident_report(path, &read_file(path).unwrap()).unwrap_err();
        assert!(matches!(err, CliError::Incident { line: 3, .. }));
        assert_eq!(
            err.to_string(),
            format!("{}:3: validation: id: no incident with id 9", path)
        );
    }
}
