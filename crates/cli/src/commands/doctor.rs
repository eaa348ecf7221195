//! Doctor command - validate configuration and show status

use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;

use crate::args::DoctorArgs;
use crate::config::AppConfig;

#[derive(Debug, Serialize)]
struct DoctorReport {
    config: CheckResult,
    feed: CheckResult,
    llm: CheckResult,
    linkedin: CheckResult,
    overall: String,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    status: String,
    message: String,
    details: Option<serde_json::Value>,
}

impl CheckResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn warn(message: impl Into<String>) -> Self {
        Self {
            status: "warn".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    fn is_error(&self) -> bool {
        self.status == "error"
    }
}

pub async fn execute(args: DoctorArgs, config_path: Option<PathBuf>) -> Result<()> {
    let mut report = DoctorReport {
        config: CheckResult::error("Not checked"),
        feed: CheckResult::error("Not checked"),
        llm: CheckResult::error("Not checked"),
        linkedin: CheckResult::error("Not checked"),
        overall: "error".to_string(),
    };

    let config = match AppConfig::load(config_path.as_deref()) {
        Ok(c) => {
            report.config = CheckResult::ok("Configuration loaded successfully");
            Some(c)
        }
        Err(e) => {
            report.config = CheckResult::error(format!("Failed to load config: {:#}", e));
            None
        }
    };

    if let Some(ref config) = config {
        report.feed = check_feed(config);
        report.llm = check_llm(config);
        report.linkedin = check_linkedin(config);
    }

    let checks = [&report.config, &report.feed, &report.llm, &report.linkedin];
    report.overall = overall_status(&checks).to_string();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.overall == "error" {
        std::process::exit(1);
    }

    Ok(())
}

fn overall_status(checks: &[&CheckResult]) -> &'static str {
    if checks.iter().any(|c| c.is_error()) {
        "error"
    } else if checks.iter().all(|c| c.is_ok()) {
        "ok"
    } else {
        "warn"
    }
}

fn check_feed(config: &AppConfig) -> CheckResult {
    let url = config.feed.url.trim();
    if url.is_empty() {
        return CheckResult::error("Feed URL is empty");
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return CheckResult::error(format!("Feed URL is not http(s): {}", url));
    }
    if config.feed.window_hours == 0 {
        return CheckResult::warn(format!("Window is 0 hours, no entries will match: {}", url));
    }

    CheckResult::ok(format!(
        "{} ({}), window {}h",
        url, config.feed.label, config.feed.window_hours
    ))
    .with_details(serde_json::json!({
        "url": url,
        "label": config.feed.label,
        "window_hours": config.feed.window_hours,
    }))
}

fn check_llm(config: &AppConfig) -> CheckResult {
    let model = config.llm.model.as_deref().unwrap_or("(server default)");

    match config.llm.provider.as_str() {
        "stub" => match &config.llm.stub_reply {
            Some(_) => CheckResult::ok("Provider: stub (offline, fixed reply)"),
            None => CheckResult::ok("Provider: stub (offline, echo)"),
        },
        "openai_compat" => {
            if config.llm.base_url.trim().is_empty() {
                return CheckResult::error("Provider: openai_compat, base_url is empty");
            }
            CheckResult::ok(format!(
                "Provider: openai_compat, Model: {}, base_url: {}",
                model, config.llm.base_url
            ))
        }
        other => CheckResult::error(format!("Unknown provider: {}", other)),
    }
}

fn check_linkedin(config: &AppConfig) -> CheckResult {
    let token_env = &config.linkedin.access_token_env;
    let user_env = &config.linkedin.user_id_env;

    if token_env.trim().is_empty() || user_env.trim().is_empty() {
        return CheckResult::error("No env var configured for LinkedIn credentials");
    }

    // Report presence only, never the values
    let token = describe_env(token_env);
    let user = describe_env(user_env);
    let message = format!(
        "Access token: {} ({}), User id: {} ({})",
        token_env, token, user_env, user
    );

    if token == "set" && user == "set" {
        CheckResult::ok(message)
    } else {
        CheckResult::warn(message)
    }
}

fn describe_env(name: &str) -> &'static str {
    match std::env::var(name) {
        Ok(val) if !val.trim().is_empty() => "set",
        _ => "not set",
    }
}

fn print_report(report: &DoctorReport) {
    println!("trendpost Doctor Report");
    println!("=======================");
    println!();

    print_check("Config", &report.config);
    print_check("Feed", &report.feed);
    print_check("LLM Provider", &report.llm);
    print_check("LinkedIn", &report.linkedin);

    println!();
    println!("{} Overall: {}", symbol(&report.overall), report.overall.to_uppercase());

    if report.overall == "ok" {
        println!();
        println!("Ready to run! Try: trendpost run");
    }
}

fn print_check(name: &str, result: &CheckResult) {
    println!("{} {}: {}", symbol(&result.status), name, result.message);
}

fn symbol(status: &str) -> &'static str {
    match status {
        "ok" => "✓",
        "warn" => "⚠",
        _ => "✗",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overall_status() {
        let ok = CheckResult::ok("fine");
        let warn = CheckResult::warn("hmm");
        let err = CheckResult::error("bad");

        assert_eq!(overall_status(&[&ok, &ok]), "ok");
        assert_eq!(overall_status(&[&ok, &warn]), "warn");
        assert_eq!(overall_status(&[&warn, &err, &ok]), "error");
    }

    #[test]
    fn test_check_feed_rejects_non_http_url() {
        let mut config = AppConfig::default();
        config.feed.url = "ftp://example.com/feed".to_string();

        assert!(check_feed(&config).is_error());
    }

    #[test]
    fn test_check_feed_default_is_ok() {
        assert!(check_feed(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_check_llm_unknown_provider_is_error() {
        let mut config = AppConfig::default();
        config.llm.provider = "mystery".to_string();

        assert!(check_llm(&config).is_error());
    }

    #[test]
    fn test_check_linkedin_unset_vars_warn_without_values() {
        let mut config = AppConfig::default();
        config.linkedin.access_token_env = "TRENDPOST_DOCTOR_UNSET_TOKEN_91c2".to_string();
        config.linkedin.user_id_env = "TRENDPOST_DOCTOR_UNSET_USER_91c2".to_string();

        let result = check_linkedin(&config);
        assert_eq!(result.status, "warn");
        assert!(result.message.contains("TRENDPOST_DOCTOR_UNSET_TOKEN_91c2 (not set)"));
    }

    #[test]
    fn test_check_linkedin_empty_env_name_is_error() {
        let mut config = AppConfig::default();
        config.linkedin.user_id_env = " ".to_string();

        assert!(check_linkedin(&config).is_error());
    }
}
