//! Command handlers.
//!
//! Each handler returns a [`Report`] holding both renderings and the exit
//! code; `main` only prints and exits.

use anyhow::{anyhow, Context};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{info, warn};

use access::{check, visible_sections, AuditLog, Directory, Principal, SessionProvider};
use casework::{sections_for, validate_sections, SectionId};

use crate::config::{Command, ConfigError, DeskConfig};

/// Validation ran but mandatory sections are missing, or a check was denied.
pub const EXIT_NEGATIVE: i32 = 2;

/// Outcome of one command.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub exit_code: i32,
    pub json: Value,
    pub text: String,
}

impl Report {
    fn ok(json: Value, text: String) -> Self {
        Self {
            exit_code: 0,
            json,
            text,
        }
    }

    pub fn render(&self, as_json: bool) -> String {
        if as_json {
            serde_json::to_string_pretty(&self.json).unwrap_or_else(|_| self.json.to_string())
        } else {
            self.text.clone()
        }
    }
}

/// Account directory plus the audit trail for this run.
pub struct Desk {
    pub directory: Directory,
    pub audit: AuditLog,
}

impl Desk {
    pub fn from_config(config: &DeskConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            directory: config.directory()?,
            audit: config.audit_log(),
        })
    }

    fn principal(&self, username: &str) -> anyhow::Result<Principal> {
        let account = self
            .directory
            .account(username)
            .ok_or_else(|| anyhow!("Unknown account: {username}"))?;
        Ok(self.directory.principal_for(account, Utc::now()))
    }
}

pub async fn run(desk: &mut Desk, command: &Command) -> anyhow::Result<Report> {
    match command {
        Command::Check { username, token } => check_permission(desk, username, token),
        Command::Nav { username } => nav(desk, username),
        Command::Sections { case_type } => sections(case_type),
        Command::Validate {
            case_type,
            sections,
        } => validate(case_type, sections),
        Command::Roles => Ok(roles(desk)),
        Command::Login { username, password } => login(desk, username, password).await,
    }
}

fn check_permission(desk: &mut Desk, username: &str, token: &str) -> anyhow::Result<Report> {
    let principal = desk.principal(username)?;
    let allowed = check(Some(&principal.permissions), token)? && principal.is_active;

    let audit_id = desk.audit.record(
        &principal,
        "permission_check",
        "permission",
        token,
        json!({ "allowed": allowed }),
    );
    info!(user = %principal.id, permission = %token, allowed, "Permission checked");

    let verdict = if allowed { "allow" } else { "deny" };
    Ok(Report {
        exit_code: if allowed { 0 } else { EXIT_NEGATIVE },
        json: json!({
            "username": principal.username,
            "token": token,
            "allowed": allowed,
            "permission_digest": principal.permissions.digest(),
            "audit_id": audit_id,
        }),
        text: format!("{verdict}: {} {token}", principal.username),
    })
}

fn nav(desk: &Desk, username: &str) -> anyhow::Result<Report> {
    let principal = desk.principal(username)?;
    let visible = visible_sections(&principal);

    let text = visible
        .iter()
        .map(|s| format!("{:<16} {}", s.label(), s.required_permission()))
        .collect::<Vec<_>>()
        .join("\n");
    Ok(Report::ok(
        json!({ "username": principal.username, "sections": visible }),
        text,
    ))
}

fn sections(case_type: &str) -> anyhow::Result<Report> {
    let sections = sections_for(case_type)?;

    let text = sections
        .iter()
        .map(|s| {
            let marker = if s.mandatory { " *" } else { "" };
            format!("{:<12} {}{marker}", s.id.as_str(), s.label)
        })
        .collect::<Vec<_>>()
        .join("\n");
    Ok(Report::ok(json!({ "case_type": case_type, "sections": sections }), text))
}

fn validate(case_type: &str, populated: &[String]) -> anyhow::Result<Report> {
    for name in populated {
        if name.parse::<SectionId>().is_err() {
            warn!(section = %name, "Ignoring unrecognized section");
        }
    }
    let result = validate_sections(case_type, populated)?;

    let text = if result.ok {
        format!("{case_type}: complete")
    } else {
        let missing: Vec<&str> = result.missing.iter().map(|s| s.label()).collect();
        format!("{case_type}: missing {}", missing.join(", "))
    };
    Ok(Report {
        exit_code: if result.ok { 0 } else { EXIT_NEGATIVE },
        json: json!({ "case_type": case_type, "ok": result.ok, "missing": result.missing }),
        text,
    })
}

fn roles(desk: &Desk) -> Report {
    let summaries = desk.directory.roles().summaries();

    let mut lines = vec![format!(
        "{:<16} {:>5} {:>6} {:>8} {:>8}",
        "ROLE", "USERS", "PERMS", "CRITICAL", "COVERAGE"
    )];
    for s in &summaries {
        lines.push(format!(
            "{:<16} {:>5} {:>6} {:>8} {:>7}%",
            s.role_id, s.user_count, s.total_permissions, s.critical_permissions, s.coverage_percent
        ));
    }
    Report::ok(json!({ "roles": summaries }), lines.join("\n"))
}

async fn login(desk: &mut Desk, username: &str, password: &str) -> anyhow::Result<Report> {
    let session = desk
        .directory
        .login(username, password)
        .await
        .with_context(|| format!("Login failed for {username}"))?;
    let principal = &session.principal;

    desk.audit.record(
        principal,
        "login",
        "session",
        &session.session_id,
        json!({ "role": principal.role }),
    );

    let text = format!(
        "{} ({}, {}) signed in with {} permission(s), {} section(s) visible",
        principal.display_name,
        principal.username,
        principal.role,
        principal.permissions.len(),
        visible_sections(principal).len()
    );
    Ok(Report::ok(
        json!({
            "session_id": session.session_id,
            "principal": principal,
            "permission_digest": principal.permissions.digest(),
        }),
        text,
    ))
}
