use anyhow::{bail, Context, Result};

use crate::extraction::patterns::{
    NameTemplate, DEFAULT_NAME_TEMPLATE_LENGTHS, DEFAULT_SKILLS, NAME_TEMPLATE_LENGTHS,
};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub skills: Vec<String>,
    pub name_templates: Vec<NameTemplate>,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            skills: match std::env::var("SKILLS_VOCABULARY") {
                Ok(raw) => parse_skills(&raw)?,
                Err(_) => DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect(),
            },
            name_templates: match std::env::var("NAME_TEMPLATES") {
                Ok(raw) => parse_name_templates(&raw)?,
                Err(_) => DEFAULT_NAME_TEMPLATE_LENGTHS
                    .iter()
                    .map(|&len| NameTemplate::proper_nouns(len))
                    .collect(),
            },
            max_upload_bytes: match std::env::var("MAX_UPLOAD_BYTES") {
                Ok(raw) => raw
                    .trim()
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
            },
        })
    }
}

/// Comma-separated skill names; blanks dropped, order kept.
fn parse_skills(raw: &str) -> Result<Vec<String>> {
    let skills: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if skills.is_empty() {
        bail!("SKILLS_VOCABULARY is set but lists no skills");
    }
    Ok(skills)
}

/// Comma-separated proper-noun run lengths, in the order they are tried.
fn parse_name_templates(raw: &str) -> Result<Vec<NameTemplate>> {
    let templates = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|item| -> Result<NameTemplate> {
            let len = item
                .parse::<usize>()
                .with_context(|| format!("NAME_TEMPLATES entry '{item}' is not a number"))?;
            if !NAME_TEMPLATE_LENGTHS.contains(&len) {
                bail!(
                    "NAME_TEMPLATES entry {len} is out of range {}..={}",
                    NAME_TEMPLATE_LENGTHS.start(),
                    NAME_TEMPLATE_LENGTHS.end()
                );
            }
            Ok(NameTemplate::proper_nouns(len))
        })
        .collect::<Result<Vec<_>>>()?;
    if templates.is_empty() {
        bail!("NAME_TEMPLATES is set but lists no templates");
    }
    Ok(templates)
}
