use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::Result;
use reqwest::header::{HeaderMap, HeaderValue};

use crate::error::*;

pub const DEFAULT_IP_API: &str = "https://api.ipify.org";

/// Cloudflare dynamic DNS updater
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the options file
    #[arg(long, default_value = "dyndns.cfg")]
    pub optfile: PathBuf,

    /// Only log errors
    #[arg(long)]
    pub quiet: bool,

    /// Cloudflare API key
    #[arg(long = "cfapikey", env = "CF_API_KEY")]
    pub cf_api_key: Option<String>,

    /// Cloudflare account email
    #[arg(long = "cfemail", env = "CF_ACCOUNT_EMAIL")]
    pub cf_email: Option<String>,

    /// Domain the record lives under, e.g. example.com
    #[arg(long)]
    pub domain: Option<String>,

    /// Record to keep updated, e.g. home.example.com
    #[arg(long)]
    pub record: Option<String>,

    /// URL that returns the caller's public IP as plain text
    #[arg(long = "ipapi")]
    pub ip_api: Option<String>,
}

/// Typed contents of the options file. Keys and values are stored verbatim,
/// only whole lines are trimmed.
#[derive(Debug, Default, PartialEq)]
pub struct Options {
    pub strings: HashMap<String, String>,
    pub bools: HashMap<String, bool>,
    pub ints: HashMap<String, i64>,
}

impl Options {
    pub fn load(path: &Path) -> Result<Options, Error> {
        let data = fs::read_to_string(path).map_err(|source| Error::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&data)
    }

    pub fn parse(data: &str) -> Result<Options, Error> {
        let mut options = Options::default();
        let mut section = String::new();

        for line in data.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // A header switches sections only when both brackets are present,
            // anything else falls through to the key=value check.
            if let Some(name) = line
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
            {
                section = name.to_string();
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(Error::InvalidLine(line.to_string()));
            };

            match section.as_str() {
                "string" => {
                    options.strings.insert(key.to_string(), value.to_string());
                }
                "bool" => {
                    let parsed = value.parse().map_err(|_| Error::InvalidBool {
                        key: key.to_string(),
                        value: value.to_string(),
                    })?;
                    options.bools.insert(key.to_string(), parsed);
                }
                "int" => {
                    let parsed = value.parse().map_err(|_| Error::InvalidInt {
                        key: key.to_string(),
                        value: value.to_string(),
                    })?;
                    options.ints.insert(key.to_string(), parsed);
                }
                _ => return Err(Error::UnknownSection(section.clone())),
            }
        }

        Ok(options)
    }
}

/// Runtime parameters after merging flags over the options file.
/// Resolved once at startup, read-only afterwards.
#[derive(Debug)]
pub struct Params {
    pub api_key: String,
    pub email: String,
    pub domain: String,
    pub record: String,
    pub ip_api: String,
    pub quiet: bool,
}

impl Params {
    pub fn resolve(args: Args, options: &Options) -> Result<Params, Error> {
        // quiet only latches on: the file can force it, flags can't unset it
        let quiet = args.quiet || options.bools.get("quiet").copied().unwrap_or(false);

        Ok(Params {
            api_key: pick(args.cf_api_key, options, "cfapikey")?,
            email: pick(args.cf_email, options, "cfemail")?,
            domain: pick(args.domain, options, "domain")?,
            record: pick(args.record, options, "record")?,
            ip_api: pick(args.ip_api, options, "ipapi")
                .unwrap_or_else(|_| DEFAULT_IP_API.to_string()),
            quiet,
        })
    }

    pub fn auth_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::with_capacity(3);
        headers.insert("X-Auth-Email", self.email.parse()?);
        headers.insert("Authorization", format!("Bearer {}", self.api_key).parse()?);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

/// A non-empty flag wins over the options file; an empty value in either
/// place counts as absent.
fn pick(flag: Option<String>, options: &Options, key: &'static str) -> Result<String, Error> {
    flag.filter(|value| !value.is_empty())
        .or_else(|| {
            options
                .strings
                .get(key)
                .filter(|value| !value.is_empty())
                .cloned()
        })
        .ok_or(Error::MissingParameter(key))
}
