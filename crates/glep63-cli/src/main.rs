//! CLI entry point for glep63-check.
//!
//! This module is intentionally thin: it handles argument parsing, key
//! acquisition, and exit codes. All evaluation logic lives in the
//! `glep63-domain` crate.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{ArgGroup, Parser, ValueEnum};
use glep63_domain::check_key;
use glep63_domain::model::PublicKey;
use glep63_gnupg::{GpgTool, parse_colons};
use glep63_types::Finding;
use std::io::Read;

mod output;

const COMMITTING_DEVS_URL: &str = "https://qa-reports.gentoo.org/output/committing-devs.gpg";
const ACTIVE_DEVS_URL: &str = "https://qa-reports.gentoo.org/output/active-devs.gpg";

#[derive(Parser, Debug)]
#[command(
    name = "glep63-check",
    version,
    about = "Verify OpenPGP keys against GLEP 63 requirements"
)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["all", "developers", "all_developers", "gnupg", "key_id", "keyring"])
))]
struct Cli {
    /// Verify all public keys in the local keyring.
    #[arg(short = 'a', long)]
    all: bool,

    /// Fetch and verify the committing-developer keyring.
    #[arg(short = 'd', long)]
    developers: bool,

    /// Fetch and verify the full active-developer keyring.
    #[arg(short = 'D', long)]
    all_developers: bool,

    /// Process `gpg --with-colons` output from FILE ("-" for stdin).
    #[arg(short = 'G', long, value_name = "FILE", num_args = 1..)]
    gnupg: Vec<String>,

    /// Verify local keys matching the given queries (ids, fingerprints, names).
    #[arg(short = 'k', long, value_name = "ID", num_args = 1..)]
    key_id: Vec<String>,

    /// Verify all keys in the given keyring files.
    #[arg(short = 'K', long, value_name = "FILE", num_args = 1..)]
    keyring: Vec<Utf8PathBuf>,

    /// Spec to verify against.
    #[arg(short = 'S', long, default_value = glep63_specs::DEFAULT_SPEC)]
    spec: String,

    /// Print only errors (skip warnings).
    #[arg(short = 'e', long)]
    errors_only: bool,

    /// Print only record ids and reason codes.
    #[arg(short = 'm', long)]
    machine_readable: bool,

    /// Print bare e-mail addresses instead of full UIDs.
    #[arg(short = 'N', long)]
    no_name: bool,

    /// Exit unsuccessfully on warnings too.
    #[arg(short = 'w', long)]
    warnings_as_errors: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let spec = glep63_specs::lookup(&cli.spec)?;

    let keys = load_keys(&cli)?;
    let now = time::OffsetDateTime::now_utc();
    let results: Vec<(PublicKey, Vec<Finding>)> = keys
        .into_iter()
        .map(|key| {
            let findings = check_key(&key, &spec, now);
            (key, findings)
        })
        .collect();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        Format::Text => {
            let opts = output::TextOptions {
                errors_only: cli.errors_only,
                machine_readable: cli.machine_readable,
                no_name: cli.no_name,
                domain: spec.required_uid_domain.clone(),
            };
            output::render_text(&results, &opts, &mut out).context("write results")?;
        }
        Format::Json => {
            output::render_json(&results, &mut out).context("write results")?;
        }
    }

    let code = output::exit_code(&results, cli.warnings_as_errors);
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

fn load_keys(cli: &Cli) -> anyhow::Result<Vec<PublicKey>> {
    if !cli.gnupg.is_empty() {
        let mut keys = Vec::new();
        for source in &cli.gnupg {
            let text = if source == "-" {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("read stdin")?;
                buf
            } else {
                std::fs::read_to_string(source).with_context(|| format!("read {source}"))?
            };
            keys.extend(parse_colons(&text).with_context(|| format!("decode {source}"))?);
        }
        return Ok(keys);
    }

    let tool = GpgTool::discover()?;

    if cli.developers || cli.all_developers {
        let url = if cli.all_developers {
            ACTIVE_DEVS_URL
        } else {
            COMMITTING_DEVS_URL
        };
        let ring = fetch_keyring(url)?;
        let path = Utf8PathBuf::from_path_buf(ring.path().to_path_buf())
            .map_err(|p| anyhow::anyhow!("temporary keyring path is not UTF-8: {}", p.display()))?;
        return tool.list_keys(&[path], &[]);
    }

    // --all, -k and -K share one listing call; --all just means
    // "no restrictions".
    tool.list_keys(&cli.keyring, &cli.key_id)
}

/// Download a published keyring into a temporary file that lives for the
/// duration of the run.
fn fetch_keyring(url: &str) -> anyhow::Result<tempfile::NamedTempFile> {
    let mut response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .with_context(|| format!("download {url}"))?;
    let mut file = tempfile::NamedTempFile::new().context("create temporary keyring")?;
    std::io::copy(&mut response, file.as_file_mut()).context("write temporary keyring")?;
    Ok(file)
}
