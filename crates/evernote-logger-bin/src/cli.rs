use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = "config.yaml";

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    /// `--ymd`, today when absent
    pub ymd: Option<String>,
    /// `--dt`
    pub full_timestamp: bool,
    /// `--test`
    pub dry_run: bool,
    /// `-c`
    pub config: PathBuf,
    /// `--nb`
    pub group_by_notebook: bool,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            ymd: None,
            full_timestamp: false,
            dry_run: false,
            config: PathBuf::from(DEFAULT_CONFIG),
            group_by_notebook: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Run(CliArgs),
}

pub fn usage() -> &'static str {
    "\
Generate a daily log note in Evernote from the notes created or updated that day.

Usage: evernote-logger [--ymd YYYYMMDD] [--dt] [--test] [-c CONFIG] [--nb]

Options:
  --ymd YYYYMMDD  Day to log, e.g. 20220228 (default: today)
  --dt            Prefix entries with the full date and time, e.g. 2022/02/28 09:56
  --test          Don't create a note in Evernote
  -c CONFIG       Config file (default: config.yaml)
  --nb            Order by notebooks
  -h, --help      Show this help

Examples:
  Generate today's log:
      evernote-logger
  Generate today's log ordered by notebooks:
      evernote-logger --nb
  Generate the log for a certain day:
      evernote-logger --ymd 20210102
  Generate today's log with a specific config:
      evernote-logger -c config-YOU.yaml
"
}

pub fn parse_args<I>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        return Ok(Command::Help);
    }

    let mut parsed = CliArgs::default();
    let mut i = 0usize;
    while i < args.len() {
        let a = args[i].as_str();
        match a {
            "--ymd" => {
                i += 1;
                let v = args.get(i).ok_or("--ymd requires YYYYMMDD")?;
                parsed.ymd = Some(v.to_string());
            }
            "-c" => {
                i += 1;
                let v = args.get(i).ok_or("-c requires CONFIG")?;
                parsed.config = PathBuf::from(v);
            }
            "--dt" => parsed.full_timestamp = true,
            "--test" => parsed.dry_run = true,
            "--nb" => parsed.group_by_notebook = true,
            _ => {
                if let Some(v) = a.strip_prefix("--ymd=") {
                    parsed.ymd = Some(v.to_string());
                } else if let Some(v) = a.strip_prefix("-c").filter(|v| !v.is_empty()) {
                    parsed.config = PathBuf::from(v);
                } else {
                    return Err(format!("unknown argument: {}", a));
                }
            }
        }
        i += 1;
    }
    Ok(Command::Run(parsed))
}

/// Relative paths missing from the working directory are looked up next to
/// the executable.
pub fn resolve_config_path(path: &Path) -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    resolve_config_path_in(path, exe_dir.as_deref())
}

fn resolve_config_path_in(path: &Path, exe_dir: Option<&Path>) -> PathBuf {
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }
    match exe_dir {
        Some(dir) if dir.join(path).exists() => dir.join(path),
        _ => path.to_path_buf(),
    }
}
