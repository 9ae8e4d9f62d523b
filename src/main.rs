use anyhow::{Context, Result};
use locker_progress::{Config, LockerClient, ModuleCatalog};
use std::path::PathBuf;

const USAGE: &str =
    "usage: locker-progress [--config PATH] [--modules PATH] (progress <username> | mentor)";

enum Command {
    Progress(String),
    Mentor,
}

struct Args {
    config: PathBuf,
    modules: PathBuf,
    command: Command,
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Args> {
    let mut config = PathBuf::from("llcfg.toml");
    let mut modules = PathBuf::from("modules.json");
    let mut positional = Vec::new();

    let mut args = args;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config = args.next().context(USAGE)?.into(),
            "--modules" => modules = args.next().context(USAGE)?.into(),
            _ => positional.push(arg),
        }
    }

    let command = match positional.as_slice() {
        [cmd, user] if cmd == "progress" => Command::Progress(user.clone()),
        [cmd] if cmd == "mentor" => Command::Mentor,
        _ => anyhow::bail!(USAGE),
    };

    Ok(Args {
        config,
        modules,
        command,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "locker_progress=warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args(std::env::args().skip(1))?;

    // Load saved keys from .env (real env vars take precedence)
    Config::load_env_file();

    let client = LockerClient::from_file(&args.config)
        .with_context(|| format!("failed to set up client from {}", args.config.display()))?;
    let catalog = ModuleCatalog::load(&args.modules)
        .with_context(|| format!("failed to load module catalog {}", args.modules.display()))?;

    let output = match args.command {
        Command::Progress(username) => {
            let progress = client
                .progress(&username, &catalog)
                .await
                .with_context(|| format!("failed to fetch progress for {}", username))?;
            serde_json::to_string_pretty(&progress)?
        }
        Command::Mentor => {
            let report = client
                .mentor(&catalog)
                .await
                .context("failed to fetch mentor report")?;
            serde_json::to_string_pretty(&report)?
        }
    };
    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_progress_command_with_paths() {
        let parsed = parse_args(args(&[
            "--config", "a.toml", "progress", "mark", "--modules", "m.json",
        ]))
        .unwrap();
        assert_eq!(parsed.config, PathBuf::from("a.toml"));
        assert_eq!(parsed.modules, PathBuf::from("m.json"));
        assert!(matches!(parsed.command, Command::Progress(ref u) if u == "mark"));
    }

    #[test]
    fn test_mentor_defaults() {
        let parsed = parse_args(args(&["mentor"])).unwrap();
        assert_eq!(parsed.config, PathBuf::from("llcfg.toml"));
        assert!(matches!(parsed.command, Command::Mentor));
    }

    #[test]
    fn test_bad_usage_rejected() {
        assert!(parse_args(args(&["progress"])).is_err());
        assert!(parse_args(args(&["mentor", "extra"])).is_err());
        assert!(parse_args(args(&["--config"])).is_err());
    }
}
