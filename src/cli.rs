use anyhow::{anyhow, Result};

pub const USAGE: &str = "usage: nyumba [serve | normalize [--dry-run] | audit]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Normalize { dry_run: bool },
    Audit,
}

pub fn parse_args<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();

    let command = match args.next().as_deref() {
        None | Some("serve") => Command::Serve,
        Some("audit") => Command::Audit,
        Some("normalize") => {
            let mut dry_run = false;
            for flag in args.by_ref() {
                match flag.as_str() {
                    "--dry-run" | "-n" => dry_run = true,
                    other => return Err(anyhow!("unknown flag '{other}'\n{USAGE}")),
                }
            }
            Command::Normalize { dry_run }
        }
        Some(other) => return Err(anyhow!("unknown command '{other}'\n{USAGE}")),
    };

    if let Some(extra) = args.next() {
        return Err(anyhow!("unexpected argument '{extra}'\n{USAGE}"));
    }

    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command> {
        parse_args(args.iter().map(|a| a.to_string()))
    }

    #[test]
    fn serve_is_the_default() {
        assert_eq!(parse(&[]).unwrap(), Command::Serve);
        assert_eq!(parse(&["serve"]).unwrap(), Command::Serve);
    }

    #[test]
    fn normalize_takes_dry_run() {
        assert_eq!(parse(&["normalize"]).unwrap(), Command::Normalize { dry_run: false });
        assert_eq!(
            parse(&["normalize", "--dry-run"]).unwrap(),
            Command::Normalize { dry_run: true }
        );
        assert!(parse(&["normalize", "--force"]).is_err());
    }

    #[test]
    fn unknown_commands_are_rejected() {
        assert_eq!(parse(&["audit"]).unwrap(), Command::Audit);
        assert!(parse(&["migrate"]).is_err());
        assert!(parse(&["audit", "now"]).is_err());
    }
}
