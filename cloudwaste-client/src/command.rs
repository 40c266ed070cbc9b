use std::str::FromStr;

use cloudwaste_api::models::BinId;

use crate::state::Role;

/// One line typed into the terminal dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Role(Role),
    Refresh,
    Select(Option<BinId>),
    Report {
        bin_id: BinId,
        issue: String,
        description: String,
    },
    Collect(BinId),
    Optimize,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  role <manager|driver|citizen>
  refresh
  select <bin>|none
  report <bin> <issue>|<description>
  collect <bin>
  optimize
  help
  quit";

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match name {
            "role" => Ok(Command::Role(rest.parse()?)),
            "refresh" => Ok(Command::Refresh),
            "select" => match rest {
                "" => Err(String::from("usage: select <bin>|none")),
                "none" => Ok(Command::Select(None)),
                bin_id => Ok(Command::Select(Some(bin_id.to_string()))),
            },
            "report" => {
                let (bin_id, text) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| String::from("usage: report <bin> <issue>|<description>"))?;
                let (issue, description) = text
                    .split_once('|')
                    .ok_or_else(|| String::from("usage: report <bin> <issue>|<description>"))?;

                Ok(Command::Report {
                    bin_id: bin_id.to_string(),
                    issue: issue.trim().to_string(),
                    description: description.trim().to_string(),
                })
            }
            "collect" if !rest.is_empty() => Ok(Command::Collect(rest.to_string())),
            "collect" => Err(String::from("usage: collect <bin>")),
            "optimize" => Ok(Command::Optimize),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            "" => Err(String::from("empty command")),
            other => Err(format!("unknown command {other}, type `help`")),
        }
    }
}
