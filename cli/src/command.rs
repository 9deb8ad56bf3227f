use std::str::FromStr;

use anyhow::{Context, bail};
use minefield_core::{CellCount, Coord, Coord2, Preset};

/// One line of player input.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    New,
    Preset(Preset),
    Custom {
        rows: Coord,
        columns: Coord,
        mines: CellCount,
    },
    Show,
    List,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  r|reveal ROW COL          reveal a cell
  f|flag ROW COL            toggle a flag
  n|new                     start a new game
  p|preset NAME             switch preset and start over
  c|custom ROWS COLS MINES  store the custom preset
  s|show                    redraw the board
  l|list                    list presets
  h|help                    this text
  q|quit                    leave";

fn parse_arg<T: FromStr>(args: &[&str], index: usize, name: &str) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let arg = args.get(index).with_context(|| format!("missing {name}"))?;
    arg.parse().with_context(|| format!("invalid {name}: {arg:?}"))
}

fn expect_args(args: &[&str], count: usize) -> anyhow::Result<()> {
    if args.len() > count {
        bail!("unexpected argument: {:?}", args[count]);
    }
    Ok(())
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("empty command");
        };
        let args: Vec<&str> = words.collect();

        let command = match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => {
                expect_args(&args, 2)?;
                Self::Reveal((parse_arg(&args, 0, "row")?, parse_arg(&args, 1, "column")?))
            }
            "f" | "flag" => {
                expect_args(&args, 2)?;
                Self::Flag((parse_arg(&args, 0, "row")?, parse_arg(&args, 1, "column")?))
            }
            "n" | "new" => {
                expect_args(&args, 0)?;
                Self::New
            }
            "p" | "preset" => {
                expect_args(&args, 1)?;
                Self::Preset(parse_arg(&args, 0, "preset")?)
            }
            "c" | "custom" => {
                expect_args(&args, 3)?;
                Self::Custom {
                    rows: parse_arg(&args, 0, "rows")?,
                    columns: parse_arg(&args, 1, "columns")?,
                    mines: parse_arg(&args, 2, "mines")?,
                }
            }
            "s" | "show" => Self::Show,
            "l" | "list" => Self::List,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            other => bail!("unknown command {other:?}, try `help`"),
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cell_commands() {
        assert_eq!("r 3 4".parse::<Command>().unwrap(), Command::Reveal((3, 4)));
        assert_eq!("  FLAG 0   15 ".parse::<Command>().unwrap(), Command::Flag((0, 15)));
    }

    #[test]
    fn parses_menu_commands() {
        assert_eq!("n".parse::<Command>().unwrap(), Command::New);
        assert_eq!(
            "preset Advanced".parse::<Command>().unwrap(),
            Command::Preset(Preset::Advanced)
        );
        assert_eq!(
            "custom 5 6 7".parse::<Command>().unwrap(),
            Command::Custom {
                rows: 5,
                columns: 6,
                mines: 7,
            }
        );
        assert_eq!("q".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn rejects_bad_input() {
        assert!("".parse::<Command>().is_err());
        assert!("dig 1 1".parse::<Command>().is_err());
        assert!("r 1".parse::<Command>().is_err());
        assert!("r 1 2 3".parse::<Command>().is_err());
        assert!("r -1 2".parse::<Command>().is_err());
        assert!("r 256 0".parse::<Command>().is_err());
        assert!("p expert".parse::<Command>().is_err());
    }

    #[test]
    fn errors_name_the_bad_argument() {
        let err = "c 5 x 7".parse::<Command>().unwrap_err();
        assert_eq!(err.to_string(), "invalid columns: \"x\"");
    }
}
