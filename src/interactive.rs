use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

use crate::output::{self, OutputFormat, RenderOptions};
use crate::pipeline::{FilterSelector, SortKey};
use crate::view::{Intent, ViewState};

const HELP: &str = "Commands:
  search <term>     show countries whose name contains <term> (no term clears)
  filter <filter>   all | smaller_than_lithuania | oceania_region
  sort <sort>       name_asc | name_desc | area_asc | area_desc
  page <n>          jump to page n
  next, prev        move one page
  help              show this help
  quit              leave
";

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Apply(Intent),
    Redraw,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    match word.to_lowercase().as_str() {
        "" => Ok(Command::Redraw),
        "search" | "s" => Ok(Command::Apply(Intent::SearchChanged(rest.to_string()))),
        "filter" | "f" => rest
            .parse::<FilterSelector>()
            .map(|f| Command::Apply(Intent::FilterChanged(f)))
            .map_err(|e| e.to_string()),
        "sort" | "o" => rest
            .parse::<SortKey>()
            .map(|k| Command::Apply(Intent::SortChanged(k)))
            .map_err(|e| e.to_string()),
        "page" | "p" => rest
            .parse::<usize>()
            .map(|n| Command::Apply(Intent::PageChanged(n)))
            .map_err(|_| format!("invalid page '{rest}', expected a number")),
        "next" | "n" => Ok(Command::Apply(Intent::NextPage)),
        "prev" | "previous" => Ok(Command::Apply(Intent::PreviousPage)),
        "help" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command '{other}', type 'help'")),
    }
}

/// Reads commands from stdin until EOF or `quit`, redrawing after each one.
pub async fn run(
    mut state: ViewState,
    format: OutputFormat,
    options: RenderOptions,
) -> Result<(), String> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let mut frame = output::render(&state.snapshot(), format, options);
    loop {
        frame.extend_from_slice(b"> ");
        stdout
            .write_all(&frame)
            .await
            .map_err(|e| format!("failed to write to stdout: {e}"))?;
        stdout
            .flush()
            .await
            .map_err(|e| format!("failed to write to stdout: {e}"))?;

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => return Err(format!("failed to read from stdin: {e}")),
        };

        frame = match parse_command(&line) {
            Ok(Command::Apply(intent)) => {
                debug!(?intent, "interactive intent");
                state = state.apply(intent);
                output::render(&state.snapshot(), format, options)
            }
            Ok(Command::Redraw) => output::render(&state.snapshot(), format, options),
            Ok(Command::Help) => HELP.as_bytes().to_vec(),
            Ok(Command::Quit) => break,
            Err(e) => format!("{e}\n").into_bytes(),
        };
    }
    stdout
        .write_all(b"\n")
        .await
        .map_err(|e| format!("failed to write to stdout: {e}"))?;
    Ok(())
}
