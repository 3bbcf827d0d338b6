//! The interactive terminal behind [`Console`].

use std::io::{self, BufRead, Write};

use crossterm::style::{StyledContent, Stylize};

use flashdrill_core::console::{Console, Tone};

/// Coloured stdout and line-buffered stdin.
pub struct TerminalConsole {
    stdin: io::StdinLock<'static>,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self {
            stdin: io::stdin().lock(),
        }
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

/// `text` in the colour of `tone`.
pub fn paint(text: &str, tone: Tone) -> StyledContent<&str> {
    match tone {
        Tone::Info => text.blue(),
        Tone::Success => text.green(),
        Tone::Failure => text.red(),
        Tone::Notice => text.yellow(),
        Tone::Accent => text.cyan(),
    }
}

impl Console for TerminalConsole {
    fn say(&mut self, text: &str, tone: Tone) {
        println!("{}", paint(text, tone));
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", prompt.magenta())?;
        stdout.flush()?;

        let mut line = String::new();
        if self.stdin.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }
}
