use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::num::IntErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::data::folders::list_subfolders;
use crate::data::loader::process_png_folder;
use crate::data::model::LuminanceDataset;

const PROMPT: &str = "Enter the number of a folder to process (q for quit): ";

// ---------------------------------------------------------------------------
// Prompt source
// ---------------------------------------------------------------------------

/// Supplies one line of user input per prompt.
pub trait PromptSource {
    /// Show `message` and return the answer, or `None` once input is exhausted.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>>;
}

/// Prompts on a writer and reads answers line by line from a reader.
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl ConsolePrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> PromptSource for ConsolePrompt<R, W> {
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

// ---------------------------------------------------------------------------
// Menu
// ---------------------------------------------------------------------------

/// What the user typed at the menu prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Quit,
    /// Zero-based index into the folder list.
    Folder(usize),
    OutOfRange,
    NotANumber,
}

/// Interpret one answer against a menu of `count` entries numbered from 1.
pub fn parse_choice(answer: &str, count: usize) -> Choice {
    let answer = answer.trim();
    if answer.eq_ignore_ascii_case("q") {
        return Choice::Quit;
    }
    match answer.parse::<i64>() {
        Ok(n) if n >= 1 && (n as u64) <= count as u64 => Choice::Folder(n as usize - 1),
        Ok(_) => Choice::OutOfRange,
        // Still an integer, just too long for any menu.
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Choice::OutOfRange
        }
        Err(_) => Choice::NotANumber,
    }
}

/// Print the numbered menu and prompt until a folder is picked or the user quits.
///
/// Returns the zero-based index of the chosen folder, or `None` on quit or
/// end of input.
pub fn choose_folder(
    folders: &[OsString],
    prompts: &mut dyn PromptSource,
    out: &mut dyn Write,
) -> io::Result<Option<usize>> {
    writeln!(out, "Folders found:")?;
    for (i, folder) in folders.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, folder.to_string_lossy())?;
    }

    loop {
        let Some(answer) = prompts.prompt(PROMPT)? else {
            log::debug!("input closed at folder prompt");
            writeln!(out, "Quitting")?;
            return Ok(None);
        };
        match parse_choice(&answer, folders.len()) {
            Choice::Quit => {
                writeln!(out, "Quitting")?;
                return Ok(None);
            }
            Choice::Folder(index) => return Ok(Some(index)),
            Choice::OutOfRange => {
                writeln!(out, "Invalid number. Please choose a valid folder number")?
            }
            Choice::NotANumber => {
                writeln!(out, "Invalid input. Please enter a number or q to quit")?
            }
        }
    }
}

/// Let the user pick a subfolder of `base`. `None` if there is none or they quit.
pub fn select_folder(
    base: &Path,
    prompts: &mut dyn PromptSource,
    out: &mut dyn Write,
) -> Result<Option<PathBuf>> {
    let folders = list_subfolders(base)
        .with_context(|| format!("listing folders in {}", base.display()))?;
    if folders.is_empty() {
        writeln!(out, "No folders found")?;
        return Ok(None);
    }

    let choice = choose_folder(&folders, prompts, out).context("reading folder choice")?;
    Ok(choice.map(|i| base.join(&folders[i])))
}

/// Pick a subfolder of `base` and extract luminance from its PNGs.
///
/// Returns the chosen folder with its dataset, or `None` if nothing was picked.
pub fn user_interface(
    base: &Path,
    prompts: &mut dyn PromptSource,
    out: &mut dyn Write,
) -> Result<Option<(PathBuf, LuminanceDataset)>> {
    let Some(folder) = select_folder(base, prompts, out)? else {
        return Ok(None);
    };
    log::info!("Processing {}", folder.display());
    let dataset = process_png_folder(&folder)?;
    Ok(Some((folder, dataset)))
}
