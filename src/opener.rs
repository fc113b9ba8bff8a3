//! Interactive menu for opening matched files.
//!
//! The menu is a small state machine:
//!
//! ```text
//! Listing -> AwaitingSelection -> AwaitingPageSelection -> AwaitingSelection
//!                              -> Launching             -> AwaitingSelection
//!                              -> Done
//! ```
//!
//! [`transition`] is pure, so every edge can be exercised without a
//! terminal. [`Opener`] drives it against real input, output and a
//! [`Launcher`].

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::error::{PdfseekError, Result};
use crate::scan::SearchResult;
use crate::viewer::Launcher;

/// A file and the page to open it at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchTarget {
    pub file: PathBuf,
    pub page: u32,
}

impl LaunchTarget {
    fn new(file: &Path, page: u32) -> Self {
        Self {
            file: file.to_path_buf(),
            page,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    Listing,
    AwaitingSelection,
    /// Waiting for a page of the `file`th listed file (0-based)
    AwaitingPageSelection { file: usize },
    Launching {
        targets: Vec<LaunchTarget>,
        then: Box<State>,
    },
    Done,
}

/// Outcome of feeding one line of input to a state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Next(State),
    Invalid { message: String, retry: State },
}

/// A parsed answer to the file prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Quit,
    All,
    /// 0-based index into the listed files
    File(usize),
}

/// A parsed answer to the page prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageChoice {
    All,
    Page(u32),
    Back,
}

pub fn parse_selection(input: &str, file_count: usize) -> Result<Selection> {
    let choice = input.trim();

    if choice.eq_ignore_ascii_case("q") {
        return Ok(Selection::Quit);
    }
    if choice.eq_ignore_ascii_case("all") {
        return Ok(Selection::All);
    }

    let number: i64 = choice.parse().map_err(|_| {
        PdfseekError::InvalidSelection(
            "Invalid input. Please enter a number or 'all' or 'q'.".to_string(),
        )
    })?;

    if number >= 1 && (number as u64) <= file_count as u64 {
        Ok(Selection::File(number as usize - 1))
    } else {
        Err(PdfseekError::InvalidSelection(
            "Invalid choice. Please enter a number from the list.".to_string(),
        ))
    }
}

/// An empty line goes back to the file prompt.
pub fn parse_page_choice(input: &str, pages: &[u32]) -> Result<PageChoice> {
    let choice = input.trim();

    if choice.is_empty() {
        return Ok(PageChoice::Back);
    }
    if choice.eq_ignore_ascii_case("all") {
        return Ok(PageChoice::All);
    }

    let page: u32 = choice.parse().map_err(|_| {
        PdfseekError::InvalidSelection("Invalid input. Please enter a valid page number.".to_string())
    })?;

    if pages.contains(&page) {
        Ok(PageChoice::Page(page))
    } else {
        Err(PdfseekError::InvalidSelection(format!(
            "Invalid page number. Must be one of {:?}",
            pages
        )))
    }
}

/// Computes the next state for one line typed at `state`'s prompt.
///
/// States that do not read input (`Listing`, `Launching`, `Done`) are
/// returned unchanged.
pub fn transition(result: &SearchResult, state: &State, input: &str) -> Step {
    match state {
        State::AwaitingSelection => match parse_selection(input, result.len()) {
            Ok(Selection::Quit) => Step::Next(State::Done),
            Ok(Selection::All) => {
                // First matched page of every file, never every page
                let targets = result
                    .iter()
                    .filter_map(|(file, pages)| pages.first().map(|&page| LaunchTarget::new(file, page)))
                    .collect();
                Step::Next(State::Launching {
                    targets,
                    then: Box::new(State::Done),
                })
            }
            Ok(Selection::File(index)) => match result.get_index(index) {
                Some((file, [page])) => Step::Next(State::Launching {
                    targets: vec![LaunchTarget::new(file, *page)],
                    then: Box::new(State::AwaitingSelection),
                }),
                Some(_) => Step::Next(State::AwaitingPageSelection { file: index }),
                None => Step::Invalid {
                    message: "Invalid choice. Please enter a number from the list.".to_string(),
                    retry: State::AwaitingSelection,
                },
            },
            Err(e) => Step::Invalid {
                message: e.to_string(),
                retry: State::AwaitingSelection,
            },
        },
        State::AwaitingPageSelection { file: index } => {
            let Some((file, pages)) = result.get_index(*index) else {
                return Step::Next(State::AwaitingSelection);
            };

            match parse_page_choice(input, pages) {
                Ok(PageChoice::Back) => Step::Next(State::AwaitingSelection),
                Ok(PageChoice::All) => Step::Next(State::Launching {
                    targets: pages.iter().map(|&page| LaunchTarget::new(file, page)).collect(),
                    then: Box::new(State::AwaitingSelection),
                }),
                Ok(PageChoice::Page(page)) => Step::Next(State::Launching {
                    targets: vec![LaunchTarget::new(file, page)],
                    then: Box::new(State::AwaitingSelection),
                }),
                Err(e) => Step::Invalid {
                    message: e.to_string(),
                    retry: state.clone(),
                },
            }
        }
        other => Step::Next(other.clone()),
    }
}

/// Runs the menu over a finished search result
pub struct Opener<'a, R, W, L> {
    result: &'a SearchResult,
    input: R,
    output: W,
    launcher: L,
}

impl<'a, R: BufRead, W: Write, L: Launcher> Opener<'a, R, W, L> {
    pub fn new(result: &'a SearchResult, input: R, output: W, launcher: L) -> Self {
        Self {
            result,
            input,
            output,
            launcher,
        }
    }

    /// Loops until the user quits, opens everything, or input runs out.
    pub fn run(&mut self) -> Result<()> {
        if self.result.is_empty() {
            writeln!(self.output, "No matches found.")?;
            return Ok(());
        }

        let mut state = State::Listing;
        loop {
            state = match state {
                State::Listing => {
                    self.print_listing()?;
                    State::AwaitingSelection
                }
                State::AwaitingSelection | State::AwaitingPageSelection { .. } => {
                    self.prompt(&state)?;
                    match self.read_line()? {
                        None => State::Done,
                        Some(line) => match transition(self.result, &state, &line) {
                            Step::Next(next) => next,
                            Step::Invalid { message, retry } => {
                                writeln!(self.output, "{}", message)?;
                                retry
                            }
                        },
                    }
                }
                State::Launching { targets, then } => {
                    for target in &targets {
                        self.open(target)?;
                    }
                    *then
                }
                State::Done => return Ok(()),
            };
        }
    }

    pub fn into_launcher(self) -> L {
        self.launcher
    }

    fn print_listing(&mut self) -> Result<()> {
        let result = self.result;
        writeln!(self.output, "\nFound matches in the following PDFs:")?;

        for (i, (path, pages)) in result.iter().enumerate() {
            writeln!(
                self.output,
                "{}. {} ({} matches on pages {:?})",
                i + 1,
                file_name(path),
                pages.len(),
                pages
            )?;
            let folder = path.parent().unwrap_or(Path::new(""));
            writeln!(self.output, "   Location: {}", folder.display())?;
        }

        Ok(())
    }

    fn prompt(&mut self, state: &State) -> Result<()> {
        match state {
            State::AwaitingPageSelection { file } => {
                let result = self.result;
                let pages = result.get_index(*file).map_or(&[][..], |(_, pages)| pages);
                write!(
                    self.output,
                    "Multiple matches found. Enter page number to open {:?} or 'all' to open all (blank line to go back): ",
                    pages
                )?;
            }
            _ => write!(
                self.output,
                "\nEnter the number of the PDF to open (or 'all' to open all, 'q' to quit): "
            )?,
        }
        self.output.flush()?;
        Ok(())
    }

    /// Bytes that are not UTF-8 come through lossily and fail to parse
    /// like any other bad answer.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).into_owned()))
    }

    fn open(&mut self, target: &LaunchTarget) -> Result<()> {
        match self.launcher.launch(&target.file, target.page) {
            Ok(()) => writeln!(
                self.output,
                "Opening {} at page {}",
                file_name(&target.file),
                target.page
            )?,
            Err(e) => {
                log::warn!("{}", e);
                writeln!(self.output, "{}", e)?;
            }
        }
        Ok(())
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
