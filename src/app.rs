use std::ops::ControlFlow;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use log::{debug, info};

use crate::catalog::Catalog;
use crate::models::CourseId;
use crate::selection::SelectionState;
use crate::utils::console::Console;
use crate::view;

const HELP: &str = "\
Commands:
  <id> | toggle <id>   pick or drop a course
  confirm              submit the picked courses (cannot be undone)
  list                 show the courses again
  help                 show this message
  quit                 leave";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Toggle(CourseId),
    Confirm,
    List,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let head = words
            .next()
            .ok_or_else(|| anyhow!("empty command"))?
            .to_ascii_lowercase();

        let command = match head.as_str() {
            "toggle" | "t" => {
                let id = words
                    .next()
                    .ok_or_else(|| anyhow!("`{}` needs a course id", head))?;
                Command::Toggle(id.parse()?)
            }
            "confirm" | "c" => Command::Confirm,
            "list" | "ls" | "l" => Command::List,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => Command::Toggle(
                other
                    .parse::<CourseId>()
                    .map_err(|_| anyhow!("unknown command `{}`", other))?,
            ),
        };

        if let Some(extra) = words.next() {
            return Err(anyhow!("unexpected argument `{}`", extra));
        }
        Ok(command)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    AlreadyConfirmed,
    LimitExceeded,
    UnknownCourse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Number of courses that moved to confirmed.
    Confirmed(usize),
    Declined,
    Disabled,
}

/// Drives one picking session: owns the catalog and the selection and
/// applies user commands through the console.
pub struct App<C> {
    catalog: Catalog,
    selection: SelectionState,
    credit_limit: f64,
    console: C,
}

impl<C: Console> App<C> {
    pub fn new(catalog: Catalog, credit_limit: f64, console: C) -> Self {
        App {
            catalog,
            selection: SelectionState::new(),
            credit_limit,
            console,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Picks or drops `id`. Adding is refused when it would push the pending
    /// total over the credit limit; dropping always goes through.
    pub fn toggle(&mut self, id: CourseId) -> Result<ToggleOutcome> {
        if self.catalog.find_by_id(id).is_none() {
            self.console.notify(&format!("There is no course with id {}", id))?;
            return Ok(ToggleOutcome::UnknownCourse);
        }
        if self.selection.is_confirmed(id) {
            self.console
                .notify(&format!("Course {} is already confirmed and cannot be changed", id))?;
            return Ok(ToggleOutcome::AlreadyConfirmed);
        }

        let adding = !self.selection.is_pending(id);
        if adding && !self.selection.can_add(id, &self.catalog, self.credit_limit) {
            debug!("Rejected course {}: credit limit {} reached", id, self.credit_limit);
            self.console.notify(&format!(
                "You can only choose up to {} credits in one semester",
                self.credit_limit
            ))?;
            return Ok(ToggleOutcome::LimitExceeded);
        }

        self.selection.toggle_pending(id);
        debug!(
            "Course {} {}, pending total {}",
            id,
            if adding { "picked" } else { "dropped" },
            self.selection.pending_credit_total(&self.catalog)
        );
        Ok(if adding {
            ToggleOutcome::Added
        } else {
            ToggleOutcome::Removed
        })
    }

    /// Submits the pending courses after the user agrees to the prompt.
    pub fn confirm(&mut self) -> Result<ConfirmOutcome> {
        if !self.selection.confirm_enabled() {
            let reason = if self.selection.has_confirmed() {
                "Your selection has already been submitted"
            } else {
                "Pick at least one course before confirming"
            };
            self.console.notify(reason)?;
            return Ok(ConfirmOutcome::Disabled);
        }

        let total = self.selection.pending_credit_total(&self.catalog);
        let message = format!(
            "You have chosen {} credits for this semester. \
             You cannot change once you submit. Do you want to confirm?",
            total
        );
        if !self.console.confirm(&message)? {
            return Ok(ConfirmOutcome::Declined);
        }

        let count = self.selection.pending_len();
        self.selection.confirm_pending();
        info!(
            "Confirmed {} courses ({} credits): {:?}",
            count,
            total,
            self.selection.confirmed_ids()
        );
        Ok(ConfirmOutcome::Confirmed(count))
    }

    pub fn render(&mut self) -> Result<()> {
        let screen = view::render(&self.catalog, &self.selection);
        self.console.show(&screen)
    }

    /// Applies one line of user input. Breaks when the user asks to leave.
    pub fn handle_line(&mut self, line: &str) -> Result<ControlFlow<()>> {
        if line.trim().is_empty() {
            return Ok(ControlFlow::Continue(()));
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                debug!("Ignoring input {:?}: {}", line, e);
                self.console
                    .notify(&format!("{}. Type `help` for the list of commands.", e))?;
                return Ok(ControlFlow::Continue(()));
            }
        };

        match command {
            Command::Toggle(id) => {
                if matches!(self.toggle(id)?, ToggleOutcome::Added | ToggleOutcome::Removed) {
                    self.render()?;
                }
            }
            Command::Confirm => {
                if let ConfirmOutcome::Confirmed(_) = self.confirm()? {
                    self.render()?;
                }
            }
            Command::List => self.render()?,
            Command::Help => self.console.show(HELP)?,
            Command::Quit => return Ok(ControlFlow::Break(())),
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Shows the courses, then processes commands until quit or end of input.
    pub fn run(&mut self) -> Result<()> {
        self.render()?;
        while let Some(line) = self.console.read_command()? {
            if self.handle_line(&line)?.is_break() {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CourseRecord;
    use crate::selection::DEFAULT_CREDIT_LIMIT;
    use std::collections::VecDeque;

    /// Console that answers prompts from a script and records what it was told.
    #[derive(Default)]
    struct Scripted {
        commands: VecDeque<String>,
        answers: VecDeque<bool>,
        notices: Vec<String>,
        prompts: Vec<String>,
        screens: usize,
    }

    impl Scripted {
        fn answering(answers: &[bool]) -> Self {
            Scripted {
                answers: answers.iter().copied().collect(),
                ..Default::default()
            }
        }
    }

    impl Console for Scripted {
        fn read_command(&mut self) -> Result<Option<String>> {
            Ok(self.commands.pop_front())
        }

        fn show(&mut self, _screen: &str) -> Result<()> {
            self.screens += 1;
            Ok(())
        }

        fn notify(&mut self, message: &str) -> Result<()> {
            self.notices.push(message.to_string());
            Ok(())
        }

        fn confirm(&mut self, message: &str) -> Result<bool> {
            self.prompts.push(message.to_string());
            Ok(self.answers.pop_front().unwrap_or(false))
        }
    }

    fn app(console: Scripted) -> App<Scripted> {
        let catalog = Catalog::from_records(vec![
            CourseRecord::new(1, "Discrete Math", 3.0, true),
            CourseRecord::new(2, "Poetry", 4.0, false),
            CourseRecord::new(3, "Internship", 12.0, true),
        ]);
        App::new(catalog, DEFAULT_CREDIT_LIMIT, console)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("3".parse::<Command>().unwrap(), Command::Toggle(CourseId(3)));
        assert_eq!("toggle 12".parse::<Command>().unwrap(), Command::Toggle(CourseId(12)));
        assert_eq!("T 4".parse::<Command>().unwrap(), Command::Toggle(CourseId(4)));
        assert_eq!(" Confirm ".parse::<Command>().unwrap(), Command::Confirm);
        assert_eq!("ls".parse::<Command>().unwrap(), Command::List);
        assert_eq!("?".parse::<Command>().unwrap(), Command::Help);
        assert_eq!("exit".parse::<Command>().unwrap(), Command::Quit);

        assert!("toggle".parse::<Command>().is_err());
        assert!("toggle x".parse::<Command>().is_err());
        assert!("confirm now".parse::<Command>().is_err());
        assert!("enroll 3".parse::<Command>().is_err());
    }

    #[test]
    fn test_limit_blocks_adding_but_not_dropping() {
        let mut app = app(Scripted::default());
        assert_eq!(app.toggle(CourseId(1)).unwrap(), ToggleOutcome::Added);
        assert_eq!(app.toggle(CourseId(3)).unwrap(), ToggleOutcome::Added);

        assert_eq!(app.toggle(CourseId(2)).unwrap(), ToggleOutcome::LimitExceeded);
        assert!(!app.selection().is_pending(CourseId(2)));
        assert_eq!(
            app.console().notices,
            vec!["You can only choose up to 18 credits in one semester"]
        );

        assert_eq!(app.toggle(CourseId(3)).unwrap(), ToggleOutcome::Removed);
        assert_eq!(app.toggle(CourseId(2)).unwrap(), ToggleOutcome::Added);
    }

    #[test]
    fn test_dropping_is_allowed_even_over_a_lowered_limit() {
        let catalog = Catalog::from_records(vec![CourseRecord::new(1, "Huge", 10.0, true)]);
        let mut app = App::new(catalog, 10.0, Scripted::default());
        app.toggle(CourseId(1)).unwrap();
        app.credit_limit = 5.0;

        assert_eq!(app.toggle(CourseId(1)).unwrap(), ToggleOutcome::Removed);
    }

    #[test]
    fn test_unknown_course_is_reported() {
        let mut app = app(Scripted::default());

        assert_eq!(app.toggle(CourseId(9)).unwrap(), ToggleOutcome::UnknownCourse);
        assert!(!app.selection().has_pending());
        assert_eq!(app.console().notices.len(), 1);
    }

    #[test]
    fn test_confirm_asks_with_total() {
        let mut app = app(Scripted::answering(&[true]));
        app.toggle(CourseId(1)).unwrap();
        app.toggle(CourseId(2)).unwrap();

        assert_eq!(app.confirm().unwrap(), ConfirmOutcome::Confirmed(2));
        assert!(app.console().prompts[0].starts_with("You have chosen 7 credits for this semester."));
        assert_eq!(app.selection().confirmed_ids(), vec![CourseId(1), CourseId(2)]);
        assert!(!app.selection().has_pending());
    }

    #[test]
    fn test_declining_leaves_state_alone() {
        let mut app = app(Scripted::answering(&[false]));
        app.toggle(CourseId(3)).unwrap();

        assert_eq!(app.confirm().unwrap(), ConfirmOutcome::Declined);
        assert!(app.selection().is_pending(CourseId(3)));
        assert!(!app.selection().has_confirmed());
    }

    #[test]
    fn test_confirm_disabled_without_pending_or_after_submit() {
        let mut app = app(Scripted::answering(&[true, true]));
        assert_eq!(app.confirm().unwrap(), ConfirmOutcome::Disabled);

        app.toggle(CourseId(1)).unwrap();
        app.confirm().unwrap();
        app.toggle(CourseId(2)).unwrap();

        assert_eq!(app.confirm().unwrap(), ConfirmOutcome::Disabled);
        assert_eq!(app.console().prompts.len(), 1);
        assert!(app.selection().is_pending(CourseId(2)));
    }

    #[test]
    fn test_confirmed_course_cannot_be_toggled() {
        let mut app = app(Scripted::answering(&[true]));
        app.toggle(CourseId(1)).unwrap();
        app.confirm().unwrap();

        assert_eq!(app.toggle(CourseId(1)).unwrap(), ToggleOutcome::AlreadyConfirmed);
        assert!(app.selection().is_confirmed(CourseId(1)));
        assert!(!app.selection().is_pending(CourseId(1)));
    }

    #[test]
    fn test_run_until_quit() {
        let mut console = Scripted::answering(&[true]);
        console.commands = ["1", "", "bogus", "confirm", "quit", "2"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut app = app(console);

        app.run().unwrap();

        assert_eq!(app.selection().confirmed_ids(), vec![CourseId(1)]);
        assert!(!app.selection().is_pending(CourseId(2)));
        // initial screen, after toggle, after confirm
        assert_eq!(app.console().screens, 3);
        assert_eq!(app.console().notices.len(), 1);
    }
}
