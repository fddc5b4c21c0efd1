//! Interactive menu
//!
//! Reads choices line by line from any [`BufRead`] and writes to any
//! [`Write`], so the same loop serves stdin/stdout and in-memory tests.
//! End of input behaves like choosing "Exit".
//!
//! Each index gets its own action list: the ordered and hashed indexes are
//! addressed by date, the balanced index by value.

use crate::cli::IndexKind;
use crate::core::{AnyIndex, BalancedIndex, HashedIndex, OrderedIndex};
use crate::types::{IndexError, Record};
use std::io::{self, BufRead, Write};

/// Number of records sharing the extremal date that are printed
const EXTREMAL_LISTING: usize = 10;

const SEPARATOR: &str = "---------------------------";

/// One menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    List,
    Search,
    Edit,
    Delete,
    Count,
    Max,
    Min,
    Chains,
}

impl Action {
    fn label(self) -> &'static str {
        match self {
            Action::List => "List records",
            Action::Search => "Search",
            Action::Edit => "Edit",
            Action::Delete => "Delete",
            Action::Count => "Count",
            Action::Max => "Find the data with the MAX value",
            Action::Min => "Find the data with the MIN value",
            Action::Chains => "Chain statistics",
        }
    }
}

fn actions(kind: IndexKind) -> &'static [Action] {
    match kind {
        IndexKind::Ordered => &[
            Action::List,
            Action::Search,
            Action::Edit,
            Action::Delete,
            Action::Count,
        ],
        IndexKind::Balanced => &[
            Action::List,
            Action::Max,
            Action::Min,
            Action::Search,
            Action::Edit,
            Action::Delete,
            Action::Count,
        ],
        IndexKind::Hashed => &[
            Action::List,
            Action::Search,
            Action::Edit,
            Action::Delete,
            Action::Count,
            Action::Chains,
        ],
    }
}

/// Line-oriented prompt over an input and an output
struct Console<'a, R, W: ?Sized> {
    input: R,
    output: &'a mut W,
}

impl<R: BufRead, W: Write + ?Sized> Console<'_, R, W> {
    fn say(&mut self, text: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    /// Print `text` and read one trimmed line; `None` at end of input
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompt until the answer parses as an integer
    fn prompt_number(&mut self, text: &str) -> io::Result<Option<i64>> {
        loop {
            let Some(answer) = self.prompt(text)? else {
                return Ok(None);
            };
            match answer.parse::<i64>() {
                Ok(number) => return Ok(Some(number)),
                Err(_) => self.say(format!("Invalid number '{}'", answer))?,
            }
        }
    }

    fn prompt_date(&mut self) -> io::Result<Option<String>> {
        self.prompt("Enter date: ")
    }

    fn show_records<'r>(&mut self, records: impl IntoIterator<Item = &'r Record>) -> io::Result<()> {
        let mut shown = 0;
        for record in records {
            self.say(record)?;
            shown += 1;
        }
        if shown == 0 {
            self.say("No data found")?;
        }
        Ok(())
    }
}

/// Run the menu loop for `index` until "0" or end of input
///
/// # Errors
///
/// Only I/O errors on `input` or `output` end the loop early. Index errors
/// and invalid choices are reported and the menu is shown again.
pub fn run_menu<R, W>(index: &mut AnyIndex, input: R, output: &mut W) -> io::Result<()>
where
    R: BufRead,
    W: Write + ?Sized,
{
    let mut console = Console { input, output };
    let entries = actions(index.kind());

    loop {
        console.say(SEPARATOR)?;
        for (i, action) in entries.iter().enumerate() {
            console.say(format!("{}. {}", i + 1, action.label()))?;
        }
        console.say("0. Exit")?;

        let Some(choice) = console.prompt("Enter your choice: ")? else {
            break;
        };
        if choice == "0" {
            break;
        }

        let selected = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|n| entries.get(n).copied());
        let Some(action) = selected else {
            console.say("Invalid choice")?;
            continue;
        };

        tracing::debug!(?action, index = index.as_index().name(), "menu action");
        let finished = match index {
            AnyIndex::Ordered(tree) => ordered_action(&mut console, tree, action)?,
            AnyIndex::Balanced(tree) => balanced_action(&mut console, tree, action)?,
            AnyIndex::Hashed(table) => hashed_action(&mut console, table, action)?,
        };
        if !finished {
            break;
        }
        console.say("")?;
    }

    console.say("Bye!")
}

/// Outcome of an action: `false` when input ran out mid-prompt
type Step = io::Result<bool>;

fn report<R: BufRead, W: Write + ?Sized>(
    console: &mut Console<'_, R, W>,
    result: Result<(), IndexError>,
    success: &str,
) -> io::Result<()> {
    match result {
        Ok(()) => console.say(success),
        Err(e) => console.say(e),
    }
}

fn ordered_action<R: BufRead, W: Write + ?Sized>(
    console: &mut Console<'_, R, W>,
    tree: &mut OrderedIndex,
    action: Action,
) -> Step {
    match action {
        Action::List => console.show_records(tree.enumerate())?,
        Action::Count => console.say(format!("Records: {}", tree.count()))?,
        Action::Search => {
            let Some(date) = console.prompt_date()? else {
                return Ok(false);
            };
            match tree.search_date(&date) {
                Ok(found) => console.show_records(found)?,
                Err(e) => console.say(e)?,
            }
        }
        Action::Edit => {
            let Some(date) = console.prompt_date()? else {
                return Ok(false);
            };
            let Some(value) = console.prompt_number("Enter the new Value: ")? else {
                return Ok(false);
            };
            report(console, tree.update_date(&date, value), "Data updated")?;
        }
        Action::Delete => {
            let Some(date) = console.prompt_date()? else {
                return Ok(false);
            };
            match tree.delete_date(&date) {
                Ok(Some(_)) => console.say("Data deleted")?,
                Ok(None) => console.say("No data found")?,
                Err(e) => console.say(e)?,
            }
        }
        Action::Max | Action::Min | Action::Chains => console.say("Invalid choice")?,
    }
    Ok(true)
}

fn balanced_action<R: BufRead, W: Write + ?Sized>(
    console: &mut Console<'_, R, W>,
    tree: &mut BalancedIndex,
    action: Action,
) -> Step {
    match action {
        Action::List => console.show_records(tree.enumerate())?,
        Action::Count => console.say(format!("Records: {}", tree.count()))?,
        Action::Max | Action::Min => {
            let extremal = if action == Action::Max {
                tree.max_value_node()
            } else {
                tree.min_value_node()
            };
            match extremal {
                Ok(record) => {
                    console.say(format!("Date: {}, Value: {}", record.date, record.value))?;
                    let same_day = tree.records_with_date(&record.date);
                    console.show_records(same_day.into_iter().take(EXTREMAL_LISTING))?;
                }
                Err(e) => console.say(e)?,
            }
        }
        Action::Search => {
            let Some(value) = console.prompt_number("Enter value: ")? else {
                return Ok(false);
            };
            console.show_records(tree.search(value))?;
        }
        Action::Edit => {
            let Some(value) = console.prompt_number("Enter value: ")? else {
                return Ok(false);
            };
            let Some(current) = tree.search(value).cloned() else {
                console.say("No data found")?;
                return Ok(true);
            };
            let Some(new_value) = console.prompt_number("Enter the new Value: ")? else {
                return Ok(false);
            };
            report(
                console,
                tree.update(value, current.with_value(new_value)),
                "Data updated",
            )?;
        }
        Action::Delete => {
            let Some(value) = console.prompt_number("Enter value: ")? else {
                return Ok(false);
            };
            match tree.delete(value) {
                Some(_) => console.say("Data deleted")?,
                None => console.say("No data found")?,
            }
        }
        Action::Chains => console.say("Invalid choice")?,
    }
    Ok(true)
}

fn hashed_action<R: BufRead, W: Write + ?Sized>(
    console: &mut Console<'_, R, W>,
    table: &mut HashedIndex,
    action: Action,
) -> Step {
    match action {
        Action::List => console.show_records(table.enumerate())?,
        Action::Count => console.say(format!("Records: {}", table.count()))?,
        Action::Chains => {
            for (bucket, length) in table.chain_lengths().into_iter().enumerate() {
                console.say(format!("{}: {}", bucket, length))?;
            }
        }
        Action::Search => {
            let Some(date) = console.prompt_date()? else {
                return Ok(false);
            };
            console.show_records(table.search(&date))?;
        }
        Action::Edit => {
            let Some(date) = console.prompt_date()? else {
                return Ok(false);
            };
            if table.search(&date).is_none() {
                console.say("No data found")?;
                return Ok(true);
            }
            let Some(value) = console.prompt_number("Enter the new Value: ")? else {
                return Ok(false);
            };
            report(console, table.update(&date, value), "Data updated")?;
        }
        Action::Delete => {
            let Some(date) = console.prompt_date()? else {
                return Ok(false);
            };
            match table.delete(&date) {
                Some(_) => console.say("Data deleted")?,
                None => console.say("No data found")?,
            }
        }
        Action::Max | Action::Min => console.say("Invalid choice")?,
    }
    Ok(true)
}
