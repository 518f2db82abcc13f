// Line-oriented command console driving an Admin

use crate::filter::{Page, StatusFilter};
use crate::jsonl;
use crate::notify::Notifier;
use crate::panel::{Admin, Panel};
use crate::record::RecordKind;
use crate::session::{DraftField, FieldValue};
use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::{Result, eyre};
use std::io::{BufRead, Write};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "roster", no_binary_name = true, disable_version_flag = true)]
struct ConsoleLine {
    #[command(subcommand)]
    command: ConsoleCommand,
}

#[derive(Subcommand, Debug)]
enum ConsoleCommand {
    /// Work with the student list
    #[command(visible_alias = "s")]
    Students {
        #[command(subcommand)]
        action: Action,
    },

    /// Work with the teacher list
    #[command(visible_alias = "t")]
    Teachers {
        #[command(subcommand)]
        action: Action,
    },

    /// Leave the console
    #[command(visible_alias = "exit")]
    Quit,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Show the current page
    List,

    /// Search by name; no text clears the search
    Search { text: Option<String> },

    /// Filter by completion status
    Status {
        #[arg(value_enum)]
        status: StatusFilter,
    },

    /// Filter by group/level; no value clears the filter
    Category { value: Option<String> },

    /// Go to a page (1-based)
    Page { number: usize },

    /// Start a new record
    New,

    /// Start editing a record
    Edit { id: u64 },

    /// Set a draft field (name, username, email, completed, group/level)
    Set { field: String, value: String },

    /// Show the draft being edited
    Draft,

    /// Save the draft
    Submit,

    /// Discard the draft
    Cancel,

    /// Delete a record
    Delete { id: u64 },

    /// Print all records as JSON lines
    Export,
}

/// Whether the console should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Console<'a> {
    admin: Admin,
    notifier: &'a dyn Notifier,
}

impl<'a> Console<'a> {
    pub fn new(admin: Admin, notifier: &'a dyn Notifier) -> Self {
        Self { admin, notifier }
    }

    pub fn admin(&self) -> &Admin {
        &self.admin
    }

    /// Read commands until end of input or `quit`
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            if self.execute(&line, out)? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Run one command line. Bad input is reported on `out`, not returned.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let words = match split_words(line) {
            Ok(words) if words.is_empty() => return Ok(Flow::Continue),
            Ok(words) => words,
            Err(e) => {
                writeln!(out, "{}", e)?;
                return Ok(Flow::Continue);
            }
        };

        let parsed = match ConsoleLine::try_parse_from(&words) {
            Ok(parsed) => parsed,
            Err(e) => {
                write!(out, "{}", e)?;
                return Ok(Flow::Continue);
            }
        };
        debug!(?parsed, "Console command");

        match parsed.command {
            ConsoleCommand::Students { action } => apply(&mut self.admin.students, action, self.notifier, out)?,
            ConsoleCommand::Teachers { action } => apply(&mut self.admin.teachers, action, self.notifier, out)?,
            ConsoleCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}

fn apply<K: RecordKind, W: Write>(
    panel: &mut Panel<K>,
    action: Action,
    notifier: &dyn Notifier,
    out: &mut W,
) -> Result<()> {
    match action {
        Action::List => render_page(&panel.current_page(), out)?,
        Action::Search { text } => {
            panel.set_query(text.unwrap_or_default());
            render_page(&panel.current_page(), out)?;
        }
        Action::Status { status } => {
            panel.set_status_filter(status);
            render_page(&panel.current_page(), out)?;
        }
        Action::Category { value } => {
            panel.set_category_filter(value.unwrap_or_default());
            render_page(&panel.current_page(), out)?;
        }
        Action::Page { number } => {
            panel.set_page(number);
            render_page(&panel.current_page(), out)?;
        }
        Action::New => {
            panel.open_create();
            writeln!(out, "New {} draft opened", K::DISPLAY_NAME.to_lowercase())?;
        }
        Action::Edit { id } => {
            if panel.open_edit(id) {
                writeln!(out, "Editing {} {}", K::DISPLAY_NAME.to_lowercase(), id)?;
            } else {
                writeln!(out, "No {} with id {}", K::DISPLAY_NAME.to_lowercase(), id)?;
            }
        }
        Action::Set { field, value } => {
            if !panel.session().is_open() {
                writeln!(out, "No draft open; use `new` or `edit <id>` first")?;
                return Ok(());
            }
            let result = DraftField::parse::<K>(&field)
                .and_then(|field| Ok((field, field_value(field, value)?)))
                .and_then(|(field, value)| panel.update_draft_field(field, value));
            if let Err(e) = result {
                writeln!(out, "{}", e)?;
            }
        }
        Action::Draft => {
            let session = panel.session();
            if !session.is_open() {
                writeln!(out, "No draft open")?;
                return Ok(());
            }
            let draft = session.draft();
            match session.target_id() {
                Some(id) => writeln!(out, "Editing {} {}", K::DISPLAY_NAME.to_lowercase(), id)?,
                None => writeln!(out, "New {}", K::DISPLAY_NAME.to_lowercase())?,
            }
            writeln!(out, "  name:      {}", draft.name)?;
            writeln!(out, "  username:  {}", draft.username)?;
            writeln!(out, "  email:     {}", draft.email)?;
            writeln!(out, "  completed: {}", draft.completed)?;
            writeln!(out, "  {:<10} {}", format!("{}:", K::CATEGORY_LABEL), draft.category)?;
        }
        Action::Submit => {
            if panel.submit(notifier).is_none() {
                writeln!(out, "No draft open")?;
            }
        }
        Action::Cancel => panel.close(),
        Action::Delete { id } => {
            panel.delete(id, notifier);
        }
        Action::Export => jsonl::write_jsonl(out, panel.store().records())?,
    }
    Ok(())
}

fn field_value(field: DraftField, raw: String) -> Result<FieldValue> {
    match field {
        DraftField::Completed => raw
            .parse::<bool>()
            .map(FieldValue::Flag)
            .map_err(|_| eyre!("completed must be true or false, got {:?}", raw)),
        _ => Ok(FieldValue::Text(raw)),
    }
}

/// Print a page as a table followed by the pager line
pub fn render_page<K: RecordKind, W: Write>(page: &Page<'_, K>, out: &mut W) -> Result<()> {
    let label = capitalize(K::CATEGORY_LABEL);
    writeln!(
        out,
        "{}",
        format!(
            "{:>4}  {:<24}  {:<16}  {:<28}  {:<9}  {}",
            "ID", "Name", "Username", "Email", "Completed", label
        )
        .bold()
    )?;

    for r in &page.records {
        writeln!(
            out,
            "{:>4}  {:<24}  {:<16}  {:<28}  {:<9}  {}",
            r.id,
            r.name,
            r.username,
            r.email,
            if r.completed { "yes" } else { "no" },
            r.category
        )?;
    }

    if page.records.is_empty() {
        writeln!(out, "(no {} on this page)", K::COLLECTION)?;
    }
    writeln!(
        out,
        "Page {} of {} ({} matching)",
        page.page, page.total_pages, page.total_matches
    )?;
    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Split a line on whitespace; double quotes group words and `""` is an
/// empty argument
fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                in_word = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if in_quotes {
        return Err(eyre!("Unterminated quote in: {}", line));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{MemoryNotifier, Notification};
    use crate::seed::{SeedUser, StaticSeedSource};

    fn admin(n: u64) -> Admin {
        let mut admin = Admin::default();
        let source = StaticSeedSource(
            (1..=n)
                .map(|i| SeedUser::new(i, &format!("Person {}", i), &format!("p{}", i), &format!("p{}@example.com", i)))
                .collect(),
        );
        let (s, t) = admin.seed_all(&source, &MemoryNotifier::new());
        s.unwrap();
        t.unwrap();
        admin
    }

    fn run(console: &mut Console<'_>, line: &str) -> String {
        let mut out = Vec::new();
        console.execute(line, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("  students  list ").unwrap(), vec!["students", "list"]);
        assert_eq!(
            split_words(r#"s set name "Ann Lee""#).unwrap(),
            vec!["s", "set", "name", "Ann Lee"]
        );
        assert_eq!(split_words(r#"t category """#).unwrap(), vec!["t", "category", ""]);
        assert!(split_words(r#"s search "open"#).is_err());
        assert!(split_words("   ").unwrap().is_empty());
    }

    #[test]
    fn test_list_and_paging() {
        let notifier = MemoryNotifier::new();
        let mut console = Console::new(admin(7), &notifier);

        let first = run(&mut console, "students list");
        assert!(first.contains("Person 5"));
        assert!(!first.contains("Person 6"));
        assert!(first.contains("Page 1 of 2 (7 matching)"));

        let third = run(&mut console, "students page 3");
        assert!(third.contains("(no students on this page)"));
        assert!(third.contains("Page 3 of 2"));
    }

    #[test]
    fn test_filters_through_console() {
        let notifier = MemoryNotifier::new();
        let mut console = Console::new(admin(6), &notifier);

        let out = run(&mut console, r#"teachers category "Middle""#);
        assert!(out.contains("Person 2"));
        assert!(out.contains("Person 5"));
        assert!(out.contains("Page 1 of 1 (2 matching)"));

        let out = run(&mut console, "teachers status completed");
        assert!(out.contains("Page 1 of 0 (0 matching)"));

        run(&mut console, "teachers status any");
        let out = run(&mut console, r#"teachers category """#);
        assert!(out.contains("(6 matching)"));
    }

    #[test]
    fn test_status_accepts_documented_names() {
        let notifier = MemoryNotifier::new();
        let mut console = Console::new(admin(4), &notifier);

        let out = run(&mut console, "students status not_completed");
        assert_eq!(console.admin().students.filter().status, StatusFilter::NotCompleted);
        assert!(out.contains("(4 matching)"));

        run(&mut console, "students status completed");
        assert_eq!(console.admin().students.filter().status, StatusFilter::Completed);

        run(&mut console, "students status not-completed");
        assert_eq!(console.admin().students.filter().status, StatusFilter::NotCompleted);

        run(&mut console, "students status all");
        assert_eq!(console.admin().students.filter().status, StatusFilter::Any);
    }

    #[test]
    fn test_create_and_edit_through_console() {
        let notifier = MemoryNotifier::new();
        let mut console = Console::new(admin(2), &notifier);

        run(&mut console, "students new");
        run(&mut console, r#"students set name "Ann Lee""#);
        run(&mut console, "students set group \"Group C\"");
        run(&mut console, "students set completed true");
        run(&mut console, "students submit");

        let created = console.admin().students.store().get(3).unwrap();
        assert_eq!(created.name, "Ann Lee");
        assert_eq!(created.category, "Group C");
        assert!(created.completed);

        run(&mut console, "students edit 3");
        let draft = run(&mut console, "students draft");
        assert!(draft.contains("Editing student 3"));
        assert!(draft.contains("Ann Lee"));
        run(&mut console, "students set email ann@school.test");
        run(&mut console, "students submit");

        assert_eq!(console.admin().students.store().get(3).unwrap().email, "ann@school.test");
        assert_eq!(
            notifier.notifications(),
            vec![
                Notification::Success("Student created successfully".to_string()),
                Notification::Success("Student updated successfully".to_string()),
            ]
        );
    }

    #[test]
    fn test_cancel_and_delete() {
        let notifier = MemoryNotifier::new();
        let mut console = Console::new(admin(3), &notifier);

        run(&mut console, "teachers edit 1");
        run(&mut console, "teachers set name Changed");
        run(&mut console, "teachers cancel");
        assert_eq!(console.admin().teachers.store().get(1).unwrap().name, "Person 1");

        run(&mut console, "teachers delete 2");
        assert!(console.admin().teachers.store().get(2).is_none());
        assert_eq!(console.admin().students.store().len(), 3);
        assert_eq!(
            notifier.last(),
            Some(Notification::Success("Teacher deleted successfully".to_string()))
        );
    }

    #[test]
    fn test_bad_input_is_reported_not_fatal() {
        let notifier = MemoryNotifier::new();
        let mut console = Console::new(admin(1), &notifier);

        assert!(run(&mut console, "students set name X").contains("No draft open"));
        run(&mut console, "students new");
        assert!(run(&mut console, "students set completed maybe").contains("completed must be true or false"));
        assert!(run(&mut console, "students set level Senior").contains("Unknown student field: level"));
        assert!(run(&mut console, "students edit 99").contains("No student with id 99"));
        assert!(!run(&mut console, "bogus").is_empty());
    }

    #[test]
    fn test_export_writes_json_lines() {
        let notifier = MemoryNotifier::new();
        let mut console = Console::new(admin(2), &notifier);

        let out = run(&mut console, "teachers export");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["category"], "Senior");
        assert_eq!(first["username"], "p1");
    }

    #[test]
    fn test_run_stops_at_quit() {
        let notifier = MemoryNotifier::new();
        let mut console = Console::new(admin(3), &notifier);
        let input = "students delete 1\nquit\nstudents delete 2\n";
        let mut out = Vec::new();

        console.run(input.as_bytes(), &mut out).unwrap();

        assert_eq!(console.admin().students.store().len(), 2);
        assert!(console.admin().students.store().get(2).is_some());
    }
}
