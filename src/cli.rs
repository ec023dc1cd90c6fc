//! Command-line surface for the `roster` binary.
//!
//! Each invocation opens the database and runs a single command, either
//! against one collection (loaded in its stored sort order) or against the
//! local accounts. Positions on the command line are 1-based and refer to the
//! sorted list as printed by `list`.

use std::fmt;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::auth::{self, Credentials, Registration};
use crate::config::{Config, HOME_ENV};
use crate::db::{RecordStore, SqliteStore};
use crate::editor::{EditMode, Editor};
use crate::models::{Musician, Person, Record};
use crate::roster::Roster;
use crate::seed::seed_file;
use crate::sort::SortOption;

#[derive(Debug, Parser)]
#[command(name = "roster", version, about = "Keep track of people and musicians")]
pub struct Cli {
    /// Data directory holding the SQLite database
    #[arg(long, global = true, env = HOME_ENV)]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub section: Section,
}

#[derive(Debug, Subcommand)]
pub enum Section {
    /// Work with the people collection
    People {
        #[command(subcommand)]
        command: Command,
    },
    /// Work with the musicians collection
    Musicians {
        #[command(subcommand)]
        command: Command,
    },
    /// Sign up, sign in or out. Collections do not require an account.
    Users {
        #[command(subcommand)]
        command: UserCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Register a new account
    Signup {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        username: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        confirm_email: String,
        #[arg(long, default_value = "")]
        password: String,
        #[arg(long, default_value = "")]
        confirm_password: String,
    },
    /// Sign in with a username and password
    Signin {
        #[arg(long, default_value = "")]
        username: String,
        #[arg(long, default_value = "")]
        password: String,
    },
    /// Forget the signed-in account
    Signout,
    /// Show the signed-in account
    Whoami,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the collection in its current order
    List {
        /// Re-sort (and remember the order) before printing
        #[arg(long)]
        sort: Option<SortOption>,
        /// Only show entries whose name contains TEXT (case-sensitive)
        #[arg(long, value_name = "TEXT")]
        search: Option<String>,
    },
    /// Add a new entry
    Add {
        /// Field assignment, repeatable
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
        /// Select one of the available images
        #[arg(long, value_name = "ID")]
        image: Option<String>,
    },
    /// Edit the entry at POSITION
    Edit {
        position: usize,
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
        /// Toggle one of the available images
        #[arg(long, value_name = "ID")]
        image: Option<String>,
    },
    /// Delete the entry at POSITION
    Delete { position: usize },
    /// Delete every entry in the collection
    DeleteAll,
    /// Change the stored sort order
    Sort { option: SortOption },
    /// List the images offered by the picker
    Images,
    /// Import a bundled JSON file once
    Seed { file: PathBuf },
}

pub fn run(cli: Cli) -> Result<()> {
    let config = Config::resolve(cli.home)?;
    let db_path = config.db_path();
    debug!(db = %db_path.display(), "opening database");
    let store = SqliteStore::open(&db_path)?;

    match cli.section {
        Section::People { command } => run_command::<Person>(store, command),
        Section::Musicians { command } => run_command::<Musician>(store, command),
        Section::Users { command } => run_user_command(store, command),
    }
}

fn run_user_command(mut store: SqliteStore, command: UserCommand) -> Result<()> {
    match command {
        UserCommand::Signup {
            name,
            username,
            email,
            confirm_email,
            password,
            confirm_password,
        } => {
            let registration = Registration {
                full_name: name,
                username,
                email,
                confirm_email,
                password,
                confirm_password,
            };
            let user = auth::sign_up(&mut store, &registration)?;
            println!("Registered {user}");
        }
        UserCommand::Signin { username, password } => {
            let user = auth::sign_in(&mut store, &Credentials { username, password })?;
            println!("Signed in as {user}");
        }
        UserCommand::Signout => {
            if auth::sign_out(&mut store)? {
                println!("Signed out");
            } else {
                println!("Nobody is signed in");
            }
        }
        UserCommand::Whoami => match auth::current_user(&store)? {
            Some(user) => println!("{user}"),
            None => println!("Nobody is signed in"),
        },
    }
    Ok(())
}

fn run_command<R>(store: SqliteStore, command: Command) -> Result<()>
where
    R: Record + fmt::Display,
    SqliteStore: RecordStore<R>,
{
    let mut roster: Roster<R, SqliteStore> = Roster::new(store);
    roster.load()?;

    match command {
        Command::List { sort, search } => {
            if let Some(option) = sort {
                roster.set_sort(option)?;
            }
            if let Some(text) = search {
                roster.search(&text);
            }
            print_list(&roster);
        }
        Command::Add { set, image } => {
            let images = roster.store().available_images(R::KIND)?;
            let mut editor: Editor<R> = Editor::new(EditMode::Add, images);
            fill(&mut editor, &set, image.as_deref())?;
            let position = roster.apply(editor.commit()?)?;
            print_saved("Added", &roster, position);
        }
        Command::Edit {
            position,
            set,
            image,
        } => {
            let index = index_of(&roster, position)?;
            let original = roster.records()[index].clone();
            let images = roster.store().available_images(R::KIND)?;
            let mut editor = Editor::new(EditMode::Edit(original), images);
            fill(&mut editor, &set, image.as_deref())?;
            let position = roster.apply(editor.commit()?)?;
            print_saved("Updated", &roster, position);
        }
        Command::Delete { position } => {
            let index = index_of(&roster, position)?;
            let removed = roster.remove(index)?;
            println!("Deleted {removed}");
        }
        Command::DeleteAll => {
            let removed = roster.remove_all()?;
            println!("Deleted {removed} {}", R::KIND.key());
        }
        Command::Sort { option } => {
            roster.set_sort(option)?;
            println!("{}: {}", R::KIND.key(), option.title());
        }
        Command::Images => {
            let images = roster.store().available_images(R::KIND)?;
            if images.is_empty() {
                println!("No images available");
            }
            for image in images {
                println!("{image}");
            }
        }
        Command::Seed { file } => match seed_file(roster.store_mut(), R::KIND, &file)? {
            Some(report) => println!(
                "Imported {} {} ({} skipped, {} images available)",
                report.imported,
                R::KIND.key(),
                report.skipped,
                report.images
            ),
            None => println!("{} were already seeded", R::KIND.key()),
        },
    }
    Ok(())
}

fn fill<R: Record>(
    editor: &mut Editor<R>,
    assignments: &[(String, String)],
    image: Option<&str>,
) -> Result<()> {
    for (key, value) in assignments {
        editor.set_field_by_key(key, value)?;
    }
    if let Some(image) = image {
        editor.select_image(image)?;
    }
    Ok(())
}

/// Turn a 1-based position into an index into the sorted records.
fn index_of<R, S>(roster: &Roster<R, S>, position: usize) -> Result<usize>
where
    R: Record,
    S: RecordStore<R>,
{
    position
        .checked_sub(1)
        .filter(|index| *index < roster.len())
        .ok_or_else(|| anyhow!("There is no {} at position {position}", R::KIND.singular()))
}

fn print_list<R, S>(roster: &Roster<R, S>)
where
    R: Record + fmt::Display,
    S: RecordStore<R>,
{
    let query = roster.query();
    let mut shown = 0;
    for (index, record) in roster.records().iter().enumerate() {
        if !query.matches(record) {
            continue;
        }
        println!("{:>3}. {record}", index + 1);
        shown += 1;
    }
    if shown == 0 {
        println!("No {} found", R::KIND.key());
    }
}

fn print_saved<R, S>(verb: &str, roster: &Roster<R, S>, index: usize)
where
    R: Record + fmt::Display,
    S: RecordStore<R>,
{
    if let Some(record) = roster.get(index) {
        println!("{verb} #{}: {record}", index + 1);
    }
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field name in `{raw}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn assignments_split_on_first_equals() {
        assert_eq!(
            parse_assignment("bio=a=b").unwrap(),
            ("bio".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_assignment(" name =").unwrap(),
            ("name".to_string(), String::new())
        );
        assert!(parse_assignment("name").is_err());
        assert!(parse_assignment("=x").is_err());
    }

    #[test]
    fn parses_nested_commands() {
        let cli = Cli::try_parse_from([
            "roster",
            "musicians",
            "edit",
            "2",
            "--set",
            "genres=Jazz",
            "--image",
            "poster-a",
        ])
        .unwrap();
        match cli.section {
            Section::Musicians {
                command:
                    Command::Edit {
                        position,
                        set,
                        image,
                    },
            } => {
                assert_eq!(position, 2);
                assert_eq!(set, vec![("genres".to_string(), "Jazz".to_string())]);
                assert_eq!(image.as_deref(), Some("poster-a"));
            }
            other => panic!("unexpected parse: {other:?}"),
        }

        let cli = Cli::try_parse_from(["roster", "people", "list", "--sort", "oldest"]).unwrap();
        assert!(matches!(
            cli.section,
            Section::People {
                command: Command::List {
                    sort: Some(SortOption::Oldest),
                    search: None
                }
            }
        ));
    }

    #[test]
    fn user_flags_default_to_blank() {
        let cli = Cli::try_parse_from(["roster", "users", "signin", "--username", "ada"]).unwrap();
        match cli.section {
            Section::Users {
                command: UserCommand::Signin { username, password },
            } => {
                assert_eq!(username, "ada");
                assert!(password.is_empty());
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }
}
