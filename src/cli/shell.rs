//! Interactive shell
//!
//! A line-oriented session over one in-memory store. Each line is split
//! with shell quoting rules and parsed as a command. The session keeps its
//! own filter criteria, which every report command applies.

use std::io::{BufRead, Write};

use chrono::Local;
use clap::{Args, Parser, Subcommand};
use log::debug;

use super::report::{write_breakdown, write_list, write_overview, write_summary};
use crate::config::Settings;
use crate::display::{format_expense_details, format_user_table};
use crate::error::{SpendError, SpendResult};
use crate::export::OutputFormat;
use crate::models::{ExpenseForm, ExpenseId, UserForm, UserId};
use crate::reports::GroupBy;
use crate::services::filter::{FilterCriteria, FilterField};
use crate::services::{DeleteOutcome, ExpenseService, UserService};
use crate::storage::Storage;

const PROMPT: &str = "spendboard> ";

#[derive(Parser, Debug)]
#[command(name = "spendboard", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    /// List the expenses matching the current filters
    #[command(alias = "ls")]
    List {
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Show count, total and average of the filtered expenses
    Summary,

    /// Chart the filtered expenses grouped by category, account, type,
    /// subcategory or created-by
    Chart {
        #[arg(default_value = "category")]
        by: GroupBy,
    },

    /// Show summary, charts and ledger together
    Report,

    /// Show, change or clear the current filters
    Filter {
        #[command(subcommand)]
        action: Option<FilterAction>,
    },

    /// Record a new expense
    Add(AddArgs),

    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        id: String,
        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Edit an expense
    Edit { id: String },

    /// List users
    Users,

    /// Add or delete users
    #[command(subcommand)]
    User(UserAction),

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand, Debug)]
enum FilterAction {
    /// Show the active filters
    Show,
    /// Set one filter; leave the value out to clear it
    Set {
        /// from, to, min, max, type, category, account or created-by
        field: FilterField,
        #[arg(allow_hyphen_values = true)]
        value: Option<String>,
    },
    /// Clear every filter and restore the default date window
    Clear,
}

#[derive(Args, Debug)]
struct AddArgs {
    /// Date (YYYY-MM-DD), today if omitted
    #[arg(long)]
    date: Option<String>,
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    price: String,
    #[arg(long = "type", default_value = "")]
    expense_type: String,
    #[arg(long, default_value = "")]
    category: String,
    #[arg(long, default_value = "")]
    subcategory: String,
    #[arg(long, default_value = "")]
    account: String,
    #[arg(long, default_value = "")]
    created_by: String,
    #[arg(long, default_value = "")]
    description: String,
}

impl From<AddArgs> for ExpenseForm {
    fn from(args: AddArgs) -> Self {
        Self {
            date: args
                .date
                .unwrap_or_else(|| Local::now().date_naive().format("%Y-%m-%d").to_string()),
            price: args.price,
            expense_type: args.expense_type,
            category: args.category,
            subcategory: args.subcategory,
            account: args.account,
            created_by: args.created_by,
            description: args.description,
        }
    }
}

#[derive(Subcommand, Debug)]
enum UserAction {
    /// Add a user; prompts for the password if it isn't given
    Add {
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        #[arg(long, default_value = "")]
        username: String,
        #[arg(long)]
        password: Option<String>,
    },
    /// Delete a user
    Delete {
        id: String,
        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Whether the session should keep reading commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive session over a store
pub struct Shell<'a, R, W> {
    storage: &'a mut Storage,
    settings: &'a Settings,
    criteria: FilterCriteria,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(storage: &'a mut Storage, settings: &'a Settings, input: R, output: W) -> Self {
        Self {
            criteria: FilterCriteria::new(settings.default_window()),
            storage,
            settings,
            input,
            output,
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Read and run commands until `quit` or end of input
    pub fn run(&mut self) -> SpendResult<()> {
        writeln!(
            self.output,
            "spendboard shell. Type `help` for commands, `quit` to leave."
        )?;

        loop {
            write!(self.output, "{}", PROMPT)?;
            self.output.flush()?;

            let Some(line) = read_line(&mut self.input)? else {
                writeln!(self.output)?;
                break;
            };

            match self.execute_line(&line) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => writeln!(self.output, "Error: {}", e)?,
            }
        }

        Ok(())
    }

    /// Run a single command line
    pub fn execute_line(&mut self, line: &str) -> SpendResult<Flow> {
        let Some(tokens) = shlex::split(line) else {
            return Err(SpendError::Validation("Unbalanced quotes".into()));
        };
        if tokens.is_empty() {
            return Ok(Flow::Continue);
        }
        debug!("Shell command: {:?}", tokens);

        match ShellLine::try_parse_from(tokens) {
            Ok(parsed) => self.execute(parsed.command),
            Err(e) => {
                write!(self.output, "{}", e.render())?;
                Ok(Flow::Continue)
            }
        }
    }

    fn execute(&mut self, command: ShellCommand) -> SpendResult<Flow> {
        let records = self.storage.expenses.all();

        match command {
            ShellCommand::List { format } => {
                write_list(records, &self.criteria, self.settings, format, &mut self.output)?
            }
            ShellCommand::Summary => write_summary(
                records,
                &self.criteria,
                self.settings,
                OutputFormat::Table,
                &mut self.output,
            )?,
            ShellCommand::Chart { by } => write_breakdown(
                records,
                &self.criteria,
                by,
                self.settings,
                OutputFormat::Table,
                &mut self.output,
            )?,
            ShellCommand::Report => write_overview(
                records,
                &self.criteria,
                self.settings,
                OutputFormat::Table,
                &mut self.output,
            )?,
            ShellCommand::Filter { action } => self.filter(action)?,
            ShellCommand::Add(args) => self.add(args.into())?,
            ShellCommand::Delete { id, yes } => self.delete_expense(ExpenseId::from(id), yes)?,
            ShellCommand::Edit { id } => {
                ExpenseService::new(self.storage).edit(&ExpenseId::from(id))?;
            }
            ShellCommand::Users => write!(
                self.output,
                "{}",
                format_user_table(self.storage.users.all(), &self.settings.date_format)
            )?,
            ShellCommand::User(action) => self.user(action)?,
            ShellCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn filter(&mut self, action: Option<FilterAction>) -> SpendResult<()> {
        match action {
            None | Some(FilterAction::Show) => {}
            Some(FilterAction::Set { field, value }) => {
                self.criteria.set_field(field, value.as_deref().unwrap_or(""))?;
            }
            Some(FilterAction::Clear) => {
                self.criteria.clear(self.settings.default_window());
            }
        }
        writeln!(self.output, "Filters: {}", self.criteria)?;
        Ok(())
    }

    fn add(&mut self, form: ExpenseForm) -> SpendResult<()> {
        let expense = ExpenseService::new(self.storage).create(&form)?;
        writeln!(self.output, "Created expense {}", expense.id)?;
        write!(
            self.output,
            "{}",
            format_expense_details(&expense, &self.settings.date_format)
        )?;
        Ok(())
    }

    fn delete_expense(&mut self, id: ExpenseId, yes: bool) -> SpendResult<()> {
        let Self {
            storage,
            input,
            output,
            ..
        } = self;

        let outcome = ExpenseService::new(storage).delete(&id, |expense| {
            yes || confirm(
                input,
                output,
                &format!(
                    "{}\nAre you sure you want to delete this expense?",
                    expense
                ),
            )
        })?;

        match outcome {
            DeleteOutcome::Deleted(expense) => {
                writeln!(self.output, "Deleted expense {}", expense.id)?
            }
            DeleteOutcome::Cancelled => writeln!(self.output, "Delete cancelled")?,
            DeleteOutcome::NotFound => {
                writeln!(self.output, "No expense with id {}; nothing deleted", id)?
            }
        }
        Ok(())
    }

    fn user(&mut self, action: UserAction) -> SpendResult<()> {
        match action {
            UserAction::Add {
                first_name,
                last_name,
                username,
                password,
            } => {
                let password = match password {
                    Some(password) => password,
                    None => {
                        write!(self.output, "Password: ")?;
                        self.output.flush()?;
                        read_line(&mut self.input)?.unwrap_or_default()
                    }
                };
                let form = UserForm {
                    first_name,
                    last_name,
                    username,
                    password,
                };

                let user = UserService::new(self.storage).create(&form)?;
                writeln!(self.output, "Created user {} [{}]", user, user.id)?;
            }
            UserAction::Delete { id, yes } => {
                let id = UserId::from(id);
                let Self {
                    storage,
                    input,
                    output,
                    ..
                } = self;

                let outcome = UserService::new(storage).delete(&id, |user| {
                    yes || confirm(
                        input,
                        output,
                        &format!("{}\nAre you sure you want to delete this user?", user),
                    )
                })?;

                match outcome {
                    DeleteOutcome::Deleted(user) => {
                        writeln!(self.output, "Deleted user {}", user.username)?
                    }
                    DeleteOutcome::Cancelled => writeln!(self.output, "Delete cancelled")?,
                    DeleteOutcome::NotFound => {
                        writeln!(self.output, "No user with id {}; nothing deleted", id)?
                    }
                }
            }
        }
        Ok(())
    }
}

/// Read one line without its line ending; `None` at end of input
fn read_line<R: BufRead>(input: &mut R) -> SpendResult<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Ask a yes/no question; anything but "y" or "yes" is a no
fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> bool {
    if write!(output, "{} [y/N] ", question)
        .and_then(|_| output.flush())
        .is_err()
    {
        return false;
    }

    match read_line(input) {
        Ok(Some(answer)) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(storage: &mut Storage, script: &str) -> String {
        let settings = Settings::default();
        let mut out = Vec::new();
        Shell::new(storage, &settings, Cursor::new(script.to_string()), &mut out)
            .run()
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_filter_then_summary() {
        let mut storage = Storage::from_sample().unwrap();
        let out = run_script(&mut storage, "filter set category Food\nsummary\nquit\n");

        assert!(out.contains("Filters: 2024-12-01 to 2024-12-31, category = Food"));
        assert!(out.contains("Number of Expenses: 2"));
        assert!(out.contains("Total Expenses:     €153.30"));
    }

    #[test]
    fn test_filter_clear() {
        let mut storage = Storage::from_sample().unwrap();
        let settings = Settings::default();
        let mut out = Vec::new();
        let mut shell = Shell::new(&mut storage, &settings, Cursor::new(String::new()), &mut out);

        shell.execute_line("filter set min 100").unwrap();
        shell.execute_line("filter set account 'Petty Cash'").unwrap();
        assert!(shell.criteria().has_optional_constraints());
        assert_eq!(shell.criteria().account.as_deref(), Some("Petty Cash"));

        shell.execute_line("filter clear").unwrap();
        assert_eq!(
            shell.criteria(),
            &FilterCriteria::new(settings.default_window())
        );
    }

    #[test]
    fn test_malformed_price_filter_is_ignored() {
        let mut storage = Storage::from_sample().unwrap();
        let out = run_script(&mut storage, "filter set max lots\nsummary\n");
        assert!(out.contains("Number of Expenses: 6"));
    }

    #[test]
    fn test_delete_confirmed() {
        let mut storage = Storage::from_sample().unwrap();
        let out = run_script(&mut storage, "delete 3\ny\nquit\n");

        assert!(out.contains("Are you sure you want to delete this expense? [y/N]"));
        assert!(out.contains("Deleted expense 3"));
        assert_eq!(storage.expenses.len(), 5);
    }

    #[test]
    fn test_delete_declined() {
        let mut storage = Storage::from_sample().unwrap();
        let out = run_script(&mut storage, "delete 3\n\nquit\n");

        assert!(out.contains("Delete cancelled"));
        assert_eq!(storage.expenses.len(), 6);
    }

    #[test]
    fn test_delete_unknown_id_does_not_prompt() {
        let mut storage = Storage::from_sample().unwrap();
        let out = run_script(&mut storage, "delete 42\nquit\n");

        assert!(!out.contains("Are you sure"));
        assert!(out.contains("No expense with id 42; nothing deleted"));
        assert_eq!(storage.expenses.len(), 6);
    }

    #[test]
    fn test_add_expense() {
        let mut storage = Storage::from_sample().unwrap();
        let out = run_script(
            &mut storage,
            "add --date 2024-12-20 --price 12.50 --type Personal --category Food \
             --account Cash --created-by \"Jane Smith\"\nlist\n",
        );

        assert!(out.contains("Created expense exp-"));
        assert!(out.contains("Showing 7 of 7 expenses"));
        assert_eq!(storage.expenses.len(), 7);
        assert_eq!(storage.expenses.all()[6].created_by, "Jane Smith");
    }

    #[test]
    fn test_add_invalid_expense() {
        let mut storage = Storage::from_sample().unwrap();
        let out = run_script(&mut storage, "add --price abc --category Food\n");

        assert!(out.contains("Error: Invalid input:"));
        assert!(out.contains("price: Price must be a number"));
        assert!(out.contains("account: Account is required"));
        assert_eq!(storage.expenses.len(), 6);
    }

    #[test]
    fn test_edit_reports_unavailable() {
        let mut storage = Storage::from_sample().unwrap();
        let out = run_script(&mut storage, "edit 1\n");
        assert!(out.contains("Edit functionality will be added later"));
    }

    #[test]
    fn test_user_add_prompts_for_password() {
        let mut storage = Storage::new();
        let out = run_script(
            &mut storage,
            "user add --first-name Jane --last-name Smith --username jsmith\nsecret123\nusers\n",
        );

        assert!(out.contains("Password: "));
        assert!(out.contains("Created user Jane Smith (@jsmith)"));
        assert_eq!(storage.users.len(), 1);
        assert!(storage.users.all()[0].verify_password("secret123"));
    }

    #[test]
    fn test_user_add_validation() {
        let mut storage = Storage::new();
        let out = run_script(&mut storage, "user add --username jo --password abc\n");

        assert!(out.contains("username: Username must be at least 3 characters"));
        assert!(out.contains("password: Password must be at least 6 characters"));
        assert!(out.contains("first_name: First name is required"));
        assert!(storage.users.is_empty());
    }

    #[test]
    fn test_unknown_command_and_bad_quotes() {
        let mut storage = Storage::from_sample().unwrap();
        let out = run_script(&mut storage, "frobnicate\nlist --category \"Food\nquit\n");

        assert!(out.contains("frobnicate"));
        assert!(out.contains("Error: Validation error: Unbalanced quotes"));
    }

    #[test]
    fn test_chart_by_account() {
        let mut storage = Storage::from_sample().unwrap();
        let out = run_script(&mut storage, "chart account\n");

        assert!(out.contains("Expenses by Account"));
        assert!(out.contains("Company Bank Account"));
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let mut storage = Storage::from_sample().unwrap();
        let out = run_script(&mut storage, "");
        assert!(out.starts_with("spendboard shell."));
    }
}
