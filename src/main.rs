use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;

use spendboard::audit::AuditLogger;
use spendboard::cli::{
    write_breakdown, write_list, write_options, write_overview, write_summary, FilterArgs,
    OutputArgs, Shell,
};
use spendboard::config::{paths::HOME_ENV_VAR, Settings, SpendboardPaths};
use spendboard::export::OutputFormat;
use spendboard::reports::GroupBy;
use spendboard::storage::Storage;

#[derive(Parser)]
#[command(
    name = "spendboard",
    author = "Kaylee Beyene",
    version,
    about = "Terminal expense ledger",
    long_about = "spendboard keeps a ledger of expenses and answers questions about it: \
                  filter by date, price and category, total it up, and chart where \
                  the money went by category, account or person."
)]
struct Cli {
    /// Load expenses from a JSON or CSV file instead of the sample ledger
    #[arg(long, global = true, env = "SPENDBOARD_DATA")]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the expenses matching the filters
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filter: FilterArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Count, total and average of the matching expenses
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Total the matching expenses per group, largest first
    Breakdown {
        /// category, account, type, subcategory or created-by
        #[arg(short, long, default_value = "category")]
        by: GroupBy,
        #[command(flatten)]
        filter: FilterArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Summary, charts and ledger together
    Report {
        #[command(flatten)]
        filter: FilterArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Values available to each filter
    Options {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Interactive session: filter, add and delete expenses, manage users
    Shell,

    /// Show recent entries of the audit log
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Write the default settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().filter_or("SPENDBOARD_LOG", "warn"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    let paths = SpendboardPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = match &cli.data {
        Some(path) => Storage::from_file(path)
            .with_context(|| format!("Failed to load expenses from {}", path.display()))?,
        None => Storage::from_sample()?,
    };
    let window = settings.default_window();

    match cli.command {
        Some(Commands::List { filter, output }) => {
            let criteria = filter.to_criteria(window)?;
            let mut out = output.writer()?;
            write_list(storage.expenses.all(), &criteria, &settings, output.format, &mut out)?;
            out.flush()?;
        }
        Some(Commands::Summary { filter, output }) => {
            let criteria = filter.to_criteria(window)?;
            let mut out = output.writer()?;
            write_summary(storage.expenses.all(), &criteria, &settings, output.format, &mut out)?;
            out.flush()?;
        }
        Some(Commands::Breakdown { by, filter, output }) => {
            let criteria = filter.to_criteria(window)?;
            let mut out = output.writer()?;
            write_breakdown(
                storage.expenses.all(),
                &criteria,
                by,
                &settings,
                output.format,
                &mut out,
            )?;
            out.flush()?;
        }
        Some(Commands::Report { filter, output }) => {
            let criteria = filter.to_criteria(window)?;
            let mut out = output.writer()?;
            write_overview(storage.expenses.all(), &criteria, &settings, output.format, &mut out)?;
            out.flush()?;
        }
        Some(Commands::Options { output }) => {
            let mut out = output.writer()?;
            write_options(storage.expenses.all(), output.format, &mut out)?;
            out.flush()?;
        }
        Some(Commands::Shell) => {
            if settings.audit_enabled {
                paths.ensure_directories()?;
                storage = storage.with_audit(AuditLogger::new(paths.audit_log()));
            }

            let stdin = io::stdin();
            let mut shell = Shell::new(&mut storage, &settings, stdin.lock(), io::stdout());
            shell.run()?;
        }
        Some(Commands::Audit { limit }) => {
            let logger = AuditLogger::new(paths.audit_log());
            let entries = logger.read_recent(limit)?;
            if entries.is_empty() {
                println!("No audit entries found.");
                if !settings.audit_enabled {
                    println!("Auditing is off; set \"audit_enabled\": true in {}", paths.settings_file().display());
                }
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        Some(Commands::Init) => {
            println!("Initializing spendboard at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Settings written to {}", paths.settings_file().display());
            println!("Run 'spendboard report' to see the expenses overview.");
        }
        Some(Commands::Config) => {
            println!("spendboard Configuration");
            println!("========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!("Initialized:    {}", paths.is_initialized());
            println!("(Set {} to use a different directory)", HOME_ENV_VAR);
            println!();
            println!("Settings:");
            println!("  Currency:            {}", settings.currency);
            println!("  Date format:         {}", settings.date_format);
            println!("  Default date window: {}", window);
            println!("  Chart width:         {}", settings.chart_width);
            println!("  Audit enabled:       {}", settings.audit_enabled);
            println!();
            match &cli.data {
                Some(path) => println!("Expenses loaded from {}", path.display()),
                None => println!("Using the sample ledger ({} expenses)", storage.expenses.len()),
            }
        }
        None => {
            let criteria = FilterArgs::default().to_criteria(window)?;
            write_overview(
                storage.expenses.all(),
                &criteria,
                &settings,
                OutputFormat::Table,
                io::stdout().lock(),
            )?;
        }
    }

    Ok(())
}
