mod commands;
mod output;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "hazcom",
    version,
    about = "Hazard communication toolkit: chemical inventory, labels, training and compliance"
)]
struct Cli {
    /// Inventory store (JSON file)
    #[arg(long, global = true, env = "HAZCOM_STORE", default_value = "hazcom.json")]
    store: PathBuf,

    /// Log match and merge decisions
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile a label extraction (JSON) against the reference catalog
    Reconcile {
        /// Path to the extraction JSON
        extraction: PathBuf,

        /// Custom JSON catalog file (default: built-in catalog)
        #[arg(short, long, value_name = "FILE")]
        catalog: Option<PathBuf>,

        /// Add the reconciled chemical to the inventory
        #[arg(long)]
        save: bool,

        /// Storage location for a saved chemical
        #[arg(long, default_value = "")]
        location: String,

        /// Who added the chemical
        #[arg(long, default_value = "hazcom")]
        added_by: String,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Compute the site compliance score
    Score {
        /// Evaluate as of this date (YYYY-MM-DD, default: today)
        #[arg(long, value_name = "DATE")]
        as_of: Option<NaiveDate>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Show the training status of every employee, or record training
    Training {
        #[command(subcommand)]
        action: Option<TrainingAction>,

        /// Evaluate as of this date (YYYY-MM-DD, default: today)
        #[arg(long, value_name = "DATE")]
        as_of: Option<NaiveDate>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Manage the employee roster
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },
    /// Render the GHS container label for an inventory chemical
    Label {
        /// Product name as stored in the inventory
        name: String,

        /// Record that the label has been printed
        #[arg(long)]
        mark_printed: bool,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Import chemicals from an inventory spreadsheet (XLSX)
    Import {
        /// Path to the spreadsheet
        input_file: PathBuf,

        /// Who added the chemicals
        #[arg(long, default_value = "import")]
        added_by: String,
    },
    /// Generate the written hazard communication program
    Program {
        /// Site name printed on the document
        #[arg(long, env = "HAZCOM_SITE", default_value = "Our workplace")]
        site: String,

        /// Generate as of this date (YYYY-MM-DD, default: today)
        #[arg(long, value_name = "DATE")]
        as_of: Option<NaiveDate>,

        /// Output format: markdown (default) or json
        #[arg(short, long, default_value = "markdown")]
        output: String,

        /// Write the document to a file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Generate a contractor safety packet
    Packet {
        /// Work area (storage location) the contractor will be in; default: whole site
        #[arg(long)]
        area: Option<String>,

        /// Site name printed on the packet
        #[arg(long, env = "HAZCOM_SITE", default_value = "Our workplace")]
        site: String,

        /// Generate as of this date (YYYY-MM-DD, default: today)
        #[arg(long, value_name = "DATE")]
        as_of: Option<NaiveDate>,

        /// Output format: markdown (default) or json
        #[arg(short, long, default_value = "markdown")]
        output: String,

        /// Write the packet to a file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Inspect reference catalogs
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum TrainingAction {
    /// Record that an employee completed a training module
    Complete {
        /// Employee name as on the roster (case-insensitive)
        employee: String,

        /// Module id, e.g. ghs-labels (legacy ids m1-m7 accepted)
        module: String,

        /// Completion date (YYYY-MM-DD, default: today)
        #[arg(long, value_name = "DATE")]
        on: Option<NaiveDate>,
    },
}

#[derive(Subcommand)]
enum EmployeeAction {
    /// Add an employee to the roster
    Add {
        name: String,

        /// Job role; owners and managers coordinate the written program
        #[arg(long, default_value = "")]
        role: String,
    },
    /// List the roster
    List {
        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Remove an employee from the roster
    Remove {
        /// Employee name (case-insensitive)
        name: String,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List the built-in catalog entries
    List,
    /// Show one built-in catalog entry
    Show {
        /// Product name (case-insensitive)
        name: String,
    },
    /// Validate a custom catalog file
    Validate {
        /// Path to JSON catalog file
        file: PathBuf,
    },
}

/// Evaluation instant: the start of `as_of`, or the current time.
fn clock(as_of: Option<NaiveDate>) -> DateTime<Utc> {
    match as_of {
        Some(date) => date.and_time(NaiveTime::MIN).and_utc(),
        None => Utc::now(),
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let store = cli.store;
    log::debug!("using store {}", store.display());
    let result = match cli.command {
        Commands::Reconcile {
            extraction,
            catalog,
            save,
            location,
            added_by,
            output,
        } => commands::reconcile::run(
            &extraction,
            catalog.as_deref(),
            save.then_some(store.as_path()),
            &location,
            &added_by,
            &output,
        ),
        Commands::Score { as_of, output } => commands::score::run(&store, clock(as_of), &output),
        Commands::Training {
            action,
            as_of,
            output,
        } => match action {
            None => commands::training::run(&store, clock(as_of), &output),
            Some(TrainingAction::Complete {
                employee,
                module,
                on,
            }) => {
                let now = clock(as_of);
                let completed_on = on.unwrap_or_else(|| now.date_naive());
                commands::training::complete(&store, &employee, &module, completed_on, now)
            }
        },
        Commands::Employee { action } => match action {
            EmployeeAction::Add { name, role } => commands::employee::add(&store, &name, &role),
            EmployeeAction::List { output } => commands::employee::list(&store, &output),
            EmployeeAction::Remove { name } => commands::employee::remove(&store, &name),
        },
        Commands::Label {
            name,
            mark_printed,
            output,
        } => commands::label::run(&store, &name, mark_printed, &output),
        Commands::Import {
            input_file,
            added_by,
        } => commands::import::run(&store, &input_file, &added_by),
        Commands::Program {
            site,
            as_of,
            output,
            out,
        } => commands::program::written(&store, &site, clock(as_of), &output, out.as_deref()),
        Commands::Packet {
            area,
            site,
            as_of,
            output,
            out,
        } => commands::program::packet(
            &store,
            &site,
            area.as_deref(),
            clock(as_of),
            &output,
            out.as_deref(),
        ),
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::catalog::list(),
            CatalogAction::Show { name } => commands::catalog::show(&name),
            CatalogAction::Validate { file } => commands::catalog::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
