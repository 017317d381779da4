//! Gridstore CLI - Import CSV files into a local store and display them
//!
//! # Commands
//!
//! ```bash
//! gridstore import input.csv        # Import a CSV into the store
//! gridstore show                    # Display the working table
//! gridstore show --view slim        # Display through a named view
//! gridstore columns                 # List the live columns
//! gridstore view list               # Manage named views
//! gridstore view create slim -c name -c city
//! ```
//!
//! The store path comes from `--db`, the `GRIDSTORE_DB` environment
//! variable, or defaults to `gridstore.db`.

use clap::{Parser, Subcommand};
use gridstore::{import_csv, Store, TableData};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gridstore")]
#[command(about = "Import CSV files into a local SQLite store with named views", long_about = None)]
struct Cli {
    /// Store file (default: $GRIDSTORE_DB or gridstore.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a CSV file, replacing the store's contents
    Import {
        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,
    },

    /// Display the working table, optionally through a named view
    Show {
        /// Named view to project through
        #[arg(short, long)]
        view: Option<String>,

        /// Emit JSON instead of an aligned table
        #[arg(long)]
        json: bool,
    },

    /// List the live columns of the working table
    Columns,

    /// Manage named views
    View {
        #[command(subcommand)]
        action: ViewAction,
    },
}

#[derive(Subcommand)]
enum ViewAction {
    /// List all stored views
    List,

    /// Create (or replace) a named view
    Create {
        /// View name
        name: String,

        /// Column to include, in order; repeatable
        #[arg(short = 'c', long = "column", required = true)]
        columns: Vec<String>,
    },

    /// Show one view's column list
    Show {
        /// View name
        name: String,
    },
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let db = resolve_db(cli.db);

    let result = match cli.command {
        Commands::Import { input, delimiter } => cmd_import(&db, &input, delimiter),
        Commands::Show { view, json } => cmd_show(&db, view.as_deref(), json),
        Commands::Columns => cmd_columns(&db),
        Commands::View { action } => cmd_view(&db, action),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn resolve_db(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var("GRIDSTORE_DB").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("gridstore.db"))
}

fn cmd_import(
    db: &PathBuf,
    input: &PathBuf,
    delimiter: Option<char>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Importing: {}", input.display());

    let store = Store::new(db);
    let report = import_csv(input, &store, delimiter)?;

    eprintln!("   Encoding: {}", report.encoding);
    eprintln!(
        "   Delimiter: '{}'{}",
        format_delimiter(report.delimiter),
        if delimiter.is_none() {
            " (auto-detected)"
        } else {
            ""
        }
    );
    eprintln!("   Columns: {}", report.columns.join(", "));
    eprintln!("Loaded {} rows into {}", report.rows, db.display());
    Ok(())
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}

fn cmd_show(
    db: &PathBuf,
    view: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open_existing(db)?;

    let data = match view {
        Some(name) => store.fetch_view(name)?,
        None => store.fetch_all()?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&data)?);
    } else {
        print_table(&data);
        eprintln!("{} rows", data.row_count());
    }
    Ok(())
}

fn cmd_columns(db: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open_existing(db)?;
    for column in store.schema()?.columns() {
        println!("{column}");
    }
    Ok(())
}

fn cmd_view(db: &PathBuf, action: ViewAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open_existing(db)?;

    match action {
        ViewAction::List => {
            let views = store.views()?;
            if views.is_empty() {
                eprintln!("No views stored yet.");
                eprintln!("   Use 'gridstore view create <name> -c <column>' to add one.");
                return Ok(());
            }

            eprintln!("Stored views ({}):\n", views.len());
            for v in views {
                println!("  {} ({})", v.name, v.columns.join(", "));
                println!("     Created: {}", v.created_at);
            }
        }

        ViewAction::Create { name, columns } => {
            store.save_view(&name, &columns)?;
            eprintln!("View '{name}' saved ({} columns)", columns.len());
        }

        ViewAction::Show { name } => {
            for column in store.view_columns(&name)? {
                println!("{column}");
            }
        }
    }

    Ok(())
}

fn print_table(data: &TableData) {
    let mut widths: Vec<usize> = data.columns.iter().map(|c| c.chars().count()).collect();
    for row in &data.rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let header: Vec<String> = data
        .columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{c:<width$}", width = widths[i]))
        .collect();
    println!("{}", header.join("  "));
    println!("{}", "-".repeat(header.join("  ").chars().count()));

    for row in &data.rows {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{cell:<width$}", width = widths[i]))
            .collect();
        println!("{}", line.join("  "));
    }
}
