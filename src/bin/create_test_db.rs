use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use expense_tracker::{CATEGORIES, Expense, create_expense, initialize_db};

/// A utility for creating a test database for the expense tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// How many days of expenses to generate, ending today.
    #[arg(long, short, default_value_t = 30)]
    days: i64,
}

const DESCRIPTIONS: [&str; 8] = [
    "Groceries",
    "Coffee",
    "Bus fare",
    "Taxi",
    "Concert tickets",
    "Movie night",
    "Haircut",
    "Phone bill",
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating expenses for the last {} days...", args.days);

    let today = OffsetDateTime::now_utc().date();
    let mut count = 0;

    for day in 0..args.days {
        let date = today - Duration::days(day);

        // A couple of expenses per day, cycling through descriptions and categories.
        for i in 0..(day % 3 + 1) {
            let index = (day + i) as usize;
            let description = DESCRIPTIONS[index % DESCRIPTIONS.len()];
            let category = CATEGORIES[index % CATEGORIES.len()];
            let amount = ((index * 731) % 9000 + 150) as f64 / 100.0;

            create_expense(Expense::build(description, amount, category, date), &conn)?;
            count += 1;
        }
    }

    println!("Created {count} expenses. Success!");

    Ok(())
}
