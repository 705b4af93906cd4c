use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use budget_tracker::{
    Category, ExpenseCandidate, ExpenseRepository, PasswordHash, SqliteExpenseRepository,
    ValidatedPassword, create_user, initialize_db,
};

/// A utility for creating a test database for the budget tracker server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Sample expenses as (title, amount, category, days before today).
const SAMPLE_EXPENSES: [(&str, f64, Category, i64); 17] = [
    ("Groceries", 84.20, Category::Food, 0),
    ("Coffee", 4.50, Category::Food, 1),
    ("Bus fare", 3.20, Category::Transportation, 2),
    ("Power bill", 142.75, Category::Utilities, 5),
    ("Cinema tickets", 32.00, Category::Entertainment, 8),
    ("Running shoes", 159.99, Category::Shopping, 12),
    ("Doctor visit", 65.00, Category::Health, 17),
    ("Textbook", 89.95, Category::Education, 21),
    ("Birthday present", 40.00, Category::Other, 26),
    ("Groceries", 76.40, Category::Food, 33),
    ("Petrol", 95.10, Category::Transportation, 38),
    ("Internet", 79.99, Category::Utilities, 45),
    ("Weekend away", 350.00, Category::Travel, 52),
    ("Concert", 120.00, Category::Entertainment, 60),
    ("Pharmacy", 18.30, Category::Health, 74),
    ("Groceries", 91.15, Category::Food, 95),
    ("Winter jacket", 210.00, Category::Shopping, 130),
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

    println!("Creating test user test@example.com with the password 'test'...");

    let password_hash = PasswordHash::new(
        ValidatedPassword::new_unchecked("test"),
        PasswordHash::DEFAULT_COST,
    )?;
    let user = create_user(&"test@example.com".parse()?, password_hash, &conn)?;

    println!("Adding sample expenses...");

    let repository = SqliteExpenseRepository::new(Arc::new(Mutex::new(conn)));
    let today = OffsetDateTime::now_utc().date();

    for (title, amount, category, days_ago) in SAMPLE_EXPENSES {
        let new_expense = ExpenseCandidate {
            title: title.to_owned(),
            amount,
            date: today - Duration::days(days_ago),
            category,
        }
        .validate()?;

        repository.insert(user.id, new_expense)?;
    }

    println!("Success!");

    Ok(())
}
