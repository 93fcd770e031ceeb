use std::error::Error;
use std::fs;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use serde::Deserialize;

use little_lemon::{MenuItem, initialize_db, insert_menu_item};

/// A utility for creating a test database for the Little Lemon web app.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// A JSON file with the menu to load, e.g. `{"menu": [{"name": "Greek
    /// Salad", "category": "Starters", "price": 12.99}]}`.
    ///
    /// If not given, a sample menu is used.
    #[arg(long)]
    menu_json: Option<String>,
}

#[derive(Deserialize)]
struct MenuFile {
    menu: Vec<MenuItem>,
}

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

    let menu = match &args.menu_json {
        Some(menu_path) => {
            println!("Reading menu from {menu_path:#?}...");
            read_menu(Path::new(menu_path))?
        }
        None => sample_menu()?,
    };

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Adding {} menu items...", menu.len());

    for item in &menu {
        insert_menu_item(item, &conn)?;
    }

    println!("Success!");

    Ok(())
}

/// Read a menu from a JSON file, checking every item the same way as the sample menu.
fn read_menu(path: &Path) -> Result<Vec<MenuItem>, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    let file: MenuFile = serde_json::from_str(&text)?;

    let menu = file
        .menu
        .into_iter()
        .map(|item| {
            MenuItem::new(
                &item.name,
                item.category.as_ref(),
                item.price,
                &item.description,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(menu)
}

fn sample_menu() -> Result<Vec<MenuItem>, little_lemon::Error> {
    [
        (
            "Greek Salad",
            "Starters",
            12.99,
            "Crispy lettuce, peppers, olives and our Chicago style feta cheese.",
        ),
        (
            "Bruschetta",
            "Starters",
            7.99,
            "Grilled bread smeared with garlic and seasoned with salt and olive oil.",
        ),
        (
            "Grilled Fish",
            "Mains",
            20.0,
            "Fish of the day, grilled with lemon and herbs.",
        ),
        (
            "Pasta",
            "Mains",
            18.99,
            "Penne with a fresh tomato and basil sauce.",
        ),
        (
            "Lemon Dessert",
            "Desserts",
            6.99,
            "Straight from grandma's recipe book.",
        ),
        (
            "Cheesecake",
            "Desserts",
            6.0,
            "Baked cheesecake with a berry compote.",
        ),
        ("Lemonade", "Drinks", 3.5, "Freshly squeezed every morning."),
        ("Espresso", "Drinks", 2.99, ""),
    ]
    .into_iter()
    .map(|(name, category, price, description)| MenuItem::new(name, category, price, description))
    .collect()
}
