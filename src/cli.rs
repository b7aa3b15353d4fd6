//! Interactive console front end for the conversion client. Menu-driven:
//! every entry drives one session-store action or one raw operation and
//! prints the outcome as a table.

use crate::api_client::ApiError;
use crate::session_store::{DecimerUpdate, SessionStore};
use crate::stout_api::{Converter, Visualize};
use prettytable::{Cell, Row, Table};
use reqwest::blocking::Client;
use std::io::{self, Write};
use std::path::Path;

pub fn run_interactive_menu() -> Result<(), ApiError> {
    let mut store = SessionStore::new()?;
    loop {
        show_main_menu();
        let choice = get_user_input();

        match choice.trim() {
            "1" => smiles_to_iupac_menu(&mut store),
            "2" => iupac_to_smiles_menu(&mut store),
            "3" => image_to_smiles_menu(&mut store),
            "4" => health_menu(&store),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
    Ok(())
}

fn show_main_menu() {
    println!(
        "\x1b[34m\n Welcome to ChemTranslate: console client for chemical structure <-> \n
    IUPAC name translation (STOUT/DECIMER backend + PubChem) \n \x1b[0m"
    );
    println!("\x1b[33m1. SMILES -> IUPAC name (with PubChem cross-check)\x1b[0m");
    println!("\x1b[33m2. IUPAC name -> SMILES\x1b[0m");
    println!("\x1b[33m3. Structure image -> SMILES\x1b[0m");
    println!("\x1b[33m4. Backend health check\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    print!("\x1b[36mEnter your choice: \x1b[0m");
    io::stdout().flush().unwrap();
}

fn get_user_input() -> String {
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .expect("Failed to read input");
    input
}

fn prompt(label: &str) -> String {
    print!("\x1b[36m{}\x1b[0m", label);
    io::stdout().flush().unwrap();
    get_user_input().trim().to_string()
}

fn smiles_to_iupac_menu(store: &mut SessionStore<Client>) {
    let smiles = prompt(&format!(
        "Enter SMILES (default {}): ",
        store.stout.smiles
    ));
    if !smiles.is_empty() {
        store.stout.smiles = smiles;
    }
    store.generate_iupac_name();
    store.search_pubchem_name();

    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("SMILES"),
        Cell::new("IUPAC name"),
        Cell::new("PubChem"),
    ]));
    table.add_row(Row::new(vec![
        Cell::new(&store.stout.smiles),
        Cell::new(&store.stout.iupac_name),
        Cell::new(&store.stout.pubchem_iupac),
    ]));
    table.printstd();
}

fn iupac_to_smiles_menu(store: &mut SessionStore<Client>) {
    let name = prompt("Enter IUPAC name: ");
    if name.is_empty() {
        println!("No name given.");
        return;
    }
    store.opsin.iupac_name = name;
    store.opsin.converter = match prompt("Converter (stout/opsin, default stout): ").as_str() {
        "opsin" => Converter::Opsin,
        _ => Converter::Stout,
    };
    store.opsin.visualize = match prompt("Depiction (2D/3D, default 2D): ").as_str() {
        "3D" | "3d" => Visualize::ThreeD,
        _ => Visualize::TwoD,
    };
    store.generate_smiles_from_name();

    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("IUPAC name"),
        Cell::new("SMILES"),
    ]));
    table.add_row(Row::new(vec![
        Cell::new(&store.opsin.iupac_name),
        Cell::new(&store.opsin.smiles_result),
    ]));
    table.printstd();
}

fn image_to_smiles_menu(store: &mut SessionStore<Client>) {
    let path = prompt("Path to structure image: ");
    let image = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            println!("Could not read {}: {}", path, e);
            return;
        }
    };
    let filename = Path::new(&path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.clone());

    match store.api().image_to_smiles(image, &filename) {
        Ok(smiles) => {
            store.update_decimer_state(DecimerUpdate {
                processed_image: Some(path),
                smiles: Some(smiles.clone()),
                ..Default::default()
            });
            println!("Recognized SMILES: {}", smiles);
        }
        Err(e) => println!("Recognition failed: {}", e),
    }
}

fn health_menu(store: &SessionStore<Client>) {
    match store.api().check_health() {
        Ok(body) => println!("Backend is up: {}", body),
        Err(e) => println!("Backend health check failed: {}", e),
    }
}
