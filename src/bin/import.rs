//! Import questions from document files into the bank
//!
//! Usage: cargo run --bin import -- <files-or-dirs...> [--store <questions.json>]
//!
//! Directories are walked for .txt and .md files; anything else passed
//! directly is attempted as plain text. Unreadable files are reported and
//! skipped.

use std::path::PathBuf;

use anyhow::{Context, Result};

use all_in_core::{ingest_documents, QuestionBank};

const SUPPORTED_EXTENSIONS: [&str; 2] = ["txt", "md"];

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("Usage: import <files-or-dirs...> [--store <questions.json>]");
        std::process::exit(1);
    }

    let store_path = match args.iter().position(|a| a == "--store") {
        Some(i) => {
            let path = args
                .get(i + 1)
                .context("--store requires a path argument")?
                .clone();
            args.drain(i..=i + 1);
            PathBuf::from(path)
        }
        None => {
            let data_dir = dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("all-in");
            data_dir.join("questions.json")
        }
    };

    let mut documents = Vec::new();
    for arg in &args {
        let path = PathBuf::from(arg);
        if !path.exists() {
            eprintln!("Warning: {} does not exist, skipping", arg);
            continue;
        }
        if path.is_dir() {
            for entry in walkdir::WalkDir::new(&path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
            {
                let supported = entry
                    .path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
                    .unwrap_or(false);
                if supported {
                    documents.push(entry.path().to_path_buf());
                }
            }
        } else {
            documents.push(path);
        }
    }

    if documents.is_empty() {
        eprintln!("No documents found.");
        std::process::exit(1);
    }

    println!("Importing into {:?}", store_path);
    let mut bank = QuestionBank::open(&store_path);
    let mut rng = rand::thread_rng();

    let report = ingest_documents(&mut bank, &documents, &mut rng)?;

    for warning in &report.warnings {
        eprintln!("  ✗ {}", warning.error);
    }

    println!("\n========================================");
    println!("Import complete!");
    println!("  Files read:  {}", report.files_read);
    println!("  Added:       {}", report.added);
    println!("  Duplicates:  {}", report.duplicates);
    println!("  Invalid:     {}", report.invalid);
    println!("  Bank size:   {}", bank.len());
    println!("========================================");

    Ok(())
}
