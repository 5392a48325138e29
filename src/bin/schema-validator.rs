//! # Attribute Schema Validator
//!
//! A command-line utility for checking attribute schema files before they are
//! loaded into a model controller.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin schema-validator schemas/ldap-authorization.json
//! cargo run --bin schema-validator ./schemas/
//! cargo run --bin schema-validator --embedded
//! ```
//!
//! A file is valid when it parses as an attribute schema: attribute names are
//! unique, every alternative names another attribute of the same schema, and
//! every default satisfies its own attribute's type and validator. A
//! directory is additionally loaded into a single registry, which fails on
//! duplicate schema ids.
//!
//! ## Exit Codes
//!
//! - `0`: All schemas are valid
//! - `1`: One or more schemas are invalid or the path could not be read

use model_controller::schema::{AttributeSchema, SchemaRegistry};
use std::env;
use std::fs;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <schema-file-or-directory> | --embedded", args[0]);
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  {} schemas/ldap-authorization.json", args[0]);
        eprintln!("  {} ./schemas/", args[0]);
        process::exit(1);
    }

    if args[1] == "--embedded" {
        validate_embedded();
        return;
    }

    let path = Path::new(&args[1]);
    if path.is_file() {
        validate_single_file(path);
    } else if path.is_dir() {
        validate_directory(path);
    } else {
        eprintln!(
            "Error: '{}' is not a valid file or directory",
            path.display()
        );
        process::exit(1);
    }
}

fn validate_embedded() {
    println!("Validating embedded schemas");
    match SchemaRegistry::with_embedded_schemas() {
        Ok(registry) => {
            for schema in registry.get_schemas() {
                println!("  ✓ Valid - {}", schema.id());
            }
        }
        Err(e) => {
            eprintln!("❌ Embedded schemas failed to load: {}", e);
            process::exit(1);
        }
    }
}

fn validate_single_file(file_path: &Path) {
    println!("Validating schema file: {}", file_path.display());

    match SchemaRegistry::load_schema_from_file(file_path) {
        Ok(schema) => {
            println!("✓ Schema is valid!");
            print_schema_summary(&schema);
        }
        Err(e) => {
            eprintln!("❌ Schema validation failed: {}", e);
            process::exit(1);
        }
    }
}

fn validate_directory(dir_path: &Path) {
    println!("Validating schemas in directory: {}", dir_path.display());

    let entries = match fs::read_dir(dir_path) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error reading directory: {}", e);
            process::exit(1);
        }
    };

    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    paths.sort();

    let mut valid_count = 0;
    let mut error_count = 0;
    for path in &paths {
        println!("\nValidating: {}", path.display());
        match SchemaRegistry::load_schema_from_file(path) {
            Ok(schema) => {
                println!(
                    "  ✓ Valid - {} ({} attributes)",
                    schema.id(),
                    schema.attributes().len()
                );
                valid_count += 1;
            }
            Err(e) => {
                eprintln!("  ❌ Invalid - {}", e);
                error_count += 1;
            }
        }
    }

    println!("\nValidation Summary:");
    println!("  Valid schemas: {}", valid_count);
    println!("  Invalid schemas: {}", error_count);

    if error_count > 0 {
        process::exit(1);
    }

    println!("\nTesting schema registry loading...");
    match SchemaRegistry::from_schema_dir(dir_path) {
        Ok(registry) => {
            println!("✓ Schema registry loaded successfully");
            println!("  Total schemas loaded: {}", registry.len());
        }
        Err(e) => {
            eprintln!("❌ Failed to load schema registry: {}", e);
            process::exit(1);
        }
    }
}

fn print_schema_summary(schema: &AttributeSchema) {
    println!();
    println!("Schema Summary:");
    println!("  ID: {}", schema.id());
    println!("  Description: {}", schema.description());
    println!("  Attributes: {}", schema.attributes().len());

    for attr in schema.attributes() {
        let mut flags = Vec::new();
        if attr.required {
            flags.push("required".to_string());
        }
        if let Some(default) = &attr.default_value {
            flags.push(format!("default {}", default));
        }
        if !attr.alternatives.is_empty() {
            flags.push(format!("alternatives {}", attr.alternatives.join("/")));
        }
        if attr.restart_required {
            flags.push("restart".to_string());
        }
        if attr.xml_name() != attr.name {
            flags.push(format!("xml {}", attr.xml_name()));
        }

        println!(
            "    - {} ({}){}",
            attr.name,
            attr.data_type.as_str(),
            if flags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", flags.join(", "))
            }
        );
    }
}
