//! Templates command - list the catalog or show one template's rules.

use colored::Colorize;
use sheetguard::{FieldType, SchemaTemplate};

use super::{load_registry, Outcome};
use crate::cli::GlobalOptions;

pub fn run(id: Option<String>, options: &GlobalOptions) -> Result<Outcome, Box<dyn std::error::Error>> {
    let registry = load_registry(options)?;

    match id {
        Some(id) => {
            let template = registry
                .lookup(&id)
                .ok_or_else(|| format!("Unknown template: {}", id))?;
            if options.json {
                println!("{}", serde_json::to_string_pretty(template)?);
            } else {
                print_template(template);
            }
        }
        None => {
            if options.json {
                let templates: Vec<&SchemaTemplate> = registry.iter().collect();
                println!("{}", serde_json::to_string_pretty(&templates)?);
            } else {
                println!("{}", "Available templates:".cyan().bold());
                for template in registry.iter() {
                    println!(
                        "  {:<24} {} {}",
                        template.id.white().bold(),
                        template.name,
                        format!("({} fields)", template.fields().len()).dimmed()
                    );
                }
            }
        }
    }

    Ok(Outcome::Clean)
}

fn print_template(template: &SchemaTemplate) {
    println!("{} {}", template.name.cyan().bold(), template.id.dimmed());
    if !template.platform.is_empty() {
        println!("Platform: {}", template.platform);
    }
    if !template.version.is_empty() {
        println!("Version:  {}", template.version);
    }
    if !template.description.is_empty() {
        println!("{}", template.description);
    }
    println!();

    println!("{}", "Fields:".yellow().bold());
    for field in template.fields() {
        let mut rules = vec![field.field_type.label().to_string()];
        if field.required {
            rules.push("required".to_string());
        }
        if field.field_type == FieldType::Integer {
            match (field.min, field.max) {
                (Some(min), Some(max)) => rules.push(format!("{}..={}", min, max)),
                (Some(min), None) => rules.push(format!(">= {}", min)),
                (None, Some(max)) => rules.push(format!("<= {}", max)),
                (None, None) => {}
            }
        }
        if let Some(pattern) = field.pattern() {
            rules.push(format!("pattern {}", pattern));
        }
        if field.is_identifier() {
            rules.push("unique".to_string());
        }

        let name = if field.required {
            field.name.white().bold()
        } else {
            field.name.normal()
        };
        println!("  {:<16} {}", name, rules.join(", ").dimmed());
        if !field.description.is_empty() {
            println!("  {:<16} {}", "", field.description);
        }
    }
}
