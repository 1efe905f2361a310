use colored::*;
use rulekit_builder::{suggested_values, Field, SerializationError};
use rulekit_client::{RuleRecord, VariableRecord};

pub fn print_fields(fields: &[Field]) {
    println!("{}", "Alanlar".bold());
    for field in fields {
        match suggested_values(&field.key) {
            Some(values) => println!(
                "  {:<18} {} [{}]",
                field.key.cyan(),
                field.label,
                values.join(", ").dimmed()
            ),
            None => println!("  {:<18} {}", field.key.cyan(), field.label),
        }
    }
}

pub fn print_preview(preview: &str, expression: &Result<String, SerializationError>) {
    println!("{} {}", "Önizleme:".bold(), preview);
    match expression {
        Ok(expression) => println!("{} {}", "İfade:".bold(), expression.green()),
        Err(err) => println!("{} {}", "İfade:".bold(), err.to_string().red()),
    }
}

pub fn print_rules(rules: &[RuleRecord]) {
    if rules.is_empty() {
        println!("{}", "Kayıtlı kural yok".dimmed());
        return;
    }
    for rule in rules {
        let state = if rule.is_active {
            "aktif".green()
        } else {
            "pasif".yellow()
        };
        println!(
            "{:<12} {:>5}  {:<6} {}",
            rule.rule_id.bold(),
            rule.weight,
            state,
            rule.condition
        );
    }
}

pub fn print_variables(variables: &[VariableRecord]) {
    if variables.is_empty() {
        println!("{}", "Kayıtlı değişken yok".dimmed());
        return;
    }
    for variable in variables {
        println!("{} = {}", variable.name.bold(), variable.formula);
        if let Some(description) = &variable.description {
            println!("  {}", description.dimmed());
        }
    }
}

pub fn print_saved(what: &str, expression: &str) {
    println!("{} {}", format!("✔ {} kaydedildi:", what).green().bold(), expression);
}

pub fn print_done(message: &str) {
    println!("{}", format!("✔ {}", message).green().bold());
}
