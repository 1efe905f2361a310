use std::io::{self, Write};

use rulekit::Workbench;
use rulekit_builder::{BuilderCommand, BuilderError, BuilderMode, TokenKind, TokenParseError};
use rulekit_client::{ApiError, SubmitError};
use rulekit_core::{ConfigError, CoreError};
use tokio::io::AsyncBufReadExt;

use crate::output;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("geçersiz token: {0}")]
    Token(#[from] TokenParseError),
    #[error("token eklenemedi: {0}")]
    Builder(#[from] BuilderError),
    #[error("{0}")]
    Submit(#[from] SubmitError),
    #[error("Hata: {}", .0.message())]
    Api(#[from] ApiError),
    #[error("girdi okunamadı: {0}")]
    Io(#[from] io::Error),
    #[error("işlem iptal edildi")]
    Aborted,
}

/// Appends every spec to the builder of `mode`, stopping at the first
/// rejected one.
pub fn load_tokens(bench: &Workbench, mode: BuilderMode, specs: &[String]) -> Result<(), CliError> {
    for spec in specs {
        let token = spec.parse::<TokenKind>()?;
        bench.dispatch(mode, BuilderCommand::Append { token })?;
    }
    Ok(())
}

pub async fn show_fields(bench: &mut Workbench) -> Result<(), CliError> {
    bench.refresh_fields().await;
    output::print_fields(bench.registry().all());
    Ok(())
}

pub async fn preview(
    bench: &mut Workbench,
    mode: BuilderMode,
    specs: &[String],
    offline: bool,
) -> Result<(), CliError> {
    if !offline {
        bench.refresh_fields().await;
    }
    load_tokens(bench, mode, specs)?;
    let builder = bench.builder(mode);
    let builder = builder.lock();
    output::print_preview(builder.preview(), &builder.serialize());
    Ok(())
}

pub async fn add_rule(
    bench: &mut Workbench,
    weight: Option<&str>,
    specs: &[String],
) -> Result<(), CliError> {
    bench.refresh_fields().await;
    load_tokens(bench, BuilderMode::Rule, specs)?;
    println!("{}", bench.preview(BuilderMode::Rule));
    let condition = bench.submit_rule(weight).await?;
    output::print_saved("Kural", &condition);
    Ok(())
}

pub async fn add_variable(
    bench: &mut Workbench,
    name: &str,
    description: Option<&str>,
    specs: &[String],
) -> Result<(), CliError> {
    bench.refresh_fields().await;
    load_tokens(bench, BuilderMode::Formula, specs)?;
    println!("{}", bench.preview(BuilderMode::Formula));
    let formula = bench.submit_variable(name, description).await?;
    output::print_saved("Değişken", &format!("{} = {}", name.trim(), formula));
    Ok(())
}

pub async fn list_rules(bench: &Workbench, json: bool) -> Result<(), CliError> {
    let rules = bench.rules().await?;
    if json {
        print_json(&rules);
    } else {
        output::print_rules(&rules);
    }
    Ok(())
}

pub async fn list_variables(bench: &Workbench, json: bool) -> Result<(), CliError> {
    let variables = bench.variables().await?;
    if json {
        print_json(&variables);
    } else {
        output::print_variables(&variables);
    }
    Ok(())
}

pub async fn set_weight(bench: &Workbench, rule_id: &str, weight: &str) -> Result<(), CliError> {
    let weight = rulekit_builder::parse_weight(Some(weight)).map_err(SubmitError::from)?;
    bench.set_rule_weight(rule_id, weight).await?;
    output::print_done(&format!("{} ağırlığı {} olarak güncellendi", rule_id, weight));
    Ok(())
}

pub async fn set_active(bench: &Workbench, rule_id: &str, active: bool) -> Result<(), CliError> {
    bench.set_rule_active(rule_id, active).await?;
    let state = if active { "aktif" } else { "pasif" };
    output::print_done(&format!("{} artık {}", rule_id, state));
    Ok(())
}

pub async fn delete_rule(bench: &Workbench, rule_id: &str, yes: bool) -> Result<(), CliError> {
    if !yes {
        let answer = read_line(&format!(
            "{} kuralını silmek istediğinize emin misiniz? [e/H] ",
            rule_id
        ))
        .await?;
        if !is_affirmative(&answer) {
            return Err(CliError::Aborted);
        }
    }
    bench.delete_rule(rule_id).await?;
    output::print_done(&format!("{} silindi", rule_id));
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(err) => tracing::error!(error = %err, "failed to encode output"),
    }
}

async fn read_line(prompt: &str) -> Result<String, CliError> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    let mut reader = tokio::io::BufReader::new(tokio::io::stdin());
    reader.read_line(&mut line).await?;
    Ok(line.trim().to_string())
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "e" | "evet" | "y" | "yes"
    )
}
