use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::*;
use rulekit::Workbench;
use rulekit_builder::BuilderMode;
use rulekit_core::{logging, ClientConfig};

mod commands;
mod output;

use commands::CliError;

#[derive(Parser)]
#[command(name = "rulekit")]
#[command(about = "Build allocation rules and derived variables from tokens", long_about = None)]
struct Cli {
    /// Base URL of the rules API
    #[arg(long, global = true, env = "RULEKIT_API_URL")]
    api_url: Option<String>,
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true)]
    log: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the fields available to rules and formulas
    Fields,
    /// Render and serialize tokens without submitting them
    Preview(PreviewArgs),
    /// Manage allocation rules
    #[command(subcommand)]
    Rule(RuleCommands),
    /// Manage derived variables
    #[command(subcommand)]
    Variable(VariableCommands),
    /// Show version information
    Version,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Rule,
    Formula,
}

impl From<ModeArg> for BuilderMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Rule => BuilderMode::Rule,
            ModeArg::Formula => BuilderMode::Formula,
        }
    }
}

#[derive(Args)]
struct PreviewArgs {
    #[arg(long, value_enum, default_value = "rule")]
    mode: ModeArg,
    /// Do not fetch server variables first
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Token specs, e.g. `field:waiting_hours op:> value:5`
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    tokens: Vec<String>,
}

#[derive(Subcommand)]
enum RuleCommands {
    /// List stored rules
    List {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Build a condition from tokens and store it
    Add(AddRuleArgs),
    /// Change the weight of a rule
    Weight { rule_id: String, weight: String },
    /// Activate a rule
    Enable { rule_id: String },
    /// Deactivate a rule
    Disable { rule_id: String },
    /// Delete a rule
    Delete {
        rule_id: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y', default_value_t = false)]
        yes: bool,
    },
}

#[derive(Args)]
struct AddRuleArgs {
    #[arg(long)]
    weight: Option<String>,
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    tokens: Vec<String>,
}

#[derive(Subcommand)]
enum VariableCommands {
    /// List stored variables
    List {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Build a formula from tokens and store it
    Add(AddVariableArgs),
}

#[derive(Args)]
struct AddVariableArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    description: Option<String>,
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    tokens: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "✘".red().bold(), err.to_string().red());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    if let Commands::Version = cli.command {
        println!("rulekit v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.api_url.as_deref() {
        config = config.with_api_url(url)?;
    }
    logging::init_tracing(Some(cli.log.as_deref().unwrap_or(config.log_level.as_str())))?;

    let mut bench = Workbench::new(&config);

    match cli.command {
        Commands::Fields => commands::show_fields(&mut bench).await,
        Commands::Preview(args) => {
            commands::preview(&mut bench, args.mode.into(), &args.tokens, args.offline).await
        }
        Commands::Rule(RuleCommands::List { json }) => commands::list_rules(&bench, json).await,
        Commands::Rule(RuleCommands::Add(args)) => {
            commands::add_rule(&mut bench, args.weight.as_deref(), &args.tokens).await
        }
        Commands::Rule(RuleCommands::Weight { rule_id, weight }) => {
            commands::set_weight(&bench, &rule_id, &weight).await
        }
        Commands::Rule(RuleCommands::Enable { rule_id }) => {
            commands::set_active(&bench, &rule_id, true).await
        }
        Commands::Rule(RuleCommands::Disable { rule_id }) => {
            commands::set_active(&bench, &rule_id, false).await
        }
        Commands::Rule(RuleCommands::Delete { rule_id, yes }) => {
            commands::delete_rule(&bench, &rule_id, yes).await
        }
        Commands::Variable(VariableCommands::List { json }) => {
            commands::list_variables(&bench, json).await
        }
        Commands::Variable(VariableCommands::Add(args)) => {
            commands::add_variable(
                &mut bench,
                &args.name,
                args.description.as_deref(),
                &args.tokens,
            )
            .await
        }
        Commands::Version => Ok(()),
    }
}
