//! Command-line harness for the form engine: generate a schema from a
//! description, validate an answers file against a schema, or print the
//! control plan a UI layer would mount.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use formant_core::{AnswerMap, FormSchema};
use formant_engine::{completion_percent, control_for, validate_all, Control, EdgeClient};

/// Form engine toolchain.
#[derive(Parser)]
#[command(name = "formant", version, about = "Form schema and validation toolchain")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a form schema from a natural-language description
    Generate {
        /// What the form should collect
        description: String,
        /// Base URL of the hosted edge functions
        #[arg(long)]
        url: String,
        /// Bearer token for the edge functions
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Validate an answers file against a schema
    Validate {
        /// Path to the schema JSON file
        schema: PathBuf,
        /// Path to the answers JSON file
        #[arg(long)]
        answers: PathBuf,
    },

    /// Print the control plan for a schema
    Render {
        /// Path to the schema JSON file
        schema: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Generate {
            description,
            url,
            api_key,
        } => cmd_generate(&description, &url, api_key),
        Commands::Validate { schema, answers } => cmd_validate(&schema, &answers),
        Commands::Render { schema } => cmd_render(&schema),
    };
    process::exit(code);
}

fn cmd_generate(description: &str, url: &str, api_key: Option<String>) -> i32 {
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {}", e);
            return 1;
        }
    };
    let client = EdgeClient::new(url, api_key);
    match rt.block_on(client.generate_schema(description)) {
        Ok(schema) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&schema.to_json()).unwrap_or_default()
            );
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_validate(schema_path: &Path, answers_path: &Path) -> i32 {
    let schema = match load_schema(schema_path) {
        Ok(s) => s,
        Err(message) => {
            eprintln!("Error: {}", message);
            return 1;
        }
    };
    let answers = match load_json(answers_path) {
        Ok(v) => AnswerMap::from_json(&v),
        Err(message) => {
            eprintln!("Error: {}", message);
            return 1;
        }
    };

    let errors = validate_all(&schema, &answers);
    let progress = completion_percent(&schema, &answers);
    if errors.is_empty() {
        println!("OK ({}% preenchido)", progress);
        0
    } else {
        for (key, message) in errors.iter() {
            println!("{}: {}", key, message);
        }
        println!("{} erro(s), {}% preenchido", errors.len(), progress);
        1
    }
}

fn cmd_render(schema_path: &Path) -> i32 {
    let schema = match load_schema(schema_path) {
        Ok(s) => s,
        Err(message) => {
            eprintln!("Error: {}", message);
            return 1;
        }
    };

    for field in &schema.fields {
        println!("{}  {}", field.key, describe(&control_for(field)));
    }
    0
}

fn describe(control: &Control) -> String {
    match control {
        Control::TextInput { hint } => format!("text input ({:?})", hint),
        Control::NumberInput { min, max } => {
            format!("number input (min: {:?}, max: {:?})", min, max)
        }
        Control::DatePicker => "date picker".to_string(),
        Control::TextArea => "text area".to_string(),
        Control::Dropdown { options } => format!("dropdown ({} options)", options.len()),
        Control::Checklist { options } => format!("checklist ({} options)", options.len()),
        Control::Toggle => "toggle".to_string(),
        Control::RadioGroup { options } => format!("radio group ({} options)", options.len()),
    }
}

fn load_schema(path: &Path) -> Result<FormSchema, String> {
    let value = load_json(path)?;
    FormSchema::from_json(&value).map_err(|e| format!("{}: {}", path.display(), e))
}

fn load_json(path: &Path) -> Result<serde_json::Value, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    serde_json::from_str(&text).map_err(|e| format!("{}: invalid JSON: {}", path.display(), e))
}
