use clap::Parser;
use kettei::prelude::*;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Validate decision trees against a domain and inspect field catalogs
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the decision tree JSON file
    tree_path: Option<String>,

    /// Path to a domain definition JSON file (name + fields)
    #[arg(short, long)]
    domain: Option<String>,

    /// Path to an engine configuration JSON file
    #[arg(short, long)]
    config: Option<String>,

    /// Minimum number of RESULT nodes (overrides the config file)
    #[arg(long)]
    min_results: Option<usize>,

    /// Stop at the first violation
    #[arg(long)]
    fail_fast: bool,

    /// Print violations as JSON
    #[arg(long)]
    json: bool,

    /// Print the domain's fields with their operators, input shapes and defaults
    #[arg(long)]
    inspect: bool,

    /// Run in interactive mode to be prompted for inputs
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut cli = Cli::parse();

    if cli.human {
        prompt_missing_paths(&mut cli);
    }

    let domain = cli.domain.as_deref().map(load_domain);

    if cli.inspect {
        match &domain {
            Some(domain) => print_catalog(domain),
            None => exit_with_error("--inspect requires --domain."),
        }
        if cli.tree_path.is_none() {
            return;
        }
    }

    let tree_path = cli.tree_path.clone().unwrap_or_else(|| {
        exit_with_error("Tree path is required in non-interactive mode.");
    });

    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => EngineConfig::default(),
    };
    if let Some(min) = cli.min_results {
        config.min_result_nodes = min;
    }
    if cli.fail_fast {
        config.report = ReportMode::FirstFailure;
    }

    run_validation(&tree_path, domain, &config, cli.json);
}

fn load_domain(path: &str) -> Arc<Domain> {
    let definition = DomainDefinition::from_file(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load domain: {}", e)));
    let mut registry = DomainRegistry::new();
    let name = definition.name.clone();
    registry.register(definition.into_domain());
    registry
        .get(&name)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()))
}

fn run_validation(tree_path: &str, domain: Option<Arc<Domain>>, config: &EngineConfig, json: bool) {
    let total_start = Instant::now();

    let tree = DecisionTree::from_file(tree_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load tree: {}", e)));

    let builder = match &domain {
        Some(domain) => TreeSchema::builder(DomainNodeShape::new(Arc::clone(domain))),
        None => TreeSchema::builder(AnyNodeShape),
    };
    let schema = builder.with_config(config).build();

    let violations = schema.violations(&tree);
    let duration = total_start.elapsed();

    if json {
        match serde_json::to_string_pretty(&violations) {
            Ok(out) => println!("{}", out),
            Err(e) => exit_with_error(&format!("Failed to encode violations: {}", e)),
        }
    } else {
        println!("Tree:        {}", tree_path);
        println!(
            "Domain:      {}",
            domain.as_ref().map_or("(none)", |d| d.name())
        );
        println!("Nodes/Edges: {}/{}", tree.nodes.len(), tree.edges.len());
        println!("Rules:       {}", schema.rule_names().join(", "));
        println!();
        if violations.is_empty() {
            println!("  -> Tree is valid");
        } else {
            println!("  -> {} violation(s):", violations.len());
            for (i, violation) in violations.iter().enumerate() {
                println!("     {}. {}", i + 1, violation);
            }
        }
        println!("\nValidated in {:?}", duration);
    }

    if !violations.is_empty() {
        std::process::exit(2);
    }
}

fn print_catalog(domain: &Domain) {
    println!("--- Domain '{}' ---", domain.name());
    for field in domain.fields().iter() {
        println!("\n{} ({}) - {}", field.key, field.field_type, field.label);
        for option in domain.operators_for(&field.key) {
            let shape = resolve_input_shape(field.field_type, option.operator);
            let default = default_value_for(field.field_type, option.operator)
                .map_or("(none)".to_string(), |v| v.to_string());
            println!(
                "  {:<16} {:<26} shape: {:<12} default: {}",
                option.operator.as_str(),
                option.label,
                shape.to_string(),
                default
            );
        }
    }
    println!();
}

/// Prompts for any path not supplied on the command line.
fn prompt_missing_paths(cli: &mut Cli) {
    println!("--- Kettei Interactive Mode ---");
    if cli.tree_path.is_none() {
        cli.tree_path = Some(prompt_for_input("Enter tree path", Some("data/tree.json")));
    }
    if cli.domain.is_none() {
        let domain = prompt_for_input("Enter domain definition path (optional)", None);
        cli.domain = (!domain.is_empty()).then_some(domain);
    }
    if cli.config.is_none() {
        let config = prompt_for_input("Enter config path (optional)", None);
        cli.config = (!config.is_empty()).then_some(config);
    }
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    if let Err(e) = io::stdout().flush() {
        exit_with_error(&format!("Failed to write prompt: {}", e));
    }
    if let Err(e) = io::stdin().read_line(&mut line) {
        exit_with_error(&format!("Failed to read line: {}", e));
    }
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
