use clap::Parser;
use kettei::prelude::*;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::fs;

/// A CLI tool to generate random decision trees for validator testing
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated tree JSON file to
    #[arg(short, long, default_value = "generated_tree.json")]
    output: String,

    /// Optional path to also write the sample domain definition to
    #[arg(long)]
    domain_output: Option<String>,

    /// Maximum depth of condition nodes below START
    #[arg(long, default_value_t = 4)]
    depth: usize,

    /// Probability that a branch continues with another condition instead of a result
    #[arg(long, default_value_t = 0.6)]
    branch_chance: f64,

    /// Number of unreachable RESULT nodes to inject (makes the tree invalid)
    #[arg(long, default_value_t = 0)]
    orphans: usize,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

struct Generator {
    rng: StdRng,
    fields: FieldCatalog,
    max_depth: usize,
    branch_chance: f64,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    results: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !(0.0..=1.0).contains(&cli.branch_chance) {
        eprintln!(
            "Error: --branch-chance ({}) must be between 0 and 1",
            cli.branch_chance
        );
        std::process::exit(1);
    }

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    println!(
        "Generating decision tree (depth up to {}, branch chance {})...",
        cli.depth, cli.branch_chance
    );

    let definition = sample_domain();
    let mut generator = Generator {
        rng,
        fields: definition.fields.clone(),
        max_depth: cli.depth,
        branch_chance: cli.branch_chance,
        nodes: Vec::new(),
        edges: Vec::new(),
        results: 0,
    };
    let tree = generator.generate(cli.orphans);
    println!(
        "-> Generated {} node(s) and {} edge(s).",
        tree.nodes.len(),
        tree.edges.len()
    );
    if cli.orphans > 0 {
        println!("-> Injected {} orphan result node(s).", cli.orphans);
    }

    fs::write(&cli.output, tree.to_json()?)?;
    println!("Successfully saved tree to '{}'", cli.output);

    if let Some(path) = &cli.domain_output {
        fs::write(path, serde_json::to_string_pretty(&definition)?)?;
        println!("Successfully saved domain definition to '{}'", path);
    }

    Ok(())
}

impl Generator {
    fn generate(&mut self, orphans: usize) -> DecisionTree {
        let start_id = create_node_id(NodeKind::Start);
        self.nodes
            .push(Node::start(&start_id, "Start").at(Position::new(0.0, 0.0)));
        let root = self.generate_condition(1, 0.0);
        self.edges
            .push(create_edge(&start_id, &root, EdgeType::Default));

        for i in 0..orphans {
            let id = create_node_id(NodeKind::Result);
            self.nodes.push(
                Node::result(&id, serde_json::json!({ "outcome": format!("orphan-{}", i) }))
                    .at(Position::new(i as f64 * 200.0, -200.0)),
            );
        }

        DecisionTree::new(
            std::mem::take(&mut self.nodes),
            std::mem::take(&mut self.edges),
        )
    }

    /// Adds a condition node at `depth` and both of its branches. Returns its id.
    fn generate_condition(&mut self, depth: usize, x: f64) -> String {
        let id = create_node_id(NodeKind::Condition);
        let condition = self.random_condition();
        self.nodes
            .push(Node::condition(&id, condition).at(Position::new(x, depth as f64 * 150.0)));

        let spread = 400.0 / depth as f64;
        for (branch, offset) in [(EdgeType::Yes, -spread), (EdgeType::No, spread)] {
            let child = if depth < self.max_depth && self.rng.random_bool(self.branch_chance) {
                self.generate_condition(depth + 1, x + offset)
            } else {
                self.generate_result(depth + 1, x + offset)
            };
            self.edges.push(create_edge(&id, &child, branch));
        }
        id
    }

    fn generate_result(&mut self, depth: usize, x: f64) -> String {
        let id = create_node_id(NodeKind::Result);
        self.results += 1;
        let flows = ["card", "wallet", "bank_transfer", "manual_review"];
        let flow = flows.choose(&mut self.rng).copied().unwrap_or("card");
        self.nodes.push(
            Node::result(
                &id,
                serde_json::json!({ "flow": flow, "rank": self.results }),
            )
            .at(Position::new(x, depth as f64 * 150.0)),
        );
        id
    }

    /// A condition on a random field using a random allowed operator and its
    /// default value.
    fn random_condition(&mut self) -> Condition {
        let keys: Vec<String> = self.fields.iter().map(|f| f.key.clone()).collect();
        let key = keys
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_else(|| "amount".to_string());
        let operators = operators_for(&key, &self.fields);
        match operators.choose(&mut self.rng) {
            Some(option) => {
                let field_type = self
                    .fields
                    .get(&key)
                    .map_or(FieldType::String, |f| f.field_type);
                Condition::new(
                    key,
                    option.operator,
                    default_value_for(field_type, option.operator),
                )
            }
            None => empty_condition_for(&key, &self.fields)
                .unwrap_or_else(|| Condition::new(key, Operator::IsNotNull, None)),
        }
    }
}

/// The payment-routing catalog generated trees draw their fields from.
fn sample_domain() -> DomainDefinition {
    DomainDefinition {
        name: "payments".to_string(),
        fields: FieldCatalog::new()
            .with(FieldDefinition::new("amount", "Amount", FieldType::Currency))
            .with(FieldDefinition::new("country", "Customer country", FieldType::Location))
            .with(FieldDefinition::new("method", "Payment method", FieldType::Enum))
            .with(FieldDefinition::new("createdAt", "Created at", FieldType::Date))
            .with(FieldDefinition::new("cutoff", "Cut-off time", FieldType::Time))
            .with(FieldDefinition::new("isReturning", "Returning customer", FieldType::Boolean))
            .with(FieldDefinition::new("tags", "Customer tags", FieldType::Relation)),
    }
}
