//! `navtree` command-line host.
//!
//! Loads a TOML route declaration, wires every loader and action name it
//! references to echo collaborators, and drives the router from the shell:
//!
//! ```text
//! navtree --config navtree.toml routes
//! navtree --config navtree.toml match /config/category/contentList/42
//! navtree --config navtree.toml navigate /config/category /config/category/contentList/7
//! navtree --config navtree.toml submit /config/category/contentList/42 --method update --payload '{"title":"x"}'
//! ```

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;

use navtree::config::{read_config, resolve_config, Collaborators, ConfigError, RouteDecl};
use navtree::navigation::{NavigationController, NavigationOutcome, NavigationState};
use navtree::observability::{logging, metrics};
use navtree::routing::{action_fn, loader_fn, ActionResult, MatchContext, MatchResult, RouteTree};
use navtree::submission::{SubmissionDispatcher, SubmissionMethod};

#[derive(Parser)]
#[command(name = "navtree")]
#[command(about = "Drive a hierarchical route tree from the command line", long_about = None)]
struct Cli {
    /// Route declaration file.
    #[arg(short, long, default_value = "navtree.toml")]
    config: PathBuf,

    /// Overrides `observability.log_level`.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the route tree
    Routes,
    /// Match a path and print the chain and parameters
    Match { path: String },
    /// Navigate to each path in order and print the final state
    Navigate {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Submit a payload to the deepest action along a path
    Submit {
        path: String,
        #[arg(short, long, default_value = "update")]
        method: SubmissionMethod,
        /// JSON payload
        #[arg(short, long)]
        payload: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = read_config(&cli.config)?;
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.observability.log_level.clone());
    logging::init_logging(&level);
    metrics::set_enabled(config.observability.metrics_enabled);

    let collaborators = echo_collaborators(&config.root);
    let root = resolve_config(&config, &collaborators).map_err(ConfigError::Validation)?;
    let tree = Arc::new(RouteTree::build(root)?);

    tracing::info!(
        config = %cli.config.display(),
        nodes = tree.len(),
        history_limit = config.navigation.history_limit,
        loader_timeout_ms = config.navigation.loader_timeout_ms,
        "Route tree loaded"
    );

    match cli.command {
        Commands::Routes => print_routes(&tree),
        Commands::Match { path } => {
            let output = match tree.match_path(&path) {
                MatchResult::Matched(matched) => render_match(&tree, &matched),
                MatchResult::NoMatch => json!({ "path": path, "match": null }),
            };
            print_json(&output)?;
        }
        Commands::Navigate { paths } => {
            let controller = NavigationController::new(tree.clone(), config.navigation.clone());
            let mut last = None;
            for path in &paths {
                last = Some(controller.navigate(path).await);
            }
            if let Some(outcome) = last {
                print_json(&render_outcome(&tree, &outcome))?;
            }
        }
        Commands::Submit {
            path,
            method,
            payload,
        } => {
            let payload = match payload {
                Some(raw) => serde_json::from_str(&raw)?,
                None => Value::Null,
            };
            let controller = Arc::new(NavigationController::new(
                tree.clone(),
                config.navigation.clone(),
            ));
            let dispatcher = SubmissionDispatcher::new(controller);
            let result = dispatcher.submit(&path, payload, method).await?;
            print_json(&json!({
                "route": result.route,
                "data": result.data,
                "navigation": render_outcome(&tree, &result.navigation),
            }))?;
        }
    }

    Ok(())
}

/// Register an echo loader and action under every name the declaration uses.
fn echo_collaborators(root: &RouteDecl) -> Collaborators {
    let mut collaborators = Collaborators::new();
    for decl in root.walk() {
        if let Some(name) = &decl.loader {
            let label = name.clone();
            collaborators.register_loader(
                name.clone(),
                loader_fn(move |ctx| {
                    let label = label.clone();
                    async move {
                        Ok(json!({
                            "loader": label,
                            "route": ctx.route,
                            "params": ctx.matched.params,
                            "query": ctx.matched.query,
                        }))
                    }
                }),
            );
        }
        if let Some(name) = &decl.action {
            let label = name.clone();
            collaborators.register_action(
                name.clone(),
                action_fn(move |ctx| {
                    let label = label.clone();
                    async move {
                        Ok(ActionResult::data(json!({
                            "action": label,
                            "method": ctx.method,
                            "params": ctx.matched.params,
                            "payload": ctx.payload,
                        })))
                    }
                }),
            );
        }
    }
    collaborators
}

fn print_routes(tree: &RouteTree) {
    for node in tree.nodes() {
        let indent = "  ".repeat(tree.depth(node.id()));
        let mut marks = Vec::new();
        if node.loader().is_some() {
            marks.push("loader".to_string());
        }
        if node.action().is_some() {
            marks.push("action".to_string());
        }
        if let Some(view) = node.view() {
            marks.push(format!("view={}", view));
        }
        println!("{}{}  [{}]", indent, node.label(), marks.join(", "));
    }
}

fn render_match(tree: &RouteTree, matched: &MatchContext) -> Value {
    let chain: Vec<Value> = matched
        .chain
        .iter()
        .map(|entry| {
            json!({
                "node": entry.node,
                "route": tree[entry.node].route(),
                "view": tree[entry.node].view(),
                "segments": entry.segments,
            })
        })
        .collect();
    json!({
        "path": matched.path,
        "chain": chain,
        "params": matched.params,
        "query": matched.query,
    })
}

fn render_outcome(tree: &RouteTree, outcome: &NavigationOutcome) -> Value {
    match outcome {
        NavigationOutcome::Superseded { seq } => json!({ "state": "superseded", "seq": seq }),
        NavigationOutcome::Committed(state) => render_state(tree, state),
    }
}

fn render_state(tree: &RouteTree, state: &NavigationState) -> Value {
    let results = |results: &navtree::navigation::LoaderResults| -> Value {
        results
            .iter()
            .map(|(node, data)| (tree[node].route().to_string(), data.clone()))
            .collect::<serde_json::Map<String, Value>>()
            .into()
    };
    match state {
        NavigationState::Idle => json!({ "state": "idle" }),
        NavigationState::Loading { seq, path } => {
            json!({ "state": "loading", "seq": seq, "path": path })
        }
        NavigationState::Loaded {
            seq,
            matched,
            results: data,
        } => json!({
            "state": "loaded",
            "seq": seq,
            "match": render_match(tree, matched),
            "results": results(data),
        }),
        NavigationState::Failed {
            seq,
            path,
            prefix,
            results: data,
            error,
        } => json!({
            "state": "failed",
            "seq": seq,
            "path": path,
            "error": { "kind": error.kind(), "message": error.to_string() },
            "prefix": prefix.as_deref().map(|p| render_match(tree, p)),
            "results": results(data),
        }),
    }
}

fn print_json(value: &Value) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
