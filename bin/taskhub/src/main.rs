//! `taskhub` — the TaskHub CLI client.
//!
//! Talks to a `taskhubd` instance; the server URL comes from `--server`,
//! the `TASKHUB_SERVER` environment variable, or `~/.taskhub/config.toml`.

mod api;
mod config;
mod render;
mod state;
mod view;

use clap::{Parser, Subcommand};

use api::ApiClient;
use config::ClientConfig;
use state::{Action, SessionStore};
use taskhub_tasks::model::Priority;
use view::{Filter, SortKey, TaskForm};

/// TaskHub CLI tool.
#[derive(Parser, Debug)]
#[command(name = "taskhub", about = "TaskHub CLI client")]
struct Cli {
    /// Path to client config file (default: ~/.taskhub/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    /// Server URL (overrides config and environment).
    #[arg(long = "server", global = true)]
    server: Option<String>,

    /// Output format: table or json.
    #[arg(long = "output", short = 'o', global = true, default_value = "table")]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List tasks.
    List {
        /// Show all, active, or completed tasks.
        #[arg(long, default_value = "all")]
        filter: String,
        /// Order: newest, oldest, priority, or title.
        #[arg(long, default_value = "newest")]
        sort: String,
    },

    /// Show a single task.
    Get { id: String },

    /// Create a task.
    Add {
        title: String,
        #[arg(long, short = 'd')]
        description: Option<String>,
        /// low, medium, or high (default: medium).
        #[arg(long, short = 'p')]
        priority: Option<String>,
    },

    /// Edit a task. Only the given fields are sent; the server merges.
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<String>,
    },

    /// Mark a task completed.
    Done { id: String },

    /// Mark a task active again.
    Undone { id: String },

    /// Delete a task.
    Rm {
        id: String,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },

    /// Aggregate statistics over all tasks.
    Stats,

    /// Manage the configured server URL.
    Server {
        #[command(subcommand)]
        action: ServerAction,
    },

    /// Check server connectivity.
    Status,

    /// Show version.
    Version,
}

#[derive(Subcommand, Debug)]
enum ServerAction {
    /// Set the server URL in the config file.
    Set { url: String },
    /// Show the resolved server URL.
    Show,
}

fn parse_priority(s: &str) -> anyhow::Result<Priority> {
    Priority::from_str(s)
        .ok_or_else(|| anyhow::anyhow!("unknown priority '{}' (expected low, medium, or high)", s))
}

/// Fetch the full list into the session store.
fn fetch_all(client: &ApiClient, store: &mut SessionStore) -> anyhow::Result<()> {
    store.dispatch(Action::FetchStarted);
    match client.list_tasks() {
        Ok(tasks) => {
            store.dispatch(Action::FetchSucceeded(tasks));
            Ok(())
        }
        Err(e) => {
            store.dispatch(Action::FetchFailed(e.to_string()));
            anyhow::bail!("{e}")
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let json_output = cli.output == "json";

    let config_path = cli
        .config
        .as_deref()
        .map(std::path::PathBuf::from)
        .unwrap_or_else(ClientConfig::default_path);
    let config = ClientConfig::load(&config_path)?;

    let server_url = cli.server.clone().unwrap_or_else(|| config.resolve_server());

    match cli.command {
        Commands::List { filter, sort } => {
            let filter = Filter::from_str(&filter)
                .ok_or_else(|| anyhow::anyhow!("unknown filter '{}'", filter))?;
            let sort = SortKey::from_str(&sort)
                .ok_or_else(|| anyhow::anyhow!("unknown sort '{}'", sort))?;

            let client = ApiClient::new(&server_url)?;
            let mut store = SessionStore::new();
            fetch_all(&client, &mut store)?;

            let visible = view::visible_tasks(&store.state().tasks, filter, sort);
            render::print_tasks(&visible, json_output)?;
        }

        Commands::Get { id } => {
            let client = ApiClient::new(&server_url)?;
            let task = client.get_task(&id)?;
            render::print_task(&task, json_output)?;
        }

        Commands::Add {
            title,
            description,
            priority,
        } => {
            let mut form = TaskForm::create();
            form.title = title;
            form.description = description.unwrap_or_default();
            if let Some(p) = priority.as_deref() {
                form.priority = parse_priority(p)?;
            }

            // Client-side validation blocks the request entirely.
            if let Err(errors) = form.validate() {
                anyhow::bail!("invalid task: {}", errors.join("; "));
            }

            let client = ApiClient::new(&server_url)?;
            let mut store = SessionStore::new();
            match client.create_task(&form.to_create_request()) {
                Ok(task) => {
                    store.dispatch(Action::TaskCreated(task.clone()));
                    form.reset();
                    println!("Task created.");
                    render::print_task(&task, json_output)?;
                }
                Err(e) => {
                    store.dispatch(Action::MutationFailed(e.to_string()));
                    anyhow::bail!("{e}");
                }
            }
        }

        Commands::Edit {
            id,
            title,
            description,
            priority,
        } => {
            let client = ApiClient::new(&server_url)?;
            let original = client.get_task(&id)?;

            let mut store = SessionStore::new();
            store.dispatch(Action::FetchSucceeded(vec![original.clone()]));
            store.dispatch(Action::EditStarted(id.clone()));

            let mut form = TaskForm::edit(&original);
            if let Some(t) = title {
                form.title = t;
            }
            if let Some(d) = description {
                form.description = d;
            }
            if let Some(p) = priority.as_deref() {
                form.priority = parse_priority(p)?;
            }

            if let Err(errors) = form.validate() {
                anyhow::bail!("invalid task: {}", errors.join("; "));
            }

            let changed = form.changed_fields(&original);
            match client.update_task(&id, &changed) {
                Ok(task) => {
                    store.dispatch(Action::TaskUpdated(task.clone()));
                    store.dispatch(Action::EditFinished);
                    println!("Task updated.");
                    render::print_task(&task, json_output)?;
                }
                Err(e) => {
                    store.dispatch(Action::MutationFailed(e.to_string()));
                    anyhow::bail!("{e}");
                }
            }
        }

        Commands::Done { id } => {
            let client = ApiClient::new(&server_url)?;
            let task = client.set_completed(&id, true)?;
            println!("Task completed.");
            render::print_task(&task, json_output)?;
        }

        Commands::Undone { id } => {
            let client = ApiClient::new(&server_url)?;
            let task = client.set_completed(&id, false)?;
            println!("Task reopened.");
            render::print_task(&task, json_output)?;
        }

        Commands::Rm { id, yes } => {
            if !yes {
                eprint!("Delete task {}? [y/N]: ", id);
                let mut s = String::new();
                std::io::stdin().read_line(&mut s)?;
                if !s.trim().eq_ignore_ascii_case("y") {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            let client = ApiClient::new(&server_url)?;
            let mut store = SessionStore::new();
            match client.delete_task(&id) {
                Ok(removed) => {
                    store.dispatch(Action::TaskDeleted(id));
                    println!("Task deleted.");
                    render::print_task(&removed, json_output)?;
                }
                Err(e) => {
                    store.dispatch(Action::MutationFailed(e.to_string()));
                    anyhow::bail!("{e}");
                }
            }
        }

        Commands::Stats => {
            let client = ApiClient::new(&server_url)?;
            let mut store = SessionStore::new();
            fetch_all(&client, &mut store)?;

            let today = chrono::Local::now().date_naive();
            let stats = view::stats(&store.state().tasks, today);
            render::print_stats(&stats, json_output)?;
        }

        Commands::Server { action } => match action {
            ServerAction::Set { url } => {
                let mut config = config;
                config.server = url.trim_end_matches('/').to_string();
                config.save(&config_path)?;
                println!("Server set to {}.", config.server);
            }
            ServerAction::Show => {
                println!("{}", server_url);
            }
        },

        Commands::Status => {
            println!("Server:    {}", server_url);
            let client = ApiClient::new(&server_url)?;
            match client.health() {
                Ok(()) => println!("Status:    connected"),
                Err(e) => println!("Status:    disconnected ({})", e),
            }
        }

        Commands::Version => {
            println!("taskhub cli v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
