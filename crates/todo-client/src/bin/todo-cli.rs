use anyhow::Context;
use clap::{Parser, Subcommand};
use todo_client::{TodoClient, ViewController};
use todo_domain::{Todo, TodoId};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "todo-cli", about = "Terminal view of the todo list")]
struct Cli {
    /// Base URL of the todo API
    #[arg(long, env = "TODO_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show pending todos, or completed ones with --completed
    List {
        #[arg(long)]
        completed: bool,
    },
    Add {
        title: String,
        description: String,
    },
    /// Edit the title and/or description of a pending todo
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Complete {
        id: i64,
    },
    Delete {
        id: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut view = ViewController::new(TodoClient::new(cli.api_url));
    view.refresh().await.context("could not load todos")?;

    let show_completed = match cli.command {
        Command::List { completed } => completed,
        Command::Add { title, description } => {
            let created = view.add(title, description).await?;
            println!("Added #{}", created.id);
            false
        }
        Command::Edit {
            id,
            title,
            description,
        } => {
            let id = TodoId::new(id);
            if view.start_edit(id).is_none() {
                anyhow::bail!("no pending todo with id {id}");
            }
            if let Some(title) = title {
                view.set_draft_title(title);
            }
            if let Some(description) = description {
                view.set_draft_description(description);
            }
            view.save_edit().await?;
            println!("Updated #{id}");
            false
        }
        Command::Complete { id } => {
            view.complete(TodoId::new(id)).await?;
            println!("Completed #{id}");
            true
        }
        Command::Delete { id } => {
            view.delete(TodoId::new(id)).await?;
            println!("Deleted #{id}");
            false
        }
    };

    if show_completed {
        print_list("Completed", view.completed());
    } else {
        print_list("Todo", view.pending());
    }
    Ok(())
}

fn print_list(heading: &str, todos: &[Todo]) {
    println!("== {heading} ({}) ==", todos.len());
    for todo in todos {
        println!("#{} {}", todo.id, todo.title);
        println!("    {}", todo.description);
        if let Some(at) = todo.completed_on {
            println!("    Completed on: {}", at.format("%Y-%m-%d %H:%M:%S UTC"));
        }
    }
}
