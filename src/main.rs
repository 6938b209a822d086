//! Ladle - Recipe service client
//!
//! Main entry point for the ladle CLI.

use clap::{Parser, Subcommand};
use dialoguer::Password;
use ladle::aggregator::{FetchReport, FetchScope};
use ladle::api::ApiClient;
use ladle::config::LadleConfig;
use ladle::recipe::{Recipe, RecipeId, SearchQuery};
use ladle::session::{landing_recipes, run_search, toggle_list_entry, ListKind, Session};
use std::process;

/// Ladle - Recipe service client
#[derive(Parser, Debug)]
#[command(name = "ladle")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: ~/.config/ladle/config.yaml)
    #[arg(short, long)]
    config: Option<String>,

    /// Override the backend origin from the config
    #[arg(short, long)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default configuration file
    Init,

    /// Log in to the recipe service
    Login {
        /// Username to log in as
        username: String,
    },

    /// Log out and clear the server-side session
    Logout,

    /// Show the currently authenticated user
    Whoami,

    /// Check whether the backend is responding
    Alive,

    /// Show random recipes from the catalog
    Random {
        /// How many recipes to fetch
        #[arg(short, long)]
        number: Option<u32>,
    },

    /// Show full details for one recipe
    Info {
        /// Recipe id (numeric or prefixed)
        id: String,
    },

    /// Search the catalog
    Search {
        /// Free-text query
        query: String,

        /// Cuisine filter (e.g. italian)
        #[arg(long)]
        cuisine: Option<String>,

        /// Diet filter (e.g. vegetarian)
        #[arg(long)]
        diet: Option<String>,

        /// Intolerance filter (e.g. gluten)
        #[arg(long)]
        intolerance: Option<String>,

        /// Maximum number of results
        #[arg(short, long)]
        number: Option<u32>,
    },

    /// Manage the favorites list
    Favorites {
        #[command(subcommand)]
        action: ListAction,
    },

    /// Manage the likes list
    Likes {
        #[command(subcommand)]
        action: ListAction,
    },

    /// Manage the watched list
    Watched {
        #[command(subcommand)]
        action: ListAction,
    },

    /// Show the most recently watched recipe ids
    Recent {
        /// How many ids to show
        #[arg(short, long, default_value_t = 3)]
        count: usize,
    },

    /// Show recipes created by the current user
    MyRecipes {
        /// Show family recipes instead of personal ones
        #[arg(long)]
        family: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ListAction {
    /// Show the list contents
    List,

    /// Flip membership of a recipe
    Toggle {
        /// Recipe id
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize logging
    if let Err(e) = ladle::logging::init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> ladle::Result<()> {
    if let Commands::Init = cli.command {
        let config = LadleConfig::new();
        config.save_default()?;
        println!("Wrote {}", LadleConfig::default_path().display());
        return Ok(());
    }

    // Load configuration
    let mut config = if let Some(config_path) = cli.config.clone() {
        LadleConfig::load(config_path)?
    } else {
        LadleConfig::load_default()?
    };
    if let Some(server) = cli.server {
        config.server_origin = server;
    }

    let api = ApiClient::from_config(&config)?;
    let mut session = Session::with_landing_ttl(config.landing_ttl());

    // One identity check on startup; failure is plain anonymous usage.
    session.startup_probe(&api).await;

    match cli.command {
        Commands::Init => unreachable!("handled above"),

        Commands::Login { username } => {
            let password = Password::new()
                .with_prompt(format!("Password for {}", username))
                .interact()
                .map_err(|e| ladle::LadleError::Config(format!("Prompt failed: {}", e)))?;

            session.begin_login();
            match api.login(&username, &password).await {
                Ok(()) => {
                    session.on_login_success(username.as_str());
                    let report = session.refresh_user_lists(&api, FetchScope::All).await;
                    warn_on_partial(&report);
                    println!("Logged in as {}", username);
                    print_list_sizes(&session);
                }
                Err(e) => {
                    session.on_login_failure();
                    return Err(e);
                }
            }
        }

        Commands::Logout => {
            api.logout().await?;
            session.on_logout();
            println!("Logged out");
        }

        Commands::Whoami => match session.identity.principal() {
            Some(username) => println!("{}", username),
            None => println!("Not logged in"),
        },

        Commands::Alive => {
            if api.check_alive().await {
                println!("Backend is up");
            } else {
                println!("Backend is not responding");
                process::exit(1);
            }
        }

        Commands::Random { number } => {
            let number = number.unwrap_or(config.random_count);
            let recipes = landing_recipes(&mut session, &api, number).await?;
            let report = session
                .refresh_user_lists(&api, FetchScope::PreferencesOnly)
                .await;
            warn_on_partial(&report);
            print_recipes(&session, &recipes);
        }

        Commands::Info { id } => {
            let id = RecipeId::from(id);
            let details = api.recipe_info(&id).await?;
            print_recipes(&session, std::slice::from_ref(&details.recipe));
            if let Some(servings) = details.servings {
                println!("  Servings: {}", servings);
            }
            if !details.ingredients.is_empty() {
                println!("  Ingredients:");
                for ingredient in &details.ingredients {
                    println!("    - {}", ingredient);
                }
            }
            if let Some(instructions) = details.instructions {
                println!("  Instructions: {}", instructions);
            }

            if session.is_authenticated() {
                if let Err(e) =
                    ladle::session::mark_watched(&mut session, &api, details.recipe).await
                {
                    tracing::warn!(error = %e, "could not record view");
                }
            }
        }

        Commands::Search {
            query,
            cuisine,
            diet,
            intolerance,
            number,
        } => {
            let query = SearchQuery {
                query,
                cuisine,
                diet,
                intolerance,
                number,
            };
            let results = run_search(&mut session, &api, query).await?;
            if results.is_empty() {
                println!("No recipes found");
            } else {
                print_recipes(&session, &results);
            }
        }

        Commands::Favorites { action } => {
            handle_list_action(&mut session, &api, ListKind::Favorites, action).await?
        }
        Commands::Likes { action } => {
            handle_list_action(&mut session, &api, ListKind::Liked, action).await?
        }
        Commands::Watched { action } => {
            handle_list_action(&mut session, &api, ListKind::Watched, action).await?
        }

        Commands::Recent { count } => {
            require_login(&session)?;
            let ids = api.recent_watched_ids(count).await?;
            for id in ids {
                println!("{}", id);
            }
        }

        Commands::MyRecipes { family } => {
            require_login(&session)?;
            let recipes = if family {
                api.my_family_recipes().await?
            } else {
                api.my_recipes().await?
            };
            print_recipes(&session, &recipes);
        }
    }

    Ok(())
}

async fn handle_list_action(
    session: &mut Session,
    api: &ApiClient,
    list: ListKind,
    action: ListAction,
) -> ladle::Result<()> {
    require_login(session)?;

    match action {
        ListAction::List => {
            let ids = api.user_list_ids(list).await?;
            println!("{} ({}):", list, ids.len());
            for id in ids {
                println!("  {}", id);
            }
        }
        ListAction::Toggle { id } => {
            let now_member = toggle_list_entry(session, api, list, id.as_str()).await?;
            if now_member {
                println!("Added {} to {}", id, list);
            } else {
                println!("Removed {} from {}", id, list);
            }
        }
    }
    Ok(())
}

fn require_login(session: &Session) -> ladle::Result<()> {
    if session.is_authenticated() {
        Ok(())
    } else {
        Err(ladle::LadleError::Auth(
            "Not logged in. Run 'ladle login <username>' first.".to_string(),
        ))
    }
}

fn warn_on_partial(report: &FetchReport) {
    for failure in &report.failures {
        eprintln!(
            "Warning: could not fetch {} ({})",
            failure.list, failure.reason
        );
    }
}

fn print_list_sizes(session: &Session) {
    println!(
        "  favorites: {}  liked: {}  watched: {}",
        session.interactions.len(ListKind::Favorites),
        session.interactions.len(ListKind::Liked),
        session.interactions.len(ListKind::Watched),
    );
}

fn print_recipes(session: &Session, recipes: &[Recipe]) {
    let badges = session
        .interactions
        .badges_for(recipes.iter().map(|r| &r.id));

    for (recipe, badge) in recipes.iter().zip(badges) {
        let mut flags = String::new();
        if badge.favorited {
            flags.push('*');
        }
        if badge.liked {
            flags.push('+');
        }
        if badge.watched {
            flags.push('.');
        }

        let minutes = recipe
            .ready_in_minutes
            .map(|m| format!("{} min", m))
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:<10} {:<40} {:>8}  {}",
            recipe.id, recipe.title, minutes, flags
        );
    }
}
