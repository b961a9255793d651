use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cocktail_lab::{AppConfig, AppStore, CocktailLab, DrinkSummary, SearchFilters};
use log::debug;

/// Search TheCocktailDB and keep a list of favorite recipes.
#[derive(Parser)]
#[command(name = "cocktail-lab", version)]
struct Cli {
    /// Base URL of the recipe API.
    #[arg(long, global = true, env = "COCKTAIL_LAB_API_URL")]
    api_url: Option<String>,

    /// File the favorites list is stored in.
    #[arg(long, global = true, env = "COCKTAIL_LAB_FAVORITES")]
    favorites_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search by ingredient and/or category. With neither, browse random drinks.
    Search {
        #[arg(short, long, default_value = "")]
        ingredient: String,
        #[arg(short, long, default_value = "")]
        category: String,
    },
    /// Show the full recipe for a drink id.
    Show {
        id: String,
        /// Also add the recipe to favorites.
        #[arg(long)]
        save: bool,
    },
    /// List recipe categories.
    Categories,
    /// Manage favorites.
    Favorites {
        #[command(subcommand)]
        action: FavoritesCommand,
    },
}

#[derive(Subcommand)]
enum FavoritesCommand {
    List,
    Add { id: String },
    Remove { id: String },
    Clear,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config = AppConfig::load()?;
    let mut builder = CocktailLab::builder().config(config);
    if let Some(url) = cli.api_url {
        builder = builder.base_url(url);
    }
    if let Some(path) = cli.favorites_file {
        builder = builder.favorites_path(path);
    }
    let store = builder.build()?;

    let result = run(&store, cli.command).await;
    if let Some(notification) = store.notification() {
        eprintln!("[{}] {}", notification.severity, notification.message);
    }
    result
}

async fn run(store: &AppStore, command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Search {
            ingredient,
            category,
        } => {
            let filters = SearchFilters::new(ingredient, category);
            debug!("Searching with {:?}", filters);
            for drink in store.search(filters).await {
                print_drink(store, &drink);
            }
        }
        Command::Show { id, save } => {
            let recipe = store.select_recipe(&id).await?;
            println!("{}", recipe);
            if save {
                store.add_favorite(recipe);
            }
            store.close_modal();
        }
        Command::Categories => {
            store.fetch_categories().await;
            for category in store.snapshot().categories {
                println!("{}", category);
            }
        }
        Command::Favorites { action } => match action {
            FavoritesCommand::List => {
                for recipe in store.favorites() {
                    print_drink(store, &recipe.summary());
                }
            }
            FavoritesCommand::Add { id } => {
                let recipe = store.select_recipe(&id).await?;
                store.close_modal();
                store.add_favorite(recipe);
            }
            FavoritesCommand::Remove { id } => store.remove_favorite(&id),
            FavoritesCommand::Clear => store.clear_favorites(),
        },
    }

    Ok(())
}

fn print_drink(store: &AppStore, drink: &DrinkSummary) {
    let marker = if store.is_favorite(&drink.id) { "*" } else { " " };
    match &drink.category {
        Some(category) => println!("{} {:>6}  {} [{}]", marker, drink.id, drink.name, category),
        None => println!("{} {:>6}  {}", marker, drink.id, drink.name),
    }
}
