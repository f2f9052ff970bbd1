use clap::Parser;
use guide_client::{GuideClientHttp, NewPlace};

#[derive(Parser, Debug)]
#[command(name = "guide", about = "Command-line client for the place guide")]
struct Cli {
    #[clap(short, long, default_value = "http://127.0.0.1:8080")]
    server: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    Register {
        #[clap(long)]
        email: String,
        #[clap(long)]
        password: String,
        #[clap(long)]
        admin: bool,
    },
    Login {
        #[clap(long)]
        email: String,
        #[clap(long)]
        password: String,
    },
    Logout,
    /// Register a place (admin only)
    AddPlace {
        #[clap(long)]
        name: String,
        #[clap(long)]
        category: String,
        #[clap(long)]
        rating: f64,
        #[clap(long, default_value = "")]
        address: String,
        #[clap(long, default_value = "")]
        hours: String,
    },
    /// List places of a category
    Places { category: String },
    /// Suggestions from the busiest category
    Flow,
    /// Replace the catalogue with demo data (admin only)
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let mut client = GuideClientHttp::connect(&args.server)?;

    match args.command {
        Command::Register {
            email,
            password,
            admin,
        } => {
            let user = client.register(email, password, admin).await?;
            let role = if user.admin { "admin" } else { "user" };
            println!("Registered {} as {} ({})", user.email, role, user.id);
        }
        Command::Login { email, password } => {
            client.login(email, password).await?;
            println!("Successfully logged in!");
        }
        Command::Logout => {
            client.logout()?;
            println!("Logged out.");
        }
        Command::AddPlace {
            name,
            category,
            rating,
            address,
            hours,
        } => {
            let place = client
                .create_place(&NewPlace {
                    name,
                    address,
                    hours,
                    rating,
                    category,
                })
                .await?;
            println!("Place created! ID: {}", place.id);
        }
        Command::Places { category } => {
            let places = client.list_places(&category).await?;
            println!("{} ({})", category, places.len());
            for place in places {
                println!("- {}", place);
            }
        }
        Command::Flow => {
            let places = client.flow().await?;
            if places.is_empty() {
                println!("Nothing to suggest yet.");
            }
            for place in places {
                println!("- {}", place);
            }
        }
        Command::Seed => {
            let inserted = client.seed().await?;
            println!("Seeded {} places.", inserted);
        }
    }

    Ok(())
}
