use backoffice_cli::seeder::{self, AdminSeed};
use backoffice_db::PgStore;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "backoffice-cli")]
#[command(about = "Backoffice CLI - Administrative tools for the Backoffice API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the Admin role (if missing) and an admin account
    SeedAdmin {
        /// Display name of the admin
        #[arg(short = 'n', long, default_value = "Admin User")]
        name: String,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
}

fn prompt_email(email: Option<String>) -> Result<String, dialoguer::Error> {
    match email {
        Some(email) => Ok(email),
        None => Input::new().with_prompt("Email address").interact_text(),
    }
}

fn prompt_password(password: Option<String>) -> Result<String, dialoguer::Error> {
    match password {
        Some(password) => Ok(password),
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact(),
    }
}

fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("\n❌ {}: {}", context, err);
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        fail("Configuration error", "DATABASE_URL must be set");
    };

    let store = match PgStore::connect(&database_url).await {
        Ok(store) => store,
        Err(e) => fail("Failed to connect to database", e),
    };

    match cli.command {
        Commands::SeedAdmin {
            name,
            email,
            password,
        } => handle_seed_admin(&store, name, email, password).await,
    }
}

async fn handle_seed_admin(
    store: &PgStore,
    name: String,
    email: Option<String>,
    password: Option<String>,
) {
    let email = prompt_email(email).unwrap_or_else(|e| fail("Failed to read email", e));
    let password = prompt_password(password).unwrap_or_else(|e| fail("Failed to read password", e));

    match seeder::seed_admin(store, AdminSeed {
        name,
        email,
        password,
    })
    .await
    {
        Ok(seeded) => {
            if seeded.role_created {
                println!("✅ Created role {}", seeded.role.name);
            }
            let verb = if seeded.user_created { "created" } else { "reset" };
            println!("\n✅ Admin user {}!", verb);
            println!("   Email: {}", seeded.user.email);
            println!("   Name: {}", seeded.user.name);
        }
        Err(e) => fail("Error seeding admin", e),
    }
}
