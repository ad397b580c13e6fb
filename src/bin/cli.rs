use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use escola::cli::create_admin;
use escola::cli::seeder::{SEED_PASSWORD, SeedCounts, seed};
use escola_config::{DatabaseConfig, DatabaseDriver};
use escola_db::{PostgresStore, init_store};
use escola_models::ADMIN_PERMISSION;

#[derive(Parser)]
#[command(name = "escola-cli")]
#[command(about = "Escola CLI - Administrative tools for the Escola API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an administrator account
    CreateAdmin {
        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Permission level; 2 opens the administrator routes
        #[arg(long, default_value_t = ADMIN_PERMISSION)]
        permission: i32,
    },
    /// Apply the database migrations
    Migrate,
    /// Seed the database with fake teachers, students and classes
    Seed {
        /// Number of teachers to create
        #[arg(long, default_value = "3")]
        teachers: usize,

        /// Number of classes to create
        #[arg(long, default_value = "3")]
        classes: usize,

        /// Number of students to create
        #[arg(short = 's', long, default_value = "20")]
        students: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "escola=info,warn".into()),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let config = DatabaseConfig::from_env();

    match cli.command {
        Commands::CreateAdmin {
            email,
            password,
            permission,
        } => handle_create_admin(&config, email, password, permission).await,
        Commands::Migrate => handle_migrate(&config).await,
        Commands::Seed {
            teachers,
            classes,
            students,
        } => {
            handle_seed(
                &config,
                SeedCounts {
                    teachers,
                    students,
                    classes,
                },
            )
            .await
        }
    }
}

async fn handle_create_admin(
    config: &DatabaseConfig,
    email: Option<String>,
    password: Option<String>,
    permission: i32,
) -> anyhow::Result<()> {
    // Use provided values or prompt interactively
    let email = match email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email address")
            .interact_text()
            .context("failed to read email")?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("failed to read password")?,
    };

    if password.chars().count() < 8 {
        anyhow::bail!("A senha deve conter no mínimo 8 caracteres");
    }

    let store = init_store(config).await?;
    let admin = create_admin(store.as_ref(), &email, &password, permission)
        .await
        .map_err(|err| err.error)?;

    println!("\n✅ Admin created successfully!");
    println!("   Email: {}", admin.email);
    println!("   Permission: {}", admin.permission);
    Ok(())
}

async fn handle_migrate(config: &DatabaseConfig) -> anyhow::Result<()> {
    if config.driver != DatabaseDriver::Postgres {
        anyhow::bail!("migrations only apply to the postgres driver");
    }
    let url = config
        .url
        .as_deref()
        .context("DATABASE_URL must be set")?;

    let store = PostgresStore::connect(url, config.max_connections).await?;
    store.migrate().await?;

    println!("✅ Migrations applied");
    Ok(())
}

async fn handle_seed(config: &DatabaseConfig, counts: SeedCounts) -> anyhow::Result<()> {
    println!("🌱 Seeding database...");
    let store = init_store(config).await?;
    let summary = seed(store.as_ref(), counts).await.map_err(|err| err.error)?;

    println!("\n✅ Seeding complete");
    println!("   - Teachers: {}", summary.teachers);
    println!("   - Classes: {}", summary.classes);
    println!("   - Students: {}", summary.students);
    println!("   - Enrollments: {}", summary.enrollments);
    println!("   Everyone's password: {}", SEED_PASSWORD);
    Ok(())
}
