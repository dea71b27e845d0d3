use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use dialoguer::Input;
use dialoguer::Password;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Project;
use crate::domain::models::TargetLanguage;
use crate::domain::services::AuthState;
use crate::domain::services::Exporter;
use crate::infrastructure::api::ApiManager;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

fn format_project(project: &Project) -> String {
    return format!(
        "- (ID: {}) {} -> {} [{}], {}",
        project.generation_id,
        project.pdf_filename,
        project.output_filename,
        project.target_language,
        project.created_at_display(),
    );
}

/// Signs in with the configured credentials, prompting for whatever is
/// missing. The identity lands in the process-wide auth state.
async fn login_from_config() -> Result<()> {
    let mut email = Config::get(ConfigKey::UserEmail);
    if email.is_empty() {
        email = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Email")
            .interact_text()?;
    }

    let mut password = Config::get(ConfigKey::UserPassword);
    if password.is_empty() {
        password = Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .interact()?;
    }

    let identity = ApiManager::auth().login(&email, &password).await?;
    println!(
        "{}",
        Paint::green(format!("Welcome back, {}!", identity.display_name()))
    );
    AuthState::sign_in(identity);

    return Ok(());
}

async fn signup() -> Result<()> {
    let firstname: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("First name")
        .interact_text()?;
    let lastname: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Last name")
        .interact_text()?;
    let email: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Email")
        .interact_text()?;
    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;

    let message = ApiManager::auth()
        .signup(&firstname, &lastname, &email, &password)
        .await?;
    println!("{}", Paint::green(message));

    return Ok(());
}

async fn print_projects_list() -> Result<()> {
    let identity = AuthState::require()?;
    let projects = ApiManager::projects()
        .list(&identity.email)
        .await?
        .iter()
        .map(|project| {
            return format_project(project);
        })
        .collect::<Vec<String>>();

    if projects.is_empty() {
        println!("You have no saved projects yet. Generate your first one!");
    } else {
        println!("{}", projects.join("\n"));
    }

    return Ok(());
}

async fn print_project_stats(generation_id: &str) -> Result<()> {
    let stats = ApiManager::projects().stats(generation_id).await?;

    println!("Project {}", stats.generation_id);
    println!("- Language: {}", stats.target_language);
    println!("- Code: {} lines, {} characters ({} KB)", stats.code_lines, stats.code_characters, stats.code_size_kb);
    println!("- Diagram: {} KB", stats.pdf_size_kb);
    println!("- Created: {}", stats.created_at);
    println!("- Updated: {}", stats.updated_at);
    println!("- Refined since creation: {}", if stats.has_been_refined { "yes" } else { "no" });

    return Ok(());
}

async fn delete_project(generation_id: &str) -> Result<()> {
    let identity = AuthState::require()?;

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Are you sure you want to delete this project?")
        .default(false)
        .interact()?;
    if !confirmed {
        return Ok(());
    }

    ApiManager::projects()
        .delete(generation_id, &identity.email)
        .await?;
    println!("{}", Paint::green("Project deleted successfully!"));

    return Ok(());
}

async fn download_project(generation_id: &str, diagram: bool) -> Result<()> {
    let store = ApiManager::projects();
    let project = store.get(generation_id).await?;

    let (filename, bytes) = if diagram {
        (
            project.pdf_filename.to_string(),
            store.fetch_diagram(generation_id).await?,
        )
    } else {
        (
            project.output_filename.to_string(),
            store.fetch_code(generation_id).await?,
        )
    };

    let path = Exporter::default().save(&filename, &bytes).await?;
    println!("{}", Paint::green(format!("Saved {}", path.display())));

    return Ok(());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if !config_file_path.parent().unwrap().exists() {
        fs::create_dir_all(config_file_path.parent().unwrap()).await?;
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    let config_path_display = config_file_path.as_os_str().to_str().unwrap();
    println!("Created default config file at {config_path_display}");
    return Ok(());
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand_required(true)
        .subcommand(Command::new("create").about(format!(
            "Saves a default config file to {}",
            Config::default(ConfigKey::ConfigFile)
        )));
}

fn subcommand_signup() -> Command {
    return Command::new("signup").about("Creates an account on the service.");
}

fn subcommand_projects() -> Command {
    return Command::new("projects")
        .about("Manages your saved projects without entering the interface.")
        .subcommand_required(true)
        .subcommand(Command::new("list").about("Lists all of your saved projects."))
        .subcommand(
            Command::new("stats")
                .about("Prints usage statistics for one project.")
                .arg(Arg::new("id").help("The project's generation ID.").required(true)),
        )
        .subcommand(
            Command::new("delete")
                .about("Deletes one project.")
                .arg(Arg::new("id").help("The project's generation ID.").required(true)),
        )
        .subcommand(
            Command::new("download")
                .about("Downloads a project's generated code, or its diagram with --diagram.")
                .arg(Arg::new("id").help("The project's generation ID.").required(true))
                .arg(
                    Arg::new("diagram")
                        .long("diagram")
                        .help("Download the original diagram instead of the code.")
                        .action(ArgAction::SetTrue),
                ),
        );
}

pub fn build() -> Command {
    return Command::new("opmcode")
        .about("Terminal UI client for the OPM diagram-to-code service.")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("completions")
                .long("completions")
                .help("Generates shell completions.")
                .num_args(1)
                .value_parser(value_parser!(Shell)),
        )
        .arg(
            Arg::new("config-file")
                .short('c')
                .long("config-file")
                .env("OPMCODE_CONFIG_FILE")
                .num_args(1)
                .help(format!(
                    "Path to the configuration file. [default: {}]",
                    Config::default(ConfigKey::ConfigFile)
                ))
                .global(true),
        )
        .arg(
            Arg::new("server-url")
                .short('u')
                .long("server-url")
                .env("OPMCODE_SERVER_URL")
                .num_args(1)
                .help(format!(
                    "Base URL of the OPM code generation service. [default: {}]",
                    Config::default(ConfigKey::ServerUrl)
                ))
                .global(true),
        )
        .arg(
            Arg::new("user-email")
                .short('e')
                .long("user-email")
                .env("OPMCODE_USER_EMAIL")
                .num_args(1)
                .help("Email of your account. Used to sign in and to scope your saved projects.")
                .global(true),
        )
        .arg(
            Arg::new("user-password")
                .long("user-password")
                .env("OPMCODE_USER_PASSWORD")
                .num_args(1)
                .help("Your account password.")
                .global(true),
        )
        .arg(
            Arg::new("download-dir")
                .short('d')
                .long("download-dir")
                .env("OPMCODE_DOWNLOAD_DIR")
                .num_args(1)
                .help("Directory generated code and downloaded diagrams are saved to. Defaults to your downloads directory.")
                .global(true),
        )
        .arg(
            Arg::new("language")
                .short('l')
                .long("language")
                .env("OPMCODE_LANGUAGE")
                .num_args(1)
                .value_parser(clap::builder::PossibleValuesParser::new(
                    TargetLanguage::VARIANTS,
                ))
                .help(format!(
                    "Programming language the service should generate. [default: {}]",
                    Config::default(ConfigKey::Language)
                ))
                .global(true),
        )
        .subcommand(subcommand_config())
        .subcommand(subcommand_signup())
        .subcommand(subcommand_projects());
}

/// Handles everything that does not need the full interface. Returns true
/// when the caller should continue into the UI.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    if let Some(completions) = matches.get_one::<Shell>("completions") {
        let mut cmd = build();
        print_completions(*completions, &mut cmd);
        return Ok(false);
    }

    match matches.subcommand() {
        Some(("config", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            if let Some(("create", _)) = subcmd_matches.subcommand() {
                create_config_file().await?;
            }
            return Ok(false);
        }
        Some(("signup", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            signup().await?;
            return Ok(false);
        }
        Some(("projects", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            login_from_config().await?;

            match subcmd_matches.subcommand() {
                Some(("list", _)) => {
                    print_projects_list().await?;
                }
                Some(("stats", stats_matches)) => {
                    let id = stats_matches.get_one::<String>("id").unwrap();
                    print_project_stats(id).await?;
                }
                Some(("delete", delete_matches)) => {
                    let id = delete_matches.get_one::<String>("id").unwrap();
                    delete_project(id).await?;
                }
                Some(("download", download_matches)) => {
                    let id = download_matches.get_one::<String>("id").unwrap();
                    download_project(id, download_matches.get_flag("diagram")).await?;
                }
                _ => {}
            }

            return Ok(false);
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
            login_from_config().await?;
            return Ok(true);
        }
    }
}
