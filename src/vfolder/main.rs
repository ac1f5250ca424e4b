use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vfolder::api::{
    CmdMessage, ConfigAction, FolderEdit, MessageLevel, NewFolder, VfolderApi, VfolderPaths,
};
use vfolder::config::VfolderConfig;
use vfolder::error::{Result, VfolderError};
use vfolder::model::{Store, TreeItem, VirtualFolder};
use vfolder::store::fs::FileStore;

mod args;
use args::{Cli, Commands, FolderCommands, FolderFields, StoreCommands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: VfolderApi<FileStore>,
    config: VfolderConfig,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Folder(cmd)) => handle_folder(&mut ctx, cmd),
        Some(Commands::Store(cmd)) => handle_store(&mut ctx, cmd),
        Some(Commands::Sync { name }) => handle_sync(&mut ctx, name),
        Some(Commands::Match { name }) => handle_match(&ctx, &name),
        Some(Commands::Find { path }) => handle_find(&ctx, &path),
        Some(Commands::Tree { name }) => handle_tree(&ctx, &name),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        Some(Commands::Doctor) => handle_doctor(&mut ctx),
        Some(Commands::Init) => handle_init(&ctx),
        None => handle_folder(&mut ctx, FolderCommands::List),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => ProjectDirs::from("org", "vfolder", "vfolder")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| VfolderError::Store("Could not determine data dir".into()))?,
    };

    let (config, config_error) = match VfolderConfig::load(&data_dir) {
        Ok(config) => (config, None),
        Err(e) => (VfolderConfig::default(), Some(e)),
    };
    init_tracing(&config, cli.verbose);
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "unreadable config.json, using defaults");
    }
    let store = FileStore::new(data_dir.clone());
    tracing::debug!(catalog = %store.location().display(), "opening catalog");
    let api = VfolderApi::new(store, VfolderPaths { data: data_dir });

    Ok(AppContext { api, config })
}

// RUST_LOG wins, then -v, then the configured filter
fn init_tracing(config: &VfolderConfig, verbose: bool) {
    let fallback = if verbose {
        "vfolder=debug".to_string()
    } else {
        config.log_filter.clone()
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}

fn handle_folder(ctx: &mut AppContext, cmd: FolderCommands) -> Result<()> {
    match cmd {
        FolderCommands::Create { name, fields } => {
            let folder = NewFolder {
                name,
                description: fields.description.unwrap_or_default(),
                rules: fields.rules.unwrap_or_default(),
                languages: fields.language,
                projects: fields.project,
                priority: fields.priority.unwrap_or(ctx.config.default_priority),
                is_public: !fields.private,
            };
            let result = ctx.api.create_folder(folder)?;
            print_messages(&result.messages);
        }
        FolderCommands::Edit {
            name,
            fields,
            all_languages,
            all_projects,
            public,
        } => {
            let edit = folder_edit(fields, all_languages, all_projects, public);
            let result = ctx.api.edit_folder(&name, edit)?;
            print_messages(&result.messages);
        }
        FolderCommands::List => {
            let result = ctx.api.list_folders()?;
            print_folders(&result.listed_folders);
            print_messages(&result.messages);
        }
        FolderCommands::Show { name } => {
            let result = ctx.api.show_folder(&name)?;
            for folder in &result.listed_folders {
                print_folder_detail(folder);
            }
            print_messages(&result.messages);
        }
        FolderCommands::Delete { name } => {
            let result = ctx.api.delete_folder(&name)?;
            print_messages(&result.messages);
        }
    }
    Ok(())
}

fn folder_edit(
    fields: FolderFields,
    all_languages: bool,
    all_projects: bool,
    public: bool,
) -> FolderEdit {
    // An empty list clears the restriction
    let languages = if all_languages {
        Some(Vec::new())
    } else if fields.language.is_empty() {
        None
    } else {
        Some(fields.language)
    };
    let projects = if all_projects {
        Some(Vec::new())
    } else if fields.project.is_empty() {
        None
    } else {
        Some(fields.project)
    };
    let is_public = if public {
        Some(true)
    } else if fields.private {
        Some(false)
    } else {
        None
    };

    FolderEdit {
        description: fields.description,
        rules: fields.rules,
        languages,
        projects,
        priority: fields.priority,
        is_public,
    }
}

fn handle_store(ctx: &mut AppContext, cmd: StoreCommands) -> Result<()> {
    let result = match cmd {
        StoreCommands::Add { paths } => ctx.api.add_stores(&paths)?,
        StoreCommands::List { folder } => {
            let result = ctx.api.list_stores(folder.as_deref())?;
            print_stores(&result.listed_stores);
            result
        }
        StoreCommands::Remove { path } => ctx.api.remove_store(&path)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_sync(ctx: &mut AppContext, name: Option<String>) -> Result<()> {
    let result = ctx.api.sync(name.as_deref())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_match(ctx: &AppContext, name: &str) -> Result<()> {
    let result = ctx.api.matching_stores(name)?;
    print_stores(&result.listed_stores);
    print_messages(&result.messages);
    Ok(())
}

fn handle_find(ctx: &AppContext, path: &str) -> Result<()> {
    let result = ctx.api.find_folders(path)?;
    print_folders(&result.listed_folders);
    print_messages(&result.messages);
    Ok(())
}

fn handle_tree(ctx: &AppContext, name: &str) -> Result<()> {
    let result = ctx.api.tree(name)?;
    print_tree_items(&result.tree_items);
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    print_messages(&result.messages);

    if show_all {
        if let Some(config) = &result.config {
            for key in VfolderConfig::KEYS {
                if let Some(val) = config.get(key) {
                    println!("{} = {}", key.bold(), val);
                }
            }
        }
    }
    Ok(())
}

fn handle_doctor(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.doctor()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.init()?;
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn print_folders(folders: &[VirtualFolder]) {
    for folder in folders {
        let name = if folder.is_public {
            folder.name.bold()
        } else {
            folder.name.dimmed()
        };
        println!(
            "{:<24} {:>6} {}  {}",
            name,
            format!("{:.2}", folder.priority).yellow(),
            folder.scope.to_string().dimmed(),
            folder.rules_display()
        );
    }
}

fn print_folder_detail(folder: &VirtualFolder) {
    println!("{}", folder.name.bold());
    if !folder.description.is_empty() {
        println!("  {}", folder.description);
    }
    println!("  {:<12} {}", "rules:".dimmed(), folder.rules_display());
    println!("  {:<12} {}", "scope:".dimmed(), folder.scope);
    println!("  {:<12} {}", "priority:".dimmed(), folder.priority);
    println!("  {:<12} {}", "public:".dimmed(), folder.is_public);
    println!(
        "  {:<12} {}",
        "updated:".dimmed(),
        folder.updated_at.format("%Y-%m-%d %H:%M")
    );
}

fn print_stores(stores: &[Store]) {
    for store in stores {
        println!(
            "{} {}",
            format!("{:>6.2}", store.priority).yellow(),
            store.pootle_path
        );
    }
}

fn print_tree_items(items: &[TreeItem]) {
    for item in items {
        println!(
            "{:<48} {}",
            item.pootle_path,
            format!("{} store(s)", item.store_count).dimmed()
        );
    }
}
