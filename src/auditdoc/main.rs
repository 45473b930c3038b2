use auditdoc::api::AuditApi;
use auditdoc::codec;
use auditdoc::config::{config_dir, AuditdocConfig};
use auditdoc::error::{AuditError, Result};
use auditdoc::ids::UuidIds;
use auditdoc::model::ResponseOption;
use auditdoc::outline::{OUTLINE_TEMPLATE, OUTLINE_TEMPLATE_FILE_NAME};
use chrono::Local;
use clap::Parser;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod args;
mod print;
use args::{Cli, Commands, ResponseArg};
use print::{print_document, print_success, print_warning};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    config: AuditdocConfig,
    config_dir: PathBuf,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let ctx = init_context(&cli)?;

    match cli.command {
        Commands::New { file, force } => {
            let file = file.unwrap_or_else(|| {
                PathBuf::from(AuditApi::<UuidIds>::export_file_name(Local::now().date_naive()))
            });
            handle_new(&ctx, &file, force)
        }
        Commands::Show { file } => handle_show(&ctx, &file),
        Commands::Template => handle_template(),
        Commands::Fill { file, outline } => handle_fill(&ctx, &file, &outline),
        Commands::Split { file, page, row } => handle_split(&ctx, &file, page, row),
        Commands::Merge { file } => handle_merge(&ctx, &file),
        Commands::AddPage { file } => handle_add_page(&ctx, &file),
        Commands::RemovePage { file, page } => handle_remove_page(&ctx, &file, page),
        Commands::Respond {
            file,
            page,
            row,
            option,
        } => handle_respond(&ctx, &file, page, row, option),
        Commands::Normalize { file } => handle_normalize(&ctx, &file),
        Commands::Config => handle_config(&ctx),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_dir = config_dir(cli.config_dir.as_deref())?;
    let config = AuditdocConfig::load(&config_dir)?;
    debug!(dir = %config_dir.display(), option_set = ?config.option_set, "loaded config");
    Ok(AppContext { config, config_dir })
}

fn load_document(ctx: &AppContext, file: &Path) -> Result<AuditApi> {
    let text = fs::read_to_string(file).map_err(|e| {
        AuditError::Api(format!("Cannot read {}: {}", file.display(), e))
    })?;
    let pages = codec::deserialize_with(&text, &UuidIds, ctx.config.option_set)?;
    Ok(AuditApi::from_pages(pages, UuidIds, ctx.config.option_set))
}

fn save_document(api: &AuditApi, file: &Path) -> Result<()> {
    let text = api.export_document()?;
    fs::write(file, text)?;
    debug!(file = %file.display(), "saved document");
    Ok(())
}

fn handle_new(ctx: &AppContext, file: &Path, force: bool) -> Result<()> {
    if file.exists() && !force {
        return Err(AuditError::Api(format!(
            "{} already exists (use --force to overwrite)",
            file.display()
        )));
    }
    let api = AuditApi::new(&ctx.config.template, ctx.config.option_set);
    save_document(&api, file)?;
    print_success(&format!("Created {}", file.display()));
    Ok(())
}

fn handle_show(ctx: &AppContext, file: &Path) -> Result<()> {
    let api = load_document(ctx, file)?;
    print_document(api.pages(), api.option_set());
    Ok(())
}

fn handle_template() -> Result<()> {
    debug!(file_name = OUTLINE_TEMPLATE_FILE_NAME, "printing outline template");
    println!("{}", OUTLINE_TEMPLATE);
    Ok(())
}

fn handle_fill(ctx: &AppContext, file: &Path, outline: &str) -> Result<()> {
    let text = if outline == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(outline)?
    };

    let mut api = load_document(ctx, file)?;
    let count = api.fill_from_outline(&text)?;
    save_document(&api, file)?;
    print_success(&format!("Filled page 1 with {} rows", count));
    Ok(())
}

fn handle_split(ctx: &AppContext, file: &Path, page: usize, row: usize) -> Result<()> {
    let mut api = load_document(ctx, file)?;
    let (page_id, _) = api.row_id(page, row)?;
    if !api.split_at(&page_id, row - 1) {
        print_warning("A page break cannot go above the first row");
        return Ok(());
    }
    save_document(&api, file)?;
    print_success(&format!(
        "Split page {} above row {} ({} pages)",
        page,
        row,
        api.pages().len()
    ));
    Ok(())
}

fn handle_merge(ctx: &AppContext, file: &Path) -> Result<()> {
    let mut api = load_document(ctx, file)?;
    if !api.merge_all() {
        print_warning("Document already has a single page");
        return Ok(());
    }
    save_document(&api, file)?;
    print_success(&format!("Merged into 1 page with {} rows", api.row_count()));
    Ok(())
}

fn handle_add_page(ctx: &AppContext, file: &Path) -> Result<()> {
    let mut api = load_document(ctx, file)?;
    api.add_page();
    save_document(&api, file)?;
    print_success(&format!("Added page {}", api.pages().len()));
    Ok(())
}

fn handle_remove_page(ctx: &AppContext, file: &Path, page: usize) -> Result<()> {
    let mut api = load_document(ctx, file)?;
    let page_id = api.page_id(page)?;
    if !api.remove_page(&page_id) {
        print_warning("The last page cannot be removed");
        return Ok(());
    }
    save_document(&api, file)?;
    print_success(&format!("Removed page {}", page));
    Ok(())
}

fn handle_respond(
    ctx: &AppContext,
    file: &Path,
    page: usize,
    row: usize,
    option: ResponseArg,
) -> Result<()> {
    let option = response_option(option);
    let mut api = load_document(ctx, file)?;
    let (page_id, row_id) = api.row_id(page, row)?;

    let is_question = api
        .pages()
        .iter()
        .find(|p| p.id == page_id)
        .and_then(|p| p.row(&row_id))
        .and_then(|r| r.as_question())
        .is_some();
    if !is_question {
        return Err(AuditError::Api(format!(
            "Row {} on page {} is a section",
            row, page
        )));
    }
    if !api.option_set().contains(option) {
        return Err(AuditError::Api(format!(
            "Option {} is not available in this document",
            option.key()
        )));
    }

    api.select_response(&page_id, &row_id, option);
    save_document(&api, file)?;
    print_success(&format!("Updated page {} row {}", page, row));
    Ok(())
}

fn handle_normalize(ctx: &AppContext, file: &Path) -> Result<()> {
    let api = load_document(ctx, file)?;
    save_document(&api, file)?;
    print_success(&format!(
        "Normalized {} pages, {} rows",
        api.pages().len(),
        api.row_count()
    ));
    Ok(())
}

fn handle_config(ctx: &AppContext) -> Result<()> {
    println!("# {}", ctx.config_dir.join("config.json").display());
    println!("{}", serde_json::to_string_pretty(&ctx.config)?);
    Ok(())
}

fn response_option(arg: ResponseArg) -> ResponseOption {
    match arg {
        ResponseArg::Oui => ResponseOption::Yes,
        ResponseArg::Non => ResponseOption::No,
        ResponseArg::NonConcerne => ResponseOption::NotApplicable,
        ResponseArg::Observe => ResponseOption::Observed,
        ResponseArg::Affirme => ResponseOption::AffirmedByOperator,
    }
}

