//! Per-command handlers.
//!
//! `run()` parses arguments, sets up logging, builds the context from the
//! data directory and dispatches. Handlers call the API and print the
//! returned `CmdResult`; HTML goes to stdout unless `--out` is given.

use super::print::{print_config, print_messages, print_posts, print_resolution, print_uploads};
use super::setup::{Cli, Commands, PostFields};
use clap::Parser;
use newsdesk::api::{CmdMessage, CmdResult, ConfigAction, MessageLevel, NewsdeskApi};
use newsdesk::error::{NewsdeskError, Result};
use newsdesk::images::ImageRef;
use newsdesk::init::{initialize, FileStore};
use newsdesk::model::PostDraft;
use newsdesk::upload::FileBlob;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

struct AppContext {
    api: NewsdeskApi<FileStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List { html }) => handle_list(&mut ctx, html),
        Some(Commands::Create {
            title,
            fields,
            featured,
        }) => handle_create(&mut ctx, title, fields, featured),
        Some(Commands::Edit {
            id,
            title,
            fields,
            featured,
        }) => handle_edit(&mut ctx, id, title, fields, featured),
        Some(Commands::Delete { id, yes }) => handle_delete(&mut ctx, id, yes),
        Some(Commands::Feed { out, fragments }) => handle_feed(&mut ctx, out, fragments),
        Some(Commands::Article { id_or_query, out }) => handle_article(&mut ctx, id_or_query, out),
        Some(Commands::Resolve { reference }) => handle_resolve(&mut ctx, reference),
        Some(Commands::Uploads) => handle_uploads(&mut ctx),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&mut ctx, false),
    }
}

/// `warn` by default, `debug` with `--verbose`; `RUST_LOG` wins over both.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let ctx = initialize(cli.data_dir.as_deref())?;
    Ok(AppContext { api: ctx.api })
}

fn handle_list(ctx: &mut AppContext, html: bool) -> Result<()> {
    let result = ctx.api.list_posts()?;
    if html {
        print!("{}", result.html.unwrap_or_default());
        return Ok(());
    }
    print_posts(&result.listed_posts);
    print_messages(&result.messages);
    Ok(())
}

fn handle_create(
    ctx: &mut AppContext,
    title: String,
    fields: PostFields,
    featured: bool,
) -> Result<()> {
    let mut draft = PostDraft::new(title).featured(featured);
    let uploads_dir = ctx.api.settings().uploads_dir.clone();
    let image = apply_fields(&mut draft, fields, &uploads_dir)?;
    let result = ctx.api.create_post(draft, image)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    id: i64,
    title: Option<String>,
    fields: PostFields,
    featured: Option<bool>,
) -> Result<()> {
    let mut overrides = PostDraft::default();
    let uploads_dir = ctx.api.settings().uploads_dir.clone();
    let image = apply_fields(&mut overrides, fields.clone(), &uploads_dir)?;
    let result = ctx.api.update_post(id, image, |draft| {
        if let Some(title) = title {
            draft.title = title;
        }
        if let Some(featured) = featured {
            draft.featured = featured;
        }
        if fields.summary.is_some() {
            draft.summary = overrides.summary;
        }
        if fields.content.is_some() || fields.content_file.is_some() {
            draft.content = overrides.content;
        }
        if fields.image.is_some() && !overrides.image.is_empty() {
            draft.image = overrides.image;
        }
        if fields.video.is_some() {
            draft.video = overrides.video;
        }
    })?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, id: i64, yes: bool) -> Result<()> {
    if !yes {
        if let Some(post) = ctx.api.delete_preview(id) {
            println!("This will permanently remove the following post:");
            println!("  {} {}", post.id, post.title);
            print!("[Y] To delete: ");
            io::stdout().flush().map_err(NewsdeskError::Io)?;

            let mut input = String::new();
            io::stdin().read_line(&mut input).map_err(NewsdeskError::Io)?;

            if input.trim() != "Y" {
                print_messages(&[CmdMessage::info("Operation cancelled.")]);
                return Ok(());
            }
        }
    }

    let result = ctx.api.delete_post(id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_feed(ctx: &mut AppContext, out: Option<PathBuf>, fragments: bool) -> Result<()> {
    let html = if fragments {
        let result = ctx.api.feed()?;
        report(&result);
        let markup = result.feed.unwrap_or_default();
        format!("{}\n{}", markup.featured, markup.grid)
    } else {
        ctx.api.feed_page()?
    };
    emit(&html, out.as_deref())
}

fn handle_article(ctx: &mut AppContext, id_or_query: String, out: Option<PathBuf>) -> Result<()> {
    let query = if id_or_query.contains('=') {
        id_or_query
    } else {
        format!("id={}", id_or_query.trim())
    };
    let result = ctx.api.article(&query, true)?;
    report(&result);
    emit(&result.html.unwrap_or_default(), out.as_deref())
}

fn handle_resolve(ctx: &mut AppContext, reference: String) -> Result<()> {
    let result = ctx.api.resolve_image(&reference)?;
    if let Some(resolution) = &result.resolution {
        print_resolution(resolution);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_uploads(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.uploads()?;
    print_uploads(&result.uploads);
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key.clone(), value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    print_messages(&result.messages);

    if key.is_none() {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    Ok(())
}

/// Copy field flags into `draft`. An `--image` that names an existing file
/// is read for upload and returned; any other value is stored as a reference.
fn apply_fields(
    draft: &mut PostDraft,
    fields: PostFields,
    uploads_dir: &str,
) -> Result<Option<FileBlob>> {
    if let Some(summary) = fields.summary {
        draft.summary = summary;
    }
    if let Some(content) = fields.content {
        draft.content = content;
    }
    if let Some(path) = fields.content_file {
        draft.content = fs::read_to_string(&path).map_err(NewsdeskError::Io)?;
    }
    if let Some(video) = fields.video {
        draft.video = video;
    }

    let Some(image) = fields.image else {
        return Ok(None);
    };
    let path = Path::new(&image);
    if path.is_file() {
        return FileBlob::from_path(path, fields.image_type.as_deref()).map(Some);
    }
    if looks_like_reference(&image, uploads_dir) {
        draft.image = image;
        return Ok(None);
    }
    Err(NewsdeskError::Api(format!(
        "Image is neither a readable file nor an image reference: {}",
        image
    )))
}

fn looks_like_reference(image: &str, uploads_dir: &str) -> bool {
    matches!(
        ImageRef::classify(image, uploads_dir),
        ImageRef::SessionBlob(_) | ImageRef::External(_) | ImageRef::Upload(_)
    )
}

/// Messages go to stderr when stdout carries HTML.
fn report(result: &CmdResult) {
    for message in &result.messages {
        match message.level {
            MessageLevel::Warning | MessageLevel::Error => eprintln!("{}", message.content),
            MessageLevel::Info | MessageLevel::Success => log::info!("{}", message.content),
        }
    }
}

fn emit(html: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(NewsdeskError::Io)?;
            }
            fs::write(path, html).map_err(NewsdeskError::Io)?;
            println!("Wrote {}", path.display());
        }
        None => println!("{}", html),
    }
    Ok(())
}
