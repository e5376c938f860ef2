use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use widget_buffer::api::ItemBuffer;
use widget_buffer::commands::PasteTarget;
use widget_buffer::config::BufferConfig;
use widget_buffer::error::{BufferError, Result};
use widget_buffer::model::{Dashboard, LayoutId};
use widget_buffer::payload::WidgetPosition;
use widget_buffer::store::fs::FileStore;
use widget_buffer::store::BufferSlot;

mod args;
use args::{Cli, Commands};

const STORE_DIR_ENV: &str = "WBUF_HOME";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    buffer: ItemBuffer<FileStore>,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Commands::Copy {
            dashboard,
            widget,
            state,
            layout,
            reference,
        } => handle_copy(&mut ctx, &dashboard, &widget, &state, layout, reference),
        Commands::Paste {
            dashboard,
            state,
            layout,
            row,
            col,
            reference,
            output,
        } => {
            let position = row.zip(col).map(|(row, col)| WidgetPosition::new(row, col));
            let target = PasteTarget {
                state: &state,
                layout,
                position,
            };
            handle_paste(&mut ctx, &dashboard, target, reference, output.as_deref())
        }
        Commands::Status {
            dashboard,
            state,
            layout,
        } => handle_status(&mut ctx, dashboard.as_deref(), &state, layout),
        Commands::Clear { reference, all } => handle_clear(&mut ctx, reference, all),
    }
}

/// Logs go to stderr so stdout stays clean for scripting. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
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
    let store_dir = resolve_store_dir(cli.store_dir.clone())?;
    tracing::debug!(dir = %store_dir.display(), "Using buffer directory");

    let config = BufferConfig::load_or_init(&store_dir)?;
    let buffer = ItemBuffer::new(FileStore::new(store_dir)).with_config(config);
    Ok(AppContext { buffer })
}

fn resolve_store_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(STORE_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let proj_dirs = ProjectDirs::from("com", "widget-buffer", "wbuf")
        .ok_or_else(|| BufferError::Api("Could not determine the data directory".into()))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

fn handle_copy(
    ctx: &mut AppContext,
    path: &Path,
    widget_id: &str,
    state: &str,
    layout: LayoutId,
    reference: bool,
) -> Result<()> {
    let dashboard = read_dashboard(path)?;
    let widget = dashboard.widget(widget_id).cloned().ok_or_else(|| {
        BufferError::Api(format!("Widget {} not found in {}", widget_id, path.display()))
    })?;

    if reference {
        ctx.buffer
            .copy_widget_reference(&dashboard, state, layout, &widget)?;
        println!(
            "{} {} ({}/{})",
            "Copied reference to widget".green(),
            widget_id.bold(),
            state,
            layout
        );
    } else {
        ctx.buffer.copy_widget(&dashboard, state, layout, &widget)?;
        println!(
            "{} {} ({}/{})",
            "Copied widget".green(),
            widget_id.bold(),
            state,
            layout
        );
    }
    Ok(())
}

fn handle_paste(
    ctx: &mut AppContext,
    path: &Path,
    target: PasteTarget<'_>,
    reference: bool,
    output: Option<&Path>,
) -> Result<()> {
    let dashboard = read_dashboard(path)?;

    let pasted = if reference {
        ctx.buffer.paste_widget_reference(dashboard, target)?
    } else {
        ctx.buffer.paste_widget(
            dashboard,
            target,
            Some(Box::new(|| println!("{}", "Entity aliases updated".yellow()))),
        )?
    };

    let destination = output.unwrap_or(path);
    write_dashboard(destination, &pasted.dashboard)?;

    println!(
        "{} {} into {}/{}",
        "Pasted widget".green(),
        pasted.widget.id.bold(),
        target.state,
        target.layout
    );
    if !pasted.aliases_changed {
        println!("{}", "Entity aliases unchanged".dimmed());
    }
    println!("{}", format!("Wrote {}", destination.display()).dimmed());
    Ok(())
}

fn handle_status(
    ctx: &mut AppContext,
    path: Option<&Path>,
    state: &str,
    layout: LayoutId,
) -> Result<()> {
    print_slot("Widget", ctx.buffer.has_widget()?);
    print_slot("Widget reference", ctx.buffer.has_widget_reference()?);

    if let Some(path) = path {
        let dashboard = read_dashboard(path)?;
        let eligible = ctx
            .buffer
            .can_paste_widget_reference(&dashboard, state, layout)?;
        let answer = if eligible { "yes".green() } else { "no".red() };
        println!(
            "Reference pasteable into {}/{}: {}",
            state, layout, answer
        );
    }
    Ok(())
}

fn handle_clear(ctx: &mut AppContext, reference: bool, all: bool) -> Result<()> {
    let slots: &[BufferSlot] = if all {
        &BufferSlot::ALL
    } else if reference {
        &[BufferSlot::WidgetReference]
    } else {
        &[BufferSlot::WidgetItem]
    };

    for slot in slots {
        ctx.buffer.clear(*slot)?;
        println!("{}", format!("Cleared {} slot", slot).green());
    }
    Ok(())
}

fn print_slot(label: &str, occupied: bool) {
    let state = if occupied {
        "copied".green()
    } else {
        "empty".dimmed()
    };
    println!("{:<18}{}", format!("{}:", label), state);
}

fn read_dashboard(path: &Path) -> Result<Dashboard> {
    let content = fs::read_to_string(path).map_err(|e| {
        BufferError::Api(format!("Cannot read dashboard {}: {}", path.display(), e))
    })?;
    Ok(serde_json::from_str(&content)?)
}

fn write_dashboard(path: &Path, dashboard: &Dashboard) -> Result<()> {
    let content = serde_json::to_string_pretty(dashboard)?;
    fs::write(path, content)?;
    Ok(())
}
