use anyhow::{Context, Result, bail};
use blockmark::constants::{DEFAULT_EXPORT_FILE, DEFAULT_TABLE_COLS, DEFAULT_TABLE_ROWS};
use blockmark::input::InteractionController;
use blockmark::pdf::{PageRenderer, PdfiumPageRenderer};
use blockmark::perf::{SLOW_OPERATION_MS, measure_and_log, set_profiling_enabled};
use blockmark::persistence;
use blockmark::render::{OverlayPresenter, rasterize_overlay};
use blockmark::settings::Settings;
use blockmark::store::PageSelection;
use blockmark::{Session, types::PageIndex};
use clap::{Parser, Subcommand};
use image::RgbaImage;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "blockmark", about = "Annotate document pages with rectangular blocks", version)]
struct Cli {
    /// Log timings of slow operations
    #[arg(long, global = true)]
    profile: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List blocks sorted by page and vertical position
    List {
        /// Exported blocks file
        #[arg(default_value = DEFAULT_EXPORT_FILE)]
        blocks: PathBuf,
    },

    /// Render a PDF page with its blocks outlined
    Render {
        /// Input PDF file
        pdf: PathBuf,

        /// Exported blocks file
        #[arg(short, long)]
        blocks: Option<PathBuf>,

        /// Page to render (1-based)
        #[arg(short, long, default_value = "1")]
        page: PageIndex,

        /// Render scale (defaults to the configured scale)
        #[arg(short, long)]
        scale: Option<f32>,

        /// Output image path
        #[arg(short, long, default_value = "page.png")]
        output: PathBuf,
    },

    /// Copy a block to other pages
    Copy {
        /// Exported blocks file
        blocks: PathBuf,

        /// Block uid
        uid: Uuid,

        /// Target page ("3") or inclusive range ("2-4")
        pages: String,

        /// Where to write the result (defaults to overwriting the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Mark a block as a table, or unmark it if it already is one
    Table {
        /// Exported blocks file
        blocks: PathBuf,

        /// Block uid
        uid: Uuid,

        /// Rows of a new table
        #[arg(short, long, default_value_t = DEFAULT_TABLE_ROWS)]
        rows: usize,

        /// Columns of a new table
        #[arg(short, long, default_value_t = DEFAULT_TABLE_COLS)]
        cols: usize,
    },

    /// Show the settings file location and effective values
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    set_profiling_enabled(cli.profile);
    let settings = Settings::load();

    match cli.command {
        Commands::List { blocks } => list(blocks),
        Commands::Render {
            pdf,
            blocks,
            page,
            scale,
            output,
        } => render(&settings, pdf, blocks, page, scale, output),
        Commands::Copy {
            blocks,
            uid,
            pages,
            output,
        } => copy(blocks, uid, &pages, output),
        Commands::Table {
            blocks,
            uid,
            rows,
            cols,
        } => table(blocks, uid, rows, cols),
        Commands::Config => config(&settings),
    }
}

fn list(path: PathBuf) -> Result<()> {
    let store = persistence::load_from_path(&path)
        .with_context(|| format!("Failed to load blocks from {}", path.display()))?;

    for block in store.sorted_for_display() {
        let table = block
            .table
            .as_ref()
            .map(|t| format!(" table {}x{}", t.rows(), t.cols()))
            .unwrap_or_default();
        println!(
            "p{:<4} {}  ({:.0}, {:.0}) {:.0}x{:.0}{}  {}",
            block.page, block.uid, block.x, block.y, block.width, block.height, table, block.label
        );
    }
    Ok(())
}

fn render(
    settings: &Settings,
    pdf: PathBuf,
    blocks: Option<PathBuf>,
    page: PageIndex,
    scale: Option<f32>,
    output: PathBuf,
) -> Result<()> {
    let scale = scale.unwrap_or(settings.render_scale);
    let renderer = PdfiumPageRenderer::open(&pdf, settings.pdfium_library_dir.as_deref())
        .with_context(|| format!("Failed to open {}", pdf.display()))?;

    if page == 0 || page > renderer.page_count() {
        bail!("Page {} out of range (document has {} pages)", page, renderer.page_count());
    }

    let mut session = match &blocks {
        Some(path) => Session::with_store(
            persistence::load_from_path(path)
                .with_context(|| format!("Failed to load blocks from {}", path.display()))?,
        ),
        None => Session::new(),
    };
    session.load_document_from(&renderer, scale)?;
    session.go_to_page(page);

    let mut image = RgbaImage::new(0, 0);
    measure_and_log("render_page", SLOW_OPERATION_MS, || {
        renderer.render_page(page, scale, &mut image)
    })?;

    let input = InteractionController::from_settings(settings);
    if let Some(scene) = OverlayPresenter::present(&session, &input) {
        rasterize_overlay(&scene, &mut image);
        info!(page, blocks = scene.blocks.len(), "Overlay drawn");
    }

    image
        .save(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Wrote {}", output.display());
    Ok(())
}

fn copy(path: PathBuf, uid: Uuid, pages: &str, output: Option<PathBuf>) -> Result<()> {
    let mut store = persistence::load_from_path(&path)
        .with_context(|| format!("Failed to load blocks from {}", path.display()))?;
    if !store.contains(uid) {
        bail!("No block with uid {uid}");
    }

    let selection = PageSelection::parse(pages);
    if selection.is_empty() {
        bail!("No pages selected by {pages:?}");
    }
    let copies = store.copy_to_pages(uid, selection.pages());

    let output = output.unwrap_or(path);
    persistence::save_to_path(&store, &output)?;
    println!("Created {} copies in {}", copies.len(), output.display());
    Ok(())
}

fn table(path: PathBuf, uid: Uuid, rows: usize, cols: usize) -> Result<()> {
    let mut store = persistence::load_from_path(&path)
        .with_context(|| format!("Failed to load blocks from {}", path.display()))?;
    if !store.toggle_table(uid, rows, cols) {
        bail!("Could not toggle table on {uid} ({rows}x{cols})");
    }

    persistence::save_to_path(&store, &path)?;
    match store.get(uid).and_then(|b| b.table.as_ref()) {
        Some(table) => println!("Attached {}x{} table to {uid}", table.rows(), table.cols()),
        None => println!("Removed table from {uid}"),
    }
    Ok(())
}

fn config(settings: &Settings) -> Result<()> {
    match Settings::default_path() {
        Some(path) => println!("# {}", path.display()),
        None => println!("# no config directory on this platform"),
    }
    println!("{}", serde_json::to_string_pretty(settings)?);
    Ok(())
}
