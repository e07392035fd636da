mod cli;
mod session;

use anyhow::Context;
use clap::Parser;
use cli::Args;
use folio::Portfolio;
use folio::domain::config::FolioConfig;
use folio::events::EventBus;
use folio::kernel::config::load_config;
use folio::kernel::context::PageContext;
use folio::kernel::dom::Document;
use folio::kernel::events::Loaded;
use folio::kernel::layout::{PageLayout, load_layout};
use folio_logger::Logger;
use session::{Summary, VisitorSession};
use std::sync::Arc;
use tracing::info;

const BUNDLED_LAYOUT: &str = include_str!("../assets/portfolio.json");

#[folio_runtime::main(memory_efficient, thread_name = "folio-page")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let builder = Logger::builder().name(env!("CARGO_PKG_NAME")).console(true).level(args.log_level);
    let _logger = match &args.log_dir {
        Some(dir) => builder.path(dir).init()?,
        None => builder.init()?,
    };

    let config: FolioConfig = load_config(args.config.as_deref())?;
    let layout = match &args.layout {
        Some(path) => load_layout(path)?,
        None => PageLayout::from_json(BUNDLED_LAYOUT).context("Bundled page layout")?,
    };
    let session = match &args.session {
        Some(path) => VisitorSession::load(path)?,
        None => VisitorSession::default(),
    };

    let ctx = PageContext::from_document(Document::from_layout(&layout)?).with_config(config);
    let page = Arc::new(Portfolio::new(ctx)?);

    let bus = EventBus::new();
    let dispatcher = folio::spawn_dispatcher(Arc::clone(&page), &bus)?;

    bus.publish(Loaded)?;
    session::replay(&page, &bus, &session).await?;
    page.settle().await;

    let closed = bus.shutdown();
    dispatcher.await.context("Event dispatcher")?;
    info!(channels = closed, "Event bus closed");

    Summary::of(&page).log();
    Ok(())
}
