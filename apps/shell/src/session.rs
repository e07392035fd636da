use anyhow::Context;
use folio::Portfolio;
use folio::domain::constants::{ACTIVE, HREF};
use folio::events::{EventBus, EventBusError};
use folio::features::navigation::nav_links;
use folio::kernel::dom::Query;
use folio::kernel::events::{FieldBlurred, FormSubmitted, LinkClicked, Scrolled};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Time given to the dispatcher between two visitor actions.
const PACE: Duration = Duration::from_millis(50);

/// One thing a visitor does on the page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub(crate) enum Step {
    Scroll { y: f64 },
    /// Clicks the navigation link whose `href` matches.
    Click { href: String },
    /// Types `value` into the element `id`, then leaves the field.
    Fill { id: String, value: String },
    Submit,
    Wait { ms: u64 },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct VisitorSession {
    pub(crate) steps: Vec<Step>,
}

impl Default for VisitorSession {
    fn default() -> Self {
        let fill = |id: &str, value: &str| Step::Fill { id: id.to_owned(), value: value.to_owned() };
        Self {
            steps: vec![
                Step::Wait { ms: 4_500 },
                Step::Scroll { y: 900.0 },
                Step::Wait { ms: 1_600 },
                Step::Scroll { y: 1_600.0 },
                Step::Wait { ms: 1_600 },
                Step::Click { href: "#contact".to_owned() },
                fill("contactName", "Ada Lovelace"),
                fill("contactEmail", "ada@example.com"),
                fill("contactMessage", "Loved the projects section, let's talk."),
                Step::Submit,
                Step::Wait { ms: 3_500 },
            ],
        }
    }
}

impl VisitorSession {
    pub(crate) fn from_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).context("Parsing visitor session")
    }

    pub(crate) fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Reading visitor session {}", path.display()))?;
        Self::from_json(&raw)
    }
}

/// Feeds every step of `session` into `bus` as the page would see it.
///
/// A click that ends in a smooth scroll is followed by the matching scroll
/// event, as a browser would emit once it arrives.
pub(crate) async fn replay(
    page: &Portfolio,
    bus: &EventBus,
    session: &VisitorSession,
) -> Result<(), EventBusError> {
    let ctx = page.context();

    for (index, step) in session.steps.iter().enumerate() {
        debug!(index, ?step, "Replaying visitor step");
        match step {
            Step::Scroll { y } => {
                bus.publish(Scrolled { y: *y })?;
            },
            Step::Click { href } => {
                let (link, requests) = {
                    let document = ctx.dom.read();
                    let link = nav_links(&document, &ctx.config.selectors)
                        .into_iter()
                        .find(|&link| document.attribute(link, HREF) == Some(href.as_str()));
                    (link, document.scroll_requests().len())
                };
                let Some(link) = link else {
                    warn!(href = %href, "No navigation link to click");
                    continue;
                };

                bus.publish(LinkClicked { node: link })?;
                sleep(PACE).await;

                let arrived = ctx.dom.read().scroll_requests().get(requests).map(|request| request.top);
                if let Some(y) = arrived {
                    bus.publish(Scrolled { y })?;
                }
            },
            Step::Fill { id, value } => {
                let field = {
                    let mut document = ctx.dom.write();
                    let field = document.by_id(id);
                    if let Some(field) = field {
                        document.set_value(field, value.as_str());
                    }
                    field
                };
                match field {
                    Some(node) => {
                        bus.publish(FieldBlurred { node })?;
                    },
                    None => warn!(id = %id, "No field to fill"),
                }
            },
            Step::Submit => {
                let form = ctx.dom.read().by_id(&ctx.config.selectors.form_id);
                match form {
                    Some(node) => {
                        bus.publish(FormSubmitted { node })?;
                    },
                    None => warn!("No contact form to submit"),
                }
            },
            Step::Wait { ms } => sleep(Duration::from_millis(*ms)).await,
        }
        sleep(PACE).await;
    }

    info!(steps = session.steps.len(), "Visitor session replayed");
    Ok(())
}

/// What a visitor would see once the session is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) name: String,
    pub(crate) title: String,
    pub(crate) active: Option<String>,
    pub(crate) counters: Vec<String>,
    pub(crate) skills: Vec<String>,
    pub(crate) status: String,
}

impl Summary {
    pub(crate) fn of(page: &Portfolio) -> Self {
        let ctx = page.context();
        let selectors = &ctx.config.selectors;
        let document = ctx.dom.read();

        let text_by_id = |id: &str| {
            document.by_id(id).and_then(|node| document.text(node)).unwrap_or_default().to_owned()
        };
        let texts_by_class = |class: &str| {
            document
                .query_all(&Query::new().class(class))
                .into_iter()
                .filter_map(|node| document.text(node).map(str::to_owned))
                .collect::<Vec<_>>()
        };

        let active = nav_links(&document, selectors)
            .into_iter()
            .find(|&link| document.has_class(link, ACTIVE))
            .and_then(|link| document.attribute(link, HREF).map(str::to_owned));

        Self {
            name: text_by_id(&selectors.typed_name_id),
            title: text_by_id(&selectors.typed_title_id),
            active,
            counters: texts_by_class(&selectors.counter_class),
            skills: texts_by_class(&selectors.skill_percent_class),
            status: text_by_id(&selectors.status_id),
        }
    }

    pub(crate) fn log(&self) {
        info!(
            name = %self.name,
            title = %self.title,
            active = self.active.as_deref().unwrap_or("-"),
            counters = ?self.counters,
            skills = ?self.skills,
            status = %self.status,
            "Session finished"
        );
    }
}
