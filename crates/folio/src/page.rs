use crate::error::{PortfolioError, PortfolioErrorExt};
use crate::tasks::Tasks;
use folio_contact::ContactForm;
use folio_domain::behaviors::Behaviors;
use folio_kernel::context::PageContext;
use folio_kernel::dom::NodeId;
use folio_navigation::{NavigationTracker, SmoothScroll};
use folio_reveal::{Counters, ProgressBars};
use folio_typing::TypingEffect;
use tracing::{debug, info, warn};

/// Every enabled behavior of one page session, built from a single context.
#[derive(Debug)]
pub struct Portfolio {
    ctx: PageContext,
    behaviors: Behaviors,
    navigation: Option<NavigationTracker>,
    smooth_scroll: Option<SmoothScroll>,
    typing: Option<TypingEffect>,
    counters: Option<Counters>,
    progress: Option<ProgressBars>,
    contact: Option<ContactForm>,
    tasks: Tasks,
}

impl Portfolio {
    /// Builds the behaviors selected by `ctx.config.behaviors`.
    ///
    /// # Errors
    /// Returns [`PortfolioError::Contact`] if the contact rules cannot be compiled.
    pub fn new(ctx: PageContext) -> Result<Self, PortfolioError> {
        let behaviors = ctx.config.behaviors;
        let enabled = |flag: Behaviors| behaviors.contains(flag);

        let contact = if enabled(Behaviors::CONTACT) {
            Some(ContactForm::new(ctx.clone()).context("Building contact form")?)
        } else {
            None
        };

        info!(behaviors = ?behaviors, "Page behaviors ready");
        Ok(Self {
            navigation: enabled(Behaviors::NAVIGATION).then(|| NavigationTracker::new(ctx.clone())),
            smooth_scroll: enabled(Behaviors::SMOOTH_SCROLL).then(|| SmoothScroll::new(ctx.clone())),
            typing: enabled(Behaviors::TYPING).then(|| TypingEffect::new(ctx.clone())),
            counters: enabled(Behaviors::COUNTERS).then(|| Counters::new(ctx.clone())),
            progress: enabled(Behaviors::PROGRESS).then(|| ProgressBars::new(ctx.clone())),
            contact,
            behaviors,
            tasks: Tasks::default(),
            ctx,
        })
    }

    #[must_use]
    pub const fn context(&self) -> &PageContext {
        &self.ctx
    }

    #[must_use]
    pub const fn behaviors(&self) -> Behaviors {
        self.behaviors
    }

    #[must_use]
    pub const fn tasks(&self) -> &Tasks {
        &self.tasks
    }

    #[must_use]
    pub const fn counters(&self) -> Option<&Counters> {
        self.counters.as_ref()
    }

    #[must_use]
    pub const fn progress(&self) -> Option<&ProgressBars> {
        self.progress.as_ref()
    }

    /// Starts every load-time behavior. Timed sequences run as background tasks.
    pub fn on_load(&self) {
        if self.behaviors.contains(Behaviors::SCROLL_ANIMATIONS) {
            self.ctx.init_scroll_animations();
        }

        if let Some(navigation) = &self.navigation {
            let navbar = navigation.clone();
            self.tasks.spawn(async move { navbar.reveal_navbar().await });
            navigation.on_scroll();
        }

        if let Some(typing) = &self.typing {
            let typing = typing.clone();
            self.tasks.spawn(async move { typing.run().await });
        }

        if let Some(progress) = &self.progress {
            let progress = progress.clone();
            let tasks = self.tasks.clone();
            self.tasks.spawn(async move {
                if progress.arm().await {
                    spawn_progress(&tasks, &progress);
                }
            });
        }

        self.check_reveals();
        info!("Page loaded");
    }

    /// Applies a new scroll offset and re-evaluates scroll-driven behaviors.
    pub fn on_scroll(&self, y: f64) {
        self.ctx.dom.write().set_scroll_y(y);

        if let Some(navigation) = &self.navigation {
            navigation.on_scroll();
        }
        self.check_reveals();
    }

    /// Returns `true` when the click was turned into a smooth scroll.
    pub fn on_link_click(&self, link: NodeId) -> bool {
        self.smooth_scroll.as_ref().is_some_and(|scroll| scroll.on_link_click(link))
    }

    pub fn on_blur(&self, node: NodeId) -> Option<bool> {
        self.contact.as_ref().and_then(|contact| contact.on_blur(node))
    }

    /// Intercepts a submit of the contact form; other forms are left alone.
    pub fn on_submit(&self, form: NodeId) -> bool {
        let Some(contact) = self.contact.as_ref().filter(|c| c.is_form(form)) else {
            return false;
        };
        let contact = contact.clone();
        self.tasks.spawn(async move {
            let outcome = contact.on_submit().await;
            debug!(?outcome, "Contact submission finished");
        });
        true
    }

    /// Starts the animation of every counter or bar that became visible.
    pub fn check_reveals(&self) {
        if let Some(counters) = &self.counters {
            for counter in counters.take_visible() {
                let counters = counters.clone();
                self.tasks.spawn(async move {
                    if let Err(err) = counters.animate(counter).await {
                        warn!("Counter animation aborted: {err}");
                    }
                });
            }
        }
        if let Some(progress) = &self.progress {
            spawn_progress(&self.tasks, progress);
        }
    }

    /// Waits for every running sequence.
    pub async fn settle(&self) {
        self.tasks.settle().await;
    }
}

fn spawn_progress(tasks: &Tasks, progress: &ProgressBars) {
    for bar in progress.take_visible() {
        let progress = progress.clone();
        tasks.spawn(async move {
            if let Err(err) = progress.animate(bar).await {
                warn!("Progress animation aborted: {err}");
            }
        });
    }
}

impl Drop for Portfolio {
    fn drop(&mut self) {
        self.tasks.abort_all();
    }
}
