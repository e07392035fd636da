use crate::error::ContactError;
use crate::rules::{Field, ValidationRules};
use folio_domain::config::ContactConfig;
use folio_domain::constants::{
    ARIA_LIVE, ARIA_LIVE_POLITE, FORM_STATUS, IS_INVALID, IS_VALID, SENDING, SHOW,
};
use folio_kernel::context::PageContext;
use folio_kernel::dom::{Document, NodeId};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

impl StatusKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// At least one rule failed; nothing was sent.
    Rejected,
    /// The simulated send completed and the form was reset.
    Sent,
    /// The page has no contact form.
    Ignored,
}

/// Validation and simulated submission of the contact form.
#[derive(Debug, Clone)]
pub struct ContactForm {
    ctx: PageContext,
    rules: Arc<ValidationRules>,
}

impl ContactForm {
    /// # Errors
    /// Fails when the configured email pattern does not compile.
    pub fn new(ctx: PageContext) -> Result<Self, ContactError> {
        let rules = ValidationRules::from_config(&ctx.config.contact)?;
        Ok(Self { ctx, rules: Arc::new(rules) })
    }

    fn settings(&self) -> &ContactConfig {
        &self.ctx.config.contact
    }

    #[must_use]
    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// The field whose input is `node`, if any.
    #[must_use]
    pub fn field_for(&self, node: NodeId) -> Option<Field> {
        let selectors = &self.ctx.config.selectors;
        let document = self.ctx.dom.read();
        Field::ALL.into_iter().find(|field| document.by_id(field.input_id(selectors)) == Some(node))
    }

    #[must_use]
    pub fn is_form(&self, node: NodeId) -> bool {
        self.ctx.dom.read().by_id(&self.ctx.config.selectors.form_id) == Some(node)
    }

    /// Runs one rule and updates the field markers and its error holder.
    pub fn validate(&self, field: Field) -> bool {
        let mut document = self.ctx.dom.write();
        self.validate_in(&mut document, field)
    }

    fn validate_in(&self, document: &mut Document, field: Field) -> bool {
        let selectors = &self.ctx.config.selectors;
        let input = document.by_id(field.input_id(selectors));
        let holder = document.by_id(field.error_id(selectors));
        let value = input.and_then(|n| document.value(n)).unwrap_or_default();

        let (valid, message) = match self.rules.check(field, value) {
            Ok(()) => (true, String::new()),
            Err(message) => (false, message.to_owned()),
        };

        if let Some(input) = input {
            document.toggle_class(input, IS_INVALID, !valid);
            document.toggle_class(input, IS_VALID, valid);
        }
        if let Some(holder) = holder {
            document.set_text(holder, message);
        }

        debug!(%field, valid, "Validated contact field");
        valid
    }

    /// Validates the field that lost focus. Returns `None` for nodes that are not form fields.
    pub fn on_blur(&self, node: NodeId) -> Option<bool> {
        self.field_for(node).map(|field| self.validate(field))
    }

    pub fn show_status(&self, kind: StatusKind, message: &str) {
        let mut document = self.ctx.dom.write();
        self.show_status_in(&mut document, kind, message);
    }

    fn show_status_in(&self, document: &mut Document, kind: StatusKind, message: &str) {
        let Some(status) = document.by_id(&self.ctx.config.selectors.status_id) else {
            return;
        };
        if let Some(element) = document.get_mut(status) {
            element.set_class_name(&format!("{FORM_STATUS} {SHOW} {}", kind.as_str()));
            element.set_text(message);
            element.set_attribute(ARIA_LIVE, ARIA_LIVE_POLITE);
        }
    }

    pub fn hide_status(&self) {
        let mut document = self.ctx.dom.write();
        let Some(status) = document.by_id(&self.ctx.config.selectors.status_id) else {
            return;
        };
        if let Some(element) = document.get_mut(status) {
            for class in [SHOW, StatusKind::Success.as_str(), StatusKind::Error.as_str()] {
                element.remove_class(class);
            }
            element.set_text("");
        }
    }

    /// Handles a submit: validates every field, then plays the sending sequence.
    pub async fn on_submit(&self) -> SubmitOutcome {
        let selectors = &self.ctx.config.selectors;
        let settings = self.settings();

        let Some(form) = self.ctx.dom.read().by_id(&selectors.form_id) else {
            return SubmitOutcome::Ignored;
        };

        self.hide_status();

        let (submit, label, original) = {
            let mut document = self.ctx.dom.write();
            let results = Field::ALL.map(|field| self.validate_in(&mut document, field));

            if results.contains(&false) {
                self.show_status_in(&mut document, StatusKind::Error, &settings.invalid_status);
                info!("Contact form rejected");
                return SubmitOutcome::Rejected;
            }

            let submit = document.by_id(&selectors.submit_id);
            let label = submit
                .and_then(|button| document.descendant_with_class(button, &selectors.submit_label_class));
            let original = label
                .and_then(|node| document.text(node))
                .map_or_else(|| settings.default_label.clone(), str::to_owned);

            if let Some(submit) = submit {
                document.add_class(submit, SENDING);
                if let Some(label) = label {
                    document.set_text(label, settings.sending_label.as_str());
                }
            }
            (submit, label, original)
        };

        debug!("Sending contact message");
        self.ctx.clock.sleep(settings.send_delay()).await;

        {
            let mut document = self.ctx.dom.write();
            if let Some(submit) = submit {
                document.remove_class(submit, SENDING);
                if let Some(label) = label {
                    document.set_text(label, settings.sent_label.as_str());
                }
            }
            self.show_status_in(&mut document, StatusKind::Success, &settings.success_status);

            document.reset_form(form);
            for field in Field::ALL {
                if let Some(input) = document.by_id(field.input_id(selectors)) {
                    document.remove_class(input, IS_VALID);
                    document.remove_class(input, IS_INVALID);
                }
            }
        }
        info!("Contact message sent");

        self.ctx.clock.sleep(settings.restore_delay()).await;

        if let Some(label) = label {
            self.ctx.dom.write().set_text(label, original);
        }
        SubmitOutcome::Sent
    }
}
