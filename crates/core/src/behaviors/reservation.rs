//! Reservation form: client-side validation and a simulated round trip.
//!
//! ```text
//! Idle --submit--> Submitting --invalid--> Failed     (immediately)
//!                             --valid----> Succeeded  (after the latency)
//! ```
//!
//! `Failed` keeps the entered values for correction; `Succeeded` clears the
//! form. Either way the form accepts the next submit.

use std::cell::Cell;
use std::rc::Rc;

use tracing::{debug, info};

use crate::config::SiteConfig;
use crate::error::{SiteError, ValidationError};
use crate::host::{Dom, EventKind, Host, ScrollAlign, UiEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Phone,
    Date,
    Time,
    Guests,
    SpecialRequests,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Name,
        Field::Phone,
        Field::Date,
        Field::Time,
        Field::Guests,
        Field::SpecialRequests,
    ];

    /// Element id of the field inside the form.
    pub fn id(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Phone => "phone",
            Field::Date => "date",
            Field::Time => "time",
            Field::Guests => "guests",
            Field::SpecialRequests => "special-requests",
        }
    }

    pub fn is_required(self) -> bool {
        matches!(self, Field::Name | Field::Phone | Field::Date | Field::Time)
    }
}

/// Field values read at submit time. Never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationDraft {
    pub name: String,
    pub phone: String,
    pub date: String,
    pub time: String,
    pub guests: String,
    pub requests: String,
}

impl ReservationDraft {
    /// Reads every field from `form`. Absent fields read as empty.
    pub fn read<D: Dom>(host: &D, form: &D::Element) -> Self {
        let read = |field: Field| {
            host.query_within(form, &format!("#{}", field.id()))
                .map(|el| host.value(&el))
                .unwrap_or_default()
        };
        Self {
            name: read(Field::Name),
            phone: read(Field::Phone),
            date: read(Field::Date),
            time: read(Field::Time),
            guests: read(Field::Guests),
            requests: read(Field::SpecialRequests),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Phone => &self.phone,
            Field::Date => &self.date,
            Field::Time => &self.time,
            Field::Guests => &self.guests,
            Field::SpecialRequests => &self.requests,
        }
    }

    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| f.is_required() && self.get(*f).is_empty())
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields(missing))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

pub struct ReservationForm<H: Host> {
    host: H,
    form: H::Element,
    submit: Option<H::Element>,
    success: Option<H::Element>,
    error: Option<H::Element>,
    config: Rc<SiteConfig>,
    state: Cell<SubmissionState>,
    /// Accepted submissions whose simulated round trip has not finished.
    in_flight: Cell<usize>,
}

pub fn setup<H: Host>(
    host: &H,
    config: &Rc<SiteConfig>,
) -> Result<Rc<ReservationForm<H>>, SiteError> {
    let id = &config.ids.reservation_form;
    let form = host
        .element_by_id(id)
        .ok_or_else(|| SiteError::missing(format!("#{id}")))?;
    let handler = ReservationForm::new(host, form, Rc::clone(config));
    handler.wire();
    Ok(handler)
}

impl<H: Host> ReservationForm<H> {
    pub fn new(host: &H, form: H::Element, config: Rc<SiteConfig>) -> Rc<Self> {
        let submit = host.query_within(&form, &config.selectors.submit_button);
        let success = host.element_by_id(&config.ids.success_message);
        let error = host.element_by_id(&config.ids.error_message);
        Rc::new(Self {
            host: host.clone(),
            form,
            submit,
            success,
            error,
            config,
            state: Cell::new(SubmissionState::Idle),
            in_flight: Cell::new(0),
        })
    }

    /// Stays `Submitting` until every accepted submission has completed, even
    /// when an earlier one already showed the success message.
    pub fn state(&self) -> SubmissionState {
        self.state.get()
    }

    /// Intercepts native submission. The listener keeps the handler alive for
    /// the life of the page.
    pub fn wire(self: &Rc<Self>) {
        let this = Rc::clone(self);
        self.host.listen(
            &self.form,
            EventKind::Submit,
            Box::new(move |event| {
                event.prevent_default();
                this.handle_submit();
            }),
        );
    }

    pub fn handle_submit(self: &Rc<Self>) {
        let guard = self.config.guard_overlapping_submissions;
        if guard && self.state() == SubmissionState::Submitting {
            debug!("reservation already pending, submit ignored");
            return;
        }

        let original_label = self.submit.as_ref().map(|b| self.host.text(b));
        if let Some(button) = &self.submit {
            self.host.set_text(button, &self.config.texts.submitting_label);
            self.host.add_class(button, &self.config.classes.loading);
        }
        self.state.set(SubmissionState::Submitting);
        self.hide_messages();

        let draft = ReservationDraft::read(&self.host, &self.form);
        if let Err(err) = draft.validate() {
            debug!(%err, "reservation rejected");
            self.show(self.error.as_ref());
            self.restore_button(original_label.as_deref());
            self.state.set(SubmissionState::Failed);
            return;
        }

        if guard {
            if let Some(button) = &self.submit {
                self.host.set_disabled(button, true);
            }
        }
        info!(
            date = %draft.date,
            time = %draft.time,
            guests = %draft.guests,
            "reservation submitted"
        );

        self.in_flight.set(self.in_flight.get() + 1);
        let this = Rc::clone(self);
        self.host.after(
            self.config.timing.submit_latency(),
            Box::new(move || this.complete(original_label)),
        );
    }

    fn complete(&self, original_label: Option<String>) {
        let remaining = self.in_flight.get().saturating_sub(1);
        self.in_flight.set(remaining);

        self.show(self.success.as_ref());
        self.host.reset_form(&self.form);
        self.restore_button(original_label.as_deref());
        if self.config.guard_overlapping_submissions {
            if let Some(button) = &self.submit {
                self.host.set_disabled(button, false);
            }
        }
        if let Some(success) = &self.success {
            self.host.scroll_into_view(success, ScrollAlign::Center);
        }
        if remaining == 0 {
            self.state.set(SubmissionState::Succeeded);
        }
        debug!(remaining, "reservation confirmed");
    }

    fn hide_messages(&self) {
        for el in [&self.success, &self.error].into_iter().flatten() {
            self.host.set_style(el, "display", "none");
        }
    }

    fn show(&self, el: Option<&H::Element>) {
        if let Some(el) = el {
            self.host.set_style(el, "display", "block");
        }
    }

    fn restore_button(&self, label: Option<&str>) {
        if let Some(button) = &self.submit {
            if let Some(label) = label {
                self.host.set_text(button, label);
            }
            self.host.remove_class(button, &self.config.classes.loading);
        }
    }
}
