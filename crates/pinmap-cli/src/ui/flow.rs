//! New-pin submission flow.
//!
//! A click captures coordinates, a modal prompt asks for the name, then a form popup
//! anchored at the click collects the optional image and submits. The form owns its
//! submit action, so it can be submitted as soon as it exists.

use crossterm::event::{KeyCode, KeyEvent};
use pinmap_core::LatLng;
use std::mem;
use std::path::PathBuf;

use super::input::TextInput;

/// Inline error shown when the name is blank.
const NAME_REQUIRED: &str = "Name is required";

/// Field of the pin form holding keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Name text field
    Name,
    /// Image path field
    Image,
}

/// Modal name prompt for a clicked location.
#[derive(Clone)]
pub struct NamePrompt {
    /// Clicked location
    pub location: LatLng,
    /// Name being typed
    pub input: TextInput,
}

/// Form popup collecting the pin details.
#[derive(Clone)]
pub struct PinForm {
    /// Clicked location
    pub location: LatLng,
    /// Name field, pre-filled from the prompt
    pub name: TextInput,
    /// Optional path of an image file
    pub image_path: TextInput,
    /// Field with keyboard focus
    pub focus: FormField,
    /// Inline validation message
    pub error: Option<String>,
}

impl PinForm {
    fn new(location: LatLng, name: &str) -> Self {
        let mut image_path = TextInput::default();
        image_path.set_focused(false);
        Self {
            location,
            name: TextInput::with_value(name),
            image_path,
            focus: FormField::Name,
            error: None,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Name => FormField::Image,
            FormField::Image => FormField::Name,
        };
        self.name.set_focused(self.focus == FormField::Name);
        self.image_path.set_focused(self.focus == FormField::Image);
    }

    fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            FormField::Name => &mut self.name,
            FormField::Image => &mut self.image_path,
        }
    }

    /// Values to submit, or `None` when the name is blank.
    fn draft(&self) -> Option<PinDraft> {
        let name = self.name.value().trim();
        if name.is_empty() {
            return None;
        }
        let image_path = self.image_path.value().trim();
        Some(PinDraft {
            name: name.to_owned(),
            location: self.location,
            image_path: (!image_path.is_empty()).then(|| PathBuf::from(image_path)),
        })
    }
}

/// Values collected by the form, ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct PinDraft {
    /// Pin name
    pub name: String,
    /// Clicked location
    pub location: LatLng,
    /// Image file to attach
    pub image_path: Option<PathBuf>,
}

/// Outcome of feeding a key to the flow.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowAction {
    /// Nothing for the caller to do
    None,
    /// The user abandoned the flow
    Cancelled,
    /// The form was submitted with these values
    Submit(PinDraft),
}

/// Where the new-pin flow currently is.
#[derive(Default)]
pub enum SubmissionFlow {
    /// No flow in progress
    #[default]
    Idle,
    /// Waiting for the name
    NamePrompt(NamePrompt),
    /// Form popup open
    Form(PinForm),
    /// Form submitted, waiting for the server
    Submitting(PinForm),
}

impl SubmissionFlow {
    /// Starts a flow at `location`, replacing any flow in progress.
    pub fn begin(&mut self, location: LatLng) {
        *self = Self::NamePrompt(NamePrompt {
            location,
            input: TextInput::default(),
        });
    }

    /// Whether no flow is in progress.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Location the flow was started at.
    pub fn location(&self) -> Option<LatLng> {
        match self {
            Self::Idle => None,
            Self::NamePrompt(prompt) => Some(prompt.location),
            Self::Form(form) | Self::Submitting(form) => Some(form.location),
        }
    }

    /// Feeds a key press to the active step.
    pub fn handle_key(&mut self, key: &KeyEvent) -> FlowAction {
        match mem::take(self) {
            Self::Idle => FlowAction::None,
            Self::NamePrompt(prompt) => self.handle_prompt_key(prompt, key),
            Self::Form(form) => self.handle_form_key(form, key),
            submitting @ Self::Submitting(_) => {
                *self = submitting;
                FlowAction::None
            }
        }
    }

    fn handle_prompt_key(&mut self, mut prompt: NamePrompt, key: &KeyEvent) -> FlowAction {
        match key.code {
            KeyCode::Esc => FlowAction::Cancelled,
            KeyCode::Enter => {
                let name = prompt.input.value().trim().to_owned();
                if name.is_empty() {
                    return FlowAction::Cancelled;
                }
                *self = Self::Form(PinForm::new(prompt.location, &name));
                FlowAction::None
            }
            _ => {
                prompt.input.handle_key(key);
                *self = Self::NamePrompt(prompt);
                FlowAction::None
            }
        }
    }

    fn handle_form_key(&mut self, mut form: PinForm, key: &KeyEvent) -> FlowAction {
        match key.code {
            KeyCode::Esc => FlowAction::Cancelled,
            KeyCode::Tab | KeyCode::BackTab => {
                form.toggle_focus();
                *self = Self::Form(form);
                FlowAction::None
            }
            KeyCode::Enter => {
                if let Some(draft) = form.draft() {
                    form.error = None;
                    *self = Self::Submitting(form);
                    FlowAction::Submit(draft)
                } else {
                    form.error = Some(NAME_REQUIRED.to_owned());
                    *self = Self::Form(form);
                    FlowAction::None
                }
            }
            _ => {
                form.focused_input().handle_key(key);
                *self = Self::Form(form);
                FlowAction::None
            }
        }
    }

    /// Ends a submission: success closes the form, failure reopens it unchanged.
    pub fn finish_submission(&mut self, accepted: bool) {
        match mem::take(self) {
            Self::Submitting(form) if !accepted => *self = Self::Form(form),
            Self::Submitting(_) => {}
            other => {
                tracing::warn!("Submission finished while no submission was pending");
                *self = other;
            }
        }
    }
}
