//! Pin loading and submission running on background tasks

use pinmap_core::{ImageAttachment, NewPin};
use ratatui::backend::Backend;
use std::sync::Arc;
use tokio::sync::mpsc;

use super::tui_app::TuiApp;
use crate::ui::events::AppEvent;
use crate::ui::flow::PinDraft;
use crate::ui::state::{AlertKind, LOAD_FAILED, PIN_ADD_FAILED, PIN_ADDED};

fn send_event(sender: &mpsc::UnboundedSender<AppEvent>, event: AppEvent) {
    if sender.send(event).is_err() {
        tracing::debug!("UI closed before a background request finished");
    }
}

impl<B: Backend> TuiApp<B> {
    /// Requests the full pin list; the answer replaces the markers if still newest
    pub fn reload_pins(&mut self) {
        let generation = self.map.markers.next_generation();
        self.state.loading = true;
        let service = Arc::clone(&self.service);
        let sender = self.event_sender.clone();

        tracing::debug!("Loading pins (generation {generation})");
        tokio::spawn(async move {
            let result = service.list_pins().await;
            send_event(&sender, AppEvent::PinsLoaded { generation, result });
        });
    }

    /// Sends a new pin, reading its image first when one was given
    pub(super) fn spawn_submission(&mut self, draft: PinDraft) {
        let service = Arc::clone(&self.service);
        let sender = self.event_sender.clone();

        tracing::info!(
            "Submitting pin {:?} at ({}, {})",
            draft.name,
            draft.location.lat,
            draft.location.lng
        );
        tokio::spawn(async move {
            let image = match &draft.image_path {
                Some(path) => match ImageAttachment::from_path(path).await {
                    Ok(image) => Some(image),
                    Err(error) => {
                        send_event(&sender, AppEvent::PinSubmitted { result: Err(error) });
                        return;
                    }
                },
                None => None,
            };

            let result = service
                .add_pin(NewPin {
                    name: draft.name,
                    location: draft.location,
                    image,
                })
                .await;
            send_event(&sender, AppEvent::PinSubmitted { result });
        });
    }

    /// Applies the result of a background request to the UI
    pub(super) fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::PinsLoaded { generation, result } => match result {
                Ok(pins) => {
                    let received = pins.len();
                    if self.map.markers.apply(generation, pins) {
                        self.state.loading = false;
                        self.map.open_popup = None;
                        self.state
                            .set_status(format!("Loaded {} pins", self.map.markers.len()));
                        tracing::info!(
                            "Loaded {} pins ({received} received)",
                            self.map.markers.len()
                        );
                    }
                }
                Err(error) => {
                    if error.is_network() {
                        tracing::warn!("Pin server unreachable: {error}");
                    } else {
                        tracing::warn!("Failed to load pins: {error}");
                    }
                    if self.map.markers.is_current(generation) {
                        self.state.loading = false;
                        self.state.set_status(LOAD_FAILED);
                    }
                }
            },
            AppEvent::PinSubmitted { result } => match result {
                Ok(created) => {
                    if let Some(message) = created.and_then(|created| created.message) {
                        tracing::info!("Server confirmed new pin: {message}");
                    } else {
                        tracing::info!("Pin added");
                    }
                    self.flow.finish_submission(true);
                    self.reload_pins();
                    self.state.show_alert(AlertKind::Info, PIN_ADDED);
                }
                Err(error) => {
                    tracing::warn!("Failed to add pin: {error}");
                    self.flow.finish_submission(false);
                    self.state.show_alert(AlertKind::Error, PIN_ADD_FAILED);
                }
            },
        }
    }
}
