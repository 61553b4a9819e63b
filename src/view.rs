// SPDX-License-Identifier: MPL-2.0
//! Renderer seam between the event model and the drawing layer.
//!
//! The crate never draws anything. It resolves each event variant into a
//! [`SnackbarViewModel`] describing what the bar should show right now;
//! the embedding UI turns that into real widgets. Supplying a custom
//! [`SnackbarRenderer`] overrides the mapping.

use crate::event::{Icon, SnackbarEvent};

/// Display state of the trailing loading indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorState {
    /// Indeterminate spinner.
    Spinner,
    /// Determinate spinner at `fraction` of a full turn, in `[0, 1]`.
    Determinate { fraction: f32 },
    /// The work finished; show the done mark.
    Done,
}

/// The control rendered at the trailing edge of the bar.
#[derive(Debug, Clone, PartialEq)]
pub enum TrailingControl {
    /// Close button wired to `dismiss()`.
    DismissButton,
    /// Action button wired to `perform_action()`, drawn with `icon`.
    ActionButton { icon: Icon },
    /// Progress indicator; not interactive.
    Indicator(IndicatorState),
}

/// Everything the drawing layer needs for one frame of a snackbar.
#[derive(Debug, Clone, PartialEq)]
pub struct SnackbarViewModel {
    /// Headline text.
    pub text: String,
    /// Optional second line under the headline.
    pub body: Option<String>,
    /// Leading icon.
    pub icon: Icon,
    /// Trailing control.
    pub trailing: TrailingControl,
}

/// Maps events to view models.
///
/// Implementations must be cheap; the mapping runs on every observable
/// change while a snackbar is visible.
pub trait SnackbarRenderer: Send + Sync {
    /// Resolves the current view model for `event`.
    fn view_model(&self, event: &SnackbarEvent) -> SnackbarViewModel;
}

/// The built-in mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRenderer;

impl SnackbarRenderer for DefaultRenderer {
    fn view_model(&self, event: &SnackbarEvent) -> SnackbarViewModel {
        match event {
            SnackbarEvent::Message { text, icon, .. } => SnackbarViewModel {
                text: text.clone(),
                body: None,
                icon: icon.clone(),
                trailing: TrailingControl::DismissButton,
            },
            SnackbarEvent::Loading {
                text,
                icon,
                is_loading,
                ..
            } => SnackbarViewModel {
                text: text.clone(),
                body: None,
                icon: icon.clone(),
                trailing: TrailingControl::Indicator(if is_loading.get() {
                    IndicatorState::Spinner
                } else {
                    IndicatorState::Done
                }),
            },
            SnackbarEvent::Action {
                text,
                icon,
                action_icon,
                ..
            } => SnackbarViewModel {
                text: text.clone(),
                body: None,
                icon: icon.clone(),
                trailing: TrailingControl::ActionButton {
                    icon: action_icon.clone(),
                },
            },
            SnackbarEvent::Progress {
                text, body, icon, ..
            } => {
                // Loading state is derived from the (clamped) fraction.
                let fraction = event.percentage().unwrap_or(1.0);
                SnackbarViewModel {
                    text: text.clone(),
                    body: Some(body.get()),
                    icon: icon.clone(),
                    trailing: TrailingControl::Indicator(if fraction < 1.0 {
                        IndicatorState::Determinate { fraction }
                    } else {
                        IndicatorState::Done
                    }),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::SnackbarDuration;
    use crate::observable::Observable;

    fn render(event: &SnackbarEvent) -> SnackbarViewModel {
        DefaultRenderer.view_model(event)
    }

    #[test]
    fn message_gets_a_dismiss_button() {
        let event = SnackbarEvent::message("saved", Icon::new("check"), SnackbarDuration::Short);
        let view = render(&event);

        assert_eq!(view.text, "saved");
        assert_eq!(view.body, None);
        assert_eq!(view.trailing, TrailingControl::DismissButton);
    }

    #[test]
    fn action_gets_its_action_icon() {
        let event = SnackbarEvent::action("undo delete", Icon::new("trash"), Icon::new("undo"), || {});
        let view = render(&event);

        assert_eq!(
            view.trailing,
            TrailingControl::ActionButton {
                icon: Icon::new("undo")
            }
        );
    }

    #[test]
    fn loading_spinner_turns_into_done_mark() {
        let is_loading = Observable::new(true);
        let event = SnackbarEvent::loading("copying", Icon::new("copy"), is_loading.clone());

        assert_eq!(
            render(&event).trailing,
            TrailingControl::Indicator(IndicatorState::Spinner)
        );

        is_loading.set(false);
        assert_eq!(
            render(&event).trailing,
            TrailingControl::Indicator(IndicatorState::Done)
        );
    }

    #[test]
    fn progress_tracks_fraction_and_body() {
        let body = Observable::new(String::from("12 of 40 files"));
        let percentage = Observable::new(0.3f32);
        let event = SnackbarEvent::progress(
            "downloading",
            body.clone(),
            Icon::new("download"),
            percentage.clone(),
        );

        let view = render(&event);
        assert_eq!(view.body.as_deref(), Some("12 of 40 files"));
        assert_eq!(
            view.trailing,
            TrailingControl::Indicator(IndicatorState::Determinate { fraction: 0.3 })
        );

        body.set(String::from("40 of 40 files"));
        percentage.set(1.0);
        let view = render(&event);
        assert_eq!(view.body.as_deref(), Some("40 of 40 files"));
        assert_eq!(
            view.trailing,
            TrailingControl::Indicator(IndicatorState::Done)
        );
    }

    #[test]
    fn progress_fraction_is_clamped_in_the_view() {
        let event = SnackbarEvent::progress(
            "downloading",
            Observable::new(String::new()),
            Icon::new("download"),
            Observable::new(7.5),
        );

        assert_eq!(
            render(&event).trailing,
            TrailingControl::Indicator(IndicatorState::Done)
        );
    }
}
