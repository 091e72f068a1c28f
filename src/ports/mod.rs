//! Collaborator interfaces: presentation and audio feedback.
//!
//! The core never talks to widgets or audio devices. It holds a `Presenter`
//! and a `Notifier`, both injected at construction, and emits one-way
//! notifications to them. Neither collaborator holds game state; they only
//! see the values passed in each callback.
//!
//! Both traits run on the single game timeline, so implementations may be
//! plain `Rc<RefCell<_>>` handles shared with the driver; blanket impls
//! below cover that wiring.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::{ButtonId, RenderableHandle};

/// Renders sequence playback and reflects score/turn state to the user.
///
/// `resolve` is the injected lookup capability: it maps a button index to
/// whatever the renderer can actually light up. When it returns `None` the
/// core skips the highlight calls for that index (and logs it) but keeps
/// the playback cadence and audio notifications intact.
pub trait Presenter {
    /// Map a button index to a renderable, if one is bound.
    fn resolve(&self, button: ButtonId) -> Option<RenderableHandle>;

    /// Light up a button during playback.
    fn highlight_button(&mut self, button: ButtonId);

    /// Return a button to its resting appearance.
    fn unhighlight_button(&mut self, button: ButtonId);

    /// The player replayed the full sequence; `score` is the new total.
    fn round_completed(&mut self, score: u32);

    /// A wrong guess ended the game.
    fn game_over(&mut self, final_score: u32);

    /// The displayed score must update.
    fn score_changed(&mut self, score: u32);
}

/// Plays feedback cues keyed by abstract event types.
pub trait Notifier {
    /// A button lit up during playback.
    fn button_highlighted(&mut self, button: ButtonId);

    /// The player pressed a button during their turn.
    fn button_clicked(&mut self, button: ButtonId);

    /// The last guess matched the sequence.
    fn guess_correct(&mut self);

    /// The last guess did not match the sequence.
    fn guess_wrong(&mut self);

    /// The game reached its terminal state.
    fn game_ended(&mut self);
}

/// Presenter that renders nothing. Resolves every index so playback events
/// still flow to anything observing the game.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn resolve(&self, button: ButtonId) -> Option<RenderableHandle> {
        Some(RenderableHandle::new(u32::from(button.0)))
    }

    fn highlight_button(&mut self, _button: ButtonId) {}
    fn unhighlight_button(&mut self, _button: ButtonId) {}
    fn round_completed(&mut self, _score: u32) {}
    fn game_over(&mut self, _final_score: u32) {}
    fn score_changed(&mut self, _score: u32) {}
}

/// Notifier that plays nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn button_highlighted(&mut self, _button: ButtonId) {}
    fn button_clicked(&mut self, _button: ButtonId) {}
    fn guess_correct(&mut self) {}
    fn guess_wrong(&mut self) {}
    fn game_ended(&mut self) {}
}

impl<P: Presenter> Presenter for Rc<RefCell<P>> {
    fn resolve(&self, button: ButtonId) -> Option<RenderableHandle> {
        self.borrow().resolve(button)
    }

    fn highlight_button(&mut self, button: ButtonId) {
        self.borrow_mut().highlight_button(button);
    }

    fn unhighlight_button(&mut self, button: ButtonId) {
        self.borrow_mut().unhighlight_button(button);
    }

    fn round_completed(&mut self, score: u32) {
        self.borrow_mut().round_completed(score);
    }

    fn game_over(&mut self, final_score: u32) {
        self.borrow_mut().game_over(final_score);
    }

    fn score_changed(&mut self, score: u32) {
        self.borrow_mut().score_changed(score);
    }
}

impl<N: Notifier> Notifier for Rc<RefCell<N>> {
    fn button_highlighted(&mut self, button: ButtonId) {
        self.borrow_mut().button_highlighted(button);
    }

    fn button_clicked(&mut self, button: ButtonId) {
        self.borrow_mut().button_clicked(button);
    }

    fn guess_correct(&mut self) {
        self.borrow_mut().guess_correct();
    }

    fn guess_wrong(&mut self) {
        self.borrow_mut().guess_wrong();
    }

    fn game_ended(&mut self) {
        self.borrow_mut().game_ended();
    }
}
