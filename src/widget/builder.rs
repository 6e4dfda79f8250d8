//! Builder object which constructs [`SoftKeyboard`]s
//!
//! [`SoftKeyboard`]: crate::widget::SoftKeyboard

use ::std::rc::Rc;
use ::tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use ::tracing::debug;

use crate::{
    input::sink::RenderView,
    widget::{
        filter::NumericLocale,
        session::KeyboardSession,
        soft_keyboard::SoftKeyboard,
        surface::{ImeOptions, TextInputSurface},
        watcher::{SyncEvent, TextChangeForwarder},
    },
};

/// A builder pattern object which simplifies the process of creating a
/// [`SoftKeyboard`].
///
/// The same builder can be re-used to set up multiple widgets with the same
/// configuration, as a type of prototype.
///
/// ```no_run
/// use ::imebridge::widget::{Builder, HeadlessSurface, ImeAction, ImeOptions};
/// # use ::imebridge::input::{keyboard::KeyEvent, sink::{InputSink, RenderView}};
/// # struct View;
/// # impl InputSink for View {
/// #     fn on_key_down(&mut self, _: &KeyEvent) -> bool { false }
/// #     fn on_key_up(&mut self, _: &KeyEvent) -> bool { false }
/// #     fn has_hardware_keyboard(&self) -> bool { false }
/// # }
/// # impl RenderView for View { fn request_focus(&mut self) {} }
///
/// let (keyboard, mut sync_events) = Builder::new()
///     .with_ime_options(ImeOptions {
///         action: ImeAction::Go,
///         no_extract_ui: true,
///     })
///     .build(HeadlessSurface::new(), View);
/// ```
///
/// [`SoftKeyboard`]: crate::widget::SoftKeyboard
#[derive(Clone, Debug, Default)]
pub struct Builder {
    ime_options: ImeOptions,
    numeric_locale: Option<NumericLocale>,
}

impl Builder {
    /// Construct a new builder. Default values will be used for all properties
    /// until explicitly set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the options passed to the input method.
    ///
    /// Defaults to the done action, without the full screen extracted text UI.
    pub fn with_ime_options(self, ime_options: ImeOptions) -> Self {
        Self { ime_options, ..self }
    }

    /// Set the separators accepted by the decimal number keyboard.
    ///
    /// Defaults to a fixed set of digits, separators, sign and space which
    /// covers the common locales.
    pub fn with_numeric_locale(self, numeric_locale: NumericLocale) -> Self {
        Self {
            numeric_locale: Some(numeric_locale),
            ..self
        }
    }

    /// Gets the currently set IME options.
    pub fn ime_options(&self) -> ImeOptions {
        self.ime_options
    }

    /// Gets the currently set numeric locale.
    pub fn numeric_locale(&self) -> Option<&NumericLocale> {
        self.numeric_locale.as_ref()
    }

    /// Set up `surface` as the engine's text input widget and build a new
    /// [`SoftKeyboard`] around it.
    ///
    /// Input focus starts out on `view`. Edits the user makes during a soft
    /// keyboard session are delivered on the returned receiver.
    ///
    /// [`SoftKeyboard`]: crate::widget::SoftKeyboard
    pub fn build<S, V>(
        &self,
        mut surface: S,
        mut view: V,
    ) -> (SoftKeyboard<S, V>, UnboundedReceiver<SyncEvent>)
    where
        S: TextInputSurface,
        V: RenderView,
    {
        debug!(ime_options = self.ime_options.bits(), "Building soft keyboard");

        surface.set_ime_options(self.ime_options);
        view.request_focus();

        let (tx, rx) = unbounded_channel();
        let forwarder = Rc::new(TextChangeForwarder::new(tx));
        let session = KeyboardSession::new(forwarder, self.numeric_locale.clone());

        (SoftKeyboard::new(surface, view, session), rx)
    }
}
