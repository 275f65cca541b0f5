//! Application host
//!
//! [`App`] owns the widget tree and drives it one frame at a time. Handlers
//! never touch the tree directly while events are in flight: they queue
//! [`Commands`] that are applied at the start of the next frame.

mod config;
#[cfg(feature = "desktop")]
mod window;

pub use config::*;
#[cfg(feature = "desktop")]
pub use window::*;

use crate::core::geometry::Size;
use crate::core::{Commands, InputEvent, Message, Theme, Widget, WidgetId, WidgetTree};
use crate::error::{Error, Result};
use crate::render::{Canvas, Renderer, TextBackend};

pub struct App {
    tree: WidgetTree,
    config: AppConfig,
    theme: Theme,
    viewport: Size,
    running: bool,
    pending: Commands,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let viewport = Size::new(config.window.width as f32, config.window.height as f32);
        Self {
            tree: WidgetTree::new(),
            theme: config.theme.theme(),
            config,
            viewport,
            running: true,
            pending: Commands::new(),
        }
    }

    pub fn root(mut self, widget: impl Widget) -> Self {
        self.tree.set_root(widget);
        self
    }

    pub fn set_root(&mut self, widget: impl Widget) -> WidgetId {
        self.tree.set_root(widget)
    }

    pub fn root_id(&self) -> Result<WidgetId> {
        self.tree.root().ok_or(Error::NoRoot)
    }

    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Recording canvas that honors the configured default font family
    pub fn canvas<T: TextBackend>(&self, text: T) -> Canvas<T> {
        Canvas::new(text).default_family(self.config.fonts.family.clone())
    }

    /// Commands applied at the start of the next frame
    pub fn commands(&mut self) -> &mut Commands {
        &mut self.pending
    }

    /// Apply queued commands, then measure, lay out and paint the tree at
    /// the current viewport size
    pub fn frame(&mut self, renderer: &mut dyn Renderer) {
        if !self.pending.is_empty() && self.tree.apply(&mut self.pending) {
            self.quit();
        }
        self.tree.frame(self.viewport, renderer);
    }

    /// Route one input event. Returns true when a widget consumed it.
    pub fn dispatch(&mut self, event: InputEvent) -> bool {
        if let InputEvent::Resize(size) = event {
            self.viewport = size.non_negative();
            tracing::debug!(width = self.viewport.width, height = self.viewport.height, "viewport resized");
            return false;
        }
        self.tree.dispatch(&event)
    }

    /// Hand every pending message to `handler`, which may queue commands.
    /// Returns how many messages were delivered.
    pub fn update<F>(&mut self, mut handler: F) -> usize
    where
        F: FnMut(&Message, &mut Commands),
    {
        let messages = self.tree.drain_messages();
        for message in &messages {
            handler(message, &mut self.pending);
        }
        messages.len()
    }

    /// Stop after the current iteration. Nothing in flight is interrupted.
    pub fn quit(&mut self) {
        if self.running {
            tracing::info!("quit requested");
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Point;
    use crate::core::{MessageKind, MouseEvent};
    use crate::render::{ApproxText, Canvas, Primitive};
    use crate::widgets::{BoxLayout, Button, Text};

    fn counter_app() -> (App, WidgetId, WidgetId) {
        let mut app = App::new(AppConfig::window("test", 300, 200));
        let root = app.set_root(BoxLayout::column());
        let label = app.tree_mut().add_child(root, Text::new("0")).unwrap();
        let button = app.tree_mut().add_child(root, Button::new("+")).unwrap();
        (app, label, button)
    }

    #[test]
    fn test_configured_font_family_applies_to_new_text() {
        let config = AppConfig::from_json(r#"{"fonts": {"family": "Inter"}}"#).unwrap();
        let mut app = App::new(config).root(Text::new("hello"));
        let mut canvas = app.canvas(ApproxText);
        app.frame(&mut canvas);
        let font = canvas.draw_list().primitives.iter().find_map(|p| match p {
            Primitive::Text { font, .. } => Some(*font),
            _ => None,
        });
        assert_eq!(font.and_then(|f| canvas.font_family(f)), Some("Inter"));
    }

    #[test]
    fn test_root_required() {
        let app = App::default();
        assert!(matches!(app.root_id(), Err(Error::NoRoot)));
        assert_eq!(app.viewport(), Size::new(800.0, 600.0));
    }

    #[test]
    fn test_click_updates_label_on_next_frame() {
        let (mut app, label, button) = counter_app();
        let mut canvas = Canvas::new(ApproxText);
        app.frame(&mut canvas);

        let center = app.tree().base(button).unwrap().bounds().center();
        assert!(app.dispatch(InputEvent::MouseButton(MouseEvent::press(center))));

        let delivered = app.update(|msg, commands| {
            if msg.source == button && msg.kind == MessageKind::Clicked {
                commands.update::<Text>(label, |t| t.set_text("1"));
            }
        });
        assert!(delivered >= 1);
        assert_eq!(app.tree().get::<Text>(label).unwrap().text(), "0");

        canvas.begin_frame();
        app.frame(&mut canvas);
        assert_eq!(app.tree().get::<Text>(label).unwrap().text(), "1");
        assert!(canvas.draw_list().texts().any(|t| t == "1"));
    }

    #[test]
    fn test_quit_command_stops_loop() {
        let (mut app, _, _) = counter_app();
        app.commands().quit();
        assert!(app.is_running());
        app.frame(&mut Canvas::new(ApproxText));
        assert!(!app.is_running());
    }

    #[test]
    fn test_resize_updates_viewport() {
        let (mut app, _, _) = counter_app();
        assert!(!app.dispatch(InputEvent::Resize(Size::new(640.0, -5.0))));
        assert_eq!(app.viewport(), Size::new(640.0, 0.0));

        app.frame(&mut Canvas::new(ApproxText));
        let root = app.root_id().unwrap();
        assert_eq!(app.tree().base(root).unwrap().bounds().width, 640.0);
    }

    #[test]
    fn test_unconsumed_move_outside() {
        let (mut app, _, _) = counter_app();
        app.frame(&mut Canvas::new(ApproxText));
        assert!(!app.dispatch(InputEvent::MouseMove(MouseEvent::moved(Point::new(-10.0, -10.0)))));
    }
}
