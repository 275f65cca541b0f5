//! Window management and event loop

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalPosition},
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, ModifiersState, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::app::App;
use crate::core::geometry::{Point, Size};
use crate::core::{
    Commands, InputEvent, Key, KeyEvent, Message, Modifiers, MouseButton, MouseEvent, ScrollEvent,
};
use crate::error::{Error, Result};
use crate::render::{Canvas, CosmicText, GpuRenderer};

/// Pixels per wheel unit when the platform reports pixel deltas
const PIXELS_PER_LINE: f32 = 20.0;

/// Open a window for `app` and run until it quits or the window closes.
/// `handler` receives every widget message and may queue commands.
pub fn run<F>(app: App, handler: F) -> Result<()>
where
    F: FnMut(&Message, &mut Commands) + 'static,
{
    app.root_id()?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut host = DesktopHost::new(app, handler);
    event_loop.run_app(&mut host)?;

    match host.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

impl App {
    /// Run on the desktop window host
    pub fn run<F>(self, handler: F) -> Result<()>
    where
        F: FnMut(&Message, &mut Commands) + 'static,
    {
        run(self, handler)
    }
}

/// Window and GPU state, created once the event loop resumes
struct WindowState {
    window: Arc<Window>,
    renderer: GpuRenderer,
}

struct DesktopHost<F> {
    app: App,
    handler: F,
    canvas: Canvas<CosmicText>,
    state: Option<WindowState>,
    cursor: Point,
    modifiers: Modifiers,
    error: Option<Error>,
}

impl<F> DesktopHost<F>
where
    F: FnMut(&Message, &mut Commands),
{
    fn new(app: App, handler: F) -> Self {
        let fallbacks = app.config().fonts.fallbacks.clone();
        let canvas = app.canvas(CosmicText::with_fallbacks(fallbacks));
        Self {
            app,
            handler,
            canvas,
            state: None,
            cursor: Point::ZERO,
            modifiers: Modifiers::default(),
            error: None,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowState> {
        let config = self.app.config().window.clone();
        let attrs = WindowAttributes::default()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(config.width, config.height))
            .with_resizable(config.resizable)
            .with_decorations(config.decorations);

        let window = Arc::new(event_loop.create_window(attrs)?);
        let mut renderer = pollster::block_on(GpuRenderer::new(window.clone()))?;
        renderer.clear_color = self.app.theme().background;

        let size = window.inner_size();
        self.app.dispatch(InputEvent::Resize(Size::new(size.width as f32, size.height as f32)));
        tracing::info!(title = %config.title, width = size.width, height = size.height, "window created");

        Ok(WindowState { window, renderer })
    }

    /// Route an input event, then hand the resulting messages to the handler
    fn input(&mut self, event: InputEvent, event_loop: &ActiveEventLoop) {
        self.app.dispatch(event);
        self.app.update(&mut self.handler);
        if !self.app.is_running() {
            event_loop.exit();
            return;
        }
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = &mut self.state else { return };

        self.canvas.begin_frame();
        self.app.frame(&mut self.canvas);
        if !self.app.is_running() {
            event_loop.exit();
            return;
        }

        match state.renderer.render(self.canvas.draw_list()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost) => {
                let size = state.renderer.size;
                state.renderer.resize(size);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                tracing::error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => tracing::warn!(error = ?e, "frame dropped"),
        }
    }

    fn mouse(&self, position: Point) -> MouseEvent {
        MouseEvent {
            position,
            delta: Point::ZERO,
            button: MouseButton::Left,
            pressed: false,
            modifiers: self.modifiers,
        }
    }
}

impl<F> ApplicationHandler for DesktopHost<F>
where
    F: FnMut(&Message, &mut Commands),
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match self.create_window(event_loop) {
            Ok(state) => self.state = Some(state),
            Err(e) => {
                tracing::error!(error = %e, "failed to start window");
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if self.state.is_none() {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.app.quit();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(state) = &mut self.state {
                    state.renderer.resize((size.width, size.height));
                }
                let size = Size::new(size.width as f32, size.height as f32);
                self.input(InputEvent::Resize(size), event_loop);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = map_modifiers(modifiers.state());
            }
            WindowEvent::CursorMoved { position, .. } => {
                let position = to_point(position);
                let mut event = self.mouse(position);
                event.delta = Point::new(position.x - self.cursor.x, position.y - self.cursor.y);
                self.cursor = position;
                self.input(InputEvent::MouseMove(event), event_loop);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = map_button(button) else { return };
                let mut event = self.mouse(self.cursor).with_button(button);
                event.pressed = state == ElementState::Pressed;
                self.input(InputEvent::MouseButton(event), event_loop);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let (delta_x, delta_y) = match delta {
                    MouseScrollDelta::LineDelta(x, y) => (x, y),
                    MouseScrollDelta::PixelDelta(p) => {
                        (p.x as f32 / PIXELS_PER_LINE, p.y as f32 / PIXELS_PER_LINE)
                    }
                };
                let event = ScrollEvent { position: self.cursor, delta_x, delta_y };
                self.input(InputEvent::Scroll(event), event_loop);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let pressed = event.state == ElementState::Pressed;
                let keycode = match event.physical_key {
                    PhysicalKey::Code(code) => evdev_code(code),
                    PhysicalKey::Unidentified(_) => 0,
                };
                let text = match &event.text {
                    Some(text) if pressed => text.to_string(),
                    _ => String::new(),
                };
                let key = KeyEvent {
                    keycode,
                    keysym: 0,
                    pressed,
                    modifiers: self.modifiers,
                    text,
                };
                self.input(InputEvent::Key(key), event_loop);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.app.is_running() {
            event_loop.exit();
        }
    }
}

fn to_point(position: PhysicalPosition<f64>) -> Point {
    Point::new(position.x as f32, position.y as f32)
}

fn map_button(button: winit::event::MouseButton) -> Option<MouseButton> {
    use winit::event::MouseButton as W;
    match button {
        W::Left => Some(MouseButton::Left),
        W::Right => Some(MouseButton::Right),
        W::Middle => Some(MouseButton::Middle),
        W::Back => Some(MouseButton::Back),
        W::Forward => Some(MouseButton::Forward),
        W::Other(_) => None,
    }
}

fn map_modifiers(state: ModifiersState) -> Modifiers {
    Modifiers {
        shift: state.shift_key(),
        ctrl: state.control_key(),
        alt: state.alt_key(),
        meta: state.super_key(),
    }
}

/// Linux evdev code for the keys the widgets understand; 0 for the rest
fn evdev_code(code: KeyCode) -> u32 {
    let key = match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Tab => Key::Tab,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        _ => Key::Unknown,
    };
    key.evdev_code()
}
