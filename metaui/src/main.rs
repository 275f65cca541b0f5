//! MetaUI demo: a welcome column with buttons, a checkbox, a slider and a
//! progress bar. Run with `RUST_LOG=metaui=debug` to watch focus and tree
//! changes.

use metaui::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> metaui::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,wgpu_core=warn,wgpu_hal=warn,naga=warn")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::window("MetaUI Simple Test", 500, 400),
    };
    let mut app = App::new(config);
    let theme = app.theme().clone();

    let root = app.set_root(
        BoxLayout::column()
            .spacing(15.0)
            .padding(30.0)
            .background(theme.background),
    );
    let tree = app.tree_mut();

    tree.add_child(root, Text::new("Welcome to MetaUI!").font_size(28.0).color(theme.text).bold(true))?;
    tree.add_child(root, Text::new("A retained-mode widget toolkit").font_size(14.0).color(theme.text_muted))?;
    tree.add_child(root, Divider::new())?;
    tree.add_child(root, Spacer::new(10.0))?;
    tree.add_child(root, Text::new("This is a basic test of the MetaUI framework.").font_size(12.0).color(theme.text))?;

    let buttons = tree.add_child(root, BoxLayout::row().spacing(10.0).align(Alignment::Center))?;
    let click_me = tree.add_child(buttons, Button::new("Click Me").background(theme.primary))?;
    let exit = tree.add_child(buttons, Button::new("Exit").background(theme.error))?;

    tree.add_child(root, Spacer::new(10.0))?;

    let check_row = tree.add_child(root, BoxLayout::row().spacing(10.0))?;
    let checkbox = tree.add_child(check_row, Checkbox::new(false))?;
    tree.add_child(check_row, Text::new("Enable feature").font_size(12.0).color(theme.text))?;

    tree.add_child(root, Spacer::new(5.0))?;
    tree.add_child(root, Text::new("Volume:").font_size(12.0).color(theme.text_muted))?;
    let slider = tree.add_child(root, Slider::new(0.0, 100.0, 50.0).fill_color(theme.primary))?;

    tree.add_child(root, Spacer::new(5.0))?;
    tree.add_child(root, Text::new("Progress:").font_size(12.0).color(theme.text_muted))?;
    let progress = tree.add_child(root, ProgressBar::new(0.65).fill_color(theme.success))?;

    app.run(move |msg, commands| match &msg.kind {
        MessageKind::Clicked if msg.source == click_me => tracing::info!("button 1 clicked"),
        MessageKind::Clicked if msg.source == exit => {
            tracing::info!("exit clicked, quitting");
            commands.quit();
        }
        MessageKind::Toggled(checked) if msg.source == checkbox => {
            tracing::info!(checked, "checkbox toggled");
        }
        MessageKind::ValueChanged(value) if msg.source == slider => {
            let value = *value;
            tracing::info!(value = value as i32, "slider moved");
            commands.update::<ProgressBar>(progress, move |bar| bar.set_progress(value / 100.0));
        }
        _ => {}
    })
}
