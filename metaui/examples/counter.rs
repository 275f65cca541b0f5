//! Counter example - state lives in the handler, the tree is updated
//! through queued commands

use metaui::prelude::*;

fn main() -> metaui::Result<()> {
    let mut app = App::new(AppConfig::window("Counter", 300, 200));

    let root = app.set_root(BoxLayout::column().spacing(16.0).padding(24.0));
    let tree = app.tree_mut();
    let label = tree.add_child(root, Text::new("Count: 0").font_size(32.0).bold(true))?;
    let row = tree.add_child(root, BoxLayout::row().spacing(12.0))?;
    let dec = tree.add_child(row, Button::new("-"))?;
    let inc = tree.add_child(row, Button::new("+"))?;

    let mut count = 0i32;
    app.run(move |msg, commands| {
        if msg.kind != MessageKind::Clicked {
            return;
        }
        if msg.source == inc {
            count += 1;
        } else if msg.source == dec {
            count -= 1;
        } else {
            return;
        }
        let text = format!("Count: {count}");
        commands.update::<Text>(label, move |t| t.set_text(text));
    })
}
