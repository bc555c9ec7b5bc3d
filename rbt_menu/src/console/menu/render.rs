use super::{Menu, MenuResult, MessageType};
use rbt_core::RBTree;
use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};
use std::io::{BufRead, Write};

const RULE: &str = "-------------------------------";

const ITEMS: [&str; 12] = [
    "1. Create tree",
    "2. Print tree",
    "3. Destroy tree",
    "4. Delete key",
    "5. Insert key",
    "6. Insert random keys",
    "7. Search key",
    "8. Pre-order traversal",
    "9. In-order traversal",
    "10. Post-order traversal",
    "11. Min and max",
    "0. Quit",
];

impl<R: BufRead, W: Write> Menu<R, W> {
    pub(crate) fn draw_menu(&mut self) -> MenuResult<()> {
        if self.config.menu.clear_screen {
            queue!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }

        writeln!(self.output, "{}", RULE)?;
        for item in ITEMS {
            writeln!(self.output, ">>> {}", item)?;
        }
        writeln!(self.output, "{}", RULE)?;

        match &self.tree {
            Some(tree) if self.config.menu.show_inorder => {
                let keys = join_keys(&tree.inorder());
                writeln!(
                    self.output,
                    "Tree ({} keys, height {}): {}",
                    tree.len(),
                    tree.height(),
                    keys
                )?;
            }
            Some(_) => {}
            None => writeln!(self.output, "No tree exists")?,
        }

        writeln!(self.output, "{}", RULE)?;
        write!(self.output, "Choose an option: ")?;
        Ok(())
    }

    pub(crate) fn set_message(&mut self, message: String, message_type: MessageType) -> MenuResult<()> {
        let text = match message_type {
            MessageType::Info => message,
            MessageType::Success => self.theme.paint(message, self.theme.success()),
            MessageType::Warning => self.theme.paint(message, self.theme.warning()),
            MessageType::Error => self.theme.paint(message, self.theme.error()),
        };
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Structure dump with keys painted by node color
    pub(crate) fn draw_tree(&mut self, tree: &RBTree) -> MenuResult<()> {
        if tree.is_empty() {
            writeln!(self.output, "Tree is empty")?;
            return Ok(());
        }

        let style = self.config.ui.dump_style;

        for row in tree.rows(style) {
            let indent = row.indent(style, self.config.ui.indent_width);
            let label = self.theme.paint(row.label(style), self.theme.node(row.color));
            writeln!(self.output, "{}{}", indent, label)?;
        }
        Ok(())
    }
}

pub(crate) fn join_keys(keys: &[i32]) -> String {
    keys.iter()
        .map(|key| key.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
