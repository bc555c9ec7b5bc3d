use super::render::join_keys;
use super::{Menu, MenuResult, MessageType};
use rand::Rng;
use rbt_config::MAX_RANDOM_COUNT;
use rbt_core::{RBTree, TreeError};
use std::io::{BufRead, Write};
use std::time::Instant;
use tracing::{debug, info};

/// Menu entries by number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Create,
    Print,
    Destroy,
    Delete,
    Insert,
    InsertRandom,
    Search,
    Preorder,
    Inorder,
    Postorder,
    MinMax,
    Quit,
}

impl Command {
    pub fn from_choice(choice: i32) -> Option<Self> {
        let command = match choice {
            1 => Command::Create,
            2 => Command::Print,
            3 => Command::Destroy,
            4 => Command::Delete,
            5 => Command::Insert,
            6 => Command::InsertRandom,
            7 => Command::Search,
            8 => Command::Preorder,
            9 => Command::Inorder,
            10 => Command::Postorder,
            11 => Command::MinMax,
            0 => Command::Quit,
            _ => return None,
        };
        Some(command)
    }

    fn changes_tree(self) -> bool {
        matches!(self, Command::Delete | Command::Insert | Command::InsertRandom)
    }
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub(crate) fn execute(&mut self, command: Command) -> MenuResult<()> {
        debug!(?command, "executing command");

        match command {
            Command::Create => {
                self.tree = Some(RBTree::new());
                info!("tree created");
                self.set_message("Created an empty tree".to_string(), MessageType::Success)
            }
            Command::Destroy => {
                if self.tree.take().is_none() {
                    return self.missing_tree();
                }
                info!("tree destroyed");
                self.set_message("Tree destroyed".to_string(), MessageType::Success)
            }
            Command::Quit => {
                self.running = false;
                self.set_message("Goodbye!".to_string(), MessageType::Info)
            }
            _ => {
                let Some(mut tree) = self.tree.take() else {
                    return self.missing_tree();
                };
                let result = if command.changes_tree() {
                    self.modify(command, &mut tree)
                } else {
                    self.query(command, &tree)
                };
                self.tree = Some(tree);
                result
            }
        }
    }

    fn missing_tree(&mut self) -> MenuResult<()> {
        self.set_message(
            "No tree exists, create one first (option 1)".to_string(),
            MessageType::Warning,
        )
    }

    fn modify(&mut self, command: Command, tree: &mut RBTree) -> MenuResult<()> {
        match command {
            Command::Delete => {
                let Some(key) = self.prompt_integer("Key to delete: ", None)? else {
                    return Ok(());
                };
                let started = Instant::now();
                let result = tree.delete(key);
                self.report(result, format!("Deleted {}", key), started)
            }
            Command::Insert => {
                let Some(key) = self.prompt_integer("Key to insert: ", None)? else {
                    return Ok(());
                };
                let started = Instant::now();
                let result = tree.insert(key);
                self.report(result, format!("Inserted {}", key), started)
            }
            Command::InsertRandom => self.insert_random(tree),
            _ => self.query(command, tree),
        }
    }

    fn query(&mut self, command: Command, tree: &RBTree) -> MenuResult<()> {
        match command {
            Command::Print => self.draw_tree(tree),
            Command::Search => {
                let Some(key) = self.prompt_integer("Key to search: ", None)? else {
                    return Ok(());
                };
                if tree.contains(key) {
                    self.set_message(format!("Key {} is in the tree", key), MessageType::Success)
                } else {
                    self.set_message(format!("Key {} is not in the tree", key), MessageType::Warning)
                }
            }
            Command::Preorder => {
                let keys = join_keys(&tree.preorder());
                self.set_message(format!("Pre-order: {}", keys), MessageType::Info)
            }
            Command::Inorder => {
                let keys = join_keys(&tree.inorder());
                self.set_message(format!("In-order: {}", keys), MessageType::Info)
            }
            Command::Postorder => {
                let keys = join_keys(&tree.postorder());
                self.set_message(format!("Post-order: {}", keys), MessageType::Info)
            }
            Command::MinMax => match tree.min().and_then(|min| tree.max().map(|max| (min, max))) {
                Ok((min, max)) => {
                    self.set_message(format!("Min: {}, max: {}", min, max), MessageType::Info)
                }
                Err(e) => self.set_message(e.to_string(), MessageType::Warning),
            },
            _ => Ok(()),
        }
    }

    fn insert_random(&mut self, tree: &mut RBTree) -> MenuResult<()> {
        let default = self.config.menu.random_count;
        let prompt = format!("How many random keys? [{}]: ", default);
        let Some(count) = self.prompt_integer(&prompt, i32::try_from(default).ok())? else {
            return Ok(());
        };

        let count = match usize::try_from(count) {
            Ok(count) if count <= MAX_RANDOM_COUNT => count,
            _ => {
                return self.set_message(
                    format!("Count must be between 0 and {}", MAX_RANDOM_COUNT),
                    MessageType::Warning,
                );
            }
        };

        let (min, max) = (self.config.menu.random_min, self.config.menu.random_max);
        let keys: Vec<i32> = (0..count).map(|_| self.rng.random_range(min..=max)).collect();

        let started = Instant::now();
        let mut skipped = 0;
        for &key in &keys {
            match tree.insert(key) {
                Ok(()) => {}
                Err(TreeError::AlreadyExists(_)) => skipped += 1,
                Err(e) => return self.set_message(e.to_string(), MessageType::Error),
            }
        }
        let elapsed = started.elapsed();

        self.set_message(format!("Inserted keys: {}", join_keys(&keys)), MessageType::Info)?;
        self.set_message(
            format!(
                "{} inserted, {} duplicates skipped ({:?})",
                count - skipped,
                skipped,
                elapsed
            ),
            MessageType::Success,
        )
    }

    fn report(&mut self, result: Result<(), TreeError>, success: String, started: Instant) -> MenuResult<()> {
        let elapsed = started.elapsed();
        match result {
            Ok(()) => self.set_message(format!("{} ({:?})", success, elapsed), MessageType::Success),
            Err(e) => self.set_message(e.to_string(), MessageType::Error),
        }
    }
}
