use crate::console::theme::TerminalTheme;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rbt_config::{Config, ConfigError};
use rbt_core::RBTree;
use std::io::{self, BufRead, StdinLock, Stdout, Write};
use thiserror::Error;
use tracing::{debug, info};

mod commands;
mod input;
mod render;

pub use commands::Command;
pub use input::{InputError, parse_integer};

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type MenuResult<T> = Result<T, MenuError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Success,
    Warning,
    Error,
}

/// Numbered console menu driving a single red-black tree.
///
/// The tree does not exist until the create command runs; destroy drops it
/// again. Input and output are generic so the loop can be scripted.
pub struct Menu<R, W> {
    config: Config,
    theme: TerminalTheme,
    tree: Option<RBTree>,
    rng: StdRng,
    input: R,
    output: W,
    running: bool,
}

impl Menu<StdinLock<'static>, Stdout> {
    /// Menu on the process's stdin and stdout
    pub fn stdio(config: Config) -> MenuResult<Self> {
        Self::new(config, io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Menu<R, W> {
    /// Fails when `config` does not pass [`Config::validate`].
    pub fn new(config: Config, input: R, output: W) -> MenuResult<Self> {
        config.validate()?;
        let theme = TerminalTheme::from_config(&config.ui)?;
        let rng = match config.menu.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            config,
            theme,
            tree: None,
            rng,
            input,
            output,
            running: true,
        })
    }

    /// Main read/dispatch loop; returns on the quit command or end of input
    pub fn run(&mut self) -> MenuResult<()> {
        info!("menu started");

        while self.running {
            self.draw_menu()?;

            let Some(choice) = self.read_integer(None)? else {
                debug!("input closed");
                break;
            };

            match Command::from_choice(choice) {
                Some(command) => self.execute(command)?,
                None => self.set_message(
                    format!("Unknown option {}", choice),
                    MessageType::Warning,
                )?,
            }

            if self.running && self.config.menu.pause {
                self.pause()?;
            }
        }

        info!("menu stopped");
        Ok(())
    }

    pub fn tree(&self) -> Option<&RBTree> {
        self.tree.as_ref()
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rbt_config::ConfigBuilder;
    use std::io::Cursor;

    fn plain_config() -> Config {
        ConfigBuilder::new()
            .menu(|menu| {
                menu.clear_screen = false;
                menu.pause = false;
                menu.seed = Some(42);
            })
            .ui(|ui| ui.colored = false)
            .build()
            .expect("valid config")
    }

    fn run_script(script: &str) -> (Option<Vec<i32>>, String) {
        let mut menu = Menu::new(plain_config(), Cursor::new(script.to_string()), Vec::new())
            .expect("menu");
        menu.run().expect("run");
        let keys = menu.tree().map(|tree| tree.inorder());
        let output = String::from_utf8(menu.into_output()).expect("utf8");
        (keys, output)
    }

    #[test]
    fn test_insert_and_traverse() {
        let (keys, output) = run_script("1\n5\n10\n5\n20\n5\n30\n8\n9\n10\n0\n");
        assert_eq!(keys, Some(vec![10, 20, 30]));
        assert!(output.contains("Created an empty tree"));
        assert!(output.contains("Pre-order: 20 10 30"));
        assert!(output.contains("In-order: 10 20 30"));
        assert!(output.contains("Post-order: 10 30 20"));
        assert!(output.contains("Goodbye"));
    }

    #[test]
    fn test_operations_require_a_tree() {
        let (keys, output) = run_script("5\n9\n0\n");
        assert_eq!(keys, None);
        assert!(output.contains("No tree exists"));
    }

    #[test]
    fn test_duplicate_and_missing_keys_are_reported() {
        let (keys, output) = run_script("1\n5\n7\n5\n7\n4\n3\n7\n7\n0\n");
        assert_eq!(keys, Some(vec![7]));
        assert!(output.contains("key 7 already exists"));
        assert!(output.contains("key 3 not found"));
        assert!(output.contains("Key 7 is in the tree"));
    }

    #[test]
    fn test_destroy_drops_tree() {
        let (keys, output) = run_script("1\n5\n1\n3\n9\n0\n");
        assert_eq!(keys, None);
        assert!(output.contains("Tree destroyed"));
        assert!(output.contains("No tree exists"));
    }

    #[test]
    fn test_invalid_input_reprompts() {
        let (keys, output) = run_script("1\n5\nabc\n99999999999\n12\n0\n");
        assert_eq!(keys, Some(vec![12]));
        assert!(output.contains("invalid integer"));
        assert!(output.contains("out of range"));
    }

    #[test]
    fn test_random_batch_stays_in_range() {
        let (keys, output) = run_script("1\n6\n20\n0\n");
        let keys = keys.expect("tree");
        assert!(!keys.is_empty());
        assert!(keys.len() <= 20);
        assert!(keys.iter().all(|key| (0..=99).contains(key)));
        assert!(output.contains("Inserted keys:"));
    }

    #[test]
    fn test_random_batch_default_count() {
        let (keys, _) = run_script("1\n6\n\n0\n");
        let keys = keys.expect("tree");
        assert!(!keys.is_empty() && keys.len() <= 10);
    }

    #[test]
    fn test_min_max_and_print() {
        let (_, output) = run_script("1\n11\n5\n4\n5\n9\n11\n2\n0\n");
        assert!(output.contains("tree is empty"));
        assert!(output.contains("Min: 4, max: 9"));
        assert!(output.contains("[9(R)]"));
        assert!(output.contains("[4(B)]"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = plain_config();
        config.menu.random_min = 10;
        config.menu.random_max = 1;
        let result = Menu::new(config, Cursor::new("1\n6\n5\n0\n".to_string()), Vec::new());
        assert!(matches!(result, Err(MenuError::Config(ConfigError::Validation(_)))));

        let mut config = plain_config();
        config.ui.indent_width = usize::MAX / 2 + 1;
        assert!(Menu::new(config, Cursor::new(String::new()), Vec::new()).is_err());
    }

    #[test]
    fn test_tree_survives_failed_commands() {
        let (keys, output) = run_script("1\n5\n1\n4\n2\n11\n9\n0\n");
        assert_eq!(keys, Some(vec![1]));
        assert!(output.contains("key 2 not found"));
        assert!(output.contains("Min: 1, max: 1"));
        assert!(output.contains("In-order: 1"));
    }

    #[test]
    fn test_destroy_without_tree_warns() {
        let (keys, output) = run_script("1\n3\n3\n0\n");
        assert_eq!(keys, None);
        assert!(output.contains("Tree destroyed"));
        assert!(output.contains("No tree exists, create one first"));
    }

    #[test]
    fn test_end_of_input_stops_loop() {
        let (keys, _) = run_script("1\n5\n3\n");
        assert_eq!(keys, Some(vec![3]));
    }
}
