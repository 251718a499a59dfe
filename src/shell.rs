use std::fmt::{self, Write as _};
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use arena_rbtree::{Error as TreeError, NodeId, RbTree};
use thiserror::Error;

/// One line of shell input.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Insert(i64),
    Search(i64),
    Delete(i64),
    Min(i64),
    Max(i64),
    Successor(i64),
    Predecessor(i64),
    Sort,
    Root,
    Height,
    Display,
    End,
}

/// Everything that can go wrong with a command. None of these end the session.
#[derive(Debug, Eq, PartialEq, Error)]
pub(crate) enum ShellError {
    #[error("Invalid command")]
    UnknownCommand(String),
    #[error("Expected an integer after `{command}`, got `{token}`")]
    MalformedInput { command: &'static str, token: String },
    #[error("Expected an integer after `{0}`")]
    MissingArgument(&'static str),
    #[error("Unexpected `{token}` after `{command}`")]
    UnexpectedArgument { command: &'static str, token: String },
    #[error("Value {0} is not in the tree")]
    NotFound(i64),
    #[error("Value {0} is already in the tree")]
    Duplicate(i64),
    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl ShellError {
    /// Attaches the key the user typed to a tree error.
    fn for_key(key: i64, error: TreeError) -> Self {
        match error {
            TreeError::NotFound => ShellError::NotFound(key),
            TreeError::DuplicateKey => ShellError::Duplicate(key),
            TreeError::InvalidArgument => ShellError::Tree(error),
        }
    }

    /// Parse errors are reported without the trailing height line.
    fn is_parse_error(&self) -> bool {
        matches!(
            self,
            ShellError::UnknownCommand(_)
                | ShellError::MalformedInput { .. }
                | ShellError::MissingArgument(_)
                | ShellError::UnexpectedArgument { .. }
        )
    }
}

impl FromStr for Command {
    type Err = ShellError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let name = tokens.next().unwrap_or_default();

        let mut key = |command: &'static str| -> Result<i64, ShellError> {
            let token = tokens.next().ok_or(ShellError::MissingArgument(command))?;
            token.parse().map_err(|_| ShellError::MalformedInput {
                command,
                token: token.to_owned(),
            })
        };

        let (command, parsed) = match name {
            "insert" => ("insert", Command::Insert(key("insert")?)),
            "search" => ("search", Command::Search(key("search")?)),
            "delete" => ("delete", Command::Delete(key("delete")?)),
            "min" => ("min", Command::Min(key("min")?)),
            "max" => ("max", Command::Max(key("max")?)),
            "successor" => ("successor", Command::Successor(key("successor")?)),
            "predecessor" => ("predecessor", Command::Predecessor(key("predecessor")?)),
            "sort" => ("sort", Command::Sort),
            "root" => ("root", Command::Root),
            "height" => ("height", Command::Height),
            "display" => ("display", Command::Display),
            "end" => ("end", Command::End),
            other => return Err(ShellError::UnknownCommand(other.to_owned())),
        };

        match tokens.next() {
            Some(extra) => Err(ShellError::UnexpectedArgument {
                command,
                token: extra.to_owned(),
            }),
            None => Ok(parsed),
        }
    }
}

/// A key, or `nil` for the sentinel.
struct KeyOrNil(Option<i64>);

impl fmt::Display for KeyOrNil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(key) => write!(f, "{key}"),
            None => f.write_str("nil"),
        }
    }
}

fn key_of(tree: &RbTree<i64>, node: Option<NodeId>) -> Result<KeyOrNil, TreeError> {
    Ok(KeyOrNil(node.map(|node| tree.key(node).copied()).transpose()?))
}

/// Runs one command against `tree` and returns the text to show the user.
pub(crate) fn execute(tree: &mut RbTree<i64>, command: Command) -> Result<String, ShellError> {
    let search = |tree: &RbTree<i64>, key: i64| tree.search(&key).map_err(|error| ShellError::for_key(key, error));

    let message = match command {
        Command::Insert(key) => {
            let node = tree.insert(key).map_err(|error| ShellError::for_key(key, error))?;
            format!("Inserted {}", tree.key(node)?)
        }
        Command::Search(key) => {
            let node = search(tree, key)?;
            format!("Found {}", tree.key(node)?)
        }
        Command::Delete(key) => {
            let removed = tree.remove_key(&key).map_err(|error| ShellError::for_key(key, error))?;
            format!("Removed {removed}")
        }
        Command::Min(key) => {
            let node = tree.minimum(search(tree, key)?)?;
            format!("Smallest from {key} is {}", tree.key(node)?)
        }
        Command::Max(key) => {
            let node = tree.maximum(search(tree, key)?)?;
            format!("Largest from {key} is {}", tree.key(node)?)
        }
        Command::Successor(key) => match tree.successor(search(tree, key)?)? {
            Some(node) => format!("Successor of {key} is {}", tree.key(node)?),
            None => format!("{key} has no successor"),
        },
        Command::Predecessor(key) => match tree.predecessor(search(tree, key)?)? {
            Some(node) => format!("Predecessor of {key} is {}", tree.key(node)?),
            None => format!("{key} has no predecessor"),
        },
        Command::Sort => sorted(tree)?,
        Command::Root => format!("Root: {}", key_of(tree, tree.root())?),
        Command::Display => display(tree)?,
        Command::Height => format!("Height: {}", tree.height()),
        Command::End => String::from("Prompt closed"),
    };
    Ok(message)
}

/// `| key(parent) | ...` in ascending key order.
fn sorted(tree: &RbTree<i64>) -> Result<String, TreeError> {
    let mut out = String::from("|");
    for node in tree.in_order() {
        let parent = key_of(tree, tree.parent(node)?)?;
        // Writing to a `String` cannot fail.
        let _ = write!(out, " {}({parent}) |", tree.key(node)?);
    }
    Ok(out)
}

/// Level-order listing, starting a new line whenever the parent changes.
fn display(tree: &RbTree<i64>) -> Result<String, TreeError> {
    if tree.is_empty() {
        return Ok(String::from("Just a sentinel"));
    }

    let mut out = String::new();
    let mut last_parent = None;
    for node in tree.level_order() {
        let parent = tree.parent(node)?;
        if !out.is_empty() {
            out.push(if parent == last_parent { ' ' } else { '\n' });
        }
        last_parent = parent;
        let _ = write!(
            out,
            "{}({},{})",
            tree.key(node)?,
            key_of(tree, parent)?,
            tree.color(node)?
        );
    }
    Ok(out)
}

/// The interactive command loop.
pub(crate) struct Shell<R, W> {
    tree: RbTree<i64>,
    input: R,
    output: W,
    prompt: bool,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub(crate) fn new(tree: RbTree<i64>, input: R, output: W) -> Self {
        Shell {
            tree,
            input,
            output,
            prompt: true,
        }
    }

    pub(crate) fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    /// Reads and runs commands until `end` or end of input. Only I/O errors
    /// on the streams themselves stop the loop early.
    pub(crate) fn run(&mut self) -> io::Result<()> {
        let mut line = String::new();
        loop {
            if self.prompt {
                write!(self.output, "Enter a command: ")?;
                self.output.flush()?;
            }

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                if self.prompt {
                    writeln!(self.output)?;
                }
                writeln!(self.output, "Prompt closed")?;
                return Ok(());
            }

            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            log::debug!("command: {text}");

            match text.parse::<Command>() {
                Ok(command) => {
                    match execute(&mut self.tree, command) {
                        Ok(message) => writeln!(self.output, "{message}")?,
                        Err(error) => writeln!(self.output, "{error}")?,
                    }
                    match command {
                        Command::End => return Ok(()),
                        // `height` already printed it.
                        Command::Height => {}
                        _ => writeln!(self.output, "Height: {}", self.tree.height())?,
                    }
                }
                Err(error) => {
                    debug_assert!(error.is_parse_error());
                    writeln!(self.output, "{error}")?;
                }
            }
        }
    }

    pub(crate) fn into_tree(self) -> RbTree<i64> {
        self.tree
    }
}
