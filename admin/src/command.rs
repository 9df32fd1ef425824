use std::str::FromStr;

use product_core::ProductId;

pub const HELP: &str = "\
commands:
  list              show the product list
  reload            fetch the list again
  add               create a product
  edit <id>         change a product
  delete <id>       remove a product
  help              show this text
  quit              leave";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    List,
    Reload,
    Add,
    Edit(ProductId),
    Delete(ProductId),
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("`{0}` needs a product id")]
    MissingId(&'static str),
    #[error("`{0}` is not a product id")]
    BadId(String),
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(ParseError::Empty)?;
        let command = match verb.to_ascii_lowercase().as_str() {
            "list" | "ls" => Command::List,
            "reload" | "refresh" => Command::Reload,
            "add" | "new" => Command::Add,
            "edit" => Command::Edit(parse_id("edit", words.next())?),
            "delete" | "rm" => Command::Delete(parse_id("delete", words.next())?),
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return Err(ParseError::Unknown(verb.to_string())),
        };
        Ok(command)
    }
}

fn parse_id(verb: &'static str, word: Option<&str>) -> Result<ProductId, ParseError> {
    let word = word.ok_or(ParseError::MissingId(verb))?;
    word.parse().map_err(|_| ParseError::BadId(word.to_string()))
}
