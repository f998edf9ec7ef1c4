//! Specification export example.
//!
//! Prints the resolved specification tree of a small record as JSON, then
//! the help text of one of its subcommands without parsing anything.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p argbind-demos --example export_spec
//! ```

use argbind::{Args, Binder, Config, Parser, Subcommand, Variants};

#[derive(Debug, Default)]
struct Get {
    item: String,
}

impl Args for Get {
    fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
        b.field("Item", "positional,help:item to fetch", &mut self.item);
    }
}

#[derive(Debug, Default)]
struct List {
    format: String,
    limit: u32,
}

impl Args for List {
    fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
        b.field("Format", "help:output format", &mut self.format);
        b.field("Limit", "", &mut self.limit);
    }
}

enum Command {
    Get(Get),
    List(List),
}

impl Subcommand for Command {
    fn variants(v: &mut Variants) {
        v.variant("Get", "subcommand,help:fetch an item and print it");
        v.variant("List", "subcommand,help:list available items");
    }

    fn instantiate(field: &str) -> Option<Self> {
        match field {
            "Get" => Some(Command::Get(Get::default())),
            "List" => Some(Command::List(List::default())),
            _ => None,
        }
    }

    fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
        match self {
            Command::Get(cmd) => cmd.bind(b),
            Command::List(cmd) => cmd.bind(b),
        }
    }
}

#[derive(Default)]
struct Items {
    verbose: bool,
    command: Option<Command>,
}

impl Args for Items {
    fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
        b.field("Verbose", "", &mut self.verbose);
        b.subcommands(&mut self.command);
    }
}

fn main() {
    let mut items = Items::default();
    let parser = Parser::new(Config::default().with_program("example"), &mut items).unwrap();

    println!("{}", parser.spec().to_json().unwrap());
    println!();

    parser
        .write_help_for_subcommand(&mut std::io::stdout(), &["list"])
        .unwrap();
}
