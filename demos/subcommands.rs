//! Subcommand example.
//!
//! A git-like command line with a global `--quiet` flag and three
//! subcommands. Parser errors and help are reported through
//! `Parser::parse_or_report`, so the exit status is chosen here.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p argbind-demos --example subcommands -- commit -a -m "fix typo"
//! cargo run -p argbind-demos --example subcommands -- push --help
//! ```

use argbind::{Args, Binder, Config, Parser, Subcommand, Variants};

#[derive(Debug, Default)]
struct Checkout {
    branch: String,
    track: bool,
}

impl Args for Checkout {
    fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
        b.field("Branch", "positional,required,help:branch to switch to", &mut self.branch);
        b.field("Track", "-t,help:set up tracking", &mut self.track);
    }
}

#[derive(Debug, Default)]
struct Commit {
    all: bool,
    message: String,
}

impl Args for Commit {
    fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
        b.field("All", "-a,help:stage modified files first", &mut self.all);
        b.field("Message", "-m,required,placeholder:MSG", &mut self.message)
            .help("commit message");
    }
}

#[derive(Debug, Default)]
struct Push {
    remote: String,
    branch: String,
    set_upstream: bool,
}

impl Args for Push {
    fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
        b.field("Remote", "positional", &mut self.remote);
        b.field("Branch", "positional", &mut self.branch);
        b.field("SetUpstream", "-u,--set-upstream", &mut self.set_upstream)
            .help("remember the remote branch");
    }
}

#[derive(Debug)]
enum Command {
    Checkout(Checkout),
    Commit(Commit),
    Push(Push),
}

impl Subcommand for Command {
    fn variants(v: &mut Variants) {
        v.variant("Checkout", "subcommand,help:switch branches");
        v.variant("Commit", "subcommand,help:record changes");
        v.variant("Push", "subcommand,help:update a remote");
    }

    fn instantiate(field: &str) -> Option<Self> {
        match field {
            "Checkout" => Some(Command::Checkout(Checkout::default())),
            "Commit" => Some(Command::Commit(Commit::default())),
            "Push" => Some(Command::Push(Push::default())),
            _ => None,
        }
    }

    fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
        match self {
            Command::Checkout(cmd) => cmd.bind(b),
            Command::Commit(cmd) => cmd.bind(b),
            Command::Push(cmd) => cmd.bind(b),
        }
    }
}

#[derive(Debug, Default)]
struct Git {
    quiet: bool,
    command: Option<Command>,
}

impl Args for Git {
    fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
        b.field("Quiet", "-q,help:suppress output", &mut self.quiet);
        b.subcommands(&mut self.command);
    }
}

fn main() {
    let mut git = Git::default();
    let config = Config::default()
        .with_program("git")
        .with_description("a tiny version control front end");

    let status = {
        let mut parser = match Parser::new(config, &mut git) {
            Ok(parser) => parser,
            Err(e) => {
                eprintln!("invalid declarations: {e}");
                std::process::exit(2);
            }
        };
        let args = std::env::args().skip(1);
        parser.parse_or_report(args, &mut std::io::stdout(), &mut std::io::stderr())
    };
    if let Some(status) = status {
        std::process::exit(status);
    }

    match git.command {
        Some(Command::Checkout(cmd)) => {
            println!("checkout requested for branch {}", cmd.branch);
        }
        Some(Command::Commit(cmd)) => {
            println!("commit requested with message \"{}\"", cmd.message);
        }
        Some(Command::Push(cmd)) => {
            println!("push requested from {} to {}", cmd.branch, cmd.remote);
        }
        None if !git.quiet => println!("nothing to do"),
        None => {}
    }
}
