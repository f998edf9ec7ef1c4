//! Flat command line example.
//!
//! Declares positionals, flags, a repeated option and a mapping on one
//! record, then parses the process arguments into it.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p argbind-demos --example hello -- -v in.txt out1 out2 --env HOME=/root
//! cargo run -p argbind-demos --example hello -- --help
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use argbind::{Args, Binder};

#[derive(Debug, Default)]
struct Hello {
    input: PathBuf,
    output: Vec<PathBuf>,
    verbose: bool,
    jobs: u16,
    env: BTreeMap<String, String>,
}

impl Args for Hello {
    fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
        b.field("Input", "positional,required,help:file to read", &mut self.input);
        b.field("Output", "positional", &mut self.output)
            .help("files to write");
        b.field("Verbose", "-v,help:verbosity level", &mut self.verbose);
        b.field("Jobs", "-j,placeholder:N", &mut self.jobs)
            .help("maximum number of simultaneous jobs");
        b.field("Env", "-e,placeholder:KEY=VALUE", &mut self.env)
            .help("variables to set");
    }
}

fn main() {
    let mut hello = Hello {
        jobs: 4,
        ..Hello::default()
    };
    argbind::parse_or_exit(&mut hello);

    println!("input:   {}", hello.input.display());
    for output in &hello.output {
        println!("output:  {}", output.display());
    }
    println!("verbose: {}", hello.verbose);
    println!("jobs:    {}", hello.jobs);
    for (key, value) in &hello.env {
        println!("env:     {key}={value}");
    }
}
