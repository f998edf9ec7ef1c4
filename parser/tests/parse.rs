use std::collections::{BTreeMap, HashMap};
use std::net::IpAddr;
use std::path::PathBuf;

use argbind::{
    Args, Binder, CoerceError, Config, FromArg, IntoRecords, Outcome, ParseError, Parser,
    ScalarKind, SchemaError, scalar_field,
};

fn split(line: &str) -> Vec<String> {
    line.split_whitespace().map(String::from).collect()
}

fn run<'a>(line: &str, records: impl IntoRecords<'a>) -> Result<Outcome, ParseError> {
    let mut parser = Parser::new(Config::default().with_program("example"), records)
        .expect("schema should be valid");
    parser.parse(split(line))
}

#[derive(Default)]
struct Basic {
    foo: String,
    bar: bool,
}

impl Args for Basic {
    fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
        b.field("Foo", "", &mut self.foo);
        b.field("Bar", "", &mut self.bar);
    }
}

#[test]
fn test_inline_value_and_flag() {
    let mut args = Basic::default();
    assert_eq!(run("--foo=hello --bar", &mut args), Ok(Outcome::Parsed));
    assert_eq!(args.foo, "hello");
    assert!(args.bar);
}

#[test]
fn test_separate_value_and_single_dash_long_name() {
    let mut args = Basic::default();
    run("-foo hello", &mut args).expect("parse should succeed");
    assert_eq!(args.foo, "hello");
    assert!(!args.bar);
}

#[test]
fn test_empty_inline_value_is_a_value() {
    let mut args = Basic {
        foo: "preset".into(),
        bar: false,
    };
    run("--foo=", &mut args).expect("parse should succeed");
    assert_eq!(args.foo, "");
}

#[test]
fn test_flag_accepts_explicit_inline_boolean() {
    let mut args = Basic {
        foo: String::new(),
        bar: true,
    };
    run("--bar=false", &mut args).expect("parse should succeed");
    assert!(!args.bar);

    let mut args = Basic::default();
    let err = run("--bar=maybe", &mut args).unwrap_err();
    assert_eq!(
        err,
        ParseError::InvalidValue {
            option: "--bar=maybe".into(),
            source: CoerceError::Bool("maybe".into()),
        }
    );
}

#[test]
fn test_repeated_scalar_overwrites() {
    let mut args = Basic::default();
    run("--foo a --foo b", &mut args).expect("parse should succeed");
    assert_eq!(args.foo, "b");
}

#[test]
fn test_untouched_fields_keep_their_values() {
    let mut args = Basic {
        foo: "abc".into(),
        bar: false,
    };
    run("", &mut args).expect("parse should succeed");
    assert_eq!(args.foo, "abc");
}

#[test]
fn test_option_order_does_not_matter() {
    let mut forward = Fetch::default();
    run("--database db --ids 1 2", &mut forward).expect("parse should succeed");
    let mut reverse = Fetch::default();
    run("--ids 1 2 --database db", &mut reverse).expect("parse should succeed");

    assert_eq!(forward.database, reverse.database);
    assert_eq!(forward.ids, reverse.ids);
}

#[test]
fn test_unknown_argument() {
    let mut args = Basic::default();
    let err = run("--nope", &mut args).unwrap_err();
    assert_eq!(err, ParseError::UnknownArgument("--nope".into()));
    assert_eq!(err.to_string(), "unknown argument --nope");
}

#[test]
fn test_missing_value_at_end_and_before_option() {
    let mut args = Basic::default();
    let err = run("--foo", &mut args).unwrap_err();
    assert_eq!(err.to_string(), "missing value for --foo");

    let mut args = Basic::default();
    let err = run("--foo --bar", &mut args).unwrap_err();
    assert_eq!(err, ParseError::MissingValue("--foo".into()));
}

#[derive(Default)]
struct Required {
    foo: String,
    bar: bool,
}

impl Args for Required {
    fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
        b.field("Foo", "required", &mut self.foo);
        b.field("Bar", "", &mut self.bar);
    }
}

#[test]
fn test_required_option_present() {
    let mut args = Required::default();
    run("--foo=abc --bar", &mut args).expect("parse should succeed");
    assert_eq!(args.foo, "abc");
    assert!(args.bar);
}

#[test]
fn test_required_option_missing() {
    let mut args = Required::default();
    let err = run("--bar", &mut args).unwrap_err();
    assert_eq!(err, ParseError::Required("--foo".into()));
    assert_eq!(err.to_string(), "--foo is required");
}

#[derive(Default)]
struct InOut {
    input: String,
    output: Vec<String>,
}

impl Args for InOut {
    fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
        b.field("Input", "positional", &mut self.input);
        b.field("Output", "positional", &mut self.output);
    }
}

#[test]
fn test_positionals_fill_in_declaration_order() {
    let mut args = InOut::default();
    run("in out1 out2 out3", &mut args).expect("parse should succeed");
    assert_eq!(args.input, "in");
    assert_eq!(args.output, vec!["out1", "out2", "out3"]);
}

#[test]
fn test_missing_optional_positionals_are_left_alone() {
    let mut args = InOut::default();
    run("", &mut args).expect("parse should succeed");
    assert_eq!(args.input, "");
    assert!(args.output.is_empty());
}

#[test]
fn test_separator_makes_dashed_tokens_positional() {
    let mut args = InOut::default();
    run("-- -in -v -- --out", &mut args).expect("parse should succeed");
    assert_eq!(args.input, "-in");
    assert_eq!(args.output, vec!["-v", "--out"]);
}

#[derive(Default)]
struct CopyFiles {
    source: PathBuf,
    dest: PathBuf,
}

impl Args for CopyFiles {
    fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
        b.field("Source", "positional,required", &mut self.source);
        b.field("Dest", "positional", &mut self.dest);
    }
}

#[test]
fn test_too_many_positionals() {
    let mut args = CopyFiles::default();
    let err = run("a b c d", &mut args).unwrap_err();
    assert_eq!(err, ParseError::TooManyPositionals("c".into()));
    assert_eq!(err.to_string(), "too many positional arguments at 'c'");
}

#[test]
fn test_required_positional_missing() {
    let mut args = CopyFiles::default();
    let err = run("", &mut args).unwrap_err();
    assert_eq!(err.to_string(), "source is required");
}

#[derive(Default)]
struct Fetch {
    database: String,
    ids: Vec<i64>,
}

impl Args for Fetch {
    fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
        b.field("Database", "", &mut self.database);
        b.field("IDs", "", &mut self.ids);
    }
}

#[test]
fn test_multiple_values_are_collected_greedily() {
    let mut args = Fetch::default();
    run("--database localhost --ids 1 2 3", &mut args).expect("parse should succeed");
    assert_eq!(args.database, "localhost");
    assert_eq!(args.ids, vec![1, 2, 3]);
}

#[test]
fn test_inline_multiple_value_is_one_element() {
    let mut args = Fetch::default();
    run("--ids=7 --ids 8 9", &mut args).expect("parse should succeed");
    assert_eq!(args.ids, vec![7, 8, 9]);
}

#[test]
fn test_negative_number_ends_multiple_values() {
    let mut args = Fetch::default();
    let err = run("--ids 1 -2", &mut args).unwrap_err();
    assert_eq!(err, ParseError::UnknownArgument("-2".into()));
    assert_eq!(args.ids, vec![1]);
}

#[test]
fn test_multiple_value_coercion_error_names_option() {
    let mut args = Fetch::default();
    let err = run("--ids 1 x", &mut args).unwrap_err();
    assert_eq!(
        err.to_string(),
        "error processing --ids: parsing \"x\": invalid digit found in string"
    );
}

#[derive(Default)]
struct Mixed {
    commands: Vec<String>,
    files: Vec<String>,
    databases: Vec<String>,
}

impl Args for Mixed {
    fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
        b.field("Commands", "-c", &mut self.commands);
        b.field("Files", "-f", &mut self.files);
        b.field("Databases", "positional", &mut self.databases);
    }
}

#[test]
fn test_repeated_multiple_options_accumulate() {
    let mut args = Mixed::default();
    run("-c cmd1 -f file1 -c cmd2 -f file2 -f file3 -c cmd3", &mut args)
        .expect("parse should succeed");
    assert_eq!(args.commands, vec!["cmd1", "cmd2", "cmd3"]);
    assert_eq!(args.files, vec!["file1", "file2", "file3"]);
    assert!(args.databases.is_empty());
}

#[test]
fn test_positionals_after_separator_skip_greedy_options() {
    let mut args = Mixed::default();
    run("-c cmd1 -- db1 db2", &mut args).expect("parse should succeed");
    assert_eq!(args.commands, vec!["cmd1"]);
    assert_eq!(args.databases, vec!["db1", "db2"]);
}

#[derive(Default)]
struct SeparateMixed {
    commands: Vec<String>,
    files: Vec<String>,
    databases: Vec<String>,
}

impl Args for SeparateMixed {
    fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
        b.field("Commands", "-c,separate", &mut self.commands);
        b.field("Files", "-f,separate", &mut self.files);
        b.field("Databases", "positional", &mut self.databases);
    }
}

#[test]
fn test_separate_options_take_one_value_per_occurrence() {
    let mut args = SeparateMixed::default();
    run(
        "-c cmd1 db1 -f file1 db2 -c cmd2 -f file2 -f file3 db3 -c cmd3",
        &mut args,
    )
    .expect("parse should succeed");
    assert_eq!(args.commands, vec!["cmd1", "cmd2", "cmd3"]);
    assert_eq!(args.files, vec!["file1", "file2", "file3"]);
    assert_eq!(args.databases, vec!["db1", "db2", "db3"]);
}

#[test]
fn test_separate_option_requires_a_value() {
    let mut args = SeparateMixed::default();
    let err = run("-c cmd1 -c", &mut args).unwrap_err();
    assert_eq!(err, ParseError::MissingValue("-c".into()));

    let mut args = SeparateMixed::default();
    let err = run("-f -c cmd1", &mut args).unwrap_err();
    assert_eq!(err, ParseError::MissingValue("-f".into()));
}

#[test]
fn test_separate_option_accepts_inline_value() {
    let mut args = SeparateMixed::default();
    run("-c=cmd1 db1 --files=a", &mut args).expect("parse should succeed");
    assert_eq!(args.commands, vec!["cmd1"]);
    assert_eq!(args.files, vec!["a"]);
    assert_eq!(args.databases, vec!["db1"]);
}

#[derive(Default)]
struct SeparateScalar {
    name: String,
}

impl Args for SeparateScalar {
    fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
        b.field("Name", "separate", &mut self.name);
    }
}

#[test]
fn test_separate_on_single_value_field_is_a_schema_error() {
    let mut args = SeparateScalar::default();
    let err = Parser::new(Config::default(), &mut args)
        .err()
        .expect("separate on a scalar should be rejected");
    assert_eq!(
        err,
        SchemaError::InvalidDirective {
            record: "SeparateScalar".into(),
            field: "Name".into(),
            directive: "separate".into(),
        }
    );
}

#[derive(Default)]
struct Users {
    user_ids: HashMap<String, i32>,
    labels: BTreeMap<String, String>,
}

impl Args for Users {
    fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
        b.field("UserIDs", "", &mut self.user_ids);
        b.field("Labels", "", &mut self.labels);
    }
}

#[test]
fn test_mappings_split_at_first_equals() {
    let mut args = Users::default();
    run("--userids john=123 mary=456 --labels query=a=b", &mut args)
        .expect("parse should succeed");
    assert_eq!(args.user_ids.len(), 2);
    assert_eq!(args.user_ids["john"], 123);
    assert_eq!(args.user_ids["mary"], 456);
    assert_eq!(args.labels["query"], "a=b");
}

#[test]
fn test_mapping_without_separator_is_rejected() {
    let mut args = Users::default();
    let err = run("--userids john", &mut args).unwrap_err();
    assert_eq!(
        err.to_string(),
        "error processing --userids: error parsing \"john\", expected format key=value"
    );
}

#[derive(Debug, Default, PartialEq)]
struct CommaSeparated(BTreeMap<String, String>);

impl FromArg for CommaSeparated {
    fn kind() -> ScalarKind {
        ScalarKind::Text
    }

    fn from_arg(text: &str) -> Result<Self, CoerceError> {
        let mut map = BTreeMap::new();
        for part in text.split(',') {
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| CoerceError::MissingSeparator(part.to_string()))?;
            map.insert(key.to_string(), value.to_string());
        }
        Ok(CommaSeparated(map))
    }
}

scalar_field!(CommaSeparated);

#[derive(Default)]
struct Custom {
    values: CommaSeparated,
    addr: Option<IpAddr>,
}

impl Args for Custom {
    fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
        b.field("Values", "", &mut self.values);
        b.field("Addr", "", &mut self.addr);
    }
}

#[test]
fn test_custom_text_type() {
    let mut args = Custom::default();
    run("--values one=two,three=four --addr 127.0.0.1", &mut args)
        .expect("parse should succeed");
    assert_eq!(args.values.0["one"], "two");
    assert_eq!(args.values.0["three"], "four");
    assert_eq!(args.addr, Some("127.0.0.1".parse().unwrap()));
}

#[test]
fn test_custom_text_type_error() {
    let mut args = Custom::default();
    let err = run("--addr nowhere", &mut args).unwrap_err();
    assert!(matches!(
        err,
        ParseError::InvalidValue { ref option, source: CoerceError::Text { .. } } if option == "--addr"
    ));
}

#[derive(Default)]
struct Verbosity {
    verbose: bool,
}

impl Args for Verbosity {
    fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
        b.field("Verbose", "-v", &mut self.verbose);
    }
}

#[test]
fn test_multiple_records_share_the_top_level() {
    let mut fetch = Fetch::default();
    let mut verbosity = Verbosity::default();
    run("-v --ids 4 --database db", (&mut fetch, &mut verbosity))
        .expect("parse should succeed");
    assert!(verbosity.verbose);
    assert_eq!(fetch.ids, vec![4]);
    assert_eq!(fetch.database, "db");
}

#[test]
fn test_multiple_records_as_trait_objects() {
    let mut fetch = Fetch::default();
    let mut verbosity = Verbosity::default();
    let records: Vec<&mut dyn Args> = vec![&mut fetch, &mut verbosity];
    run("-v", records).expect("parse should succeed");
    assert!(verbosity.verbose);
}

#[test]
fn test_duplicate_name_across_records_is_a_schema_error() {
    let mut first = Verbosity::default();
    let mut second = Verbosity::default();
    let err = Parser::new(Config::default(), (&mut first, &mut second))
        .err()
        .expect("duplicate names should be rejected");
    assert!(matches!(err, SchemaError::DuplicateName { ref name, .. } if name == "verbose"));
}

#[test]
fn test_help_request_skips_required_checks() {
    let mut args = CopyFiles::default();
    assert_eq!(run("--help", &mut args), Ok(Outcome::Help));

    let mut args = Required::default();
    assert_eq!(run("-h", &mut args), Ok(Outcome::Help));
}

#[test]
fn test_help_is_not_injected_when_disabled() {
    let mut args = Basic::default();
    let config = Config {
        inject_help: false,
        ..Config::default()
    };
    let mut parser = Parser::new(config, &mut args).expect("schema should be valid");
    assert_eq!(
        parser.parse(["--help"]),
        Err(ParseError::UnknownArgument("--help".into()))
    );
}

#[derive(Default)]
struct Host {
    host: String,
}

impl Args for Host {
    fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
        b.field("Host", "-h", &mut self.host);
    }
}

#[test]
fn test_record_short_name_wins_over_help_short() {
    let mut args = Host::default();
    let mut parser = Parser::new(Config::default(), &mut args).expect("schema should be valid");
    let help = parser.spec().find_option("help").expect("help is injected");
    assert_eq!(help.short, None);
    assert_eq!(parser.parse(["-h", "local"]), Ok(Outcome::Parsed));
    drop(parser);
    assert_eq!(args.host, "local");
}
