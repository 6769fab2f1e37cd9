use std::{convert::Infallible, sync::Arc};

use docket::{
    ArgumentDeclaration, ArgumentKind, ArgumentMode, CommandFactory, CommandFile, DefaultValue,
    FactoryConfig, InfoError, OptionDeclaration, OptionKind, OptionMode, Registrar, Scalar,
    printers::help_text, registrar::register_all,
};
use pretty_assertions::assert_eq;

struct Tasks;

#[docket::command_file]
impl Tasks {
    /// Run my command.
    #[allow(non_snake_case)]
    pub fn myCommand(
        &self,
        #[docket(help = "Where to run")] _target: String,
        #[docket(default = 3)] _count: u32,
        #[docket(option, short, help = "Skip checks")] _force: bool,
        #[docket(option, default = "text")] _output: String,
    ) {
    }

    #[allow(non_snake_case)]
    pub fn getStatus(&self) {}

    #[allow(non_snake_case)]
    pub fn setUp(&self) {}

    pub fn _hidden(&self) {}

    pub fn setup(&self) {}

    pub fn new() -> Self {
        Self
    }
}

struct Shapes;

#[docket::command_file]
impl Shapes {
    /// Copy files.
    ///
    /// Copies every source into the destination.
    #[docket(name = "cp", alias = "copy")]
    #[docket(usage(example = "cp a b", description = "Copy a to b"))]
    pub fn copy_files(&self, _destination: &str, _sources: Vec<String>) {}

    /// Show a page.
    pub fn show(
        &self,
        _page: Option<u32>,
        #[docket(default = 10)] _limit: u32,
        #[docket(default = ["a", "b"])] _rest: Vec<String>,
        #[docket(option, long = "output-format", short = 'o', default = "json")] _format: String,
        #[docket(option, help = "Only pretend")] _dry_run: bool,
        #[docket(option)] _color: Option<String>,
    ) {
    }

    #[docket(skip)]
    pub fn skipped(&self) {}
}

const JOBS: usize = 4;

struct Defaults;

#[docket::command_file]
impl Defaults {
    pub fn run(
        &self,
        #[docket(default = JOBS)] _jobs: usize,
        #[docket(default = 5_000_000_000)] _budget: i64,
        #[docket(default = -7)] _offset: i64,
        #[docket(default = f64::NAN)] _ratio: f64,
    ) {
    }
}

#[test]
fn records_match_the_methods() {
    let info = Tasks::command_info("myCommand").unwrap();

    assert_eq!(info.name(), "my-command");
    assert_eq!(
        info.arguments().collect::<Vec<_>>(),
        [
            ("target", &ArgumentKind::Required),
            ("count", &ArgumentKind::Optional(Scalar::Int(3))),
        ]
    );
    assert_eq!(
        info.options().collect::<Vec<_>>(),
        [
            ("force|f", &OptionKind::Flag),
            ("output", &OptionKind::Valued(Scalar::from("text"))),
        ]
    );
}

#[test]
fn integer_defaults_of_any_width() {
    let info = Defaults::command_info("run").unwrap();
    let defaults: Vec<&ArgumentKind> = info.arguments().map(|(_, kind)| kind).collect();

    assert_eq!(defaults[0], &ArgumentKind::Optional(Scalar::Int(4)));
    assert_eq!(
        defaults[1],
        &ArgumentKind::Optional(Scalar::Int(5_000_000_000))
    );
    assert_eq!(defaults[2], &ArgumentKind::Optional(Scalar::Int(-7)));
}

#[test]
fn nan_default_builds_equal_definitions() {
    let file = Arc::new(Defaults);
    let factory = CommandFactory::new();

    let first = factory.build(&file).unwrap();
    assert_eq!(
        first[0].argument("ratio").unwrap().default(),
        &DefaultValue::Single(Scalar::Float(f64::NAN))
    );
    assert_eq!(first, factory.build(&file).unwrap());
}

#[test]
fn macro_lists_public_self_methods() {
    assert_eq!(
        Tasks::METHODS,
        ["myCommand", "getStatus", "setUp", "_hidden", "setup"]
    );
    assert_eq!(Shapes::METHODS, ["copy_files", "show"]);
}

#[test]
fn unknown_methods_are_an_error() {
    assert_eq!(
        Tasks::command_info("deploy"),
        Err(InfoError::unknown_method("deploy"))
    );
    assert_eq!(
        Shapes::command_info("skipped"),
        Err(InfoError::unknown_method("skipped"))
    );
}

#[test]
fn builds_commands_from_annotated_methods() {
    let file = Arc::new(Tasks::new());
    let commands = CommandFactory::new().build(&file).unwrap();

    let names: Vec<&str> = commands.iter().map(|command| command.name()).collect();
    assert_eq!(names, ["my-command", "setup"]);

    let command = &commands[0];
    assert_eq!(command.description(), "Run my command.");
    assert_eq!(command.help(), "");
    assert_eq!(command.target().method(), "myCommand");
    assert!(Arc::ptr_eq(command.target().file(), &file));

    assert_eq!(
        command.arguments(),
        [
            ArgumentDeclaration::required("target", "Where to run"),
            ArgumentDeclaration::optional("count", "", Scalar::Int(3)),
        ]
    );
    assert_eq!(
        command.options(),
        [
            OptionDeclaration::flag("force", "f", "Skip checks"),
            OptionDeclaration::valued("output", "", "", Scalar::from("text")),
        ]
    );

    assert!(commands[1].arguments().is_empty());
    assert!(commands[1].options().is_empty());
}

#[test]
fn building_twice_gives_equal_definitions() {
    let file = Arc::new(Shapes);
    let factory = CommandFactory::new();

    assert_eq!(factory.build(&file).unwrap(), factory.build(&file).unwrap());
}

#[test]
fn records_carry_docs_and_attributes() {
    let info = Shapes::command_info("copy_files").unwrap();

    assert_eq!(info.name(), "cp");
    assert_eq!(info.method_name(), "copy_files");
    assert_eq!(info.description(), "Copy files.");
    assert_eq!(info.help(), "Copies every source into the destination.");
    assert_eq!(info.aliases(), ["copy"]);
    assert_eq!(
        info.example_usages().collect::<Vec<_>>(),
        [("cp a b", "Copy a to b")]
    );
    assert_eq!(
        info.arguments().collect::<Vec<_>>(),
        [
            ("destination", &ArgumentKind::Required),
            ("sources", &ArgumentKind::Variadic(vec![])),
        ]
    );
}

#[test]
fn parameter_types_and_defaults_decide_kinds() {
    let info = Shapes::command_info("show").unwrap();

    assert_eq!(
        info.arguments().collect::<Vec<_>>(),
        [
            ("page", &ArgumentKind::Optional(Scalar::Null)),
            ("limit", &ArgumentKind::Optional(Scalar::Int(10))),
            (
                "rest",
                &ArgumentKind::Variadic(vec![Scalar::from("a"), Scalar::from("b")])
            ),
        ]
    );

    assert_eq!(
        info.options().collect::<Vec<_>>(),
        [
            (
                "output-format|o",
                &OptionKind::Valued(Scalar::Str("json".to_owned()))
            ),
            ("dry-run", &OptionKind::Flag),
            ("color", &OptionKind::Valued(Scalar::Null)),
        ]
    );
    assert_eq!(info.option_description("dry-run"), "Only pretend");
}

#[test]
fn assembled_shapes() {
    let commands = CommandFactory::with_config(FactoryConfig::default().validate(true))
        .build(&Arc::new(Shapes))
        .unwrap();

    let show = &commands[1];
    let modes: Vec<ArgumentMode> = show.arguments().iter().map(|arg| arg.mode()).collect();
    assert_eq!(
        modes,
        [
            ArgumentMode::Optional,
            ArgumentMode::Optional,
            ArgumentMode::Variadic
        ]
    );
    assert_eq!(
        show.argument("rest").unwrap().default(),
        &DefaultValue::Sequence(vec![Scalar::from("a"), Scalar::from("b")])
    );

    let format = show.option("output-format").unwrap();
    assert_eq!(format.shortcut(), "o");
    assert_eq!(format.mode(), OptionMode::ValuedOptional);
    assert_eq!(format.default(), Some(&Scalar::from("json")));

    assert_eq!(show.option("dry-run").unwrap().mode(), OptionMode::Flag);
    assert_eq!(show.option("dry-run").unwrap().default(), None);
}

#[test]
fn help_for_generated_command() {
    let commands = CommandFactory::new().build(&Arc::new(Shapes)).unwrap();

    let expected = "\
Copy files.

Usage:
  cp <destination> [<sources>...]
  cp a b

Aliases:
  copy

Arguments:
  <destination>
  [<sources>...]

Help:
  Copies every source into the destination.
";

    assert_eq!(help_text(&commands[0]), expected);
}

#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl Registrar for Recorder {
    type Err = Infallible;

    fn command(&mut self, name: &str, _description: &str, _help: &str) -> Result<(), Infallible> {
        self.events.push(format!("command {name}"));
        Ok(())
    }

    fn alias(&mut self, alias: &str) -> Result<(), Infallible> {
        self.events.push(format!("alias {alias}"));
        Ok(())
    }

    fn argument(&mut self, argument: &ArgumentDeclaration) -> Result<(), Infallible> {
        self.events.push(format!("argument {}", argument.name()));
        Ok(())
    }

    fn option(&mut self, option: &OptionDeclaration) -> Result<(), Infallible> {
        self.events.push(format!("option {}", option.long()));
        Ok(())
    }
}

#[test]
fn registers_generated_commands() {
    let commands = CommandFactory::new().build(&Arc::new(Tasks)).unwrap();
    let mut recorder = Recorder::default();

    register_all(&commands, &mut recorder).unwrap();

    assert_eq!(
        recorder.events,
        [
            "command my-command",
            "argument target",
            "argument count",
            "option force",
            "option output",
            "command setup",
        ]
    );
}
