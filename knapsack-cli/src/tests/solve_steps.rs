//! Behaviour-driven step definitions driving the solve CLI scenarios.

use super::helpers::{CLASSIC_INSTANCE, Workspace};
use super::*;
use crate::solve::{DefaultSolveSolverBuilder, run_solve_with};
use camino::Utf8PathBuf;
use knapsack_core::{InstanceError, Optimality, Solution};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

#[derive(Debug)]
struct SolveWorld {
    workspace: Workspace,
    instance_path: Utf8PathBuf,
    include_instance: RefCell<bool>,
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl SolveWorld {
    fn new() -> Self {
        let workspace = Workspace::new();
        let instance_path = workspace.path("instance.txt");
        Self {
            workspace,
            instance_path,
            include_instance: RefCell::new(true),
            cli_args: RefCell::new(Vec::new()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec!["knapsack".to_owned(), "solve".to_owned()];
        if *self.include_instance.borrow() {
            argv.push(self.instance_path.as_str().to_owned());
        }
        argv.extend(self.cli_args.borrow().iter().cloned());
        argv
    }

    fn stdout(&self) -> String {
        String::from_utf8(self.stdout.borrow().clone()).expect("stdout utf-8")
    }
}

#[fixture]
fn world() -> SolveWorld {
    SolveWorld::new()
}

#[given("the classic instance file exists on disk")]
fn classic_instance_exists(#[from(world)] world: &SolveWorld) {
    world.workspace.write("instance.txt", CLASSIC_INSTANCE);
}

#[given("an instance file with a zero weight exists on disk")]
fn zero_weight_instance_exists(#[from(world)] world: &SolveWorld) {
    world.workspace.write("instance.txt", "2 10\n5 3\n7 0\n");
}

#[given("I request JSON output")]
fn request_json_output(#[from(world)] world: &SolveWorld) {
    world
        .cli_args
        .borrow_mut()
        .extend(["--format".to_owned(), "json".to_owned()]);
}

#[given("I omit the instance path")]
fn omit_instance_path(#[from(world)] world: &SolveWorld) {
    *world.include_instance.borrow_mut() = false;
}

#[when("I run the solve command")]
fn run_solve_command(#[from(world)] world: &SolveWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Solve(args) => {
            let mut buffer = world.stdout.borrow_mut();
            run_solve_with(args, &DefaultSolveSolverBuilder, &mut *buffer)
        }
    });
    world.result.replace(Some(outcome));
}

#[then("the command prints value {value} with flag {flag}")]
fn command_prints_value(#[from(world)] world: &SolveWorld, value: u64, flag: u8) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    result.as_ref().expect("expected success");

    let stdout = world.stdout();
    let header = stdout.lines().next().expect("header line");
    assert_eq!(header, format!("{value} {flag}"));
}

#[then("the selection line is {bits}")]
fn selection_line(#[from(world)] world: &SolveWorld, bits: String) {
    let stdout = world.stdout();
    let selection = stdout.lines().nth(1).expect("selection line");
    assert_eq!(selection, bits.trim());
}

#[then("the command prints a JSON solution worth {value}")]
fn command_prints_json(#[from(world)] world: &SolveWorld, value: u64) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    result.as_ref().expect("expected success");

    let solution: Solution =
        serde_json::from_str(&world.stdout()).expect("output should be a JSON solution");
    assert_eq!(solution.value, value);
    assert_eq!(solution.taken, vec![false, true, true]);
    assert_eq!(solution.optimality, Optimality::Proven);
}

#[then("the command fails because the instance is invalid")]
fn command_fails_invalid_instance(#[from(world)] world: &SolveWorld) {
    let borrowed = world.result.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::ParseInstance { source, .. } => assert_eq!(
            *source,
            ParseError::Invalid(InstanceError::NonPositiveWeight {
                index: 1,
                weight: 0
            })
        ),
        other => panic!("expected ParseInstance, found {other:?}"),
    }
}

#[then("the command fails because the instance path is missing")]
fn command_fails_missing_instance_path(#[from(world)] world: &SolveWorld) {
    let borrowed = world.result.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::MissingArgument { field, .. } => assert_eq!(*field, ARG_INSTANCE),
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

macro_rules! register_solve_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/solve_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: SolveWorld) {
            let _ = world;
        }
    };
}

register_solve_scenario!(solve_as_text, "solving an instance file as text");
register_solve_scenario!(solve_as_json, "emitting JSON output");
register_solve_scenario!(solve_invalid_instance, "rejecting a malformed instance file");
register_solve_scenario!(solve_missing_instance, "rejecting a missing instance path");
