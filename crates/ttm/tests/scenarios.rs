//! End-to-end scenarios and boundary cases run through the full
//! scanner/evaluator pipeline, grounded on the startup program and defaults
//! a CLI session would use.

use pretty_assertions::assert_eq;
use ttm::{CollectSink, ErrorKind, NoopTracer, RecordingTracer, ResourceLimits, StringSource, Ttm};

fn new_ttm() -> Ttm<CollectSink, StringSource, NoopTracer> {
    let mut ttm = Ttm::new(ResourceLimits::default(), CollectSink::default(), StringSource::default(), NoopTracer);
    ttm.install_startup_program().expect("startup program must install cleanly");
    ttm
}

fn run(program: &str) -> String {
    new_ttm().run_str(program).expect("program should run to completion")
}

#[test]
fn scenario_define_and_call() {
    assert_eq!(run("#<ds;greet;hello>#<greet>"), "hello");
}

#[test]
fn scenario_body_containing_an_active_call_is_evaluated_on_expansion() {
    assert_eq!(run("#<ds;f;<#<ad;1;2>>>#<f>"), "3");
}

#[test]
fn scenario_segment_marks_substitute_positionally() {
    assert_eq!(run("#<ds;pair;<a;b>>#<ss;pair;a;b>#<pair;X;Y>"), "X;Y");
}

#[test]
fn scenario_variadic_addition() {
    assert_eq!(run("#<ad;10;20;30>"), "60");
}

#[test]
fn scenario_append_extends_body_and_advances_residual() {
    assert_eq!(run("#<ds;x;foo>#<ap;x;bar>#<x>"), "foobar");
}

#[test]
fn scenario_class_scan_leaves_remainder_on_residual() {
    let mut ttm = new_ttm();
    let out = ttm.run_str("#<dcl;dig;0123456789>#<ds;s;123abc>#<ccl;dig;s>").unwrap();
    assert_eq!(out, "123");
    let rest = ttm.run_str("#<cs;s>").unwrap();
    assert_eq!(rest, "abc");
}

#[test]
fn boundary_empty_body_expands_to_empty_string() {
    assert_eq!(run("#<ds;e;>#<e>"), "");
}

#[test]
fn boundary_segment_mark_index_at_or_above_argc_is_skipped() {
    // ss assigns a, b, c to segment marks 1, 2, 3; calling with only one
    // argument leaves marks 2 and 3 with nothing to substitute.
    assert_eq!(run("#<ds;f;<a;b;c>>#<ss;f;a;b;c>#<f;only>"), "only;;");
}

#[test]
fn boundary_unescaped_angle_brackets_at_top_level_drop_their_brackets() {
    assert_eq!(run("<hello>"), "hello");
}

#[test]
fn boundary_escaped_sharp_does_not_trigger_a_call() {
    assert_eq!(run(r"\#<ad;1;1>"), "#<ad;1;1>");
}

#[test]
fn boundary_passive_vs_active_routing() {
    assert_eq!(run(r"#<ds;x;\#<ad;1;1>>##<x>"), "#<ad;1;1>");
    assert_eq!(run(r"#<ds;x;\#<ad;1;1>>#<x>"), "2");
}

#[test]
fn boundary_division_by_zero_is_fatal() {
    let err = new_ttm().run_str("#<dv;1;0>").unwrap_err();
    assert_eq!(err.kind, ErrorKind::EArithmetic);
}

#[test]
fn boundary_arity_mismatch_is_fatal() {
    let err = new_ttm().run_str("#<ds;x;body>#<ap;x>").unwrap_err();
    assert_eq!(err.kind, ErrorKind::EFewParms);
}

#[test]
fn boundary_erasing_a_locked_name_is_a_no_op() {
    let mut ttm = new_ttm();
    ttm.run_str("#<es;ad>").unwrap();
    assert!(ttm.dict.contains("ad"));
}

#[test]
fn boundary_exit_sets_process_exit_code() {
    let mut ttm = new_ttm();
    ttm.run_str("#<exit;7>").unwrap();
    assert_eq!(ttm.exit_code(), 7);
}

#[test]
fn boundary_deeply_nested_calls_respect_stacksize() {
    // Calls nested directly inside an argument recurse through execute_call
    // at the Rust call-stack level (unlike a self-referential body, whose
    // reinsertion is handled by separate iterations of the top-level scan
    // loop), so this is the shape that actually exercises stacksize.
    let limits = ResourceLimits { stacksize: 10, ..ResourceLimits::default() };
    let mut ttm = Ttm::new(limits, CollectSink::default(), StringSource::default(), NoopTracer);
    ttm.install_startup_program().unwrap();
    let mut program = String::from("#<ad;1;");
    for _ in 0..50 {
        program.push_str("#<ad;1;");
    }
    program.push('0');
    for _ in 0..51 {
        program.push('>');
    }
    let err = ttm.run_str(&program).unwrap_err();
    assert_eq!(err.kind, ErrorKind::EStackOverflow);
}

#[test]
fn boundary_rrp_idempotence() {
    let mut ttm = new_ttm();
    ttm.run_str("#<ds;x;hello>#<cc;x>").unwrap();
    let once = ttm.run_str("#<rrp;x>").unwrap();
    let twice = ttm.run_str("#<rrp;x>").unwrap();
    assert_eq!(once, twice);
}

#[test]
fn creation_marks_share_one_value_per_expansion_and_differ_across_calls() {
    let mut ttm = new_ttm();
    ttm.run_str("#<ds;pair;<^00-^00>>").unwrap();
    let first = ttm.run_str("#<pair>").unwrap();
    let second = ttm.run_str("#<pair>").unwrap();
    let (a, b) = first.split_once('-').unwrap();
    assert_eq!(a, b);
    assert_ne!(first, second);
}

#[test]
fn frame_stack_is_restored_after_a_normal_return() {
    let mut ttm = new_ttm();
    ttm.run_str("#<ds;f;ok>#<f>").unwrap();
    assert!(ttm.frames.is_empty());
}

#[test]
fn trace_records_begin_and_end_for_traced_calls() {
    let mut ttm = Ttm::new(ResourceLimits::default(), CollectSink::default(), StringSource::default(), RecordingTracer::default());
    ttm.install_startup_program().unwrap();
    ttm.trace_flag = true;
    ttm.run_str("#<ad;1;1>").unwrap();
    assert_eq!(ttm.tracer.events.len(), 2);
}
