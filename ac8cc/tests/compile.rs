use ac8cc::error::Error;
use arch::mem::VAR_BASE;
use arch::op::Op;

fn compile_ok(code: &str) -> ac8cc::Output {
    let output = ac8cc::compile(code).expect("no fatal error");
    assert!(!output.failed(), "errors: {:?}", output.errors);
    output
}

macro_rules! accepts {
    ($name:ident, $code:expr) => {
        #[test]
        fn $name() {
            compile_ok($code);
        }
    };
}

accepts!(empty_body, "PROGRAM \"p\" : BEGIN END");
accepts!(single_assignment, "PROGRAM \"p\" : BEGIN x = 1 END");
accepts!(chained_assignments, "PROGRAM \"p\" : BEGIN x = 1 y = x z = x + y END");
accepts!(result_only, "PROGRAM \"p\" : BEGIN RES = 1 + 2 END");
accepts!(parenthesized, "PROGRAM \"p\" : BEGIN RES = (1 + 2) * (3 + 4) END");
accepts!(unary_minus, "PROGRAM \"p\" : BEGIN RES = -5 + 10 END");
accepts!(double_negation, "PROGRAM \"p\" : BEGIN RES = - - 5 END");
accepts!(division, "PROGRAM \"p\" : BEGIN RES = 17 / 5 END");
accepts!(precedence_mix, "PROGRAM \"p\" : BEGIN RES = 1 + 2 * 3 - 4 / 2 END");
accepts!(multiline, "PROGRAM \"sum\" :\nBEGIN\n  a = 2\n  b = 3\n  RES = a + b\nEND\n");

#[test]
fn program_name_is_kept() {
    let output = compile_ok("PROGRAM \"answer\" : BEGIN x = 42 END");
    assert_eq!(output.name.as_deref(), Some("answer"));
}

#[test]
fn halt_is_always_appended() {
    let output = compile_ok("PROGRAM \"p\" : BEGIN x = 1 END");
    assert_eq!(output.program.insts().last().unwrap().op, Op::HLT);
}

#[test]
fn literals_intern_to_one_address() {
    let output = compile_ok("PROGRAM \"p\" : BEGIN x = 5 y = 5 END");
    let consts: Vec<_> = output
        .symbols
        .iter()
        .filter(|s| s.name == "_const_5")
        .collect();
    assert_eq!(consts.len(), 1);
    let addr = consts[0].addr;
    // Both uses load from the same interned cell.
    let loads = output
        .program
        .insts()
        .iter()
        .filter(|i| i.op == Op::LDA && i.operand == Some(addr))
        .count();
    assert_eq!(loads, 2);
}

#[test]
fn reassignment_keeps_the_original_address() {
    let output = compile_ok("PROGRAM \"p\" : BEGIN x = 1 x = 2 END");
    let x = output.symbols.get("x").unwrap();
    let stores: Vec<_> = output
        .program
        .insts()
        .iter()
        .filter(|i| i.op == Op::STA && i.operand == Some(x.addr))
        .collect();
    assert_eq!(stores.len(), 2);
}

#[test]
fn forward_reference_defines_an_uninitialized_variable() {
    let output = compile_ok("PROGRAM \"p\" : BEGIN x = y END");
    let y = output.symbols.get("y").unwrap();
    assert!(!y.initialized);
    assert_eq!(y.value, 0);
}

#[test]
fn compilation_is_deterministic() {
    let code = "PROGRAM \"p\" : BEGIN a = 6 b = 7 RES = a * b - a / b END";
    let first = compile_ok(code);
    let second = compile_ok(code);
    assert_eq!(first.asm_text(), second.asm_text());
    assert_eq!(first.program.encode(), second.program.encode());
    assert_eq!(first.result_addr, second.result_addr);
}

#[test]
fn code_stays_below_the_data_region() {
    let output = compile_ok("PROGRAM \"p\" : BEGIN a = 2 * 3 b = a * 4 RES = b / 2 END");
    assert!(output.program.code_size() <= VAR_BASE as usize);
    for sym in output.symbols.iter() {
        assert!(sym.addr >= VAR_BASE);
    }
}

#[test]
fn conditional_jumps_resolve_forward() {
    let output = compile_ok("PROGRAM \"p\" : BEGIN RES = 3 * 4 / 2 END");
    for (idx, inst) in output.program.insts().iter().enumerate() {
        let offset = output.program.byte_offset(idx);
        match inst.op {
            Op::JZ | Op::JN => {
                let target = inst.operand.expect("patched") as usize;
                assert!(target >= offset + inst.size());
            }
            Op::JMP => {
                let target = inst.operand.expect("resolved") as usize;
                assert!(target < offset);
            }
            _ => {}
        }
    }
}

// ----------------------------------------------------------------------------
// Error recovery
// ----------------------------------------------------------------------------

fn compile_failing(code: &str) -> ac8cc::Output {
    let output = ac8cc::compile(code).expect("no fatal error");
    assert!(output.failed(), "expected errors for {code:?}");
    output
}

#[test]
fn missing_end_is_reported() {
    let output = compile_failing("PROGRAM \"p\" : BEGIN x = 1");
    assert!(output
        .errors
        .iter()
        .any(|e| matches!(e, Error::UnexpectedEnd(_))));
}

#[test]
fn missing_header_is_reported() {
    compile_failing("BEGIN x = 1 END");
}

#[test]
fn unmatched_parenthesis_is_reported() {
    let output = compile_failing("PROGRAM \"p\" : BEGIN x = (1 + 2 END");
    assert!(output
        .errors
        .iter()
        .any(|e| matches!(e, Error::Unexpected("`)`", ..) | Error::UnexpectedEnd("`)`"))));
}

#[test]
fn one_pass_surfaces_multiple_errors() {
    let output = compile_failing("PROGRAM \"p\" : BEGIN x = = 1 y + 2 END");
    assert!(output.errors.len() >= 2, "errors: {:?}", output.errors);
}

#[test]
fn error_location_points_at_the_offending_token() {
    let code = "PROGRAM \"p\" : BEGIN x = * END";
    let output = compile_failing(code);
    match &output.errors[0] {
        Error::Unexpected(what, found, offset) => {
            assert_eq!(*what, "a factor");
            assert_eq!(found, "*");
            assert_eq!(*offset, code.find('*').unwrap());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn garbage_input_terminates() {
    compile_failing(": : : : :");
    compile_failing("");
    compile_failing("PROGRAM");
    compile_failing("PROGRAM \"p\"");
}
