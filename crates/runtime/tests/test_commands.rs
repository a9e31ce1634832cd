//! Command-level tests through `Interp`
//!
//! Operands are built from text the way a host would pass them, and results
//! are read back as canonical text.

use bignum_runtime::{BigInt, BigValue, CommandError, ErrorKind, Interp, RuntimeConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn eval(interp: &mut Interp, name: &str, texts: &[&str]) -> Result<String, CommandError> {
    let mut operands: Vec<BigValue> = texts.iter().map(|t| BigValue::from(*t)).collect();
    let mut result = interp.invoke(name, &mut operands)?;
    Ok(result.get_text()?.to_string())
}

fn eval_nums(interp: &mut Interp, name: &str, nums: &[i64]) -> BigInt {
    let texts: Vec<String> = nums.iter().map(i64::to_string).collect();
    let mut operands: Vec<BigValue> = texts.into_iter().map(BigValue::from).collect();
    let mut result = interp.invoke(name, &mut operands).unwrap();
    result.get_typed().unwrap().clone()
}

#[test]
fn test_scenarios() {
    let mut interp = Interp::new();
    assert_eq!(eval(&mut interp, "+", &["10", "20", "30"]).unwrap(), "60");
    assert_eq!(eval(&mut interp, "-", &["5"]).unwrap(), "-5");
    assert_eq!(eval(&mut interp, "-", &["100", "30", "20"]).unwrap(), "50");
    assert_eq!(eval(&mut interp, "**", &["2", "10"]).unwrap(), "1024");
    assert_eq!(eval(&mut interp, "**", &["2", "10", "1000"]).unwrap(), "24");
    assert_eq!(eval(&mut interp, ">=", &["10", "10"]).unwrap(), "1");
    assert_eq!(eval(&mut interp, "!=", &["10", "10"]).unwrap(), "0");
}

#[test]
fn test_negative_exponent_is_invalid_argument() {
    let mut interp = Interp::new();
    let err = eval(&mut interp, "**", &["2", "-1"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(err.to_string(), "Negative exponent");
}

#[test]
fn test_fold_identities() {
    let mut interp = Interp::new();
    assert_eq!(eval(&mut interp, "+", &[]).unwrap(), "0");
    assert_eq!(eval(&mut interp, "*", &[]).unwrap(), "1");
    assert_eq!(eval(&mut interp, "-", &[]).unwrap(), "0");
    assert_eq!(eval(&mut interp, "/", &[]).unwrap(), "1");
    assert_eq!(eval(&mut interp, "%", &[]).unwrap(), "0");
}

#[test]
fn test_add_and_multiply_ignore_order_and_grouping() {
    let mut interp = Interp::new();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let a = rng.gen_range(-1000i64..1000);
        let b = rng.gen_range(-1000i64..1000);
        let c = rng.gen_range(-1000i64..1000);
        for op in ["+", "*"] {
            let abc = eval_nums(&mut interp, op, &[a, b, c]);
            assert_eq!(abc, eval_nums(&mut interp, op, &[c, a, b]));
            assert_eq!(abc, eval_nums(&mut interp, op, &[b, c, a]));

            let ab = eval_nums(&mut interp, op, &[a, b]);
            let bc = eval_nums(&mut interp, op, &[b, c]);
            let left = eval(&mut interp, op, &[&ab.to_string(), &c.to_string()]).unwrap();
            let right = eval(&mut interp, op, &[&a.to_string(), &bc.to_string()]).unwrap();
            assert_eq!(left, right);
            assert_eq!(left, abc.to_string());
        }
    }
}

#[test]
fn test_subtract_is_left_fold_with_first_operand_seed() {
    let mut interp = Interp::new();
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let a = rng.gen_range(-10_000i64..10_000);
        let b = rng.gen_range(-10_000i64..10_000);
        let c = rng.gen_range(-10_000i64..10_000);
        assert_eq!(eval_nums(&mut interp, "-", &[a]), BigInt::from(-a));
        assert_eq!(
            eval_nums(&mut interp, "-", &[a, b, c]),
            BigInt::from(a - b - c)
        );
    }
}

#[test]
fn test_comparison_totality() {
    let mut interp = Interp::new();
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..200 {
        let a = rng.gen_range(-50i64..50);
        let b = rng.gen_range(-50i64..50);
        let holds =
            |interp: &mut Interp, op: &str| eval_nums(interp, op, &[a, b]) == BigInt::from(1);

        let lt = holds(&mut interp, "<");
        let eq = holds(&mut interp, "==");
        let gt = holds(&mut interp, ">");
        assert_eq!(
            [lt, eq, gt].iter().filter(|h| **h).count(),
            1,
            "{} {}",
            a,
            b
        );
        assert_eq!(lt, a < b);

        assert_eq!(holds(&mut interp, ">="), !lt);
        assert_eq!(holds(&mut interp, "<="), !gt);
        assert_eq!(holds(&mut interp, "!="), !eq);
    }
}

#[test]
fn test_truncating_division_identity() {
    let mut interp = Interp::new();
    let mut rng = StdRng::seed_from_u64(19);
    for _ in 0..300 {
        let a = rng.gen_range(-100_000i64..100_000);
        let b = loop {
            let b = rng.gen_range(-500i64..500);
            if b != 0 {
                break b;
            }
        };
        let q = eval_nums(&mut interp, "/", &[a, b]);
        let r = eval_nums(&mut interp, "%", &[a, b]);
        assert_eq!(q.clone() * b + r.clone(), BigInt::from(a));
        assert_eq!(q, BigInt::from(a / b));
        assert_eq!(r, BigInt::from(a % b));
    }
}

#[test]
fn test_division_by_zero_is_error() {
    let mut interp = Interp::new();
    for op in ["/", "%"] {
        let err = eval(&mut interp, op, &["10", "0"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.to_string(), "Division by zero");
    }
}

#[test]
fn test_power_edges() {
    let mut interp = Interp::new();
    for base in ["0", "1", "-1", "7", "-12345678901234567890"] {
        assert_eq!(eval(&mut interp, "**", &[base, "0"]).unwrap(), "1");
    }
    for exponent in ["1", "2", "1000000000000"] {
        assert_eq!(eval(&mut interp, "**", &["0", exponent]).unwrap(), "0");
    }
    assert_eq!(
        eval(&mut interp, "**", &["-1", "1000000000001"]).unwrap(),
        "-1"
    );
    assert_eq!(
        eval(&mut interp, "**", &["3", "1000000000000", "7"]).unwrap(),
        "4"
    );
}

#[test]
fn test_modular_power_reduces_like_modulo() {
    let mut interp = Interp::new();
    assert_eq!(eval(&mut interp, "**", &["-2", "3", "5"]).unwrap(), "-3");
    assert_eq!(eval(&mut interp, "%", &["-8", "5"]).unwrap(), "-3");
    assert_eq!(eval(&mut interp, "**", &["2", "3", "-5"]).unwrap(), "3");
    assert_eq!(eval(&mut interp, "%", &["8", "-5"]).unwrap(), "3");
    assert_eq!(eval(&mut interp, "**", &["-2", "3", "-5"]).unwrap(), "-3");

    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..200 {
        let base = rng.gen_range(-30i64..30).to_string();
        let exponent = rng.gen_range(0i64..9).to_string();
        let modulus = loop {
            let m = rng.gen_range(-25i64..25);
            if m != 0 {
                break m.to_string();
            }
        };
        let power = eval(&mut interp, "**", &[&base, &exponent]).unwrap();
        let expected = eval(&mut interp, "%", &[&power, &modulus]).unwrap();
        let actual = eval(&mut interp, "**", &[&base, &exponent, &modulus]).unwrap();
        assert_eq!(actual, expected, "** {} {} {}", base, exponent, modulus);
    }
}

#[test]
fn test_large_power_hits_ceiling() {
    let mut interp = Interp::new();
    let err = eval(&mut interp, "**", &["10", "100000000000"]).unwrap_err();
    assert_eq!(err, CommandError::OutOfMemory);
    assert_eq!(err.kind(), ErrorKind::OutOfMemory);
    assert_eq!(err.to_string(), "Out of memory");
}

#[test]
fn test_fold_out_of_memory_message() {
    let mut interp = Interp::with_config(&RuntimeConfig::default().with_max_bits(64));
    for op in ["+", "-", "*", "/", "%"] {
        let err = eval(&mut interp, op, &["0x1ffffffffffffffff", "2"]).unwrap_err();
        assert_eq!(err, CommandError::FoldOutOfMemory, "{}", op);
        assert_eq!(err.to_string(), "Out of memory doing multiprecision math");
    }
}

#[test]
fn test_reseed_determinism() {
    let mut interp = Interp::new();
    eval(&mut interp, "srand", &["hello world"]).unwrap();
    let first: Vec<String> = (0..5)
        .map(|_| eval(&mut interp, "rand", &["3"]).unwrap())
        .collect();
    eval(&mut interp, "srand", &["hello world"]).unwrap();
    let second: Vec<String> = (0..5)
        .map(|_| eval(&mut interp, "rand", &["3"]).unwrap())
        .collect();
    assert_eq!(first, second);

    let mut other = Interp::with_config(&RuntimeConfig::default().with_seed("hello world"));
    let third: Vec<String> = (0..5)
        .map(|_| eval(&mut other, "rand", &["3"]).unwrap())
        .collect();
    assert_eq!(first, third);
}

#[test]
fn test_rand_range() {
    let mut interp = Interp::with_config(&RuntimeConfig::default().with_seed("range"));
    let limit = BigInt::from(1u8) << 64;
    for _ in 0..100 {
        let mut operands = vec![BigValue::from("2")];
        let mut r = interp.invoke("rand", &mut operands).unwrap();
        let r = r.get_typed().unwrap();
        assert!(*r >= BigInt::from(0) && *r < limit);
    }
    assert_eq!(eval(&mut interp, "rand", &["0"]).unwrap(), "0");
}

#[test]
fn test_operand_aliases_survive_commands() {
    let mut interp = Interp::new();
    let x = BigValue::from("0x10");
    let mut operands = vec![x.clone(), x.clone()];
    let mut result = interp.invoke("*", &mut operands).unwrap();
    assert_eq!(result.get_text().unwrap(), "256");

    // the host's handle still aliases an unconverted text cell
    assert_eq!(x.cell().cached_text(), Some("0x10"));
    assert_eq!(x.to_string(), "0x10");
}

#[test]
fn test_result_cell_reuse() {
    let mut interp = Interp::new();
    let held = interp.invoke("+", &mut [BigValue::from("1")]).unwrap();
    let next = interp.invoke("+", &mut [BigValue::from("2")]).unwrap();
    assert!(!held.ptr_eq(&next));
    assert_eq!(held.to_string(), "1");

    drop(held);
    let cell: *const _ = next.cell();
    drop(next);
    let reused = interp.invoke("+", &mut [BigValue::from("3")]).unwrap();
    assert!(std::ptr::eq(reused.cell(), cell));
    assert_eq!(reused.to_string(), "3");
}

#[test]
fn test_error_messages() {
    let mut interp = Interp::new();
    assert_eq!(
        eval(&mut interp, "+", &["1", "1.5"]).unwrap_err().to_string(),
        "Invalid big number: \"1.5\" must be a relative integer number"
    );
    assert_eq!(
        eval(&mut interp, "<", &["1"]).unwrap_err().to_string(),
        "wrong # args: should be \"< bignum bignum\""
    );
    assert_eq!(
        eval(&mut interp, "srand", &[]).unwrap_err().to_string(),
        "wrong # args: should be \"srand seed-string\""
    );
    assert_eq!(
        eval(&mut interp, "max", &[]).unwrap_err().to_string(),
        "invalid command name \"max\""
    );
}
