use super::*;

/// Walks a nesting of `depth` levels the way the parser does.
fn nest(depth: u32) -> u32 {
    ensure_sufficient_stack(|| {
        // Large-ish frame so the red zone is actually crossed
        let frame = [depth; 64];
        if depth == 0 {
            0
        } else {
            nest(depth - 1) + 1 + frame[63] - depth
        }
    })
}

#[test]
fn shallow_nesting() {
    assert_eq!(nest(8), 8);
}

#[test]
fn deep_nesting_does_not_overflow() {
    assert_eq!(nest(200_000), 200_000);
}

#[test]
fn propagates_errors() {
    let result: Result<(), String> = ensure_sufficient_stack(|| Err("unclosed level".into()));
    assert_eq!(result, Err("unclosed level".to_string()));
}
