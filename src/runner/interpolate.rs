//! Variable interpolation for strings
//!
//! This module replaces `${var}` references in command strings.

use crate::error::{InterpolationError, InterpolationResult};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::env;
use std::sync::OnceLock;

/// Maximum number of substitution passes before giving up
const MAX_PASSES: usize = 32;

fn var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("variable pattern is valid"))
}

/// Interpolate variables in a string
///
/// Supports:
/// - `${var}` - variable from context
/// - Environment variables (when not found in context)
///
/// Unknown variables are left as written, so shell-side `${...}` expansions
/// still reach the interpreter.
pub fn interpolate(s: &str, vars: &HashMap<String, String>) -> InterpolationResult<String> {
    let mut result = s.to_string();

    for _ in 0..MAX_PASSES {
        let mut replaced = false;

        let next = var_pattern()
            .replace_all(&result, |caps: &Captures| {
                let var_name = &caps[1];

                if let Some(value) = vars.get(var_name) {
                    replaced = true;
                    return value.clone();
                }

                if let Ok(value) = env::var(var_name) {
                    replaced = true;
                    return value;
                }

                caps[0].to_string()
            })
            .into_owned();

        if !replaced {
            return Ok(next);
        }
        result = next;
    }

    Err(InterpolationError::RecursiveInterpolation)
}
