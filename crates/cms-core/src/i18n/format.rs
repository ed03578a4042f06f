//! printf-style interpolation for translation strings.
//!
//! Only the verbs `%s`, `%v`, `%d` and `%%` are understood. There are no
//! flags, widths or precisions: the character after `%` is always the verb.
//! Nothing here fails. Missing, surplus and mismatched arguments are written
//! inline as markers (`%!s(MISSING)`, `%!(EXTRA string=x)`, `%!d(string=x)`)
//! so a broken catalog entry is visible on the page.

use serde_json::Value;

pub fn format_args(format: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(format.len());
    let mut next = 0usize;
    let mut chars = format.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let Some(verb) = chars.next() else {
            out.push_str("%!(NOVERB)");
            break;
        };
        if verb == '%' {
            out.push('%');
            continue;
        }
        let Some(arg) = args.get(next) else {
            out.push_str(&format!("%!{verb}(MISSING)"));
            continue;
        };
        next += 1;
        match verb {
            's' | 'v' => out.push_str(&display(arg)),
            'd' if arg.is_i64() || arg.is_u64() => out.push_str(&arg.to_string()),
            _ => out.push_str(&format!("%!{verb}({}={})", type_name(arg), display(arg))),
        }
    }

    if next < args.len() {
        let extra: Vec<String> = args[next..]
            .iter()
            .map(|arg| format!("{}={}", type_name(arg), display(arg)))
            .collect();
        out.push_str(&format!("%!(EXTRA {})", extra.join(", ")));
    }
    out
}

/// Plain rendering of a template argument: strings unquoted, the rest as JSON.
pub fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "<nil>".to_string(),
        other => other.to_string(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "<nil>",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float64",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_interpolates_in_order() {
        let out = format_args("%s has %d items (100%%)", &[json!("cart"), json!(3)]);
        assert_eq!(out, "cart has 3 items (100%)");
    }

    #[test]
    fn test_missing_and_extra_arguments_are_inline() {
        assert_eq!(format_args("%s and %s", &[json!("a")]), "a and %!s(MISSING)");
        assert_eq!(format_args("Download now", &[json!("x"), json!(2)]), "Download now%!(EXTRA string=x, int=2)");
    }

    #[test]
    fn test_bad_verb_and_trailing_percent() {
        assert_eq!(format_args("%d", &[json!("x")]), "%!d(string=x)");
        assert_eq!(format_args("50%", &[]), "50%!(NOVERB)");
    }

    #[test]
    fn test_width_and_flags_are_not_verbs() {
        assert_eq!(format_args("%5d", &[json!(3)]), "%!5(int=3)d");
        assert_eq!(format_args("%-s|", &[json!("a")]), "%!-(string=a)s|");
    }
}
