/// Value of `--name=value` or `--name value`. Blank values count as absent.
pub fn flag_value(args: &[String], name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == name {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() && !next.starts_with("--") {
                return Some(next.trim().to_string());
            }
        }
    }
    None
}

pub fn has_flag(args: &[String], name: &str) -> bool {
    args.iter().any(|arg| arg == name)
}

/// First argument that is neither a flag nor the value of one of `value_flags`.
pub fn positional(args: &[String], value_flags: &[&str]) -> Option<String> {
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg.starts_with("--") {
            skip_next = value_flags.contains(&arg.as_str());
            continue;
        }
        return Some(arg.clone());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{flag_value, has_flag, positional};

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn reads_both_flag_forms() {
        let a = args(&["--season=2024", "--group", "north", "--phase="]);
        assert_eq!(flag_value(&a, "--season").as_deref(), Some("2024"));
        assert_eq!(flag_value(&a, "--group").as_deref(), Some("north"));
        assert_eq!(flag_value(&a, "--phase"), None);
        assert_eq!(flag_value(&a, "--competition"), None);
    }

    #[test]
    fn positional_skips_flag_values() {
        let a = args(&["--group", "north", "--tiebreak", "league.json"]);
        assert_eq!(positional(&a, &["--group"]).as_deref(), Some("league.json"));
        assert!(has_flag(&a, "--tiebreak"));
        assert!(positional(&args(&["--tiebreak"]), &[]).is_none());
    }
}
