//! Free-text task splitting.
//!
//! Users dump several tasks in one line ("clean desk, email Sam and pack").
//! Split on newlines, commas, semicolons, and the connective " and ", trim,
//! and drop empties. Capping the result is the planner's job.

pub fn split_tasks(input: &str) -> Vec<String> {
    input
        .split(['\n', ',', ';'])
        .flat_map(|segment| segment.split(" and "))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_task() {
        assert_eq!(split_tasks("write the report"), vec!["write the report"]);
    }

    #[test]
    fn test_comma_separated() {
        assert_eq!(
            split_tasks("clean desk, email Sam, pack bag"),
            vec!["clean desk", "email Sam", "pack bag"]
        );
    }

    #[test]
    fn test_and_connective() {
        assert_eq!(
            split_tasks("do dishes and take out trash"),
            vec!["do dishes", "take out trash"]
        );
    }

    #[test]
    fn test_newlines_and_blank_segments() {
        assert_eq!(
            split_tasks("first\n\nsecond,  , third"),
            vec!["first", "second", "third"]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(split_tasks("   ").is_empty());
    }
}
